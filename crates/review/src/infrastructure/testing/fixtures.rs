//! Simple test fixtures used across unit tests.

use serde_json::{json, Value};
use tradeassoc_domain::{ChangeRequest, ChangeSet, RecordId};

use crate::ports::outbound::{AccessToken, ActingUser, ApiError};

pub fn token() -> AccessToken {
    AccessToken::new("test-token")
}

pub fn reviewer() -> ActingUser {
    ActingUser {
        id: "7".to_string(),
        display_name: Some("Office Bearer".to_string()),
    }
}

pub fn pending_request(id: i64, patch: Value) -> ChangeRequest {
    ChangeRequest::new(
        RecordId::numeric(id),
        RecordId::numeric(id + 1000),
        ChangeSet::from_patch(patch),
    )
}

/// A bill list exactly as the backend sends it.
pub fn bill_list_payload() -> Value {
    json!([
        {
            "id": 42,
            "billingId": 1042,
            "approvalStatus": "PENDING",
            "updatedData": { "paidAmount": 4500, "paymentMode": "NEFT" },
            "modifiedBy": { "name": "Ravi" },
            "modifiedAt": "2024-06-01T10:00:00Z"
        },
        {
            "id": 43,
            "billingId": 1043,
            "approvalStatus": "PENDING",
            "updatedData": { "fromDate": "2024-04-01", "toDate": "2025-03-31" }
        }
    ])
}

pub fn server_error(status: u16, message: Option<&str>) -> ApiError {
    ApiError::Server {
        status,
        message: message.map(str::to_string),
    }
}
