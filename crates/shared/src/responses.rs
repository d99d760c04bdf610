//! Response types returned by the review backend.
//!
//! The three review domains grew their endpoints separately, so the same
//! concept travels under different keys (`updatedData` vs `changes`,
//! `note` vs `declineReason`, `membershipId` vs `billingId`). Records accept
//! every spelling and normalize into [`ChangeRequest`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tradeassoc_domain::common::parse_datetime;
use tradeassoc_domain::{ApprovalStatus, ChangeRequest, ChangeSet, RecordId};

/// Keys tried, in order, when a user reference arrives as an object.
const USER_LABEL_KEYS: [&str; 4] = ["name", "fullName", "email", "id"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

/// A change request exactly as the backend lists it.
///
/// Each key spelling has its own field: one record may carry several of
/// them (a bill change naming both its bill and its membership), so they
/// are resolved by priority on conversion rather than merged by serde.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequestRecord {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<ApprovalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ApprovalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_data: Option<ChangeSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<ChangeSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<Value>,
}

impl From<ChangeRequestRecord> for ChangeRequest {
    fn from(record: ChangeRequestRecord) -> Self {
        // The most specific record wins: an invoice or bill change may also
        // name the membership it belongs to.
        let subject_id = record
            .invoice_id
            .or(record.billing_id)
            .or(record.membership_id)
            .unwrap_or_else(|| record.id.clone());
        let modified_at = [record.modified_at, record.created_at]
            .into_iter()
            .flatten()
            .find_map(|raw| parse_datetime(&raw).ok());
        let note = [record.note, record.decline_reason]
            .into_iter()
            .flatten()
            .find(|note| !note.trim().is_empty());

        Self {
            id: record.id,
            subject_id,
            approval_status: record
                .approval_status
                .or(record.status)
                .unwrap_or(ApprovalStatus::Pending),
            proposed_patch: record.updated_data.or(record.changes).unwrap_or_default(),
            note,
            modified_by: record.modified_by.as_ref().and_then(user_label),
            modified_at,
            decided_by: record
                .decided_by
                .as_ref()
                .and_then(user_label)
                .or_else(|| record.approved_by.as_ref().and_then(user_label)),
        }
    }
}

fn user_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => USER_LABEL_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(user_label),
        _ => None,
    }
}

/// Error body of a failed call. Only `message` is guaranteed to be
/// human-readable; `error` is a fallback some endpoints use instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Parses an error body, tolerating plain-text and empty responses.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<ErrorBody>(trimmed) {
            Ok(body) => body,
            Err(_) if !trimmed.starts_with('{') && !trimmed.starts_with('[') => Self {
                message: Some(trimmed.to_string()),
                error: None,
            },
            Err(_) => Self::default(),
        }
    }

    /// The human-readable message, if the server sent one.
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|message| !message.trim().is_empty())
    }
}

/// Parses a list response into change requests.
///
/// Accepts a bare array or an object wrapping the array under `data`.
/// Items that cannot be read as change requests are skipped and logged so
/// one bad record does not hide the rest of the queue.
pub fn parse_change_requests(payload: Value) -> Result<Vec<ChangeRequest>, WireError> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(WireError::InvalidPayload(
                    "expected an array of change requests under `data`".to_string(),
                ))
            }
        },
        other => {
            return Err(WireError::InvalidPayload(format!(
                "expected an array of change requests, got {}",
                json_kind(&other)
            )))
        }
    };

    let mut requests = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<ChangeRequestRecord>(item) {
            Ok(record) => requests.push(record.into()),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping unreadable change request");
            }
        }
    }
    Ok(requests)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_membership_record() {
        let requests = parse_change_requests(json!([{
            "id": 42,
            "membershipId": "M-9",
            "approvalStatus": "PENDING",
            "updatedData": { "firmName": "Shree Metals", "email": null },
            "modifiedBy": { "name": "Priya", "id": 3 },
            "modifiedAt": "2024-05-02T09:15:00Z",
        }]))
        .unwrap();

        let request = &requests[0];
        assert_eq!(request.id, RecordId::numeric(42));
        assert_eq!(request.subject_id, RecordId::text("M-9"));
        assert_eq!(request.approval_status, ApprovalStatus::Pending);
        assert!(request.proposed_patch.is_touched("firmName"));
        assert!(!request.proposed_patch.is_touched("email"));
        assert_eq!(request.modified_by.as_deref(), Some("Priya"));
        assert!(request.modified_at.is_some());
    }

    #[test]
    fn reads_invoice_record_with_alternate_keys() {
        let requests = parse_change_requests(json!({
            "data": [{
                "id": "cr-1",
                "invoiceId": 8,
                "status": "DECLINED",
                "changes": { "gstRate": 18 },
                "declineReason": "Rate not applicable",
                "approvedBy": "auditor@assoc.in",
                "modifiedAt": "yesterday",
            }]
        }))
        .unwrap();

        let request = &requests[0];
        assert_eq!(request.subject_id, RecordId::numeric(8));
        assert_eq!(request.approval_status, ApprovalStatus::Declined);
        assert_eq!(request.note.as_deref(), Some("Rate not applicable"));
        assert_eq!(request.decided_by.as_deref(), Some("auditor@assoc.in"));
        assert!(request.modified_at.is_none());
    }

    #[test]
    fn missing_subject_and_status_default_sensibly() {
        let requests = parse_change_requests(json!([{ "id": 3 }])).unwrap();
        assert_eq!(requests[0].subject_id, RecordId::numeric(3));
        assert_eq!(requests[0].approval_status, ApprovalStatus::Pending);
        assert!(requests[0].proposed_patch.is_empty());
    }

    #[test]
    fn unreadable_items_are_skipped() {
        let requests = parse_change_requests(json!([
            { "id": 1 },
            { "noId": true },
            { "id": 2, "approvalStatus": "MAYBE" },
            { "id": 3 },
        ]))
        .unwrap();
        let ids: Vec<String> = requests.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn record_naming_bill_and_membership_is_kept() {
        let requests = parse_change_requests(json!([{
            "id": 42,
            "billingId": 1042,
            "membershipId": "M-9",
            "approvalStatus": "PENDING",
            "updatedData": { "paidAmount": 4500 },
        }]))
        .unwrap();

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].subject_id, RecordId::numeric(1042));
        assert!(requests[0].proposed_patch.is_touched("paidAmount"));
    }

    #[test]
    fn record_with_both_timestamps_prefers_modified_at() {
        let requests = parse_change_requests(json!([{
            "id": 42,
            "createdAt": "2024-05-01T08:00:00Z",
            "modifiedAt": "2024-05-02T09:15:00Z",
            "status": "PENDING",
            "approvalStatus": "APPROVED",
            "approvedBy": "treasurer",
            "decidedBy": { "name": "Secretary" },
        }]))
        .unwrap();

        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(
            request.modified_at,
            Some(parse_datetime("2024-05-02T09:15:00Z").unwrap())
        );
        assert_eq!(request.approval_status, ApprovalStatus::Approved);
        assert_eq!(request.decided_by.as_deref(), Some("Secretary"));
    }

    #[test]
    fn unparseable_modified_at_falls_back_to_created_at() {
        let requests = parse_change_requests(json!([{
            "id": 1,
            "modifiedAt": "yesterday",
            "createdAt": "2024-05-01T08:00:00Z",
            "note": "  ",
            "declineReason": "Duplicate entry",
        }]))
        .unwrap();

        assert_eq!(
            requests[0].modified_at,
            Some(parse_datetime("2024-05-01T08:00:00Z").unwrap())
        );
        assert_eq!(requests[0].note.as_deref(), Some("Duplicate entry"));
    }

    #[test]
    fn non_list_payload_is_rejected() {
        assert!(parse_change_requests(json!("nope")).is_err());
        assert!(parse_change_requests(json!({ "items": [] })).is_err());
        assert!(parse_change_requests(Value::Null).is_err());
    }

    #[test]
    fn error_body_prefers_message() {
        let body = ErrorBody::from_text(r#"{"message":"Bill already settled","error":"Conflict"}"#);
        assert_eq!(body.into_message().as_deref(), Some("Bill already settled"));

        let body = ErrorBody::from_text(r#"{"error":"Forbidden"}"#);
        assert_eq!(body.into_message().as_deref(), Some("Forbidden"));
    }

    #[test]
    fn error_body_tolerates_plain_text_and_empty() {
        assert_eq!(
            ErrorBody::from_text("Gateway timeout").into_message().as_deref(),
            Some("Gateway timeout")
        );
        assert!(ErrorBody::from_text("").into_message().is_none());
        assert!(ErrorBody::from_text("{\"message\": \"  \"}").into_message().is_none());
    }
}
