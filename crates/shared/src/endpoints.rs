//! REST endpoints per review domain.

use serde::{Deserialize, Serialize};
use tradeassoc_domain::{ApprovalStatus, ChangeRequest, ReviewDomain};

use crate::requests::DecisionTarget;

/// Which identifier a domain's decision endpoint expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierField {
    /// The change request's own id, sent as `id`
    RequestId,
    /// The changed membership, sent as `membershipId`
    MembershipId,
    /// The changed bill, sent as `billingId`
    BillingId,
    /// The changed invoice, sent as `invoiceId`
    InvoiceId,
}

impl IdentifierField {
    pub fn target_for(&self, request: &ChangeRequest) -> DecisionTarget {
        match self {
            Self::RequestId => DecisionTarget::Id(request.id.clone()),
            Self::MembershipId => DecisionTarget::MembershipId(request.subject_id.clone()),
            Self::BillingId => DecisionTarget::BillingId(request.subject_id.clone()),
            Self::InvoiceId => DecisionTarget::InvoiceId(request.subject_id.clone()),
        }
    }
}

/// Paths (relative to the API base URL) used by one review domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEndpoints {
    pub list_path: String,
    pub decision_path: String,
    pub identifier: IdentifierField,
}

impl ReviewEndpoints {
    pub fn for_domain(domain: ReviewDomain) -> Self {
        match domain {
            ReviewDomain::Membership => Self {
                list_path: "/membership/pending-changes".to_string(),
                decision_path: "/membership/approve-changes".to_string(),
                identifier: IdentifierField::MembershipId,
            },
            ReviewDomain::Bill => Self {
                list_path: "/billing/pending-changes".to_string(),
                decision_path: "/billing/approve-changes".to_string(),
                identifier: IdentifierField::RequestId,
            },
            ReviewDomain::Invoice => Self {
                list_path: "/invoice/change-requests".to_string(),
                decision_path: "/invoice/change-requests/decision".to_string(),
                identifier: IdentifierField::RequestId,
            },
        }
    }

    /// List path with an optional `status` filter appended.
    pub fn list_path_with_filter(&self, filter: Option<ApprovalStatus>) -> String {
        match filter {
            None => self.list_path.clone(),
            Some(status) => {
                let separator = if self.list_path.contains('?') { '&' } else { '?' };
                format!("{}{}status={}", self.list_path, separator, status)
            }
        }
    }
}
