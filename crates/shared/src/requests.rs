//! Request bodies sent to the review backend.

use serde::{Deserialize, Serialize};
use tradeassoc_domain::{Decision, RecordId, Verdict};

/// Identifier entry of a decision body; serializes as a single
/// `{"<key>": <id>}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecisionTarget {
    Id(RecordId),
    MembershipId(RecordId),
    BillingId(RecordId),
    InvoiceId(RecordId),
}

/// Body of an approve/decline POST.
///
/// ```json
/// { "membershipId": 42, "action": "DECLINED", "note": "Missing documents" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionBody {
    #[serde(flatten)]
    pub target: DecisionTarget,
    pub action: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DecisionBody {
    pub fn new(target: DecisionTarget, decision: &Decision) -> Self {
        Self {
            target,
            action: decision.verdict(),
            note: decision.note().map(str::to_string),
        }
    }
}
