//! Change request entity - a proposed edit awaiting a reviewer's decision.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ChangeSet;
use crate::error::DomainError;
use crate::ids::RecordId;
use crate::value_objects::{Decision, Verdict};

/// Approval status of a change request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Declined,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Declined => "DECLINED",
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "DECLINED" => Ok(Self::Declined),
            other => Err(DomainError::parse(format!(
                "Unknown approval status: {}",
                other
            ))),
        }
    }
}

impl From<Verdict> for ApprovalStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Approved => Self::Approved,
            Verdict::Declined => Self::Declined,
        }
    }
}

/// A change proposed by one user against a membership, bill, or invoice.
///
/// Requests are created server-side. The client only ever records one
/// terminal decision on them.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRequest {
    pub id: RecordId,
    /// The membership, bill, or invoice being changed
    pub subject_id: RecordId,
    pub approval_status: ApprovalStatus,
    pub proposed_patch: ChangeSet,
    /// Justification; always present once declined
    pub note: Option<String>,
    pub modified_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
    pub decided_by: Option<String>,
}

impl ChangeRequest {
    pub fn new(id: RecordId, subject_id: RecordId, proposed_patch: ChangeSet) -> Self {
        Self {
            id,
            subject_id,
            approval_status: ApprovalStatus::Pending,
            proposed_patch,
            note: None,
            modified_by: None,
            modified_at: None,
            decided_by: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.approval_status == ApprovalStatus::Pending
    }

    /// Records a confirmed decision.
    ///
    /// Only `PENDING` requests may be decided; a decided request never
    /// changes again.
    pub fn record_decision(
        &mut self,
        decision: &Decision,
        decided_by: Option<String>,
    ) -> Result<(), DomainError> {
        if !self.is_pending() {
            return Err(DomainError::invalid_state_transition(format!(
                "change request {} is already {}",
                self.id, self.approval_status
            )));
        }

        self.approval_status = decision.verdict().into();
        if let Some(note) = decision.note() {
            self.note = Some(note.to_string());
        }
        self.decided_by = decided_by;
        Ok(())
    }
}
