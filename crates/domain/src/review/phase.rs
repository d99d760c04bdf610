//! Client-observed review phase of a single change request.

use serde::{Deserialize, Serialize};

use crate::entities::ApprovalStatus;
use crate::error::DomainError;
use crate::value_objects::Verdict;

/// Where a request stands from the reviewer's point of view.
///
/// ```text
/// Pending --begin--> Deciding --succeed--> Decided(verdict)
///                    Deciding --fail-----> Pending
/// ```
///
/// `Decided` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "phase", content = "verdict", rename_all = "snake_case")]
pub enum ReviewPhase {
    #[default]
    Pending,
    Deciding,
    Decided(Verdict),
}

impl ReviewPhase {
    /// Phase of a request as fetched from the backend.
    pub fn from_status(status: ApprovalStatus) -> Self {
        match status {
            ApprovalStatus::Pending => Self::Pending,
            ApprovalStatus::Approved => Self::Decided(Verdict::Approved),
            ApprovalStatus::Declined => Self::Decided(Verdict::Declined),
        }
    }

    /// A decision call is about to go out.
    pub fn begin(self) -> Result<Self, DomainError> {
        match self {
            Self::Pending => Ok(Self::Deciding),
            Self::Deciding => Err(DomainError::invalid_state_transition(
                "a decision is already in flight",
            )),
            Self::Decided(verdict) => Err(DomainError::invalid_state_transition(format!(
                "request is already {}",
                verdict
            ))),
        }
    }

    /// The backend confirmed the decision.
    pub fn succeed(self, verdict: Verdict) -> Result<Self, DomainError> {
        match self {
            Self::Deciding => Ok(Self::Decided(verdict)),
            other => Err(DomainError::invalid_state_transition(format!(
                "cannot confirm a decision from {:?}",
                other
            ))),
        }
    }

    /// The decision call failed; the request is reviewable again.
    pub fn fail(self) -> Result<Self, DomainError> {
        match self {
            Self::Deciding => Ok(Self::Pending),
            other => Err(DomainError::invalid_state_transition(format!(
                "cannot fail a decision from {:?}",
                other
            ))),
        }
    }

    pub fn is_deciding(&self) -> bool {
        matches!(self, Self::Deciding)
    }

    pub fn is_decided(&self) -> bool {
        matches!(self, Self::Decided(_))
    }

    /// Whether approve/decline controls should be enabled.
    pub fn accepts_decision(&self) -> bool {
        matches!(self, Self::Pending)
    }
}
