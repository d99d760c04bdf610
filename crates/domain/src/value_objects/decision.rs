//! Reviewer decisions on change requests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::none_if_blank;
use crate::error::DomainError;

/// Terminal outcome of a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Approved,
    Declined,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approved => f.write_str("APPROVED"),
            Self::Declined => f.write_str("DECLINED"),
        }
    }
}

/// Justification attached to a decline.
///
/// Always trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DeclineNote(String);

impl DeclineNote {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        none_if_blank(raw)
            .map(|note| Self(note.to_string()))
            .ok_or_else(|| DomainError::validation("A reason is required to decline changes"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeclineNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A decision ready to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Decline(DeclineNote),
}

impl Decision {
    pub fn verdict(&self) -> Verdict {
        match self {
            Self::Approve => Verdict::Approved,
            Self::Decline(_) => Verdict::Declined,
        }
    }

    pub fn note(&self) -> Option<&str> {
        match self {
            Self::Approve => None,
            Self::Decline(note) => Some(note.as_str()),
        }
    }
}
