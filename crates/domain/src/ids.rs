use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque record identifier issued by the backend.
///
/// Depending on the resource the backend hands out integers or strings.
/// The original JSON form is kept so the identifier can be echoed back
/// exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Numeric(i64),
    Text(String),
}

impl RecordId {
    pub fn numeric(value: i64) -> Self {
        Self::Numeric(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True when `raw` renders to the same text as this id.
    ///
    /// Used to resolve user-typed ids, which carry no type information,
    /// against ids held from the backend.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            Self::Numeric(n) => raw.trim().parse::<i64>().map(|v| v == *n).unwrap_or(false),
            Self::Text(s) => s == raw.trim(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(trimmed
            .parse::<i64>()
            .map(Self::Numeric)
            .unwrap_or_else(|_| Self::Text(trimmed.to_string())))
    }
}
