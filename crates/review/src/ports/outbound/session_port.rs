//! Session port - who is reviewing, and with which credential.

use std::fmt;

/// Bearer token presented to the backend.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// The signed-in reviewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActingUser {
    pub id: String,
    pub display_name: Option<String>,
}

impl ActingUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
        }
    }

    /// Label recorded as `decided_by` on requests this user decides.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait SessionPort: Send + Sync {
    /// Current token; `None` when nobody is signed in.
    fn access_token(&self) -> Option<AccessToken>;

    fn acting_user(&self) -> Option<ActingUser>;
}
