//! Session adapters.

use std::sync::{PoisonError, RwLock};

use crate::infrastructure::config::ReviewConfig;
use crate::ports::outbound::{AccessToken, ActingUser, SessionPort};

#[derive(Debug, Clone)]
struct Credentials {
    token: AccessToken,
    user: Option<ActingUser>,
}

/// Swappable credential holder shared between the shell and the review
/// services. Signing out makes every subsequent call fail with
/// `AuthRequired` without reaching the network.
#[derive(Debug, Default)]
pub struct CredentialStore {
    inner: RwLock<Option<Credentials>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded from `TRADEASSOC_API_TOKEN` / `TRADEASSOC_USER_ID`.
    pub fn from_config(config: &ReviewConfig) -> Self {
        let store = Self::new();
        if let Some(token) = &config.api_token {
            store.sign_in(
                AccessToken::new(token.clone()),
                config.acting_user.clone().map(ActingUser::new),
            );
        }
        store
    }

    pub fn sign_in(&self, token: AccessToken, user: Option<ActingUser>) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Credentials { token, user });
    }

    pub fn sign_out(&self) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl SessionPort for CredentialStore {
    fn access_token(&self) -> Option<AccessToken> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|c| c.token.clone())
    }

    fn acting_user(&self) -> Option<ActingUser> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|c| c.user.clone())
    }
}
