//! Transient notices for the shell to display and dismiss.

use serde::Serialize;

use crate::application::ReviewError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Whether the shell should offer a retry affordance
    pub retryable: bool,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn error(error: &ReviewError) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: error.user_message(),
            retryable: error.is_retryable(),
        }
    }
}
