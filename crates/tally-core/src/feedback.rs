//! # Feedback Messages
//!
//! Plain values describing what the user should be told after an operation.
//!
//! Banners are dismissed after five seconds by default.
//! That timer belongs to the presentation layer; the core only suggests a
//! duration through `display_ms`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::DEFAULT_FEEDBACK_DISPLAY_MS;

/// How a message should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Severity {
    Success,
    Danger,
    Info,
}

/// A user-facing message with a suggested display duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Feedback {
    pub severity: Severity,
    pub message: String,
    /// How long the message should stay visible, in milliseconds.
    pub display_ms: u64,
}

impl Feedback {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Feedback {
            severity,
            message: message.into(),
            display_ms: DEFAULT_FEEDBACK_DISPLAY_MS,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Feedback::new(Severity::Success, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Feedback::new(Severity::Danger, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Feedback::new(Severity::Info, message)
    }

    /// Overrides the suggested display duration.
    pub fn with_display_ms(mut self, display_ms: u64) -> Self {
        self.display_ms = display_ms;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Danger
    }
}

/// Every core error is shown as a danger message.
impl From<&CoreError> for Feedback {
    fn from(err: &CoreError) -> Self {
        Feedback::danger(format!("Error: {}", err))
    }
}
