//! # Desk Error Type
//!
//! Unified error type for desk commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Desk                               │
//! │                                                                         │
//! │  Console line "out 50"                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Seed file unreadable? ── SeedError ───────────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Rule violated? ───── CoreError::InsufficientStock ── AppError ─►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  AppError → Feedback { severity: danger, message, display_ms }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors are serializable with a machine-readable `code` and a
//! human-readable `message`, so a web front end can switch on the code.

use serde::Serialize;
use tally_core::{CoreError, Feedback, ValidationError};
use thiserror::Error;
use ts_rs::TS;

use crate::seed::SeedError;

/// Error returned from desk commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for product 1001: available 45, requested 50"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error, TS)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
#[ts(export)]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Unknown product code
    NotFound,

    /// Malformed quantity, missing selection, bad description
    ValidationError,

    /// Outflow larger than the quantity on hand
    InsufficientStock,

    /// Edit collides with another product's code
    DuplicateCode,

    /// Non-positive product code
    InvalidCode,

    /// Bad principal or dates for the interest calculator
    InvalidInput,

    /// Seed file or configuration could not be loaded
    Config,

    /// Unrecognised console command
    UnknownCommand,
}

impl AppError {
    /// Creates a new desk error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unknown-command error.
    pub fn unknown_command(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::UnknownCommand, message)
    }

    /// Danger feedback for this error.
    pub fn feedback(&self, display_ms: u64) -> Feedback {
        Feedback::danger(format!("Error: {}", self.message)).with_display_ms(display_ms)
    }
}

/// Converts core errors to desk errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::Validation(_) => ErrorCode::ValidationError,
            CoreError::NotFound { .. } => ErrorCode::NotFound,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::DuplicateCode { .. } => ErrorCode::DuplicateCode,
            CoreError::InvalidCode { .. } => ErrorCode::InvalidCode,
            CoreError::InvalidInput { .. } => ErrorCode::InvalidInput,
        };

        let message = match err {
            CoreError::Validation(inner) => inner.to_string(),
            other => other.to_string(),
        };

        AppError::new(code, message)
    }
}

/// Converts boundary parsing errors (quantity, code) to desk errors.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::from(CoreError::from(err))
    }
}

/// Converts seed loading errors to desk errors.
impl From<SeedError> for AppError {
    fn from(err: SeedError) -> Self {
        tracing::error!(error = %err, "seed data could not be loaded");
        AppError::new(ErrorCode::Config, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_codes() {
        let err = AppError::from(CoreError::InsufficientStock {
            code: 1001,
            available: 45,
            requested: 50,
        });
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        let err = AppError::from(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "quantity must be positive");
    }

    #[test]
    fn test_serialization() {
        let err = AppError::from(CoreError::NotFound { code: 7 });
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product with code 7 not found");
    }

    #[test]
    fn test_feedback() {
        let feedback = AppError::validation("product is required").feedback(3000);
        assert!(feedback.is_error());
        assert_eq!(feedback.display_ms, 3000);
        assert_eq!(feedback.message, "Error: product is required");
    }
}
