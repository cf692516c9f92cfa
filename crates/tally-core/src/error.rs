//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Malformed input caught at the boundary         │
//! │                                                                         │
//! │  tally-desk errors (app crate)                                         │
//! │  └── AppError         - What the presentation layer sees (serialized)  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → Feedback               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product code, field, etc.)
//! 3. Every variant is recoverable and user-correctable
//! 4. A failing ledger operation leaves the ledger untouched

use thiserror::Error;

use crate::types::ProductCode;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule errors raised by the three engines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Malformed quantity, missing product selection, bad description, ...
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No product in the ledger carries this code.
    #[error("Product with code {code} not found")]
    NotFound { code: ProductCode },

    /// An outflow asked for more units than the product holds.
    ///
    /// ## User Workflow
    /// ```text
    /// Outflow (qty: 50) on product 1001
    ///      │
    ///      ▼
    /// Check stock: available=45
    ///      │
    ///      ▼
    /// InsufficientStock { code: 1001, available: 45, requested: 50 }
    ///      │
    ///      ▼
    /// UI shows: "only 45 units left", ledger unchanged
    /// ```
    #[error("Insufficient stock for product {code}: available {available}, requested {requested}")]
    InsufficientStock {
        code: ProductCode,
        available: i64,
        requested: i64,
    },

    /// An edit tried to move a product onto a code owned by another product.
    #[error("Code {code} is already used by another product (\"{existing_description}\")")]
    DuplicateCode {
        code: ProductCode,
        existing_description: String,
    },

    /// Product codes must be positive integers.
    #[error("Product code must be positive, got {code}")]
    InvalidCode { code: ProductCode },

    /// Bad principal or dates handed to the interest calculator, or amounts
    /// too large to total.
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// They are raised before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric quantity).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            code: 1001,
            available: 45,
            requested: 50,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 1001: available 45, requested 50"
        );

        let err = CoreError::DuplicateCode {
            code: 1002,
            existing_description: "Monitor".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Code 1002 is already used by another product (\"Monitor\")"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "product".to_string(),
        };
        assert_eq!(err.to_string(), "product is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "product".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
