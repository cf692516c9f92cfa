//! # Validation Module
//!
//! Boundary checks run before any engine touches state.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Desk (console / web front end)                               │
//! │  ├── Raw text → typed request (parse_quantity, parse_amount, ...)      │
//! │  └── Immediate feedback on malformed input                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engines (this crate)                                         │
//! │  ├── THIS MODULE: business rule validation                             │
//! │  └── Ledger invariants (unique codes, non-negative stock)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A non-positive or non-numeric quantity is rejected here, never clamped.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::ProductCode;
use crate::MAX_DESCRIPTION_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product description.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_description;
///
/// assert!(validate_description("Teclado Mecânico RGB").is_ok());
/// assert!(validate_description("   ").is_err());
/// ```
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a movement quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_movement_quantity;
///
/// assert!(validate_movement_quantity(10).is_ok());
/// assert!(validate_movement_quantity(0).is_err());
/// assert!(validate_movement_quantity(-3).is_err());
/// ```
pub fn validate_movement_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level (product quantity on hand).
///
/// ## Rules
/// - Must be non-negative (>= 0); zero means out of stock
pub fn validate_stock_level(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Returns true if `code` is a usable product code.
#[inline]
pub fn is_valid_code(code: ProductCode) -> bool {
    code > 0
}

// =============================================================================
// Parsers (raw text → typed values)
// =============================================================================

/// Parses a whole-number quantity typed by the user.
///
/// ## Example
/// ```rust
/// use tally_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
/// assert!(parse_quantity("abc").is_err());
/// assert!(parse_quantity("").is_err());
/// ```
pub fn parse_quantity(input: &str) -> ValidationResult<i64> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "quantity".to_string(),
        });
    }

    input.parse::<i64>().map_err(|_| ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: "must be a whole number".to_string(),
    })
}

/// Parses a product code typed by the user.
pub fn parse_code(input: &str) -> ValidationResult<ProductCode> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "product".to_string(),
        });
    }

    input
        .parse::<ProductCode>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "product".to_string(),
            reason: "must be a whole number".to_string(),
        })
}

/// Parses a monetary amount, accepting either `.` or `,` as the decimal
/// separator (`"499.99"` or `"499,99"`).
///
/// ## Example
/// ```rust
/// use tally_core::validation::parse_amount;
/// use tally_core::Money;
///
/// assert_eq!(parse_amount("principal", "499,99").unwrap(), Money::from_cents(49999));
/// assert!(parse_amount("principal", "R$ 10").is_err());
/// ```
pub fn parse_amount(field: &str, input: &str) -> ValidationResult<Money> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let normalized = if input.contains('.') {
        input.to_string()
    } else {
        input.replacen(',', ".", 1)
    };

    Decimal::from_str(&normalized)
        .map(Money::new)
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a decimal number".to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
