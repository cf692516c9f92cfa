//! # Domain Types
//!
//! Core domain types shared by the three engines.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Sale       │   │    Product      │   │  MovementKind   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  seller         │   │  code (> 0)     │   │  Inflow         │       │
//! │  │  amount (Money) │   │  description    │   │  Outflow        │       │
//! │  └─────────────────┘   │  quantity (>=0) │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐                                                    │
//! │  │      Rate       │   commission tiers, fine, daily interest           │
//! │  │  fraction (Dec) │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Portuguese seed files load too: the serde aliases accept `vendedor`/`valor` and
//! `codigoProduto`/`descricaoProduto`/`estoque`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

/// Business identifier of a product. Valid codes are positive.
pub type ProductCode = i64;

// =============================================================================
// Rate
// =============================================================================

/// A proportional rate stored as an exact decimal fraction.
///
/// ## Why a fraction?
/// Basis points cover the fixed tiers (1%, 5%, 2%), but the daily interest
/// rate is 1% / 30, which has no finite basis-point form. Keeping the raw
/// fraction lets `Rate::per_period` stay exact to 28 digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rate(Decimal);

impl Rate {
    /// Creates a rate from basis points (100 bps = 1%).
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        Rate(Decimal::new(i64::from(bps), 4))
    }

    /// Creates a rate from a raw fraction (0.05 = 5%).
    #[inline]
    pub const fn from_fraction(fraction: Decimal) -> Self {
        Rate(fraction)
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn fraction(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    /// Splits the rate evenly over `periods` (e.g., monthly → daily).
    ///
    /// `periods` of zero yields a zero rate.
    pub fn per_period(&self, periods: u32) -> Rate {
        if periods == 0 {
            return Rate::zero();
        }
        Rate(self.0 / Decimal::from(periods))
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(Decimal::ZERO)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One closed sale attributed to a salesperson.
///
/// Immutable input to the commission engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    #[serde(alias = "vendedor")]
    pub seller: String,

    #[serde(alias = "valor")]
    #[ts(as = "String")]
    pub amount: Money,
}

impl Sale {
    pub fn new(seller: impl Into<String>, amount: Money) -> Self {
        Sale {
            seller: seller.into(),
            amount,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product held in the stock ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique, positive business code.
    #[serde(alias = "codigoProduto")]
    pub code: ProductCode,

    /// Display name.
    #[serde(alias = "descricaoProduto")]
    pub description: String,

    /// Units on hand. Never negative.
    #[serde(alias = "estoque")]
    pub quantity: i64,
}

impl Product {
    pub fn new(code: ProductCode, description: impl Into<String>, quantity: i64) -> Self {
        Product {
            code,
            description: description.into(),
            quantity,
        }
    }

    /// Checks if an outflow of `quantity` units can be served.
    #[inline]
    pub fn can_ship(&self, quantity: i64) -> bool {
        self.quantity >= quantity
    }
}

// =============================================================================
// Movement Kind
// =============================================================================

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MovementKind {
    /// Goods received: quantity goes up.
    #[serde(alias = "entrada")]
    Inflow,
    /// Goods shipped: quantity goes down, never below zero.
    #[serde(alias = "saida")]
    Outflow,
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementKind::Inflow => write!(f, "INFLOW"),
            MovementKind::Outflow => write!(f, "OUTFLOW"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
