//! # tally-core: Pure Business Rules for the Tally Back Office
//!
//! This crate is the **heart** of the back office. It contains the three
//! calculators as pure functions and plain data, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              tally-desk (orchestration, console)                │   │
//! │  │   config ── seed data ── session state ── commands ── display   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌────────────┐  ┌────────────┐               │   │
//! │  │   │ commission │  │   stock    │  │  interest  │               │   │
//! │  │   │  tiers     │  │  ledger    │  │  fine +    │               │   │
//! │  │   │  totals    │  │  movements │  │  daily     │               │   │
//! │  │   │  report    │  │  edit/del  │  │  interest  │               │   │
//! │  │   └────────────┘  └────────────┘  └────────────┘               │   │
//! │  │   money · types · validation · error · feedback                │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • NO PANICS ON USER INPUT            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`commission`] - Tiered commission per sale, totals per seller, report
//! - [`stock`] - The stock ledger: movements, edits, deletions
//! - [`interest`] - Overdue fine and interest
//! - [`money`] - Exact decimal `Money`
//! - [`types`] - Domain types (Sale, Product, Rate, MovementKind)
//! - [`validation`] - Boundary validation and input parsing
//! - [`error`] - Domain error types
//! - [`feedback`] - User-facing messages with severity
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::stock::{MovementRequest, StockLedger};
//! use tally_core::{MovementKind, Product};
//!
//! let mut ledger = StockLedger::new(vec![Product::new(1001, "Notebook", 45)]).unwrap();
//!
//! let result = ledger
//!     .apply_movement(&MovementRequest::new(1001, MovementKind::Inflow, 10))
//!     .unwrap();
//!
//! assert_eq!(result.movement_id, 1);
//! assert_eq!(result.new_quantity, 55);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod commission;
pub mod error;
pub mod feedback;
pub mod interest;
pub mod money;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use commission::{aggregate_commissions, calculate_commission, CommissionReport, CommissionTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use feedback::{Feedback, Severity};
pub use interest::{compute_interest, InterestPolicy, InterestResult};
pub use money::Money;
pub use stock::{MovementRequest, MovementResult, ProductEdit, StockLedger};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// How long a feedback message stays on screen unless configured otherwise.
pub const DEFAULT_FEEDBACK_DISPLAY_MS: u64 = 5000;

/// Maximum length of a product description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 200;
