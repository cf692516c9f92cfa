//! # Desk Commands Module
//!
//! Every operation a front end can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── commission.rs  ◄─── Commission report
//! ├── stock.rs       ◄─── Stock table, target, movements, edit, delete
//! ├── interest.rs    ◄─── Overdue interest calculator
//! └── export.rs      ◄─── Spreadsheet/document export hooks
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Desk Command Flow                                    │
//! │                                                                         │
//! │  Front end (console today, web view tomorrow)                           │
//! │  "out 5 Venda balcão"                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  fn apply_movement(                                                     │
//! │      config: &DeskConfig,    ◄── defaults, currency, feedback ms       │
//! │      stock: &StockState,     ◄── ledger + target under one lock        │
//! │      kind, quantity, description                                        │
//! │  ) -> Result<MovementResponse, AppError>                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Response DTO (serde + ts-rs) carrying a Feedback                       │
//! │  or AppError → danger Feedback                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the state it needs.

pub mod commission;
pub mod export;
pub mod interest;
pub mod stock;

use tally_core::Feedback;

use crate::state::DeskConfig;

/// Applies the configured display duration to a feedback message.
pub(crate) fn timed(config: &DeskConfig, feedback: Feedback) -> Feedback {
    feedback.with_display_ms(config.feedback_display_ms)
}
