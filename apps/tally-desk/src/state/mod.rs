//! # State Module
//!
//! Manages desk state. Separate state types, one per concern, so each
//! command declares exactly what it touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         Desk                                    │   │
//! │  │  config, sales, stock                                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  DeskConfig  │  │  SalesState  │  │   StockState     │              │
//! │  │              │  │              │  │                  │              │
//! │  │  currency    │  │  sales       │  │  Arc<Mutex<      │              │
//! │  │  defaults    │  │  totals      │  │   StockSession   │              │
//! │  │  feedback ms │  │              │  │  >>              │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DeskConfig, SalesState: read-only after initialization              │
//! │  • StockState: ledger + target + pending deletion under one Mutex      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod sales;
mod stock;

pub use config::{Currency, DeskConfig};
pub use sales::SalesState;
pub use stock::{Deletion, PendingDeletion, StockSession, StockState};
