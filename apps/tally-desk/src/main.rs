//! # Tally Desk Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Desk                                       │
//! │                                                                         │
//! │  stdin ──► console.rs ──► commands/ ──► tally-core ──► stdout           │
//! │                               │                                         │
//! │                            state/  (config, sales, stock session)       │
//! │                                                                         │
//! │  logs ──► stderr                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // Setup lives in lib.rs for testability
    match tally_desk::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tally-desk: {}", err);
            ExitCode::FAILURE
        }
    }
}
