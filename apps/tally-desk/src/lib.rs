//! # Tally Desk Library
//!
//! Orchestration layer for the Tally back office: loads configuration and
//! seed data, owns the session state, and routes commands from a front end
//! into `tally-core`.
//!
//! ## Module Organization
//! ```text
//! tally_desk/
//! ├── lib.rs          ◄─── You are here (Desk setup & run)
//! ├── console.rs      ◄─── Line-oriented front end
//! ├── seed.rs         ◄─── Seed file / demo data
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Configuration and display formatting
//! │   ├── sales.rs    ◄─── Recorded sales
//! │   └── stock.rs    ◄─── Ledger + target + pending deletion
//! ├── commands/
//! │   ├── mod.rs         ◄─── Command exports
//! │   ├── commission.rs  ◄─── Commission report
//! │   ├── stock.rs       ◄─── Stock commands
//! │   ├── interest.rs    ◄─── Interest calculator
//! │   └── export.rs      ◄─── Export hooks
//! └── error.rs        ◄─── Error type for commands
//! ```

pub mod commands;
pub mod console;
pub mod error;
pub mod seed;
pub mod state;

use std::io;

use tally_core::StockLedger;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::AppError;
use seed::SeedData;
use state::{DeskConfig, SalesState, StockState};

/// Everything a front end needs to run commands.
#[derive(Debug, Clone)]
pub struct Desk {
    pub config: DeskConfig,
    pub sales: SalesState,
    pub stock: StockState,
}

impl Desk {
    /// Builds the desk from configuration and seed data.
    ///
    /// ## Errors
    /// Seed products that break a ledger invariant (non-positive or
    /// duplicate code, negative quantity, empty description), and seed
    /// sales whose commission total overflows.
    pub fn new(config: DeskConfig, seed: SeedData) -> Result<Self, AppError> {
        let ledger = StockLedger::new(seed.products)?;
        info!(
            sales = seed.sales.len(),
            products = ledger.len(),
            currency = config.currency.code(),
            "desk initialized"
        );

        Ok(Desk {
            config,
            sales: SalesState::new(seed.sales)?,
            stock: StockState::new(ledger),
        })
    }

    /// Loads configuration from the environment and the configured seed.
    pub fn from_env() -> Result<Self, AppError> {
        let config = DeskConfig::from_env();
        let seed = SeedData::load_or_demo(config.seed_path.as_deref())?;
        Desk::new(config, seed)
    }
}

/// Runs the console desk on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Desk Startup                                      │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr            │
/// │     • Default: INFO (DEBUG for tally crates), override with RUST_LOG    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • TALLY_* environment variables over defaults                       │
/// │                                                                         │
/// │  3. Load Seed ────────────────────────────────────────────────────────► │
/// │     • TALLY_SEED_PATH JSON file, or built-in demo data                  │
/// │                                                                         │
/// │  4. Initialize State Objects ─────────────────────────────────────────► │
/// │     • SalesState: sales + commission totals                             │
/// │     • StockState: ledger, target = first product                        │
/// │                                                                         │
/// │  5. Console Loop ─────────────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    info!("Starting Tally desk");

    let desk = Desk::from_env()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    console::run_console(&desk, stdin.lock(), stdout.lock())?;

    info!("Tally desk stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally_core=trace` - Trace the business rules only
/// - Default: INFO, DEBUG for tally crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally_core=debug,tally_desk=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
