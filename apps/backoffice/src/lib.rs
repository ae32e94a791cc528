//! # Washdesk Back-Office Library
//!
//! The command layer a request dispatcher calls for the wash business:
//! staff, clients, washes, expenses, pay rules, prices and stock.
//!
//! ## Module Organization
//! ```text
//! washdesk_backoffice/
//! ├── lib.rs              ◄─── You are here (tracing + state bootstrap)
//! ├── state/
//! │   ├── mod.rs          ◄─── State type exports
//! │   └── store.rs        ◄─── Store wrapper shared by commands
//! ├── commands/
//! │   ├── mod.rs          ◄─── Command exports
//! │   ├── employee.rs     ◄─── Staff CRUD, login, employee ledger
//! │   ├── client.rs       ◄─── Counter agents, aggregators
//! │   ├── transaction.rs  ◄─── Client ledger + balance updater
//! │   ├── wash_event.rs   ◄─── Washes (stock goes down)
//! │   ├── expense.rs      ◄─── Expenses (chemical purchases: stock goes up)
//! │   ├── inventory.rs    ◄─── Stock read + adjustment
//! │   ├── price_list.rs   ◄─── Retail price config
//! │   ├── salary_scheme.rs◄─── Pay rules
//! │   └── salary.rs       ◄─── Salary report
//! └── error.rs            ◄─── ApiError returned by every command
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()          RUST_LOG or "info,washdesk=debug"          │
//! │  2. StoreConfig::load()     env var → washdesk.toml → platform dir     │
//! │  3. open_state(&config)     creates the data root, empty caches        │
//! │  4. dispatch commands       commands::*::fn(&state, ...)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;
use washdesk_store::{Store, StoreConfig, StoreResult};

use state::StoreState;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info,washdesk=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=washdesk_store=trace` - Trace the store only
/// - Default: `info,washdesk=debug`
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Opens the store under `config` and wraps it for the commands.
pub fn open_state(config: &StoreConfig) -> StoreResult<StoreState> {
    let store = Store::open(config)?;
    info!(root = %store.root().display(), "Back office ready");
    Ok(StoreState::new(store))
}
