//! # Back-Office Commands
//!
//! One free function per operation the request dispatcher exposes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs            ◄─── You are here (exports)
//! ├── employee.rs       ◄─── Employee CRUD, login, employee ledger
//! ├── client.rs         ◄─── Counter agent / aggregator CRUD
//! ├── transaction.rs    ◄─── Client ledger + balance updater
//! ├── wash_event.rs     ◄─── Wash CRUD, drives inventory down/up
//! ├── expense.rs        ◄─── Expense CRUD, chemical purchases drive inventory up
//! ├── inventory.rs      ◄─── Stock read + the single adjustment path
//! ├── price_list.rs     ◄─── Retail price config
//! ├── salary_scheme.rs  ◄─── Salary scheme CRUD
//! └── salary.rs         ◄─── Salary report
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Request dispatcher (parses body into typed record)                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  create_wash_event(&state, event) -> Result<WashEvent, ApiError>        │
//! │         │                                                               │
//! │         ├──► store.wash_events().save(&event)   (invalidates snapshot) │
//! │         │                                                               │
//! │         └──► inventory::adjust_inventory(store, -grams, "...")         │
//! │                                                                         │
//! │  Dispatcher serializes Ok(record) or Err(ApiError { code, message })   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod employee;
pub mod expense;
pub mod inventory;
pub mod price_list;
pub mod salary;
pub mod salary_scheme;
pub mod transaction;
pub mod wash_event;
