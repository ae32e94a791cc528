//! # Repository Module
//!
//! File-backed repositories for every persisted shape.
//!
//! ## Three Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    What lives under the data root                       │
//! │                                                                         │
//! │  Collection<T>   one file per record     employees/emp_1.json          │
//! │  ├── list()          every *.json in the directory                     │
//! │  ├── get_by_id(id)   <id>.json fast path, then scan                    │
//! │  ├── save(record)    upsert <id>.json (atomic)                         │
//! │  └── delete(id)      NotFound when absent                              │
//! │                                                                         │
//! │  Ledger<E>       one file per owner      client-transactions/agg_1.json│
//! │  ├── load(owner)     missing file → []                                 │
//! │  ├── append(owner, entry)                                              │
//! │  └── remove(owner, entry_id)                                           │
//! │                                                                         │
//! │  Singleton<T>    one fixed file          inventory.json                │
//! │  ├── load()          missing file → T::default()                       │
//! │  └── save(value)                                                       │
//! │                                                                         │
//! │  Each repository has its own RwLock: readers share, writers exclude.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`Collection`] - Per-record files for the six record types
//! - [`Ledger`] - Employee and client transaction logs
//! - [`Singleton`] - Inventory and retail price config

pub mod collection;
pub mod ledger;
pub mod singleton;

pub use collection::Collection;
pub use ledger::Ledger;
pub use singleton::Singleton;

use serde::de::DeserializeOwned;
use serde::Serialize;
use washdesk_core::{
    Aggregator, ClientTransaction, CounterAgent, Employee, EmployeeTransaction, Expense,
    SalaryScheme, WashEvent,
};

// =============================================================================
// Record Trait
// =============================================================================

/// A record type stored one file per id.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Name used in NotFound errors and logs.
    const ENTITY: &'static str;

    /// Directory under the data root.
    const DIR: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Orders a full listing. Most types keep directory order.
    fn sort_listing(_records: &mut [Self]) {}
}

macro_rules! impl_record {
    ($ty:ty, $entity:literal, $dir:literal) => {
        impl Record for $ty {
            const ENTITY: &'static str = $entity;
            const DIR: &'static str = $dir;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        }
    };
    ($ty:ty, $entity:literal, $dir:literal, newest_first_by = $field:ident) => {
        impl Record for $ty {
            const ENTITY: &'static str = $entity;
            const DIR: &'static str = $dir;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn sort_listing(records: &mut [Self]) {
                records.sort_by(|a, b| b.$field.cmp(&a.$field));
            }
        }
    };
}

impl_record!(Employee, "Employee", "employees");
impl_record!(CounterAgent, "Counter agent", "counter-agents");
impl_record!(Aggregator, "Aggregator", "aggregators");
impl_record!(SalaryScheme, "Salary scheme", "salary-schemes");
impl_record!(WashEvent, "Wash event", "wash-events", newest_first_by = timestamp);
impl_record!(Expense, "Expense", "expenses", newest_first_by = date);

// =============================================================================
// Ledger Entry Trait
// =============================================================================

/// A transaction kept in a per-owner ledger file.
pub trait LedgerEntry: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const ENTITY: &'static str;
    const DIR: &'static str;

    fn id(&self) -> &str;
}

impl LedgerEntry for EmployeeTransaction {
    const ENTITY: &'static str = "Employee transaction";
    const DIR: &'static str = "employee-transactions";

    fn id(&self) -> &str {
        &self.id
    }
}

impl LedgerEntry for ClientTransaction {
    const ENTITY: &'static str = "Client transaction";
    const DIR: &'static str = "client-transactions";

    fn id(&self) -> &str {
        &self.id
    }
}
