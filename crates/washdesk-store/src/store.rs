//! # Store Handle
//!
//! [`Store`] owns every repository and its cache. Repositories are only
//! reachable through cached accessors, and every mutating call on those
//! invalidates the matching cache entry before returning, whether the
//! write succeeded or not.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              Store                                      │
//! │                                                                         │
//! │  store.employees()  ──► CachedCollection { Collection, Snapshot }      │
//! │       .list()            snapshot hit, or scan + set_if_current        │
//! │       .get_by_id(id)     straight to files                             │
//! │       .save(&emp)        write file, invalidate                        │
//! │       .delete(id)        remove file, invalidate                       │
//! │                                                                         │
//! │  store.client_transactions() ──► CachedLedger { Ledger, LedgerCache }  │
//! │       .load(owner) / .append(owner, tx) / .remove(owner, tx_id)        │
//! │                                                                         │
//! │  store.inventory()  ──► CachedSingleton { Singleton, Snapshot }        │
//! │       .load() / .save(&inv)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use washdesk_store::{Store, StoreConfig};
//!
//! # fn main() -> Result<(), washdesk_store::StoreError> {
//! let store = Store::open(&StoreConfig::new("./data"))?;
//! let employees = store.employees().list()?;
//! println!("{} employees", employees.len());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;
use washdesk_core::{
    Aggregator, ClientTransaction, CounterAgent, Employee, EmployeeTransaction, Expense,
    Inventory, RetailPriceConfig, SalaryScheme, WashEvent,
};

use crate::cache::{LedgerCache, Snapshot};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::repository::singleton::SingletonRecord;
use crate::repository::{Collection, Ledger, LedgerEntry, Record, Singleton};

// =============================================================================
// Cached Accessors
// =============================================================================

/// A collection seen through its snapshot.
pub struct CachedCollection<'a, T> {
    repo: &'a Collection<T>,
    snapshot: &'a Snapshot<Vec<T>>,
}

impl<'a, T: Record> CachedCollection<'a, T> {
    /// All records; served from the snapshot when loaded.
    pub fn list(&self) -> StoreResult<Arc<Vec<T>>> {
        self.snapshot.get_or_load(|| self.repo.list())
    }

    pub fn get_by_id(&self, id: &str) -> StoreResult<T> {
        self.repo.get_by_id(id)
    }

    /// Finds the first record matching `predicate` in the cached listing.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> StoreResult<Option<T>> {
        Ok(self.list()?.iter().find(|r| predicate(r)).cloned())
    }

    pub fn save(&self, record: &T) -> StoreResult<()> {
        let result = self.repo.save(record);
        self.snapshot.invalidate();
        result
    }

    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let result = self.repo.delete(id);
        self.snapshot.invalidate();
        result
    }

    /// Drops the snapshot without writing.
    pub fn invalidate(&self) {
        self.snapshot.invalidate();
    }
}

/// A ledger seen through its per-owner cache.
pub struct CachedLedger<'a, E> {
    repo: &'a Ledger<E>,
    cache: &'a LedgerCache<E>,
}

impl<'a, E: LedgerEntry> CachedLedger<'a, E> {
    pub fn load(&self, owner_id: &str) -> StoreResult<Arc<Vec<E>>> {
        self.cache.get_or_load(owner_id, || self.repo.load(owner_id))
    }

    pub fn append(&self, owner_id: &str, entry: E) -> StoreResult<()> {
        let result = self.repo.append(owner_id, entry);
        self.cache.invalidate(owner_id);
        result
    }

    pub fn remove(&self, owner_id: &str, entry_id: &str) -> StoreResult<E> {
        let result = self.repo.remove(owner_id, entry_id);
        self.cache.invalidate(owner_id);
        result
    }
}

/// A singleton seen through its snapshot.
pub struct CachedSingleton<'a, T> {
    repo: &'a Singleton<T>,
    snapshot: &'a Snapshot<T>,
}

impl<'a, T: SingletonRecord> CachedSingleton<'a, T> {
    pub fn load(&self) -> StoreResult<Arc<T>> {
        self.snapshot.get_or_load(|| self.repo.load())
    }

    pub fn save(&self, value: &T) -> StoreResult<()> {
        let result = self.repo.save(value);
        self.snapshot.invalidate();
        result
    }
}

// =============================================================================
// Store
// =============================================================================

#[derive(Debug, Default)]
struct Caches {
    employees: Snapshot<Vec<Employee>>,
    counter_agents: Snapshot<Vec<CounterAgent>>,
    aggregators: Snapshot<Vec<Aggregator>>,
    wash_events: Snapshot<Vec<WashEvent>>,
    expenses: Snapshot<Vec<Expense>>,
    salary_schemes: Snapshot<Vec<SalaryScheme>>,
    retail_prices: Snapshot<RetailPriceConfig>,
    inventory: Snapshot<Inventory>,
    employee_transactions: LedgerCache<EmployeeTransaction>,
    client_transactions: LedgerCache<ClientTransaction>,
}

/// The data root with every repository and cache.
#[derive(Debug)]
pub struct Store {
    root: PathBuf,
    employees: Collection<Employee>,
    counter_agents: Collection<CounterAgent>,
    aggregators: Collection<Aggregator>,
    wash_events: Collection<WashEvent>,
    expenses: Collection<Expense>,
    salary_schemes: Collection<SalaryScheme>,
    employee_transactions: Ledger<EmployeeTransaction>,
    client_transactions: Ledger<ClientTransaction>,
    retail_prices: Singleton<RetailPriceConfig>,
    inventory: Singleton<Inventory>,
    caches: Caches,
}

impl Store {
    /// Opens the store, creating the data root if it is missing.
    ///
    /// Type directories are created on first write.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let root = config.data_path.clone();
        std::fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;
        info!(path = %root.display(), "Opened data store");

        Ok(Store {
            employees: Collection::new(&root),
            counter_agents: Collection::new(&root),
            aggregators: Collection::new(&root),
            wash_events: Collection::new(&root),
            expenses: Collection::new(&root),
            salary_schemes: Collection::new(&root),
            employee_transactions: Ledger::new(&root),
            client_transactions: Ledger::new(&root),
            retail_prices: Singleton::new(&root),
            inventory: Singleton::new(&root),
            caches: Caches::default(),
            root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn employees(&self) -> CachedCollection<'_, Employee> {
        CachedCollection {
            repo: &self.employees,
            snapshot: &self.caches.employees,
        }
    }

    pub fn counter_agents(&self) -> CachedCollection<'_, CounterAgent> {
        CachedCollection {
            repo: &self.counter_agents,
            snapshot: &self.caches.counter_agents,
        }
    }

    pub fn aggregators(&self) -> CachedCollection<'_, Aggregator> {
        CachedCollection {
            repo: &self.aggregators,
            snapshot: &self.caches.aggregators,
        }
    }

    pub fn wash_events(&self) -> CachedCollection<'_, WashEvent> {
        CachedCollection {
            repo: &self.wash_events,
            snapshot: &self.caches.wash_events,
        }
    }

    pub fn expenses(&self) -> CachedCollection<'_, Expense> {
        CachedCollection {
            repo: &self.expenses,
            snapshot: &self.caches.expenses,
        }
    }

    pub fn salary_schemes(&self) -> CachedCollection<'_, SalaryScheme> {
        CachedCollection {
            repo: &self.salary_schemes,
            snapshot: &self.caches.salary_schemes,
        }
    }

    pub fn employee_transactions(&self) -> CachedLedger<'_, EmployeeTransaction> {
        CachedLedger {
            repo: &self.employee_transactions,
            cache: &self.caches.employee_transactions,
        }
    }

    pub fn client_transactions(&self) -> CachedLedger<'_, ClientTransaction> {
        CachedLedger {
            repo: &self.client_transactions,
            cache: &self.caches.client_transactions,
        }
    }

    pub fn retail_prices(&self) -> CachedSingleton<'_, RetailPriceConfig> {
        CachedSingleton {
            repo: &self.retail_prices,
            snapshot: &self.caches.retail_prices,
        }
    }

    pub fn inventory(&self) -> CachedSingleton<'_, Inventory> {
        CachedSingleton {
            repo: &self.inventory,
            snapshot: &self.caches.inventory,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
