//! # Ledger Repository
//!
//! Transaction logs stored one file per owner:
//! `<root>/<E::DIR>/<owner id>.json` holding `{"transactions": [...]}`.
//!
//! Append and remove hold the write lock across the read-modify-write, so
//! two concurrent appends to the same ledger cannot drop each other.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;
use washdesk_core::validation::validate_record_id;

use super::LedgerEntry;
use crate::error::{StoreError, StoreResult};
use crate::files::{read_json, record_path, write_json_atomic};

/// On-disk shape of a ledger file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "E: serde::de::DeserializeOwned"))]
struct LedgerFile<E> {
    #[serde(default)]
    transactions: Vec<E>,
}

/// Repository for one kind of ledger.
#[derive(Debug)]
pub struct Ledger<E> {
    dir: PathBuf,
    lock: RwLock<()>,
    _entry: PhantomData<fn() -> E>,
}

impl<E: LedgerEntry> Ledger<E> {
    pub fn new(root: &Path) -> Self {
        Ledger {
            dir: root.join(E::DIR),
            lock: RwLock::new(()),
            _entry: PhantomData,
        }
    }

    /// The owner's entries in insertion order. Missing file → empty.
    pub fn load(&self, owner_id: &str) -> StoreResult<Vec<E>> {
        validate_record_id("ownerId", owner_id)?;
        let _guard = self.lock.read();
        self.read(owner_id)
    }

    /// Appends one entry to the owner's ledger.
    pub fn append(&self, owner_id: &str, entry: E) -> StoreResult<()> {
        validate_record_id("ownerId", owner_id)?;
        let _guard = self.lock.write();

        let mut entries = self.read(owner_id)?;
        debug!(entity = E::ENTITY, owner = %owner_id, id = %entry.id(), "Appending ledger entry");
        entries.push(entry);
        self.write(owner_id, entries)
    }

    /// Removes the entry with `entry_id` and returns it.
    ///
    /// ## Returns
    /// * `Err(StoreError::NotFound)` - The owner's ledger has no such entry
    pub fn remove(&self, owner_id: &str, entry_id: &str) -> StoreResult<E> {
        validate_record_id("ownerId", owner_id)?;
        let _guard = self.lock.write();

        let mut entries = self.read(owner_id)?;
        let Some(pos) = entries.iter().position(|e| e.id() == entry_id) else {
            return Err(StoreError::not_found(E::ENTITY, entry_id));
        };
        let removed = entries.remove(pos);

        debug!(entity = E::ENTITY, owner = %owner_id, id = %entry_id, "Removing ledger entry");
        self.write(owner_id, entries)?;
        Ok(removed)
    }

    fn read(&self, owner_id: &str) -> StoreResult<Vec<E>> {
        let file: Option<LedgerFile<E>> = read_json(&record_path(&self.dir, owner_id))?;
        Ok(file.map(|f| f.transactions).unwrap_or_default())
    }

    fn write(&self, owner_id: &str, transactions: Vec<E>) -> StoreResult<()> {
        write_json_atomic(
            &record_path(&self.dir, owner_id),
            &LedgerFile { transactions },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use washdesk_core::ClientTransaction;

    fn payment(id: &str, amount: f64) -> ClientTransaction {
        ClientTransaction {
            id: id.to_string(),
            client_id: "agg_1".to_string(),
            amount,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_ledger_is_empty() {
        let root = TempDir::new().unwrap();
        let ledger: Ledger<ClientTransaction> = Ledger::new(root.path());
        assert!(ledger.load("agg_1").unwrap().is_empty());
    }

    #[test]
    fn test_append_keeps_order() {
        let root = TempDir::new().unwrap();
        let ledger: Ledger<ClientTransaction> = Ledger::new(root.path());

        ledger.append("agg_1", payment("ctrans_1", 100.0)).unwrap();
        ledger.append("agg_1", payment("ctrans_2", -30.0)).unwrap();

        let ids: Vec<_> = ledger
            .load("agg_1")
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["ctrans_1", "ctrans_2"]);
    }

    #[test]
    fn test_file_shape_has_transactions_key() {
        let root = TempDir::new().unwrap();
        let ledger: Ledger<ClientTransaction> = Ledger::new(root.path());
        ledger.append("agg_1", payment("ctrans_1", 100.0)).unwrap();

        let raw = std::fs::read_to_string(root.path().join("client-transactions/agg_1.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["transactions"][0]["id"], "ctrans_1");
        assert_eq!(value["transactions"][0]["type"], "payment");
    }

    #[test]
    fn test_remove_returns_entry() {
        let root = TempDir::new().unwrap();
        let ledger: Ledger<ClientTransaction> = Ledger::new(root.path());
        ledger.append("agg_1", payment("ctrans_1", 100.0)).unwrap();
        ledger.append("agg_1", payment("ctrans_2", 50.0)).unwrap();

        let removed = ledger.remove("agg_1", "ctrans_1").unwrap();
        assert_eq!(removed.amount, 100.0);
        assert_eq!(ledger.load("agg_1").unwrap().len(), 1);
    }

    #[test]
    fn test_remove_absent_is_not_found() {
        let root = TempDir::new().unwrap();
        let ledger: Ledger<ClientTransaction> = Ledger::new(root.path());
        assert!(ledger.remove("agg_1", "ctrans_x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_ledgers_are_per_owner() {
        let root = TempDir::new().unwrap();
        let ledger: Ledger<ClientTransaction> = Ledger::new(root.path());
        ledger.append("agg_1", payment("ctrans_1", 100.0)).unwrap();

        assert!(ledger.load("agent_1").unwrap().is_empty());
    }
}
