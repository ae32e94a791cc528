//! # Read-Through Cache
//!
//! Snapshots of whole collections and per-owner ledgers, so list calls do
//! not rescan directories on every request.
//!
//! ## Invalidation and the Stale Load
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every snapshot carries a generation. invalidate() drops the value     │
//! │  and bumps the generation. A load records the generation it started    │
//! │  under and only stores its result if nothing invalidated meanwhile.    │
//! │                                                                         │
//! │  reader                         writer                                 │
//! │  ──────                         ──────                                 │
//! │  ticket = begin_load()  (gen 4)                                        │
//! │  records = repo.list()          repo.save(x)                           │
//! │                                 invalidate()        (gen 5)            │
//! │  set_if_current(ticket, records)                                       │
//! │      └─► gen 4 ≠ 5, discarded                                          │
//! │                                                                         │
//! │  The next get() misses and reloads, so it sees x.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no TTL and no eviction: one snapshot per collection, one entry
//! per ledger owner touched during the process lifetime.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::StoreResult;

/// Generation a load started under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug)]
struct Slot<T> {
    value: Option<Arc<T>>,
    generation: u64,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot {
            value: None,
            generation: 0,
        }
    }
}

impl<T> Slot<T> {
    fn invalidate(&mut self) {
        self.value = None;
        self.generation = self.generation.wrapping_add(1);
    }

    fn store_if(&mut self, ticket: LoadTicket, value: Arc<T>) -> bool {
        if self.generation == ticket.0 {
            self.value = Some(value);
            true
        } else {
            false
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// A cached value plus its loaded flag (`Some` means loaded).
#[derive(Debug)]
pub struct Snapshot<T> {
    slot: Mutex<Slot<T>>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Snapshot {
            slot: Mutex::new(Slot::default()),
        }
    }
}

impl<T> Snapshot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached value, if loaded.
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.lock().value.clone()
    }

    /// Stores a value unconditionally and marks the snapshot loaded.
    #[cfg(test)]
    pub fn set(&self, value: T) {
        self.slot.lock().value = Some(Arc::new(value));
    }

    /// Drops the value; the next read must go back to the store.
    pub fn invalidate(&self) {
        self.slot.lock().invalidate();
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.lock().value.is_some()
    }

    /// Starts a load.
    pub fn begin_load(&self) -> LoadTicket {
        LoadTicket(self.slot.lock().generation)
    }

    /// Stores `value` only if no invalidation happened since `ticket`.
    pub fn set_if_current(&self, ticket: LoadTicket, value: Arc<T>) -> bool {
        self.slot.lock().store_if(ticket, value)
    }

    /// Returns the cached value or loads, caches and returns a fresh one.
    ///
    /// The load runs without holding the snapshot lock.
    pub fn get_or_load(&self, load: impl FnOnce() -> StoreResult<T>) -> StoreResult<Arc<T>> {
        if let Some(hit) = self.get() {
            return Ok(hit);
        }
        let ticket = self.begin_load();
        let value = Arc::new(load()?);
        self.set_if_current(ticket, Arc::clone(&value));
        Ok(value)
    }
}

// =============================================================================
// Ledger Cache
// =============================================================================

/// Cached ledgers keyed by owner id, each with its own presence.
#[derive(Debug)]
pub struct LedgerCache<E> {
    entries: Mutex<HashMap<String, Slot<Vec<E>>>>,
}

impl<E> Default for LedgerCache<E> {
    fn default() -> Self {
        LedgerCache {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<E> LedgerCache<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, owner_id: &str) -> Option<Arc<Vec<E>>> {
        self.entries
            .lock()
            .get(owner_id)
            .and_then(|slot| slot.value.clone())
    }

    /// Drops only this owner's entry.
    pub fn invalidate(&self, owner_id: &str) {
        self.entries
            .lock()
            .entry(owner_id.to_string())
            .or_default()
            .invalidate();
    }

    pub fn begin_load(&self, owner_id: &str) -> LoadTicket {
        let mut entries = self.entries.lock();
        LoadTicket(entries.entry(owner_id.to_string()).or_default().generation)
    }

    pub fn set_if_current(&self, owner_id: &str, ticket: LoadTicket, value: Arc<Vec<E>>) -> bool {
        self.entries
            .lock()
            .entry(owner_id.to_string())
            .or_default()
            .store_if(ticket, value)
    }

    pub fn get_or_load(
        &self,
        owner_id: &str,
        load: impl FnOnce() -> StoreResult<Vec<E>>,
    ) -> StoreResult<Arc<Vec<E>>> {
        if let Some(hit) = self.get(owner_id) {
            return Ok(hit);
        }
        let ticket = self.begin_load(owner_id);
        let value = Arc::new(load()?);
        self.set_if_current(owner_id, ticket, Arc::clone(&value));
        Ok(value)
    }

    /// Number of owners with a loaded ledger.
    #[cfg(test)]
    pub fn loaded_count(&self) -> usize {
        self.entries
            .lock()
            .values()
            .filter(|slot| slot.value.is_some())
            .count()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
