//! # washdesk-store: File Storage Layer for Washdesk
//!
//! Every record lives in its own pretty-printed JSON file under one data
//! root, with a read-through cache in front.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Washdesk Data Flow                               │
//! │                                                                         │
//! │  backoffice command (create_wash_event)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   washdesk-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │  Repositories │    │    Cache     │  │   │
//! │  │   │  (store.rs)   │    │ Collection<T> │    │  Snapshot    │  │   │
//! │  │   │               │◄───│ Ledger<E>     │    │  LedgerCache │  │   │
//! │  │   │ cached access │    │ Singleton<T>  │    │  generations │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   <data root>/employees/emp_….json   inventory.json  ...        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `Store` handle and its cached accessors
//! - [`repository`] - Collection, ledger and singleton repositories
//! - [`cache`] - Snapshots with stale-load protection
//! - [`files`] - JSON read / atomic write / directory listing
//! - [`config`] - Data root resolution
//! - [`ids`] - Record id generation
//! - [`error`] - Store error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cache;
pub mod config;
pub mod error;
pub mod files;
pub mod ids;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use store::{CachedCollection, CachedLedger, CachedSingleton, Store};
