//! # State Module
//!
//! Process-wide state handed to every command.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  main / request dispatcher                                              │
//! │     let state = StoreState::new(Store::open(&config)?);                │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │   StoreState                                                     │  │
//! │  │     Store ── repositories (one RwLock per type / ledger)         │  │
//! │  │           └─ caches (snapshots + per-owner ledger entries)       │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Store is Send + Sync; commands borrow it immutably                  │
//! │  • Multi-step commands (wash + inventory) are NOT atomic               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod store;

pub use store::StoreState;
