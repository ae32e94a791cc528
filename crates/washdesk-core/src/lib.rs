//! # washdesk-core: Pure Business Logic for Washdesk
//!
//! This crate holds the record types and the two pieces of arithmetic the
//! rest of the system must agree on: how much chemical a wash consumes, and
//! how a wash converts into employee earnings. It has zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Washdesk Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Request dispatcher (external collaborator)           │   │
//! │  │        parses bodies into records, serializes responses         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 backoffice commands                             │   │
//! │  │   create_wash_event, add_client_transaction, salary_report ...  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ washdesk-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌─────────────┐  ┌──────────┐  │   │
//! │  │   │   types   │  │   money   │  │ consumption │  │ payroll  │  │   │
//! │  │   │ WashEvent │  │   Money   │  │ grams used  │  │ schemes  │  │   │
//! │  │   │ Employee  │  │ truncation│  │ kg bought   │  │ report   │  │   │
//! │  │   └───────────┘  └───────────┘  └─────────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCK • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 washdesk-store (File Layer)                     │   │
//! │  │          one JSON file per record, read-through cache           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Persisted records (Employee, WashEvent, SalaryScheme, ...)
//! - [`money`] - Integer-cent `Money` used for computed earnings
//! - [`consumption`] - Chemical grams consumed by a wash / bought by an expense
//! - [`payroll`] - Salary scheme evaluation and the salary report
//! - [`validation`] - Record id checks (ids become file names)
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use washdesk_core::money::Money;
//!
//! // Earnings are truncated toward zero, never rounded up
//! let share = Money::truncate_from_major(33.339);
//! assert_eq!(share.cents(), 3333);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod consumption;
pub mod error;
pub mod money;
pub mod payroll;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Expense category that marks a chemical purchase.
///
/// The business records categories in Russian; this is the label the
/// expense form writes. [`CHEMICAL_PURCHASE_CATEGORY_ALIASES`] lists the
/// other spellings accepted.
pub const CHEMICAL_PURCHASE_CATEGORY: &str = "Закупка химии";

/// Additional category labels treated as chemical purchases.
pub const CHEMICAL_PURCHASE_CATEGORY_ALIASES: &[&str] = &["chemical purchase"];

/// Unit prefixes (compared lowercase) meaning "kilograms".
pub const KILOGRAM_UNIT_PREFIXES: &[&str] = &["кг", "kg"];

/// Grams per kilogram.
pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;

/// Source id a rate scheme filter uses for retail washes.
pub const RETAIL_SOURCE_ID: &str = "retail";

/// Conventional id prefix of aggregator records.
pub const AGGREGATOR_ID_PREFIX: &str = "agg_";

/// Conventional id prefix of counter-agent records.
pub const COUNTER_AGENT_ID_PREFIX: &str = "agent_";
