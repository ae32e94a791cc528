//! # Store State
//!
//! Wraps the `Store` for use in commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub fn list_employees(state: &StoreState) -> Result<Vec<EmployeeProfile>, ApiError> {
//!     let employees = state.inner().employees().list()?;
//!     Ok(employees.iter().map(EmployeeProfile::from).collect())
//! }
//! ```

use washdesk_store::Store;

/// Wrapper around `Store` shared by all commands.
#[derive(Debug)]
pub struct StoreState {
    store: Store,
}

impl StoreState {
    pub fn new(store: Store) -> Self {
        StoreState { store }
    }

    /// Returns a reference to the inner Store.
    pub fn inner(&self) -> &Store {
        &self.store
    }
}
