//! # Salary Scheme Commands
//!
//! CRUD for the rules that turn washes into pay. New schemes get a
//! `scheme_<millis>` id; updates keep the stored id.

use tracing::{debug, info};
use washdesk_core::SalaryScheme;
use washdesk_store::ids;

use crate::error::ApiError;
use crate::state::StoreState;

pub fn list_salary_schemes(state: &StoreState) -> Result<Vec<SalaryScheme>, ApiError> {
    let schemes = state.inner().salary_schemes().list()?;
    debug!(count = schemes.len(), "list_salary_schemes command");
    Ok(schemes.to_vec())
}

pub fn get_salary_scheme(state: &StoreState, id: &str) -> Result<SalaryScheme, ApiError> {
    Ok(state.inner().salary_schemes().get_by_id(id)?)
}

pub fn create_salary_scheme(
    state: &StoreState,
    mut scheme: SalaryScheme,
) -> Result<SalaryScheme, ApiError> {
    if scheme.id.trim().is_empty() {
        scheme.id = ids::generate_scheme_id();
    }
    state.inner().salary_schemes().save(&scheme)?;
    info!(id = %scheme.id, kind = ?scheme.kind, "Salary scheme created");
    Ok(scheme)
}

pub fn update_salary_scheme(
    state: &StoreState,
    id: &str,
    mut scheme: SalaryScheme,
) -> Result<SalaryScheme, ApiError> {
    let schemes = state.inner().salary_schemes();
    let existing = schemes.get_by_id(id)?;
    scheme.id = existing.id;
    schemes.save(&scheme)?;
    info!(id = %scheme.id, "Salary scheme updated");
    Ok(scheme)
}

pub fn delete_salary_scheme(state: &StoreState, id: &str) -> Result<(), ApiError> {
    state.inner().salary_schemes().delete(id)?;
    info!(id = %id, "Salary scheme deleted");
    Ok(())
}
