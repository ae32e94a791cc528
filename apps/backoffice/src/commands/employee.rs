//! # Employee Commands
//!
//! Staff records, credential check, and the per-employee money ledger.
//!
//! Passwords are stored on the record but never leave this module: every
//! command returns an [`EmployeeProfile`].
//!
//! ## Update Merge
//! ```text
//! ┌──────────────────────┬───────────────────────────────────────────────┐
//! │ field                │ on update_employee                            │
//! ├──────────────────────┼───────────────────────────────────────────────┤
//! │ fullName, phone,     │ replaced                                      │
//! │ paymentDetails,      │                                               │
//! │ hasCar, salaryScheme │                                               │
//! │ username, password   │ replaced only when the incoming value is set   │
//! │ id                   │ kept                                          │
//! └──────────────────────┴───────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{debug, info, warn};
use washdesk_core::{
    non_empty, CoreError, Employee, EmployeeProfile, EmployeeTransaction, ValidationError,
};
use washdesk_store::ids::{self, id_or_generate};

use crate::error::ApiError;
use crate::state::StoreState;

// =============================================================================
// Employees
// =============================================================================

pub fn list_employees(state: &StoreState) -> Result<Vec<EmployeeProfile>, ApiError> {
    let employees = state.inner().employees().list()?;
    debug!(count = employees.len(), "list_employees command");
    Ok(employees.iter().map(EmployeeProfile::from).collect())
}

pub fn get_employee(state: &StoreState, id: &str) -> Result<EmployeeProfile, ApiError> {
    let employee = state.inner().employees().get_by_id(id)?;
    Ok(EmployeeProfile::from(employee))
}

pub fn create_employee(
    state: &StoreState,
    mut employee: Employee,
) -> Result<EmployeeProfile, ApiError> {
    employee.id = id_or_generate(&employee.id, ids::EMPLOYEE_PREFIX);
    state.inner().employees().save(&employee)?;
    info!(id = %employee.id, name = %employee.full_name, "Employee created");
    Ok(EmployeeProfile::from(employee))
}

/// Applies `update` onto the stored employee; see the merge table above.
pub fn update_employee(
    state: &StoreState,
    id: &str,
    update: Employee,
) -> Result<EmployeeProfile, ApiError> {
    let employees = state.inner().employees();
    let mut employee = employees.get_by_id(id)?;

    employee.full_name = update.full_name;
    employee.phone = update.phone;
    employee.payment_details = update.payment_details;
    employee.has_car = update.has_car;
    employee.salary_scheme_id = update.salary_scheme_id;
    if let Some(username) = non_empty(update.username.as_deref()) {
        employee.username = Some(username.to_string());
    }
    if let Some(password) = non_empty(update.password.as_deref()) {
        employee.password = Some(password.to_string());
    }

    employees.save(&employee)?;
    info!(id = %employee.id, "Employee updated");
    Ok(EmployeeProfile::from(employee))
}

pub fn delete_employee(state: &StoreState, id: &str) -> Result<(), ApiError> {
    state.inner().employees().delete(id)?;
    info!(id = %id, "Employee deleted");
    Ok(())
}

/// Checks a username/password pair against the employee records.
///
/// ## Returns
/// * `Ok(profile)` - exact match on both fields
/// * `BAD_INPUT` - either field blank
/// * `UNAUTHORIZED` - no employee matches
pub fn login(
    state: &StoreState,
    username: &str,
    password: &str,
) -> Result<EmployeeProfile, ApiError> {
    if username.trim().is_empty() {
        return Err(CoreError::from(ValidationError::Required {
            field: "username".into(),
        })
        .into());
    }
    if password.is_empty() {
        return Err(CoreError::from(ValidationError::Required {
            field: "password".into(),
        })
        .into());
    }

    let found = state
        .inner()
        .employees()
        .find(|e| e.credentials_match(username, password))?;

    match found {
        Some(employee) => {
            info!(id = %employee.id, "Employee logged in");
            Ok(EmployeeProfile::from(employee))
        }
        None => {
            warn!(username = %username, "Login rejected");
            Err(CoreError::Unauthorized.into())
        }
    }
}

// =============================================================================
// Employee Ledger
// =============================================================================

/// Payments, loans, bonuses and purchases for one employee, oldest first.
pub fn list_employee_transactions(
    state: &StoreState,
    employee_id: &str,
) -> Result<Vec<EmployeeTransaction>, ApiError> {
    let transactions = state.inner().employee_transactions().load(employee_id)?;
    Ok(transactions.to_vec())
}

/// Appends to an employee's ledger. The owner id is taken from the path,
/// not the body; a blank id or date is filled in.
pub fn add_employee_transaction(
    state: &StoreState,
    employee_id: &str,
    mut transaction: EmployeeTransaction,
) -> Result<EmployeeTransaction, ApiError> {
    transaction.id = id_or_generate(&transaction.id, ids::EMPLOYEE_TRANSACTION_PREFIX);
    transaction.employee_id = employee_id.to_string();
    if transaction.date.is_empty() {
        transaction.date = Utc::now().to_rfc3339();
    }

    state
        .inner()
        .employee_transactions()
        .append(employee_id, transaction.clone())?;
    info!(
        id = %transaction.id,
        employee_id = %employee_id,
        kind = ?transaction.kind,
        amount = transaction.amount,
        "Employee transaction added"
    );
    Ok(transaction)
}

pub fn delete_employee_transaction(
    state: &StoreState,
    employee_id: &str,
    transaction_id: &str,
) -> Result<(), ApiError> {
    let removed = state
        .inner()
        .employee_transactions()
        .remove(employee_id, transaction_id)?;
    info!(id = %removed.id, employee_id = %employee_id, "Employee transaction deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::open_state;
    use crate::error::ErrorCode;
    use washdesk_core::EmployeeTransactionKind;

    fn employee(name: &str) -> Employee {
        Employee {
            full_name: name.into(),
            phone: "+79000000000".into(),
            username: Some("ivan".into()),
            password: Some("secret".into()),
            salary_scheme_id: Some("scheme_1".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_generates_id_and_hides_password() {
        let (_dir, state) = open_state();

        let profile = create_employee(&state, employee("Ivan")).unwrap();

        assert!(profile.id.starts_with("emp_"));
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(get_employee(&state, &profile.id).unwrap(), profile);
    }

    #[test]
    fn test_update_keeps_credentials_when_blank() {
        let (_dir, state) = open_state();
        let created = create_employee(&state, employee("Ivan")).unwrap();

        let update = Employee {
            full_name: "Ivan Petrov".into(),
            has_car: true,
            username: Some(String::new()),
            password: None,
            ..Default::default()
        };
        let updated = update_employee(&state, &created.id, update).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.full_name, "Ivan Petrov");
        assert!(updated.has_car);
        assert_eq!(updated.username.as_deref(), Some("ivan"));
        assert_eq!(updated.salary_scheme_id, None);
        assert!(login(&state, "ivan", "secret").is_ok());
    }

    #[test]
    fn test_update_replaces_password_when_given() {
        let (_dir, state) = open_state();
        let created = create_employee(&state, employee("Ivan")).unwrap();

        let update = Employee {
            full_name: "Ivan".into(),
            password: Some("changed".into()),
            ..Default::default()
        };
        update_employee(&state, &created.id, update).unwrap();

        assert_eq!(
            login(&state, "ivan", "secret").unwrap_err().code,
            ErrorCode::Unauthorized
        );
        assert!(login(&state, "ivan", "changed").is_ok());
    }

    #[test]
    fn test_update_and_delete_missing_are_not_found() {
        let (_dir, state) = open_state();
        assert_eq!(
            update_employee(&state, "emp_404", employee("X"))
                .unwrap_err()
                .code,
            ErrorCode::NotFound
        );
        assert_eq!(
            delete_employee(&state, "emp_404").unwrap_err().code,
            ErrorCode::NotFound
        );
    }

    #[test]
    fn test_login_requires_both_fields() {
        let (_dir, state) = open_state();
        assert_eq!(login(&state, "", "x").unwrap_err().code, ErrorCode::BadInput);
        assert_eq!(login(&state, "x", "").unwrap_err().code, ErrorCode::BadInput);
    }

    #[test]
    fn test_login_sees_new_employee() {
        let (_dir, state) = open_state();
        assert_eq!(
            login(&state, "ivan", "secret").unwrap_err().code,
            ErrorCode::Unauthorized
        );

        let created = create_employee(&state, employee("Ivan")).unwrap();

        assert_eq!(login(&state, "ivan", "secret").unwrap().id, created.id);
    }

    #[test]
    fn test_employee_ledger_add_list_delete() {
        let (_dir, state) = open_state();
        let loan = EmployeeTransaction {
            employee_id: "someone_else".into(),
            kind: EmployeeTransactionKind::Loan,
            amount: 1500.0,
            description: "Advance".into(),
            ..Default::default()
        };

        let added = add_employee_transaction(&state, "emp_1", loan).unwrap();
        assert!(added.id.starts_with("trans_"));
        assert_eq!(added.employee_id, "emp_1");
        assert!(!added.date.is_empty());
        assert_eq!(list_employee_transactions(&state, "emp_1").unwrap(), vec![added.clone()]);

        delete_employee_transaction(&state, "emp_1", &added.id).unwrap();
        assert!(list_employee_transactions(&state, "emp_1").unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_employee_transaction_is_not_found() {
        let (_dir, state) = open_state();
        let err = delete_employee_transaction(&state, "emp_1", "trans_404").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
