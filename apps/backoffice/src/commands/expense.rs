//! # Expense Commands
//!
//! CRUD for expenses. Chemical purchases bought by the kilogram raise the
//! stock counter; all other expenses never touch it.
//!
//! ```text
//! create_expense(e)       save e        stock += grams(e)
//! update_expense(id, n)   save n        stock += grams(n) - grams(old)
//! delete_expense(id)      delete old    stock -= grams(old)   (clamped)
//! ```

use tracing::{debug, info};
use washdesk_core::consumption::chemical_purchase_grams;
use washdesk_core::Expense;
use washdesk_store::ids::{self, id_or_generate};

use super::inventory::adjust_inventory;
use crate::error::ApiError;
use crate::state::StoreState;

/// All expenses, newest date first.
pub fn list_expenses(state: &StoreState) -> Result<Vec<Expense>, ApiError> {
    let expenses = state.inner().expenses().list()?;
    debug!(count = expenses.len(), "list_expenses command");
    Ok(expenses.to_vec())
}

pub fn create_expense(state: &StoreState, mut expense: Expense) -> Result<Expense, ApiError> {
    let store = state.inner();
    expense.id = id_or_generate(&expense.id, ids::EXPENSE_PREFIX);

    store.expenses().save(&expense)?;
    info!(id = %expense.id, category = %expense.category, "Expense created");

    let grams = chemical_purchase_grams(&expense);
    if grams > 0.0 {
        adjust_inventory(store, grams, "chemical purchased");
    }

    Ok(expense)
}

pub fn update_expense(
    state: &StoreState,
    id: &str,
    mut expense: Expense,
) -> Result<Expense, ApiError> {
    let store = state.inner();
    let old = store.expenses().get_by_id(id)?;
    expense.id = old.id.clone();

    store.expenses().save(&expense)?;
    info!(id = %expense.id, "Expense updated");

    let old_grams = chemical_purchase_grams(&old);
    let new_grams = chemical_purchase_grams(&expense);
    if old_grams != new_grams {
        adjust_inventory(store, new_grams - old_grams, "chemical purchase updated");
    }

    Ok(expense)
}

pub fn delete_expense(state: &StoreState, id: &str) -> Result<(), ApiError> {
    let store = state.inner();
    let old = store.expenses().get_by_id(id)?;

    store.expenses().delete(id)?;
    info!(id = %id, "Expense deleted");

    let grams = chemical_purchase_grams(&old);
    if grams > 0.0 {
        adjust_inventory(store, -grams, "chemical purchase deleted");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::inventory::get_inventory;
    use crate::commands::test_support::open_state;
    use crate::error::ErrorCode;
    use washdesk_core::{Inventory, CHEMICAL_PURCHASE_CATEGORY};

    fn purchase(kg: f64) -> Expense {
        Expense {
            date: "2024-05-01".into(),
            category: CHEMICAL_PURCHASE_CATEGORY.into(),
            description: "Active foam".into(),
            amount: kg * 500.0,
            quantity: kg,
            unit: "кг".into(),
            price_per_unit: 500.0,
            ..Default::default()
        }
    }

    fn stock(state: &StoreState) -> f64 {
        get_inventory(state).unwrap().chemical_stock_grams
    }

    #[test]
    fn test_purchase_raises_stock() {
        let (_dir, state) = open_state();

        let created = create_expense(&state, purchase(2.5)).unwrap();

        assert!(created.id.starts_with("exp_"));
        assert_eq!(stock(&state), 2500.0);
    }

    #[test]
    fn test_other_expense_leaves_stock() {
        let (_dir, state) = open_state();
        let rent = Expense {
            category: "Rent".into(),
            amount: 30000.0,
            quantity: 1.0,
            unit: "kg".into(),
            ..Default::default()
        };

        create_expense(&state, rent).unwrap();

        assert_eq!(stock(&state), 0.0);
        assert_eq!(list_expenses(&state).unwrap().len(), 1);
    }

    #[test]
    fn test_update_moves_stock_by_difference() {
        let (_dir, state) = open_state();
        let created = create_expense(&state, purchase(2.0)).unwrap();

        update_expense(&state, &created.id, purchase(5.0)).unwrap();
        assert_eq!(stock(&state), 5000.0);

        update_expense(&state, &created.id, purchase(1.0)).unwrap();
        assert_eq!(stock(&state), 1000.0);
    }

    #[test]
    fn test_delete_removes_grams_with_clamp() {
        let (_dir, state) = open_state();
        let created = create_expense(&state, purchase(2.0)).unwrap();
        state
            .inner()
            .inventory()
            .save(&Inventory {
                chemical_stock_grams: 500.0,
            })
            .unwrap();

        delete_expense(&state, &created.id).unwrap();

        assert_eq!(stock(&state), 0.0);
        assert!(list_expenses(&state).unwrap().is_empty());
    }

    #[test]
    fn test_missing_expense_is_not_found() {
        let (_dir, state) = open_state();
        assert_eq!(
            update_expense(&state, "exp_404", purchase(1.0))
                .unwrap_err()
                .code,
            ErrorCode::NotFound
        );
        assert_eq!(
            delete_expense(&state, "exp_404").unwrap_err().code,
            ErrorCode::NotFound
        );
    }
}
