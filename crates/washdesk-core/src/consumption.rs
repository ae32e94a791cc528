//! # Chemical Consumption
//!
//! The two quantities the inventory counter moves by:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  wash event ──► wash_consumption_grams ──► stock goes DOWN on create    │
//! │                                                                         │
//! │    main.chemicalConsumption            (only when > 0)                  │
//! │  + Σ main.employeeConsumptions.amount                                   │
//! │  + for each additional line: same two terms                             │
//! │                                                                         │
//! │  expense ──► chemical_purchase_grams ──► stock goes UP on create        │
//! │                                                                         │
//! │    category is a chemical purchase                                      │
//! │    AND quantity > 0                                                     │
//! │    AND unit (lowercased) starts with "кг" / "kg"                        │
//! │    ⇒ quantity × 1000, else 0                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both functions are pure; applying the result to the stored inventory is
//! the command layer's job.

use crate::types::{Expense, PriceListItem, WashEvent};
use crate::{
    CHEMICAL_PURCHASE_CATEGORY, CHEMICAL_PURCHASE_CATEGORY_ALIASES, GRAMS_PER_KILOGRAM,
    KILOGRAM_UNIT_PREFIXES,
};

/// Total grams of chemical a wash used, across all its service lines.
pub fn wash_consumption_grams(event: &WashEvent) -> f64 {
    event.services.lines().map(line_consumption_grams).sum()
}

fn line_consumption_grams(line: &PriceListItem) -> f64 {
    let direct = if line.chemical_consumption > 0.0 {
        line.chemical_consumption
    } else {
        0.0
    };
    let per_employee: f64 = line.employee_consumptions.iter().map(|c| c.amount).sum();
    direct + per_employee
}

/// True when an expense records bought chemical, measured in kilograms.
pub fn is_chemical_purchase(expense: &Expense) -> bool {
    let category = expense.category.trim();
    let category_matches = category == CHEMICAL_PURCHASE_CATEGORY
        || CHEMICAL_PURCHASE_CATEGORY_ALIASES
            .iter()
            .any(|alias| category.eq_ignore_ascii_case(alias));

    let unit = expense.unit.trim().to_lowercase();
    let unit_is_kilograms = KILOGRAM_UNIT_PREFIXES
        .iter()
        .any(|prefix| unit.starts_with(prefix));

    category_matches && expense.quantity > 0.0 && unit_is_kilograms
}

/// Grams of chemical an expense adds to stock; 0 for anything else.
///
/// ## Example
/// ```rust
/// use washdesk_core::consumption::chemical_purchase_grams;
/// use washdesk_core::{Expense, CHEMICAL_PURCHASE_CATEGORY};
///
/// let expense = Expense {
///     category: CHEMICAL_PURCHASE_CATEGORY.to_string(),
///     quantity: 2.5,
///     unit: "кг".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(chemical_purchase_grams(&expense), 2500.0);
/// ```
pub fn chemical_purchase_grams(expense: &Expense) -> f64 {
    if is_chemical_purchase(expense) {
        expense.quantity * GRAMS_PER_KILOGRAM
    } else {
        0.0
    }
}
