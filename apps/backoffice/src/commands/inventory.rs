//! # Inventory Commands
//!
//! The chemical stock counter and the one function allowed to move it.
//!
//! ## Adjustment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Chemical Stock Adjustment                            │
//! │                                                                         │
//! │  wash created  ──► -consumption ─┐                                     │
//! │  wash updated  ──► old - new ────┤                                     │
//! │  wash deleted  ──► +consumption ─┤                                     │
//! │  purchase made ──► +grams ───────┼──► adjust_inventory(store, delta)   │
//! │  purchase edit ──► new - old ────┤          │                          │
//! │  purchase gone ──► -grams ───────┘          ▼                          │
//! │                                    load (zero default on failure)      │
//! │                                             │                          │
//! │                                             ▼                          │
//! │                                    Inventory::apply_delta (clamp ≥ 0)  │
//! │                                             │                          │
//! │                                             ▼                          │
//! │                                    save (failure logged, not raised)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The read-modify-write is not isolated from concurrent adjustments; two
//! overlapping requests can lose one delta.

use tracing::{debug, error, info, warn};
use washdesk_core::Inventory;
use washdesk_store::Store;

use crate::error::ApiError;
use crate::state::StoreState;

/// Current chemical stock; zero when nothing has been recorded yet.
pub fn get_inventory(state: &StoreState) -> Result<Inventory, ApiError> {
    debug!("get_inventory command");
    let inventory = state.inner().inventory().load()?;
    Ok((*inventory).clone())
}

/// Moves the chemical stock by `delta_grams`, clamping at zero.
///
/// Runs after the triggering record was written. A failed read starts
/// from an empty inventory and a failed write is logged; neither fails
/// the request that triggered the adjustment.
pub(crate) fn adjust_inventory(store: &Store, delta_grams: f64, reason: &str) {
    if delta_grams == 0.0 {
        return;
    }

    let mut inventory = match store.inventory().load() {
        Ok(current) => (*current).clone(),
        Err(e) => {
            warn!(error = %e, reason = %reason, "Inventory unreadable, adjusting from zero");
            Inventory::default()
        }
    };

    let before = inventory.chemical_stock_grams;
    let lost = inventory.apply_delta(delta_grams);
    if lost > 0.0 {
        warn!(
            before,
            delta = delta_grams,
            lost_grams = lost,
            reason = %reason,
            "Chemical stock clamped at zero"
        );
    }

    match store.inventory().save(&inventory) {
        Ok(()) => info!(
            before,
            after = inventory.chemical_stock_grams,
            delta = delta_grams,
            reason = %reason,
            "Chemical stock adjusted"
        ),
        Err(e) => error!(
            error = %e,
            delta = delta_grams,
            reason = %reason,
            "Failed to persist chemical stock"
        ),
    }
}
