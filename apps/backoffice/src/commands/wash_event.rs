//! # Wash Event Commands
//!
//! CRUD for washes. Every write that changes how much chemical a wash
//! used moves the stock counter through [`adjust_inventory`].
//!
//! ## Stock Effects
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_wash_event(e)      save e        stock -= grams(e)              │
//! │  update_wash_event(id, n)  save n        stock += grams(old) - grams(n) │
//! │  delete_wash_event(id)     delete old    stock += grams(old)            │
//! │                                                                         │
//! │  Record write happens first; the stock adjustment follows and only     │
//! │  runs when the delta is non-zero.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};
use washdesk_core::consumption::wash_consumption_grams;
use washdesk_core::WashEvent;
use washdesk_store::ids::{self, id_or_generate};

use super::inventory::adjust_inventory;
use crate::error::ApiError;
use crate::state::StoreState;

/// All washes, newest first.
pub fn list_wash_events(state: &StoreState) -> Result<Vec<WashEvent>, ApiError> {
    let events = state.inner().wash_events().list()?;
    debug!(count = events.len(), "list_wash_events command");
    Ok(events.to_vec())
}

pub fn get_wash_event(state: &StoreState, id: &str) -> Result<WashEvent, ApiError> {
    Ok(state.inner().wash_events().get_by_id(id)?)
}

/// Records a wash and draws its chemical consumption from stock.
///
/// A blank id is replaced with a generated `we_…` id.
pub fn create_wash_event(state: &StoreState, mut event: WashEvent) -> Result<WashEvent, ApiError> {
    let store = state.inner();
    event.id = id_or_generate(&event.id, ids::WASH_EVENT_PREFIX);

    store.wash_events().save(&event)?;
    info!(id = %event.id, vehicle = %event.vehicle_number, "Wash event created");

    let grams = wash_consumption_grams(&event);
    if grams > 0.0 {
        adjust_inventory(store, -grams, "wash created");
    }

    Ok(event)
}

/// Replaces a wash, keeping its id, and moves stock by the change in
/// consumption.
pub fn update_wash_event(
    state: &StoreState,
    id: &str,
    mut event: WashEvent,
) -> Result<WashEvent, ApiError> {
    let store = state.inner();
    let old = store.wash_events().get_by_id(id)?;
    event.id = old.id.clone();

    store.wash_events().save(&event)?;
    info!(id = %event.id, "Wash event updated");

    let old_grams = wash_consumption_grams(&old);
    let new_grams = wash_consumption_grams(&event);
    if old_grams != new_grams {
        adjust_inventory(store, old_grams - new_grams, "wash updated");
    }

    Ok(event)
}

/// Deletes a wash and returns its chemical to stock.
pub fn delete_wash_event(state: &StoreState, id: &str) -> Result<(), ApiError> {
    let store = state.inner();
    let old = store.wash_events().get_by_id(id)?;

    store.wash_events().delete(id)?;
    info!(id = %id, "Wash event deleted");

    let grams = wash_consumption_grams(&old);
    if grams > 0.0 {
        adjust_inventory(store, grams, "wash deleted");
    }

    Ok(())
}
