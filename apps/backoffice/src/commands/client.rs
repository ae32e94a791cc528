//! # Client Commands
//!
//! CRUD for the two kinds of corporate client: counter agents (contract
//! customers with one price list) and aggregators (ride-hailing style
//! platforms with several named price lists).
//!
//! Updates replace the whole record and keep the stored id. Balances are
//! normally moved by the client ledger (see [`super::transaction`]); an
//! update carries whatever balance the caller sends.

use tracing::{debug, info};
use washdesk_core::{Aggregator, CounterAgent};
use washdesk_store::ids::{self, id_or_generate};

use crate::error::ApiError;
use crate::state::StoreState;

// =============================================================================
// Counter Agents
// =============================================================================

pub fn list_counter_agents(state: &StoreState) -> Result<Vec<CounterAgent>, ApiError> {
    let agents = state.inner().counter_agents().list()?;
    debug!(count = agents.len(), "list_counter_agents command");
    Ok(agents.to_vec())
}

pub fn get_counter_agent(state: &StoreState, id: &str) -> Result<CounterAgent, ApiError> {
    Ok(state.inner().counter_agents().get_by_id(id)?)
}

pub fn create_counter_agent(
    state: &StoreState,
    mut agent: CounterAgent,
) -> Result<CounterAgent, ApiError> {
    agent.id = id_or_generate(&agent.id, ids::COUNTER_AGENT_PREFIX);
    state.inner().counter_agents().save(&agent)?;
    info!(id = %agent.id, name = %agent.name, "Counter agent created");
    Ok(agent)
}

pub fn update_counter_agent(
    state: &StoreState,
    id: &str,
    mut agent: CounterAgent,
) -> Result<CounterAgent, ApiError> {
    let agents = state.inner().counter_agents();
    let existing = agents.get_by_id(id)?;
    agent.id = existing.id;
    agents.save(&agent)?;
    info!(id = %agent.id, "Counter agent updated");
    Ok(agent)
}

pub fn delete_counter_agent(state: &StoreState, id: &str) -> Result<(), ApiError> {
    state.inner().counter_agents().delete(id)?;
    info!(id = %id, "Counter agent deleted");
    Ok(())
}

// =============================================================================
// Aggregators
// =============================================================================

pub fn list_aggregators(state: &StoreState) -> Result<Vec<Aggregator>, ApiError> {
    let aggregators = state.inner().aggregators().list()?;
    debug!(count = aggregators.len(), "list_aggregators command");
    Ok(aggregators.to_vec())
}

pub fn get_aggregator(state: &StoreState, id: &str) -> Result<Aggregator, ApiError> {
    Ok(state.inner().aggregators().get_by_id(id)?)
}

pub fn create_aggregator(
    state: &StoreState,
    mut aggregator: Aggregator,
) -> Result<Aggregator, ApiError> {
    aggregator.id = id_or_generate(&aggregator.id, ids::AGGREGATOR_PREFIX);
    state.inner().aggregators().save(&aggregator)?;
    info!(id = %aggregator.id, name = %aggregator.name, "Aggregator created");
    Ok(aggregator)
}

pub fn update_aggregator(
    state: &StoreState,
    id: &str,
    mut aggregator: Aggregator,
) -> Result<Aggregator, ApiError> {
    let aggregators = state.inner().aggregators();
    let existing = aggregators.get_by_id(id)?;
    aggregator.id = existing.id;
    aggregators.save(&aggregator)?;
    info!(id = %aggregator.id, "Aggregator updated");
    Ok(aggregator)
}

pub fn delete_aggregator(state: &StoreState, id: &str) -> Result<(), ApiError> {
    state.inner().aggregators().delete(id)?;
    info!(id = %id, "Aggregator deleted");
    Ok(())
}
