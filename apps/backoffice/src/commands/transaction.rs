//! # Client Transaction Commands
//!
//! The client ledger and the stored balance it drives.
//!
//! ## Balance Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Client Balance Updater                               │
//! │                                                                         │
//! │  apply_client_balance(client_id, delta)                                │
//! │       │                                                                 │
//! │       ├── starts with "agg_"   ──► aggregator(client_id)?   ──► apply  │
//! │       ├── starts with "agent_" ──► counter agent(client_id)? ─► apply  │
//! │       │                                                                 │
//! │       ├── aggregator(client_id)?     ───────────────────────► apply    │
//! │       ├── counter agent(client_id)?  ───────────────────────► apply    │
//! │       │                                                                 │
//! │       └── nothing resolved ──► warn!, no-op                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger and the balance field are two sources of truth; nothing
//! recomputes one from the other. A failed balance write is logged and
//! does not undo the ledger write.

use chrono::Utc;
use tracing::{error, info, warn};
use washdesk_core::money::Money;
use washdesk_core::{
    ClientTransaction, ClientTransactionKind, AGGREGATOR_ID_PREFIX, COUNTER_AGENT_ID_PREFIX,
};
use washdesk_store::{ids, Store, StoreError, StoreResult};

use crate::error::ApiError;
use crate::state::StoreState;

/// A client's payments, oldest first.
pub fn list_client_transactions(
    state: &StoreState,
    client_id: &str,
) -> Result<Vec<ClientTransaction>, ApiError> {
    let transactions = state.inner().client_transactions().load(client_id)?;
    Ok(transactions.to_vec())
}

/// Records a payment from a client and adds it to the client's balance.
///
/// The owner id comes from the path and the type is always `payment`.
pub fn add_client_transaction(
    state: &StoreState,
    client_id: &str,
    mut transaction: ClientTransaction,
) -> Result<ClientTransaction, ApiError> {
    let store = state.inner();
    transaction.id = ids::id_or_generate(&transaction.id, ids::CLIENT_TRANSACTION_PREFIX);
    transaction.client_id = client_id.to_string();
    transaction.kind = ClientTransactionKind::Payment;
    if transaction.date.is_empty() {
        transaction.date = Utc::now().to_rfc3339();
    }

    store
        .client_transactions()
        .append(client_id, transaction.clone())?;
    info!(
        id = %transaction.id,
        client_id = %client_id,
        amount = transaction.amount,
        "Client transaction added"
    );

    apply_client_balance(store, client_id, transaction.amount);
    Ok(transaction)
}

/// Removes a payment and takes its amount back off the client's balance.
pub fn delete_client_transaction(
    state: &StoreState,
    client_id: &str,
    transaction_id: &str,
) -> Result<(), ApiError> {
    let store = state.inner();
    let removed = store
        .client_transactions()
        .remove(client_id, transaction_id)?;
    info!(id = %removed.id, client_id = %client_id, "Client transaction deleted");

    apply_client_balance(store, client_id, -removed.amount);
    Ok(())
}

// =============================================================================
// Balance Updater
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClientKind {
    Aggregator,
    CounterAgent,
}

/// Adds `delta` to whichever client `client_id` resolves to.
pub(crate) fn apply_client_balance(store: &Store, client_id: &str, delta: f64) {
    for kind in resolution_order(client_id) {
        match try_apply(store, kind, client_id, delta) {
            Ok(Some(balance)) => {
                info!(
                    client_id = %client_id,
                    kind = ?kind,
                    delta,
                    balance,
                    "Client balance updated"
                );
                return;
            }
            Ok(None) => continue,
            Err(e) => {
                error!(error = %e, client_id = %client_id, kind = ?kind, "Client balance update failed");
                return;
            }
        }
    }

    warn!(client_id = %client_id, delta, "No client found for balance update");
}

/// Prefix match first, then the other kind by raw id.
fn resolution_order(client_id: &str) -> [ClientKind; 2] {
    let is_aggregator = client_id.starts_with(AGGREGATOR_ID_PREFIX);
    let is_counter_agent = client_id.starts_with(COUNTER_AGENT_ID_PREFIX);
    if is_counter_agent && !is_aggregator {
        [ClientKind::CounterAgent, ClientKind::Aggregator]
    } else {
        [ClientKind::Aggregator, ClientKind::CounterAgent]
    }
}

/// Adds in whole cents so adding and then removing a payment restores
/// the stored balance exactly.
fn shift_balance(balance: f64, delta: f64) -> f64 {
    (Money::round_from_major(balance) + Money::round_from_major(delta)).to_major()
}

/// `Ok(None)` when no client of `kind` has this id.
fn try_apply(
    store: &Store,
    kind: ClientKind,
    client_id: &str,
    delta: f64,
) -> StoreResult<Option<f64>> {
    match kind {
        ClientKind::Aggregator => {
            let aggregators = store.aggregators();
            let mut aggregator = match aggregators.get_by_id(client_id) {
                Ok(a) => a,
                Err(StoreError::NotFound { .. }) => return Ok(None),
                Err(e) => return Err(e),
            };
            aggregator.balance = shift_balance(aggregator.balance, delta);
            aggregators.save(&aggregator)?;
            Ok(Some(aggregator.balance))
        }
        ClientKind::CounterAgent => {
            let agents = store.counter_agents();
            let mut agent = match agents.get_by_id(client_id) {
                Ok(a) => a,
                Err(StoreError::NotFound { .. }) => return Ok(None),
                Err(e) => return Err(e),
            };
            agent.balance = shift_balance(agent.balance, delta);
            agents.save(&agent)?;
            Ok(Some(agent.balance))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::client::{
        create_aggregator, create_counter_agent, get_aggregator, get_counter_agent,
    };
    use crate::commands::test_support::open_state;
    use crate::error::ErrorCode;
    use washdesk_core::{Aggregator, CounterAgent};

    fn payment(amount: f64) -> ClientTransaction {
        ClientTransaction {
            amount,
            description: "Invoice".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_then_delete_restores_aggregator_balance() {
        let (_dir, state) = open_state();
        let agg = create_aggregator(
            &state,
            Aggregator {
                name: "CityDrive".into(),
                balance: 1250.5,
                ..Default::default()
            },
        )
        .unwrap();

        let tx = add_client_transaction(&state, &agg.id, payment(300.25)).unwrap();
        assert_eq!(get_aggregator(&state, &agg.id).unwrap().balance, 1550.75);

        delete_client_transaction(&state, &agg.id, &tx.id).unwrap();
        assert_eq!(get_aggregator(&state, &agg.id).unwrap().balance, 1250.5);
    }

    #[test]
    fn test_add_then_delete_restores_counter_agent_balance() {
        let (_dir, state) = open_state();
        let agent = create_counter_agent(
            &state,
            CounterAgent {
                name: "Taxi Park".into(),
                balance: -200.0,
                ..Default::default()
            },
        )
        .unwrap();

        let tx = add_client_transaction(&state, &agent.id, payment(1000.0)).unwrap();
        assert_eq!(get_counter_agent(&state, &agent.id).unwrap().balance, 800.0);

        delete_client_transaction(&state, &agent.id, &tx.id).unwrap();
        assert_eq!(get_counter_agent(&state, &agent.id).unwrap().balance, -200.0);
    }

    #[test]
    fn test_decimal_payment_round_trip_restores_balance() {
        let (_dir, state) = open_state();
        let agg = create_aggregator(
            &state,
            Aggregator {
                name: "CityDrive".into(),
                balance: 0.1,
                ..Default::default()
            },
        )
        .unwrap();
        let agent = create_counter_agent(
            &state,
            CounterAgent {
                name: "Taxi Park".into(),
                balance: 3777.9,
                ..Default::default()
            },
        )
        .unwrap();

        let agg_tx = add_client_transaction(&state, &agg.id, payment(0.2)).unwrap();
        let agent_tx = add_client_transaction(&state, &agent.id, payment(942.8)).unwrap();
        assert_eq!(get_aggregator(&state, &agg.id).unwrap().balance, 0.3);
        assert_eq!(get_counter_agent(&state, &agent.id).unwrap().balance, 4720.7);

        delete_client_transaction(&state, &agg.id, &agg_tx.id).unwrap();
        delete_client_transaction(&state, &agent.id, &agent_tx.id).unwrap();
        assert_eq!(get_aggregator(&state, &agg.id).unwrap().balance, 0.1);
        assert_eq!(get_counter_agent(&state, &agent.id).unwrap().balance, 3777.9);
    }

    #[test]
    fn test_unprefixed_id_falls_back_to_raw_lookup() {
        let (_dir, state) = open_state();
        let agent = CounterAgent {
            id: "legacy-client".into(),
            name: "Legacy".into(),
            ..Default::default()
        };
        state.inner().counter_agents().save(&agent).unwrap();

        add_client_transaction(&state, "legacy-client", payment(50.0)).unwrap();

        assert_eq!(
            get_counter_agent(&state, "legacy-client").unwrap().balance,
            50.0
        );
    }

    #[test]
    fn test_add_forces_owner_and_kind() {
        let (_dir, state) = open_state();
        let mut tx = payment(10.0);
        tx.client_id = "someone_else".into();

        let added = add_client_transaction(&state, "agg_1", tx).unwrap();

        assert!(added.id.starts_with("ctrans_"));
        assert_eq!(added.client_id, "agg_1");
        assert_eq!(added.kind, ClientTransactionKind::Payment);
        assert_eq!(list_client_transactions(&state, "agg_1").unwrap(), vec![added]);
    }

    #[test]
    fn test_unknown_client_still_records_ledger() {
        let (_dir, state) = open_state();

        add_client_transaction(&state, "agent_ghost", payment(10.0)).unwrap();

        assert_eq!(list_client_transactions(&state, "agent_ghost").unwrap().len(), 1);
    }

    #[test]
    fn test_resolution_order_follows_prefix() {
        assert_eq!(
            resolution_order("agent_1"),
            [ClientKind::CounterAgent, ClientKind::Aggregator]
        );
        assert_eq!(
            resolution_order("agg_1"),
            [ClientKind::Aggregator, ClientKind::CounterAgent]
        );
        assert_eq!(
            resolution_order("legacy"),
            [ClientKind::Aggregator, ClientKind::CounterAgent]
        );
    }

    #[test]
    fn test_delete_missing_transaction_is_not_found() {
        let (_dir, state) = open_state();
        let err = delete_client_transaction(&state, "agg_1", "ctrans_404").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
