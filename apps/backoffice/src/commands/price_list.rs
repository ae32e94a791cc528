//! # Retail Price List Commands
//!
//! The walk-in price list lives in one file; reading it never fails on a
//! fresh install (empty lists, custom services off, no acquiring fee).

use tracing::{debug, info};
use washdesk_core::RetailPriceConfig;

use crate::error::ApiError;
use crate::state::StoreState;

pub fn get_retail_price_config(state: &StoreState) -> Result<RetailPriceConfig, ApiError> {
    debug!("get_retail_price_config command");
    let config = state.inner().retail_prices().load()?;
    Ok((*config).clone())
}

/// Replaces the retail price config wholesale.
pub fn update_retail_price_config(
    state: &StoreState,
    config: RetailPriceConfig,
) -> Result<RetailPriceConfig, ApiError> {
    state.inner().retail_prices().save(&config)?;
    info!(
        main = config.main_price_list.len(),
        additional = config.additional_price_list.len(),
        "Retail price config updated"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::open_state;
    use washdesk_core::PriceListItem;

    #[test]
    fn test_default_when_missing() {
        let (_dir, state) = open_state();
        assert_eq!(
            get_retail_price_config(&state).unwrap(),
            RetailPriceConfig::default()
        );
    }

    #[test]
    fn test_update_then_get() {
        let (_dir, state) = open_state();
        get_retail_price_config(&state).unwrap();

        let config = RetailPriceConfig {
            main_price_list: vec![PriceListItem {
                service_name: "Body wash".into(),
                price: 600.0,
                chemical_consumption: 40.0,
                ..Default::default()
            }],
            allow_custom_retail_services: true,
            card_acquiring_percentage: 2.0,
            ..Default::default()
        };
        update_retail_price_config(&state, config.clone()).unwrap();

        assert_eq!(get_retail_price_config(&state).unwrap(), config);
    }
}
