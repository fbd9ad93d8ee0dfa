//! # Config Commands

use beras_core::{Money, Quantity};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::state::ConfigState;

/// Store settings the shell needs for display. The database path stays
/// on the Rust side.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ConfigView {
    pub store_name: String,
    pub store_address: Vec<String>,
    pub currency_symbol: String,
    pub utc_offset_secs: i32,
    #[ts(type = "string")]
    pub cart_step: Quantity,
    pub quick_amounts: Vec<Money>,
    #[ts(type = "string")]
    pub low_stock_threshold: Quantity,
}

pub fn get_config(config: &ConfigState) -> ConfigView {
    debug!("get_config command");
    ConfigView {
        store_name: config.store_name.clone(),
        store_address: config.store_address.clone(),
        currency_symbol: config.currency_symbol.clone(),
        utc_offset_secs: config.utc_offset_secs,
        cart_step: config.cart_step,
        quick_amounts: config.quick_amounts.clone(),
        low_stock_threshold: config.low_stock_threshold,
    }
}
