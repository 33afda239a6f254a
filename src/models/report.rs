//! Aggregated token report and its formatted wire representation.

use crate::format::{format_number, format_price};
use crate::models::{MarketData, TokenSupply};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Unformatted result of one aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct BurntTokenReport {
    pub supply: TokenSupply,
    pub max_supply: f64,
    pub market: MarketData,

    /// Timestamp of the market cache, not of this request
    pub last_updated: DateTime<Utc>,
}

/// JSON body of `GET /get-burnt-token-data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BurntTokenResponse {
    pub circulating_supply: String,
    pub burnt_supply: String,
    pub max_supply: String,
    pub price: String,
    pub market_cap: String,
    pub last_updated: String,
}

impl From<&BurntTokenReport> for BurntTokenResponse {
    fn from(report: &BurntTokenReport) -> Self {
        Self {
            circulating_supply: format_number(report.supply.circulating_supply),
            burnt_supply: format_number(report.supply.burnt_supply),
            max_supply: format_number(report.max_supply),
            price: format_price(report.market.price),
            market_cap: format_price(report.market.market_cap),
            last_updated: report
                .last_updated
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
