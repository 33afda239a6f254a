//! Market data models: the CoinGecko coin payload and the fallback snapshot.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Subset of the CoinGecko `/coins/{id}` response that the service reads.
///
/// Every level is optional; a missing or `null` price or market cap reads as `0`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinGeckoCoin {
    #[serde(default)]
    pub market_data: Option<CoinGeckoMarketData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinGeckoMarketData {
    #[serde(default)]
    pub current_price: Option<UsdValue>,

    #[serde(default)]
    pub market_cap: Option<UsdValue>,
}

/// A per-currency map reduced to its `usd` entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsdValue {
    #[serde(default)]
    pub usd: Option<f64>,
}

impl CoinGeckoCoin {
    /// USD price, `0` when absent.
    pub fn price_usd(&self) -> f64 {
        self.market_data
            .as_ref()
            .and_then(|m| m.current_price.as_ref())
            .and_then(|v| v.usd)
            .unwrap_or(0.0)
    }

    /// USD market capitalization, `0` when absent.
    pub fn market_cap_usd(&self) -> f64 {
        self.market_data
            .as_ref()
            .and_then(|m| m.market_cap.as_ref())
            .and_then(|v| v.usd)
            .unwrap_or(0.0)
    }

    /// Reduce to the price/market-cap pair.
    pub fn market_data(&self) -> MarketData {
        MarketData {
            price: self.price_usd(),
            market_cap: self.market_cap_usd(),
        }
    }
}

/// Price and market capitalization in USD, as returned by a fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarketData {
    pub price: f64,
    pub market_cap: f64,
}

impl MarketData {
    /// Both values strictly positive. NaN fails.
    pub fn is_valid(&self) -> bool {
        self.price > 0.0 && self.market_cap > 0.0
    }
}

/// Last-known-good market data plus the time it was stored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarketSnapshot {
    pub price: f64,
    pub market_cap: f64,

    /// When the snapshot was last refreshed; UNIX epoch if never
    pub last_updated: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Price/market-cap pair without the timestamp.
    pub fn market_data(&self) -> MarketData {
        MarketData {
            price: self.price,
            market_cap: self.market_cap,
        }
    }
}
