//! CoinGecko client for price and market capitalization.

use super::{build_agent, join_url, map_error, DEFAULT_TIMEOUT_SECS};
use crate::config::{Config, COINGECKO_COIN_ID};
use crate::error::{UpstreamError, UpstreamResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{CoinGeckoCoin, MarketData};
use std::sync::Arc;

/// HTTP client for the CoinGecko coins API.
#[derive(Clone)]
pub struct CoinGeckoClient {
    /// API base URL
    base_url: String,

    /// Coin identifier queried on every fetch
    coin_id: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl CoinGeckoClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        Self {
            base_url: config.market_api_url.clone(),
            coin_id: config.coin_id.clone(),
            agent: Arc::new(build_agent(config.request_timeout)),
            metrics,
        }
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            coin_id: COINGECKO_COIN_ID.to_string(),
            agent: Arc::new(build_agent(DEFAULT_TIMEOUT_SECS)),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Fetch the full coin payload.
    pub fn get_coin(&self) -> UpstreamResult<CoinGeckoCoin> {
        let url = join_url(&self.base_url, &format!("/coins/{}", self.coin_id));
        let timer = HttpTimer::new(self.metrics.clone());

        tracing::debug!("GET {}", url);

        let response = match self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .call()
        {
            Ok(response) => {
                timer.complete();
                response
            }
            Err(e) => {
                timer.complete_with_error();
                return Err(map_error(e));
            }
        };

        let body = response
            .into_string()
            .map_err(|e| UpstreamError::HttpError(e.to_string()))?;

        serde_json::from_str(&body).map_err(UpstreamError::JsonError)
    }

    /// Fetch USD price and market cap. Missing fields read as `0`.
    pub fn get_market_data(&self) -> UpstreamResult<MarketData> {
        Ok(self.get_coin()?.market_data())
    }
}
