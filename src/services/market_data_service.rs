//! Market data service.
//!
//! Fetches price and market cap with a last-known-good fallback. A fetch never
//! fails from the caller's point of view: upstream errors are logged and the
//! cached values are returned instead.

use crate::cache::MarketCache;
use crate::client::AsyncMarketClient;
use crate::metrics::Metrics;
use crate::models::{MarketData, MarketSnapshot};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Market data service trait.
#[async_trait]
pub trait MarketDataService: Send + Sync {
    /// Fetch current market data, falling back to the cache on any failure.
    async fn fetch(&self) -> MarketData;

    /// When the fallback cache was last refreshed.
    fn last_updated(&self) -> DateTime<Utc>;

    /// Current contents of the fallback cache.
    fn snapshot(&self) -> MarketSnapshot;
}

/// Default implementation of MarketDataService.
pub struct MarketDataServiceImpl {
    client: Arc<dyn AsyncMarketClient>,
    cache: MarketCache,
    metrics: Metrics,
}

impl MarketDataServiceImpl {
    /// Create a new market data service that owns `cache`.
    pub fn new(client: Arc<dyn AsyncMarketClient>, cache: MarketCache, metrics: Metrics) -> Self {
        Self {
            client,
            cache,
            metrics,
        }
    }
}

#[async_trait]
impl MarketDataService for MarketDataServiceImpl {
    async fn fetch(&self) -> MarketData {
        match self.client.get_market_data().await {
            Ok(data) => {
                if self.cache.refresh(data, Utc::now()) {
                    self.metrics.record_cache_refresh();
                    tracing::debug!(
                        price = data.price,
                        market_cap = data.market_cap,
                        "Market cache refreshed"
                    );
                } else {
                    tracing::warn!(
                        price = data.price,
                        market_cap = data.market_cap,
                        "Market data rejected by validation, cache left unchanged"
                    );
                }
                data
            }
            Err(e) => {
                tracing::warn!("Error fetching market data, serving cached values: {}", e);
                self.metrics.record_market_fallback();
                self.cache.market_data()
            }
        }
    }

    fn last_updated(&self) -> DateTime<Utc> {
        self.cache.last_updated()
    }

    fn snapshot(&self) -> MarketSnapshot {
        self.cache.snapshot()
    }
}
