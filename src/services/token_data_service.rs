//! Token data aggregation service.
//!
//! Combines on-chain supply with market data into one [`BurntTokenReport`].

use crate::client::AsyncSupplyClient;
use crate::error::UpstreamResult;
use crate::models::{BurntTokenReport, TokenSupply};
use crate::services::MarketDataService;
use async_trait::async_trait;
use std::sync::Arc;

/// Token data service trait.
#[async_trait]
pub trait TokenDataService: Send + Sync {
    /// Build the aggregated report.
    ///
    /// Fails only on the supply side; the market data branch is not reached
    /// when the supply query fails.
    async fn burnt_token_data(&self) -> UpstreamResult<BurntTokenReport>;
}

/// Default implementation of TokenDataService.
pub struct TokenDataServiceImpl {
    supply_client: Arc<dyn AsyncSupplyClient>,
    market_service: Arc<dyn MarketDataService>,
    token_address: String,
    max_supply: f64,
}

impl TokenDataServiceImpl {
    /// Create a new token data service.
    pub fn new(
        supply_client: Arc<dyn AsyncSupplyClient>,
        market_service: Arc<dyn MarketDataService>,
        token_address: String,
        max_supply: f64,
    ) -> Self {
        Self {
            supply_client,
            market_service,
            token_address,
            max_supply,
        }
    }
}

#[async_trait]
impl TokenDataService for TokenDataServiceImpl {
    async fn burnt_token_data(&self) -> UpstreamResult<BurntTokenReport> {
        let amount = self
            .supply_client
            .get_token_supply(&self.token_address)
            .await?;
        let supply = TokenSupply::from_amount(&amount, self.max_supply)?;

        let market = self.market_service.fetch().await;

        Ok(BurntTokenReport {
            supply,
            max_supply: self.max_supply,
            market,
            last_updated: self.market_service.last_updated(),
        })
    }
}
