//! Async wrappers around the synchronous upstream clients.
//!
//! This module provides async interfaces to the ureq-based clients by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::{CoinGeckoClient, SolanaRpcClient};
use crate::error::{UpstreamError, UpstreamResult};
use crate::models::{MarketData, TokenAmount};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of on-chain token supply.
#[async_trait]
pub trait AsyncSupplyClient: Send + Sync {
    async fn get_token_supply(&self, token_address: &str) -> UpstreamResult<TokenAmount>;
}

/// Source of market price and capitalization.
#[async_trait]
pub trait AsyncMarketClient: Send + Sync {
    async fn get_market_data(&self) -> UpstreamResult<MarketData>;
}

/// Async wrapper around [`SolanaRpcClient`].
#[derive(Clone)]
pub struct AsyncSolanaRpcClient {
    client: Arc<SolanaRpcClient>,
}

impl AsyncSolanaRpcClient {
    pub fn new(client: SolanaRpcClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncSupplyClient for AsyncSolanaRpcClient {
    async fn get_token_supply(&self, token_address: &str) -> UpstreamResult<TokenAmount> {
        let client = self.client.clone();
        let token_address = token_address.to_string();

        tokio::task::spawn_blocking(move || client.get_token_supply(&token_address))
            .await
            .map_err(|e| UpstreamError::HttpError(format!("Task join error: {}", e)))?
    }
}

/// Async wrapper around [`CoinGeckoClient`].
#[derive(Clone)]
pub struct AsyncCoinGeckoClient {
    client: Arc<CoinGeckoClient>,
}

impl AsyncCoinGeckoClient {
    pub fn new(client: CoinGeckoClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncMarketClient for AsyncCoinGeckoClient {
    async fn get_market_data(&self) -> UpstreamResult<MarketData> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.get_market_data())
            .await
            .map_err(|e| UpstreamError::HttpError(format!("Task join error: {}", e)))?
    }
}
