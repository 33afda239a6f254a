//! Burnt Token API - an HTTP façade over Solana token supply and CoinGecko market data.
//!
//! A single endpoint, `GET /get-burnt-token-data`, combines circulating and burnt
//! supply from a Solana RPC node with price and market cap from CoinGecko. Market
//! data failures are absorbed by a last-known-good cache; supply failures are
//! reported to the client.
//!
//! # Architecture
//!
//! - **models**: Upstream payloads, the market snapshot and the response body
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration from environment variables and fixed constants
//! - **client**: ureq clients for Solana RPC and CoinGecko, with async wrappers
//! - **cache**: The fallback market data cache
//! - **services**: Market data fetching with fallback, and supply aggregation
//! - **format**: en-US number and currency formatting
//! - **server**: axum router, request gate and server lifecycle
//! - **metrics**: Counters for upstream calls, fallbacks and rejections

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod metrics;
pub mod models;
pub mod server;
pub mod services;

pub use cache::MarketCache;
pub use client::{CoinGeckoClient, SolanaRpcClient};
pub use config::Config;
pub use error::{ApiError, ConfigError, UpstreamError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{BurntTokenReport, BurntTokenResponse, MarketData, MarketSnapshot, TokenSupply};
pub use server::{build_app, build_router, RequestGate};
pub use services::{MarketDataService, MarketDataServiceImpl, TokenDataService, TokenDataServiceImpl};
