//! Caching utilities for the Burnt token API.
//!
//! This module provides the last-known-good market data cache used as a fallback
//! when the market data API is unavailable.

pub mod market_cache;

pub use market_cache::MarketCache;
