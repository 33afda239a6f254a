//! Application service layer.
//!
//! Services contain the business logic between the HTTP handlers and the
//! upstream clients: the market data fetcher with its fallback cache, and the
//! supply aggregation that combines both upstreams.

mod market_data_service;
mod token_data_service;

pub use market_data_service::{MarketDataService, MarketDataServiceImpl};
pub use token_data_service::{TokenDataService, TokenDataServiceImpl};
