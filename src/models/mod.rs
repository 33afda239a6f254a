//! Data models for the Burnt token API.
//!
//! This module contains the upstream wire shapes (Solana JSON-RPC, CoinGecko),
//! the market cache snapshot, and the formatted response body.

pub mod market;
pub mod report;
pub mod supply;

pub use market::{CoinGeckoCoin, MarketData, MarketSnapshot};
pub use report::{BurntTokenReport, BurntTokenResponse};
pub use supply::{RpcErrorObject, RpcRequest, RpcResponse, TokenAmount, TokenSupply, TokenSupplyResult};
