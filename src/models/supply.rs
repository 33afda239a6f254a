//! Token supply models for the Solana `getTokenSupply` JSON-RPC call.

use crate::error::{UpstreamError, UpstreamResult};
use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: Vec<String>,
}

impl RpcRequest {
    /// Build a `getTokenSupply` request for the given mint address.
    pub fn get_token_supply(token_address: &str) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method: "getTokenSupply",
            params: vec![token_address.to_string()],
        }
    }
}

/// JSON-RPC 2.0 response envelope. Exactly one of `result`/`error` is expected.
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RpcErrorObject {
    #[serde(default)]
    pub code: i64,

    #[serde(default)]
    pub message: String,
}

/// `result` of `getTokenSupply`: an RPC context wrapper around the amount.
#[derive(Debug, Deserialize)]
pub struct TokenSupplyResult {
    pub value: TokenAmount,
}

/// Raw on-chain token amount.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
    /// Raw amount as a decimal string, before scaling
    pub amount: String,

    /// Number of decimal places the raw amount is scaled by
    pub decimals: u8,
}

impl TokenAmount {
    /// Amount scaled by `10^decimals`, in floating point.
    pub fn ui_amount(&self) -> UpstreamResult<f64> {
        let raw = self.amount.trim().parse::<f64>().map_err(|_| {
            UpstreamError::MalformedResponse(format!("token amount is not numeric: {:?}", self.amount))
        })?;
        Ok(raw / 10f64.powi(i32::from(self.decimals)))
    }
}

/// Circulating and burnt supply derived from one RPC response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenSupply {
    pub circulating_supply: f64,
    pub burnt_supply: f64,
}

impl TokenSupply {
    /// Derive supply figures. Burnt supply is not clamped and goes negative
    /// when circulating supply exceeds `max_supply`.
    pub fn from_amount(amount: &TokenAmount, max_supply: f64) -> UpstreamResult<Self> {
        let circulating_supply = amount.ui_amount()?;
        Ok(Self {
            circulating_supply,
            burnt_supply: max_supply - circulating_supply,
        })
    }
}
