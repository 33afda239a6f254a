//! Solana JSON-RPC client for token supply queries.

use super::{build_agent, map_error, map_status, DEFAULT_TIMEOUT_SECS};
use crate::config::Config;
use crate::error::{UpstreamError, UpstreamResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{RpcRequest, RpcResponse, TokenAmount, TokenSupplyResult};
use std::sync::Arc;

/// HTTP client for a Solana JSON-RPC endpoint.
#[derive(Clone)]
pub struct SolanaRpcClient {
    /// JSON-RPC endpoint URL
    rpc_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl SolanaRpcClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        Self {
            rpc_url: config.rpc_url.clone(),
            agent: Arc::new(build_agent(config.request_timeout)),
            metrics,
        }
    }

    /// Create a client with a custom endpoint (useful for testing).
    #[doc(hidden)]
    pub fn with_url(rpc_url: String) -> Self {
        Self {
            rpc_url,
            agent: Arc::new(build_agent(DEFAULT_TIMEOUT_SECS)),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// POST a JSON-RPC request and return the raw response body.
    ///
    /// A non-success status whose body is a JSON-RPC error object is reported
    /// as [`UpstreamError::Rpc`], the same as an error in a 200 response.
    fn post(&self, request: &RpcRequest) -> UpstreamResult<String> {
        let timer = HttpTimer::new(self.metrics.clone());

        tracing::debug!("POST {} ({})", self.rpc_url, request.method);

        let result = self
            .agent
            .post(&self.rpc_url)
            .set("Content-Type", "application/json")
            .send_json(request);

        match result {
            Ok(response) => {
                timer.complete();
                response
                    .into_string()
                    .map_err(|e| UpstreamError::HttpError(e.to_string()))
            }
            Err(ureq::Error::Status(status, response)) => {
                timer.complete_with_error();
                let body = response.into_string().unwrap_or_default();
                tracing::error!("POST {} - status {}", self.rpc_url, status);
                Err(rpc_error_from_body(&body).unwrap_or_else(|| map_status(status, body)))
            }
            Err(e) => {
                timer.complete_with_error();
                tracing::error!("POST {} - Error: {:?}", self.rpc_url, e);
                Err(map_error(e))
            }
        }
    }

    /// Query the raw supply of a token mint via `getTokenSupply`.
    pub fn get_token_supply(&self, token_address: &str) -> UpstreamResult<TokenAmount> {
        let body = self.post(&RpcRequest::get_token_supply(token_address))?;
        parse_token_supply(&body)
    }
}

/// Extract the token amount from a `getTokenSupply` response body.
fn parse_token_supply(body: &str) -> UpstreamResult<TokenAmount> {
    let response: RpcResponse<TokenSupplyResult> = serde_json::from_str(body)?;

    if let Some(error) = response.error {
        return Err(UpstreamError::Rpc {
            code: error.code,
            message: error.message,
        });
    }

    response
        .result
        .map(|result| result.value)
        .ok_or_else(|| UpstreamError::MalformedResponse("missing result".to_string()))
}

/// Interpret a body as a JSON-RPC error response, if it is one.
fn rpc_error_from_body(body: &str) -> Option<UpstreamError> {
    let response: RpcResponse<serde_json::Value> = serde_json::from_str(body).ok()?;
    response.error.map(|error| UpstreamError::Rpc {
        code: error.code,
        message: error.message,
    })
}
