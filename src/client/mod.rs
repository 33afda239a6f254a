//! HTTP clients for the upstream APIs.
//!
//! Both clients are synchronous (`ureq`) and are called from async contexts
//! through the wrappers in [`async_wrapper`], which move each call onto the
//! blocking thread pool via `tokio::task::spawn_blocking`.

mod async_wrapper;
mod market;
mod rpc;

pub use async_wrapper::{
    AsyncCoinGeckoClient, AsyncMarketClient, AsyncSolanaRpcClient, AsyncSupplyClient,
};
pub use market::CoinGeckoClient;
pub use rpc::SolanaRpcClient;

use crate::error::UpstreamError;
use std::time::Duration;

/// Default timeout for clients built without a [`Config`](crate::config::Config).
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Build a ureq agent with the given request timeout.
pub(crate) fn build_agent(timeout_secs: u64) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Join a base URL and a path with exactly one slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

/// Map a non-success status code and its body to an UpstreamError.
pub(crate) fn map_status(status: u16, message: String) -> UpstreamError {
    match status {
        429 => UpstreamError::RateLimitExceeded,
        _ => UpstreamError::ApiError { status, message },
    }
}

/// Map a ureq error to an UpstreamError.
pub(crate) fn map_error(error: ureq::Error) -> UpstreamError {
    match error {
        ureq::Error::Status(code, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());
            map_status(code, message)
        }
        ureq::Error::Transport(transport) => {
            if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                UpstreamError::HttpError("Connection failed".to_string())
            } else if transport.kind() == ureq::ErrorKind::Io {
                UpstreamError::Timeout
            } else {
                UpstreamError::HttpError(transport.to_string())
            }
        }
    }
}
