//! Error types for the Burnt token API.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Message returned to clients for any supply-side failure other than an RPC error object.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to fetch Burnt Token data";

/// Message returned to clients that exceeded the rate limit.
pub const RATE_LIMIT_MESSAGE: &str =
    "Too many requests from this IP, please try again after 15 minutes.";

/// Message returned to clients whose origin is not allowed.
pub const ORIGIN_NOT_ALLOWED_MESSAGE: &str = "Not allowed by CORS";

/// Errors that can occur when talking to an upstream API (Solana RPC or CoinGecko).
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The RPC node answered with a JSON-RPC error object
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Response parsed but lacked the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The RPC node reported an error; its message is passed through
    #[error("{0}")]
    RpcFailure(String),

    /// Any other supply-side failure; details stay in the logs
    #[error("{}", GENERIC_FAILURE_MESSAGE)]
    Internal,

    /// Client exceeded its request quota
    #[error("{}", RATE_LIMIT_MESSAGE)]
    RateLimited,

    /// Cross-origin request from an origin outside the allow-list
    #[error("{}", ORIGIN_NOT_ALLOWED_MESSAGE)]
    OriginNotAllowed(String),
}

/// JSON body used for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::RpcFailure(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::OriginNotAllowed(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Rpc { message, .. } => ApiError::RpcFailure(message),
            _ => ApiError::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Convenience type alias for Results with UpstreamError
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
