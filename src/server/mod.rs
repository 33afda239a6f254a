//! HTTP server for the Burnt token API.
//!
//! This module wires the upstream clients and services into an axum router,
//! puts the request gate in front of it, and runs it until Ctrl-C.

pub mod gate;
pub mod handlers;

pub use gate::RequestGate;
pub use handlers::AppState;

use crate::cache::MarketCache;
use crate::client::{AsyncCoinGeckoClient, AsyncSolanaRpcClient, CoinGeckoClient, SolanaRpcClient};
use crate::config::Config;
use crate::error::ConfigResult;
use crate::metrics::Metrics;
use crate::services::{MarketDataServiceImpl, TokenDataService, TokenDataServiceImpl};
use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{middleware, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Path of the aggregation endpoint.
pub const BURNT_TOKEN_DATA_PATH: &str = "/get-burnt-token-data";

/// How often idle rate limiter entries are pruned.
const LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Build the router around an existing token data service.
///
/// Layer order, outermost first: request tracing, rate limit, origin gate, CORS headers.
pub fn build_router(token_data: Arc<dyn TokenDataService>, request_gate: Arc<RequestGate>) -> Router {
    let origins = request_gate
        .allowed_origins()
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok());

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET]);

    Router::new()
        .route(BURNT_TOKEN_DATA_PATH, get(handlers::get_burnt_token_data))
        .with_state(AppState { token_data })
        .layer(cors)
        .layer(middleware::from_fn_with_state(
            request_gate.clone(),
            gate::origin_gate,
        ))
        .layer(middleware::from_fn_with_state(request_gate, gate::rate_limit))
        .layer(TraceLayer::new_for_http())
}

/// Construct clients, services and gate from configuration and build the router.
///
/// Returns the gate alongside the router so the caller can prune it.
pub fn build_app(config: &Config, metrics: Metrics) -> ConfigResult<(Router, Arc<RequestGate>)> {
    let supply_client = Arc::new(AsyncSolanaRpcClient::new(SolanaRpcClient::new(
        config,
        metrics.clone(),
    )));
    let market_client = Arc::new(AsyncCoinGeckoClient::new(CoinGeckoClient::new(
        config,
        metrics.clone(),
    )));

    let market_service = Arc::new(MarketDataServiceImpl::new(
        market_client,
        MarketCache::new(),
        metrics.clone(),
    ));
    let token_data = Arc::new(TokenDataServiceImpl::new(
        supply_client,
        market_service,
        config.token_address.clone(),
        config.max_supply,
    ));

    let request_gate = Arc::new(RequestGate::new(config, metrics)?);

    Ok((build_router(token_data, request_gate.clone()), request_gate))
}

/// Bind the listener and serve `app` until a shutdown signal arrives.
pub async fn run_server(config: &Config, app: Router, request_gate: Arc<RequestGate>) -> Result<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server is running on http://{}", addr);

    let pruner = tokio::spawn(async move {
        let mut interval = tokio::time::interval(LIMITER_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            request_gate.evict_expired();
        }
    });

    let result = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error");

    pruner.abort();
    result
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal, stopping server..."),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
