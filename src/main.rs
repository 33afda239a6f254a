//! Burnt Token API - Main entry point
//!
//! Serves `GET /get-burnt-token-data`, aggregating Solana token supply and
//! CoinGecko market data.

use anyhow::Result;
use burnt_token_api::{build_app, Config, Metrics};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging (stderr only); RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Configuration loaded successfully");
    info!("  Listen: {}", config.bind_addr());
    info!("  RPC URL: {}", config.rpc_url);
    info!("  Market API: {}/coins/{}", config.market_api_url, config.coin_id);
    info!("  Token: {}", config.token_address);
    info!(
        "  Rate limit: {} requests per {}s",
        config.rate_limit_max_requests, config.rate_limit_window_secs
    );

    let metrics = Metrics::new();

    let (app, gate) = match build_app(&config, metrics.clone()) {
        Ok(built) => built,
        Err(e) => {
            error!("Failed to build application: {}", e);
            return Err(e.into());
        }
    };

    burnt_token_api::server::run_server(&config, app, gate).await?;

    info!("Shutdown complete, metrics: {:?}", metrics.summary());
    Ok(())
}
