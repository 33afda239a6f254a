//! Configuration management for the Burnt token API.
//!
//! Only the listening port, the upstream request timeout, and the log level
//! come from the environment. Everything else is a fixed constant carried on
//! [`Config`] so tests can point the clients at mock servers.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Mint address of the Burnt token on Solana.
pub const BURNT_TOKEN_ADDRESS: &str = "burnt3JjFJvvAbKznwrDKxW5U9ZcsKUuCyJVCjKdSVB";

/// Fixed maximum token supply.
pub const MAX_SUPPLY: f64 = 999_999_999.0;

/// Public Solana mainnet RPC endpoint.
pub const SOLANA_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// CoinGecko API base URL.
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko coin identifier for the Burnt token.
pub const COINGECKO_COIN_ID: &str = "burnt-fun";

/// Origins allowed to call the API from a browser.
pub const ALLOWED_ORIGINS: &[&str] = &["https://burnt.fun"];

/// Requests allowed per client address within one window.
pub const RATE_LIMIT_MAX_REQUESTS: u32 = 150;

/// Rate limit window (15 minutes).
pub const RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;

/// Configuration for the Burnt token API.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP listener to
    pub host: String,

    /// Listening port (default: 3000)
    pub port: u16,

    /// Solana JSON-RPC endpoint
    pub rpc_url: String,

    /// Market data API base URL
    pub market_api_url: String,

    /// Market data coin identifier
    pub coin_id: String,

    /// Token mint address passed to `getTokenSupply`
    pub token_address: String,

    /// Fixed maximum supply used to derive burnt supply
    pub max_supply: f64,

    /// Origins accepted by the origin gate
    pub allowed_origins: Vec<String>,

    /// Requests allowed per client address per window
    pub rate_limit_max_requests: u32,

    /// Rate limit window in seconds
    pub rate_limit_window_secs: u64,

    /// Upstream HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `PORT`: Listening port (default: 3000)
    /// - `REQUEST_TIMEOUT`: Upstream HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let defaults = Config::default();

        let port = Self::parse_env_u16("PORT", defaults.port)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", defaults.request_timeout)?;

        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level.clone());

        Ok(Config {
            port,
            request_timeout,
            log_level,
            ..defaults
        })
    }

    /// Address string the listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a port number with a default value.
    fn parse_env_u16(var_name: &str, default: u16) -> ConfigResult<u16> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a port number between 0-65535, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 3000,
            rpc_url: SOLANA_RPC_URL.to_string(),
            market_api_url: COINGECKO_API_URL.to_string(),
            coin_id: COINGECKO_COIN_ID.to_string(),
            token_address: BURNT_TOKEN_ADDRESS.to_string(),
            max_supply: MAX_SUPPLY,
            allowed_origins: ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            rate_limit_max_requests: RATE_LIMIT_MAX_REQUESTS,
            rate_limit_window_secs: RATE_LIMIT_WINDOW_SECS,
            request_timeout: 10,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.max_supply, 999_999_999.0);
        assert_eq!(config.allowed_origins, vec!["https://burnt.fun".to_string()]);
        assert_eq!(config.rate_limit_max_requests, 150);
        assert_eq!(config.rate_limit_window_secs, 900);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("PORT", "8081");
        guard.set("REQUEST_TIMEOUT", "3");

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.request_timeout, 3);
        assert_eq!(config.token_address, BURNT_TOKEN_ADDRESS);
        assert_eq!(config.rpc_url, SOLANA_RPC_URL);
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_port() {
        let mut guard = EnvGuard::new();
        guard.set("PORT", "not-a-port");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "PORT"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_zero_timeout() {
        let mut guard = EnvGuard::new();
        guard.set("REQUEST_TIMEOUT", "0");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "REQUEST_TIMEOUT"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64", "42");

        let result = Config::parse_env_u64("TEST_U64", 10);
        assert_eq!(result.unwrap(), 42);

        let result = Config::parse_env_u64("NONEXISTENT", 10);
        assert_eq!(result.unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_u16_out_of_range() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U16_INVALID", "70000");

        let result = Config::parse_env_u16("TEST_U16_INVALID", 3000);
        assert!(result.is_err());
    }
}
