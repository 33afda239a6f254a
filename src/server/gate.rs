//! Inbound request gate.
//!
//! Two middleware functions sit in front of every route: a per-address rate
//! limiter and an origin allow-list check.

use crate::config::Config;
use crate::error::{ApiError, ConfigError, ConfigResult};
use crate::metrics::Metrics;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::ORIGIN;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use moka::sync::Cache;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Request count for one address within its current window.
#[derive(Debug, Clone, Copy)]
struct FixedWindow {
    started: Instant,
    count: u32,
}

/// Rate limiter and origin allow-list shared by the gate middleware.
pub struct RequestGate {
    /// Per-address windows; entries expire once their window has passed
    windows: Cache<IpAddr, Arc<Mutex<FixedWindow>>>,

    max_requests: u32,
    window: Duration,

    /// Origins allowed to make cross-origin requests
    allowed_origins: Vec<String>,

    metrics: Metrics,
}

impl RequestGate {
    /// Build the gate from configuration.
    ///
    /// Each address may make `rate_limit_max_requests` requests in a fixed
    /// window of `rate_limit_window_secs` that starts with its first request.
    pub fn new(config: &Config, metrics: Metrics) -> ConfigResult<Self> {
        if config.rate_limit_max_requests == 0 {
            return Err(ConfigError::InvalidValue {
                var: "rate_limit_max_requests".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }
        if config.rate_limit_window_secs == 0 {
            return Err(ConfigError::InvalidValue {
                var: "rate_limit_window_secs".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let window = Duration::from_secs(config.rate_limit_window_secs);

        Ok(Self {
            windows: Cache::builder().time_to_live(window).build(),
            max_requests: config.rate_limit_max_requests,
            window,
            allowed_origins: config.allowed_origins.clone(),
            metrics,
        })
    }

    /// Origins accepted by [`check_origin`](Self::check_origin).
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    /// Count one request from `addr` against its current window.
    pub fn check_rate(&self, addr: IpAddr) -> Result<(), ApiError> {
        self.check_rate_at(addr, Instant::now())
    }

    /// [`check_rate`](Self::check_rate) with an explicit clock reading.
    pub fn check_rate_at(&self, addr: IpAddr, now: Instant) -> Result<(), ApiError> {
        let entry = self.windows.get_with(addr, || {
            Arc::new(Mutex::new(FixedWindow {
                started: now,
                count: 0,
            }))
        });

        let mut window = entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if now.saturating_duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }

        if window.count >= self.max_requests {
            self.metrics.record_rate_limited();
            return Err(ApiError::RateLimited);
        }
        window.count += 1;
        Ok(())
    }

    /// Requests without an `Origin` header (same-origin, server-to-server) always pass.
    pub fn check_origin(&self, origin: Option<&str>) -> Result<(), ApiError> {
        match origin {
            None => Ok(()),
            Some(origin) if self.allowed_origins.iter().any(|o| o == origin) => Ok(()),
            Some(origin) => Err(ApiError::OriginNotAllowed(origin.to_string())),
        }
    }

    /// Evict windows that have expired.
    pub fn evict_expired(&self) {
        self.windows.run_pending_tasks();
    }

    /// Number of addresses with a live window.
    pub fn tracked_addresses(&self) -> u64 {
        self.windows.run_pending_tasks();
        self.windows.entry_count()
    }
}

/// Client address from the connection, or the unspecified address when the
/// router is driven without connect info (as in tests).
fn client_addr(request: &Request) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

/// Rate limit middleware.
pub async fn rate_limit(
    State(gate): State<Arc<RequestGate>>,
    request: Request,
    next: Next,
) -> Response {
    let addr = client_addr(&request);

    match gate.check_rate(addr) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            tracing::warn!("Rate limit exceeded for {}", addr);
            e.into_response()
        }
    }
}

/// Origin allow-list middleware.
pub async fn origin_gate(
    State(gate): State<Arc<RequestGate>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(ORIGIN)
        .map(|value| value.to_str().unwrap_or_default().to_string());

    match gate.check_origin(origin.as_deref()) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            tracing::warn!("Blocked request from origin {:?}", origin);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate_with_limit(max_requests: u32) -> RequestGate {
        let config = Config {
            rate_limit_max_requests: max_requests,
            ..Config::default()
        };
        RequestGate::new(&config, Metrics::new()).unwrap()
    }

    #[test]
    fn test_rate_limit_per_address() {
        let metrics = Metrics::new();
        let config = Config {
            rate_limit_max_requests: 3,
            ..Config::default()
        };
        let gate = RequestGate::new(&config, metrics.clone()).unwrap();
        let a: IpAddr = "10.0.0.1".parse().unwrap();
        let b: IpAddr = "10.0.0.2".parse().unwrap();

        for _ in 0..3 {
            assert!(gate.check_rate(a).is_ok());
        }
        assert!(matches!(gate.check_rate(a), Err(ApiError::RateLimited)));

        // Another address has its own quota
        assert!(gate.check_rate(b).is_ok());
        assert_eq!(gate.tracked_addresses(), 2);
        assert_eq!(metrics.rate_limited_total(), 1);
    }

    #[test]
    fn test_default_quota_allows_150() {
        let gate = RequestGate::new(&Config::default(), Metrics::new()).unwrap();
        let addr: IpAddr = "192.168.1.1".parse().unwrap();

        for _ in 0..150 {
            assert!(gate.check_rate(addr).is_ok());
        }
        assert!(gate.check_rate(addr).is_err());
    }

    #[test]
    fn test_window_does_not_refill_before_it_ends() {
        let gate = RequestGate::new(&Config::default(), Metrics::new()).unwrap();
        let addr: IpAddr = "192.168.1.7".parse().unwrap();
        let start = Instant::now();

        for _ in 0..150 {
            assert!(gate.check_rate_at(addr, start).is_ok());
        }

        for secs in [6, 12, 60, 450, 894, 899] {
            let at = start + Duration::from_secs(secs);
            assert!(
                matches!(gate.check_rate_at(addr, at), Err(ApiError::RateLimited)),
                "request at +{}s should be rejected",
                secs
            );
        }

        // A new window opens 15 minutes after the first request
        let next_window = start + Duration::from_secs(900);
        for _ in 0..150 {
            assert!(gate.check_rate_at(addr, next_window).is_ok());
        }
        assert!(gate.check_rate_at(addr, next_window).is_err());
    }

    #[test]
    fn test_window_starts_at_first_request() {
        let config = Config {
            rate_limit_max_requests: 2,
            ..Config::default()
        };
        let gate = RequestGate::new(&config, Metrics::new()).unwrap();
        let addr: IpAddr = "10.1.1.1".parse().unwrap();
        let start = Instant::now();

        assert!(gate.check_rate_at(addr, start).is_ok());
        assert!(gate.check_rate_at(addr, start + Duration::from_secs(800)).is_ok());
        assert!(gate.check_rate_at(addr, start + Duration::from_secs(850)).is_err());
        assert!(gate.check_rate_at(addr, start + Duration::from_secs(900)).is_ok());
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let config = Config {
            rate_limit_max_requests: 0,
            ..Config::default()
        };
        assert!(RequestGate::new(&config, Metrics::new()).is_err());

        let config = Config {
            rate_limit_window_secs: 0,
            ..Config::default()
        };
        assert!(RequestGate::new(&config, Metrics::new()).is_err());
    }

    #[test]
    fn test_origin_allow_list() {
        let gate = gate_with_limit(10);
        assert!(gate.check_origin(None).is_ok());
        assert!(gate.check_origin(Some("https://burnt.fun")).is_ok());
        assert!(matches!(
            gate.check_origin(Some("https://evil.example")),
            Err(ApiError::OriginNotAllowed(_))
        ));
        // Exact match only
        assert!(gate.check_origin(Some("http://burnt.fun")).is_err());
        assert!(gate.check_origin(Some("https://burnt.fun.evil.example")).is_err());
    }
}
