//! Basic metrics instrumentation for tracking performance.
//!
//! Provides counters and duration tracking for upstream HTTP requests, market
//! cache activity, and rejected inbound requests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by the clients, services and request gate.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of upstream HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of upstream HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all upstream HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Number of market fetches answered from the cache
    market_fallbacks_total: Arc<AtomicU64>,

    /// Number of successful cache refreshes
    cache_refreshes_total: Arc<AtomicU64>,

    /// Number of inbound requests rejected by the rate limiter
    rate_limited_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            market_fallbacks_total: Arc::new(AtomicU64::new(0)),
            cache_refreshes_total: Arc::new(AtomicU64::new(0)),
            rate_limited_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a market fetch served from the cache.
    pub fn record_market_fallback(&self) {
        self.market_fallbacks_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache refresh.
    pub fn record_cache_refresh(&self) {
        self.cache_refreshes_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an inbound request rejected by the rate limiter.
    pub fn record_rate_limited(&self) {
        self.rate_limited_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP duration in milliseconds.
    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get total market fallbacks.
    pub fn market_fallbacks_total(&self) -> u64 {
        self.market_fallbacks_total.load(Ordering::Relaxed)
    }

    /// Get total cache refreshes.
    pub fn cache_refreshes_total(&self) -> u64 {
        self.cache_refreshes_total.load(Ordering::Relaxed)
    }

    /// Get total rate-limited requests.
    pub fn rate_limited_total(&self) -> u64 {
        self.rate_limited_total.load(Ordering::Relaxed)
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            market_fallbacks_total: self.market_fallbacks_total(),
            cache_refreshes_total: self.cache_refreshes_total(),
            rate_limited_total: self.rate_limited_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub market_fallbacks_total: u64,
    pub cache_refreshes_total: u64,
    pub rate_limited_total: u64,
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        self.metrics.record_http_error();
    }
}
