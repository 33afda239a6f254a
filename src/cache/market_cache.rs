//! Last-known-good market data cache.
//!
//! The cache holds a single [`MarketSnapshot`]. It only accepts values that are
//! both strictly positive, and writes price, market cap, and timestamp together
//! under one write lock.

use crate::models::{MarketData, MarketSnapshot};
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

/// A thread-safe single-entry cache of market data.
///
/// Cloning is cheap and clones share the same snapshot, so a test can keep a
/// handle to observe or seed the cache owned by a service.
#[derive(Clone, Default)]
pub struct MarketCache {
    snapshot: Arc<RwLock<MarketSnapshot>>,
}

impl MarketCache {
    /// Create an empty cache: zero price and market cap, UNIX epoch timestamp.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache pre-populated with a snapshot.
    pub fn with_snapshot(snapshot: MarketSnapshot) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Replace the snapshot if `data` passes validation.
    ///
    /// Returns `true` when the cache was updated. Invalid data leaves the
    /// snapshot untouched.
    pub fn refresh(&self, data: MarketData, now: DateTime<Utc>) -> bool {
        if !data.is_valid() {
            return false;
        }

        match self.snapshot.write() {
            Ok(mut snapshot) => {
                *snapshot = MarketSnapshot {
                    price: data.price,
                    market_cap: data.market_cap,
                    last_updated: now,
                };
                true
            }
            Err(_) => false,
        }
    }

    /// Copy of the current snapshot.
    pub fn snapshot(&self) -> MarketSnapshot {
        self.snapshot
            .read()
            .map(|snapshot| *snapshot)
            .unwrap_or_default()
    }

    /// Cached price and market cap.
    pub fn market_data(&self) -> MarketData {
        self.snapshot().market_data()
    }

    /// When the cache was last refreshed (UNIX epoch if never).
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.snapshot().last_updated
    }
}

impl std::fmt::Debug for MarketCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("MarketCache")
            .field("price", &snapshot.price)
            .field("market_cap", &snapshot.market_cap)
            .field("last_updated", &snapshot.last_updated)
            .finish()
    }
}
