use async_trait::async_trait;
use burnt_token_api::client::AsyncMarketClient;
use burnt_token_api::error::{UpstreamError, UpstreamResult};
use burnt_token_api::models::MarketData;
use std::sync::{Arc, Mutex};

/// What the next call to the mock market client does.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum MarketBehavior {
    Succeed(MarketData),
    FailHttp(String),
    FailStatus(u16),
    Timeout,
}

/// Mock market client for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockMarketClient {
    behavior: Arc<Mutex<MarketBehavior>>,
    call_count: Arc<Mutex<usize>>,
}

#[allow(dead_code)]
impl MockMarketClient {
    pub fn new(behavior: MarketBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn succeeding(price: f64, market_cap: f64) -> Self {
        Self::new(MarketBehavior::Succeed(MarketData { price, market_cap }))
    }

    pub fn set_behavior(&self, behavior: MarketBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl AsyncMarketClient for MockMarketClient {
    async fn get_market_data(&self) -> UpstreamResult<MarketData> {
        *self.call_count.lock().unwrap() += 1;

        match self.behavior.lock().unwrap().clone() {
            MarketBehavior::Succeed(data) => Ok(data),
            MarketBehavior::FailHttp(message) => Err(UpstreamError::HttpError(message)),
            MarketBehavior::FailStatus(status) => Err(UpstreamError::ApiError {
                status,
                message: "upstream failure".to_string(),
            }),
            MarketBehavior::Timeout => Err(UpstreamError::Timeout),
        }
    }
}
