use async_trait::async_trait;
use burnt_token_api::client::AsyncSupplyClient;
use burnt_token_api::error::{UpstreamError, UpstreamResult};
use burnt_token_api::models::TokenAmount;
use std::sync::{Arc, Mutex};

/// What the next call to the mock supply client does.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum SupplyBehavior {
    Amount { amount: String, decimals: u8 },
    RpcError { code: i64, message: String },
    Transport(String),
}

/// Mock supply client for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockSupplyClient {
    behavior: Arc<Mutex<SupplyBehavior>>,
    requested_addresses: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockSupplyClient {
    pub fn new(behavior: SupplyBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            requested_addresses: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_amount(amount: &str, decimals: u8) -> Self {
        Self::new(SupplyBehavior::Amount {
            amount: amount.to_string(),
            decimals,
        })
    }

    pub fn with_rpc_error(message: &str) -> Self {
        Self::new(SupplyBehavior::RpcError {
            code: -32602,
            message: message.to_string(),
        })
    }

    pub fn get_call_count(&self) -> usize {
        self.requested_addresses.lock().unwrap().len()
    }

    pub fn requested_addresses(&self) -> Vec<String> {
        self.requested_addresses.lock().unwrap().clone()
    }
}

#[async_trait]
impl AsyncSupplyClient for MockSupplyClient {
    async fn get_token_supply(&self, token_address: &str) -> UpstreamResult<TokenAmount> {
        self.requested_addresses
            .lock()
            .unwrap()
            .push(token_address.to_string());

        match self.behavior.lock().unwrap().clone() {
            SupplyBehavior::Amount { amount, decimals } => Ok(TokenAmount { amount, decimals }),
            SupplyBehavior::RpcError { code, message } => Err(UpstreamError::Rpc { code, message }),
            SupplyBehavior::Transport(message) => Err(UpstreamError::HttpError(message)),
        }
    }
}
