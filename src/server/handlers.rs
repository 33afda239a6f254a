//! HTTP route handlers.

use crate::error::ApiError;
use crate::models::BurntTokenResponse;
use crate::services::TokenDataService;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

/// Shared state for the route handlers.
#[derive(Clone)]
pub struct AppState {
    pub token_data: Arc<dyn TokenDataService>,
}

/// GET /get-burnt-token-data
///
/// RPC error objects surface their message with a 500; every other supply
/// failure becomes a generic 500. Market data failures never reach here.
pub async fn get_burnt_token_data(
    State(state): State<AppState>,
) -> Result<Json<BurntTokenResponse>, ApiError> {
    match state.token_data.burnt_token_data().await {
        Ok(report) => Ok(Json(BurntTokenResponse::from(&report))),
        Err(e) => {
            tracing::error!("Error fetching Burnt Token data: {}", e);
            Err(e.into())
        }
    }
}
