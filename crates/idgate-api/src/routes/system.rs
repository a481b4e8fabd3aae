//! System status endpoint.

use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/system/health", get(health))
}

/// GET /system/health: enveloped status, no authentication.
async fn health() -> ApiResult<HealthResponse> {
    Ok(ApiResponse(HealthResponse {
        status: "ok".to_string(),
    }))
}
