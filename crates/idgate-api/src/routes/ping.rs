//! Round-trip check through the user service.
//!
//! The auth middleware has already called the user service by the time the
//! handler runs, so answering with the caller's identity proves the
//! delegation path works end to end.

use axum::routing::get;
use axum::Router;
use idgate_core::UserId;
use serde::{Deserialize, Serialize};

use crate::auth::AuthorizationContext;
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingUserServiceResponse {
    pub id: UserId,
    pub name: String,
    pub sap_employee_id: Option<i64>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/ping/user-service", get(ping_user_service))
}

/// GET /ping/user-service: the authenticated caller's id, name, and SAP id.
async fn ping_user_service(ctx: AuthorizationContext) -> ApiResult<PingUserServiceResponse> {
    let identity = ctx.identity();
    Ok(ApiResponse(PingUserServiceResponse {
        id: identity.id(),
        name: identity.name().to_string(),
        sap_employee_id: identity.sap_employee_id(),
    }))
}
