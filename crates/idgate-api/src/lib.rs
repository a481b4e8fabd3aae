//! # idgate-api: Axum HTTP Gateway
//!
//! Protects internal endpoints by delegating bearer-token verification to
//! the upstream user service, and answers every call with a
//! `{code, msg, data}` envelope over HTTP 200.
//!
//! ## API Surface
//!
//! | Route | Module | Auth |
//! |-------|--------|------|
//! | `GET /health/liveness`, `GET /health/readiness` | this module | no |
//! | `GET /metrics` (when enabled) | this module | no |
//! | `GET /system/health` | [`routes::system`] | no |
//! | `GET /ping/user-service` | [`routes::ping`] | yes |
//! | `POST /users`, `PUT /users/{id}` | [`routes::users`] | yes |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → AuthMiddleware → CatchPanic → Handler
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::{AppError, GatewayError};
pub use state::AppState;

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    app_with_routes(state, Router::new())
}

/// Like [`app`], with `extra` mounted behind authentication and the panic
/// boundary alongside the built-in protected routes.
///
/// Health probes and `/metrics` are mounted outside the auth middleware so
/// they remain accessible without credentials.
pub fn app_with_routes(state: AppState, extra: Router<AppState>) -> Router {
    // Authenticated routes. The panic boundary sits inside auth so a
    // handler panic still yields an envelope for an authenticated caller.
    // Route layers only: unmatched paths fall through to a plain 404.
    let protected = Router::new()
        .merge(routes::ping::router())
        .merge(routes::users::router())
        .merge(extra)
        .route_layer(middleware::recover::layer())
        .route_layer(from_fn_with_state(state.clone(), auth::auth_middleware));

    // Unauthenticated probes.
    let mut public = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .merge(routes::system::router());

    if let Some(handle) = state.metrics.clone() {
        public = public.route("/metrics", get(move || prometheus_metrics(handle.clone())));
    }

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(middleware::tracing_layer::layer())
        .with_state(state)
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}

/// GET /metrics: Prometheus text exposition.
async fn prometheus_metrics(handle: PrometheusHandle) -> String {
    handle.render()
}
