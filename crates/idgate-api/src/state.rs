//! # Application State
//!
//! Shared, read-only state handed to middleware and handlers via `State`.
//! The only pooled resource is the user service client's connection pool;
//! cloning the state is cheap.

use std::sync::Arc;

use idgate_user_client::UserClient;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub user_client: UserClient,
    /// Present when the Prometheus recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(config: AppConfig, user_client: UserClient) -> Self {
        Self {
            config: Arc::new(config),
            user_client,
            metrics: None,
        }
    }

    /// Serve `GET /metrics` from this recorder handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Envelope code used for authentication rejections.
    pub fn unauthorized_code(&self) -> i64 {
        self.config.auth.unauthorized_code
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("user_service", &self.user_client.base_url())
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}
