//! # idgate-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the gateway.
//! Binds to the configured host and port (default `0.0.0.0:8080`).

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use idgate_api::{AppConfig, AppState};
use idgate_user_client::UserClient;
use metrics_exporter_prometheus::PrometheusBuilder;

#[derive(Parser, Debug)]
#[command(name = "idgate-api", version, about = "Authentication-delegating HTTP gateway")]
struct Cli {
    /// The config file. Defaults to etc/idgate.yaml when that file exists.
    #[arg(short = 'f', long = "config", env = "IDGATE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    let user_client = UserClient::new(config.services.user_service.clone())
        .context("failed to create user service client")?;
    tracing::info!(base_url = %user_client.base_url(), "user service client configured");

    let mut state = AppState::new(config.clone(), user_client);
    if config.metrics.enabled {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("failed to install Prometheus recorder")?;
        state = state.with_metrics(handle);
        tracing::info!("Prometheus metrics enabled at /metrics");
    }

    let app = idgate_api::app(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    tracing::info!("idgate listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server failure")?;

    Ok(())
}

/// Structured logging; `RUST_LOG` filters (default `info`), `LOG_FORMAT=json`
/// switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
