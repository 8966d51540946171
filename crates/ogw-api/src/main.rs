//! # ogw-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the OSCAL workbench.
//! Binds to the configured port (default 8000).

use metrics_exporter_prometheus::PrometheusBuilder;
use ogw_api::state::{AppConfig, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = AppConfig::from_env();
    for (name, path) in config.store.entries() {
        if path.is_file() {
            tracing::info!(catalog = name, path = %path.display(), "catalog configured");
        } else {
            tracing::warn!(catalog = name, path = %path.display(), "catalog file missing");
        }
    }

    let mut state = AppState::new(config.clone());
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => tracing::warn!("Prometheus recorder not installed: {e}"),
    }

    let app = ogw_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("OSCAL workbench API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Structured tracing; `OGW_LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("OGW_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
