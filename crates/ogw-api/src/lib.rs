//! # ogw-api: REST API for the OSCAL Workbench
//!
//! Axum surface over the catalog services of `ogw-catalog`. Every request
//! reads the catalog file fresh from disk; writes go through the store's
//! per-catalog transaction, so concurrent edits of one file are serialized
//! and a stale `If-Match` is rejected instead of silently overwriting.
//!
//! ## API Surface
//!
//! | Prefix | Module | Catalog |
//! |---|---|---|
//! | `/api/sdm/controls` | [`routes::sdm`] | `sdm_privacy_catalog` |
//! | `/api/sdm-catalog/controls` | [`routes::sdm_catalog`] | `sdm_privacy_catalog` |
//! | `/api/resilience/controls` | [`routes::resilience`] | `resilience_baseline_catalog` |
//! | `/api/privacy/*` | [`routes::privacy`] | `open_privacy_catalog_risk` |
//! | `/api/mapping` | [`routes::mapping`] | `sdm_privacy_to_security` |
//! | `/api/files`, `/api/save` | [`routes::files`] | any configured name |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! ## OpenAPI
//!
//! Generated via utoipa derive macros, served at `/openapi.json`.

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let api = Router::new()
        .merge(routes::sdm::router())
        .merge(routes::sdm_catalog::router())
        .merge(routes::resilience::router())
        .merge(routes::privacy::router())
        .merge(routes::mapping::router())
        .merge(routes::files::router())
        .merge(openapi::router())
        .layer(from_fn(middleware::metrics::metrics_middleware));

    let health = Router::new()
        .route("/", get(index))
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .route("/metrics", get(render_metrics));

    Router::new()
        .merge(health)
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::IF_MATCH,
        ])
        .expose_headers([axum::http::header::ETAG])
        .allow_credentials(true)
}

#[derive(Debug, Serialize)]
struct ServiceIndex {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// `/`: Service identification.
async fn index() -> Json<ServiceIndex> {
    Json(ServiceIndex {
        status: "ok",
        service: "oscal-workbench",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 when every configured catalog file exists,
/// otherwise 503 naming the missing ones.
async fn readiness(State(state): State<AppState>) -> Response {
    let store = state.store.clone();
    let missing = tokio::task::spawn_blocking(move || {
        store
            .config()
            .entries()
            .filter(|(_, path)| !path.is_file())
            .map(|(name, _)| name.to_string())
            .collect::<Vec<_>>()
    })
    .await;

    match missing {
        Ok(missing) if missing.is_empty() => "ready".into_response(),
        Ok(missing) => {
            tracing::warn!(?missing, "catalog files missing");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "status": "not ready", "missing": missing })),
            )
                .into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

/// `/metrics`: Prometheus text exposition, 404 when no recorder is installed.
async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4",
            )],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
