//! # Prometheus Metrics
//!
//! Per-request counters and latency histograms recorded through the
//! `metrics` facade. Nothing is recorded unless a global recorder is
//! installed (the server binary installs the Prometheus one).

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;

pub const REQUESTS_TOTAL: &str = "ogw_http_requests_total";
pub const REQUEST_ERRORS_TOTAL: &str = "ogw_http_request_errors_total";
pub const REQUEST_DURATION_SECONDS: &str = "ogw_http_request_duration_seconds";

/// Middleware that records request count, error count and latency,
/// labelled by method and matched route template.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().as_str().to_owned();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let labels = [("method", method), ("route", route)];
    metrics::counter!(REQUESTS_TOTAL, &labels).increment(1);
    if status.is_client_error() || status.is_server_error() {
        metrics::counter!(REQUEST_ERRORS_TOTAL, &labels).increment(1);
    }
    metrics::histogram!(REQUEST_DURATION_SECONDS, &labels)
        .record(started.elapsed().as_secs_f64());

    response
}
