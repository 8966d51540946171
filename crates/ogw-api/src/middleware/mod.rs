//! # Middleware
//!
//! - `metrics`: request counters and latency histograms recorded through
//!   the `metrics` facade, rendered by the Prometheus exporter when installed.

pub mod metrics;
