//! # API Route Modules
//!
//! - `sdm`: SDM controls with related mappings (`/api/sdm/controls`).
//! - `sdm_catalog`: SDM TOM editorial view (`/api/sdm-catalog/controls`).
//! - `resilience`: security baseline controls (`/api/resilience/controls`).
//! - `privacy`: privacy controls and groups (`/api/privacy/*`).
//! - `mapping`: SDM to security mappings (`/api/mapping`).
//! - `files`: raw catalog file access and save with diff preview.
//!
//! Store calls are synchronous file I/O and run on the blocking pool.
//! Reads carry the file digest as an `ETag`; writes honour `If-Match`.

pub mod files;
pub mod mapping;
pub mod privacy;
pub mod resilience;
pub mod sdm;
pub mod sdm_catalog;

use axum::http::header::ETAG;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ogw_core::ContentDigest;
use serde::Serialize;

use crate::error::AppError;

/// Run a store-backed operation on the blocking thread pool.
pub(crate) async fn blocking<T, E, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| AppError::Internal(format!("blocking task failed: {err}")))?
        .map_err(Into::into)
}

/// JSON body tagged with the digest of the catalog file it reflects.
pub(crate) struct Tagged<T> {
    pub digest: ContentDigest,
    pub body: T,
}

impl<T> Tagged<T> {
    pub(crate) fn new(digest: ContentDigest, body: T) -> Self {
        Self { digest, body }
    }
}

impl<T: Serialize> IntoResponse for Tagged<T> {
    fn into_response(self) -> Response {
        let mut response = Json(self.body).into_response();
        if let Ok(tag) = HeaderValue::from_str(&self.digest.to_etag()) {
            response.headers_mut().insert(ETAG, tag);
        }
        response
    }
}
