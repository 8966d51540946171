//! # Resilience Controls API
//!
//! Security baseline controls. List entries omit the description.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use ogw_catalog::{ItemList, SecurityControl, SecurityControlUpdate, UpdateOutcome};
use ogw_core::CatalogError;

use super::{blocking, Tagged};
use crate::error::AppError;
use crate::extractors::{extract_json, if_match};
use crate::state::AppState;

/// Build the resilience controls router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/resilience/controls", get(list_controls))
        .route("/api/resilience/controls/:id", get(get_control).put(update_control))
}

/// GET /api/resilience/controls: All resilience controls, sorted by id.
#[utoipa::path(
    get,
    path = "/api/resilience/controls",
    responses(
        (status = 200, description = "Resilience controls", body = ogw_catalog::outcome::SecurityControlList),
        (status = 500, description = "Catalog file missing or unreadable", body = crate::error::ErrorBody),
    ),
    tag = "resilience"
)]
pub(crate) async fn list_controls(
    State(state): State<AppState>,
) -> Result<Tagged<ItemList<SecurityControl>>, AppError> {
    let service = state.resilience.clone();
    let loaded = blocking(move || service.list_controls()).await?;
    Ok(Tagged::new(loaded.digest, loaded.value.into()))
}

/// GET /api/resilience/controls/:id: One resilience control including its description.
#[utoipa::path(
    get,
    path = "/api/resilience/controls/{id}",
    params(("id" = String, Path, description = "Control id")),
    responses(
        (status = 200, description = "Resilience control", body = SecurityControl),
        (status = 404, description = "Control not found", body = crate::error::ErrorBody),
    ),
    tag = "resilience"
)]
pub(crate) async fn get_control(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Tagged<SecurityControl>, AppError> {
    let service = state.resilience.clone();
    let lookup = id.clone();
    let loaded = blocking(move || service.get_control(&lookup))
        .await?
        .ok_or(CatalogError::ControlNotFound { id })?;
    Ok(Tagged::new(loaded.digest, loaded.value))
}

/// PUT /api/resilience/controls/:id: Update title, domain, objective or
/// description. Absent fields are left untouched.
#[utoipa::path(
    put,
    path = "/api/resilience/controls/{id}",
    params(
        ("id" = String, Path, description = "Control id"),
        ("If-Match" = Option<String>, Header, description = "ETag of the catalog as last read"),
    ),
    request_body = SecurityControlUpdate,
    responses(
        (status = 200, description = "Updated control and diff", body = ogw_catalog::outcome::SecurityUpdateOutcome),
        (status = 404, description = "Control not found", body = crate::error::ErrorBody),
        (status = 412, description = "Catalog changed since it was read", body = crate::error::ErrorBody),
    ),
    tag = "resilience"
)]
pub(crate) async fn update_control(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<SecurityControlUpdate>, JsonRejection>,
) -> Result<Tagged<UpdateOutcome<SecurityControl>>, AppError> {
    let patch = extract_json(body)?;
    let expected = if_match(&headers)?;
    let service = state.resilience.clone();
    let committed = blocking(move || service.update_control(&id, &patch, expected)).await?;
    Ok(Tagged::new(committed.digest, committed.into()))
}
