//! # SDM Catalog API
//!
//! Editorial view of the SDM privacy catalog: technical and organisational
//! measures with description and implementation hints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use ogw_catalog::{ItemList, SdmTomControlDetail, SdmTomControlSummary, SdmTomControlUpdate, UpdateOutcome};
use ogw_core::CatalogError;

use super::{blocking, Tagged};
use crate::error::AppError;
use crate::extractors::{extract_json, if_match};
use crate::state::AppState;

/// Build the SDM catalog controls router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/sdm-catalog/controls", get(list_controls))
        .route("/api/sdm-catalog/controls/:id", get(get_control).put(update_control))
}

/// GET /api/sdm-catalog/controls: All SDM catalog controls, sorted by SDM module then id.
#[utoipa::path(
    get,
    path = "/api/sdm-catalog/controls",
    responses(
        (status = 200, description = "SDM catalog controls", body = ogw_catalog::outcome::SdmTomControlList),
        (status = 500, description = "Catalog file missing or unreadable", body = crate::error::ErrorBody),
    ),
    tag = "sdm-catalog"
)]
pub(crate) async fn list_controls(
    State(state): State<AppState>,
) -> Result<Tagged<ItemList<SdmTomControlSummary>>, AppError> {
    let service = state.sdm_catalog.clone();
    let loaded = blocking(move || service.list_controls()).await?;
    Ok(Tagged::new(loaded.digest, loaded.value.into()))
}

/// GET /api/sdm-catalog/controls/:id: One SDM catalog control with its prose parts.
#[utoipa::path(
    get,
    path = "/api/sdm-catalog/controls/{id}",
    params(("id" = String, Path, description = "Control id")),
    responses(
        (status = 200, description = "SDM catalog control", body = SdmTomControlDetail),
        (status = 404, description = "Control not found", body = crate::error::ErrorBody),
    ),
    tag = "sdm-catalog"
)]
pub(crate) async fn get_control(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Tagged<SdmTomControlDetail>, AppError> {
    let service = state.sdm_catalog.clone();
    let lookup = id.clone();
    let loaded = blocking(move || service.get_control(&lookup))
        .await?
        .ok_or(CatalogError::ControlNotFound { id })?;
    Ok(Tagged::new(loaded.digest, loaded.value))
}

/// PUT /api/sdm-catalog/controls/:id: Write title, description and implementation hints.
#[utoipa::path(
    put,
    path = "/api/sdm-catalog/controls/{id}",
    params(
        ("id" = String, Path, description = "Control id"),
        ("If-Match" = Option<String>, Header, description = "ETag of the catalog as last read"),
    ),
    request_body = SdmTomControlUpdate,
    responses(
        (status = 200, description = "Updated control and diff", body = ogw_catalog::outcome::SdmTomUpdateOutcome),
        (status = 404, description = "Control not found", body = crate::error::ErrorBody),
        (status = 412, description = "Catalog changed since it was read", body = crate::error::ErrorBody),
    ),
    tag = "sdm-catalog"
)]
pub(crate) async fn update_control(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<SdmTomControlUpdate>, JsonRejection>,
) -> Result<Tagged<UpdateOutcome<SdmTomControlDetail>>, AppError> {
    let patch = extract_json(body)?;
    let expected = if_match(&headers)?;
    let service = state.sdm_catalog.clone();
    let committed = blocking(move || service.update_control(&id, &patch, expected)).await?;
    Ok(Tagged::new(committed.digest, committed.into()))
}
