//! # SDM Controls API
//!
//! Controls of the SDM privacy catalog with their classification props and
//! related mappings. Updates touch only `related-mapping`,
//! `implementation-level` and `dp-risk-impact` props.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use ogw_catalog::{ItemList, SdmControlDetail, SdmControlSummary, SdmControlUpdate, UpdateOutcome};
use ogw_core::CatalogError;

use super::{blocking, Tagged};
use crate::error::AppError;
use crate::extractors::{extract_json, if_match};
use crate::state::AppState;

/// Build the SDM controls router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/sdm/controls", get(list_controls))
        .route("/api/sdm/controls/:id", get(get_control).put(update_control))
}

/// GET /api/sdm/controls: All SDM controls, sorted by id.
#[utoipa::path(
    get,
    path = "/api/sdm/controls",
    responses(
        (status = 200, description = "SDM controls", body = ogw_catalog::outcome::SdmControlList),
        (status = 500, description = "Catalog file missing or unreadable", body = crate::error::ErrorBody),
    ),
    tag = "sdm"
)]
pub(crate) async fn list_controls(
    State(state): State<AppState>,
) -> Result<Tagged<ItemList<SdmControlSummary>>, AppError> {
    let service = state.sdm.clone();
    let loaded = blocking(move || service.list_controls()).await?;
    Ok(Tagged::new(loaded.digest, loaded.value.into()))
}

/// GET /api/sdm/controls/:id: One SDM control with its related mappings.
#[utoipa::path(
    get,
    path = "/api/sdm/controls/{id}",
    params(("id" = String, Path, description = "Control id")),
    responses(
        (status = 200, description = "SDM control", body = SdmControlDetail),
        (status = 404, description = "Control not found", body = crate::error::ErrorBody),
    ),
    tag = "sdm"
)]
pub(crate) async fn get_control(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Tagged<SdmControlDetail>, AppError> {
    let service = state.sdm.clone();
    let lookup = id.clone();
    let loaded = blocking(move || service.get_control(&lookup))
        .await?
        .ok_or(CatalogError::ControlNotFound { id })?;
    Ok(Tagged::new(loaded.digest, loaded.value))
}

/// PUT /api/sdm/controls/:id: Replace related mappings, set or clear the
/// implementation level and risk impact.
#[utoipa::path(
    put,
    path = "/api/sdm/controls/{id}",
    params(
        ("id" = String, Path, description = "Control id"),
        ("If-Match" = Option<String>, Header, description = "ETag of the catalog as last read"),
    ),
    request_body = SdmControlUpdate,
    responses(
        (status = 200, description = "Updated control and diff", body = ogw_catalog::outcome::SdmUpdateOutcome),
        (status = 404, description = "Control not found", body = crate::error::ErrorBody),
        (status = 412, description = "Catalog changed since it was read", body = crate::error::ErrorBody),
    ),
    tag = "sdm"
)]
pub(crate) async fn update_control(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<SdmControlUpdate>, JsonRejection>,
) -> Result<Tagged<UpdateOutcome<SdmControlDetail>>, AppError> {
    let patch = extract_json(body)?;
    let expected = if_match(&headers)?;
    let service = state.sdm.clone();
    let committed = blocking(move || service.update_control(&id, &patch, expected)).await?;
    Ok(Tagged::new(committed.digest, committed.into()))
}
