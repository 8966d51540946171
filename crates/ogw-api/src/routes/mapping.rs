//! # SDM to Security Mapping API
//!
//! Cross references from SDM controls to resilience controls and external
//! standards. A `PUT` replaces the entry for its SDM control id in place or
//! appends a new one.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use ogw_catalog::{ItemList, MappingDeletionOutcome, MappingUpdate, SdmSecurityMapping, UpdateOutcome};
use ogw_core::CatalogError;

use super::{blocking, Tagged};
use crate::error::AppError;
use crate::extractors::{extract_validated_json, if_match};
use crate::state::AppState;

/// Build the mapping router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/mapping", get(list_mappings))
        .route(
            "/api/mapping/:sdm_control_id",
            get(get_mapping).put(upsert_mapping).delete(delete_mapping),
        )
}

/// GET /api/mapping: All mappings, sorted by SDM control id.
#[utoipa::path(
    get,
    path = "/api/mapping",
    responses(
        (status = 200, description = "Mappings", body = ogw_catalog::outcome::MappingList),
        (status = 500, description = "Mapping file missing or unreadable", body = crate::error::ErrorBody),
    ),
    tag = "mapping"
)]
pub(crate) async fn list_mappings(
    State(state): State<AppState>,
) -> Result<Tagged<ItemList<SdmSecurityMapping>>, AppError> {
    let service = state.mappings.clone();
    let loaded = blocking(move || service.list_mappings()).await?;
    Ok(Tagged::new(loaded.digest, loaded.value.into()))
}

/// GET /api/mapping/:sdm_control_id: Mapping of one SDM control.
#[utoipa::path(
    get,
    path = "/api/mapping/{sdm_control_id}",
    params(("sdm_control_id" = String, Path, description = "SDM control id")),
    responses(
        (status = 200, description = "Mapping", body = SdmSecurityMapping),
        (status = 404, description = "Mapping not found", body = crate::error::ErrorBody),
    ),
    tag = "mapping"
)]
pub(crate) async fn get_mapping(
    State(state): State<AppState>,
    Path(sdm_control_id): Path<String>,
) -> Result<Tagged<SdmSecurityMapping>, AppError> {
    let service = state.mappings.clone();
    let lookup = sdm_control_id.clone();
    let loaded = blocking(move || service.get_mapping(&lookup))
        .await?
        .ok_or(CatalogError::MappingNotFound { id: sdm_control_id })?;
    Ok(Tagged::new(loaded.digest, loaded.value))
}

/// PUT /api/mapping/:sdm_control_id: Create or replace a mapping.
#[utoipa::path(
    put,
    path = "/api/mapping/{sdm_control_id}",
    params(
        ("sdm_control_id" = String, Path, description = "SDM control id"),
        ("If-Match" = Option<String>, Header, description = "ETag of the mapping file as last read"),
    ),
    request_body = MappingUpdate,
    responses(
        (status = 200, description = "Stored mapping and diff", body = ogw_catalog::outcome::MappingUpdateOutcome),
        (status = 412, description = "Mapping file changed since it was read", body = crate::error::ErrorBody),
        (status = 422, description = "Missing title or control reference", body = crate::error::ErrorBody),
    ),
    tag = "mapping"
)]
pub(crate) async fn upsert_mapping(
    State(state): State<AppState>,
    Path(sdm_control_id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<MappingUpdate>, JsonRejection>,
) -> Result<Tagged<UpdateOutcome<SdmSecurityMapping>>, AppError> {
    let request = extract_validated_json(body)?;
    let expected = if_match(&headers)?;
    let mapping = request.into_mapping(sdm_control_id);
    let service = state.mappings.clone();
    let committed = blocking(move || service.upsert_mapping(mapping, expected)).await?;
    Ok(Tagged::new(committed.digest, committed.into()))
}

/// DELETE /api/mapping/:sdm_control_id: Remove a mapping.
#[utoipa::path(
    delete,
    path = "/api/mapping/{sdm_control_id}",
    params(
        ("sdm_control_id" = String, Path, description = "SDM control id"),
        ("If-Match" = Option<String>, Header, description = "ETag of the mapping file as last read"),
    ),
    responses(
        (status = 200, description = "Deletion acknowledgement and diff", body = MappingDeletionOutcome),
        (status = 404, description = "Mapping not found", body = crate::error::ErrorBody),
    ),
    tag = "mapping"
)]
pub(crate) async fn delete_mapping(
    State(state): State<AppState>,
    Path(sdm_control_id): Path<String>,
    headers: HeaderMap,
) -> Result<Tagged<MappingDeletionOutcome>, AppError> {
    let expected = if_match(&headers)?;
    let service = state.mappings.clone();
    let committed = blocking(move || service.delete_mapping(&sdm_control_id, expected)).await?;
    Ok(Tagged::new(committed.digest, committed.into()))
}
