//! # Privacy Catalog API
//!
//! Controls of the risk-annotated privacy catalog and the groups that hold
//! them. Group deletion either reassigns the controls to another group or,
//! with the override flag, deletes them along with the group.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch};
use axum::{Json, Router};
use ogw_catalog::{
    GroupCreate, GroupDelete, GroupDeletionOutcome, GroupDetail, GroupUpdate, ItemList,
    PrivacyControlDetail, PrivacyControlSummary, PrivacyControlUpdate, UpdateOutcome,
};
use ogw_core::CatalogError;

use super::{blocking, Tagged};
use crate::error::AppError;
use crate::extractors::{extract_json, extract_validated_json, if_match};
use crate::state::AppState;

/// Build the privacy controls and groups router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/privacy/controls", get(list_controls))
        .route("/api/privacy/controls/:id", get(get_control).put(update_control))
        .route("/api/privacy/groups", get(list_groups).post(create_group))
        .route("/api/privacy/groups/:id", patch(update_group).delete(delete_group))
}

/// GET /api/privacy/controls: All privacy controls, sorted by TOM id then id.
#[utoipa::path(
    get,
    path = "/api/privacy/controls",
    responses(
        (status = 200, description = "Privacy controls", body = ogw_catalog::outcome::PrivacyControlList),
        (status = 500, description = "Catalog file missing or unreadable", body = crate::error::ErrorBody),
    ),
    tag = "privacy"
)]
pub(crate) async fn list_controls(
    State(state): State<AppState>,
) -> Result<Tagged<ItemList<PrivacyControlSummary>>, AppError> {
    let service = state.privacy.clone();
    let loaded = blocking(move || service.list_controls()).await?;
    Ok(Tagged::new(loaded.digest, loaded.value.into()))
}

/// GET /api/privacy/controls/:id: One privacy control with maturity levels,
/// measures and assessment questions.
#[utoipa::path(
    get,
    path = "/api/privacy/controls/{id}",
    params(("id" = String, Path, description = "Control id")),
    responses(
        (status = 200, description = "Privacy control", body = PrivacyControlDetail),
        (status = 404, description = "Control not found", body = crate::error::ErrorBody),
    ),
    tag = "privacy"
)]
pub(crate) async fn get_control(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Tagged<PrivacyControlDetail>, AppError> {
    let service = state.privacy.clone();
    let lookup = id.clone();
    let loaded = blocking(move || service.get_control(&lookup))
        .await?
        .ok_or(CatalogError::ControlNotFound { id })?;
    Ok(Tagged::new(loaded.digest, loaded.value))
}

/// PUT /api/privacy/controls/:id: Write every editable field. Measure and
/// question lists replace the existing ones.
#[utoipa::path(
    put,
    path = "/api/privacy/controls/{id}",
    params(
        ("id" = String, Path, description = "Control id"),
        ("If-Match" = Option<String>, Header, description = "ETag of the catalog as last read"),
    ),
    request_body = PrivacyControlUpdate,
    responses(
        (status = 200, description = "Updated control and diff", body = ogw_catalog::outcome::PrivacyUpdateOutcome),
        (status = 404, description = "Control not found", body = crate::error::ErrorBody),
        (status = 412, description = "Catalog changed since it was read", body = crate::error::ErrorBody),
    ),
    tag = "privacy"
)]
pub(crate) async fn update_control(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<PrivacyControlUpdate>, JsonRejection>,
) -> Result<Tagged<UpdateOutcome<PrivacyControlDetail>>, AppError> {
    let patch = extract_json(body)?;
    let expected = if_match(&headers)?;
    let service = state.privacy.clone();
    let committed = blocking(move || service.update_control(&id, &patch, expected)).await?;
    Ok(Tagged::new(committed.digest, committed.into()))
}

// ── Groups ──────────────────────────────────────────────────────────

/// GET /api/privacy/groups: All groups with their control counts.
#[utoipa::path(
    get,
    path = "/api/privacy/groups",
    responses(
        (status = 200, description = "Privacy groups", body = ogw_catalog::outcome::GroupList),
    ),
    tag = "privacy"
)]
pub(crate) async fn list_groups(
    State(state): State<AppState>,
) -> Result<Tagged<ItemList<GroupDetail>>, AppError> {
    let service = state.privacy.clone();
    let loaded = blocking(move || service.list_groups()).await?;
    Ok(Tagged::new(loaded.digest, loaded.value.into()))
}

/// POST /api/privacy/groups: Create an empty group.
#[utoipa::path(
    post,
    path = "/api/privacy/groups",
    params(("If-Match" = Option<String>, Header, description = "ETag of the catalog as last read")),
    request_body = GroupCreate,
    responses(
        (status = 201, description = "Created group and diff", body = ogw_catalog::outcome::GroupUpdateOutcome),
        (status = 409, description = "Group id already exists", body = crate::error::ErrorBody),
        (status = 422, description = "Missing id or title", body = crate::error::ErrorBody),
    ),
    tag = "privacy"
)]
pub(crate) async fn create_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<GroupCreate>, JsonRejection>,
) -> Result<(StatusCode, Tagged<UpdateOutcome<GroupDetail>>), AppError> {
    let request = extract_validated_json(body)?;
    let expected = if_match(&headers)?;
    let service = state.privacy.clone();
    let committed = blocking(move || service.create_group(&request, expected)).await?;
    Ok((StatusCode::CREATED, Tagged::new(committed.digest, committed.into())))
}

/// PATCH /api/privacy/groups/:id: Change title or description.
#[utoipa::path(
    patch,
    path = "/api/privacy/groups/{id}",
    params(
        ("id" = String, Path, description = "Group id"),
        ("If-Match" = Option<String>, Header, description = "ETag of the catalog as last read"),
    ),
    request_body = GroupUpdate,
    responses(
        (status = 200, description = "Updated group and diff", body = ogw_catalog::outcome::GroupUpdateOutcome),
        (status = 404, description = "Group not found", body = crate::error::ErrorBody),
    ),
    tag = "privacy"
)]
pub(crate) async fn update_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<GroupUpdate>, JsonRejection>,
) -> Result<Tagged<UpdateOutcome<GroupDetail>>, AppError> {
    let request = extract_validated_json(body)?;
    let expected = if_match(&headers)?;
    let service = state.privacy.clone();
    let committed = blocking(move || service.update_group(&id, &request, expected)).await?;
    Ok(Tagged::new(committed.digest, committed.into()))
}

/// DELETE /api/privacy/groups/:id: Delete a group. The body is optional;
/// without one only an empty group can be deleted.
#[utoipa::path(
    delete,
    path = "/api/privacy/groups/{id}",
    params(
        ("id" = String, Path, description = "Group id"),
        ("If-Match" = Option<String>, Header, description = "ETag of the catalog as last read"),
    ),
    request_body(content = GroupDelete, description = "Optional reassignment target or override flag"),
    responses(
        (status = 200, description = "Deletion report and diff", body = GroupDeletionOutcome),
        (status = 404, description = "Group or destination not found", body = crate::error::ErrorBody),
        (status = 412, description = "Group is not empty", body = crate::error::ErrorBody),
        (status = 422, description = "Group reassigned into itself", body = crate::error::ErrorBody),
    ),
    tag = "privacy"
)]
pub(crate) async fn delete_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Tagged<GroupDeletionOutcome>, AppError> {
    let request = delete_request(&body)?;
    let expected = if_match(&headers)?;
    let service = state.privacy.clone();
    let committed = blocking(move || service.delete_group(&id, &request, expected)).await?;
    Ok(Tagged::new(committed.digest, committed.into()))
}

/// An empty body means "no reassignment, no override".
fn delete_request(body: &[u8]) -> Result<GroupDelete, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GroupDelete::default());
    }
    serde_json::from_slice(body)
        .map_err(|err| AppError::BadRequest(format!("invalid group deletion request: {err}")))
}
