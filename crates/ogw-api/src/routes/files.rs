//! # Raw File API
//!
//! Direct access to the configured catalog files by logical name. Saving
//! replaces the whole file with the submitted text; `previewOnly` (the
//! default) only reports the structural diff.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use ogw_core::DiffResult;
use ogw_store::StoreError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{blocking, Tagged};
use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// One configured catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileEntry {
    pub name: String,
    pub exists: bool,
}

/// Raw text of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileContent {
    pub name: String,
    pub content: String,
}

/// Body of `POST /api/save`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub name: String,
    pub content: String,
    #[serde(default = "preview_by_default")]
    pub preview_only: bool,
    /// Accepted for compatibility with existing clients; not recorded.
    #[serde(default)]
    pub commit_message: Option<String>,
}

fn preview_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SaveMode {
    Preview,
    Saved,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SaveResponse {
    pub mode: SaveMode,
    pub written: bool,
    pub diff: DiffResult,
}

/// `{"items": [...]}` of configured files.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FileList {
    pub items: Vec<FileEntry>,
}

/// Build the files router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/files", get(list_files))
        .route("/api/files/:name", get(get_file))
        .route("/api/save", post(save_file))
}

/// GET /api/files: Configured logical names and whether each file exists.
#[utoipa::path(
    get,
    path = "/api/files",
    responses(
        (status = 200, description = "Configured catalog files", body = FileList),
    ),
    tag = "files"
)]
pub(crate) async fn list_files(State(state): State<AppState>) -> Result<Json<FileList>, AppError> {
    let store = state.store.clone();
    let items = blocking(move || {
        store
            .config()
            .entries()
            .map(|(name, _)| {
                Ok(FileEntry {
                    name: name.to_string(),
                    exists: store.exists(name)?,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()
    })
    .await?;
    Ok(Json(FileList { items }))
}

/// GET /api/files/:name: Raw text of one catalog file.
#[utoipa::path(
    get,
    path = "/api/files/{name}",
    params(("name" = String, Path, description = "Logical catalog name")),
    responses(
        (status = 200, description = "File content", body = FileContent),
        (status = 400, description = "Unknown logical name", body = crate::error::ErrorBody),
        (status = 500, description = "File missing", body = crate::error::ErrorBody),
    ),
    tag = "files"
)]
pub(crate) async fn get_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Tagged<FileContent>, AppError> {
    let store = state.store.clone();
    let lookup = name.clone();
    let snapshot = blocking(move || store.read_snapshot(&lookup)).await?;
    Ok(Tagged::new(
        snapshot.digest,
        FileContent {
            name,
            content: snapshot.text,
        },
    ))
}

/// POST /api/save: Preview or write replacement content for a catalog file.
#[utoipa::path(
    post,
    path = "/api/save",
    request_body = SaveRequest,
    responses(
        (status = 200, description = "Diff against the current file", body = SaveResponse),
        (status = 400, description = "Unknown logical name", body = crate::error::ErrorBody),
        (status = 422, description = "Content is not valid JSON", body = crate::error::ErrorBody),
    ),
    tag = "files"
)]
pub(crate) async fn save_file(
    State(state): State<AppState>,
    body: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Tagged<SaveResponse>, AppError> {
    let request = extract_json(body)?;
    if let Some(message) = request.commit_message.as_deref() {
        tracing::debug!(catalog = %request.name, commit_message = message, "save requested");
    }
    let store = state.store.clone();
    let preview_only = request.preview_only;
    let replaced =
        blocking(move || store.replace(&request.name, &request.content, preview_only)).await?;
    let mode = if replaced.written {
        SaveMode::Saved
    } else {
        SaveMode::Preview
    };
    Ok(Tagged::new(
        replaced.digest,
        SaveResponse {
            mode,
            written: replaced.written,
            diff: replaced.diff,
        },
    ))
}
