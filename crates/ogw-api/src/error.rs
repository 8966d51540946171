//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps catalog, store and service errors to HTTP status codes and the
//! JSON error body `{"error": {"code", "message", "details?"}}`.
//!
//! | Source | Status | Code |
//! |---|---|---|
//! | unknown logical name | 400 | `INVALID_ARGUMENT` |
//! | malformed request body / header | 400 | `BAD_REQUEST` |
//! | control, group or mapping absent | 404 | `NOT_FOUND` |
//! | duplicate group id | 409 | `CONFLICT` |
//! | non-empty group, stale `If-Match` | 412 | `PRECONDITION_FAILED` |
//! | self-reassignment, invalid content | 422 | `VALIDATION_ERROR` |
//! | catalog file missing | 500 | `CATALOG_MISCONFIGURED` |
//! | I/O, parse, serialize | 500 | `INTERNAL_ERROR` |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ogw_catalog::ServiceError;
use ogw_core::CatalogError;
use ogw_store::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. `NOT_FOUND`, `PRECONDITION_FAILED`).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional context for client errors. Never set on 500s.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown logical catalog name (400).
    #[error("{0}")]
    InvalidArgument(String),

    /// Request body or header could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Control, group or mapping not found (404).
    #[error("{0}")]
    NotFound(String),

    /// Conflict with existing state (409).
    #[error("{0}")]
    Conflict(String),

    /// A write precondition does not hold (412).
    #[error("{message}")]
    PreconditionFailed {
        message: String,
        details: Option<Value>,
    },

    /// Request is well-formed but semantically invalid (422).
    #[error("{0}")]
    Validation(String),

    /// A configured catalog file is absent (500).
    #[error("{0}")]
    Misconfigured(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::PreconditionFailed { .. } => {
                (StatusCode::PRECONDITION_FAILED, "PRECONDITION_FAILED")
            }
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Misconfigured(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CATALOG_MISCONFIGURED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status_and_code().0
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code, "request failed");
        } else {
            tracing::debug!(error = %self, code, "request rejected");
        }

        let (message, details) = match self {
            Self::Internal(_) => ("An internal error occurred".to_string(), None),
            Self::PreconditionFailed { message, details } => (message, details),
            other => (other.to_string(), None),
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match &err {
            CatalogError::ControlNotFound { .. }
            | CatalogError::GroupNotFound { .. }
            | CatalogError::DestinationGroupNotFound { .. }
            | CatalogError::MappingNotFound { .. } => Self::NotFound(err.to_string()),
            CatalogError::DuplicateGroup { .. } => Self::Conflict(err.to_string()),
            CatalogError::GroupNotEmpty { control_count, .. } => Self::PreconditionFailed {
                details: Some(json!({ "controlCount": control_count })),
                message: err.to_string(),
            },
            CatalogError::InvalidReassignment { .. } => Self::Validation(err.to_string()),
            CatalogError::InvalidDocument(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownName { .. } => Self::InvalidArgument(err.to_string()),
            StoreError::FileMissing { ref name, ref path } => {
                tracing::error!(catalog = %name, path = %path.display(), "catalog file missing");
                Self::Misconfigured(format!("catalog file for '{name}' is missing"))
            }
            StoreError::InvalidContent { .. } => Self::Validation(err.to_string()),
            StoreError::StaleDocument {
                ref expected,
                ref actual,
                ..
            } => Self::PreconditionFailed {
                details: Some(json!({
                    "expected": expected.to_string(),
                    "actual": actual.to_string(),
                })),
                message: err.to_string(),
            },
            StoreError::Io { .. } | StoreError::Parse { .. } | StoreError::Serialize(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Catalog(err) => err.into(),
            ServiceError::Store(err) => err.into(),
        }
    }
}
