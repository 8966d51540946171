//! # Custom Extractors & Validation
//!
//! Provides the [`Validate`] trait for request DTOs, helpers to extract
//! and validate JSON bodies in handlers, and `If-Match` precondition
//! parsing.

use axum::extract::rejection::JsonRejection;
use axum::http::header::IF_MATCH;
use axum::http::HeaderMap;
use axum::Json;
use ogw_catalog::{GroupCreate, GroupUpdate, MappingUpdate};
use ogw_core::ContentDigest;

use crate::error::AppError;

/// Trait for request types that can validate their business rules
/// beyond what serde deserialization checks.
pub trait Validate {
    /// Validate business rules. Returns an error message on failure.
    fn validate(&self) -> Result<(), String>;
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and validate it using the [`Validate`] trait.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}

/// Digest named by the `If-Match` header, if any. `*` matches anything.
pub fn if_match(headers: &HeaderMap) -> Result<Option<ContentDigest>, AppError> {
    let Some(raw) = headers.get(IF_MATCH) else {
        return Ok(None);
    };
    let text = raw
        .to_str()
        .map_err(|_| AppError::BadRequest("If-Match header is not ASCII".to_string()))?
        .trim();
    if text == "*" {
        return Ok(None);
    }
    ContentDigest::from_etag(text)
        .map(Some)
        .map_err(|err| AppError::BadRequest(format!("malformed If-Match header: {err}")))
}

fn require_non_blank(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} must not be empty"))
    } else {
        Ok(())
    }
}

impl Validate for GroupCreate {
    fn validate(&self) -> Result<(), String> {
        require_non_blank("id", &self.id)?;
        require_non_blank("title", &self.title)
    }
}

impl Validate for GroupUpdate {
    fn validate(&self) -> Result<(), String> {
        match &self.title {
            Some(title) => require_non_blank("title", title),
            None => Ok(()),
        }
    }
}

impl Validate for MappingUpdate {
    fn validate(&self) -> Result<(), String> {
        require_non_blank("sdmTitle", &self.sdm_title)?;
        for reference in &self.security_controls {
            require_non_blank("securityControls[].catalogId", &reference.catalog_id)?;
            require_non_blank("securityControls[].controlId", &reference.control_id)?;
        }
        Ok(())
    }
}
