//! # Store Errors

use std::path::PathBuf;

use ogw_core::ContentDigest;
use thiserror::Error;

/// Failures while resolving, reading or writing a catalog file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The logical name is not in the configured table.
    #[error("unknown catalog name: {name}")]
    UnknownName { name: String },

    /// The name is configured but its file does not exist. This is a
    /// deployment problem, not a missing record.
    #[error("catalog file for '{name}' not found at {}", .path.display())]
    FileMissing { name: String, path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file on disk is not valid JSON.
    #[error("catalog '{name}' is not valid JSON: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Replacement content submitted by a client is not valid JSON.
    #[error("content submitted for '{name}' is not valid JSON: {source}")]
    InvalidContent {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize catalog: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The caller's precondition digest no longer matches the file.
    #[error("catalog '{name}' has changed since it was read (expected {expected}, found {actual})")]
    StaleDocument {
        name: String,
        expected: ContentDigest,
        actual: ContentDigest,
    },
}

impl StoreError {
    /// Whether the failure is the caller's fault rather than the deployment's.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownName { .. } | Self::InvalidContent { .. } | Self::StaleDocument { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(StoreError::UnknownName { name: "x".into() }.is_client_error());
        assert!(!StoreError::FileMissing {
            name: "x".into(),
            path: PathBuf::from("/nope.json"),
        }
        .is_client_error());
    }

    #[test]
    fn messages_name_the_catalog() {
        let err = StoreError::FileMissing {
            name: "sdm_privacy_catalog".into(),
            path: PathBuf::from("/data/sdm.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("sdm_privacy_catalog"));
        assert!(msg.contains("/data/sdm.json"));
    }
}
