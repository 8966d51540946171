//! # Error Types
//!
//! Domain errors raised while projecting or mutating a catalog document.
//! Storage failures (unknown logical name, missing file, malformed JSON)
//! are defined next to the store in `ogw-store`.

use thiserror::Error;

/// Errors produced by catalog operations on an in-memory document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No control with this id exists in any group.
    #[error("control {id} not found")]
    ControlNotFound {
        /// The requested control id.
        id: String,
    },

    /// No group with this id exists.
    #[error("group '{id}' not found")]
    GroupNotFound {
        /// The requested group id.
        id: String,
    },

    /// The reassignment target of a group deletion does not exist.
    #[error("destination group '{id}' not found")]
    DestinationGroupNotFound {
        /// The requested destination group id.
        id: String,
    },

    /// A group with this id already exists.
    #[error("group with id '{id}' already exists")]
    DuplicateGroup {
        /// The conflicting group id.
        id: String,
    },

    /// Deleting a group that still holds controls needs a reassignment
    /// target or the explicit override flag.
    #[error(
        "group '{id}' is not empty ({control_count} controls); \
         use reassignTo or set allowDeleteNonEmpty"
    )]
    GroupNotEmpty {
        /// The group that was asked to be deleted.
        id: String,
        /// How many controls it still holds.
        control_count: usize,
    },

    /// A group cannot be reassigned into itself.
    #[error("group '{id}' cannot be reassigned into itself")]
    InvalidReassignment {
        /// The group id given as both source and destination.
        id: String,
    },

    /// No mapping entry exists for this SDM control id.
    #[error("mapping for {id} not found")]
    MappingNotFound {
        /// The requested SDM control id.
        id: String,
    },

    /// The document root does not have the shape the operation needs.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

impl CatalogError {
    /// Whether this error means "the addressed entry does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ControlNotFound { .. }
                | Self::GroupNotFound { .. }
                | Self::DestinationGroupNotFound { .. }
                | Self::MappingNotFound { .. }
        )
    }
}
