//! # Service Errors

use ogw_core::CatalogError;
use ogw_store::StoreError;
use thiserror::Error;

/// Any failure of a catalog service operation.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Whether the addressed control, group or mapping does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Catalog(err) if err.is_not_found())
    }
}
