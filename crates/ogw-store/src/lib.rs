//! # ogw-store: Catalog Document Store
//!
//! Maps logical catalog names to files and owns every read and write of
//! catalog content.
//!
//! ## Modules
//!
//! - [`config`]: [`StoreConfig`], the explicit name → path table, and the
//!   four workbench catalog names.
//! - [`store`]: [`DocumentStore`]: raw reads, digests, and the
//!   [`transact`](DocumentStore::transact) load-mutate-serialize-write cycle
//!   serialized per logical name.
//! - [`error`]: [`StoreError`].
//!
//! ## Crate Policy
//!
//! - Depends only on `ogw-core` among internal crates.
//! - All I/O is blocking `std::fs`; async callers wrap calls in
//!   `spawn_blocking`.

pub mod config;
pub mod error;
pub mod store;

pub use config::{
    CatalogRoots, StoreConfig, OPEN_PRIVACY_CATALOG_RISK, RESILIENCE_BASELINE_CATALOG,
    SDM_PRIVACY_CATALOG, SDM_PRIVACY_TO_SECURITY,
};
pub use error::StoreError;
pub use store::{Committed, DocumentStore, Replaced, Snapshot};
