//! # ogw-cli: Operator CLI for the OSCAL Workbench
//!
//! Provides the `ogw` command-line interface for working with catalog
//! files directly, without the HTTP server.
//!
//! ## Subcommands
//!
//! - `ogw catalogs`: configured logical names, paths, existence.
//! - `ogw controls <variant>`: list controls of one catalog view.
//! - `ogw show <variant> <id>`: full detail of one control.
//! - `ogw diff <old> <new>`: structural diff of two JSON files.
//! - `ogw normalize <name>`: rewrite a catalog in the canonical 2-space layout.
//!
//! Catalog locations come from the same environment variables as the
//! server (`OGW_DATA_DIR`, `OGW_PRIVACY_OSCAL_PATH`, `OGW_SECURITY_OSCAL_PATH`)
//! unless `--data-dir` is given.

pub mod catalog;
pub mod diff;
pub mod normalize;

use std::path::Path;

use ogw_store::{CatalogRoots, StoreConfig};

/// Store table for `--data-dir`, or from the environment when absent.
pub fn store_config(data_dir: Option<&Path>) -> StoreConfig {
    match data_dir {
        Some(dir) => StoreConfig::from_roots(&CatalogRoots::under(dir)),
        None => StoreConfig::from_env(),
    }
}
