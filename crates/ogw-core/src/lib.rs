//! # ogw-core: Catalog Document Model
//!
//! Leaf crate of the OSCAL workbench. Catalog files are semi-structured
//! JSON trees (`catalog.groups[].controls[].props[]/parts[]`) whose shape
//! varies between catalogs. This crate keeps the document as a lossless
//! [`serde_json::Value`] and layers typed, borrowed node views on top of it,
//! so that projections read typed fields while partial updates leave every
//! untouched key exactly as it was loaded.
//!
//! ## Modules
//!
//! - [`node`]: [`NodeRef`]/[`NodeMut`] views over one object in the tree,
//!   find-by-name lookups over `props` and `parts`, find-or-create writes.
//! - [`document`]: traversal of `catalog.groups[].controls[]` and group access.
//! - [`json`]: parse and serialize documents with stable 2-space indentation.
//! - [`diff`]: structural deep diff between two snapshots.
//! - [`digest`]: SHA-256 content digests used as write preconditions.
//! - [`error`]: domain error type shared by every catalog service.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ogw-*` crates.
//! - No file I/O; storage lives in `ogw-store`.
//! - No `.unwrap()` outside tests.

pub mod diff;
pub mod digest;
pub mod document;
pub mod error;
pub mod json;
pub mod node;

pub use diff::{diff_json, diff_texts, ChangeKind, DiffChange, DiffResult, DiffSummary};
pub use digest::{ContentDigest, InvalidDigest};
pub use document::{
    catalog_root, control_count, find_control, find_control_mut, find_group_index, group_at_mut,
    groups, groups_mut, iter_controls,
};
pub use error::CatalogError;
pub use json::{parse_document, to_document_text};
pub use node::{scalar_text, NodeMut, NodeRef, PARTS, PROPS};
