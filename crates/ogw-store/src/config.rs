//! # Store Configuration
//!
//! The logical-name → file-path table. Built once at startup and handed to
//! [`DocumentStore::new`](crate::DocumentStore::new); nothing in the store
//! reads the environment after construction.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Privacy control catalog (risk-annotated TOM controls).
pub const OPEN_PRIVACY_CATALOG_RISK: &str = "open_privacy_catalog_risk";
/// SDM privacy catalog; backs both the SDM control view and the SDM TOM view.
pub const SDM_PRIVACY_CATALOG: &str = "sdm_privacy_catalog";
/// Resilience/security baseline catalog.
pub const RESILIENCE_BASELINE_CATALOG: &str = "resilience_baseline_catalog";
/// SDM → security control mapping document.
pub const SDM_PRIVACY_TO_SECURITY: &str = "sdm_privacy_to_security";

/// Checkout roots of the two OSCAL content repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRoots {
    pub privacy_oscal: PathBuf,
    pub security_oscal: PathBuf,
}

impl CatalogRoots {
    /// Default layout below a data directory.
    pub fn under(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            privacy_oscal: data_dir.join("opengov-privacy-oscal"),
            security_oscal: data_dir.join("opengov-security-oscal"),
        }
    }

    /// Roots from `OGW_DATA_DIR` (default `data`), individually overridable
    /// via `OGW_PRIVACY_OSCAL_PATH` and `OGW_SECURITY_OSCAL_PATH`.
    pub fn from_env() -> Self {
        let data_dir = std::env::var("OGW_DATA_DIR").unwrap_or_else(|_| "data".to_string());
        let defaults = Self::under(data_dir);
        Self {
            privacy_oscal: env_path("OGW_PRIVACY_OSCAL_PATH").unwrap_or(defaults.privacy_oscal),
            security_oscal: env_path("OGW_SECURITY_OSCAL_PATH").unwrap_or(defaults.security_oscal),
        }
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Explicit name → path table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    entries: BTreeMap<String, PathBuf>,
}

impl StoreConfig {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The four workbench catalogs laid out below `roots`.
    pub fn from_roots(roots: &CatalogRoots) -> Self {
        let privacy_catalogs = roots.privacy_oscal.join("oscal").join("catalog");
        let security = &roots.security_oscal;
        Self::new()
            .with_entry(
                OPEN_PRIVACY_CATALOG_RISK,
                privacy_catalogs.join("open_privacy_catalog_risk.json"),
            )
            .with_entry(
                SDM_PRIVACY_CATALOG,
                privacy_catalogs.join("sdm_privacy_catalog.json"),
            )
            .with_entry(
                RESILIENCE_BASELINE_CATALOG,
                security
                    .join("oscal")
                    .join("catalog")
                    .join("resilience_baseline_catalog.json"),
            )
            .with_entry(
                SDM_PRIVACY_TO_SECURITY,
                security.join("mappings").join("sdm_privacy_to_security.json"),
            )
    }

    /// Table built from [`CatalogRoots::from_env`].
    pub fn from_env() -> Self {
        Self::from_roots(&CatalogRoots::from_env())
    }

    /// Add or replace an entry.
    pub fn with_entry(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.entries.insert(name.into(), path.into());
        self
    }

    /// Path configured for `name`.
    pub fn resolve(&self, name: &str) -> Result<&Path, StoreError> {
        self.entries
            .get(name)
            .map(PathBuf::as_path)
            .ok_or_else(|| StoreError::UnknownName {
                name: name.to_string(),
            })
    }

    /// All entries, ordered by name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p.as_path()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}
