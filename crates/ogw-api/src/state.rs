//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Every service is a thin handle over one
//! [`DocumentStore`], so clones share the per-catalog write locks and no
//! document content is cached between requests.

use std::fmt;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use ogw_catalog::{MappingService, PrivacyService, ResilienceService, SdmService, SdmTomService};
use ogw_store::{DocumentStore, StoreConfig};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port to bind (`PORT`).
    pub port: u16,
    /// Origins allowed by CORS (`OGW_CORS_ORIGINS`, comma separated).
    pub cors_origins: Vec<String>,
    /// Logical catalog name to file path table.
    pub store: StoreConfig,
}

impl AppConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let cors_origins = std::env::var("OGW_CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(|_| vec![DEFAULT_CORS_ORIGIN.to_string()]);
        Self {
            port,
            cors_origins,
            store: StoreConfig::from_env(),
        }
    }

    /// Configuration serving the given store table with default port and origins.
    pub fn with_store(store: StoreConfig) -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            store,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: DocumentStore,
    pub sdm: SdmService,
    pub sdm_catalog: SdmTomService,
    pub resilience: ResilienceService,
    pub privacy: PrivacyService,
    pub mappings: MappingService,
    /// Renders `/metrics`. `None` when no Prometheus recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = DocumentStore::new(config.store.clone());
        Self {
            sdm: SdmService::new(store.clone()),
            sdm_catalog: SdmTomService::new(store.clone()),
            resilience: ResilienceService::new(store.clone()),
            privacy: PrivacyService::new(store.clone()),
            mappings: MappingService::new(store.clone()),
            store,
            config: Arc::new(config),
            metrics: None,
        }
    }

    /// Attach the handle used to render `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}
