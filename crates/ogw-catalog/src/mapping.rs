//! # SDM → Security Mappings
//!
//! The mapping document is not a catalog: its root is `{"mappings": [...]}`
//! and each entry is keyed by `sdm_control_id`. Raw entries use snake_case
//! keys; the API view is camelCase.
//!
//! ```json
//! {
//!   "sdm_control_id": "SDM-DEL-02",
//!   "sdm_title": "Löschkonzept",
//!   "security_controls": [{"catalog_id": "resilience", "control_id": "SEC-7"}],
//!   "standards": {"bsi": ["CON.6"]},
//!   "notes": null
//! }
//! ```

use ogw_core::{CatalogError, ContentDigest, NodeRef};
use ogw_store::{Committed, DocumentStore, SDM_PRIVACY_TO_SECURITY};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use utoipa::ToSchema;

use crate::error::ServiceError;
use crate::variant::Loaded;

const MAPPINGS: &str = "mappings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecurityControlRef {
    pub catalog_id: String,
    pub control_id: String,
}

/// External standard references, one optional list per standard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MappingStandards {
    #[serde(default)]
    pub bsi: Option<Vec<String>>,
    #[serde(default)]
    pub iso27001: Option<Vec<String>>,
    #[serde(default)]
    pub iso27701: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SdmSecurityMapping {
    pub sdm_control_id: String,
    pub sdm_title: String,
    pub security_controls: Vec<SecurityControlRef>,
    pub standards: MappingStandards,
    pub notes: Option<String>,
}

/// Body of `PUT /api/mapping/:sdm_control_id`; the id comes from the path.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MappingUpdate {
    pub sdm_title: String,
    #[serde(default)]
    pub security_controls: Vec<SecurityControlRef>,
    #[serde(default)]
    pub standards: MappingStandards,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MappingUpdate {
    pub fn into_mapping(self, sdm_control_id: impl Into<String>) -> SdmSecurityMapping {
        SdmSecurityMapping {
            sdm_control_id: sdm_control_id.into(),
            sdm_title: self.sdm_title,
            security_controls: self.security_controls,
            standards: self.standards,
            notes: self.notes,
        }
    }
}

/// Whether an upsert replaced an entry or appended a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UpsertKind {
    Replaced,
    Appended,
}

fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    value.and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(ogw_core::scalar_text)
            .collect()
    })
}

fn from_raw(entry: NodeRef<'_>) -> SdmSecurityMapping {
    let standards = entry.raw().get("standards").and_then(Value::as_object);
    let standard = |key: &str| string_list(standards.and_then(|s| s.get(key)));
    SdmSecurityMapping {
        sdm_control_id: entry.str_field("sdm_control_id").unwrap_or_default().to_string(),
        sdm_title: entry.str_field("sdm_title").unwrap_or_default().to_string(),
        security_controls: entry
            .children("security_controls")
            .map(|sc| SecurityControlRef {
                catalog_id: sc.str_field("catalog_id").unwrap_or_default().to_string(),
                control_id: sc.str_field("control_id").unwrap_or_default().to_string(),
            })
            .collect(),
        standards: MappingStandards {
            bsi: standard("bsi"),
            iso27001: standard("iso27001"),
            iso27701: standard("iso27701"),
        },
        notes: entry.str_field("notes").map(str::to_owned),
    }
}

fn to_raw(mapping: &SdmSecurityMapping) -> Value {
    let mut standards = Map::new();
    let lists = [
        ("bsi", &mapping.standards.bsi),
        ("iso27001", &mapping.standards.iso27001),
        ("iso27701", &mapping.standards.iso27701),
    ];
    for (key, list) in lists {
        if let Some(list) = list.as_ref().filter(|l| !l.is_empty()) {
            standards.insert(key.into(), json!(list));
        }
    }
    json!({
        "sdm_control_id": mapping.sdm_control_id,
        "sdm_title": mapping.sdm_title,
        "security_controls": mapping
            .security_controls
            .iter()
            .map(|sc| json!({"catalog_id": sc.catalog_id, "control_id": sc.control_id}))
            .collect::<Vec<_>>(),
        "standards": standards,
        "notes": mapping.notes,
    })
}

fn entries(doc: &Value) -> impl Iterator<Item = NodeRef<'_>> {
    NodeRef::from_value(doc)
        .into_iter()
        .flat_map(|root| root.children(MAPPINGS))
}

fn entries_mut(doc: &mut Value) -> Result<&mut Vec<Value>, CatalogError> {
    let root = doc
        .as_object_mut()
        .ok_or_else(|| CatalogError::InvalidDocument("mapping document root is not an object".into()))?;
    Ok(ogw_core::NodeMut::new(root).into_children_mut(MAPPINGS))
}

fn is_entry(value: &Value, id: &str) -> bool {
    value.get("sdm_control_id").and_then(Value::as_str) == Some(id)
}

/// Every mapping, sorted by SDM control id.
pub fn list_mappings_in(doc: &Value) -> Vec<SdmSecurityMapping> {
    let mut items: Vec<SdmSecurityMapping> = entries(doc).map(from_raw).collect();
    items.sort_by(|a, b| a.sdm_control_id.cmp(&b.sdm_control_id));
    items
}

pub fn get_mapping_in(doc: &Value, id: &str) -> Option<SdmSecurityMapping> {
    entries(doc)
        .find(|e| e.str_field("sdm_control_id") == Some(id))
        .map(from_raw)
}

/// Replace the entry with the same SDM control id in place, or append.
pub fn upsert_mapping_in(doc: &mut Value, mapping: &SdmSecurityMapping) -> Result<UpsertKind, CatalogError> {
    let list = entries_mut(doc)?;
    let raw = to_raw(mapping);
    match list.iter_mut().find(|e| is_entry(e, &mapping.sdm_control_id)) {
        Some(slot) => {
            *slot = raw;
            Ok(UpsertKind::Replaced)
        }
        None => {
            list.push(raw);
            Ok(UpsertKind::Appended)
        }
    }
}

/// Remove every entry with this SDM control id.
pub fn delete_mapping_in(doc: &mut Value, id: &str) -> Result<usize, CatalogError> {
    let list = entries_mut(doc)?;
    let before = list.len();
    list.retain(|e| !is_entry(e, id));
    match before - list.len() {
        0 => Err(CatalogError::MappingNotFound { id: id.to_string() }),
        removed => Ok(removed),
    }
}

/// Store-backed mapping operations.
#[derive(Debug, Clone)]
pub struct MappingService {
    store: DocumentStore,
}

impl MappingService {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    pub fn list_mappings(&self) -> Result<Loaded<Vec<SdmSecurityMapping>>, ServiceError> {
        let (doc, digest) = self.store.load(SDM_PRIVACY_TO_SECURITY)?;
        Ok(Loaded {
            value: list_mappings_in(&doc),
            digest,
        })
    }

    pub fn get_mapping(&self, id: &str) -> Result<Option<Loaded<SdmSecurityMapping>>, ServiceError> {
        let (doc, digest) = self.store.load(SDM_PRIVACY_TO_SECURITY)?;
        Ok(get_mapping_in(&doc, id).map(|value| Loaded { value, digest }))
    }

    pub fn upsert_mapping(
        &self,
        mapping: SdmSecurityMapping,
        expected: Option<ContentDigest>,
    ) -> Result<Committed<SdmSecurityMapping>, ServiceError> {
        let committed = self.store.transact(SDM_PRIVACY_TO_SECURITY, expected, |doc| {
            let kind = upsert_mapping_in(doc, &mapping)?;
            tracing::info!(mapping = %mapping.sdm_control_id, ?kind, "mapping upserted");
            Ok::<_, ServiceError>(())
        })?;
        Ok(Committed {
            value: mapping,
            diff: committed.diff,
            digest: committed.digest,
            written: committed.written,
        })
    }

    pub fn delete_mapping(
        &self,
        id: &str,
        expected: Option<ContentDigest>,
    ) -> Result<Committed<usize>, ServiceError> {
        let committed = self.store.transact(SDM_PRIVACY_TO_SECURITY, expected, |doc| {
            delete_mapping_in(doc, id).map_err(ServiceError::from)
        })?;
        tracing::info!(mapping = id, "mapping deleted");
        Ok(committed)
    }
}
