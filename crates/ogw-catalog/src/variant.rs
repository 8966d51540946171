//! # Catalog Variants
//!
//! Every control catalog is served the same way: list summaries, fetch one
//! detail, apply a partial update. Catalogs differ only in which props and
//! parts feed which typed fields. [`CatalogVariant`] captures that field
//! map; [`CatalogService`] runs the shared list/get/update flow against the
//! [`DocumentStore`] for any variant.
//!
//! The `*_in` functions are the same operations on an in-memory document,
//! free of I/O.

use std::fmt;
use std::marker::PhantomData;

use ogw_core::{find_control, find_control_mut, iter_controls, CatalogError, ContentDigest, NodeMut, NodeRef};
use ogw_store::{Committed, DocumentStore};
use serde_json::Value;

use crate::error::ServiceError;

/// Field map of one control catalog.
pub trait CatalogVariant {
    /// Logical store name of the backing catalog file.
    const CATALOG: &'static str;

    type Summary;
    type Detail;
    type Patch;

    /// Project a control into its list view. `id` is already known to be
    /// present and non-empty.
    fn summary(id: &str, group_id: Option<&str>, control: NodeRef<'_>) -> Self::Summary;

    /// Project a control into its full view.
    fn detail(id: &str, group_id: Option<&str>, control: NodeRef<'_>) -> Self::Detail;

    /// Write the fields present in `patch` into the raw control.
    fn apply(control: &mut NodeMut<'_>, patch: &Self::Patch);

    fn summary_id(summary: &Self::Summary) -> &str;

    /// Leading sort key; lists are ordered by `(prefix or "", id)`.
    fn sort_prefix(_summary: &Self::Summary) -> Option<&str> {
        None
    }
}

/// A value read from a catalog together with the digest of the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub value: T,
    pub digest: ContentDigest,
}

/// Summaries of every control with a non-empty id, sorted by the variant's key.
pub fn list_in<V: CatalogVariant>(doc: &Value) -> Vec<V::Summary> {
    let mut items: Vec<V::Summary> = iter_controls(doc)
        .filter_map(|(group_id, control)| {
            let id = control.id().filter(|id| !id.is_empty())?;
            Some(V::summary(id, group_id, control))
        })
        .collect();
    items.sort_by(|a, b| {
        let key_a = (V::sort_prefix(a).unwrap_or(""), V::summary_id(a));
        let key_b = (V::sort_prefix(b).unwrap_or(""), V::summary_id(b));
        key_a.cmp(&key_b)
    });
    items
}

/// Detail of the first control with this id.
pub fn get_in<V: CatalogVariant>(doc: &Value, id: &str) -> Option<V::Detail> {
    find_control(doc, id).map(|(group_id, control)| V::detail(id, group_id, control))
}

/// Apply `patch` to the first control with this id and return its refreshed detail.
pub fn update_in<V: CatalogVariant>(
    doc: &mut Value,
    id: &str,
    patch: &V::Patch,
) -> Result<V::Detail, CatalogError> {
    let (group_id, mut control) =
        find_control_mut(doc, id).ok_or_else(|| CatalogError::ControlNotFound { id: id.to_string() })?;
    V::apply(&mut control, patch);
    Ok(V::detail(id, group_id.as_deref(), control.as_ref()))
}

/// Store-backed list/get/update for one catalog variant.
pub struct CatalogService<V> {
    store: DocumentStore,
    _variant: PhantomData<fn() -> V>,
}

impl<V> Clone for CatalogService<V> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _variant: PhantomData,
        }
    }
}

impl<V: CatalogVariant> fmt::Debug for CatalogService<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogService")
            .field("catalog", &V::CATALOG)
            .finish()
    }
}

impl<V: CatalogVariant> CatalogService<V> {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            _variant: PhantomData,
        }
    }

    pub(crate) fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn list_controls(&self) -> Result<Loaded<Vec<V::Summary>>, ServiceError> {
        let (doc, digest) = self.store.load(V::CATALOG)?;
        Ok(Loaded {
            value: list_in::<V>(&doc),
            digest,
        })
    }

    /// `Ok(None)` when no control has this id.
    pub fn get_control(&self, id: &str) -> Result<Option<Loaded<V::Detail>>, ServiceError> {
        let (doc, digest) = self.store.load(V::CATALOG)?;
        Ok(get_in::<V>(&doc, id).map(|value| Loaded { value, digest }))
    }

    /// Update a control in place. An unknown id fails before anything is written.
    pub fn update_control(
        &self,
        id: &str,
        patch: &V::Patch,
        expected: Option<ContentDigest>,
    ) -> Result<Committed<V::Detail>, ServiceError> {
        let committed = self.store.transact(V::CATALOG, expected, |doc| {
            update_in::<V>(doc, id, patch).map_err(ServiceError::from)
        })?;
        tracing::info!(catalog = V::CATALOG, control = id, "control updated");
        Ok(committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Minimal variant: title only, prefix from a `rank` prop.
    struct Titles;

    impl CatalogVariant for Titles {
        const CATALOG: &'static str = "titles";
        type Summary = (Option<String>, String);
        type Detail = (String, Option<String>, String);
        type Patch = String;

        fn summary(id: &str, _group_id: Option<&str>, control: NodeRef<'_>) -> Self::Summary {
            (control.first_value_by_name("rank"), id.to_string())
        }

        fn detail(id: &str, group_id: Option<&str>, control: NodeRef<'_>) -> Self::Detail {
            (
                id.to_string(),
                group_id.map(str::to_owned),
                control.title().unwrap_or_default().to_string(),
            )
        }

        fn apply(control: &mut NodeMut<'_>, patch: &String) {
            control.set_text("title", patch.as_str());
        }

        fn summary_id(summary: &Self::Summary) -> &str {
            &summary.1
        }

        fn sort_prefix(summary: &Self::Summary) -> Option<&str> {
            summary.0.as_deref()
        }
    }

    fn doc() -> Value {
        json!({"catalog": {"groups": [
            {"id": "g1", "controls": [
                {"id": "B", "props": [{"name": "rank", "value": "2"}]},
                {"title": "no id"},
                {"id": "", "title": "empty id"},
                {"id": "A", "props": [{"name": "rank", "value": "2"}]}
            ]},
            {"id": "g2", "controls": [{"id": "C"}, {"id": "D", "props": [{"name": "rank", "value": "1"}]}]}
        ]}})
    }

    #[test]
    fn list_skips_missing_ids_and_sorts_by_prefix_then_id() {
        let items = list_in::<Titles>(&doc());
        let ids: Vec<_> = items.iter().map(|s| s.1.as_str()).collect();
        assert_eq!(ids, vec!["C", "D", "A", "B"]);
    }

    #[test]
    fn get_reports_owning_group() {
        let detail = get_in::<Titles>(&doc(), "C").unwrap();
        assert_eq!(detail.1.as_deref(), Some("g2"));
        assert!(get_in::<Titles>(&doc(), "Z").is_none());
    }

    #[test]
    fn update_absent_id_leaves_document_untouched() {
        let mut doc = doc();
        let before = doc.clone();
        let err = update_in::<Titles>(&mut doc, "Z", &"x".to_string()).unwrap_err();
        assert_eq!(err, CatalogError::ControlNotFound { id: "Z".into() });
        assert_eq!(doc, before);
    }

    #[test]
    fn update_returns_refreshed_detail() {
        let mut doc = doc();
        let detail = update_in::<Titles>(&mut doc, "A", &"Renamed".to_string()).unwrap();
        assert_eq!(detail.2, "Renamed");
        assert_eq!(doc["catalog"]["groups"][0]["controls"][3]["title"], "Renamed");
    }
}
