//! # Catalog Traversal
//!
//! Walks `catalog.groups[].controls[]`. Group membership of a control is
//! positional containment; the owning group's id is attached to every
//! control the traversal yields.

use serde_json::{Map, Value};

use crate::error::CatalogError;
use crate::node::{NodeMut, NodeRef};

/// Key of the control array inside a group.
pub const CONTROLS: &str = "controls";

/// The `catalog` object at the document root.
pub fn catalog_root(doc: &Value) -> Option<NodeRef<'_>> {
    doc.get("catalog").and_then(NodeRef::from_value)
}

/// Groups of the catalog in document order. Yields nothing for a document
/// without a `catalog.groups` array.
pub fn groups(doc: &Value) -> impl Iterator<Item = NodeRef<'_>> {
    catalog_root(doc)
        .into_iter()
        .flat_map(|catalog| catalog.children("groups"))
}

/// The raw `catalog.groups` array, created empty when missing.
pub fn groups_mut(doc: &mut Value) -> Result<&mut Vec<Value>, CatalogError> {
    let catalog = doc
        .get_mut("catalog")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| CatalogError::InvalidDocument("missing catalog object".into()))?;
    Ok(NodeMut::new(catalog).into_children_mut("groups"))
}

/// Every control paired with its owning group's id, groups first-to-last,
/// controls in group order.
pub fn iter_controls(doc: &Value) -> impl Iterator<Item = (Option<&str>, NodeRef<'_>)> {
    groups(doc).flat_map(|group| {
        let group_id = group.id();
        group.children(CONTROLS).map(move |control| (group_id, control))
    })
}

/// First control whose id equals `id`.
pub fn find_control<'a>(doc: &'a Value, id: &str) -> Option<(Option<&'a str>, NodeRef<'a>)> {
    iter_controls(doc).find(|(_, control)| control.id() == Some(id))
}

/// Mutable access to the first control whose id equals `id`, with its
/// owning group's id.
pub fn find_control_mut<'a>(
    doc: &'a mut Value,
    id: &str,
) -> Option<(Option<String>, NodeMut<'a>)> {
    let groups = doc.get_mut("catalog")?.get_mut("groups")?.as_array_mut()?;
    for group in groups.iter_mut() {
        let Some(group) = group.as_object_mut() else {
            continue;
        };
        let group_id = group.get("id").and_then(Value::as_str).map(str::to_owned);
        let Some(controls) = group.get_mut(CONTROLS).and_then(Value::as_array_mut) else {
            continue;
        };
        let found = controls
            .iter_mut()
            .filter_map(Value::as_object_mut)
            .find(|c| c.get("id").and_then(Value::as_str) == Some(id));
        if let Some(control) = found {
            return Some((group_id, NodeMut::new(control)));
        }
    }
    None
}

/// Position of the group with id `id` in the raw `catalog.groups` array.
pub fn find_group_index(doc: &Value, id: &str) -> Option<usize> {
    doc.get("catalog")?
        .get("groups")?
        .as_array()?
        .iter()
        .position(|g| g.get("id").and_then(Value::as_str) == Some(id))
}

/// Mutable access to the group object at `index`.
pub fn group_at_mut(doc: &mut Value, index: usize) -> Option<&mut Map<String, Value>> {
    doc.get_mut("catalog")?
        .get_mut("groups")?
        .get_mut(index)?
        .as_object_mut()
}

/// Number of controls a group holds.
pub fn control_count(group: NodeRef<'_>) -> usize {
    group.children(CONTROLS).count()
}
