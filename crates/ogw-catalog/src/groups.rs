//! # Privacy Groups
//!
//! Group management for the privacy catalog. A group's description is
//! stored in its `remarks` field; group ids are unique on create.

use ogw_core::document::CONTROLS;
use ogw_core::{
    control_count, find_group_index, group_at_mut, groups, groups_mut, CatalogError, ContentDigest, NodeMut,
    NodeRef,
};
use ogw_store::Committed;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::ServiceError;
use crate::privacy::PrivacyControls;
use crate::variant::{CatalogService, CatalogVariant, Loaded};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetail {
    pub id: String,
    /// Falls back to the id when the group has no title.
    pub title: String,
    pub description: Option<String>,
    pub control_count: usize,
}

/// Body of `POST /api/privacy/groups`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GroupCreate {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `PATCH /api/privacy/groups/:id`. A blank description removes it.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct GroupUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `DELETE /api/privacy/groups/:id`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupDelete {
    /// Group receiving the deleted group's controls.
    pub reassign_to: Option<String>,
    /// Delete a non-empty group together with its controls.
    pub allow_delete_non_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupDeletion {
    pub deleted: String,
    pub reassigned_to: Option<String>,
    /// Controls deleted along with the group; zero when they were reassigned.
    pub removed_control_count: usize,
}

fn group_detail(id: &str, group: NodeRef<'_>) -> GroupDetail {
    GroupDetail {
        id: id.to_string(),
        title: group.title().unwrap_or(id).to_string(),
        description: group.remarks().filter(|r| !r.is_empty()).map(str::to_owned),
        control_count: control_count(group),
    }
}

/// Every group with an id, sorted by id.
pub fn list_groups_in(doc: &Value) -> Vec<GroupDetail> {
    let mut items: Vec<GroupDetail> = groups(doc)
        .filter_map(|group| group.id().map(|id| group_detail(id, group)))
        .collect();
    items.sort_by(|a, b| a.id.cmp(&b.id));
    items
}

pub fn create_group_in(doc: &mut Value, request: &GroupCreate) -> Result<GroupDetail, CatalogError> {
    if find_group_index(doc, &request.id).is_some() {
        return Err(CatalogError::DuplicateGroup {
            id: request.id.clone(),
        });
    }
    let mut group = Map::new();
    group.insert("id".into(), Value::String(request.id.clone()));
    group.insert("title".into(), Value::String(request.title.clone()));
    group.insert(CONTROLS.into(), Value::Array(Vec::new()));
    let description = request.description.as_deref().filter(|d| !d.is_empty());
    if let Some(description) = description {
        group.insert("remarks".into(), Value::String(description.to_string()));
    }
    groups_mut(doc)?.push(Value::Object(group));

    Ok(GroupDetail {
        id: request.id.clone(),
        title: request.title.clone(),
        description: description.map(str::to_owned),
        control_count: 0,
    })
}

pub fn update_group_in(
    doc: &mut Value,
    id: &str,
    request: &GroupUpdate,
) -> Result<GroupDetail, CatalogError> {
    let not_found = || CatalogError::GroupNotFound { id: id.to_string() };
    let index = find_group_index(doc, id).ok_or_else(not_found)?;
    let map = group_at_mut(doc, index).ok_or_else(not_found)?;
    let mut group = NodeMut::new(map);
    if let Some(title) = &request.title {
        group.set_text("title", title.as_str());
    }
    match request.description.as_deref() {
        None => {}
        Some(d) if d.trim().is_empty() => {
            group.remove("remarks");
        }
        Some(d) => group.set_text("remarks", d),
    }
    Ok(group_detail(id, group.as_ref()))
}

/// Delete a group.
///
/// - Empty group: deleted.
/// - Non-empty with `reassign_to`: its controls are appended, in order, to
///   the destination group, then the group is deleted.
/// - Non-empty without `reassign_to`: fails unless `allow_delete_non_empty`
///   is set, in which case the controls are deleted with the group.
///
/// On error the document is left unchanged.
pub fn delete_group_in(
    doc: &mut Value,
    id: &str,
    request: &GroupDelete,
) -> Result<GroupDeletion, CatalogError> {
    let index = find_group_index(doc, id).ok_or_else(|| CatalogError::GroupNotFound { id: id.to_string() })?;
    let count = groups_mut(doc)?
        .get(index)
        .and_then(NodeRef::from_value)
        .map(control_count)
        .unwrap_or(0);

    let reassigned_to = request.reassign_to.clone().filter(|d| !d.is_empty());
    match (&reassigned_to, count) {
        (_, 0) => {}
        (Some(dest), _) => {
            if dest == id {
                return Err(CatalogError::InvalidReassignment { id: id.to_string() });
            }
            let dest_index = find_group_index(doc, dest)
                .ok_or_else(|| CatalogError::DestinationGroupNotFound { id: dest.clone() })?;
            let moved = group_at_mut(doc, index)
                .and_then(|g| g.get_mut(CONTROLS))
                .and_then(Value::as_array_mut)
                .map(std::mem::take)
                .unwrap_or_default();
            let dest_map = group_at_mut(doc, dest_index)
                .ok_or_else(|| CatalogError::DestinationGroupNotFound { id: dest.clone() })?;
            NodeMut::new(dest_map).children_mut(CONTROLS).extend(moved);
        }
        (None, _) if !request.allow_delete_non_empty => {
            return Err(CatalogError::GroupNotEmpty {
                id: id.to_string(),
                control_count: count,
            });
        }
        (None, _) => {}
    }

    groups_mut(doc)?.remove(index);
    Ok(GroupDeletion {
        deleted: id.to_string(),
        removed_control_count: if reassigned_to.is_some() { 0 } else { count },
        reassigned_to,
    })
}

impl CatalogService<PrivacyControls> {
    pub fn list_groups(&self) -> Result<Loaded<Vec<GroupDetail>>, ServiceError> {
        let (doc, digest) = self.store().load(PrivacyControls::CATALOG)?;
        Ok(Loaded {
            value: list_groups_in(&doc),
            digest,
        })
    }

    pub fn create_group(
        &self,
        request: &GroupCreate,
        expected: Option<ContentDigest>,
    ) -> Result<Committed<GroupDetail>, ServiceError> {
        let committed = self.store().transact(PrivacyControls::CATALOG, expected, |doc| {
            create_group_in(doc, request).map_err(ServiceError::from)
        })?;
        tracing::info!(group = %request.id, "privacy group created");
        Ok(committed)
    }

    pub fn update_group(
        &self,
        id: &str,
        request: &GroupUpdate,
        expected: Option<ContentDigest>,
    ) -> Result<Committed<GroupDetail>, ServiceError> {
        let committed = self.store().transact(PrivacyControls::CATALOG, expected, |doc| {
            update_group_in(doc, id, request).map_err(ServiceError::from)
        })?;
        tracing::info!(group = id, "privacy group updated");
        Ok(committed)
    }

    pub fn delete_group(
        &self,
        id: &str,
        request: &GroupDelete,
        expected: Option<ContentDigest>,
    ) -> Result<Committed<GroupDeletion>, ServiceError> {
        let committed = self.store().transact(PrivacyControls::CATALOG, expected, |doc| {
            delete_group_in(doc, id, request).map_err(ServiceError::from)
        })?;
        tracing::info!(
            group = id,
            reassigned_to = ?committed.value.reassigned_to,
            removed = committed.value.removed_control_count,
            "privacy group deleted"
        );
        Ok(committed)
    }
}
