//! # Resilience Controls
//!
//! Security baseline catalog. `domain` and `objective` are single-valued
//! props; the description is the prose of the part named `description`, or
//! of a part whose id ends in `-desc`.

use ogw_core::{NodeMut, NodeRef};
use ogw_store::RESILIENCE_BASELINE_CATALOG;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::variant::CatalogVariant;

const DOMAIN: &str = "domain";
const OBJECTIVE: &str = "objective";
const DESCRIPTION: &str = "description";

/// A resilience control. List views leave `description` empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SecurityControl {
    pub id: String,
    pub title: String,
    #[serde(rename = "class_")]
    pub class: Option<String>,
    pub domain: Option<String>,
    pub objective: Option<String>,
    pub description: Option<String>,
}

/// Body of `PUT /api/resilience/controls/:id`. Absent or `null` fields are
/// left untouched; a blank `domain`/`objective` removes the prop.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SecurityControlUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub objective: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Resilience catalog variant.
#[derive(Debug, Clone, Copy)]
pub struct ResilienceControls;

fn is_description(part: NodeRef<'_>) -> bool {
    part.name() == Some(DESCRIPTION) || part.id().is_some_and(|id| id.ends_with("-desc"))
}

fn project(id: &str, control: NodeRef<'_>, with_description: bool) -> SecurityControl {
    let description = if with_description {
        control
            .find_part_where(is_description)
            .and_then(|p| p.prose())
            .map(str::to_owned)
    } else {
        None
    };
    SecurityControl {
        id: id.to_string(),
        title: control.title().unwrap_or_default().to_string(),
        class: control.class().map(str::to_owned),
        domain: control.values_by_name(DOMAIN).pop(),
        objective: control.values_by_name(OBJECTIVE).pop(),
        description,
    }
}

fn apply_prop(control: &mut NodeMut<'_>, name: &str, value: Option<&str>) {
    match value {
        None => {}
        Some(v) if v.trim().is_empty() => {
            control.remove_props(name);
        }
        Some(v) => control.set_prop(name, v),
    }
}

impl CatalogVariant for ResilienceControls {
    const CATALOG: &'static str = RESILIENCE_BASELINE_CATALOG;

    type Summary = SecurityControl;
    type Detail = SecurityControl;
    type Patch = SecurityControlUpdate;

    fn summary(id: &str, _group_id: Option<&str>, control: NodeRef<'_>) -> SecurityControl {
        project(id, control, false)
    }

    fn detail(id: &str, _group_id: Option<&str>, control: NodeRef<'_>) -> SecurityControl {
        project(id, control, true)
    }

    fn apply(control: &mut NodeMut<'_>, patch: &SecurityControlUpdate) {
        if let Some(title) = &patch.title {
            control.set_text("title", title.as_str());
        }
        apply_prop(control, DOMAIN, patch.domain.as_deref());
        apply_prop(control, OBJECTIVE, patch.objective.as_deref());

        if let Some(description) = &patch.description {
            if let Some(mut part) = control.find_part_mut_where(is_description) {
                part.set_text("prose", description.as_str());
                return;
            }
            let id = format!("{}-desc", control.id().unwrap_or_default().to_lowercase());
            control
                .ensure_part_with_id(DESCRIPTION, id)
                .set_text("prose", description.as_str());
        }
    }

    fn summary_id(summary: &SecurityControl) -> &str {
        &summary.id
    }
}
