//! # SDM TOM Controls
//!
//! Editorial view of the SDM privacy catalog: technical and organisational
//! measures grouped by SDM module, with free-text description and
//! implementation hints kept in parts.

use ogw_core::{NodeMut, NodeRef};
use ogw_store::SDM_PRIVACY_CATALOG;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::variant::CatalogVariant;

const DESCRIPTION: &str = "description";
const IMPLEMENTATION_HINTS: &str = "implementation-hints";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SdmTomControlSummary {
    pub id: String,
    pub title: String,
    pub sdm_module: Option<String>,
    pub sdm_goals: Vec<String>,
    pub dsgvo_articles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SdmTomControlDetail {
    pub id: String,
    pub title: String,
    pub sdm_module: Option<String>,
    pub sdm_goals: Vec<String>,
    pub dsgvo_articles: Vec<String>,
    pub description: Option<String>,
    pub implementation_hints: Option<String>,
}

/// Body of `PUT /api/sdm-catalog/controls/:id`. All three fields are
/// written; a missing text becomes `""`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SdmTomControlUpdate {
    pub title: String,
    pub description: Option<String>,
    pub implementation_hints: Option<String>,
}

/// SDM TOM catalog variant.
#[derive(Debug, Clone, Copy)]
pub struct SdmTomControls;

fn part_prose(control: NodeRef<'_>, name: &str) -> Option<String> {
    control
        .find_part(name)
        .and_then(|p| p.prose())
        .map(str::to_owned)
}

impl CatalogVariant for SdmTomControls {
    const CATALOG: &'static str = SDM_PRIVACY_CATALOG;

    type Summary = SdmTomControlSummary;
    type Detail = SdmTomControlDetail;
    type Patch = SdmTomControlUpdate;

    fn summary(id: &str, _group_id: Option<&str>, control: NodeRef<'_>) -> SdmTomControlSummary {
        SdmTomControlSummary {
            id: id.to_string(),
            title: control.title().unwrap_or_default().to_string(),
            sdm_module: control.first_value_by_name("sdm-module"),
            sdm_goals: control.values_by_name("sdm-goal"),
            dsgvo_articles: control.values_by_name("dsgvo-article"),
        }
    }

    fn detail(id: &str, group_id: Option<&str>, control: NodeRef<'_>) -> SdmTomControlDetail {
        let summary = Self::summary(id, group_id, control);
        SdmTomControlDetail {
            id: summary.id,
            title: summary.title,
            sdm_module: summary.sdm_module,
            sdm_goals: summary.sdm_goals,
            dsgvo_articles: summary.dsgvo_articles,
            description: part_prose(control, DESCRIPTION),
            implementation_hints: part_prose(control, IMPLEMENTATION_HINTS),
        }
    }

    fn apply(control: &mut NodeMut<'_>, patch: &SdmTomControlUpdate) {
        control.set_text("title", patch.title.as_str());
        control
            .ensure_part(DESCRIPTION)
            .set_text("prose", patch.description.as_deref().unwrap_or_default());
        control
            .ensure_part(IMPLEMENTATION_HINTS)
            .set_text("prose", patch.implementation_hints.as_deref().unwrap_or_default());
    }

    fn summary_id(summary: &SdmTomControlSummary) -> &str {
        &summary.id
    }

    fn sort_prefix(summary: &SdmTomControlSummary) -> Option<&str> {
        summary.sdm_module.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{get_in, list_in, update_in};
    use serde_json::{json, Value};

    fn catalog() -> Value {
        json!({"catalog": {"groups": [
            {"id": "sdm-del", "controls": [
                {
                    "id": "SDM-TOM-DEL-01-03",
                    "title": "Löschfristen",
                    "props": [
                        {"name": "sdm-module", "value": "DEL"},
                        {"name": "dsgvo-article", "value": "17"},
                        {"name": "sdm-goal", "value": "integrity"},
                        {"name": "sdm-goal", "value": "integrity"}
                    ],
                    "parts": [
                        {"name": "description", "prose": "Fristen festlegen."}
                    ]
                }
            ]},
            {"id": "sdm-dok", "controls": [
                {"id": "SDM-TOM-DOK-01", "props": [{"name": "sdm-module", "value": "DOK"}]},
                {"id": "SDM-TOM-AAA", "title": "Ohne Modul"}
            ]}
        ]}})
    }

    #[test]
    fn list_sorts_by_module_then_id() {
        let items = list_in::<SdmTomControls>(&catalog());
        let ids: Vec<_> = items.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["SDM-TOM-AAA", "SDM-TOM-DEL-01-03", "SDM-TOM-DOK-01"]);
        assert_eq!(items[1].sdm_goals, vec!["integrity", "integrity"]);
        assert_eq!(items[2].title, "");
    }

    #[test]
    fn detail_reads_parts() {
        let detail = get_in::<SdmTomControls>(&catalog(), "SDM-TOM-DEL-01-03").unwrap();
        assert_eq!(detail.description.as_deref(), Some("Fristen festlegen."));
        assert_eq!(detail.implementation_hints, None);
        assert_eq!(detail.sdm_module.as_deref(), Some("DEL"));
    }

    #[test]
    fn update_writes_title_and_both_parts() {
        let mut doc = catalog();
        let patch = SdmTomControlUpdate {
            title: "Löschfristen definieren".into(),
            description: None,
            implementation_hints: Some("Automatisieren.".into()),
        };
        let detail = update_in::<SdmTomControls>(&mut doc, "SDM-TOM-DEL-01-03", &patch).unwrap();
        assert_eq!(detail.title, "Löschfristen definieren");
        assert_eq!(detail.description.as_deref(), Some(""));
        assert_eq!(detail.implementation_hints.as_deref(), Some("Automatisieren."));

        let parts = &doc["catalog"]["groups"][0]["controls"][0]["parts"];
        assert_eq!(parts.as_array().unwrap().len(), 2);
        assert_eq!(
            parts[1],
            json!({
                "id": "SDM-TOM-DEL-01-03-implementation-hints",
                "name": "implementation-hints",
                "prose": "Automatisieren."
            })
        );
        // Props are untouched.
        assert_eq!(
            doc["catalog"]["groups"][0]["controls"][0]["props"].as_array().unwrap().len(),
            4
        );
    }
}
