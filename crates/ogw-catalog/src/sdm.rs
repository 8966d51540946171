//! # SDM Controls
//!
//! Control view of the SDM privacy catalog (Standard-Datenschutzmodell).
//! Field map:
//!
//! | Field | Source |
//! |---|---|
//! | `sdmModule` | prop `sdm-module` (last one wins) |
//! | `sdmGoals` | props `sdm-goal`, de-duplicated |
//! | `dsgvoArticles` | props `dsgvo-article` and `legal-basis`, de-duplicated |
//! | `implementationLevel` | prop `implementation-level` |
//! | `dpRiskImpact` | prop `dp-risk-impact` |
//! | `relatedMappings` | props `related-mapping`; `class` is the scheme |

use ogw_core::{NodeMut, NodeRef};
use ogw_store::SDM_PRIVACY_CATALOG;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::patch::{normalize, nullable};
use crate::variant::CatalogVariant;

const RELATED_MAPPING: &str = "related-mapping";
const IMPLEMENTATION_LEVEL: &str = "implementation-level";
const DP_RISK_IMPACT: &str = "dp-risk-impact";

/// Scheme used for a related mapping whose prop carries no `class`.
pub const FALLBACK_SCHEME: &str = "other";

/// Reference from an SDM control to an external standard or catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RelatedMapping {
    /// Target scheme, e.g. `bsi`, `iso27001`, `iso27701`, `security`.
    pub scheme: String,
    pub value: String,
    #[serde(default)]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SdmSummaryProps {
    pub sdm_module: Option<String>,
    pub sdm_goals: Vec<String>,
    pub dsgvo_articles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SdmControlSummary {
    pub id: String,
    pub title: String,
    pub group_id: Option<String>,
    pub props: SdmSummaryProps,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SdmDetailProps {
    pub sdm_module: Option<String>,
    pub sdm_goals: Vec<String>,
    pub dsgvo_articles: Vec<String>,
    pub implementation_level: Option<String>,
    pub dp_risk_impact: Option<String>,
    pub related_mappings: Vec<RelatedMapping>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SdmControlDetail {
    pub id: String,
    pub title: String,
    #[serde(rename = "class_")]
    pub class: Option<String>,
    pub group_id: Option<String>,
    pub props: SdmDetailProps,
}

/// Body of `PUT /api/sdm/controls/:id`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SdmControlUpdate {
    #[serde(default)]
    pub props: SdmPropsUpdate,
}

/// Prop families an SDM update may touch. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SdmPropsUpdate {
    /// Replaces every `related-mapping` prop, in the given order.
    #[serde(default)]
    pub related_mappings: Option<Vec<RelatedMapping>>,
    /// `null` or blank clears the prop.
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub implementation_level: Option<Option<String>>,
    /// `null` or blank clears the prop.
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub dp_risk_impact: Option<Option<String>>,
}

/// SDM control catalog variant.
#[derive(Debug, Clone, Copy)]
pub struct SdmControls;

fn summary_props(control: NodeRef<'_>) -> SdmSummaryProps {
    SdmSummaryProps {
        sdm_module: control.values_by_name("sdm-module").pop(),
        sdm_goals: control.distinct_values(&["sdm-goal"]),
        dsgvo_articles: control.distinct_values(&["dsgvo-article", "legal-basis"]),
    }
}

fn related_mappings(control: NodeRef<'_>) -> Vec<RelatedMapping> {
    control
        .props()
        .filter(|p| p.name() == Some(RELATED_MAPPING))
        .map(|p| RelatedMapping {
            scheme: p.class().unwrap_or(FALLBACK_SCHEME).to_string(),
            value: p.text("value").unwrap_or_default(),
            remarks: p.remarks().map(str::to_owned),
        })
        .collect()
}

fn related_mapping_prop(mapping: &RelatedMapping) -> Map<String, Value> {
    let mut prop = Map::new();
    prop.insert("name".into(), Value::String(RELATED_MAPPING.into()));
    prop.insert("class".into(), Value::String(mapping.scheme.clone()));
    prop.insert("value".into(), Value::String(mapping.value.clone()));
    if let Some(remarks) = mapping.remarks.as_deref().filter(|r| !r.is_empty()) {
        prop.insert("remarks".into(), Value::String(remarks.to_string()));
    }
    prop
}

fn apply_single(control: &mut NodeMut<'_>, name: &str, update: &Option<Option<String>>) {
    match normalize(update) {
        None => {}
        Some(None) => {
            control.remove_props(name);
        }
        Some(Some(value)) => control.set_prop(name, value),
    }
}

impl CatalogVariant for SdmControls {
    const CATALOG: &'static str = SDM_PRIVACY_CATALOG;

    type Summary = SdmControlSummary;
    type Detail = SdmControlDetail;
    type Patch = SdmControlUpdate;

    fn summary(id: &str, group_id: Option<&str>, control: NodeRef<'_>) -> SdmControlSummary {
        SdmControlSummary {
            id: id.to_string(),
            title: control.title().unwrap_or_default().to_string(),
            group_id: group_id.map(str::to_owned),
            props: summary_props(control),
        }
    }

    fn detail(id: &str, group_id: Option<&str>, control: NodeRef<'_>) -> SdmControlDetail {
        let summary = summary_props(control);
        SdmControlDetail {
            id: id.to_string(),
            title: control.title().unwrap_or_default().to_string(),
            class: control.class().map(str::to_owned),
            group_id: group_id.map(str::to_owned),
            props: SdmDetailProps {
                sdm_module: summary.sdm_module,
                sdm_goals: summary.sdm_goals,
                dsgvo_articles: summary.dsgvo_articles,
                implementation_level: control.values_by_name(IMPLEMENTATION_LEVEL).pop(),
                dp_risk_impact: control.values_by_name(DP_RISK_IMPACT).pop(),
                related_mappings: related_mappings(control),
            },
        }
    }

    fn apply(control: &mut NodeMut<'_>, patch: &SdmControlUpdate) {
        let props = &patch.props;
        if let Some(mappings) = &props.related_mappings {
            control.replace_props(RELATED_MAPPING, mappings.iter().map(related_mapping_prop));
        }
        apply_single(control, IMPLEMENTATION_LEVEL, &props.implementation_level);
        apply_single(control, DP_RISK_IMPACT, &props.dp_risk_impact);
    }

    fn summary_id(summary: &SdmControlSummary) -> &str {
        &summary.id
    }
}
