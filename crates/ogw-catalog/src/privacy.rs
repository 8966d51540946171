//! # Privacy Controls
//!
//! Risk-annotated privacy (TOM) catalog. Props carry classification
//! (`tom-id`, `dsgvo-article`, `dp-goal`); prose lives in parts:
//!
//! ```text
//! statement
//! maturity-hints
//!   maturity-level-1 / maturity-level-3 / maturity-level-5
//! typical-measures
//!   measure*
//! assessment-questions
//!   question*
//! risk-hint
//! ```
//!
//! Older files keep the maturity levels as top-level parts. Reads fall back
//! to those; writes always go below `maturity-hints`.

use ogw_core::{NodeMut, NodeRef, PARTS};
use ogw_store::OPEN_PRIVACY_CATALOG_RISK;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::variant::CatalogVariant;

const STATEMENT: &str = "statement";
const MATURITY_HINTS: &str = "maturity-hints";
const TYPICAL_MEASURES: &str = "typical-measures";
const ASSESSMENT_QUESTIONS: &str = "assessment-questions";
const RISK_HINT: &str = "risk-hint";
const MATURITY_LEVELS: [u8; 3] = [1, 3, 5];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PrivacyControlSummary {
    pub id: String,
    pub title: String,
    pub group_id: Option<String>,
    pub tom_id: Option<String>,
    pub dsgvo_articles: Vec<String>,
    pub dp_goals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PrivacyControlDetail {
    pub id: String,
    pub title: String,
    pub group_id: Option<String>,
    pub tom_id: Option<String>,
    pub dsgvo_articles: Vec<String>,
    pub dp_goals: Vec<String>,
    pub statement: Option<String>,
    pub maturity_level_1: Option<String>,
    pub maturity_level_3: Option<String>,
    pub maturity_level_5: Option<String>,
    pub typical_measures: Vec<String>,
    pub assessment_questions: Vec<String>,
    pub risk_hint: Option<String>,
}

/// Body of `PUT /api/privacy/controls/:id`: the editable part of the detail
/// view. Every text field is written; a missing one becomes `""`. The
/// measure and question lists replace the existing entries.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct PrivacyControlUpdate {
    pub title: String,
    pub statement: Option<String>,
    pub maturity_level_1: Option<String>,
    pub maturity_level_3: Option<String>,
    pub maturity_level_5: Option<String>,
    pub typical_measures: Vec<String>,
    pub assessment_questions: Vec<String>,
    pub risk_hint: Option<String>,
}

impl PrivacyControlUpdate {
    fn maturity_level(&self, level: u8) -> Option<&str> {
        match level {
            1 => self.maturity_level_1.as_deref(),
            3 => self.maturity_level_3.as_deref(),
            _ => self.maturity_level_5.as_deref(),
        }
    }
}

/// Privacy catalog variant.
#[derive(Debug, Clone, Copy)]
pub struct PrivacyControls;

fn maturity_part_name(level: u8) -> String {
    format!("maturity-level-{level}")
}

fn part_prose(control: NodeRef<'_>, name: &str) -> Option<String> {
    control
        .find_part(name)
        .and_then(|p| p.prose())
        .map(str::to_owned)
}

fn maturity_prose(control: NodeRef<'_>, level: u8) -> Option<String> {
    let name = maturity_part_name(level);
    control
        .find_part(MATURITY_HINTS)
        .and_then(|hints| part_prose(hints, &name))
        .or_else(|| part_prose(control, &name))
}

fn child_list(control: NodeRef<'_>, name: &str) -> Vec<String> {
    control
        .find_part(name)
        .map(|p| p.child_prose())
        .unwrap_or_default()
}

/// Numbered child parts for a replaced list. Blank entries are dropped
/// before numbering; kept entries are trimmed.
fn numbered_parts(owner_id: &str, slug: &str, child_name: &str, entries: &[String]) -> Vec<Value> {
    entries
        .iter()
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .enumerate()
        .map(|(index, text)| {
            let mut part = Map::new();
            part.insert(
                "id".into(),
                Value::String(format!("{owner_id}-{slug}-{}", index + 1)),
            );
            part.insert("name".into(), Value::String(child_name.into()));
            part.insert("prose".into(), Value::String(text.into()));
            Value::Object(part)
        })
        .collect()
}

fn set_part_prose(control: &mut NodeMut<'_>, name: &str, prose: Option<&str>) {
    control
        .ensure_part(name)
        .set_text("prose", prose.unwrap_or_default());
}

impl CatalogVariant for PrivacyControls {
    const CATALOG: &'static str = OPEN_PRIVACY_CATALOG_RISK;

    type Summary = PrivacyControlSummary;
    type Detail = PrivacyControlDetail;
    type Patch = PrivacyControlUpdate;

    fn summary(id: &str, group_id: Option<&str>, control: NodeRef<'_>) -> PrivacyControlSummary {
        PrivacyControlSummary {
            id: id.to_string(),
            title: control.title().unwrap_or_default().to_string(),
            group_id: group_id.map(str::to_owned),
            tom_id: control.first_value_by_name("tom-id"),
            dsgvo_articles: control.values_by_name("dsgvo-article"),
            dp_goals: control.values_by_name("dp-goal"),
        }
    }

    fn detail(id: &str, group_id: Option<&str>, control: NodeRef<'_>) -> PrivacyControlDetail {
        let summary = Self::summary(id, group_id, control);
        PrivacyControlDetail {
            id: summary.id,
            title: summary.title,
            group_id: summary.group_id,
            tom_id: summary.tom_id,
            dsgvo_articles: summary.dsgvo_articles,
            dp_goals: summary.dp_goals,
            statement: part_prose(control, STATEMENT),
            maturity_level_1: maturity_prose(control, 1),
            maturity_level_3: maturity_prose(control, 3),
            maturity_level_5: maturity_prose(control, 5),
            typical_measures: child_list(control, TYPICAL_MEASURES),
            assessment_questions: child_list(control, ASSESSMENT_QUESTIONS),
            risk_hint: part_prose(control, RISK_HINT),
        }
    }

    fn apply(control: &mut NodeMut<'_>, patch: &PrivacyControlUpdate) {
        let id = control.id().unwrap_or_default().to_string();
        control.set_text("title", patch.title.as_str());

        set_part_prose(control, STATEMENT, patch.statement.as_deref());

        {
            let mut hints = control.ensure_part(MATURITY_HINTS);
            for level in MATURITY_LEVELS {
                set_part_prose(&mut hints, &maturity_part_name(level), patch.maturity_level(level));
            }
        }

        let measures = numbered_parts(&id, "typical-measure", "measure", &patch.typical_measures);
        control
            .ensure_part(TYPICAL_MEASURES)
            .set_children(PARTS, measures);

        let questions = numbered_parts(
            &id,
            "assessment-question",
            "question",
            &patch.assessment_questions,
        );
        control
            .ensure_part(ASSESSMENT_QUESTIONS)
            .set_children(PARTS, questions);

        set_part_prose(control, RISK_HINT, patch.risk_hint.as_deref());
    }

    fn summary_id(summary: &PrivacyControlSummary) -> &str {
        &summary.id
    }

    fn sort_prefix(summary: &PrivacyControlSummary) -> Option<&str> {
        summary.tom_id.as_deref()
    }
}
