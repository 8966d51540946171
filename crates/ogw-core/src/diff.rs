//! # Structural Diff
//!
//! Deep comparison of two JSON snapshots of a catalog. Every difference is
//! reported under a JSON Pointer path (RFC 6901, the root is `""`):
//!
//! - Object keys are compared by name, visited in sorted order, so key
//!   order never produces a change.
//! - Arrays are compared index by index. An appended element shows up as
//!   `added` at the next index; a reorder shows up as `changed` entries at
//!   the affected indices.
//! - A subtree present on one side only is one `added`/`removed` entry
//!   carrying the whole subtree, not one entry per leaf.
//! - A type change (e.g. string to object) is a single `changed` entry.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Kind of a single structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Changed,
    Removed,
}

/// One difference between two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiffChange {
    /// JSON Pointer to the changed location.
    pub path: String,
    pub change: ChangeKind,
    /// Value before the change; absent for `added`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<Value>,
    /// Value after the change; absent for `removed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<Value>,
}

/// Change counts by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DiffSummary {
    pub added: usize,
    pub changed: usize,
    pub removed: usize,
}

/// Result of comparing two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiffResult {
    pub summary: DiffSummary,
    pub details: Vec<DiffChange>,
}

impl DiffResult {
    /// Build a result from its details, deriving the summary counts.
    pub fn from_details(details: Vec<DiffChange>) -> Self {
        let mut summary = DiffSummary::default();
        for change in &details {
            match change.change {
                ChangeKind::Added => summary.added += 1,
                ChangeKind::Changed => summary.changed += 1,
                ChangeKind::Removed => summary.removed += 1,
            }
        }
        Self { summary, details }
    }

    /// Whether the snapshots were structurally equal.
    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }
}

/// Compare two document trees.
pub fn diff_json(old: &Value, new: &Value) -> DiffResult {
    let mut details = Vec::new();
    walk(String::new(), old, new, &mut details);
    DiffResult::from_details(details)
}

/// Compare two document texts. Fails if either side is not valid JSON.
pub fn diff_texts(old: &str, new: &str) -> Result<DiffResult, serde_json::Error> {
    let old: Value = serde_json::from_str(old)?;
    let new: Value = serde_json::from_str(new)?;
    Ok(diff_json(&old, &new))
}

/// Escape one pointer segment (`~` → `~0`, `/` → `~1`).
fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

fn walk(path: String, old: &Value, new: &Value, out: &mut Vec<DiffChange>) {
    match (old, new) {
        (Value::Object(a), Value::Object(b)) => {
            let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
            for key in keys {
                let child = format!("{path}/{}", escape_segment(key));
                match (a.get(key.as_str()), b.get(key.as_str())) {
                    (Some(o), Some(n)) => walk(child, o, n, out),
                    (Some(o), None) => out.push(removed(child, o)),
                    (None, Some(n)) => out.push(added(child, n)),
                    (None, None) => {}
                }
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            for index in 0..a.len().max(b.len()) {
                let child = format!("{path}/{index}");
                match (a.get(index), b.get(index)) {
                    (Some(o), Some(n)) => walk(child, o, n, out),
                    (Some(o), None) => out.push(removed(child, o)),
                    (None, Some(n)) => out.push(added(child, n)),
                    (None, None) => {}
                }
            }
        }
        _ if old == new => {}
        _ => out.push(DiffChange {
            path,
            change: ChangeKind::Changed,
            old: Some(old.clone()),
            new: Some(new.clone()),
        }),
    }
}

fn added(path: String, value: &Value) -> DiffChange {
    DiffChange {
        path,
        change: ChangeKind::Added,
        old: None,
        new: Some(value.clone()),
    }
}

fn removed(path: String, value: &Value) -> DiffChange {
    DiffChange {
        path,
        change: ChangeKind::Removed,
        old: Some(value.clone()),
        new: None,
    }
}
