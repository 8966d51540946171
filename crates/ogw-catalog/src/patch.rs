//! Helpers for partial-update request bodies.
//!
//! A nullable patch field has three states: absent (leave untouched),
//! `null` (clear), or a value (set). It is modelled as `Option<Option<T>>`
//! with [`nullable`] as the field deserializer and `#[serde(default)]`.

use serde::{Deserialize, Deserializer};

/// Deserialize a present field into `Some(_)`, keeping `null` as `Some(None)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Collapse a nullable string update: `None` is untouched, `Some(None)` and
/// blank strings clear, anything else sets.
pub(crate) fn normalize(update: &Option<Option<String>>) -> Option<Option<&str>> {
    update.as_ref().map(|value| {
        value
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    })
}
