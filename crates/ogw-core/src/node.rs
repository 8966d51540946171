//! # Node Views: Prop/Part Accessors
//!
//! Catalog controls, parts and props are all JSON objects with a loose set
//! of conventional keys (`id`, `name`, `value`, `class`, `prose`, `remarks`)
//! plus two repeatable child collections:
//!
//! - `props`: key/value attributes. `name` is not unique; several entries
//!   with the same name form a multi-valued attribute.
//! - `parts`: prose blocks, possibly nested (`typical-measures` holds
//!   `measure` children).
//!
//! [`NodeRef`] and [`NodeMut`] borrow one such object and expose typed
//! accessors without copying it into a fixed struct. Writes touch only the
//! keys they name; every other key, and the order of every untouched
//! array entry, survives a read-modify-write cycle unchanged.

use serde_json::{Map, Value};

/// Key of the repeatable key/value attribute collection.
pub const PROPS: &str = "props";
/// Key of the repeatable prose block collection.
pub const PARTS: &str = "parts";

/// Render a scalar JSON value as text.
///
/// Strings are returned as-is, numbers and booleans are stringified.
/// `null`, arrays and objects have no text form.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn is_named(value: &Value, name: &str) -> bool {
    value.get("name").and_then(Value::as_str) == Some(name)
}

/// The array stored under `key`, created empty when missing or not an array.
fn array_slot<'m>(map: &'m mut Map<String, Value>, key: &str) -> &'m mut Vec<Value> {
    let slot = map
        .entry(key.to_owned())
        .or_insert_with(|| Value::Array(Vec::new()));
    as_array_mut(slot)
}

/// `slot` as an array, replacing any other value with an empty one.
fn as_array_mut(slot: &mut Value) -> &mut Vec<Value> {
    match slot {
        Value::Array(items) => items,
        other => {
            *other = Value::Array(Vec::new());
            as_array_mut(other)
        }
    }
}

// ─── Read view ───────────────────────────────────────────────────────

/// Read-only view of one object node in a catalog document.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> NodeRef<'a> {
    /// Wrap an object map.
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// Wrap a value if it is an object.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self::new)
    }

    /// The underlying object.
    pub fn raw(&self) -> &'a Map<String, Value> {
        self.map
    }

    /// A string-typed field. Non-string values are treated as absent.
    pub fn str_field(&self, key: &str) -> Option<&'a str> {
        self.map.get(key).and_then(Value::as_str)
    }

    /// A scalar field rendered as text (see [`scalar_text`]).
    pub fn text(&self, key: &str) -> Option<String> {
        self.map.get(key).and_then(scalar_text)
    }

    pub fn id(&self) -> Option<&'a str> {
        self.str_field("id")
    }

    pub fn name(&self) -> Option<&'a str> {
        self.str_field("name")
    }

    pub fn title(&self) -> Option<&'a str> {
        self.str_field("title")
    }

    pub fn class(&self) -> Option<&'a str> {
        self.str_field("class")
    }

    pub fn prose(&self) -> Option<&'a str> {
        self.str_field("prose")
    }

    pub fn remarks(&self) -> Option<&'a str> {
        self.str_field("remarks")
    }

    /// Object entries of the array stored under `key`, in document order.
    /// Non-object entries are skipped; a missing or non-array key yields nothing.
    pub fn children(&self, key: &str) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.map
            .get(key)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(NodeRef::from_value)
    }

    pub fn props(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.children(PROPS)
    }

    pub fn parts(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.children(PARTS)
    }

    /// Every value of the props named `name`, in document order.
    /// Props without a value are skipped.
    pub fn values_by_name(&self, name: &str) -> Vec<String> {
        self.props()
            .filter(|p| p.name() == Some(name))
            .filter_map(|p| p.text("value"))
            .collect()
    }

    /// The first value of the props named `name`.
    pub fn first_value_by_name(&self, name: &str) -> Option<String> {
        self.props()
            .filter(|p| p.name() == Some(name))
            .find_map(|p| p.text("value"))
    }

    /// Values of all props whose name is one of `names`, de-duplicated in
    /// first-seen order. Empty values are dropped.
    pub fn distinct_values(&self, names: &[&str]) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for prop in self.props() {
            if !prop.name().is_some_and(|n| names.contains(&n)) {
                continue;
            }
            if let Some(value) = prop.text("value") {
                if !value.is_empty() && !out.contains(&value) {
                    out.push(value);
                }
            }
        }
        out
    }

    /// First direct child part named `name`.
    pub fn find_part(&self, name: &str) -> Option<NodeRef<'a>> {
        self.parts().find(|p| p.name() == Some(name))
    }

    /// First direct child part matching `pred`.
    pub fn find_part_where(&self, pred: impl Fn(NodeRef<'a>) -> bool) -> Option<NodeRef<'a>> {
        self.parts().find(|p| pred(*p))
    }

    /// Non-empty prose of the direct child parts, in document order.
    pub fn child_prose(&self) -> Vec<String> {
        self.parts()
            .filter_map(|p| p.prose())
            .filter(|prose| !prose.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

// ─── Write view ──────────────────────────────────────────────────────

/// Mutable view of one object node in a catalog document.
#[derive(Debug)]
pub struct NodeMut<'a> {
    map: &'a mut Map<String, Value>,
}

impl<'a> NodeMut<'a> {
    /// Wrap an object map.
    pub fn new(map: &'a mut Map<String, Value>) -> Self {
        Self { map }
    }

    /// Wrap a value if it is an object.
    pub fn from_value(value: &'a mut Value) -> Option<Self> {
        value.as_object_mut().map(Self::new)
    }

    /// Wrap an array slot, replacing a non-object entry with an empty object.
    fn coerce(slot: &'a mut Value) -> Self {
        match slot {
            Value::Object(map) => Self { map },
            other => {
                *other = Value::Object(Map::new());
                Self::coerce(other)
            }
        }
    }

    /// Read view of the same node.
    pub fn as_ref(&self) -> NodeRef<'_> {
        NodeRef::new(self.map)
    }

    pub fn id(&self) -> Option<&str> {
        self.map.get("id").and_then(Value::as_str)
    }

    /// Set a string field, keeping its position if it already exists.
    pub fn set_text(&mut self, key: &str, value: impl Into<String>) {
        self.map.insert(key.to_owned(), Value::String(value.into()));
    }

    /// Remove a field, preserving the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.map.shift_remove(key)
    }

    /// The array stored under `key`, created empty when missing.
    /// A non-array value under `key` is replaced by an empty array.
    pub fn children_mut(&mut self, key: &str) -> &mut Vec<Value> {
        array_slot(self.map, key)
    }

    /// Like [`NodeMut::children_mut`], consuming the view so the array
    /// borrow outlives it.
    pub fn into_children_mut(self, key: &str) -> &'a mut Vec<Value> {
        array_slot(self.map, key)
    }

    /// Replace the whole array stored under `key`.
    pub fn set_children(&mut self, key: &str, items: Vec<Value>) {
        self.map.insert(key.to_owned(), Value::Array(items));
    }

    /// Set a single-valued prop.
    ///
    /// The first prop named `name` is edited in place and any further
    /// duplicates are dropped; if none exists a new prop is appended.
    pub fn set_prop(&mut self, name: &str, value: &str) {
        let props = self.children_mut(PROPS);
        let mut seen = false;
        props.retain_mut(|prop| {
            if !is_named(prop, name) {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            if let Some(obj) = prop.as_object_mut() {
                obj.insert("value".to_owned(), Value::String(value.to_owned()));
            }
            true
        });
        if !seen {
            let mut prop = Map::new();
            prop.insert("name".to_owned(), Value::String(name.to_owned()));
            prop.insert("value".to_owned(), Value::String(value.to_owned()));
            props.push(Value::Object(prop));
        }
    }

    /// Remove every prop named `name`. Returns how many were removed.
    pub fn remove_props(&mut self, name: &str) -> usize {
        let Some(props) = self.map.get_mut(PROPS).and_then(Value::as_array_mut) else {
            return 0;
        };
        let before = props.len();
        props.retain(|prop| !is_named(prop, name));
        before - props.len()
    }

    /// Replace the whole family of props named `name`: existing entries are
    /// removed and `entries` are appended in the given order. Props with
    /// other names keep their relative order.
    pub fn replace_props(&mut self, name: &str, entries: impl IntoIterator<Item = Map<String, Value>>) {
        let props = self.children_mut(PROPS);
        props.retain(|prop| !is_named(prop, name));
        props.extend(entries.into_iter().map(Value::Object));
    }

    /// First direct child part named `name`.
    pub fn find_part_mut(&mut self, name: &str) -> Option<NodeMut<'_>> {
        self.find_part_mut_where(|p| p.name() == Some(name))
    }

    /// First direct child part matching `pred`.
    pub fn find_part_mut_where(&mut self, pred: impl Fn(NodeRef<'_>) -> bool) -> Option<NodeMut<'_>> {
        self.map
            .get_mut(PARTS)?
            .as_array_mut()?
            .iter_mut()
            .filter_map(Value::as_object_mut)
            .find(|p| pred(NodeRef::new(&**p)))
            .map(NodeMut::new)
    }

    /// Remove every direct child part matching `pred`. Returns how many were removed.
    pub fn remove_parts_where(&mut self, pred: impl Fn(NodeRef<'_>) -> bool) -> usize {
        let Some(parts) = self.map.get_mut(PARTS).and_then(Value::as_array_mut) else {
            return 0;
        };
        let before = parts.len();
        parts.retain(|p| !NodeRef::from_value(p).is_some_and(&pred));
        before - parts.len()
    }

    /// Find the child part named `name`, or append `{id: "<self.id>-<name>", name}`.
    ///
    /// Calling this repeatedly with the same name never creates a duplicate.
    pub fn ensure_part(&mut self, name: &str) -> NodeMut<'_> {
        let id = format!("{}-{}", self.id().unwrap_or_default(), name);
        self.ensure_part_with_id(name, id)
    }

    /// Like [`NodeMut::ensure_part`] with an explicit id for a created part.
    pub fn ensure_part_with_id(&mut self, name: &str, id: impl Into<String>) -> NodeMut<'_> {
        let parts = self.children_mut(PARTS);
        let index = match parts.iter().position(|p| p.is_object() && is_named(p, name)) {
            Some(index) => index,
            None => {
                let mut part = Map::new();
                part.insert("id".to_owned(), Value::String(id.into()));
                part.insert("name".to_owned(), Value::String(name.to_owned()));
                parts.push(Value::Object(part));
                parts.len() - 1
            }
        };
        NodeMut::coerce(&mut parts[index])
    }
}
