//! Flat form values ↔ nested request objects.
//!
//! Form layers report field values keyed by comma-joined paths
//! (`"items,0,name"`), while request layers want nested objects
//! (`{"items": [{"name": ...}]}`). [`unflatten`] and [`flatten`] convert between
//! the two; [`filter_empty`] drops blank fields before a request is built.
//!
//! # Path Rules
//!
//! - Keys are split on [`FIELD_DELIMITER`].
//! - The first segment is always an object key, even if it looks numeric.
//! - Any later segment made only of ASCII digits, up to [`MAX_INDEX`], is an
//!   array index; the slot that precedes it becomes an array.
//! - Whether a slot is an array or an object is decided while the path is
//!   walked, never guessed afterwards, so an empty object stays an object.
//! - Conflicting shapes fall back to objects: an index arriving at a slot that
//!   already holds an object is used as an object key, and a name arriving at a
//!   slot that already holds an array turns that array into an object keyed by
//!   its indices.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Separator between path segments in flat form keys.
pub const FIELD_DELIMITER: char = ',';

/// Largest segment still read as an array index. Larger numbers are object keys.
pub const MAX_INDEX: usize = 10_000;

/// Form values keyed by field name or comma-joined path.
pub type FormValues = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

impl<'a> Segment<'a> {
    fn parse_path(key: &'a str) -> Vec<Self> {
        key.split(FIELD_DELIMITER)
            .enumerate()
            .map(|(position, part)| {
                if position == 0 {
                    return Self::Key(part);
                }
                parse_index(part).map_or(Self::Key(part), Self::Index)
            })
            .collect()
    }
}

fn parse_index(part: &str) -> Option<usize> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok().filter(|index| *index <= MAX_INDEX)
}

/// Intermediate tree built while walking flat keys.
#[derive(Debug)]
enum Node {
    /// Slot created on the way down that has not been given a shape yet.
    Vacant,
    Leaf(Value),
    Map(BTreeMap<String, Node>),
    Seq(BTreeMap<usize, Node>),
}

impl Node {
    /// Returns the child slot addressed by `segment`, shaping `self` as needed.
    fn child_mut(&mut self, segment: Segment<'_>) -> &mut Self {
        match &mut *self {
            Self::Vacant | Self::Leaf(_) => {
                *self = match segment {
                    Segment::Key(_) => Self::Map(BTreeMap::new()),
                    Segment::Index(_) => Self::Seq(BTreeMap::new()),
                };
            }
            Self::Seq(items) if matches!(segment, Segment::Key(_)) => {
                let fields = std::mem::take(items)
                    .into_iter()
                    .map(|(index, node)| (index.to_string(), node))
                    .collect();
                *self = Self::Map(fields);
            }
            Self::Map(_) | Self::Seq(_) => {}
        }

        match (self, segment) {
            (Self::Map(fields), Segment::Key(key)) => {
                fields.entry(key.to_string()).or_insert(Self::Vacant)
            }
            (Self::Map(fields), Segment::Index(index)) => {
                fields.entry(index.to_string()).or_insert(Self::Vacant)
            }
            (Self::Seq(items), Segment::Index(index)) => items.entry(index).or_insert(Self::Vacant),
            (node, _) => node,
        }
    }

    fn assign(&mut self, path: &[Segment<'_>], value: Value) {
        match path.split_first() {
            None => *self = Self::Leaf(value),
            Some((head, tail)) => self.child_mut(*head).assign(tail, value),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Self::Vacant => Value::Null,
            Self::Leaf(value) => value,
            Self::Map(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(key, node)| (key, node.into_value()))
                    .collect(),
            ),
            Self::Seq(items) => {
                let len = items.keys().next_back().map_or(0, |last| last + 1);
                let mut array = vec![Value::Null; len];
                for (index, node) in items {
                    array[index] = node.into_value();
                }
                Value::Array(array)
            }
        }
    }
}

/// Converts flat, comma-keyed form values into a nested object.
///
/// The input is left untouched; values are cloned into the result.
///
/// # Example
///
/// ```rust
/// use protable::form::unflatten;
/// use serde_json::json;
///
/// let flat = json!({ "items,0,name": "X", "items,1,name": "Y", "keyword": "abc" });
/// let nested = unflatten(flat.as_object().unwrap());
///
/// assert_eq!(
///     serde_json::Value::Object(nested),
///     json!({ "items": [{ "name": "X" }, { "name": "Y" }], "keyword": "abc" })
/// );
/// ```
#[must_use]
pub fn unflatten(flat: &FormValues) -> FormValues {
    let _span = tracing::debug_span!("unflatten", field_count = flat.len()).entered();

    let mut root = Node::Map(BTreeMap::new());
    for (key, value) in flat {
        let path = Segment::parse_path(key);
        root.assign(&path, value.clone());
    }

    match root.into_value() {
        Value::Object(nested) => nested,
        _ => Map::new(),
    }
}

/// Converts a nested object into flat, comma-keyed form values.
///
/// Inverse of [`unflatten`]. Scalars, empty arrays and empty objects become
/// values at their path; array holes come back as `null`. Keys that themselves
/// contain the delimiter cannot be told apart from nested paths.
#[must_use]
pub fn flatten(nested: &FormValues) -> FormValues {
    let mut flat = Map::new();
    for (key, value) in nested {
        flatten_into(&mut flat, key.clone(), value);
    }
    flat
}

fn flatten_into(flat: &mut FormValues, path: String, value: &Value) {
    match value {
        Value::Object(fields) if !fields.is_empty() => {
            for (key, child) in fields {
                flatten_into(flat, format!("{path}{FIELD_DELIMITER}{key}"), child);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(flat, format!("{path}{FIELD_DELIMITER}{index}"), child);
            }
        }
        _ => {
            flat.insert(path, value.clone());
        }
    }
}

/// Returns a copy of `data` without fields that are blank.
///
/// Blank means an empty string or `null`. `0`, `false`, `[]` and `{}` are kept.
#[must_use]
pub fn filter_empty(data: &FormValues) -> FormValues {
    data.iter()
        .filter(|(_, value)| !is_blank(value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Returns `true` for values a form treats as "not filled in".
#[must_use]
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
