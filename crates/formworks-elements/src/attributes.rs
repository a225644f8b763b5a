//! Attribute values and the per-instance attribute bag.
//!
//! Each placed field carries a kind-specific bag of attributes (label,
//! helper text, option list, ...). The bag is an ordered map so that a
//! serialized document is byte-for-byte deterministic.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single attribute value.
///
/// The untagged representation keeps stored documents plain JSON:
/// `{"label": "Text field", "required": false, "options": []}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A boolean flag (e.g. `required`).
    Bool(bool),
    /// An integer quantity (e.g. spacer `height`, textarea `rows`).
    Integer(i64),
    /// A text value (labels, helper text, placeholders).
    Text(String),
    /// A list of text values (select `options`).
    TextList(Vec<String>),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::TextList(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(v: Vec<String>) -> Self {
        Self::TextList(v)
    }
}

/// The ordered attribute bag of one field instance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap(BTreeMap<String, AttributeValue>);

impl AttributeMap {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an attribute, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder-style insert for constructing default bags.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the raw value of an attribute.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    /// Returns a text attribute, or `None` when absent or not text.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(AttributeValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns a boolean attribute, or `None` when absent or not a bool.
    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.0.get(name) {
            Some(AttributeValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Returns an integer attribute, or `None` when absent or not an integer.
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.0.get(name) {
            Some(AttributeValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// Returns a text-list attribute, or `None` when absent or not a list.
    pub fn text_list(&self, name: &str) -> Option<&[String]> {
        match self.0.get(name) {
            Some(AttributeValue::TextList(items)) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` when the attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Iterates attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of attributes in the bag.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the bag has no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = (&'a String, &'a AttributeValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
