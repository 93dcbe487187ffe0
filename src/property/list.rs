//! Named property lists.

use super::value::PropertyValue;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// Mapping from property name to value.
///
/// Keys are unique. Equality ignores insertion order; iteration and the
/// canonical [`Display`](fmt::Display) form are sorted by name so that
/// serialization is deterministic.
///
/// # Example
///
/// ```rust
/// use ringlet_kripke::property::{PropertyList, PropertyValue};
///
/// let mut first = PropertyList::new();
/// first.insert("doorOpen", PropertyValue::Bool(true));
/// first.insert("timeLeft", PropertyValue::Bool(false));
///
/// let mut second = PropertyList::new();
/// second.insert("timeLeft", PropertyValue::Bool(false));
/// second.insert("doorOpen", PropertyValue::Bool(true));
///
/// assert_eq!(first, second);
/// assert_eq!(first.canonical(), second.canonical());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyList {
    properties: BTreeMap<String, PropertyValue>,
}

impl PropertyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) -> Option<PropertyValue> {
        self.properties.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, PropertyValue> {
        self.properties.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Canonical string form used for fingerprints.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PropertyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (name, value)) in self.properties.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")
    }
}

impl FromIterator<(String, PropertyValue)> for PropertyList {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, PropertyValue)> for PropertyList {
    fn extend<I: IntoIterator<Item = (String, PropertyValue)>>(&mut self, iter: I) {
        self.properties.extend(iter);
    }
}

impl IntoIterator for PropertyList {
    type Item = (String, PropertyValue);
    type IntoIter = btree_map::IntoIter<String, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertyList {
    type Item = (&'a String, &'a PropertyValue);
    type IntoIter = btree_map::Iter<'a, String, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}
