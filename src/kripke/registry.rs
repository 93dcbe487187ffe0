//! Values observed per state id during one generation run.

use crate::property::{PropertyList, PropertyValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every distinct value observed for each property, in order of first
/// observation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRanges {
    values: BTreeMap<String, Vec<PropertyValue>>,
}

impl PropertyRanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every property of `properties`. Returns how many values were
    /// new.
    pub fn observe(&mut self, properties: &PropertyList) -> usize {
        let mut added = 0;
        for (name, value) in properties {
            let seen = self.values.entry(name.clone()).or_default();
            if !seen.contains(value) {
                seen.push(value.clone());
                added += 1;
            }
        }
        added
    }

    pub fn values(&self, name: &str) -> Option<&[PropertyValue]> {
        self.values.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Property ranges of every state reached during one generation run.
///
/// A state id is registered on its first sighting. Observations from every
/// branch accumulate on that single entry, so the ranges describe the state
/// machine-wide even though each branch executes its own copy of the state.
pub(crate) struct CanonicalRegistry {
    entries: BTreeMap<String, PropertyRanges>,
}

impl CanonicalRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register `id` if it has not been seen. Returns whether it was new.
    pub(crate) fn register(&mut self, id: &str) -> bool {
        if self.entries.contains_key(id) {
            return false;
        }
        self.entries.insert(id.to_string(), PropertyRanges::new());
        true
    }

    /// Record the properties observed in `id`. Unregistered ids are ignored.
    pub(crate) fn observe(&mut self, id: &str, properties: &PropertyList) {
        if let Some(ranges) = self.entries.get_mut(id) {
            ranges.observe(properties);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Discard the registry, keeping the observed ranges per state id.
    pub(crate) fn into_ranges(self) -> BTreeMap<String, PropertyRanges> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(value: u8) -> PropertyList {
        let mut list = PropertyList::new();
        list.insert("count", PropertyValue::UInt8(value));
        list
    }

    #[test]
    fn first_sighting_registers_once() {
        let mut registry = CanonicalRegistry::new();

        assert!(registry.register("Count"));
        assert!(!registry.register("Count"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn observations_accumulate_distinct_values() {
        let mut registry = CanonicalRegistry::new();
        registry.register("Count");

        registry.observe("Count", &count(0));
        registry.observe("Count", &count(1));
        registry.observe("Count", &count(0));

        let ranges = registry.into_ranges();
        assert_eq!(
            ranges["Count"].values("count"),
            Some(&[PropertyValue::UInt8(0), PropertyValue::UInt8(1)][..])
        );
    }

    #[test]
    fn unregistered_observations_are_ignored() {
        let mut registry = CanonicalRegistry::new();
        registry.observe("Ghost", &count(3));

        assert_eq!(registry.len(), 0);
        assert!(registry.into_ranges().is_empty());
    }

    #[test]
    fn registering_keeps_earlier_observations() {
        let mut registry = CanonicalRegistry::new();
        registry.register("Count");
        registry.observe("Count", &count(4));
        registry.register("Count");

        let ranges = registry.into_ranges();

        assert_eq!(ranges["Count"].names().collect::<Vec<_>>(), vec!["count"]);
    }

    #[test]
    fn observe_reports_new_values() {
        let mut ranges = PropertyRanges::new();

        assert_eq!(ranges.observe(&count(1)), 1);
        assert_eq!(ranges.observe(&count(1)), 0);
        assert_eq!(ranges.len(), 1);
    }
}
