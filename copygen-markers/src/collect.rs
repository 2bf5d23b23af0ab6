//! Marker snapshots for a single package or type.

use std::collections::BTreeMap;

use crate::MarkerValue;

/// Parsed markers attached to one package or type, keyed by marker name.
///
/// Some markers may legitimately appear more than once, so every occurrence
/// is kept in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerValues {
    values: BTreeMap<&'static str, Vec<MarkerValue>>,
}

impl MarkerValues {
    pub(crate) fn push(&mut self, name: &'static str, value: MarkerValue) {
        self.values.entry(name).or_default().push(value);
    }

    /// The first occurrence of a marker.
    pub fn get(&self, name: &str) -> Option<&MarkerValue> {
        self.all(name).first()
    }

    /// Every occurrence of a marker, in source order.
    pub fn all(&self, name: &str) -> &[MarkerValue] {
        self.values
            .iter()
            .find(|(n, _)| **n == name)
            .map(|(_, v)| v.as_slice())
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        !self.all(name).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Marker names present in this snapshot.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }
}
