//! Deterministic assembly of per-type output.

use std::collections::BTreeMap;

/// Synthesized output keyed by type name.
///
/// Assembly always emits types in ordinal name order, whatever order they
/// were recorded in.
#[derive(Debug, Clone, Default)]
pub struct GeneratedUnits {
    units: BTreeMap<String, Vec<u8>>,
}

impl GeneratedUnits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the output of one type. Returns false if the name was already
    /// recorded, in which case the earlier output is kept.
    pub fn insert(&mut self, type_name: impl Into<String>, bytes: Vec<u8>) -> bool {
        match self.units.entry(type_name.into()) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(bytes);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Type names in output order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    /// Concatenate every unit in name order.
    pub fn assemble(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.units.values().map(Vec::len).sum());
        for bytes in self.units.values() {
            out.extend_from_slice(bytes);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assembles_in_name_order() {
        let mut units = GeneratedUnits::new();
        units.insert("b", b"B".to_vec());
        units.insert("A", b"A".to_vec());
        units.insert("a", b"a".to_vec());

        assert_eq!(units.names().collect::<Vec<_>>(), vec!["A", "a", "b"]);
        assert_eq!(units.assemble(), b"AaB");
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let names = ["Widget", "Gadget", "WidgetList", "Alpha"];

        let mut forward = GeneratedUnits::new();
        for name in names {
            forward.insert(name, format!("[{name}]").into_bytes());
        }
        let mut backward = GeneratedUnits::new();
        for name in names.iter().rev() {
            backward.insert(*name, format!("[{name}]").into_bytes());
        }

        assert_eq!(forward.assemble(), backward.assemble());
        assert_eq!(forward.assemble(), b"[Alpha][Gadget][Widget][WidgetList]");
    }

    #[test]
    fn test_duplicate_insert_keeps_first() {
        let mut units = GeneratedUnits::new();
        assert!(units.insert("Widget", b"first".to_vec()));
        assert!(!units.insert("Widget", b"second".to_vec()));
        assert_eq!(units.assemble(), b"first");
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn test_empty() {
        let units = GeneratedUnits::new();
        assert!(units.is_empty());
        assert!(units.assemble().is_empty());
    }
}
