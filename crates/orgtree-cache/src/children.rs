//! Fetched child lists.
//!
//! An entry for a parent means its children have been fully fetched from the data
//! source, even when the list is empty. Absence means "not fetched yet". Entries are
//! memoized for the lifetime of the session and never replaced.

use std::collections::{HashMap, hash_map::Entry};

use crate::NodeId;

/// Mapping from parent identifier to its ordered, fetched child identifiers.
#[derive(Debug, Default, Clone)]
pub struct ChildCache {
    /// Child lists in the order the data source returned them.
    entries: HashMap<NodeId, Vec<NodeId>>,
}

impl ChildCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the child list for `parent`.
    ///
    /// Returns `false` without touching the existing entry if one is present.
    pub fn set(&mut self, parent: NodeId, children: Vec<NodeId>) -> bool {
        match self.entries.entry(parent) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(children);
                true
            }
        }
    }

    /// Returns the cached children of `parent`, if fetched.
    pub fn get(&self, parent: &str) -> Option<&[NodeId]> {
        self.entries.get(parent).map(Vec::as_slice)
    }

    /// Returns true if the children of `parent` have been fetched.
    pub fn contains(&self, parent: &str) -> bool {
        self.entries.contains_key(parent)
    }

    /// Number of parents with a cached child list.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been fetched.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<NodeId> {
        raw.iter().map(|id| NodeId::from(*id)).collect()
    }

    #[test]
    fn empty_entry_counts_as_fetched() {
        let mut cache = ChildCache::new();
        assert!(!cache.contains("3"));
        assert!(cache.set(NodeId::from("3"), Vec::new()));
        assert!(cache.contains("3"));
        assert_eq!(cache.get("3"), Some(&[][..]));
    }

    #[test]
    fn entries_are_never_replaced() {
        let mut cache = ChildCache::new();
        assert!(cache.set(NodeId::from("1"), ids(&["3", "4", "5"])));
        assert!(!cache.set(NodeId::from("1"), ids(&["9"])));
        assert_eq!(cache.get("1").unwrap(), ids(&["3", "4", "5"]).as_slice());
        assert_eq!(cache.len(), 1);
    }
}
