//! Node registration and sibling ordering.
//!
//! The store is append-only: a node is registered once and is never removed or
//! overwritten. Registration assigns `order` from a per-parent counter, so the
//! relative order of siblings is fixed by when each was first seen, no matter which
//! fetch for which parent completes first.

use std::collections::{HashMap, hash_map::Entry};

use crate::{Node, NodeId, NodeRecord};

/// Registry of every known node, keyed by identifier.
#[derive(Debug, Default, Clone)]
pub struct NodeStore {
    /// Registered nodes.
    nodes: HashMap<NodeId, Node>,
    /// Next sibling order per parent; the root's siblings live under `None`.
    counters: HashMap<Option<NodeId>, usize>,
}

impl NodeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a record, assigning it the next order under its parent.
    ///
    /// Returns `false` and leaves the store untouched if the identifier is already
    /// registered; an existing node keeps its original order.
    pub fn register(&mut self, record: NodeRecord) -> bool {
        let Entry::Vacant(slot) = self.nodes.entry(record.id.clone()) else {
            return false;
        };
        let counter = self.counters.entry(record.parent_id.clone()).or_insert(0);
        let order = *counter;
        *counter += 1;
        slot.insert(Node::from_record(record, order));
        true
    }

    /// Looks up a node by identifier.
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Mutable lookup, used only for the materialization flags.
    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Returns true if the identifier is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all registered nodes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }
}
