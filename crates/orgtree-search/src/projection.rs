//! Scope-filtered child lists.
//!
//! [`ScopedChildren`] is rebuilt from the node store for every search and only ever
//! read by materialization. It is never written back into the child cache.

use std::collections::HashMap;

use orgtree_cache::{Node, NodeId, TreeCache};

use crate::SearchScope;

/// Parent identifier to in-scope children, sorted by sibling order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopedChildren {
    /// Ordered child lists.
    entries: HashMap<NodeId, Vec<NodeId>>,
}

impl ScopedChildren {
    /// Groups every registered node under its parent, keeping pairs where the child or
    /// the parent is in `scope`.
    pub fn build(cache: &TreeCache, scope: &SearchScope) -> Self {
        let mut grouped: HashMap<NodeId, Vec<&Node>> = HashMap::new();
        for node in cache.store().iter() {
            let Some(parent) = &node.parent_id else {
                continue;
            };
            if scope.contains(node.id.as_str()) || scope.contains(parent.as_str()) {
                grouped.entry(parent.clone()).or_default().push(node);
            }
        }

        let entries = grouped
            .into_iter()
            .map(|(parent, mut kids)| {
                kids.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
                (parent, kids.into_iter().map(|n| n.id.clone()).collect())
            })
            .collect();
        Self { entries }
    }

    /// Children of `parent`, or an empty slice.
    pub fn get(&self, parent: &str) -> &[NodeId] {
        self.entries.get(parent).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of parents with at least one child.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no parent has children.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
