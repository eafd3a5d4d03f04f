//! Fringe depth statistics.
//!
//! The depth index records, for every node whose children are not cached (or are
//! cached as an empty list), its depth below the root. It is rebuilt from scratch
//! whenever the child cache gains an entry and is purely diagnostic.

use std::collections::{HashMap, HashSet};

use crate::{ChildCache, NodeId};

/// Depth of every fringe node, recomputed from the child cache.
#[derive(Debug, Default, Clone)]
pub struct DepthIndex {
    /// Fringe node identifier to depth from the root.
    depths: HashMap<NodeId, usize>,
}

impl DepthIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the index with a depth-first walk from `root` through `children`.
    ///
    /// A node reached twice (a malformed cache with a cycle or a shared child) is
    /// only walked the first time.
    pub fn recompute(&mut self, root: &NodeId, children: &ChildCache) {
        self.depths.clear();
        let mut visited = HashSet::new();
        let mut stack = vec![(root.clone(), 0usize)];

        while let Some((id, depth)) = stack.pop() {
            if !visited.insert(id.clone()) {
                continue;
            }
            match children.get(id.as_str()) {
                Some(kids) if !kids.is_empty() => {
                    // Reverse so the first child is walked first.
                    for kid in kids.iter().rev() {
                        stack.push((kid.clone(), depth + 1));
                    }
                }
                _ => {
                    self.depths.insert(id, depth);
                }
            }
        }
    }

    /// Depth of a fringe node, if it is one.
    pub fn get(&self, id: &str) -> Option<usize> {
        self.depths.get(id).copied()
    }

    /// Deepest fringe depth, or `None` when the index is empty.
    pub fn max(&self) -> Option<usize> {
        self.depths.values().copied().max()
    }

    /// Number of fringe nodes.
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    /// Returns true if no fringe depths are recorded.
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }
}
