//! The session-level cache aggregate.
//!
//! [`TreeCache`] bundles the node store, the child cache and the depth index behind a
//! single owner. Every component that needs cached tree state receives it by
//! reference; traversal helpers only read it and return freshly allocated results.

use std::collections::HashSet;

use crate::{CacheError, ChildCache, DepthIndex, Node, NodeId, NodeRecord, NodeStore};

/// Partially loaded tree state for one session.
#[derive(Debug, Clone)]
pub struct TreeCache {
    /// Identifier of the root node.
    root: NodeId,
    /// Every registered node.
    store: NodeStore,
    /// Fetched child lists.
    children: ChildCache,
    /// Fringe depths derived from `children`.
    depths: DepthIndex,
}

impl TreeCache {
    /// Creates a cache seeded with its root node.
    ///
    /// The root must be parentless; it is registered before anything else can be.
    pub fn new(root: NodeRecord) -> Result<Self, CacheError> {
        if let Some(parent) = root.parent_id {
            return Err(CacheError::RootHasParent {
                id: root.id,
                parent,
            });
        }
        let root_id = root.id.clone();
        let mut store = NodeStore::new();
        store.register(root);
        let children = ChildCache::new();
        let mut depths = DepthIndex::new();
        depths.recompute(&root_id, &children);
        Ok(Self {
            root: root_id,
            store,
            children,
            depths,
        })
    }

    /// Identifier of the root node.
    pub fn root_id(&self) -> &NodeId {
        &self.root
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        // The root is registered in `new` and the store never removes nodes.
        self.store
            .get(self.root.as_str())
            .unwrap_or_else(|| unreachable!("root node is always registered"))
    }

    /// The underlying node store.
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// The underlying child cache.
    pub fn child_cache(&self) -> &ChildCache {
        &self.children
    }

    /// The underlying depth index.
    pub fn depth_index(&self) -> &DepthIndex {
        &self.depths
    }

    /// Registers a record. See [`NodeStore::register`].
    pub fn register(&mut self, record: NodeRecord) -> bool {
        self.store.register(record)
    }

    /// Looks up a registered node.
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.store.get(id)
    }

    /// Returns true if the node is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.store.contains(id)
    }

    /// Cached child identifiers of `parent`, in fetch order.
    pub fn children(&self, parent: &str) -> Option<&[NodeId]> {
        self.children.get(parent)
    }

    /// Returns true if the children of `parent` have been fetched.
    pub fn has_cached_children(&self, parent: &str) -> bool {
        self.children.contains(parent)
    }

    /// Cached children of `parent` as nodes, sorted by sibling order.
    pub fn sorted_children(&self, parent: &str) -> Option<Vec<&Node>> {
        let ids = self.children.get(parent)?;
        let mut nodes: Vec<&Node> = ids
            .iter()
            .filter_map(|id| self.store.get(id.as_str()))
            .collect();
        nodes.sort_by_key(|node| node.order);
        Some(nodes)
    }

    /// Records an already-registered child list for `parent` and refreshes depths.
    ///
    /// Returns `Ok(false)` if `parent` already had an entry; the existing entry wins.
    pub fn set_children(
        &mut self,
        parent: NodeId,
        children: Vec<NodeId>,
    ) -> Result<bool, CacheError> {
        if !self.store.contains(parent.as_str()) {
            return Err(CacheError::UnknownNode { id: parent });
        }
        if let Some(missing) = children.iter().find(|id| !self.store.contains(id.as_str())) {
            return Err(CacheError::UnknownNode {
                id: missing.clone(),
            });
        }
        let inserted = self.children.set(parent, children);
        if inserted {
            self.recompute_depths();
        }
        Ok(inserted)
    }

    /// Registers fetched child records and records them as the child list of `parent`.
    ///
    /// Records already registered keep their original order. Returns the child
    /// identifiers in fetch order.
    pub fn ingest_children(
        &mut self,
        parent: &NodeId,
        records: Vec<NodeRecord>,
    ) -> Result<Vec<NodeId>, CacheError> {
        let ids: Vec<NodeId> = records.iter().map(|r| r.id.clone()).collect();
        for record in records {
            self.store.register(record);
        }
        self.set_children(parent.clone(), ids.clone())?;
        Ok(ids)
    }

    /// Rebuilds the depth index from the child cache.
    pub fn recompute_depths(&mut self) {
        self.depths.recompute(&self.root, &self.children);
    }

    /// Deepest fringe depth currently cached.
    ///
    /// Recomputes the index first if it is empty. `None` means the depth is unknown.
    pub fn max_cached_depth(&mut self) -> Option<usize> {
        if self.depths.is_empty() {
            self.recompute_depths();
        }
        self.depths.max()
    }

    /// Root-first path of registered ancestors ending at `id`.
    ///
    /// The walk stops at the first parent that is not registered, so a node with an
    /// unresolved ancestor yields a path that does not start at the root. Returns an
    /// empty path if `id` itself is unknown.
    pub fn path_to_root(&self, id: &str) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.store.get(id);

        while let Some(node) = current {
            if !seen.insert(node.id.clone()) {
                break;
            }
            path.push(node.id.clone());
            current = node
                .parent_id
                .as_ref()
                .and_then(|parent| self.store.get(parent.as_str()));
        }

        path.reverse();
        path
    }

    /// Sets the `expanded` and `loaded` flags on a node.
    pub fn mark_materialized(&mut self, id: &str) -> Result<&Node, CacheError> {
        let Some(node) = self.store.get_mut(id) else {
            return Err(CacheError::UnknownNode {
                id: NodeId::from(id),
            });
        };
        node.expanded = true;
        node.loaded = true;
        Ok(node)
    }
}
