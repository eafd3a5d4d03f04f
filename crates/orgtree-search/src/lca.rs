//! Lowest common ancestor of a match set.

use std::collections::HashSet;

use orgtree_cache::{NodeId, TreeCache};

/// Computes where materialization should start for `matches`.
///
/// The logical LCA is the deepest node shared by every match's root-first path. It is
/// then clamped: walking up from the logical LCA, the first node that is either
/// parentless or whose parent has a cached child list is returned, since only such a
/// node is known to be reachable through loaded data. When the walk runs off a broken
/// ancestor chain first, the topmost registered node it reached is returned. Empty input
/// and paths with no common prefix yield the root.
pub fn compute_lca(cache: &TreeCache, matches: &[NodeId]) -> NodeId {
    let root = cache.root_id();
    let paths: Vec<Vec<NodeId>> = matches
        .iter()
        .map(|id| cache.path_to_root(id.as_str()))
        .collect();
    let Some(first) = paths.first() else {
        return root.clone();
    };

    let shortest = paths.iter().map(Vec::len).min().unwrap_or(0);
    let mut logical = None;
    for (depth, candidate) in first.iter().enumerate().take(shortest) {
        if paths.iter().all(|path| &path[depth] == candidate) {
            logical = Some(candidate);
        } else {
            break;
        }
    }

    match logical {
        Some(id) => clamp_to_loaded(cache, id),
        None => root.clone(),
    }
}

/// Walks up from `start` to the first node whose loading state is known, or to the
/// topmost registered node if the chain breaks before that.
fn clamp_to_loaded(cache: &TreeCache, start: &NodeId) -> NodeId {
    let mut seen = HashSet::new();
    let mut current = cache.get(start.as_str());
    let mut topmost = None;

    while let Some(node) = current {
        if !seen.insert(node.id.clone()) {
            break;
        }
        topmost = Some(&node.id);
        match &node.parent_id {
            None => return node.id.clone(),
            Some(parent) if cache.has_cached_children(parent.as_str()) => {
                return node.id.clone();
            }
            Some(parent) => current = cache.get(parent.as_str()),
        }
    }

    topmost.unwrap_or_else(|| cache.root_id()).clone()
}
