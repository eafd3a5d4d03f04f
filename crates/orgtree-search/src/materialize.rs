//! Handing the scoped subtree to the renderer.

use std::{collections::HashSet, slice};

use orgtree_cache::{CacheError, NodeId, TreeCache};

use crate::{Renderer, ScopedChildren, SearchScope};

/// Makes the path from the root down to `start` visible.
///
/// Materialization begins at the LCA, which may sit below nodes the renderer has never
/// seen. Every ancestor of `start` is an ancestor of a match and therefore in scope;
/// each one the renderer lacks is added, and all are marked expanded.
pub fn reveal_ancestors<R>(
    cache: &mut TreeCache,
    renderer: &mut R,
    scope: &SearchScope,
    start: &NodeId,
) -> Result<(), CacheError>
where
    R: Renderer + ?Sized,
{
    let mut path = cache.path_to_root(start.as_str());
    path.pop();
    for id in path {
        if !scope.contains(id.as_str()) {
            continue;
        }
        let node = cache.mark_materialized(id.as_str())?;
        if !renderer.has_node(id.as_str()) {
            renderer.add_nodes(slice::from_ref(node));
        }
        renderer.set_expanded(id.as_str());
    }
    Ok(())
}

/// Registers the in-scope subtree under `start` with the renderer.
///
/// Nodes are visited depth first with siblings in `projection` order, which is
/// registration order. A node outside `scope` is skipped together with its subtree.
/// Returns the visited identifiers in visit order.
pub fn materialize<R>(
    cache: &mut TreeCache,
    renderer: &mut R,
    scope: &SearchScope,
    projection: &ScopedChildren,
    start: &NodeId,
) -> Result<Vec<NodeId>, CacheError>
where
    R: Renderer + ?Sized,
{
    let mut visited = Vec::new();
    let mut seen = HashSet::new();
    let mut stack = vec![start.clone()];

    while let Some(id) = stack.pop() {
        if !scope.contains(id.as_str()) || !cache.contains(id.as_str()) {
            continue;
        }
        if !seen.insert(id.clone()) {
            continue;
        }
        let node = cache.mark_materialized(id.as_str())?;
        if !renderer.has_node(id.as_str()) {
            renderer.add_nodes(slice::from_ref(node));
        }
        renderer.set_expanded(id.as_str());
        // Reversed so the first child is popped first.
        stack.extend(projection.get(id.as_str()).iter().rev().cloned());
        visited.push(id);
    }

    Ok(visited)
}

#[cfg(test)]
mod tests {
    use orgtree_cache::NodeRecord;

    use super::*;
    use crate::test_support::RecordingRenderer;

    fn ids(raw: &[&str]) -> Vec<NodeId> {
        raw.iter().map(|id| NodeId::from(*id)).collect()
    }

    fn scope(raw: &[&str]) -> SearchScope {
        ids(raw).into_iter().collect()
    }

    fn cache() -> TreeCache {
        let mut cache = TreeCache::new(NodeRecord::root("root", "Root")).unwrap();
        for (id, parent) in [
            ("1", "root"),
            ("2", "root"),
            ("5", "1"),
            ("3", "1"),
            ("4", "1"),
            ("6", "5"),
        ] {
            cache.register(NodeRecord::new(id, parent, format!("Node {id}"), false));
        }
        cache
    }

    #[test]
    fn visits_scope_in_sibling_order() {
        let mut cache = cache();
        let mut renderer = RecordingRenderer::default();
        let scope = scope(&["root", "1", "2", "3", "4", "5"]);
        let projection = ScopedChildren::build(&cache, &scope);

        let visited = materialize(
            &mut cache,
            &mut renderer,
            &scope,
            &projection,
            &NodeId::from("root"),
        )
        .unwrap();

        assert_eq!(visited, ids(&["root", "1", "5", "3", "4", "2"]));
        assert_eq!(renderer.added, visited);
        assert!(!renderer.has_node("6"));
        assert!(cache.get("5").unwrap().expanded);
        assert!(!cache.get("6").unwrap().loaded);
    }

    #[test]
    fn never_adds_nodes_outside_scope() {
        let mut cache = cache();
        let mut renderer = RecordingRenderer::default();
        let scope = scope(&["root", "1", "4"]);
        let projection = ScopedChildren::build(&cache, &scope);

        materialize(
            &mut cache,
            &mut renderer,
            &scope,
            &projection,
            &NodeId::from("root"),
        )
        .unwrap();

        for id in &renderer.added {
            assert!(scope.contains(id.as_str()), "{id} is outside the scope");
        }
        assert_eq!(renderer.added, ids(&["root", "1", "4"]));
    }

    #[test]
    fn start_outside_scope_does_nothing() {
        let mut cache = cache();
        let mut renderer = RecordingRenderer::default();
        let scope = scope(&["root"]);
        let projection = ScopedChildren::build(&cache, &scope);

        let visited = materialize(
            &mut cache,
            &mut renderer,
            &scope,
            &projection,
            &NodeId::from("6"),
        )
        .unwrap();
        assert!(visited.is_empty());
        assert!(renderer.added.is_empty());
    }

    #[test]
    fn known_nodes_are_not_added_twice() {
        let mut cache = cache();
        let mut renderer = RecordingRenderer::default();
        renderer.set_root(cache.root());
        let scope = scope(&["root", "1"]);
        let projection = ScopedChildren::build(&cache, &scope);

        materialize(
            &mut cache,
            &mut renderer,
            &scope,
            &projection,
            &NodeId::from("root"),
        )
        .unwrap();
        assert_eq!(renderer.added, ids(&["1"]));
        assert_eq!(renderer.expanded, ids(&["root", "1"]));
    }

    #[test]
    fn reveal_adds_missing_ancestors_only() {
        let mut cache = cache();
        let mut renderer = RecordingRenderer::default();
        renderer.set_root(cache.root());
        let scope = scope(&["root", "1", "5", "6"]);

        reveal_ancestors(&mut cache, &mut renderer, &scope, &NodeId::from("6")).unwrap();

        assert_eq!(renderer.added, ids(&["1", "5"]));
        assert_eq!(renderer.expanded, ids(&["root", "1", "5"]));
        assert!(!renderer.has_node("6"));
    }
}
