//! Fiber tree builder.
//!
//! Visiting a fiber does three things:
//! 1. create its display node if it has none yet (detached, never recreated)
//! 2. expand its children into a linked sibling chain of new fibers
//! 3. return the next fiber to visit
//!
//! The next fiber follows pre-order: first child, else the nearest sibling
//! found while climbing parents. The climb runs on the parent/sibling links,
//! not the call stack, so the walk can stop after any fiber and resume later
//! from a single `Option<FiberId>`.

use std::rc::Rc;

use tracing::trace;

use crate::error::RenderError;
use crate::primitives::{shape_error, Element};
use crate::surface::{create_dom, Surface};
use super::fiber::{Fiber, FiberFlags, FiberId};
use super::tree::FiberTree;

/// Create one child fiber per element under `wip`, in order.
///
/// The first becomes `wip.child`, each next one the previous one's `sibling`.
/// No surface work happens here. A fiber that was already expanded is left
/// alone, so re-entry never duplicates children.
pub fn reconcile_children(tree: &mut FiberTree, wip: FiberId, elements: &[Element]) {
    if tree[wip].flags.contains(FiberFlags::EXPANDED) {
        return;
    }

    let mut prev_sibling: Option<FiberId> = None;
    for element in elements {
        let fiber = Fiber::new(
            Some(element.kind().clone()),
            Rc::clone(element.props()),
            Some(wip),
        );
        let id = tree.push(fiber);

        match prev_sibling {
            None => tree[wip].child = Some(id),
            Some(prev) => tree[prev].sibling = Some(id),
        }
        prev_sibling = Some(id);
    }

    tree[wip].flags.insert(FiberFlags::EXPANDED);
}

/// Visit one fiber and return the next unit of work (`None` when exhausted).
pub fn perform_unit_of_work<S: Surface + ?Sized>(
    tree: &mut FiberTree,
    surface: &mut S,
    fiber: FiberId,
) -> Result<Option<FiberId>, RenderError> {
    let props = Rc::clone(&tree[fiber].props);

    if !tree[fiber].flags.contains(FiberFlags::HAS_NODE) {
        if let Some(kind) = tree[fiber].kind.clone() {
            if let Some(reason) = shape_error(&kind, props.children().len()) {
                return Err(RenderError::malformed(tree.element_path(fiber), reason));
            }

            let dom = create_dom(surface, &kind, &props)?;
            trace!(%fiber, %kind, node = %dom, "created display node");

            let current = &mut tree[fiber];
            current.dom = Some(dom);
            current.flags.insert(FiberFlags::HAS_NODE);
        }
    }

    reconcile_children(tree, fiber, props.children());

    Ok(next_unit_of_work(tree, fiber))
}

/// Pre-order successor of `fiber` over the links built so far.
pub fn next_unit_of_work(tree: &FiberTree, fiber: FiberId) -> Option<FiberId> {
    let current = tree.get(fiber)?;
    if let Some(child) = current.child {
        return Some(child);
    }

    let mut next = Some(fiber);
    while let Some(id) = next {
        let candidate = &tree[id];
        if let Some(sibling) = candidate.sibling {
            return Some(sibling);
        }
        next = candidate.parent;
    }
    None
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element;
    use crate::primitives::{create_element, create_text_element, Child};
    use crate::surface::{MemorySurface, NodeId, SurfaceOp};
    use crate::types::{Attributes, ElementType};

    fn example() -> Element {
        element!("div", { "id" => "foo" },
            element!("a", {}, "bar"),
            element!("b"),
            element!("br"),
        )
    }

    fn kind_name(tree: &FiberTree, id: FiberId) -> String {
        tree[id].kind().map(|k| k.to_string()).unwrap_or_else(|| "ROOT".into())
    }

    fn build_all(tree: &mut FiberTree, surface: &mut MemorySurface) -> Vec<FiberId> {
        let mut visited = Vec::new();
        let mut next = Some(tree.root());
        while let Some(fiber) = next {
            visited.push(fiber);
            next = perform_unit_of_work(tree, surface, fiber).unwrap();
        }
        visited
    }

    #[test]
    fn test_reconcile_links_siblings_in_order() {
        let (_, container) = MemorySurface::with_container("root").unwrap();
        let el = example();
        let mut tree = FiberTree::new(el.clone(), container);
        let div = {
            let root = tree.root();
            reconcile_children(&mut tree, root, std::slice::from_ref(&el));
            tree[root].child().unwrap()
        };

        reconcile_children(&mut tree, div, el.children());

        let children: Vec<FiberId> = tree.children(div).collect();
        assert_eq!(children.len(), 3);
        let names: Vec<String> = children.iter().map(|c| kind_name(&tree, *c)).collect();
        assert_eq!(names, vec!["a", "b", "br"]);
        for child in &children {
            assert_eq!(tree[*child].parent(), Some(div));
            assert!(tree[*child].dom().is_none());
            assert!(tree[*child].child().is_none());
        }
        assert!(tree[children[2]].sibling().is_none());
    }

    #[test]
    fn test_reconcile_twice_does_not_duplicate() {
        let (_, container) = MemorySurface::with_container("root").unwrap();
        let el = example();
        let mut tree = FiberTree::new(el.clone(), container);
        let root = tree.root();

        reconcile_children(&mut tree, root, std::slice::from_ref(&el));
        reconcile_children(&mut tree, root, std::slice::from_ref(&el));

        assert_eq!(tree.children(root).count(), 1);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_visit_order_is_preorder() {
        let (mut surface, container) = MemorySurface::with_container("root").unwrap();
        let mut tree = FiberTree::new(example(), container);

        let visited = build_all(&mut tree, &mut surface);

        let names: Vec<String> = visited.iter().map(|f| kind_name(&tree, *f)).collect();
        assert_eq!(names, vec!["ROOT", "div", "a", "TEXT_ELEMENT", "b", "br"]);
        assert_eq!(tree.walk().collect::<Vec<_>>(), visited);
    }

    #[test]
    fn test_nodes_created_once_and_detached() {
        let (mut surface, container) = MemorySurface::with_container("root").unwrap();
        let mut tree = FiberTree::new(example(), container);
        build_all(&mut tree, &mut surface);
        let created = surface.len();

        // Visiting again must not create new nodes or fibers
        let fibers = tree.len();
        for fiber in tree.walk().collect::<Vec<_>>() {
            perform_unit_of_work(&mut tree, &mut surface, fiber).unwrap();
        }
        assert_eq!(surface.len(), created);
        assert_eq!(tree.len(), fibers);

        // Container plus five element nodes, none attached by the builder
        assert_eq!(created, 6);
        assert!(!surface.ops().iter().any(|op| matches!(op, SurfaceOp::Append { .. })));
        assert_eq!(tree[tree.root()].dom(), Some(container));
    }

    #[test]
    fn test_parent_node_created_before_child_node() {
        let (mut surface, container) = MemorySurface::with_container("root").unwrap();
        let mut tree = FiberTree::new(example(), container);
        build_all(&mut tree, &mut surface);

        let position = |node: NodeId| {
            surface.ops().iter().position(|op| match op {
                SurfaceOp::CreateElement { node: n, .. } | SurfaceOp::CreateText { node: n } => *n == node,
                _ => false,
            })
        };

        for fiber in tree.walk().skip(2) {
            let parent = tree[fiber].parent().unwrap();
            let parent_at = position(tree[parent].dom().unwrap()).unwrap();
            let child_at = position(tree[fiber].dom().unwrap()).unwrap();
            assert!(parent_at < child_at);
        }
    }

    #[test]
    fn test_next_unit_climbs_to_ancestor_sibling() {
        let (mut surface, container) = MemorySurface::with_container("root").unwrap();
        let el = element!("ul", {},
            element!("li", {}, element!("span", {}, "deep")),
            element!("li", {}, "second"),
        );
        let mut tree = FiberTree::new(el, container);
        let visited = build_all(&mut tree, &mut surface);

        // ROOT, ul, li, span, "deep", li, "second"
        assert_eq!(visited.len(), 7);
        let deep_text = visited[4];
        assert_eq!(next_unit_of_work(&tree, deep_text), Some(visited[5]));
        assert_eq!(next_unit_of_work(&tree, visited[6]), None);
    }

    #[test]
    fn test_text_with_children_is_malformed() {
        let (mut surface, container) = MemorySurface::with_container("root").unwrap();
        let bad_text = create_element(ElementType::Text, Attributes::new(), ["oops"]);
        let el = create_element("p", Attributes::new(), [Child::from(create_text_element("ok")), Child::from(bad_text)]);
        let mut tree = FiberTree::new(el, container);

        let mut next = Some(tree.root());
        let err = loop {
            match perform_unit_of_work(&mut tree, &mut surface, next.unwrap()) {
                Ok(n) => next = n,
                Err(err) => break err,
            }
        };

        match err {
            RenderError::MalformedElement { path, .. } => assert_eq!(path, "root.children[1]"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
