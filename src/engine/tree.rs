//! FiberTree - arena holding every fiber of one render cycle.
//!
//! Fibers are never removed. A tree lives for one cycle: it is dropped when a
//! newer render replaces it, or kept as the current tree after commit.

use std::ops::{Index, IndexMut};
use std::rc::Rc;

use crate::primitives::{Element, Props};
use crate::surface::NodeId;
use super::fiber::{Fiber, FiberFlags, FiberId};
use super::reconcile::next_unit_of_work;

#[derive(Debug)]
pub struct FiberTree {
    fibers: Vec<Fiber>,
    container: NodeId,
}

impl FiberTree {
    /// Seed a tree: a root with no type, `element` as its only child-to-be and
    /// `container` as its display node.
    pub fn new(element: Element, container: NodeId) -> Self {
        let mut root = Fiber::new(None, Rc::new(Props::root(element)), None);
        root.dom = Some(container);
        root.flags = FiberFlags::ROOT | FiberFlags::HAS_NODE;

        Self {
            fibers: vec![root],
            container,
        }
    }

    pub fn root(&self) -> FiberId {
        FiberId::new(0)
    }

    /// Surface node the tree renders into.
    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn get(&self, id: FiberId) -> Option<&Fiber> {
        self.fibers.get(id.index())
    }

    /// Number of fibers built so far, root included.
    pub fn len(&self) -> usize {
        self.fibers.len()
    }

    /// A tree always holds its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The element this tree was seeded with.
    pub fn element(&self) -> Option<&Element> {
        self.fibers[0].props.children().first()
    }

    /// Sibling chain under `id`, in order.
    pub fn children(&self, id: FiberId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).and_then(Fiber::child),
        }
    }

    /// Pre-order walk over the fibers built so far, root first.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            tree: self,
            next: Some(self.root()),
        }
    }

    /// Distance from the root (root is 0).
    pub fn depth(&self, id: FiberId) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).and_then(Fiber::parent);
        while let Some(parent) = current {
            depth += 1;
            current = self[parent].parent;
        }
        depth
    }

    /// Path of a fiber's element relative to the rendered element,
    /// e.g. `root.children[0].children[2]`. Same notation as [`Element::validate`].
    pub fn element_path(&self, id: FiberId) -> String {
        let mut indices = Vec::new();
        let mut current = id;
        while let Some(parent) = self.get(current).and_then(Fiber::parent) {
            if self[parent].is_root() {
                break;
            }
            let index = self.children(parent).position(|c| c == current).unwrap_or(0);
            indices.push(index);
            current = parent;
        }

        let mut path = String::from("root");
        for index in indices.iter().rev() {
            path.push_str(&format!(".children[{}]", index));
        }
        path
    }

    pub(crate) fn push(&mut self, fiber: Fiber) -> FiberId {
        let id = FiberId::new(self.fibers.len());
        self.fibers.push(fiber);
        id
    }
}

/// Panics on an id from another tree.
impl Index<FiberId> for FiberTree {
    type Output = Fiber;

    fn index(&self, id: FiberId) -> &Fiber {
        &self.fibers[id.index()]
    }
}

impl IndexMut<FiberId> for FiberTree {
    fn index_mut(&mut self, id: FiberId) -> &mut Fiber {
        &mut self.fibers[id.index()]
    }
}

// =============================================================================
// Iterators
// =============================================================================

pub struct Children<'a> {
    tree: &'a FiberTree,
    next: Option<FiberId>,
}

impl Iterator for Children<'_> {
    type Item = FiberId;

    fn next(&mut self) -> Option<FiberId> {
        let current = self.next?;
        self.next = self.tree.get(current).and_then(Fiber::sibling);
        Some(current)
    }
}

pub struct Walk<'a> {
    tree: &'a FiberTree,
    next: Option<FiberId>,
}

impl Iterator for Walk<'_> {
    type Item = FiberId;

    fn next(&mut self) -> Option<FiberId> {
        let current = self.next?;
        self.next = next_unit_of_work(self.tree, current);
        Some(current)
    }
}
