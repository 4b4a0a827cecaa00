//! Commit phase - flush a completed fiber tree onto the surface.
//!
//! Runs to completion without yielding. The tree is only read.
//!
//! Two passes:
//! 1. Plan: walk the tree child-first then sibling, check that every fiber and
//!    its parent have a display node, and record one append per fiber.
//! 2. Apply: perform the appends deepest level first. Sibling order within a
//!    parent is kept, and the container (the only node an observer can see)
//!    receives its child with the very last append.
//!
//! A failure in either pass leaves the container untouched; at worst some
//! detached nodes of the abandoned tree got linked to each other.

use crate::engine::FiberTree;
use crate::error::RenderError;
use crate::surface::{NodeId, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Append {
    parent: NodeId,
    child: NodeId,
    depth: usize,
}

/// Attach every node of `tree` under its parent's node.
///
/// Returns the number of appends performed.
pub fn commit_tree<S: Surface + ?Sized>(tree: &FiberTree, surface: &mut S) -> Result<usize, RenderError> {
    let plan = plan_appends(tree)?;

    for append in &plan {
        surface.append_child(append.parent, append.child)?;
    }

    Ok(plan.len())
}

fn plan_appends(tree: &FiberTree) -> Result<Vec<Append>, RenderError> {
    let mut depths = vec![0usize; tree.len()];
    let mut plan = Vec::with_capacity(tree.len().saturating_sub(1));

    // Pre-order visits a parent before its children, so its depth is known.
    for fiber in tree.walk().skip(1) {
        let current = &tree[fiber];
        let child = current.dom().ok_or(RenderError::MissingNode { fiber })?;
        let parent_fiber = current.parent().ok_or(RenderError::MissingNode { fiber })?;
        let parent = tree[parent_fiber]
            .dom()
            .ok_or(RenderError::MissingNode { fiber: parent_fiber })?;

        let depth = depths[parent_fiber.index()] + 1;
        depths[fiber.index()] = depth;
        plan.push(Append { parent, child, depth });
    }

    // Stable: appends under the same parent keep their pre-order (sibling) order.
    plan.sort_by(|a, b| b.depth.cmp(&a.depth));
    Ok(plan)
}
