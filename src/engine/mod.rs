//! Fiber engine - the incremental work tree.
//!
//! The engine manages the core data structures:
//! - Fiber: one unit of work, linked to parent, first child and next sibling
//! - FiberTree: arena owning every fiber of one render cycle
//! - Reconcile: the builder that expands fibers one visit at a time
//!
//! # Architecture
//!
//! Fibers are NOT boxed nodes pointing at each other. They are indices into
//! one arena, and the links are indices too:
//!
//! ```text
//! 0: ROOT (dom=container, child=1)
//! 1: div  (parent=0, child=2)
//! 2: a    (parent=1, child=3, sibling=4)
//! 3: text (parent=2)
//! 4: b    (parent=1, sibling=5)
//! 5: br   (parent=1)
//! ```
//!
//! Walking the tree is a matter of following indices, which is what lets the
//! scheduler stop after any fiber and pick up again later.

mod fiber;
mod tree;
mod reconcile;

pub use fiber::*;
pub use tree::*;
pub use reconcile::*;
