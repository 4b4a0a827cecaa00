//! Display surface - where committed nodes end up.
//!
//! The core only needs four capabilities from a surface:
//!
//! ```text
//! create_element(tag) → node     create_text_node() → node
//! set_attribute(node, k, v)      append_child(parent, child)
//! ```
//!
//! The first three run while fibers are built and only produce detached nodes.
//! `append_child` is reserved for the commit phase, which makes it the only
//! operation that changes what an observer of the surface can see.
//!
//! Two surfaces ship with the crate:
//! - [`MemorySurface`] - headless node arena with an operation log
//! - [`TerminalSurface`] - memory surface that presents itself on a terminal

mod memory;
mod terminal;

use std::fmt;

use crate::error::SurfaceError;
use crate::primitives::Props;
use crate::types::{AttrValue, ElementType, CHILDREN};

pub use memory::{MemoryNode, MemoryNodeKind, MemorySurface, SurfaceOp};
pub use terminal::TerminalSurface;

// =============================================================================
// Node Handle
// =============================================================================

/// Opaque handle to a node owned by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Surface Trait
// =============================================================================

/// Display-surface primitives consumed by the renderer.
pub trait Surface {
    /// Create a detached structural node tagged with `tag`.
    fn create_element(&mut self, tag: &str) -> Result<NodeId, SurfaceError>;

    /// Create a detached, empty text node.
    fn create_text_node(&mut self) -> Result<NodeId, SurfaceError>;

    /// Attach `child` as the last child of `parent`.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SurfaceError>;

    /// Assign a field on a node. Text nodes take their content from `nodeValue`.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &AttrValue) -> Result<(), SurfaceError>;
}

/// Create the display node for a fiber.
///
/// Text sentinel → bare text node, anything else → element tagged with the type.
/// Every attribute is then assigned onto the node (`children` is not an
/// attribute, it lives in its own field). The node is not attached anywhere.
pub fn create_dom<S: Surface + ?Sized>(
    surface: &mut S,
    kind: &ElementType,
    props: &Props,
) -> Result<NodeId, SurfaceError> {
    let node = match kind {
        ElementType::Text => surface.create_text_node()?,
        ElementType::Tag(tag) => surface.create_element(tag)?,
    };

    for (name, value) in props.attributes() {
        if name == CHILDREN {
            continue;
        }
        surface.set_attribute(node, name, value)?;
    }

    Ok(node)
}
