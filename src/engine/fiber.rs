//! Fiber - the unit of work and the persistent tree node.

use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;

use crate::primitives::Props;
use crate::surface::NodeId;
use crate::types::ElementType;

/// Index of a fiber inside its [`FiberTree`](super::FiberTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FiberId(usize);

impl FiberId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FiberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fiber#{}", self.0)
    }
}

bitflags! {
    /// Progress markers for a fiber.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FiberFlags: u8 {
        /// Work root of a render; its node is the container.
        const ROOT = 1 << 0;
        /// Display node has been created (or preset, for the root).
        const HAS_NODE = 1 << 1;
        /// Children have been reconciled into child fibers.
        const EXPANDED = 1 << 2;
    }
}

/// One node of the work tree.
///
/// Links are arena indices: `child` is the first child, `sibling` the next one
/// on the same level and `parent` a back-reference. The tree owns every fiber,
/// none of them owns another.
#[derive(Debug, Clone)]
pub struct Fiber {
    pub(crate) kind: Option<ElementType>,
    pub(crate) props: Rc<Props>,
    pub(crate) dom: Option<NodeId>,
    pub(crate) parent: Option<FiberId>,
    pub(crate) child: Option<FiberId>,
    pub(crate) sibling: Option<FiberId>,
    pub(crate) flags: FiberFlags,
}

impl Fiber {
    pub(crate) fn new(kind: Option<ElementType>, props: Rc<Props>, parent: Option<FiberId>) -> Self {
        Self {
            kind,
            props,
            dom: None,
            parent,
            child: None,
            sibling: None,
            flags: FiberFlags::empty(),
        }
    }

    /// Element type; `None` only for the root.
    pub fn kind(&self) -> Option<&ElementType> {
        self.kind.as_ref()
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn dom(&self) -> Option<NodeId> {
        self.dom
    }

    pub fn parent(&self) -> Option<FiberId> {
        self.parent
    }

    pub fn child(&self) -> Option<FiberId> {
        self.child
    }

    pub fn sibling(&self) -> Option<FiberId> {
        self.sibling
    }

    pub fn flags(&self) -> FiberFlags {
        self.flags
    }

    pub fn is_root(&self) -> bool {
        self.flags.contains(FiberFlags::ROOT)
    }
}
