//! Render Pipeline
//!
//! Connects the element tree to the surface through two phases.
//!
//! # Pipeline Architecture
//!
//! ```text
//! render(element, container) → build phase (sliced) → commit phase (atomic) → surface
//! ```
//!
//! ## Data Flow
//!
//! 1. **render** - Seeds a work-in-progress fiber tree and points the work loop at its root
//! 2. **build** - Visits fibers one unit at a time, creating detached nodes; yields between units
//! 3. **commit** - Attaches every node to its parent in one uninterrupted pass
//!
//! ## Key Design Principles
//!
//! - **Nothing visible while building**: nodes exist but are not attached until commit
//! - **Host-driven**: slices are granted from outside through a [`Deadline`](crate::scheduler::Deadline)
//! - **Last render wins**: a new render replaces any tree still being built

pub mod commit;
pub mod host;
pub mod session;

pub use commit::commit_tree;
pub use host::{HostHandle, IdleHost};
pub use session::{Phase, RenderStats, Renderer};
