//! Cooperative scheduling.
//!
//! The renderer never decides on its own when to stop working. A host hands it
//! slices through [`WorkScheduler::run_slice`], each with a [`Deadline`], and
//! the renderer yields once the deadline says the slice is nearly over.
//!
//! ```text
//! host ── run_slice(deadline) ──▶ work loop: visit, check, visit, check ...
//!   ▲                                   │
//!   └──────── SliceReport ◀─────────────┘  (yielded | committed | idle)
//! ```

mod deadline;

pub use deadline::*;

use crate::error::RenderError;

/// What a slice ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceStatus {
    /// Nothing was pending.
    Idle,
    /// Deadline reached with work left; the next slice resumes it.
    Yielded,
    /// The tree was completed and committed in this slice.
    Committed,
}

/// Outcome of one slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceReport {
    /// Units of work performed in this slice.
    pub visited: usize,
    pub status: SliceStatus,
}

/// Something that can do work in host-granted slices.
pub trait WorkScheduler {
    /// Run until the deadline asks to yield or no work is left.
    fn run_slice(&mut self, deadline: &dyn Deadline) -> Result<SliceReport, RenderError>;

    /// Whether another slice would do anything.
    fn has_pending_work(&self) -> bool;
}
