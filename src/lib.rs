//! # spark-fiber
//!
//! Incremental UI-tree renderer for Rust.
//!
//! ## Architecture
//!
//! spark-fiber turns an immutable element tree into nodes on a display
//! surface in two phases. Building happens one fiber at a time and can be
//! interrupted between any two fibers; committing happens in one piece.
//!
//! ```text
//! Element tree → FiberTree (built in slices) → commit → Surface
//! ```
//!
//! Fibers live in an index-based arena, linked parent → first child → next
//! sibling, so the work loop only has to remember one fiber id to resume.
//!
//! ## Modules
//!
//! - [`types`] - Core types (ElementType, AttrValue, Attributes)
//! - [`primitives`] - Element model, `create_element`, JSON interchange
//! - [`engine`] - Fibers, the fiber arena and the tree builder
//! - [`surface`] - Display-surface trait, memory and terminal surfaces
//! - [`scheduler`] - Deadlines, time sources, the work scheduler trait
//! - [`pipeline`] - Render session, commit phase, idle host
//!
//! ## Example
//!
//! ```
//! use spark_fiber::{element, MemorySurface, Renderer};
//!
//! let (surface, container) = MemorySurface::with_container("root").unwrap();
//! let mut renderer = Renderer::new(surface);
//!
//! renderer.render(element!("div", { "id" => "foo" }, element!("a", {}, "bar")), container);
//! renderer.flush().unwrap();
//!
//! assert_eq!(
//!     renderer.surface().to_markup(container),
//!     r#"<root><div id="foo"><a>bar</a></div></root>"#
//! );
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod primitives;
pub mod scheduler;
pub mod surface;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{RendererConfig, SchedulerConfig};

pub use error::{ConfigError, RenderError, SurfaceError};

pub use primitives::{attrs, create_element, create_text_element, Child, Element, Props};

pub use engine::{
    next_unit_of_work, perform_unit_of_work, reconcile_children, Fiber, FiberFlags, FiberId,
    FiberTree,
};

pub use surface::{create_dom, MemorySurface, NodeId, Surface, SurfaceOp, TerminalSurface};

pub use scheduler::{
    Deadline, ManualClock, SliceDeadline, SliceReport, SliceStatus, SystemClock, TimeSource,
    Unbounded, UnitBudget, WorkScheduler,
};

pub use pipeline::{commit_tree, HostHandle, IdleHost, Phase, RenderStats, Renderer};
