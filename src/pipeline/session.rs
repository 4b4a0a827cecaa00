//! Render session - one renderer, one surface, one render cycle at a time.
//!
//! # Lifecycle
//!
//! ```text
//!          render()                 pointer exhausted
//! Idle ───────────────▶ Building ─────────────────────▶ Committing ──▶ Idle
//!   ▲                     │  ▲                                          │
//!   │                     └──┘ run_slice() yields between units         │
//!   └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A new `render()` while building simply replaces the work-in-progress tree.
//! The old tree is dropped as is: it was never attached, so nothing visible
//! has to be undone.

use tracing::{debug, error, info, trace};

use crate::config::RendererConfig;
use crate::engine::{perform_unit_of_work, FiberId, FiberTree};
use crate::error::RenderError;
use crate::primitives::Element;
use crate::scheduler::{Deadline, SliceReport, SliceStatus, Unbounded, WorkScheduler};
use crate::surface::{NodeId, Surface};
use super::commit::commit_tree;

// =============================================================================
// Phase and Stats
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No render in flight.
    Idle,
    /// Fibers are being built slice by slice.
    Building,
    /// The completed tree is being attached to the surface.
    ///
    /// Entered and left within the slice that commits, so it is never seen
    /// through [`Renderer::phase`] between slices.
    Committing,
}

/// Counters over the renderer's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub renders: u64,
    pub units: u64,
    pub slices: u64,
    pub commits: u64,
    /// Renders replaced by a newer render before they committed.
    pub abandoned: u64,
    /// Cycles dropped because of an error.
    pub aborted: u64,
}

// =============================================================================
// Renderer
// =============================================================================

/// Owns the surface and drives render cycles onto it.
pub struct Renderer<S: Surface> {
    surface: S,
    config: RendererConfig,
    phase: Phase,
    wip_root: Option<FiberTree>,
    next_unit: Option<FiberId>,
    current_root: Option<FiberTree>,
    stats: RenderStats,
}

impl<S: Surface> Renderer<S> {
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, RendererConfig::default())
    }

    pub fn with_config(surface: S, config: RendererConfig) -> Self {
        Self {
            surface,
            config,
            phase: Phase::Idle,
            wip_root: None,
            next_unit: None,
            current_root: None,
            stats: RenderStats::default(),
        }
    }

    /// Start a render cycle of `element` into `container`.
    ///
    /// Replaces any cycle still in flight. No work happens until a slice runs.
    pub fn render(&mut self, element: Element, container: NodeId) {
        if let Some(previous) = self.wip_root.take() {
            self.stats.abandoned += 1;
            debug!(fibers = previous.len(), "abandoning in-flight render");
        }

        let tree = FiberTree::new(element, container);
        self.next_unit = Some(tree.root());
        self.wip_root = Some(tree);
        self.phase = Phase::Building;
        self.stats.renders += 1;

        debug!(%container, "render requested");
    }

    /// Work loop: visit fibers until the deadline asks to yield, then commit
    /// if the tree is complete.
    ///
    /// At least one unit runs per slice when work is pending. An error aborts
    /// the whole cycle and is returned; the renderer is idle afterwards.
    pub fn work_loop(&mut self, deadline: &dyn Deadline) -> Result<SliceReport, RenderError> {
        self.stats.slices += 1;
        let threshold = self.config.scheduler.yield_threshold();

        let mut visited = 0;
        let mut should_yield = false;
        while let Some(unit) = self.next_unit {
            if should_yield {
                break;
            }
            let Some(tree) = self.wip_root.as_mut() else {
                self.next_unit = None;
                break;
            };

            match perform_unit_of_work(tree, &mut self.surface, unit) {
                Ok(next) => self.next_unit = next,
                Err(err) => {
                    self.abort(&err);
                    return Err(err);
                }
            }
            trace!(fiber = %unit, "unit of work done");

            visited += 1;
            should_yield = deadline.time_remaining() < threshold;
        }
        self.stats.units += visited as u64;

        let status = if self.next_unit.is_none() && self.wip_root.is_some() {
            self.commit_root()?;
            SliceStatus::Committed
        } else if self.next_unit.is_some() {
            SliceStatus::Yielded
        } else {
            SliceStatus::Idle
        };

        debug!(visited, ?status, "slice finished");
        Ok(SliceReport { visited, status })
    }

    /// Finish the pending cycle in one go.
    pub fn flush(&mut self) -> Result<SliceReport, RenderError> {
        self.work_loop(&Unbounded)
    }

    fn commit_root(&mut self) -> Result<(), RenderError> {
        let Some(tree) = self.wip_root.take() else {
            return Ok(());
        };
        self.phase = Phase::Committing;

        match commit_tree(&tree, &mut self.surface) {
            Ok(appended) => {
                self.stats.commits += 1;
                info!(fibers = tree.len(), appended, container = %tree.container(), "render committed");
                self.current_root = self.config.retain_committed_tree.then_some(tree);
                self.phase = Phase::Idle;
                Ok(())
            }
            Err(err) => {
                self.abort(&err);
                Err(err)
            }
        }
    }

    fn abort(&mut self, err: &RenderError) {
        self.wip_root = None;
        self.next_unit = None;
        self.phase = Phase::Idle;
        self.stats.aborted += 1;
        error!(%err, "render cycle aborted");
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Tree of the last committed render, when retained.
    pub fn current_root(&self) -> Option<&FiberTree> {
        self.current_root.as_ref()
    }

    /// Tree being built, if any.
    pub fn work_in_progress(&self) -> Option<&FiberTree> {
        self.wip_root.as_ref()
    }

    /// Fiber the next slice starts with.
    pub fn next_unit(&self) -> Option<FiberId> {
        self.next_unit
    }
}

impl<S: Surface> WorkScheduler for Renderer<S> {
    fn run_slice(&mut self, deadline: &dyn Deadline) -> Result<SliceReport, RenderError> {
        self.work_loop(deadline)
    }

    fn has_pending_work(&self) -> bool {
        self.wip_root.is_some()
    }
}

// =============================================================================
// Tests
// =============================================================================
