//! Deadlines and time sources.
//!
//! A [`Deadline`] answers one question for the work loop: how much of the
//! current slice is left. Where that answer comes from (a wall clock, a
//! manually advanced clock, a unit counter) is up to the host.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

// =============================================================================
// Traits
// =============================================================================

/// Time remaining in the current execution slice.
pub trait Deadline {
    fn time_remaining(&self) -> Duration;
}

/// Source of "now" for deadlines built by a host.
pub trait TimeSource {
    fn now(&self) -> Instant;
}

// =============================================================================
// Clocks
// =============================================================================

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give another
/// to a host.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

// =============================================================================
// Deadlines
// =============================================================================

/// Slice that ends at a fixed instant of a time source.
#[derive(Debug)]
pub struct SliceDeadline<'a, C: TimeSource + ?Sized> {
    clock: &'a C,
    end: Instant,
}

impl<'a, C: TimeSource + ?Sized> SliceDeadline<'a, C> {
    /// Slice of `budget` starting now.
    pub fn new(clock: &'a C, budget: Duration) -> Self {
        Self {
            end: clock.now() + budget,
            clock,
        }
    }
}

impl<C: TimeSource + ?Sized> Deadline for SliceDeadline<'_, C> {
    fn time_remaining(&self) -> Duration {
        self.end.saturating_duration_since(self.clock.now())
    }
}

/// Slice measured in units of work instead of time.
///
/// Every budget check consumes one unit; the check that uses up the last unit
/// reports no time left. The work loop checks once per unit, so
/// `UnitBudget::new(n)` lets exactly `n` units run (at least one).
#[derive(Debug)]
pub struct UnitBudget {
    remaining: Cell<usize>,
}

impl UnitBudget {
    pub fn new(units: usize) -> Self {
        Self {
            remaining: Cell::new(units),
        }
    }
}

impl Deadline for UnitBudget {
    fn time_remaining(&self) -> Duration {
        let left = self.remaining.get().saturating_sub(1);
        self.remaining.set(left);
        if left == 0 { Duration::ZERO } else { Duration::MAX }
    }
}

/// Slice that never ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl Deadline for Unbounded {
    fn time_remaining(&self) -> Duration {
        Duration::MAX
    }
}
