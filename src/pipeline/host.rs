//! Idle host - grants slices to a [`WorkScheduler`] when it has work.
//!
//! Plays the part of an idle-callback provider: every tick hands out one
//! slice of `slice_budget`, and `run` keeps ticking until stopped.
//!
//! # Example
//!
//! ```ignore
//! let host = IdleHost::new(config.scheduler.clone());
//! let handle = host.handle();
//!
//! // Option 1: blocking loop, stopped through the handle
//! host.run(&mut renderer, &handle);
//!
//! // Option 2: tick manually in your own loop
//! while host.tick(&mut renderer)?.status != SliceStatus::Committed {}
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tracing::{trace, warn};

use crate::config::SchedulerConfig;
use crate::error::RenderError;
use crate::scheduler::{SliceDeadline, SliceReport, SliceStatus, SystemClock, TimeSource, WorkScheduler};

// =============================================================================
// Host Handle
// =============================================================================

/// Stops a running [`IdleHost::run`] loop. Cheap to clone, safe to share.
#[derive(Debug, Clone)]
pub struct HostHandle {
    running: Arc<AtomicBool>,
}

impl HostHandle {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

// =============================================================================
// Idle Host
// =============================================================================

pub struct IdleHost<C: TimeSource = SystemClock> {
    config: SchedulerConfig,
    clock: C,
    running: Arc<AtomicBool>,
}

impl IdleHost<SystemClock> {
    pub fn new(config: SchedulerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: TimeSource> IdleHost<C> {
    pub fn with_clock(config: SchedulerConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn handle(&self) -> HostHandle {
        HostHandle {
            running: Arc::clone(&self.running),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Grant one slice.
    pub fn tick<W: WorkScheduler + ?Sized>(&self, work: &mut W) -> Result<SliceReport, RenderError> {
        let deadline = SliceDeadline::new(&self.clock, self.config.slice_budget());
        let report = work.run_slice(&deadline)?;
        trace!(visited = report.visited, status = ?report.status, "idle tick");
        Ok(report)
    }

    /// Grant slices until the work has nothing pending. Returns how many were
    /// granted.
    pub fn run_until_idle<W: WorkScheduler + ?Sized>(&self, work: &mut W) -> Result<usize, RenderError> {
        let mut slices = 0;
        while work.has_pending_work() {
            self.tick(work)?;
            slices += 1;
        }
        Ok(slices)
    }

    /// Tick until `handle` is stopped, sleeping `idle_interval` whenever
    /// nothing was pending.
    ///
    /// A failed cycle is logged and the loop goes on; the renderer has already
    /// dropped it.
    pub fn run<W: WorkScheduler + ?Sized>(&self, work: &mut W, handle: &HostHandle) {
        while handle.is_running() {
            match self.tick(work) {
                Ok(report) if report.status == SliceStatus::Idle => {
                    thread::sleep(self.config.idle_interval());
                }
                Ok(_) => {}
                Err(err) => warn!(%err, "render cycle failed"),
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::scheduler::{Deadline, ManualClock};

    /// Needs `units` units; each unit advances the shared clock by `cost`.
    struct FakeWork {
        units: usize,
        cost: Duration,
        clock: ManualClock,
        slices: usize,
        stop_after: Option<(usize, HostHandle)>,
    }

    impl FakeWork {
        fn new(units: usize, cost: Duration, clock: ManualClock) -> Self {
            Self { units, cost, clock, slices: 0, stop_after: None }
        }
    }

    impl WorkScheduler for FakeWork {
        fn run_slice(&mut self, deadline: &dyn Deadline) -> Result<SliceReport, RenderError> {
            self.slices += 1;
            if let Some((limit, handle)) = &self.stop_after {
                if self.slices >= *limit {
                    handle.stop();
                }
            }

            let mut visited = 0;
            while self.units > 0 {
                self.units -= 1;
                visited += 1;
                self.clock.advance(self.cost);
                if deadline.time_remaining() < Duration::from_millis(1) {
                    break;
                }
            }

            let status = match (visited, self.units) {
                (0, _) => SliceStatus::Idle,
                (_, 0) => SliceStatus::Committed,
                _ => SliceStatus::Yielded,
            };
            Ok(SliceReport { visited, status })
        }

        fn has_pending_work(&self) -> bool {
            self.units > 0
        }
    }

    fn config() -> SchedulerConfig {
        SchedulerConfig {
            yield_threshold_ms: 1,
            slice_budget_ms: 10,
            idle_interval_ms: 0,
        }
    }

    #[test]
    fn test_tick_stops_at_slice_budget() {
        let clock = ManualClock::new();
        let host = IdleHost::with_clock(config(), clock.clone());
        let mut work = FakeWork::new(100, Duration::from_millis(3), clock);

        let report = host.tick(&mut work).unwrap();

        // 1ms left after the third unit is not below the threshold yet

        assert_eq!(report.visited, 4);
        assert_eq!(report.status, SliceStatus::Yielded);
    }

    #[test]
    fn test_run_until_idle_counts_slices() {
        let clock = ManualClock::new();
        let host = IdleHost::with_clock(config(), clock.clone());
        let mut work = FakeWork::new(10, Duration::from_millis(5), clock);

        // 5ms leaves 5ms, 10ms leaves nothing: two units per slice
        let slices = host.run_until_idle(&mut work).unwrap();

        assert_eq!(slices, 5);
        assert!(!work.has_pending_work());
    }

    #[test]
    fn test_run_until_idle_with_nothing_pending() {
        let clock = ManualClock::new();
        let host = IdleHost::with_clock(config(), clock.clone());
        let mut work = FakeWork::new(0, Duration::ZERO, clock);

        assert_eq!(host.run_until_idle(&mut work).unwrap(), 0);
        assert_eq!(work.slices, 0);
    }

    #[test]
    fn test_run_returns_once_stopped() {
        let clock = ManualClock::new();
        let host = IdleHost::with_clock(config(), clock.clone());
        let mut work = FakeWork::new(0, Duration::ZERO, clock);
        work.stop_after = Some((3, host.handle()));

        host.run(&mut work, &host.handle());

        assert_eq!(work.slices, 3);
        assert!(!host.handle().is_running());
    }

    #[test]
    fn test_handle_clones_share_flag() {
        let host = IdleHost::new(config());
        let a = host.handle();
        let b = a.clone();

        assert!(b.is_running());
        a.stop();
        assert!(!b.is_running());
    }
}
