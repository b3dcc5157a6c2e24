//! Periodic redraw trigger.
//!
//! A two-state machine driven by whoever owns the event loop:
//!
//! ```text
//!            start(now)                complete_tick(t)
//!   Idle ──────────────────► Running ◄──────────────┐
//!    ▲                         │   └────────────────┘
//!    └──────── stop() ─────────┘
//! ```
//!
//! The scheduler holds at most one pending deadline. Re-arming replaces it, so a
//! tick can never be scheduled twice. The next deadline is measured from when
//! the previous tick *finished*, not when it started.

use core::time::Duration;
use std::time::Instant;

use crate::config::UPDATE_FREQ;

/// Scheduler state.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum SchedulerState {
    /// No tick pending. The surface is hidden or torn down.
    #[default]
    Idle,

    /// A tick is pending at `next_tick`.
    Running {
        /// When the next redraw becomes due.
        next_tick: Instant,
    },
}

/// One-second redraw timer, active only while the surface is visible.
#[derive(Debug)]
pub struct RedrawScheduler {
    state: SchedulerState,
    period: Duration,
}

impl RedrawScheduler {
    /// Idle scheduler with the default [`UPDATE_FREQ`] period.
    pub const fn new() -> Self { Self::with_period(UPDATE_FREQ) }

    /// Idle scheduler with a custom period.
    pub const fn with_period(period: Duration) -> Self {
        Self { state: SchedulerState::Idle, period }
    }

    #[inline]
    pub const fn state(&self) -> SchedulerState { self.state }

    #[inline]
    pub const fn period(&self) -> Duration { self.period }

    #[inline]
    pub const fn is_running(&self) -> bool { matches!(self.state, SchedulerState::Running { .. }) }

    /// Idle -> Running with the first tick due at `now`.
    ///
    /// Returns `false` (and changes nothing) if already running.
    pub fn start(
        &mut self,
        now: Instant,
    ) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = SchedulerState::Running { next_tick: now };
        true
    }

    /// Whether a pending tick has come due.
    pub fn is_due(
        &self,
        now: Instant,
    ) -> bool {
        match self.state {
            SchedulerState::Running { next_tick } => now >= next_tick,
            SchedulerState::Idle => false,
        }
    }

    /// Re-arm one period after `completed_at`, replacing any pending deadline.
    ///
    /// Does nothing when idle: a tick that finishes after `stop()` must not
    /// revive the loop.
    pub fn complete_tick(
        &mut self,
        completed_at: Instant,
    ) {
        if let SchedulerState::Running { next_tick } = &mut self.state {
            *next_tick = completed_at + self.period;
        }
    }

    /// Cancel any pending tick. Idempotent.
    pub fn stop(&mut self) { self.state = SchedulerState::Idle; }

    /// Pending deadline, if any.
    pub const fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            SchedulerState::Running { next_tick } => Some(next_tick),
            SchedulerState::Idle => None,
        }
    }
}

impl Default for RedrawScheduler {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================
