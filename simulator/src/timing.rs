//! Timing constants for the simulator.
//!
//! The redraw period itself lives in the common crate
//! ([`UPDATE_FREQ`](hexatime_common::config::UPDATE_FREQ)); these only bound
//! how long the event loop may sleep.

use std::time::Duration;

/// Longest sleep between event polls, so key presses stay responsive while
/// waiting for the next tick (or while hidden, when no tick is pending).
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Step applied to the position fractions per key press.
pub const POSITION_STEP: f32 = 0.05;
