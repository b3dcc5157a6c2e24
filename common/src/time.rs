//! Wall-clock readings and the time source seam.
//!
//! [`ClockTime`] wraps `chrono::NaiveTime`, so an hour outside 0-23 or a
//! minute/second outside 0-59 cannot be constructed. The color encoder and
//! the clock face can therefore treat every component as in range.

use std::time::Instant;

use chrono::{Local, NaiveTime, Timelike};

/// Hour, minute and second of the host's local wall clock.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Build a reading from components, `None` if any is out of range.
    pub fn from_hms(
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }

    /// Take the hour/minute/second of any chrono time value.
    pub fn of<T: Timelike>(time: &T) -> Self {
        // Leap seconds are folded into :59 by `Timelike::second`.
        Self::from_hms(time.hour(), time.minute(), time.second()).unwrap_or_default()
    }

    /// Hour in 24-hour form (0-23).
    #[inline]
    pub fn hour(&self) -> u32 { self.0.hour() }

    /// Hour in 12-hour form (1-12).
    #[inline]
    pub fn hour12(&self) -> u32 { self.0.hour12().1 }

    #[inline]
    pub fn minute(&self) -> u32 { self.0.minute() }

    #[inline]
    pub fn second(&self) -> u32 { self.0.second() }
}

impl Default for ClockTime {
    fn default() -> Self { Self(NaiveTime::default()) }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self { Self::of(&time) }
}

// =============================================================================
// Time Source
// =============================================================================

/// Supplies both the wall-clock reading shown on screen and the monotonic
/// instant used for tick scheduling.
///
/// The engine is generic over this so tests can step time by hand.
pub trait TimeSource {
    /// Current local wall-clock time.
    fn wall_time(&self) -> ClockTime;

    /// Current monotonic instant.
    fn instant(&self) -> Instant;
}

/// Host clock: `chrono::Local` for the face, `Instant::now` for scheduling.
#[derive(Clone, Copy, Default, Debug)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn wall_time(&self) -> ClockTime { ClockTime::of(&Local::now()) }

    fn instant(&self) -> Instant { Instant::now() }
}

// =============================================================================
// Tests
// =============================================================================
