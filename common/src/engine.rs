//! The wallpaper engine: lifecycle, settings and the tick loop in one place.
//!
//! ```text
//!   on_show ──► scheduler.start ──► tick ─┐
//!                                         │   drain settings
//!   poll (due?) ──────────────────► tick ─┤   read clock, encode color
//!                                         │   lock surface, render, unlock
//!   on_hide / on_teardown ──► stop        └─► scheduler.complete_tick
//! ```
//!
//! The engine never drives time itself. Whoever owns the event loop calls
//! [`HexatimeEngine::poll`] and may sleep until
//! [`HexatimeEngine::next_deadline`] in between.
//!
//! # Failure Handling
//!
//! A tick whose surface cannot be locked, or whose drawing fails, is logged
//! and skipped. The surface is still released and the next tick is still
//! armed while visible.
//!
//! # Teardown
//!
//! [`WallpaperLifecycle::on_teardown`] only stops the loop. A host may
//! recreate the surface and show the same engine again. The settings
//! subscription lives as long as the engine and is dropped with it.

use std::time::Instant;

use flume::Receiver;
use log::{debug, info, trace, warn};

use crate::encoder::color_for;
use crate::face::layout;
use crate::render::{Canvas, render_frame};
use crate::scheduler::{RedrawScheduler, SchedulerState};
use crate::settings::{ClockConfig, SettingChange, SettingValue, SettingsListener, SettingsStore};
use crate::surface::{LockedCanvas, Surface, SurfaceError};
use crate::time::{SystemTimeSource, TimeSource};

/// Platform lifecycle callbacks, as a plain state-machine interface.
pub trait WallpaperLifecycle {
    /// The surface became visible.
    fn on_show(&mut self);

    /// The surface was hidden.
    fn on_hide(&mut self);

    /// The surface was destroyed. Stops drawing until the next show.
    fn on_teardown(&mut self);

    /// Convenience for platforms that report visibility as a flag.
    fn on_visibility_changed(
        &mut self,
        visible: bool,
    ) {
        if visible { self.on_show() } else { self.on_hide() }
    }
}

/// What one call to [`HexatimeEngine::poll`] did.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TickOutcome {
    /// No tick was due (or the engine is idle).
    NotDue,
    /// A frame was drawn and posted.
    Drawn,
    /// The tick ran but the frame was skipped.
    Skipped(SurfaceError),
}

/// Hex clock wallpaper engine.
pub struct HexatimeEngine<S: Surface, T: TimeSource = SystemTimeSource> {
    surface: S,
    time: T,
    scheduler: RedrawScheduler,
    config: ClockConfig,
    /// Settings subscription, unregistered when the engine is dropped.
    settings: Receiver<SettingChange>,
    visible: bool,
    frames_drawn: u64,
}

impl<S: Surface, T: TimeSource> HexatimeEngine<S, T> {
    /// Build an engine, reading the initial configuration from `settings` and
    /// subscribing to its changes. The engine starts hidden.
    pub fn new(
        surface: S,
        time: T,
        settings: &mut SettingsStore,
    ) -> Self {
        Self::with_scheduler(surface, time, settings, RedrawScheduler::new())
    }

    /// As [`new`](Self::new), with a custom scheduler (e.g. another period).
    pub fn with_scheduler(
        surface: S,
        time: T,
        settings: &mut SettingsStore,
        scheduler: RedrawScheduler,
    ) -> Self {
        let config = ClockConfig::from_settings(settings);
        debug!("engine created with {config:?}");
        Self {
            surface,
            time,
            scheduler,
            config,
            settings: settings.subscribe(),
            visible: false,
            frames_drawn: 0,
        }
    }

    #[inline]
    pub const fn config(&self) -> &ClockConfig { &self.config }

    #[inline]
    pub const fn is_visible(&self) -> bool { self.visible }

    #[inline]
    pub const fn scheduler_state(&self) -> SchedulerState { self.scheduler.state() }

    /// When the next tick is due, if one is pending.
    #[inline]
    pub const fn next_deadline(&self) -> Option<Instant> { self.scheduler.next_deadline() }

    /// Frames successfully drawn and posted since construction.
    #[inline]
    pub const fn frames_drawn(&self) -> u64 { self.frames_drawn }

    #[inline]
    pub const fn surface(&self) -> &S { &self.surface }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }

    /// Run a tick if one is due.
    pub fn poll(&mut self) -> TickOutcome {
        if !self.scheduler.is_due(self.time.instant()) {
            return TickOutcome::NotDue;
        }
        self.tick()
    }

    /// One full tick: apply settings, draw, re-arm.
    fn tick(&mut self) -> TickOutcome {
        self.drain_settings();

        let outcome = match self.draw_frame() {
            Ok(()) => {
                self.frames_drawn += 1;
                TickOutcome::Drawn
            }
            Err(err) => {
                warn!("skipping frame: {err}");
                TickOutcome::Skipped(err)
            }
        };

        // No-op once hidden, so a finished tick cannot revive the loop.
        self.scheduler.complete_tick(self.time.instant());
        outcome
    }

    /// Lock, render, unlock. The guard unlocks on every path out of here.
    fn draw_frame(&mut self) -> Result<(), SurfaceError> {
        let time = self.time.wall_time();
        let color = color_for(&time);

        let mut locked = LockedCanvas::acquire(&mut self.surface)?;
        let canvas = locked.canvas();
        let overlay = layout(&time, &color, &self.config, canvas.size());
        trace!("frame #{color} overlay={}", self.config.overlay_enabled);

        render_frame(canvas, color.rgb(), self.config.overlay_enabled, &overlay)
            .map_err(|err| SurfaceError::Draw(format!("{err:?}")))
    }

    /// Apply every pending setting change, in order.
    fn drain_settings(&mut self) {
        while let Ok(change) = self.settings.try_recv() {
            self.on_setting_changed(&change.key, &change.value);
        }
    }
}

impl<S: Surface, T: TimeSource> WallpaperLifecycle for HexatimeEngine<S, T> {
    fn on_show(&mut self) {
        self.visible = true;
        if self.scheduler.start(self.time.instant()) {
            info!("visible, starting redraw loop");
            self.tick();
        }
    }

    fn on_hide(&mut self) {
        if self.visible {
            info!("hidden, stopping redraw loop");
        }
        self.visible = false;
        self.scheduler.stop();
    }

    fn on_teardown(&mut self) {
        if self.visible {
            info!("surface torn down after {} frame(s)", self.frames_drawn);
        }
        self.on_hide();
    }
}

impl<S: Surface, T: TimeSource> Drop for HexatimeEngine<S, T> {
    // The receiver is dropped right after this, which unregisters it.
    fn drop(&mut self) { debug!("engine dropped after {} frame(s), unsubscribing", self.frames_drawn); }
}

impl<S: Surface, T: TimeSource> SettingsListener for HexatimeEngine<S, T> {
    fn on_setting_changed(
        &mut self,
        key: &str,
        value: &SettingValue,
    ) {
        match self.config.apply(key, value) {
            Ok(true) => debug!("applied setting {key} = {value:?}"),
            Ok(false) => trace!("ignoring unrecognised setting {key}"),
            Err(err) => warn!("{err}"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    use embedded_graphics::pixelcolor::Rgb888;

    use super::*;
    use crate::render::tests::Op;
    use crate::settings::{KEY_CLOCK_FORMAT, KEY_CLOCK_HASH, KEY_ENABLE_CLOCK};
    use crate::surface::tests::MockSurface;
    use crate::time::ClockTime;

    /// Hand-stepped time shared between the test and the engine.
    #[derive(Clone)]
    struct ManualTime {
        now: Rc<Cell<Instant>>,
        wall: Rc<Cell<ClockTime>>,
    }

    impl ManualTime {
        fn new() -> Self {
            Self {
                now: Rc::new(Cell::new(Instant::now())),
                wall: Rc::new(Cell::new(ClockTime::from_hms(9, 2, 47).unwrap())),
            }
        }

        fn advance(
            &self,
            millis: u64,
        ) {
            self.now.set(self.now.get() + Duration::from_millis(millis));
        }
    }

    impl TimeSource for ManualTime {
        fn wall_time(&self) -> ClockTime { self.wall.get() }

        fn instant(&self) -> Instant { self.now.get() }
    }

    fn engine_with(
        surface: MockSurface,
        store: &mut SettingsStore,
    ) -> (HexatimeEngine<MockSurface, ManualTime>, ManualTime) {
        let time = ManualTime::new();
        (HexatimeEngine::new(surface, time.clone(), store), time)
    }

    fn engine() -> (HexatimeEngine<MockSurface, ManualTime>, ManualTime) {
        engine_with(MockSurface::default(), &mut SettingsStore::new())
    }

    #[test]
    fn test_starts_idle_and_hidden() {
        let (mut engine, _time) = engine();
        assert!(!engine.is_visible());
        assert_eq!(engine.scheduler_state(), SchedulerState::Idle);
        assert_eq!(engine.poll(), TickOutcome::NotDue);
        assert_eq!(engine.surface().lock_attempts, 0);
    }

    #[test_log::test]
    fn test_show_draws_once_immediately() {
        let (mut engine, time) = engine();

        engine.on_show();
        assert_eq!(engine.surface().lock_attempts, 1);
        assert_eq!(engine.surface().posts, 1);
        assert_eq!(engine.frames_drawn(), 1);

        // Nothing more before the first interval elapses.
        time.advance(999);
        assert_eq!(engine.poll(), TickOutcome::NotDue);
        assert_eq!(engine.surface().lock_attempts, 1);

        time.advance(1);
        assert_eq!(engine.poll(), TickOutcome::Drawn);
        assert_eq!(engine.surface().lock_attempts, 2);
    }

    #[test]
    fn test_show_twice_does_not_double_schedule() {
        let (mut engine, time) = engine();
        engine.on_show();
        time.advance(300);
        engine.on_show();
        assert_eq!(engine.surface().lock_attempts, 1);
        assert_eq!(engine.next_deadline(), Some(time.instant() - Duration::from_millis(300) + Duration::from_secs(1)));
    }

    #[test]
    fn test_frame_contents() {
        let (mut engine, _time) = engine();
        engine.on_show();

        let ops = &engine.surface().canvas.ops;
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0], Op::Fill(Rgb888::new(0x64, 0x09, 0xcb)));
        assert!(matches!(&ops[1], Op::Text(text, _, _) if text == "#09:02:47"));
    }

    #[test]
    fn test_hide_cancels_pending_tick() {
        let (mut engine, time) = engine();
        engine.on_show();
        time.advance(500);

        engine.on_hide();
        assert_eq!(engine.scheduler_state(), SchedulerState::Idle);

        for _ in 0..5 {
            time.advance(1000);
            assert_eq!(engine.poll(), TickOutcome::NotDue);
        }
        assert_eq!(engine.surface().lock_attempts, 1);

        // Visible again: exactly one immediate draw.
        engine.on_visibility_changed(true);
        assert_eq!(engine.surface().lock_attempts, 2);
    }

    #[test]
    fn test_hide_twice_is_noop() {
        let (mut engine, _time) = engine();
        engine.on_show();
        engine.on_hide();
        engine.on_hide();
        assert_eq!(engine.scheduler_state(), SchedulerState::Idle);
        assert!(!engine.is_visible());
    }

    #[test_log::test]
    fn test_lock_failure_keeps_loop_running() {
        let surface = MockSurface { fail_locks: vec![1], ..MockSurface::default() };
        let (mut engine, time) = engine_with(surface, &mut SettingsStore::new());

        engine.on_show();
        assert_eq!(engine.surface().lock_attempts, 1);
        assert_eq!(engine.surface().posts, 0);
        assert!(engine.next_deadline().is_some());

        time.advance(1000);
        assert_eq!(engine.poll(), TickOutcome::Drawn);
        assert_eq!(engine.surface().lock_attempts, 2);
        assert_eq!(engine.surface().posts, 1);
        assert_eq!(engine.frames_drawn(), 1);
    }

    #[test]
    fn test_lock_failure_outcome() {
        let surface = MockSurface { fail_locks: vec![2], ..MockSurface::default() };
        let (mut engine, time) = engine_with(surface, &mut SettingsStore::new());
        engine.on_show();
        time.advance(1000);
        assert_eq!(engine.poll(), TickOutcome::Skipped(SurfaceError::Unavailable));
        time.advance(1000);
        assert_eq!(engine.poll(), TickOutcome::Drawn);
    }

    #[test]
    fn test_draw_failure_releases_surface_and_reschedules() {
        let (mut engine, time) = engine();
        engine.surface_mut().canvas.fail_fill = true;

        engine.on_show();
        assert!(!engine.surface().locked);
        assert_eq!(engine.surface().posts, 1);
        assert_eq!(engine.frames_drawn(), 0);

        time.advance(1000);
        assert!(matches!(engine.poll(), TickOutcome::Skipped(SurfaceError::Draw(_))));
        assert_eq!(engine.surface().lock_attempts, 2);
        assert_eq!(engine.surface().posts, 2);
    }

    #[test]
    fn test_config_seeded_from_store() {
        let mut store = SettingsStore::new();
        store.set(KEY_ENABLE_CLOCK, false);
        let (mut engine, _time) = engine_with(MockSurface::default(), &mut store);

        assert!(!engine.config().overlay_enabled);
        engine.on_show();
        assert_eq!(engine.surface().canvas.ops.len(), 1);
    }

    #[test]
    fn test_setting_change_applies_on_next_tick() {
        let mut store = SettingsStore::new();
        let (mut engine, time) = engine_with(MockSurface::default(), &mut store);
        engine.on_show();

        store.set(KEY_ENABLE_CLOCK, false);
        store.set(KEY_CLOCK_HASH, false);
        // Not applied until the loop runs again.
        assert!(engine.config().overlay_enabled);

        time.advance(1000);
        engine.poll();
        assert!(!engine.config().overlay_enabled);
        assert!(!engine.config().show_hash);
        // Second frame is a fill only.
        assert_eq!(engine.surface().canvas.ops.len(), 3);
        assert!(matches!(engine.surface().canvas.ops[2], Op::Fill(_)));
    }

    #[test_log::test]
    fn test_bad_and_unknown_settings_are_ignored() {
        let mut store = SettingsStore::new();
        let (mut engine, time) = engine_with(MockSurface::default(), &mut store);
        engine.on_show();

        store.set("live_wallpaper_background", true);
        store.set(KEY_CLOCK_FORMAT, "13");
        time.advance(1000);

        assert_eq!(engine.poll(), TickOutcome::Drawn);
        assert_eq!(*engine.config(), ClockConfig::default());
    }

    #[test]
    fn test_direct_listener_call() {
        let (mut engine, _time) = engine();
        engine.on_setting_changed(KEY_CLOCK_FORMAT, &"12".into());
        assert_eq!(engine.config().format, crate::settings::TimeFormat::TwelveHour);
    }

    #[test_log::test]
    fn test_teardown_stops_until_shown_again() {
        let mut store = SettingsStore::new();
        let (mut engine, time) = engine_with(MockSurface::default(), &mut store);
        engine.on_show();

        engine.on_teardown();
        assert!(!engine.is_visible());
        assert_eq!(engine.scheduler_state(), SchedulerState::Idle);
        time.advance(5000);
        assert_eq!(engine.poll(), TickOutcome::NotDue);
        assert_eq!(engine.surface().lock_attempts, 1);

        // Teardown again is harmless.
        engine.on_teardown();
        assert_eq!(engine.scheduler_state(), SchedulerState::Idle);

        // Surface recreated: drawing resumes, settings still arrive.
        store.set(KEY_ENABLE_CLOCK, false);
        engine.on_visibility_changed(true);
        assert!(engine.is_visible());
        assert_eq!(engine.surface().lock_attempts, 2);
        assert!(!engine.config().overlay_enabled);

        time.advance(3000);
        assert_eq!(engine.poll(), TickOutcome::Drawn);
        assert_eq!(engine.surface().lock_attempts, 3);
        assert_eq!(engine.frames_drawn(), 3);
    }

    #[test]
    fn test_drop_unregisters_from_store() {
        let mut store = SettingsStore::new();
        let (mut engine, _time) = engine_with(MockSurface::default(), &mut store);
        engine.on_show();
        assert_eq!(store.subscriber_count(), 1);

        // Teardown alone keeps the subscription.
        engine.on_teardown();
        assert_eq!(store.subscriber_count(), 1);

        drop(engine);
        assert_eq!(store.subscriber_count(), 0);
        // Setting after unregistration prunes the dead sender without error.
        store.set(KEY_CLOCK_HASH, false);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_wall_clock_drives_color() {
        let (mut engine, time) = engine();
        time.wall.set(ClockTime::from_hms(23, 59, 59).unwrap());
        engine.on_show();
        assert_eq!(engine.surface().canvas.ops[0], Op::Fill(Rgb888::new(0xff, 0xff, 0xff)));

        time.wall.set(ClockTime::from_hms(0, 0, 0).unwrap());
        time.advance(1000);
        engine.poll();
        assert_eq!(engine.surface().canvas.ops[2], Op::Fill(Rgb888::new(0, 0, 0)));
    }
}
