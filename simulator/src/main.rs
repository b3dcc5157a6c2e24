//! Hexatime wallpaper simulator for desktop platforms.
//!
//! Hosts [`HexatimeEngine`] in an `embedded-graphics-simulator` window. The
//! window plays the part of the wallpaper surface, the keyboard plays the
//! part of the launcher (visibility) and the preference screen (settings).
//! See [`controls`] for the key map.
//!
//! Set `RUST_LOG=debug` to see settings being applied, `trace` for every frame.

mod controls;
mod surface;
mod timing;

use std::thread;
use std::time::Instant;

use embedded_graphics::prelude::Size;
use hexatime_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use hexatime_common::{HexatimeEngine, SettingsStore, SystemTimeSource, WallpaperLifecycle};
use log::info;

use crate::controls::{Control, handle_event};
use crate::surface::SimulatorSurface;
use crate::timing::POLL_INTERVAL;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut store = SettingsStore::new();
    let surface = SimulatorSurface::new("Hexatime", Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let mut engine = HexatimeEngine::new(surface, SystemTimeSource, &mut store);

    let mut visible = true;
    engine.on_show();

    loop {
        for event in engine.surface_mut().events() {
            if handle_event(event, &mut engine, &mut visible, &mut store) == Control::Quit {
                engine.on_teardown();
                info!("simulator closed after {} frame(s)", engine.frames_drawn());
                return;
            }
        }

        engine.poll();

        // Sleep until the next tick, but never so long that input lags.
        let sleep = engine
            .next_deadline()
            .map_or(POLL_INTERVAL, |deadline| deadline.saturating_duration_since(Instant::now()).min(POLL_INTERVAL));
        thread::sleep(sleep);
    }
}
