//! Keyboard controls standing in for the platform's lifecycle and settings UI.
//!
//! | Key | Action |
//! |-----|--------|
//! | `V` | Toggle visibility (show/hide the wallpaper) |
//! | `C` | Toggle the clock overlay |
//! | `F` | Toggle 12/24-hour display |
//! | `H` | Toggle the `#` prefix |
//! | `D` | Cycle divider (colon, space, none) |
//! | `S` | Cycle text size |
//! | `J`/`L` | Move the clock left/right |
//! | `I`/`K` | Move the clock up/down |
//!
//! Setting keys write to the [`SettingsStore`]; the engine picks the change up
//! on its next tick, just as it would from a platform preference screen.
//! Key repeat is ignored to prevent toggle spam when holding keys.

use embedded_graphics_simulator::SimulatorEvent;
use embedded_graphics_simulator::sdl2::Keycode;
use hexatime_common::settings::{
    KEY_CLOCK_DIVIDER,
    KEY_CLOCK_FORMAT,
    KEY_CLOCK_HASH,
    KEY_CLOCK_HORIZONTAL,
    KEY_CLOCK_SIZE,
    KEY_CLOCK_VERTICAL,
    KEY_ENABLE_CLOCK,
    TimeFormat,
};
use hexatime_common::{ClockConfig, SettingsStore, WallpaperLifecycle};
use log::info;

use crate::timing::POSITION_STEP;

/// What the event loop should do after an event.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Control {
    Continue,
    Quit,
}

/// Apply one window event to the engine or the settings store.
pub fn handle_event<E: WallpaperLifecycle>(
    event: SimulatorEvent,
    engine: &mut E,
    visible: &mut bool,
    store: &mut SettingsStore,
) -> Control {
    match event {
        SimulatorEvent::Quit => return Control::Quit,
        SimulatorEvent::KeyDown { keycode, repeat, .. } if !repeat => {
            // Settings as the store holds them, including changes the engine has not applied yet.
            let current = ClockConfig::from_settings(store);
            match keycode {
                Keycode::V => {
                    *visible = !*visible;
                    engine.on_visibility_changed(*visible);
                }
                Keycode::C => store.set(KEY_ENABLE_CLOCK, !current.overlay_enabled),
                Keycode::F => {
                    let format = match current.format {
                        TimeFormat::TwentyFourHour => "12",
                        TimeFormat::TwelveHour => "24",
                    };
                    store.set(KEY_CLOCK_FORMAT, format);
                }
                Keycode::H => store.set(KEY_CLOCK_HASH, !current.show_hash),
                Keycode::D => store.set(KEY_CLOCK_DIVIDER, current.divider.next().setting_value()),
                Keycode::S => store.set(KEY_CLOCK_SIZE, current.size.next().setting_value()),
                Keycode::J => store.set(KEY_CLOCK_HORIZONTAL, nudge(current.horizontal, -POSITION_STEP)),
                Keycode::L => store.set(KEY_CLOCK_HORIZONTAL, nudge(current.horizontal, POSITION_STEP)),
                Keycode::I => store.set(KEY_CLOCK_VERTICAL, nudge(current.vertical, -POSITION_STEP)),
                Keycode::K => store.set(KEY_CLOCK_VERTICAL, nudge(current.vertical, POSITION_STEP)),
                _ => {}
            }
            info!("key {keycode:?}");
        }
        _ => {}
    }
    Control::Continue
}

/// Move a position fraction, staying within `[0, 1]`.
fn nudge(
    fraction: f32,
    step: f32,
) -> f32 {
    (fraction + step).clamp(0.0, 1.0)
}
