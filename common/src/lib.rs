//! Core of the Hexatime clock wallpaper.
//!
//! The background color of the wallpaper *is* the time: hour, minute and
//! second are each scaled into one RGB channel and the result is shown as a
//! hex color code, optionally with a digital clock drawn on top.
//!
//! This crate is platform-agnostic. A host provides a [`surface::Surface`]
//! and a [`time::TimeSource`], forwards lifecycle callbacks to
//! [`engine::HexatimeEngine`] and calls its `poll` from its event loop.
//!
//! - [`encoder`]: time -> 6-digit hex color
//! - [`scheduler`]: one-second redraw state machine
//! - [`render`]: fill + optional text through the [`render::Canvas`] trait
//! - [`face`]: display string, anchor position and text style
//! - [`settings`]: settings store, change notification, [`settings::ClockConfig`]
//! - [`surface`]: surface trait and scoped lock guard
//! - [`engine`]: lifecycle, settings listener and tick loop
//! - [`colors`], [`config`], [`styles`], [`time`]: supporting pieces

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod colors;
pub mod config;
pub mod encoder;
pub mod engine;
pub mod face;
pub mod render;
pub mod scheduler;
pub mod settings;
pub mod styles;
pub mod surface;
pub mod time;

// Re-export commonly used items
pub use encoder::{HexColor, color_for};
pub use engine::{HexatimeEngine, TickOutcome, WallpaperLifecycle};
pub use settings::{ClockConfig, SettingValue, SettingsListener, SettingsStore};
pub use surface::{Surface, SurfaceError};
pub use time::{ClockTime, SystemTimeSource, TimeSource};
