//! Clock face layout: display string, anchor position and text style.
//!
//! Recomputed every tick from the current reading, the current color and the
//! surface size, so a resized surface or a changed setting shows up on the
//! very next frame.

use core::fmt::Write;

use embedded_graphics::prelude::{Point, Size};
use heapless::String;

use crate::colors::overlay_text_color;
use crate::encoder::HexColor;
use crate::settings::{ClockConfig, TimeFormat};
use crate::styles::ClockTextStyle;
use crate::time::ClockTime;

/// Longest display string: `#` + 3 two-digit fields + 2 one-char dividers.
pub const DISPLAY_LEN: usize = 9;

/// Everything needed to draw the overlay text for one frame.
#[derive(Clone, Debug)]
pub struct ClockOverlay {
    pub text: String<DISPLAY_LEN>,
    pub position: Point,
    pub style: ClockTextStyle,
}

/// Format the reading for display, e.g. `#09:02:47` or `0902 47`.
pub fn display_text(
    time: &ClockTime,
    config: &ClockConfig,
) -> String<DISPLAY_LEN> {
    let hour = match config.format {
        TimeFormat::TwentyFourHour => time.hour(),
        TimeFormat::TwelveHour => time.hour12(),
    };
    let divider = config.divider.as_str();

    let mut text = String::new();
    if config.show_hash {
        text.push('#').ok();
    }
    // At most DISPLAY_LEN characters, cannot overflow.
    write!(text, "{hour:02}{divider}{:02}{divider}{:02}", time.minute(), time.second()).ok();
    text
}

/// Map position fractions onto the last addressable pixel of each axis.
pub fn anchor_point(
    config: &ClockConfig,
    size: Size,
) -> Point {
    let axis = |fraction: f32, extent: u32| (fraction.clamp(0.0, 1.0) * extent.saturating_sub(1) as f32).round() as i32;
    Point::new(axis(config.horizontal, size.width), axis(config.vertical, size.height))
}

/// Lay out the overlay for one frame.
pub fn layout(
    time: &ClockTime,
    background: &HexColor,
    config: &ClockConfig,
    size: Size,
) -> ClockOverlay {
    ClockOverlay {
        text: display_text(time, config),
        position: anchor_point(config, size),
        style: ClockTextStyle::new(config.size, overlay_text_color(background)),
    }
}

// =============================================================================
// Tests
// =============================================================================
