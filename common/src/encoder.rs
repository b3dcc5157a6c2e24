//! Time-to-color encoding.
//!
//! Each time component is scaled linearly into one 8-bit channel:
//!
//! | Component | Range | Channel |
//! |-----------|-------|---------|
//! | Hour      | 0-23  | Red     |
//! | Minute    | 0-59  | Green   |
//! | Second    | 0-59  | Blue    |
//!
//! `channel = round(component * 255 / max)`, computed with integer math as
//! `(component * 255 + max / 2) / max`. Midnight is `000000` and 23:59:59 is
//! `ffffff`. The string form is always six lowercase hex digits.

use core::fmt::{self, Write};

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use heapless::String;

use crate::config::{HOUR_MAX, MINUTE_SECOND_MAX};
use crate::time::ClockTime;

/// A 24-bit color derived from a clock reading, with its hex spelling.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HexColor {
    rgb: Rgb888,
    hex: String<6>,
}

impl HexColor {
    /// Build from channel values, formatting the lowercase hex digits once.
    pub fn from_channels(
        r: u8,
        g: u8,
        b: u8,
    ) -> Self {
        let mut hex = String::new();
        // Six digits always fit the buffer.
        write!(hex, "{r:02x}{g:02x}{b:02x}").ok();
        Self { rgb: Rgb888::new(r, g, b), hex }
    }

    /// Six lowercase hex digits, no prefix.
    #[inline]
    pub fn as_str(&self) -> &str { self.hex.as_str() }

    /// Color value for drawing.
    #[inline]
    pub const fn rgb(&self) -> Rgb888 { self.rgb }

    /// Perceived luminance (0-255) using the ITU-R BT.601 weights.
    pub fn luma(&self) -> u32 {
        let (r, g, b) = (u32::from(self.rgb.r()), u32::from(self.rgb.g()), u32::from(self.rgb.b()));
        (r * 299 + g * 587 + b * 114) / 1000
    }
}

impl fmt::Display for HexColor {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scale `component` in `0..=max` to `0..=255`, rounding half up.
#[inline]
const fn scale_channel(
    component: u32,
    max: u32,
) -> u8 {
    ((component * 255 + max / 2) / max) as u8
}

/// Encode a wall-clock reading as a color.
///
/// Pure: the same reading always yields the same color.
pub fn color_for(time: &ClockTime) -> HexColor {
    HexColor::from_channels(
        scale_channel(time.hour(), HOUR_MAX),
        scale_channel(time.minute(), MINUTE_SECOND_MAX),
        scale_channel(time.second(), MINUTE_SECOND_MAX),
    )
}

// =============================================================================
// Tests
// =============================================================================
