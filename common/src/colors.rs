//! Color constants and overlay contrast selection.
//!
//! The background is whatever [`color_for`](crate::encoder::color_for) returns,
//! anywhere from `000000` to `ffffff`. The overlay text flips between black
//! and white so it stays readable across the whole day.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use crate::config::LIGHT_BACKGROUND_LUMA;
use crate::encoder::HexColor;

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Overlay text on light backgrounds, and the cleared surface.
pub const BLACK: Rgb888 = Rgb888::BLACK;

/// Pure white. Overlay text on dark backgrounds.
pub const WHITE: Rgb888 = Rgb888::WHITE;

/// Text color with the most contrast against `background`.
#[inline]
pub fn overlay_text_color(background: &HexColor) -> Rgb888 {
    if background.luma() > LIGHT_BACKGROUND_LUMA { BLACK } else { WHITE }
}

// =============================================================================
// Tests
// =============================================================================
