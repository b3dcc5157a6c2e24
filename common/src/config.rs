//! Application configuration constants.
//!
//! Compile-time defaults for the clock face and the redraw loop. Runtime
//! configuration lives in [`ClockConfig`](crate::settings::ClockConfig), which
//! starts from these values and is then updated from the settings store.

use core::time::Duration;

// =============================================================================
// Display Configuration
// =============================================================================

/// Simulator surface width in pixels (portrait phone-like aspect).
pub const SCREEN_WIDTH: u32 = 270;

/// Simulator surface height in pixels.
pub const SCREEN_HEIGHT: u32 = 480;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Nominal redraw period. Measured from the end of one tick to the start of the next.
pub const UPDATE_FREQ: Duration = Duration::from_millis(1000);

// =============================================================================
// Clock Overlay Defaults
// =============================================================================

/// Digital clock overlay is shown unless the user turns it off.
pub const DEFAULT_OVERLAY_ENABLED: bool = true;

/// Prefix the display string with `#` so it reads as a color code.
pub const DEFAULT_SHOW_HASH: bool = true;

/// Horizontal text anchor as a fraction of the surface width.
pub const DEFAULT_HORIZONTAL: f32 = 0.5;

/// Vertical text anchor as a fraction of the surface height.
pub const DEFAULT_VERTICAL: f32 = 0.5;

// =============================================================================
// Color Encoding
// =============================================================================

/// Largest hour value; maps to channel value 0xFF.
pub const HOUR_MAX: u32 = 23;

/// Largest minute/second value; maps to channel value 0xFF.
pub const MINUTE_SECOND_MAX: u32 = 59;

/// Perceived luminance (0-255) above which the overlay switches to dark text.
pub const LIGHT_BACKGROUND_LUMA: u32 = 140;
