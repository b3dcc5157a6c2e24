//! Pre-computed text styles for the clock overlay.
//!
//! The overlay is always drawn centred on its anchor point, both horizontally
//! and vertically, so the position fractions in
//! [`ClockConfig`](crate::settings::ClockConfig) mean "where the middle of the
//! text goes". Only the font and color vary at runtime.

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

use crate::settings::ClockSize;

/// Text centred on its anchor in both axes.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).baseline(Baseline::Middle).build();

/// Font for each overlay size.
pub const fn clock_font(size: ClockSize) -> &'static MonoFont<'static> {
    match size {
        ClockSize::Small => &PROFONT_14_POINT,
        ClockSize::Medium => &PROFONT_18_POINT,
        ClockSize::Large => &PROFONT_24_POINT,
    }
}

/// Font plus color for the overlay text, resolved once per frame.
#[derive(Clone, Copy, Debug)]
pub struct ClockTextStyle {
    pub font: &'static MonoFont<'static>,
    pub color: Rgb888,
}

impl ClockTextStyle {
    #[inline]
    pub const fn new(
        size: ClockSize,
        color: Rgb888,
    ) -> Self {
        Self { font: clock_font(size), color }
    }

    /// Character style for `embedded-graphics` text drawing.
    #[inline]
    pub const fn character_style(&self) -> MonoTextStyle<'static, Rgb888> { MonoTextStyle::new(self.font, self.color) }
}
