//! Frame rendering.
//!
//! A frame is at most two drawing operations:
//!
//! | Step | When | Operation |
//! |------|------|-----------|
//! | 1 | Always | Fill the whole surface with the time color |
//! | 2 | Overlay enabled | Draw the display string at its anchor |
//!
//! Rendering goes through the small [`Canvas`] trait rather than straight to
//! `DrawTarget`, so the operations can be observed one by one. Every
//! `embedded-graphics` draw target gets a `Canvas` implementation for free.

use embedded_graphics::{pixelcolor::Rgb888, prelude::*, text::Text};

use crate::face::ClockOverlay;
use crate::styles::{CENTERED, ClockTextStyle};

/// Drawing primitives the renderer needs from a locked surface.
pub trait Canvas {
    type Error: core::fmt::Debug;

    /// Surface size in pixels.
    fn size(&self) -> Size;

    /// Fill the entire surface with `color`.
    fn fill_color(
        &mut self,
        color: Rgb888,
    ) -> Result<(), Self::Error>;

    /// Draw `text` centred on `position`.
    fn draw_text(
        &mut self,
        text: &str,
        position: Point,
        style: &ClockTextStyle,
    ) -> Result<(), Self::Error>;
}

impl<D> Canvas for D
where
    D: DrawTarget<Color = Rgb888>,
    D::Error: core::fmt::Debug,
{
    type Error = D::Error;

    fn size(&self) -> Size { self.bounding_box().size }

    fn fill_color(
        &mut self,
        color: Rgb888,
    ) -> Result<(), Self::Error> {
        self.clear(color)
    }

    fn draw_text(
        &mut self,
        text: &str,
        position: Point,
        style: &ClockTextStyle,
    ) -> Result<(), Self::Error> {
        Text::with_text_style(text, position, style.character_style(), CENTERED).draw(self)?;
        Ok(())
    }
}

/// Render one frame: fill, then the overlay if enabled.
///
/// Errors from the canvas are returned as-is; recovering from them is the
/// caller's job.
pub fn render_frame<C: Canvas + ?Sized>(
    canvas: &mut C,
    color: Rgb888,
    overlay_enabled: bool,
    overlay: &ClockOverlay,
) -> Result<(), C::Error> {
    canvas.fill_color(color)?;
    if overlay_enabled {
        canvas.draw_text(overlay.text.as_str(), overlay.position, &overlay.style)?;
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
