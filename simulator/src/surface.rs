//! Desktop surface backed by an `embedded-graphics-simulator` window.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use hexatime_common::colors::BLACK;
use hexatime_common::{Surface, SurfaceError};

/// Window plus framebuffer. Posting a frame pushes the framebuffer to the window.
pub struct SimulatorSurface {
    display: SimulatorDisplay<Rgb888>,
    window: Window,
    locked: bool,
}

impl SimulatorSurface {
    /// Open a window of the given size and show a black frame.
    pub fn new(
        title: &str,
        size: Size,
    ) -> Self {
        let mut display = SimulatorDisplay::new(size);
        let output_settings = OutputSettingsBuilder::new().scale(1).build();
        let mut window = Window::new(title, &output_settings);

        // The window is created on first update; events() needs it to exist.
        display.clear(BLACK).ok();
        window.update(&display);

        Self { display, window, locked: false }
    }

    /// Drain pending window events.
    pub fn events(&mut self) -> Vec<SimulatorEvent> { self.window.events().collect() }
}

impl Surface for SimulatorSurface {
    type Canvas = SimulatorDisplay<Rgb888>;

    fn lock(&mut self) -> Result<(), SurfaceError> {
        if self.locked {
            return Err(SurfaceError::Unavailable);
        }
        self.locked = true;
        Ok(())
    }

    fn canvas(&mut self) -> &mut Self::Canvas { &mut self.display }

    fn unlock_and_post(&mut self) {
        self.locked = false;
        self.window.update(&self.display);
    }
}
