//! Drawable surface and its scoped lock.
//!
//! A surface is locked for the duration of one frame. The lock is held by
//! [`LockedCanvas`], which unlocks and posts the frame when dropped, so the
//! surface is released on every exit path: success, a canvas error returned
//! with `?`, or a panic while drawing.
//!
//! If [`Surface::lock`] itself fails, nothing was acquired and nothing is
//! released.

use thiserror::Error;

use crate::render::Canvas;

/// Why a frame could not be drawn this tick. Always recovered locally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface could not be acquired (not created yet, being resized, ...).
    #[error("surface unavailable")]
    Unavailable,

    /// The surface was acquired but drawing into it failed.
    #[error("drawing failed: {0}")]
    Draw(String),
}

/// A platform drawing target that must be locked before use.
pub trait Surface {
    type Canvas: Canvas;

    /// Acquire the surface for drawing.
    fn lock(&mut self) -> Result<(), SurfaceError>;

    /// The canvas. Only called between a successful `lock` and `unlock_and_post`.
    fn canvas(&mut self) -> &mut Self::Canvas;

    /// Release the surface and present what was drawn.
    fn unlock_and_post(&mut self);
}

/// A locked surface. Unlocks and posts on drop.
pub struct LockedCanvas<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> LockedCanvas<'a, S> {
    /// Lock `surface`, returning a guard that releases it on drop.
    pub fn acquire(surface: &'a mut S) -> Result<Self, SurfaceError> {
        surface.lock()?;
        Ok(Self { surface })
    }

    /// The locked surface's canvas.
    #[inline]
    pub fn canvas(&mut self) -> &mut S::Canvas { self.surface.canvas() }
}

impl<S: Surface + ?Sized> Drop for LockedCanvas<'_, S> {
    fn drop(&mut self) { self.surface.unlock_and_post(); }
}

// =============================================================================
// Tests
// =============================================================================
