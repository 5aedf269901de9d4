// Drawing surface contract for overlay layers.

use crate::config::theme::Color;
use serde::Serialize;

/// Axis-aligned rectangle in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Backing size of a surface: the logical display size and the device buffer size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SurfaceSize {
    pub logical_width: u32,
    pub logical_height: u32,
    pub physical_width: u32,
    pub physical_height: u32,
}

impl SurfaceSize {
    /// Size a surface for a logical viewport at the given pixel density.
    /// Physical dimensions are rounded and never drop below one pixel.
    pub fn scaled(logical_width: u32, logical_height: u32, scale: f32) -> Self {
        let physical = |dim: u32| ((dim as f32 * scale).round() as u32).max(1);
        Self {
            logical_width,
            logical_height,
            physical_width: physical(logical_width),
            physical_height: physical(logical_height),
        }
    }
}

/// Errors raised by a drawing surface.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("drawing surface is not attached to the display tree")]
    Detached,
    #[error("drawing surface backend error: {0}")]
    Backend(String),
}

/// A 2D surface owned exclusively by one overlay layer.
///
/// Surfaces are created and attached to the display tree elsewhere; a layer
/// only sizes, clears, and fills them.
pub trait DrawSurface {
    /// Resize both the device buffer and the logical display size.
    /// Existing contents are discarded.
    fn set_size(&mut self, size: SurfaceSize) -> Result<(), SurfaceError>;

    /// Erase the whole surface.
    fn clear(&mut self) -> Result<(), SurfaceError>;

    /// Fill `rect` (physical pixels) with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError>;
}
