// Headless overlay surface: collects fills as instanced quads for an overlay pipeline.

use crate::config::theme::Color;
use crate::renderer::surface::{DrawSurface, Rect, SurfaceError, SurfaceSize};
use serde::Serialize;

/// Per-instance data for one overlay quad.
/// Layout is `rect` at byte 0 and `color` at byte 16, matching a vec4/vec4 vertex stream.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OverlayInstance {
    pub rect: [f32; 4],  // x, y, width, height in physical pixels
    pub color: [f32; 4], // RGBA
}

impl OverlayInstance {
    pub fn new(rect: Rect, color: Color) -> Self {
        Self {
            rect: [rect.x, rect.y, rect.width, rect.height],
            color: color.to_array(),
        }
    }
}

/// Uniform data for the overlay shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OverlayUniforms {
    pub surface_size: [f32; 2],
    #[serde(skip)]
    pub _padding: [f32; 2],
}

/// A [`DrawSurface`] that batches fills into [`OverlayInstance`]s.
///
/// The batch is what a GPU overlay pass would upload each frame; `clear`
/// empties it. Physical size is clamped to the device's max texture edge.
#[derive(Debug)]
pub struct QuadBatchSurface {
    size: SurfaceSize,
    max_dimension: u32,
    instances: Vec<OverlayInstance>,
    attached: bool,
    clear_count: usize,
    fill_count: usize,
}

impl QuadBatchSurface {
    /// Create an attached, 1x1 surface.
    pub fn new(max_dimension: u32) -> Self {
        Self {
            size: SurfaceSize::scaled(1, 1, 1.0),
            max_dimension: max_dimension.max(1),
            instances: Vec::new(),
            attached: true,
            clear_count: 0,
            fill_count: 0,
        }
    }

    /// Detach from the display tree; every later draw call fails.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Reattach after [`QuadBatchSurface::detach`].
    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn instances(&self) -> &[OverlayInstance] {
        &self.instances
    }

    /// Raw instance buffer contents.
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn uniforms(&self) -> OverlayUniforms {
        OverlayUniforms {
            surface_size: [self.size.physical_width as f32, self.size.physical_height as f32],
            _padding: [0.0; 2],
        }
    }

    /// Number of `clear` calls since creation.
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }

    /// Number of `fill_rect` calls since creation.
    pub fn fill_count(&self) -> usize {
        self.fill_count
    }

    fn ensure_attached(&self) -> Result<(), SurfaceError> {
        if self.attached {
            Ok(())
        } else {
            Err(SurfaceError::Detached)
        }
    }
}

impl DrawSurface for QuadBatchSurface {
    fn set_size(&mut self, size: SurfaceSize) -> Result<(), SurfaceError> {
        self.ensure_attached()?;
        let width = size.physical_width.min(self.max_dimension).max(1);
        let height = size.physical_height.min(self.max_dimension).max(1);
        if (width, height) != (size.physical_width, size.physical_height) {
            log::warn!(
                "Overlay surface {}x{} exceeds max dimension {}, clamped to {}x{}",
                size.physical_width,
                size.physical_height,
                self.max_dimension,
                width,
                height
            );
        }
        self.size = SurfaceSize {
            physical_width: width,
            physical_height: height,
            ..size
        };
        self.instances.clear();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.ensure_attached()?;
        self.instances.clear();
        self.clear_count += 1;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError> {
        self.ensure_attached()?;
        self.fill_count += 1;
        // Nothing to upload for a zero-area fill
        if !rect.is_empty() {
            self.instances.push(OverlayInstance::new(rect, color));
        }
        Ok(())
    }
}
