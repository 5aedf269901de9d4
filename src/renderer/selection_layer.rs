// Selection overlay layer: repaints the selection highlight only when it changes.

use crate::config::theme::Color;
use crate::renderer::damage::{FrameKey, RedrawGate};
use crate::renderer::selection_geometry;
use crate::renderer::surface::{DrawSurface, SurfaceSize};
use crate::renderer::viewport::{CellMetrics, SelectionRange, ViewportWindow};
use crate::renderer::{LayerError, RenderLayer};
use crate::terminal::{viewport_window, TerminalView};
use serde::Serialize;

/// What a render call did to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderOutcome {
    /// Nothing changed since the last paint; the surface was not touched.
    Skipped,
    /// The surface was cleared and left blank.
    Cleared,
    /// The surface was cleared and `rects` highlight rects were filled.
    Drawn { rects: usize },
}

/// Render layer painting the selection highlight onto its own surface.
///
/// Calls must be serialized by the owner; the layer keeps the last painted
/// frame to skip redundant work.
pub struct SelectionOverlayLayer<S: DrawSurface> {
    surface: S,
    gate: RedrawGate,
    color: Color,
    scale_factor: f32,
}

impl<S: DrawSurface> SelectionOverlayLayer<S> {
    /// Wrap an attached surface. The surface is assumed blank.
    pub fn new(surface: S, color: Color, scale_factor: f32) -> Self {
        Self {
            surface,
            gate: RedrawGate::new(),
            color,
            scale_factor,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Change the highlight color; the next render repaints.
    pub fn set_color(&mut self, color: Color) {
        if color != self.color {
            self.color = color;
            // Any highlight on the surface is in the old color
            self.gate.invalidate();
        }
    }

    /// Change the pixel density. Callers follow up with a resize.
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        if scale_factor != self.scale_factor {
            log::debug!("Selection layer scale factor changed to {scale_factor:.2}");
            self.scale_factor = scale_factor;
        }
    }

    /// Size the surface for a viewport of `width` x `height` logical pixels.
    /// Does not redraw; the next render repaints any selection.
    pub fn resize_surface(&mut self, width: u32, height: u32) -> Result<(), LayerError> {
        let size = SurfaceSize::scaled(width, height, self.scale_factor);
        log::debug!(
            "Selection layer resized to {}x{} ({}x{} physical)",
            size.logical_width,
            size.logical_height,
            size.physical_width,
            size.physical_height
        );
        if let Err(e) = self.surface.set_size(size) {
            self.gate.invalidate();
            return Err(e.into());
        }
        self.gate.reset();
        Ok(())
    }

    /// Paint `range` as seen through `viewport`, unless the surface already shows it.
    pub fn render_selection(
        &mut self,
        range: Option<&SelectionRange>,
        viewport: &ViewportWindow,
        metrics: CellMetrics,
    ) -> Result<RenderOutcome, LayerError> {
        let frame = FrameKey::new(range.copied(), *viewport, metrics, self.scale_factor);
        if !self.gate.is_dirty(&frame) {
            log::trace!("Selection unchanged, skipping redraw");
            return Ok(RenderOutcome::Skipped);
        }

        // Until the new frame is fully painted the surface matches no frame,
        // so a failure below leaves the next render dirty even without a selection
        self.gate.invalidate();
        self.surface.clear()?;

        let outcome = match range {
            None => RenderOutcome::Cleared,
            Some(range) => {
                let rects =
                    selection_geometry::build(Some(range), viewport, metrics, self.scale_factor);
                for rect in &rects {
                    self.surface.fill_rect(*rect, self.color)?;
                }
                RenderOutcome::Drawn { rects: rects.len() }
            }
        };

        log::debug!("Selection redrawn: {outcome:?}");
        self.gate.commit(frame);
        Ok(outcome)
    }
}

impl<S: DrawSurface> RenderLayer for SelectionOverlayLayer<S> {
    fn resize(
        &mut self,
        _terminal: &dyn TerminalView,
        width: u32,
        height: u32,
        char_size_changed: bool,
    ) -> Result<(), LayerError> {
        if char_size_changed {
            log::debug!("Cell size changed, selection will be repainted");
        }
        self.resize_surface(width, height)
    }

    fn render(
        &mut self,
        terminal: &dyn TerminalView,
        start_row: usize,
        end_row: usize,
    ) -> Result<RenderOutcome, LayerError> {
        if start_row > end_row {
            return Err(LayerError::InvalidRefreshRange { start_row, end_row });
        }
        log::trace!("Selection layer refresh requested for rows {start_row}..={end_row}");
        let viewport = viewport_window(terminal);
        let selection = terminal.selection();
        self.render_selection(selection.as_ref(), &viewport, terminal.char_metrics())
    }
}
