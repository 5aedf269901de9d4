pub mod damage;
pub mod overlay_batch;
pub mod selection_geometry;
pub mod selection_layer;
pub mod surface;
pub mod viewport;

use crate::terminal::TerminalView;
use selection_layer::RenderOutcome;
use surface::SurfaceError;

/// Errors raised while resizing or rendering a layer.
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("invalid refresh range: rows {start_row}..={end_row}")]
    InvalidRefreshRange { start_row: usize, end_row: usize },
}

/// Contract shared by every overlay layer a compositor stacks over the grid.
///
/// Each layer owns its surface. The compositor calls `resize` whenever the
/// viewport pixel size or cell metrics change, and `render` on every frame
/// tick; layers decide for themselves whether anything needs repainting.
pub trait RenderLayer {
    fn resize(
        &mut self,
        terminal: &dyn TerminalView,
        width: u32,
        height: u32,
        char_size_changed: bool,
    ) -> Result<(), LayerError>;

    /// Refresh the layer for viewport rows `start_row..=end_row`.
    fn render(
        &mut self,
        terminal: &dyn TerminalView,
        start_row: usize,
        end_row: usize,
    ) -> Result<RenderOutcome, LayerError>;
}
