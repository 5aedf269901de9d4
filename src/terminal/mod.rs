// Terminal-side collaborators read by render layers: viewport, selection, cell metrics.

use crate::renderer::viewport::{CellMetrics, SelectionRange, ViewportWindow};
use serde::Deserialize;

/// Visible grid dimensions and scroll position.
pub trait TerminalViewport {
    /// Visible rows.
    fn rows(&self) -> usize;
    /// Visible columns.
    fn cols(&self) -> usize;
    /// Absolute buffer row shown at the top of the viewport.
    fn scroll_offset(&self) -> usize;
}

/// Source of the current selection, in buffer coordinates.
pub trait SelectionModel {
    fn selection(&self) -> Option<SelectionRange>;
}

/// Current character cell size in device-independent pixels.
pub trait CharMetricsProvider {
    fn char_metrics(&self) -> CellMetrics;
}

/// Everything a render layer may read from the terminal.
pub trait TerminalView: TerminalViewport + SelectionModel + CharMetricsProvider {}

impl<T: TerminalViewport + SelectionModel + CharMetricsProvider> TerminalView for T {}

/// Snapshot the viewport window of a terminal.
pub fn viewport_window<T: TerminalViewport + ?Sized>(terminal: &T) -> ViewportWindow {
    ViewportWindow::new(terminal.scroll_offset(), terminal.rows(), terminal.cols())
}

/// Owned terminal state for one frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TerminalSnapshot {
    pub rows: usize,
    pub cols: usize,
    #[serde(default)]
    pub scroll_offset: usize,
    pub cell: CellMetrics,
    #[serde(default)]
    pub selection: Option<SelectionRange>,
}

impl TerminalViewport for TerminalSnapshot {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }
}

impl SelectionModel for TerminalSnapshot {
    fn selection(&self) -> Option<SelectionRange> {
        self.selection
    }
}

impl CharMetricsProvider for TerminalSnapshot {
    fn char_metrics(&self) -> CellMetrics {
        self.cell
    }
}
