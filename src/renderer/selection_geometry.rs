// Selection geometry: turns a buffer-space selection into viewport-space highlight rects.

use crate::renderer::surface::Rect;
use crate::renderer::viewport::{to_viewport_row, CellMetrics, SelectionRange, ViewportWindow};

/// Build the highlight rectangles for `range` as seen through `viewport`.
///
/// Emits at most one rect per visible row, top to bottom:
/// - the first visible row starts at the selection's start column, or at
///   column 0 when the selection began above the viewport;
/// - middle rows span every visible column;
/// - the last visible row ends at the selection's end column, or at the
///   right edge when the selection continues below the viewport.
///
/// A lone visible row that is both first and last follows the same rules: if
/// the selection continues below the viewport it runs to the right edge, not to
/// the end column, which belongs to an off-screen row.
///
/// Returns an empty Vec when there is no selection or none of it is visible.
pub fn build(
    range: Option<&SelectionRange>,
    viewport: &ViewportWindow,
    metrics: CellMetrics,
    scale: f32,
) -> Vec<Rect> {
    let Some(range) = range else {
        return Vec::new();
    };

    let rows = viewport.visible_rows as i64;
    let cols = viewport.visible_cols;

    let start_row = to_viewport_row(range.start().row, viewport.scroll_offset);
    let end_row = to_viewport_row(range.end().row, viewport.scroll_offset);
    let first_row = start_row.max(0);
    let last_row = end_row.min(rows - 1);

    // Entirely above or below the viewport
    if first_row >= rows || last_row < 0 {
        return Vec::new();
    }

    let (cell_width, cell_height) = metrics.scaled(scale);
    let row_rect = |row: i64, start_col: usize, end_col: usize| {
        Rect::new(
            start_col as f32 * cell_width,
            row as f32 * cell_height,
            end_col.saturating_sub(start_col) as f32 * cell_width,
            cell_height,
        )
    };

    let start_col = if start_row == first_row {
        range.start().col
    } else {
        0
    };
    let last_end_col = if end_row == last_row {
        range.end().col
    } else {
        cols
    };

    if first_row == last_row {
        return vec![row_rect(first_row, start_col, last_end_col)];
    }

    let mut rects = Vec::with_capacity((last_row - first_row + 1) as usize);
    rects.push(row_rect(first_row, start_col, cols));
    for row in first_row + 1..last_row {
        rects.push(row_rect(row, 0, cols));
    }
    rects.push(row_rect(last_row, 0, last_end_col));
    rects
}
