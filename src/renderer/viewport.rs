// Buffer-space selection types and the buffer-to-viewport row transform.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A cell address in buffer space.
///
/// `row` is absolute within the scroll-back history, independent of the
/// current scroll position. It is signed so callers can express rows that
/// precede the history origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BufferPosition {
    pub col: usize,
    pub row: i64,
}

impl BufferPosition {
    pub const fn new(col: usize, row: i64) -> Self {
        Self { col, row }
    }
}

impl Ord for BufferPosition {
    /// Row-major reading order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for BufferPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One contiguous selection in buffer space.
///
/// `start` never follows `end` in reading order: [`SelectionRange::new`]
/// orders its endpoints, so a drag from right to left or bottom to top
/// produces the same range as the forward drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RangeEndpoints")]
pub struct SelectionRange {
    start: BufferPosition,
    end: BufferPosition,
}

#[derive(Deserialize)]
struct RangeEndpoints {
    start: BufferPosition,
    end: BufferPosition,
}

impl From<RangeEndpoints> for SelectionRange {
    fn from(raw: RangeEndpoints) -> Self {
        Self::new(raw.start, raw.end)
    }
}

impl SelectionRange {
    /// Create a range from two endpoints given in either order.
    pub fn new(a: BufferPosition, b: BufferPosition) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn start(&self) -> BufferPosition {
        self.start
    }

    pub fn end(&self) -> BufferPosition {
        self.end
    }
}

/// The visible window onto the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewportWindow {
    /// Absolute buffer row shown at the top of the viewport.
    pub scroll_offset: usize,
    pub visible_rows: usize,
    pub visible_cols: usize,
}

impl ViewportWindow {
    pub const fn new(scroll_offset: usize, visible_rows: usize, visible_cols: usize) -> Self {
        Self {
            scroll_offset,
            visible_rows,
            visible_cols,
        }
    }
}

/// Character cell size in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellMetrics {
    pub width: f32,
    pub height: f32,
}

impl CellMetrics {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Cell size in physical pixels as `(width, height)`.
    ///
    /// Each dimension is rounded up to a whole logical pixel before scaling so
    /// adjacent highlighted cells never leave a sub-pixel seam between them.
    pub fn scaled(&self, scale: f32) -> (f32, f32) {
        (self.width.ceil() * scale, self.height.ceil() * scale)
    }
}

/// Map an absolute buffer row to a row relative to the top of the viewport.
///
/// Negative results are above the viewport; results `>= visible_rows` are below it.
pub fn to_viewport_row(buffer_row: i64, scroll_offset: usize) -> i64 {
    buffer_row - scroll_offset as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Row transform ───────────────────────────────────────────────

    #[test]
    fn viewport_row_at_top_is_zero() {
        assert_eq!(to_viewport_row(10, 10), 0);
    }

    #[test]
    fn viewport_row_above_viewport_is_negative() {
        assert_eq!(to_viewport_row(3, 10), -7);
    }

    #[test]
    fn viewport_row_unscrolled_is_identity() {
        assert_eq!(to_viewport_row(42, 0), 42);
    }

    // ── Position ordering ───────────────────────────────────────────

    #[test]
    fn positions_order_by_row_before_column() {
        let a = BufferPosition::new(79, 1);
        let b = BufferPosition::new(0, 2);
        assert!(a < b);
    }

    #[test]
    fn positions_on_same_row_order_by_column() {
        assert!(BufferPosition::new(2, 5) < BufferPosition::new(7, 5));
    }

    // ── Range construction ──────────────────────────────────────────

    #[test]
    fn forward_range_keeps_endpoints() {
        let range = SelectionRange::new(BufferPosition::new(3, 1), BufferPosition::new(2, 4));
        assert_eq!(range.start(), BufferPosition::new(3, 1));
        assert_eq!(range.end(), BufferPosition::new(2, 4));
    }

    #[test]
    fn reversed_range_is_reordered() {
        let range = SelectionRange::new(BufferPosition::new(2, 4), BufferPosition::new(3, 1));
        assert_eq!(range.start(), BufferPosition::new(3, 1));
        assert_eq!(range.end(), BufferPosition::new(2, 4));
    }

    #[test]
    fn reversed_single_row_range_is_reordered() {
        let range = SelectionRange::new(BufferPosition::new(7, 5), BufferPosition::new(2, 5));
        assert_eq!(range.start().col, 2);
        assert_eq!(range.end().col, 7);
        assert_eq!(range.start().row, range.end().row);
    }

    #[test]
    fn deserialized_range_is_reordered() {
        let json = r#"{"start":{"col":9,"row":8},"end":{"col":0,"row":2}}"#;
        let range: SelectionRange = serde_json::from_str(json).unwrap();
        assert_eq!(range.start(), BufferPosition::new(0, 2));
        assert_eq!(range.end(), BufferPosition::new(9, 8));
    }

    // ── Cell metrics ────────────────────────────────────────────────

    #[test]
    fn scaled_metrics_round_up_before_scaling() {
        let metrics = CellMetrics::new(7.2, 15.01);
        assert_eq!(metrics.scaled(2.0), (16.0, 32.0));
    }

    #[test]
    fn scaled_metrics_whole_pixels_unchanged() {
        let metrics = CellMetrics::new(8.0, 16.0);
        assert_eq!(metrics.scaled(1.0), (8.0, 16.0));
    }
}
