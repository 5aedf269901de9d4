use crate::renderer::viewport::{CellMetrics, SelectionRange, ViewportWindow};

/// Compare two selection snapshots by value.
///
/// Both absent is unchanged; one absent is changed; otherwise endpoints are
/// compared field by field. Identity never matters: a selection model that
/// hands back a fresh but equal range each frame does not force a redraw.
pub fn should_redraw(previous: Option<&SelectionRange>, current: Option<&SelectionRange>) -> bool {
    previous != current
}

/// Everything that determines what the selection overlay paints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameKey {
    pub range: Option<SelectionRange>,
    pub viewport: ViewportWindow,
    /// Physical cell size as `(width, height)`.
    pub cell_size: (f32, f32),
}

impl FrameKey {
    pub fn new(
        range: Option<SelectionRange>,
        viewport: ViewportWindow,
        metrics: CellMetrics,
        scale: f32,
    ) -> Self {
        Self {
            range,
            viewport,
            cell_size: metrics.scaled(scale),
        }
    }
}

/// What the overlay surface currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Painted {
    /// Nothing.
    #[default]
    Blank,
    /// The highlight of this frame.
    Frame(FrameKey),
    /// A paint was interrupted; any earlier highlight may still be there.
    Unknown,
}

/// Dirty check for the selection overlay.
///
/// Remembers the last frame that left a highlight on the surface. A frame is
/// dirty when its selection differs from that one, or when the same selection
/// would land elsewhere (scrolled viewport, resized grid, new cell size).
/// After [`RedrawGate::invalidate`] every frame is dirty, including one with
/// no selection, until the next commit.
#[derive(Debug, Default)]
pub struct RedrawGate {
    painted: Painted,
}

impl RedrawGate {
    /// Create a gate for a blank surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `frame` needs the surface cleared and repainted.
    pub fn is_dirty(&self, frame: &FrameKey) -> bool {
        match &self.painted {
            Painted::Blank => frame.range.is_some(),
            Painted::Frame(prev) => {
                should_redraw(prev.range.as_ref(), frame.range.as_ref())
                    || prev.viewport != frame.viewport
                    || prev.cell_size != frame.cell_size
            }
            Painted::Unknown => true,
        }
    }

    /// Record `frame` as what the surface now shows.
    pub fn commit(&mut self, frame: FrameKey) {
        self.painted = match frame.range {
            Some(_) => Painted::Frame(frame),
            None => Painted::Blank,
        };
    }

    /// The surface contents were discarded; it is blank now.
    pub fn reset(&mut self) {
        self.painted = Painted::Blank;
    }

    /// The surface contents no longer match any committed frame.
    pub fn invalidate(&mut self) {
        self.painted = Painted::Unknown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::viewport::BufferPosition;

    fn range(start: (usize, i64), end: (usize, i64)) -> SelectionRange {
        SelectionRange::new(
            BufferPosition::new(start.0, start.1),
            BufferPosition::new(end.0, end.1),
        )
    }

    fn frame(range: Option<SelectionRange>, scroll_offset: usize) -> FrameKey {
        FrameKey::new(
            range,
            ViewportWindow::new(scroll_offset, 24, 80),
            CellMetrics::new(9.0, 18.0),
            1.0,
        )
    }

    // ── Value comparison ────────────────────────────────────────────

    #[test]
    fn both_absent_is_unchanged() {
        assert!(!should_redraw(None, None));
    }

    #[test]
    fn selection_appearing_is_changed() {
        let sel = range((0, 0), (3, 0));
        assert!(should_redraw(None, Some(&sel)));
    }

    #[test]
    fn selection_disappearing_is_changed() {
        let sel = range((0, 0), (3, 0));
        assert!(should_redraw(Some(&sel), None));
    }

    #[test]
    fn equal_but_distinct_ranges_are_unchanged() {
        let a = range((2, 5), (7, 5));
        let b = SelectionRange::new(BufferPosition::new(2, 5), BufferPosition::new(7, 5));
        assert!(!should_redraw(Some(&a), Some(&b)));
    }

    #[test]
    fn moved_start_is_changed() {
        let a = range((2, 5), (7, 5));
        let b = range((3, 5), (7, 5));
        assert!(should_redraw(Some(&a), Some(&b)));
    }

    #[test]
    fn moved_end_only_is_changed() {
        let a = range((2, 5), (7, 5));
        let b = range((2, 5), (7, 6));
        assert!(should_redraw(Some(&a), Some(&b)));
    }

    // ── Gate state ──────────────────────────────────────────────────

    #[test]
    fn blank_gate_ignores_empty_frames() {
        let gate = RedrawGate::new();
        assert!(!gate.is_dirty(&frame(None, 0)));
    }

    #[test]
    fn blank_gate_is_dirty_for_selection() {
        let gate = RedrawGate::new();
        assert!(gate.is_dirty(&frame(Some(range((0, 0), (1, 0))), 0)));
    }

    #[test]
    fn committed_frame_is_clean() {
        let mut gate = RedrawGate::new();
        let f = frame(Some(range((0, 0), (1, 0))), 0);
        gate.commit(f);
        assert!(!gate.is_dirty(&f));
    }

    #[test]
    fn clearing_selection_is_dirty_once() {
        let mut gate = RedrawGate::new();
        gate.commit(frame(Some(range((0, 0), (1, 0))), 0));
        let cleared = frame(None, 0);
        assert!(gate.is_dirty(&cleared));
        gate.commit(cleared);
        assert!(!gate.is_dirty(&cleared));
    }

    #[test]
    fn scrolling_with_selection_is_dirty() {
        let mut gate = RedrawGate::new();
        let sel = Some(range((0, 30), (5, 31)));
        gate.commit(frame(sel, 20));
        assert!(gate.is_dirty(&frame(sel, 21)));
    }

    #[test]
    fn scrolling_without_selection_is_clean() {
        let mut gate = RedrawGate::new();
        gate.commit(frame(None, 20));
        assert!(!gate.is_dirty(&frame(None, 21)));
    }

    #[test]
    fn cell_size_change_is_dirty() {
        let mut gate = RedrawGate::new();
        let sel = Some(range((0, 0), (5, 0)));
        gate.commit(frame(sel, 0));
        let bigger = FrameKey::new(
            sel,
            ViewportWindow::new(0, 24, 80),
            CellMetrics::new(9.0, 18.0),
            2.0,
        );
        assert!(gate.is_dirty(&bigger));
    }

    #[test]
    fn reset_makes_selection_dirty_again() {
        let mut gate = RedrawGate::new();
        let f = frame(Some(range((0, 0), (5, 0))), 0);
        gate.commit(f);
        gate.reset();
        assert!(gate.is_dirty(&f));
        assert!(!gate.is_dirty(&frame(None, 0)));
    }

    #[test]
    fn invalidated_gate_is_dirty_for_every_frame() {
        let mut gate = RedrawGate::new();
        let f = frame(Some(range((0, 0), (5, 0))), 0);
        gate.commit(f);
        gate.invalidate();
        assert!(gate.is_dirty(&f));
        assert!(gate.is_dirty(&frame(None, 0)));
    }

    #[test]
    fn commit_after_invalidate_is_clean() {
        let mut gate = RedrawGate::new();
        gate.invalidate();
        let cleared = frame(None, 0);
        gate.commit(cleared);
        assert!(!gate.is_dirty(&cleared));
    }
}
