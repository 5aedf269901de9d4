// Frame-script replay: drives a selection layer headlessly from recorded terminal states.

use crate::config::types::Config;
use crate::renderer::overlay_batch::{OverlayInstance, OverlayUniforms, QuadBatchSurface};
use crate::renderer::selection_layer::{RenderOutcome, SelectionOverlayLayer};
use crate::renderer::surface::SurfaceSize;
use crate::renderer::viewport::CellMetrics;
use crate::renderer::{LayerError, RenderLayer};
use crate::terminal::TerminalSnapshot;
use serde::{Deserialize, Serialize};

/// A recorded sequence of frames.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrameScript {
    pub frames: Vec<ScriptFrame>,
}

/// Viewport pixel size plus the terminal state shown in it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptFrame {
    /// Viewport width in logical pixels.
    pub width: u32,
    /// Viewport height in logical pixels.
    pub height: u32,
    pub terminal: TerminalSnapshot,
}

/// What one replayed frame left on the surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame: usize,
    pub resized: bool,
    pub outcome: RenderOutcome,
    pub surface: SurfaceSize,
    /// Uniforms an overlay pass would bind for `quads`.
    pub uniforms: OverlayUniforms,
    pub quads: Vec<OverlayInstance>,
}

/// Errors raised while replaying a script.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("invalid frame script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("frame {frame}: {source}")]
    Layer {
        frame: usize,
        #[source]
        source: LayerError,
    },
}

/// Parse a JSON frame script.
pub fn parse_script(json: &str) -> Result<FrameScript, ReplayError> {
    Ok(serde_json::from_str(json)?)
}

/// Replays frames through a selection layer backed by a quad batch.
pub struct Replay {
    layer: SelectionOverlayLayer<QuadBatchSurface>,
    /// Pixel size and cell metrics the surface was last sized for.
    sized_for: Option<(u32, u32, CellMetrics)>,
    frames_seen: usize,
}

impl Replay {
    pub fn new(config: &Config) -> Self {
        let surface = QuadBatchSurface::new(config.display.max_surface_dimension);
        Self {
            layer: SelectionOverlayLayer::new(
                surface,
                config.highlight_color(),
                config.display.scale_factor,
            ),
            sized_for: None,
            frames_seen: 0,
        }
    }

    /// Replay one frame: resize if the pixel size or cell metrics moved, then render.
    pub fn step(&mut self, frame: &ScriptFrame) -> Result<FrameReport, ReplayError> {
        let index = self.frames_seen;
        self.frames_seen += 1;
        let term = &frame.terminal;
        let wrap = |source| ReplayError::Layer {
            frame: index,
            source,
        };

        let metrics = term.cell;
        let resized = match self.sized_for {
            Some((w, h, m)) => (w, h, m) != (frame.width, frame.height, metrics),
            None => true,
        };
        if resized {
            let char_size_changed = self.sized_for.is_some_and(|(_, _, m)| m != metrics);
            self.layer
                .resize(term, frame.width, frame.height, char_size_changed)
                .map_err(wrap)?;
            self.sized_for = Some((frame.width, frame.height, metrics));
        }

        let last_row = term.rows.saturating_sub(1);
        let outcome = self.layer.render(term, 0, last_row).map_err(wrap)?;

        let surface = self.layer.surface();
        Ok(FrameReport {
            frame: index,
            resized,
            outcome,
            surface: surface.size(),
            uniforms: surface.uniforms(),
            quads: surface.instances().to_vec(),
        })
    }

    /// Replay every frame in order, stopping at the first failure.
    pub fn run(&mut self, script: &FrameScript) -> Result<Vec<FrameReport>, ReplayError> {
        script.frames.iter().map(|frame| self.step(frame)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"{
        "frames": [
            {
                "width": 800, "height": 480,
                "terminal": {
                    "rows": 24, "cols": 80, "scroll_offset": 0,
                    "cell": {"width": 10, "height": 20},
                    "selection": {"start": {"col": 2, "row": 5}, "end": {"col": 7, "row": 5}}
                }
            },
            {
                "width": 800, "height": 480,
                "terminal": {
                    "rows": 24, "cols": 80, "scroll_offset": 0,
                    "cell": {"width": 10, "height": 20},
                    "selection": {"start": {"col": 2, "row": 5}, "end": {"col": 7, "row": 5}}
                }
            },
            {
                "width": 800, "height": 480,
                "terminal": {
                    "rows": 24, "cols": 80, "scroll_offset": 10,
                    "cell": {"width": 10, "height": 20},
                    "selection": {"start": {"col": 0, "row": 5}, "end": {"col": 79, "row": 5}}
                }
            },
            {
                "width": 800, "height": 480,
                "terminal": {
                    "rows": 24, "cols": 80, "scroll_offset": 10,
                    "cell": {"width": 10, "height": 20}
                }
            }
        ]
    }"#;

    // ── Script parsing ──────────────────────────────────────────────

    #[test]
    fn parse_script_reads_frames() {
        let script = parse_script(SCRIPT).unwrap();
        assert_eq!(script.frames.len(), 4);
        assert_eq!(script.frames[2].terminal.scroll_offset, 10);
        assert_eq!(script.frames[3].terminal.selection, None);
    }

    #[test]
    fn parse_script_rejects_garbage() {
        assert!(matches!(
            parse_script("{\"frames\": 3}"),
            Err(ReplayError::Parse(_))
        ));
    }

    // ── Replay ──────────────────────────────────────────────────────

    #[test]
    fn replay_reports_each_frame() {
        let script = parse_script(SCRIPT).unwrap();
        let reports = Replay::new(&Config::default()).run(&script).unwrap();

        assert_eq!(reports.len(), 4);

        assert!(reports[0].resized);
        assert_eq!(reports[0].outcome, RenderOutcome::Drawn { rects: 1 });
        assert_eq!(reports[0].quads.len(), 1);
        assert_eq!(reports[0].quads[0].rect, [20.0, 100.0, 50.0, 20.0]);
        assert_eq!(reports[0].quads[0].color, [1.0, 1.0, 1.0, 0.5]);

        assert!(!reports[1].resized);
        assert_eq!(reports[1].outcome, RenderOutcome::Skipped);
        assert_eq!(reports[1].quads.len(), 1);

        assert_eq!(reports[2].outcome, RenderOutcome::Drawn { rects: 0 });
        assert!(reports[2].quads.is_empty());

        assert_eq!(reports[3].outcome, RenderOutcome::Cleared);
    }

    #[test]
    fn replay_resizes_on_new_cell_metrics() {
        let mut script = parse_script(SCRIPT).unwrap();
        script.frames[1].terminal.cell = CellMetrics::new(12.0, 24.0);
        let reports = Replay::new(&Config::default()).run(&script).unwrap();
        assert!(reports[1].resized);
        assert_eq!(reports[1].outcome, RenderOutcome::Drawn { rects: 1 });
        assert_eq!(reports[1].quads[0].rect, [24.0, 120.0, 60.0, 24.0]);
    }

    #[test]
    fn replay_uses_configured_scale_factor() {
        let config = Config::from_toml("[display]\nscale_factor = 2.0\n").unwrap();
        let script = parse_script(SCRIPT).unwrap();
        let reports = Replay::new(&config).run(&script).unwrap();
        assert_eq!(reports[0].surface.physical_width, 1600);
        assert_eq!(reports[0].uniforms.surface_size, [1600.0, 960.0]);
        assert_eq!(reports[0].quads[0].rect, [40.0, 200.0, 100.0, 40.0]);
    }

    #[test]
    fn report_serializes_to_json() {
        let script = parse_script(SCRIPT).unwrap();
        let reports = Replay::new(&Config::default()).run(&script).unwrap();
        let json = serde_json::to_string(&reports[0]).unwrap();
        assert!(json.contains("\"kind\":\"drawn\""));
        assert!(json.contains("\"rects\":1"));
        assert!(json.contains("\"uniforms\":{\"surface_size\":[800.0,480.0]}"));
    }
}
