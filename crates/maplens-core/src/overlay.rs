//! Overlay scene: two highlight boxes joined by an arrowed curve.

use crate::config::LensConfig;
use crate::geometry::{Connector, Point, Rect, box_for_position, tab_box};
use crate::hover::{CrossReference, HoverDirection};
use crate::palette::{PALETTE, SegmentColor};
use crate::panes::Pane;
use crate::surface::{EditorSurface, OverlayCanvas, PaneChrome};

const BOX_STROKE_WIDTH: f64 = 2.0;
const CURVE_STROKE_WIDTH: f64 = 2.5;

/// Everything needed to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayScene {
    /// Box in the original pane (or on its tab strip)
    pub source_box: Rect,
    /// Box in the output pane (or on its tab strip)
    pub output_box: Rect,
    /// Always drawn from the source box to the output box
    pub connector: Connector,
    pub color: &'static SegmentColor,
}

/// The two mounted editors plus the chrome around them.
pub struct OverlayInputs<'a, E: ?Sized, C: ?Sized> {
    pub original: &'a E,
    pub output: &'a E,
    pub chrome: &'a C,
    /// File shown in the output editor
    pub active_output: Option<&'a str>,
    /// Top-left of the canvas parent, in viewport coordinates
    pub canvas_origin: Point,
}

impl OverlayScene {
    /// Compute the scene for `xref`, or `None` if any box cannot be placed.
    pub fn compute<E, C>(
        xref: &CrossReference,
        inputs: &OverlayInputs<'_, E, C>,
        config: &LensConfig,
    ) -> Option<Self>
    where
        E: EditorSurface + ?Sized,
        C: PaneChrome + ?Sized,
    {
        let generated_shown = inputs
            .active_output
            .is_none_or(|active| active == xref.generated.filename);
        let output_box = if generated_shown {
            box_for_position(
                inputs.output,
                inputs.canvas_origin,
                xref.generated.line,
                xref.generated.column,
                Some(xref.generated.column_end),
                config,
            )?
        } else {
            tab_box(
                inputs.chrome,
                Pane::Output,
                &xref.generated.filename,
                inputs.canvas_origin,
                config,
            )?
        };

        let in_editor = xref.direction == HoverDirection::Original || xref.original_visible;
        let source_box = if in_editor {
            box_for_position(
                inputs.original,
                inputs.canvas_origin,
                xref.original.line,
                xref.original.column,
                Some(xref.original.column_end),
                config,
            )?
        } else {
            tab_box(
                inputs.chrome,
                Pane::Original,
                &xref.original.filename,
                inputs.canvas_origin,
                config,
            )?
        };

        Some(Self {
            source_box,
            output_box,
            connector: Connector::between(source_box, output_box, config),
            color: &PALETTE[xref.palette_index()],
        })
    }

    /// Draw onto a canvas that has already been cleared.
    pub fn draw<K: OverlayCanvas + ?Sized>(&self, canvas: &mut K) {
        let SegmentColor { background, border } = *self.color;

        for rect in [self.source_box, self.output_box] {
            canvas.stroke_rect(rect, border, BOX_STROKE_WIDTH);
            canvas.fill_rect(rect, background);
        }

        let c = &self.connector;
        canvas.stroke_curve(
            c.start,
            c.control1,
            c.control2,
            c.end,
            border,
            CURVE_STROKE_WIDTH,
        );
        for tip in c.arrow {
            canvas.stroke_line(c.end, tip, border, CURVE_STROKE_WIDTH);
        }
    }
}
