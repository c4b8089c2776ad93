//! Overlay geometry
//!
//! All rectangles here are in overlay coordinates: pixels relative to the
//! top-left corner of the overlay canvas' parent. Every helper returns
//! `None` when some piece of live geometry is unavailable (unmounted editor,
//! off-screen position); the caller skips drawing for that frame.

use serde::{Deserialize, Serialize};

use crate::config::LensConfig;
use crate::panes::Pane;
use crate::surface::{EditorSurface, PaneChrome};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn left_center(&self) -> Point {
        Point::new(self.x, self.y + self.height / 2.0)
    }

    pub fn right_center(&self) -> Point {
        Point::new(self.right(), self.y + self.height / 2.0)
    }

    /// This rectangle moved into the coordinate space whose origin is `origin`.
    pub fn relative_to(&self, origin: Point) -> Rect {
        Rect::new(self.x - origin.x, self.y - origin.y, self.width, self.height)
    }
}

/// Line height of `editor`: the configured value, else 1.5 × font size,
/// else the configured default.
pub fn line_height<E: EditorSurface + ?Sized>(editor: &E, config: &LensConfig) -> f64 {
    if let Some(height) = editor.line_height().filter(|h| *h > 0.0) {
        return height;
    }
    if let Some(size) = editor.font_size().filter(|s| *s > 0.0) {
        return (size * 1.5).round();
    }
    config.default_line_height
}

/// Highlight box for a column range on one editor line.
///
/// Without `column_end` the box covers the word under `column` (or a single
/// character when there is none). The box is shrunk vertically to
/// `box_height_ratio` of the line height and centered on the line.
pub fn box_for_position<E: EditorSurface + ?Sized>(
    editor: &E,
    canvas_origin: Point,
    line: u32,
    column: u32,
    column_end: Option<u32>,
    config: &LensConfig,
) -> Option<Rect> {
    let (start, end) = match column_end {
        Some(end) => (column, end.max(column.saturating_add(1))),
        None => editor
            .word_at(line, column)
            .map_or((column, column.saturating_add(1)), |w| (w.start_column, w.end_column)),
    };

    let start_px = editor.scrolled_visible_position(line, start)?;
    let end_px = editor.scrolled_visible_position(line, end)?;
    let editor_rect = editor.bounding_rect()?.relative_to(canvas_origin);

    let line_height = line_height(editor, config);
    let box_height = (line_height * config.box_height_ratio).floor();
    let padding = ((line_height - box_height) / 2.0).floor();

    Some(Rect::new(
        editor_rect.x + start_px.x,
        editor_rect.y + start_px.y + padding,
        (end_px.x - start_px.x).max(config.min_box_width),
        box_height,
    ))
}

/// "Look over there" box for a file that is open but not shown in `pane`.
///
/// Uses the file's tab when its top-left corner is inside the window,
/// otherwise a placeholder just below the pane header.
pub fn tab_box<C: PaneChrome + ?Sized>(
    chrome: &C,
    pane: Pane,
    filename: &str,
    canvas_origin: Point,
    config: &LensConfig,
) -> Option<Rect> {
    let viewport = chrome.viewport();
    let visible_tab = chrome.tab_rect(pane, filename).filter(|tab| {
        tab.x >= 0.0 && tab.y >= 0.0 && tab.x < viewport.width && tab.y < viewport.height
    });
    if let Some(tab) = visible_tab {
        return Some(tab.relative_to(canvas_origin));
    }

    let pane_rect = chrome.pane_rect(pane)?.relative_to(canvas_origin);
    let placeholder = &config.placeholder;
    Some(Rect::new(
        pane_rect.x + placeholder.inset_x,
        pane_rect.y + placeholder.inset_y,
        placeholder
            .max_width
            .min(pane_rect.width - 2.0 * placeholder.inset_x)
            .max(0.0),
        placeholder.height,
    ))
}

/// Cubic connector from one box to another, with an arrowhead at the end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
    /// Outer ends of the two arrowhead strokes; both start at `end`.
    pub arrow: [Point; 2],
}

impl Connector {
    /// Connect the right-center of `from` to the left-center of `to`.
    pub fn between(from: Rect, to: Rect, config: &LensConfig) -> Self {
        let start = from.right_center();
        let end = to.left_center();
        let offset = ((end.x - start.x).abs() / 2.0).min(config.max_control_offset);
        let control1 = Point::new(start.x + offset, start.y);
        let control2 = Point::new(end.x - offset, end.y);

        let angle = (end.y - control2.y).atan2(end.x - control2.x);
        let spread = config.arrow_angle_degrees.to_radians();
        let arm = |a: f64| {
            Point::new(
                end.x - config.arrow_size * a.cos(),
                end.y - config.arrow_size * a.sin(),
            )
        };

        Self {
            start,
            control1,
            control2,
            end,
            arrow: [arm(angle - spread), arm(angle + spread)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panes::EditorPosition;
    use crate::surface::{Decoration, DecorationId};

    /// Monospace editor: 10px per column, 20px per line, no scrolling.
    struct Grid {
        rect: Option<Rect>,
        text: &'static str,
        line_height: Option<f64>,
        font_size: Option<f64>,
    }

    impl Grid {
        fn new(text: &'static str) -> Self {
            Self {
                rect: Some(Rect::new(100.0, 50.0, 400.0, 300.0)),
                text,
                line_height: Some(20.0),
                font_size: None,
            }
        }
    }

    impl EditorSurface for Grid {
        fn text(&self) -> String {
            self.text.to_string()
        }
        fn cursor(&self) -> Option<EditorPosition> {
            None
        }
        fn scrolled_visible_position(&self, line: u32, column: u32) -> Option<Point> {
            (line <= 10).then(|| Point::new(column as f64 * 10.0, (line - 1) as f64 * 20.0))
        }
        fn bounding_rect(&self) -> Option<Rect> {
            self.rect
        }
        fn line_height(&self) -> Option<f64> {
            self.line_height
        }
        fn font_size(&self) -> Option<f64> {
            self.font_size
        }
        fn replace_decorations(&mut self, _: &[DecorationId], _: &[Decoration]) -> Vec<DecorationId> {
            Vec::new()
        }
    }

    struct Chrome {
        tab: Option<Rect>,
        pane: Option<Rect>,
    }

    impl PaneChrome for Chrome {
        fn tab_rect(&self, _: Pane, _: &str) -> Option<Rect> {
            self.tab
        }
        fn pane_rect(&self, _: Pane) -> Option<Rect> {
            self.pane
        }
        fn viewport(&self) -> Size {
            Size::new(1000.0, 800.0)
        }
    }

    const ORIGIN: Point = Point::new(0.0, 40.0);

    #[test]
    fn explicit_range_box() {
        let editor = Grid::new("");
        let config = LensConfig::default();
        let rect = box_for_position(&editor, ORIGIN, 2, 3, Some(7), &config).unwrap();
        // 20 * 0.85 = 17, padding floor(1.5) = 1
        assert_eq!(rect, Rect::new(130.0, 10.0 + 20.0 + 1.0, 40.0, 17.0));
    }

    #[test]
    fn zero_width_range_is_widened_then_floored() {
        let editor = Grid::new("");
        let mut config = LensConfig::default();
        config.min_box_width = 12.0;
        let rect = box_for_position(&editor, Point::default(), 1, 5, Some(5), &config).unwrap();
        assert_eq!(rect.width, 12.0);
    }

    #[test]
    fn last_column_box_does_not_overflow() {
        let editor = Grid::new("");
        let config = LensConfig::default();
        let rect =
            box_for_position(&editor, Point::default(), 1, u32::MAX, Some(u32::MAX), &config)
                .unwrap();
        assert_eq!(rect.width, config.min_box_width);
    }

    #[test]
    fn word_box_without_end() {
        let editor = Grid::new("let total = 1;");
        let config = LensConfig::default();
        let rect = box_for_position(&editor, Point::default(), 1, 6, None, &config).unwrap();
        assert_eq!((rect.x, rect.width), (140.0, 50.0));

        // On punctuation: a single column
        let rect = box_for_position(&editor, Point::default(), 1, 10, None, &config).unwrap();
        assert_eq!((rect.x, rect.width), (200.0, 10.0));
    }

    #[test]
    fn unavailable_geometry() {
        let config = LensConfig::default();
        let mut editor = Grid::new("");
        assert!(box_for_position(&editor, ORIGIN, 11, 0, Some(1), &config).is_none());
        editor.rect = None;
        assert!(box_for_position(&editor, ORIGIN, 1, 0, Some(1), &config).is_none());
    }

    #[test]
    fn line_height_fallbacks() {
        let config = LensConfig::default();
        let mut editor = Grid::new("");
        assert_eq!(line_height(&editor, &config), 20.0);
        editor.line_height = None;
        editor.font_size = Some(13.0);
        assert_eq!(line_height(&editor, &config), 20.0);
        editor.font_size = Some(16.0);
        assert_eq!(line_height(&editor, &config), 24.0);
        editor.font_size = None;
        assert_eq!(line_height(&editor, &config), config.default_line_height);
    }

    #[test]
    fn visible_tab_is_boxed() {
        let chrome = Chrome {
            tab: Some(Rect::new(60.0, 45.0, 80.0, 30.0)),
            pane: Some(Rect::new(0.0, 40.0, 500.0, 700.0)),
        };
        let rect = tab_box(&chrome, Pane::Original, "a.ts", ORIGIN, &LensConfig::default());
        assert_eq!(rect, Some(Rect::new(60.0, 5.0, 80.0, 30.0)));
    }

    #[test]
    fn offscreen_tab_uses_placeholder() {
        let config = LensConfig::default();
        let mut chrome = Chrome {
            tab: Some(Rect::new(-120.0, 45.0, 80.0, 30.0)),
            pane: Some(Rect::new(0.0, 40.0, 500.0, 700.0)),
        };
        let expected = Some(Rect::new(20.0, 35.0, 200.0, 24.0));
        assert_eq!(tab_box(&chrome, Pane::Original, "a.ts", ORIGIN, &config), expected);

        chrome.tab = None;
        assert_eq!(tab_box(&chrome, Pane::Original, "a.ts", ORIGIN, &config), expected);

        // Narrow pane shrinks the placeholder
        chrome.pane = Some(Rect::new(0.0, 40.0, 140.0, 700.0));
        let rect = tab_box(&chrome, Pane::Original, "a.ts", ORIGIN, &config).unwrap();
        assert_eq!(rect.width, 100.0);

        chrome.pane = None;
        assert!(tab_box(&chrome, Pane::Original, "a.ts", ORIGIN, &config).is_none());
    }

    #[test]
    fn narrow_pane_placeholder_has_no_negative_width() {
        let chrome = Chrome {
            tab: None,
            pane: Some(Rect::new(0.0, 0.0, 30.0, 300.0)),
        };
        let rect = tab_box(
            &chrome,
            Pane::Original,
            "a.ts",
            Point::default(),
            &LensConfig::default(),
        )
        .unwrap();
        assert_eq!(rect.width, 0.0);
        assert_eq!((rect.x, rect.height), (20.0, 24.0));
    }

    #[test]
    fn connector_control_offset_is_capped() {
        let config = LensConfig::default();
        let from = Rect::new(0.0, 0.0, 50.0, 20.0);

        let near = Connector::between(from, Rect::new(110.0, 40.0, 30.0, 20.0), &config);
        assert_eq!(near.start, Point::new(50.0, 10.0));
        assert_eq!(near.end, Point::new(110.0, 50.0));
        assert_eq!(near.control1, Point::new(80.0, 10.0));
        assert_eq!(near.control2, Point::new(80.0, 50.0));

        let far = Connector::between(from, Rect::new(650.0, 0.0, 30.0, 20.0), &config);
        assert_eq!(far.control1.x, 150.0);
        assert_eq!(far.control2.x, 550.0);
    }

    #[test]
    fn arrowhead_points_back_along_tangent() {
        let config = LensConfig::default();
        let c = Connector::between(
            Rect::new(0.0, 0.0, 10.0, 20.0),
            Rect::new(210.0, 0.0, 10.0, 20.0),
            &config,
        );
        // Horizontal approach: arms are mirrored around the end's y
        let [upper, lower] = c.arrow;
        assert!(upper.x < c.end.x && lower.x < c.end.x);
        assert!((upper.y + lower.y - 2.0 * c.end.y).abs() < 1e-9);
        let len = ((c.end.x - upper.x).powi(2) + (c.end.y - upper.y).powi(2)).sqrt();
        assert!((len - config.arrow_size).abs() < 1e-9);
        assert!((c.end.x - upper.x - 8.0 * 30f64.to_radians().cos()).abs() < 1e-9);
    }

    #[test]
    fn vertically_aligned_boxes_connect_straight() {
        let config = LensConfig::default();
        let c = Connector::between(
            Rect::new(0.0, 0.0, 10.0, 20.0),
            Rect::new(10.0, 100.0, 10.0, 20.0),
            &config,
        );
        assert_eq!(c.control1, c.start);
        assert_eq!(c.control2, c.end);
    }
}
