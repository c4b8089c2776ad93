//! Capability contracts for the host UI
//!
//! The core never touches a text buffer, DOM node or canvas directly. Hosts
//! implement these traits over whatever editor widget and drawing surface they
//! use; the core only asks for text, pixel positions and decoration updates.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};
use crate::panes::{EditorPosition, Pane};

/// Host-assigned identifier of one applied decoration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecorationId(pub String);

/// A single-line text range: 1-based line, 0-based half-open columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub line: u32,
    pub start_column: u32,
    pub end_column: u32,
}

/// A persistent background highlight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    pub range: TextRange,
    /// Assigned color value (cycles through the palette)
    pub color: u32,
    /// `segment-bg-{n}` class for hosts that style by class name
    pub class_name: String,
}

/// A word span on one line, 0-based half-open columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSpan {
    pub start_column: u32,
    pub end_column: u32,
}

/// An editor widget showing one file.
pub trait EditorSurface {
    /// Full buffer content.
    fn text(&self) -> String;

    /// Caret position, if the editor has focus.
    fn cursor(&self) -> Option<EditorPosition>;

    /// Content of a 1-based line.
    fn line_text(&self, line: u32) -> Option<String> {
        let index = usize::try_from(line.checked_sub(1)?).ok()?;
        self.text().lines().nth(index).map(str::to_string)
    }

    /// The word containing `column` on `line`, using the editor's tokenizer.
    ///
    /// The default treats letters, digits, `_` and `$` as word characters.
    fn word_at(&self, line: u32, column: u32) -> Option<WordSpan> {
        let text = self.line_text(line)?;
        word_at_column(&text, column)
    }

    /// Pixel position of (`line`, `column`) relative to the editor's own
    /// top-left corner, accounting for scrolling. `None` when off screen.
    fn scrolled_visible_position(&self, line: u32, column: u32) -> Option<Point>;

    /// The editor's bounding rectangle in viewport coordinates. `None` when
    /// the editor is not laid out.
    fn bounding_rect(&self) -> Option<Rect>;

    /// Configured line height in pixels.
    fn line_height(&self) -> Option<f64>;

    /// Configured font size in pixels.
    fn font_size(&self) -> Option<f64> {
        None
    }

    /// Replace the decorations identified by `previous` with `next`,
    /// returning the identifiers of the new set.
    fn replace_decorations(
        &mut self,
        previous: &[DecorationId],
        next: &[Decoration],
    ) -> Vec<DecorationId>;
}

/// Pane chrome around the editors: tab strips and pane containers.
pub trait PaneChrome {
    /// Viewport rectangle of the tab showing `filename` in `pane`.
    fn tab_rect(&self, pane: Pane, filename: &str) -> Option<Rect>;

    /// Viewport rectangle of the whole pane, header included.
    fn pane_rect(&self, pane: Pane) -> Option<Rect>;

    /// Viewport size of the host window.
    fn viewport(&self) -> Size;
}

/// The overlay drawing surface spanning both panes.
pub trait OverlayCanvas {
    /// Viewport rectangle of the canvas' parent; the overlay coordinate origin.
    fn bounding_rect(&self) -> Option<Rect>;

    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: &str);

    fn stroke_rect(&mut self, rect: Rect, color: &str, width: f64);

    /// Stroke a cubic Bézier curve.
    fn stroke_curve(
        &mut self,
        start: Point,
        control1: Point,
        control2: Point,
        end: Point,
        color: &str,
        width: f64,
    );

    fn stroke_line(&mut self, from: Point, to: Point, color: &str, width: f64);
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Word boundaries around `column` in `line`, counted in characters.
pub fn word_at_column(line: &str, column: u32) -> Option<WordSpan> {
    let chars: Vec<char> = line.chars().collect();
    let column = column as usize;
    if !chars.get(column).copied().is_some_and(is_word_char) {
        return None;
    }
    let start = chars[..column]
        .iter()
        .rposition(|&c| !is_word_char(c))
        .map_or(0, |p| p + 1);
    let end = chars[column..]
        .iter()
        .position(|&c| !is_word_char(c))
        .map_or(chars.len(), |p| column + p);
    Some(WordSpan {
        start_column: start as u32,
        end_column: end as u32,
    })
}
