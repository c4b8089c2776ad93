//! Segment color palette
//!
//! Sixteen translucent backgrounds with matching opaque borders. Segment
//! colors are assigned as an ever-increasing counter and cycle through this
//! table, so adjacent segments within one pass never share a color.

use serde::Serialize;

/// Number of distinct palette entries.
pub const PALETTE_SIZE: usize = 16;

/// One palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SegmentColor {
    /// Fill used for decorations and box interiors
    pub background: &'static str,
    /// Stroke used for box outlines, the connector and the arrowhead
    pub border: &'static str,
}

const fn entry(background: &'static str, border: &'static str) -> SegmentColor {
    SegmentColor { background, border }
}

pub const PALETTE: [SegmentColor; PALETTE_SIZE] = [
    entry("rgba(255, 99, 132, 0.25)", "rgba(255, 99, 132, 0.8)"), // pink
    entry("rgba(54, 162, 235, 0.25)", "rgba(54, 162, 235, 0.8)"), // blue
    entry("rgba(255, 206, 86, 0.25)", "rgba(255, 206, 86, 0.8)"), // yellow
    entry("rgba(75, 192, 192, 0.25)", "rgba(75, 192, 192, 0.8)"), // teal
    entry("rgba(153, 102, 255, 0.25)", "rgba(153, 102, 255, 0.8)"), // purple
    entry("rgba(255, 159, 64, 0.25)", "rgba(255, 159, 64, 0.8)"), // orange
    entry("rgba(46, 204, 113, 0.25)", "rgba(46, 204, 113, 0.8)"), // green
    entry("rgba(231, 76, 60, 0.25)", "rgba(231, 76, 60, 0.8)"),   // red
    entry("rgba(52, 152, 219, 0.25)", "rgba(52, 152, 219, 0.8)"), // light blue
    entry("rgba(155, 89, 182, 0.25)", "rgba(155, 89, 182, 0.8)"), // violet
    entry("rgba(241, 196, 15, 0.25)", "rgba(241, 196, 15, 0.8)"), // gold
    entry("rgba(26, 188, 156, 0.25)", "rgba(26, 188, 156, 0.8)"), // turquoise
    entry("rgba(230, 126, 34, 0.25)", "rgba(230, 126, 34, 0.8)"), // carrot
    entry("rgba(149, 165, 166, 0.25)", "rgba(149, 165, 166, 0.8)"), // gray
    entry("rgba(211, 84, 0, 0.25)", "rgba(211, 84, 0, 0.8)"),     // pumpkin
    entry("rgba(142, 68, 173, 0.25)", "rgba(142, 68, 173, 0.8)"), // amethyst
];

/// Palette slot for an assigned color value.
pub fn palette_index(assigned: u32) -> usize {
    assigned as usize % PALETTE_SIZE
}

/// Palette entry for an assigned color value.
pub fn color_for(assigned: u32) -> &'static SegmentColor {
    &PALETTE[palette_index(assigned)]
}

/// CSS class name hosts can use to style a decoration.
pub fn css_class(assigned: u32) -> String {
    format!("segment-bg-{}", palette_index(assigned))
}
