//! Hover resolution
//!
//! Turns a pointer position in one pane into a [`CrossReference`]: the
//! segment under the pointer, its counterpart in the other pane, whether the
//! original file is on screen, and the segment's color.
//!
//! The two directions deliberately use different containment rules:
//!
//! - **Output → original**: the nearest segment starting at or before the
//!   pointer wins, with no upper bound. A pointer past the last segment start
//!   on a line still resolves to that segment.
//! - **Original → output**: the pointer must fall inside the segment's derived
//!   extent. A pointer past the end yields no match.
//!
//! Resolution functions are pure; the session stores whatever they return,
//! replacing the previous cross-reference wholesale.

use maplens_source_map::{Mapping, MappingIndex};
use serde::{Deserialize, Serialize};

use crate::colors::SegmentColorTable;
use crate::palette::palette_index;
use crate::panes::{EditorPosition, PaneFiles};
use crate::paths::SourceMatcher;

/// Which pane produced a cross-reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverDirection {
    /// Pointer in the output pane, pointing back at the original.
    Output,
    /// Pointer in the original pane, pointing at the output.
    Original,
}

/// Original-side endpoint of a cross-reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalEndpoint {
    /// Open filename the segment's source resolved to
    pub filename: String,
    pub line: u32,
    pub column: u32,
    pub column_end: u32,
}

/// Generated-side endpoint of a cross-reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedEndpoint {
    /// Output file the segment lives in
    pub filename: String,
    pub line: u32,
    pub column: u32,
    pub column_end: u32,
}

/// A fully resolved hover result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReference {
    pub direction: HoverDirection,
    pub original: OriginalEndpoint,
    pub generated: GeneratedEndpoint,
    /// Whether the original pane is currently showing `original.filename`
    pub original_visible: bool,
    /// Assigned color value; `None` renders with the first palette entry
    pub color: Option<u32>,
}

impl CrossReference {
    /// Palette slot to draw with.
    pub fn palette_index(&self) -> usize {
        self.color.map_or(0, palette_index)
    }
}

/// Outcome of a hover query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Match(CrossReference),
    /// No enclosing segment, no source association, or no open file for it.
    NoMatch,
}

impl Resolution {
    pub fn into_option(self) -> Option<CrossReference> {
        match self {
            Resolution::Match(xref) => Some(xref),
            Resolution::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Resolution::Match(_))
    }
}

/// Read-only state shared by both resolution directions.
#[derive(Debug, Clone, Copy)]
pub struct HoverContext<'a> {
    pub matcher: &'a SourceMatcher,
    pub colors: &'a SegmentColorTable,
    pub originals: &'a PaneFiles,
}

/// Resolve a pointer in the output pane showing `output`.
pub fn resolve_output_hover(
    ctx: HoverContext<'_>,
    output: &str,
    index: &MappingIndex,
    position: EditorPosition,
) -> Resolution {
    let Some(mapping) = index.enclosing_generated(position.line, position.column) else {
        return Resolution::NoMatch;
    };
    let Some(original) = &mapping.original else {
        return Resolution::NoMatch;
    };
    let Some(file_index) = ctx
        .matcher
        .resolve_open_file(&original.source, ctx.originals.filenames())
    else {
        tracing::trace!(source = %original.source, "Hovered segment has no open file");
        return Resolution::NoMatch;
    };

    let filename = ctx.originals.filenames()[file_index].clone();
    let color = ctx.colors.lookup(
        &original.source,
        original.line,
        original.column,
        ctx.matcher.prefixes(),
    );

    Resolution::Match(CrossReference {
        direction: HoverDirection::Output,
        original: OriginalEndpoint {
            filename,
            line: original.line,
            column: original.column,
            column_end: original.column_end,
        },
        generated: generated_endpoint(output, mapping),
        original_visible: ctx.originals.is_active(file_index),
        color,
    })
}

/// Resolve a pointer in the original pane against every output file.
///
/// Outputs are searched in the order given; the first one with a segment
/// containing the pointer wins.
pub fn resolve_original_hover<'i>(
    ctx: HoverContext<'_>,
    outputs: impl IntoIterator<Item = (&'i str, &'i MappingIndex)>,
    position: EditorPosition,
) -> Resolution {
    let Some(filename) = ctx.originals.active_filename() else {
        return Resolution::NoMatch;
    };

    for (output, index) in outputs {
        let Some(source_key) = ctx.matcher.find_source_key(filename, index.sources()) else {
            continue;
        };
        let Some(mapping) = index.containing_original(source_key, position.line, position.column)
        else {
            continue;
        };
        let Some(original) = &mapping.original else {
            continue;
        };

        let color = ctx.colors.lookup(
            source_key,
            original.line,
            original.column,
            ctx.matcher.prefixes(),
        );

        return Resolution::Match(CrossReference {
            direction: HoverDirection::Original,
            original: OriginalEndpoint {
                filename: filename.to_string(),
                line: original.line,
                column: original.column,
                column_end: original.column_end,
            },
            generated: generated_endpoint(output, mapping),
            original_visible: true,
            color,
        });
    }

    Resolution::NoMatch
}

fn generated_endpoint(output: &str, mapping: &Mapping) -> GeneratedEndpoint {
    GeneratedEndpoint {
        filename: output.to_string(),
        line: mapping.generated_line,
        column: mapping.generated_column,
        column_end: mapping.generated_column_end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplens_source_map::{DEFAULT_FALLBACK_WIDTH, RawMapping};

    fn index() -> MappingIndex {
        MappingIndex::build(
            vec![
                RawMapping::new(3, 0, "webpack:///src/main.ts", 1, 0),
                RawMapping::new(3, 10, "webpack:///src/main.ts", 2, 4).with_name("count"),
                RawMapping::new(4, 2, "webpack:///src/util.ts", 1, 5),
                RawMapping::generated_only(5, 0),
            ],
            DEFAULT_FALLBACK_WIDTH,
        )
    }

    fn with_ctx<R>(
        originals: &PaneFiles,
        colors: &SegmentColorTable,
        f: impl FnOnce(HoverContext<'_>) -> R,
    ) -> R {
        let matcher = SourceMatcher::default();
        f(HoverContext {
            matcher: &matcher,
            colors,
            originals,
        })
    }

    #[test]
    fn output_hover_resolves_nearest_preceding_segment() {
        let index = index();
        let originals = PaneFiles::new(["src/main.ts", "src/util.ts"]);
        let colors = SegmentColorTable::assign(&index, Some("webpack:///src/main.ts"));

        let xref = with_ctx(&originals, &colors, |ctx| {
            resolve_output_hover(ctx, "out.js", &index, EditorPosition::new(3, 50))
        })
        .into_option()
        .unwrap();

        assert_eq!(xref.direction, HoverDirection::Output);
        assert_eq!(xref.generated.column, 10);
        assert_eq!(xref.generated.column_end, 15);
        assert_eq!(xref.original.filename, "src/main.ts");
        assert_eq!((xref.original.line, xref.original.column), (2, 4));
        assert!(xref.original_visible);
        assert_eq!(xref.color, Some(1));
        assert_eq!(xref.palette_index(), 1);
    }

    #[test]
    fn output_hover_visibility_follows_active_file() {
        let index = index();
        let mut originals = PaneFiles::new(["src/main.ts", "src/util.ts"]);
        let colors = SegmentColorTable::new();

        let hover = |originals: &PaneFiles| {
            with_ctx(originals, &colors, |ctx| {
                resolve_output_hover(ctx, "out.js", &index, EditorPosition::new(4, 3))
            })
            .into_option()
            .unwrap()
        };

        let xref = hover(&originals);
        assert_eq!(xref.original.filename, "src/util.ts");
        assert!(!xref.original_visible);
        assert_eq!(xref.color, None);
        assert_eq!(xref.palette_index(), 0);

        originals.set_active(1);
        assert!(hover(&originals).original_visible);
    }

    #[test]
    fn output_hover_no_match_cases() {
        let index = index();
        let originals = PaneFiles::new(["src/main.ts"]);
        let colors = SegmentColorTable::new();
        with_ctx(&originals, &colors, |ctx| {
            // No bucket for the line
            assert_eq!(
                resolve_output_hover(ctx, "out.js", &index, EditorPosition::new(9, 0)),
                Resolution::NoMatch
            );
            // Before the first segment start
            assert_eq!(
                resolve_output_hover(ctx, "out.js", &index, EditorPosition::new(4, 1)),
                Resolution::NoMatch
            );
            // Segment without a source
            assert_eq!(
                resolve_output_hover(ctx, "out.js", &index, EditorPosition::new(5, 3)),
                Resolution::NoMatch
            );
            // Source not open anywhere
            assert_eq!(
                resolve_output_hover(ctx, "out.js", &index, EditorPosition::new(4, 2)),
                Resolution::NoMatch
            );
        });
    }

    #[test]
    fn original_hover_requires_containment() {
        let index = MappingIndex::build(
            vec![RawMapping::new(1, 0, "src/main.ts", 4, 5).with_name("abc")],
            DEFAULT_FALLBACK_WIDTH,
        );
        let originals = PaneFiles::new(["src/main.ts"]);
        let colors = SegmentColorTable::assign(&index, Some("src/main.ts"));
        with_ctx(&originals, &colors, |ctx| {
            let outputs = || [("out.js", &index)];
            let hit = resolve_original_hover(ctx, outputs(), EditorPosition::new(4, 6));
            let xref = hit.into_option().unwrap();
            assert_eq!(xref.direction, HoverDirection::Original);
            assert!(xref.original_visible);
            assert_eq!((xref.original.column, xref.original.column_end), (5, 8));
            assert_eq!(xref.generated.filename, "out.js");
            assert_eq!(xref.color, Some(0));

            assert!(!resolve_original_hover(ctx, outputs(), EditorPosition::new(4, 20)).is_match());
            assert!(!resolve_original_hover(ctx, outputs(), EditorPosition::new(4, 8)).is_match());
            assert!(!resolve_original_hover(ctx, outputs(), EditorPosition::new(4, 4)).is_match());
        });
    }

    #[test]
    fn original_hover_searches_every_output() {
        let first = MappingIndex::build(
            vec![RawMapping::new(1, 0, "other.ts", 1, 0)],
            DEFAULT_FALLBACK_WIDTH,
        );
        let second = MappingIndex::build(
            vec![RawMapping::new(7, 3, "./src/main.ts", 2, 0)],
            DEFAULT_FALLBACK_WIDTH,
        );
        let originals = PaneFiles::new(["src/main.ts"]);
        let colors = SegmentColorTable::new();
        let xref = with_ctx(&originals, &colors, |ctx| {
            resolve_original_hover(
                ctx,
                [("a.js", &first), ("b.js", &second)],
                EditorPosition::new(2, 1),
            )
        })
        .into_option()
        .unwrap();
        assert_eq!(xref.generated.filename, "b.js");
        assert_eq!((xref.generated.line, xref.generated.column), (7, 3));
    }

    #[test]
    fn original_hover_without_open_file() {
        let index = index();
        let originals = PaneFiles::default();
        let colors = SegmentColorTable::new();
        let result = with_ctx(&originals, &colors, |ctx| {
            resolve_original_hover(ctx, [("out.js", &index)], EditorPosition::new(1, 0))
        });
        assert_eq!(result, Resolution::NoMatch);
    }
}
