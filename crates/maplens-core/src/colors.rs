//! Segment color assignment
//!
//! One pass walks the active output file's generated lines in line order,
//! then column order, handing out an increasing counter to every segment.
//! Segments with an original side are also recorded under their
//! (source, original line, original column) key, so the same logical segment
//! gets the same color in both panes. A second walk over the active original
//! file's buckets reuses those values and hands out fresh ones to segments that
//! only exist on the original side.
//!
//! Values are only meaningful within one pass; every pass starts from zero.

use maplens_source_map::MappingIndex;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::palette::palette_index;

/// Color values assigned during one decoration pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentColorTable {
    /// source id -> (original line, original column) -> value
    by_segment: FxHashMap<Arc<str>, FxHashMap<(u32, u32), u32>>,
    /// (generated line, generated column) -> value
    by_generated: FxHashMap<(u32, u32), u32>,
    assigned: u32,
}

impl SegmentColorTable {
    /// A table with nothing assigned.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a full assignment pass over `index`.
    ///
    /// `original_source` is the recorded source id of the file shown in the
    /// original pane, if the index has one.
    pub fn assign(index: &MappingIndex, original_source: Option<&str>) -> Self {
        let mut table = Self::new();

        for (line, mappings) in index.generated_lines() {
            for mapping in mappings {
                let value = table.next_value();
                table
                    .by_generated
                    .insert((line, mapping.generated_column), value);
                if let Some(original) = &mapping.original {
                    table
                        .by_segment
                        .entry(original.source.clone())
                        .or_default()
                        .insert((original.line, original.column), value);
                }
            }
        }

        if let Some(lines) = original_source.and_then(|s| index.original_lines(s)) {
            for (_, mappings) in lines {
                for original in mappings.iter().filter_map(|m| m.original.as_ref()) {
                    let key = (original.line, original.column);
                    let known = table
                        .by_segment
                        .get(&*original.source)
                        .is_some_and(|segments| segments.contains_key(&key));
                    if !known {
                        let value = table.next_value();
                        table
                            .by_segment
                            .entry(original.source.clone())
                            .or_default()
                            .insert(key, value);
                    }
                }
            }
        }

        table
    }

    fn next_value(&mut self) -> u32 {
        let value = self.assigned;
        self.assigned += 1;
        value
    }

    /// Number of values handed out in this pass.
    pub fn assigned(&self) -> u32 {
        self.assigned
    }

    pub fn is_empty(&self) -> bool {
        self.assigned == 0
    }

    /// Value of the segment starting at (`line`, `column`) in `source`.
    pub fn segment_color(&self, source: &str, line: u32, column: u32) -> Option<u32> {
        self.by_segment.get(source)?.get(&(line, column)).copied()
    }

    /// Value of the generated segment starting at (`line`, `column`).
    pub fn generated_color(&self, line: u32, column: u32) -> Option<u32> {
        self.by_generated.get(&(line, column)).copied()
    }

    /// Like [`Self::segment_color`], also trying `source` under each of
    /// `prefixes` when the id as given has no entry.
    pub fn lookup(&self, source: &str, line: u32, column: u32, prefixes: &[String]) -> Option<u32> {
        self.segment_color(source, line, column).or_else(|| {
            prefixes
                .iter()
                .find_map(|p| self.segment_color(&format!("{}{}", p, source), line, column))
        })
    }

    /// Palette slot for a segment, if it has a value.
    pub fn palette_slot(&self, source: &str, line: u32, column: u32) -> Option<usize> {
        self.segment_color(source, line, column).map(palette_index)
    }
}
