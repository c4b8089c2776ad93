//! Per-line lookup structures over decoded mappings
//!
//! A [`MappingIndex`] is built once per output file and never mutated after
//! construction. It holds every mapping once and two families of buckets
//! pointing into that list:
//!
//! - by generated line, ordered by generated column
//! - by (original source, original line), ordered by original column
//!
//! Within each bucket the end of segment *i* is the start of the next segment
//! with a greater start column. The last segment of a bucket is given a
//! heuristic width: the length of its symbolic name, or a fixed fallback.

use crate::decode::decode;
use crate::error::Result;
use crate::types::{Mapping, OriginalSpan, RawMapping};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Width given to the last segment of a line when it has no symbolic name.
pub const DEFAULT_FALLBACK_WIDTH: u32 = 5;

/// Mapping buckets for one original source, keyed by original line.
pub type OriginalLines = BTreeMap<u32, Vec<usize>>;

/// Lookup structures for one output file.
#[derive(Debug, Clone, Default)]
pub struct MappingIndex {
    mappings: Vec<Mapping>,
    by_generated: BTreeMap<u32, Vec<usize>>,
    by_original: IndexMap<Arc<str>, OriginalLines>,
}

impl MappingIndex {
    /// An index without any buckets.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode `payload` and build an index from it.
    pub fn from_payload(payload: &str, fallback_width: u32) -> Result<Self> {
        let decoded = decode(payload)?;
        Ok(Self::build(decoded.mappings, fallback_width))
    }

    /// Build an index from already decoded records.
    ///
    /// Records without an original source still land in their generated-line
    /// bucket so they bound the extent of the segment before them.
    pub fn build(records: impl IntoIterator<Item = RawMapping>, fallback_width: u32) -> Self {
        let mut mappings = Vec::new();
        let mut by_generated: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        let mut by_original: IndexMap<Arc<str>, OriginalLines> = IndexMap::new();

        for record in records {
            let id = mappings.len();
            let original = match (record.source, record.original_line, record.original_column) {
                (Some(source), Some(line), Some(column)) => Some(OriginalSpan {
                    source,
                    line,
                    column,
                    column_end: column,
                }),
                _ => None,
            };

            by_generated.entry(record.generated_line).or_default().push(id);
            if let Some(original) = &original {
                by_original
                    .entry(original.source.clone())
                    .or_default()
                    .entry(original.line)
                    .or_default()
                    .push(id);
            }

            mappings.push(Mapping {
                generated_line: record.generated_line,
                generated_column: record.generated_column,
                generated_column_end: record.generated_column,
                original,
                name: record.name,
            });
        }

        for bucket in by_generated.values_mut() {
            bucket.sort_by_key(|&id| mappings[id].generated_column);
            derive_ends(
                bucket,
                &mut mappings,
                fallback_width,
                |m| m.generated_column,
                |m, end| m.generated_column_end = end,
            );
        }

        for lines in by_original.values_mut() {
            for bucket in lines.values_mut() {
                bucket.sort_by_key(|&id| original_column(&mappings[id]));
                derive_ends(
                    bucket,
                    &mut mappings,
                    fallback_width,
                    original_column,
                    |m, end| {
                        if let Some(original) = m.original.as_mut() {
                            original.column_end = end;
                        }
                    },
                );
            }
        }

        tracing::debug!(
            mappings = mappings.len(),
            generated_lines = by_generated.len(),
            sources = by_original.len(),
            "Built mapping index"
        );

        Self {
            mappings,
            by_generated,
            by_original,
        }
    }

    /// Total number of mappings.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Number of generated-line buckets plus original-side buckets.
    pub fn bucket_count(&self) -> usize {
        self.by_generated.len() + self.by_original.values().map(|l| l.len()).sum::<usize>()
    }

    /// Mappings on a generated line, ordered by generated column.
    pub fn generated_line(&self, line: u32) -> Option<impl Iterator<Item = &Mapping> + '_> {
        self.by_generated
            .get(&line)
            .map(move |bucket| bucket.iter().map(move |&id| &self.mappings[id]))
    }

    /// All generated lines in line order, each with its ordered mappings.
    pub fn generated_lines(&self) -> impl Iterator<Item = (u32, Vec<&Mapping>)> + '_ {
        self.by_generated.iter().map(move |(&line, bucket)| {
            (line, bucket.iter().map(|&id| &self.mappings[id]).collect())
        })
    }

    /// Source ids in order of first appearance.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.by_original.keys().map(|s| s.as_ref())
    }

    /// Original lines of `source` in line order, each with its ordered mappings.
    pub fn original_lines<'a>(
        &'a self,
        source: &str,
    ) -> Option<impl Iterator<Item = (u32, Vec<&'a Mapping>)> + use<'a>> {
        self.by_original.get(source).map(move |lines| {
            lines.iter().map(move |(&line, bucket)| {
                (line, bucket.iter().map(|&id| &self.mappings[id]).collect())
            })
        })
    }

    /// The segment enclosing `column` on a generated line.
    ///
    /// This is the last mapping whose start is at or before `column`; there is
    /// no upper bound, so a column past the end of the last segment still
    /// resolves to it.
    pub fn enclosing_generated(&self, line: u32, column: u32) -> Option<&Mapping> {
        let bucket = self.by_generated.get(&line)?;
        let idx = bucket.partition_point(|&id| self.mappings[id].generated_column <= column);
        idx.checked_sub(1).map(|i| &self.mappings[bucket[i]])
    }

    /// The segment of `source` containing `column` on an original line.
    ///
    /// Unlike [`Self::enclosing_generated`], the column must fall strictly
    /// inside the segment's derived extent.
    pub fn containing_original(&self, source: &str, line: u32, column: u32) -> Option<&Mapping> {
        let bucket = self.by_original.get(source)?.get(&line)?;
        let idx = bucket.partition_point(|&id| original_column(&self.mappings[id]) <= column);
        let mapping = &self.mappings[bucket[idx.checked_sub(1)?]];
        match &mapping.original {
            Some(original) if original.contains(column) => Some(mapping),
            _ => None,
        }
    }
}

fn original_column(m: &Mapping) -> u32 {
    m.original.as_ref().map_or(0, |o| o.column)
}

/// Set each segment's end to the start of the next strictly later segment.
fn derive_ends(
    bucket: &[usize],
    mappings: &mut [Mapping],
    fallback_width: u32,
    start: impl Fn(&Mapping) -> u32,
    mut set_end: impl FnMut(&mut Mapping, u32),
) {
    for (pos, &id) in bucket.iter().enumerate() {
        let begin = start(&mappings[id]);
        let next = bucket[pos + 1..]
            .iter()
            .map(|&next| start(&mappings[next]))
            .find(|&next| next > begin);
        let end = match next {
            Some(next) => next,
            None => {
                let width = mappings[id]
                    .name
                    .as_ref()
                    .map_or(fallback_width, |n| {
                        u32::try_from(n.chars().count()).unwrap_or(u32::MAX)
                    });
                begin.saturating_add(width)
            }
        };
        // Saturates at the far right of a line instead of wrapping.
        set_end(&mut mappings[id], end.max(begin.saturating_add(1)));
    }
}
