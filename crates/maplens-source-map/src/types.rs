//! Core types for decoded mappings

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One decoded record, before segment extents are known.
///
/// Lines are 1-based and columns 0-based, matching what standard source map
/// consumers expose. Records without an original-side correspondence carry
/// `None` for every original field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMapping {
    pub generated_line: u32,
    pub generated_column: u32,
    pub source: Option<Arc<str>>,
    pub original_line: Option<u32>,
    pub original_column: Option<u32>,
    pub name: Option<Arc<str>>,
}

impl RawMapping {
    /// A record that only marks a generated position.
    pub fn generated_only(generated_line: u32, generated_column: u32) -> Self {
        Self {
            generated_line,
            generated_column,
            source: None,
            original_line: None,
            original_column: None,
            name: None,
        }
    }

    /// A record tying a generated position to a position in `source`.
    pub fn new(
        generated_line: u32,
        generated_column: u32,
        source: impl Into<Arc<str>>,
        original_line: u32,
        original_column: u32,
    ) -> Self {
        Self {
            generated_line,
            generated_column,
            source: Some(source.into()),
            original_line: Some(original_line),
            original_column: Some(original_column),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// The original-side half of a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalSpan {
    /// Source id exactly as recorded in the payload
    pub source: Arc<str>,
    /// Original line (1-based)
    pub line: u32,
    /// Start column (0-based, inclusive)
    pub column: u32,
    /// End column (0-based, exclusive), derived from the next segment on the line
    pub column_end: u32,
}

impl OriginalSpan {
    /// Whether `column` lies inside `[column, column_end)`.
    pub fn contains(&self, column: u32) -> bool {
        self.column <= column && column < self.column_end
    }
}

/// One correspondence unit with both extents derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    /// Generated line (1-based)
    pub generated_line: u32,
    /// Start column in the generated line (0-based, inclusive)
    pub generated_column: u32,
    /// End column in the generated line (0-based, exclusive)
    pub generated_column_end: u32,
    /// Original position, if the record has one
    pub original: Option<OriginalSpan>,
    /// Symbolic name
    pub name: Option<Arc<str>>,
}

impl Mapping {
    /// Whether `column` lies inside the generated segment `[start, end)`.
    pub fn generated_contains(&self, column: u32) -> bool {
        self.generated_column <= column && column < self.generated_column_end
    }

    pub fn source(&self) -> Option<&str> {
        self.original.as_ref().map(|o| o.source.as_ref())
    }
}
