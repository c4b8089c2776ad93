//! Pane state: which files a pane has open and which one it shows.

use serde::{Deserialize, Serialize};

/// One of the two editor panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pane {
    /// The pane showing original (input) sources.
    Original,
    /// The pane showing compiled/bundled output.
    Output,
}

/// A position reported by an editor: 1-based line, 0-based column.
///
/// Editors with 1-based columns convert before reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct EditorPosition {
    pub line: u32,
    pub column: u32,
}

impl EditorPosition {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// The open files of a pane, in tab order, plus the active tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaneFiles {
    filenames: Vec<String>,
    active: usize,
}

impl PaneFiles {
    /// Create pane state with the first file active.
    pub fn new(filenames: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            filenames: filenames.into_iter().map(Into::into).collect(),
            active: 0,
        }
    }

    /// Replace the open files. The active tab is kept if it still exists.
    pub fn set_files(&mut self, filenames: impl IntoIterator<Item = impl Into<String>>) {
        self.filenames = filenames.into_iter().map(Into::into).collect();
        if self.active >= self.filenames.len() {
            self.active = 0;
        }
    }

    /// Switch the active tab. Returns `true` if the active file changed.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.filenames.len() || index == self.active {
            return false;
        }
        self.active = index;
        true
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Filename shown in the pane, if any file is open.
    pub fn active_filename(&self) -> Option<&str> {
        self.filenames.get(self.active).map(|s| s.as_str())
    }

    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    /// Whether `index` is the file the pane is showing.
    pub fn is_active(&self, index: usize) -> bool {
        index == self.active && index < self.filenames.len()
    }

    pub fn len(&self) -> usize {
        self.filenames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filenames.is_empty()
    }
}
