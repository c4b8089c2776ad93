//! Persistent segment highlights
//!
//! A [`DecorationPlan`] is the pure result of a decoration pass: one
//! [`Decoration`] per segment for each pane. [`AppliedDecorations`] pushes a
//! plan into the editors, replacing whatever the previous pass applied.

use maplens_source_map::MappingIndex;

use crate::colors::SegmentColorTable;
use crate::palette::css_class;
use crate::panes::Pane;
use crate::surface::{Decoration, DecorationId, EditorSurface, TextRange};

/// Decorations for both panes from one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationPlan {
    pub output: Vec<Decoration>,
    pub original: Vec<Decoration>,
}

fn decoration(line: u32, start_column: u32, end_column: u32, color: u32) -> Decoration {
    Decoration {
        range: TextRange {
            line,
            start_column,
            end_column,
        },
        color,
        class_name: css_class(color),
    }
}

impl DecorationPlan {
    /// Build the plan for the active output file.
    ///
    /// `original_source` is the recorded source id of the file shown in the
    /// original pane; `colors` must come from the same index and source.
    pub fn build(
        index: &MappingIndex,
        colors: &SegmentColorTable,
        original_source: Option<&str>,
    ) -> Self {
        let mut plan = Self::default();

        for (line, mappings) in index.generated_lines() {
            for m in mappings {
                if let Some(color) = colors.generated_color(line, m.generated_column) {
                    plan.output.push(decoration(
                        line,
                        m.generated_column,
                        m.generated_column_end,
                        color,
                    ));
                }
            }
        }

        if let Some(source) = original_source
            && let Some(lines) = index.original_lines(source)
        {
            for (line, mappings) in lines {
                for original in mappings.iter().filter_map(|m| m.original.as_ref()) {
                    if let Some(color) =
                        colors.segment_color(source, original.line, original.column)
                    {
                        plan.original.push(decoration(
                            line,
                            original.column,
                            original.column_end,
                            color,
                        ));
                    }
                }
            }
        }

        plan
    }

    pub fn for_pane(&self, pane: Pane) -> &[Decoration] {
        match pane {
            Pane::Original => &self.original,
            Pane::Output => &self.output,
        }
    }

    pub fn len(&self) -> usize {
        self.output.len() + self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty() && self.original.is_empty()
    }

    /// Line-per-decoration text form, mainly for inspection and tests.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (label, decorations) in [("output", &self.output), ("original", &self.original)] {
            out.push_str(&format!("[{label}]\n"));
            for d in decorations {
                out.push_str(&format!(
                    "{}:{}-{} #{} {}\n",
                    d.range.line, d.range.start_column, d.range.end_column, d.color, d.class_name
                ));
            }
        }
        out
    }
}

/// Decoration ids currently applied in each pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedDecorations {
    original: Vec<DecorationId>,
    output: Vec<DecorationId>,
}

impl AppliedDecorations {
    pub fn ids(&self, pane: Pane) -> &[DecorationId] {
        match pane {
            Pane::Original => &self.original,
            Pane::Output => &self.output,
        }
    }

    fn slot(&mut self, pane: Pane) -> &mut Vec<DecorationId> {
        match pane {
            Pane::Original => &mut self.original,
            Pane::Output => &mut self.output,
        }
    }

    /// Replace the decorations in `pane` with `next`.
    pub fn replace<E: EditorSurface + ?Sized>(
        &mut self,
        pane: Pane,
        editor: &mut E,
        next: &[Decoration],
    ) {
        let slot = self.slot(pane);
        if slot.is_empty() && next.is_empty() {
            return;
        }
        let ids = editor.replace_decorations(slot, next);
        *slot = ids;
    }

    /// Remove every decoration this tracker applied in `pane`.
    pub fn clear<E: EditorSurface + ?Sized>(&mut self, pane: Pane, editor: &mut E) {
        self.replace(pane, editor, &[]);
    }

    /// Forget the ids for `pane` without touching the editor (it was disposed).
    pub fn forget(&mut self, pane: Pane) {
        self.slot(pane).clear();
    }
}
