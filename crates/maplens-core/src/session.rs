//! Session-scoped state
//!
//! [`LensSession`] owns everything that outlives a single event: the current
//! bundle's payloads, the per-output [`MappingIndex`] cache, pane state, the
//! color table of the last decoration pass and the current cross-reference.
//! It is constructed per bundle lifecycle and torn down with
//! [`LensSession::reset`]; nothing here is global.
//!
//! Indices are built lazily on first use and replaced wholesale, never
//! mutated in place. A pointer event always resolves against a fully built
//! index.

use std::sync::Arc;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use maplens_source_map::MappingIndex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::colors::SegmentColorTable;
use crate::config::LensConfig;
use crate::decorations::DecorationPlan;
use crate::error::LensError;
use crate::hover::{CrossReference, HoverContext, resolve_original_hover, resolve_output_hover};
use crate::panes::{EditorPosition, Pane, PaneFiles};
use crate::paths::SourceMatcher;
use crate::schedule::DecorationScheduler;

/// A pointer event from one of the editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    /// The pointer moved over (`line`, `column`) in `pane`.
    Moved {
        pane: Pane,
        position: EditorPosition,
    },
    /// The pointer left an editor.
    Left,
}

pub struct LensSession {
    config: LensConfig,
    matcher: SourceMatcher,
    enabled: bool,
    format_output: bool,
    /// output filename -> raw payload, in bundle order
    bundle: IndexMap<String, String>,
    generation: u64,
    indices: FxHashMap<String, Arc<MappingIndex>>,
    originals: PaneFiles,
    outputs: PaneFiles,
    colors: SegmentColorTable,
    cross_reference: Option<CrossReference>,
    scheduler: DecorationScheduler,
}

impl LensSession {
    pub fn new(config: LensConfig) -> Self {
        Self {
            matcher: SourceMatcher::new(config.virtual_root_prefixes.iter().cloned()),
            scheduler: DecorationScheduler::new(Duration::from_millis(config.edit_debounce_ms)),
            config,
            enabled: false,
            format_output: false,
            bundle: IndexMap::new(),
            generation: 0,
            indices: FxHashMap::default(),
            originals: PaneFiles::default(),
            outputs: PaneFiles::default(),
            colors: SegmentColorTable::new(),
            cross_reference: None,
        }
    }

    pub fn config(&self) -> &LensConfig {
        &self.config
    }

    pub fn matcher(&self) -> &SourceMatcher {
        &self.matcher
    }

    // -- Bundle and index cache --

    /// Install a new bundle result (output filename -> payload).
    ///
    /// Drops every cached index, the color table and the current
    /// cross-reference.
    pub fn set_bundle<K, V>(&mut self, sourcemaps: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.bundle = sourcemaps
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.indices.clear();
        self.colors = SegmentColorTable::new();
        self.cross_reference = None;
        self.generation += 1;
        tracing::debug!(
            generation = self.generation,
            outputs = self.bundle.len(),
            "Bundle replaced, mapping cache cleared"
        );
    }

    /// Incremented every time the bundle changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The mapping index for `output`, building it on first use.
    ///
    /// Returns `None` when the bundle has no payload for `output`. A payload
    /// that fails to decode is logged and cached as an empty index.
    pub fn index(&mut self, output: &str) -> Option<Arc<MappingIndex>> {
        if let Some(index) = self.indices.get(output) {
            return Some(Arc::clone(index));
        }
        let payload = self.bundle.get(output)?;

        let index = match MappingIndex::from_payload(payload, self.config.fallback_segment_width) {
            Ok(index) => index,
            Err(source) => {
                let error = LensError::Decode {
                    output: output.to_string(),
                    source,
                };
                tracing::warn!(%error, "Treating output as unmapped");
                MappingIndex::empty()
            }
        };
        tracing::debug!(
            output,
            mappings = index.len(),
            buckets = index.bucket_count(),
            "Indexed output"
        );

        let index = Arc::new(index);
        self.indices.insert(output.to_string(), Arc::clone(&index));
        Some(index)
    }

    /// Number of outputs with a built index.
    pub fn cached_indices(&self) -> usize {
        self.indices.len()
    }

    // -- Toggles --

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn visualization on or off.
    ///
    /// Formatted output shifts generated positions, so enabling switches it
    /// off. Returns `true` when that happened.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        self.enabled = enabled;
        if !enabled {
            self.cross_reference = None;
            self.colors = SegmentColorTable::new();
            return false;
        }
        std::mem::replace(&mut self.format_output, false)
    }

    pub fn format_output(&self) -> bool {
        self.format_output
    }

    pub fn set_format_output(&mut self, format: bool) {
        self.format_output = format;
    }

    // -- Panes --

    pub fn pane(&self, pane: Pane) -> &PaneFiles {
        match pane {
            Pane::Original => &self.originals,
            Pane::Output => &self.outputs,
        }
    }

    fn pane_mut(&mut self, pane: Pane) -> &mut PaneFiles {
        match pane {
            Pane::Original => &mut self.originals,
            Pane::Output => &mut self.outputs,
        }
    }

    pub fn set_files<S: Into<String>>(&mut self, pane: Pane, filenames: impl IntoIterator<Item = S>) {
        self.pane_mut(pane).set_files(filenames);
    }

    /// Switch the active tab of `pane`. Returns `true` if it changed.
    ///
    /// The held cross-reference is left alone; its visibility flag is
    /// recomputed by the next resolution.
    pub fn set_active(&mut self, pane: Pane, index: usize) -> bool {
        self.pane_mut(pane).set_active(index)
    }

    // -- Decoration passes --

    /// Run a full decoration pass for the active output and original files.
    ///
    /// Returns `None` while disabled (callers clear their decorations).
    /// Without an active output or payload the plan is empty.
    pub fn recolor(&mut self) -> Option<DecorationPlan> {
        self.scheduler.cancel();
        if !self.enabled {
            self.colors = SegmentColorTable::new();
            return None;
        }

        let index = self
            .outputs
            .active_filename()
            .map(str::to_string)
            .and_then(|output| self.index(&output));
        let Some(index) = index else {
            self.colors = SegmentColorTable::new();
            return Some(DecorationPlan::default());
        };

        let source_key = self
            .originals
            .active_filename()
            .and_then(|filename| self.matcher.find_source_key(filename, index.sources()));
        self.colors = SegmentColorTable::assign(&index, source_key);
        let plan = DecorationPlan::build(&index, &self.colors, source_key);

        tracing::debug!(
            output = plan.output.len(),
            original = plan.original.len(),
            colors = self.colors.assigned(),
            "Decoration pass"
        );
        Some(plan)
    }

    /// Color table of the last decoration pass.
    pub fn colors(&self) -> &SegmentColorTable {
        &self.colors
    }

    /// Record a content edit; a pass becomes due after the debounce delay.
    pub fn note_edit(&mut self, now: Instant) {
        self.scheduler.note_edit(now);
    }

    /// Whether the debounced pass is due now.
    pub fn poll_redecorate(&mut self, now: Instant) -> bool {
        self.scheduler.poll(now)
    }

    pub fn scheduler(&self) -> &DecorationScheduler {
        &self.scheduler
    }

    // -- Hover --

    /// Resolve a pointer event, replacing the current cross-reference.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<&CrossReference> {
        self.cross_reference = match event {
            PointerEvent::Left => None,
            PointerEvent::Moved { .. } if !self.enabled => None,
            PointerEvent::Moved {
                pane: Pane::Output,
                position,
            } => self.resolve_output(position),
            PointerEvent::Moved {
                pane: Pane::Original,
                position,
            } => self.resolve_original(position),
        };
        tracing::trace!(?event, matched = self.cross_reference.is_some(), "Pointer resolved");
        self.cross_reference.as_ref()
    }

    fn resolve_output(&mut self, position: EditorPosition) -> Option<CrossReference> {
        let output = self.outputs.active_filename()?.to_string();
        let index = self.index(&output)?;
        let ctx = HoverContext {
            matcher: &self.matcher,
            colors: &self.colors,
            originals: &self.originals,
        };
        resolve_output_hover(ctx, &output, &index, position).into_option()
    }

    fn resolve_original(&mut self, position: EditorPosition) -> Option<CrossReference> {
        let names = self.outputs.filenames().to_vec();
        let mut outputs = Vec::with_capacity(names.len());
        for name in names {
            if let Some(index) = self.index(&name) {
                outputs.push((name, index));
            }
        }
        let ctx = HoverContext {
            matcher: &self.matcher,
            colors: &self.colors,
            originals: &self.originals,
        };
        resolve_original_hover(
            ctx,
            outputs.iter().map(|(name, index)| (name.as_str(), &**index)),
            position,
        )
        .into_option()
    }

    pub fn cross_reference(&self) -> Option<&CrossReference> {
        self.cross_reference.as_ref()
    }

    /// Tear down everything derived from the current bundle.
    pub fn reset(&mut self) {
        self.bundle.clear();
        self.indices.clear();
        self.colors = SegmentColorTable::new();
        self.cross_reference = None;
        self.scheduler.cancel();
        self.generation += 1;
        tracing::debug!(generation = self.generation, "Session reset");
    }
}

impl Default for LensSession {
    fn default() -> Self {
        Self::new(LensConfig::default())
    }
}
