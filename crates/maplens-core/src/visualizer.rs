//! Event entry points for a host with two mounted editors and an overlay.
//!
//! [`Visualizer`] wires a [`LensSession`] to the editor handles: it applies
//! decoration passes when their triggers fire (enable, active-file switch,
//! new bundle, debounced edits) and draws the overlay on demand.

use std::time::{Duration, Instant};

use crate::config::LensConfig;
use crate::decorations::AppliedDecorations;
use crate::geometry::Size;
use crate::hover::CrossReference;
use crate::overlay::{OverlayInputs, OverlayScene};
use crate::panes::Pane;
use crate::schedule::CanvasSizeTracker;
use crate::session::{LensSession, PointerEvent};
use crate::surface::{EditorSurface, OverlayCanvas, PaneChrome};

/// What a [`Visualizer::tick`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub redecorated: bool,
    /// The canvas size changed; redraw the overlay
    pub redraw: bool,
}

pub struct Visualizer<E> {
    session: LensSession,
    original: Option<E>,
    output: Option<E>,
    applied: AppliedDecorations,
    canvas: CanvasSizeTracker,
}

impl<E: EditorSurface> Visualizer<E> {
    pub fn new(config: LensConfig) -> Self {
        let settle = Duration::from_millis(config.resize_settle_ms);
        Self {
            session: LensSession::new(config),
            original: None,
            output: None,
            applied: AppliedDecorations::default(),
            canvas: CanvasSizeTracker::new(settle),
        }
    }

    pub fn session(&self) -> &LensSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut LensSession {
        &mut self.session
    }

    pub fn editor(&self, pane: Pane) -> Option<&E> {
        match pane {
            Pane::Original => self.original.as_ref(),
            Pane::Output => self.output.as_ref(),
        }
    }

    fn slot(&mut self, pane: Pane) -> &mut Option<E> {
        match pane {
            Pane::Original => &mut self.original,
            Pane::Output => &mut self.output,
        }
    }

    // -- Lifecycle --

    /// Attach the editor for `pane` and decorate it.
    pub fn mount(&mut self, pane: Pane, editor: E) {
        self.applied.forget(pane);
        *self.slot(pane) = Some(editor);
        self.decorate();
    }

    /// Detach the editor for `pane`, handing it back to the host.
    pub fn dispose(&mut self, pane: Pane) -> Option<E> {
        self.applied.forget(pane);
        self.session.handle_pointer(PointerEvent::Left);
        self.slot(pane).take()
    }

    /// Tear down session state and strip every applied decoration from the
    /// mounted editors. The editors stay mounted.
    pub fn reset(&mut self) {
        self.session.reset();
        if let Some(editor) = self.original.as_mut() {
            self.applied.clear(Pane::Original, editor);
        }
        if let Some(editor) = self.output.as_mut() {
            self.applied.clear(Pane::Output, editor);
        }
    }

    pub fn mount_canvas(&mut self, now: Instant) {
        self.canvas.mount(now);
    }

    pub fn unmount_canvas(&mut self) {
        self.canvas.unmount();
    }

    // -- Decoration triggers --

    /// Run a full decoration pass and push it into the mounted editors.
    pub fn decorate(&mut self) {
        let plan = self.session.recolor();
        for pane in [Pane::Original, Pane::Output] {
            let editor = match pane {
                Pane::Original => self.original.as_mut(),
                Pane::Output => self.output.as_mut(),
            };
            let Some(editor) = editor else {
                continue;
            };
            match &plan {
                Some(plan) => self.applied.replace(pane, editor, plan.for_pane(pane)),
                None => self.applied.clear(pane, editor),
            }
        }
    }

    /// See [`LensSession::set_enabled`].
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let formatting_disabled = self.session.set_enabled(enabled);
        self.decorate();
        formatting_disabled
    }

    pub fn set_bundle<K, V>(&mut self, sourcemaps: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.session.set_bundle(sourcemaps);
        self.decorate();
    }

    pub fn set_files<S: Into<String>>(&mut self, pane: Pane, filenames: impl IntoIterator<Item = S>) {
        self.session.set_files(pane, filenames);
        self.decorate();
    }

    /// Switch the active tab of `pane`, redecorating if it changed.
    pub fn set_active(&mut self, pane: Pane, index: usize) -> bool {
        let changed = self.session.set_active(pane, index);
        if changed {
            self.decorate();
        }
        changed
    }

    pub fn note_edit(&mut self, now: Instant) {
        self.session.note_edit(now);
    }

    /// Drive timers: debounced re-decoration and deferred canvas measurements.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let redecorated = self.session.poll_redecorate(now);
        if redecorated {
            self.decorate();
        }
        TickOutcome {
            redecorated,
            redraw: self.canvas.poll(now),
        }
    }

    // -- Hover and overlay --

    pub fn pointer(&mut self, event: PointerEvent) -> Option<&CrossReference> {
        self.session.handle_pointer(event)
    }

    /// Resolve the caret of `pane` as if the pointer were there.
    pub fn follow_cursor(&mut self, pane: Pane) -> Option<&CrossReference> {
        let position = self.editor(pane).and_then(|editor| editor.cursor())?;
        self.session
            .handle_pointer(PointerEvent::Moved { pane, position })
    }

    /// Feed a canvas resize observation. Returns `true` if the overlay
    /// should be redrawn.
    pub fn on_canvas_resize(&mut self, now: Instant, size: Size) -> bool {
        self.canvas.observe(now, size)
    }

    /// Clear the canvas and draw the current cross-reference, if any.
    ///
    /// Returns `true` if anything was drawn.
    pub fn render_overlay<C, K>(&self, chrome: &C, canvas: &mut K) -> bool
    where
        C: PaneChrome + ?Sized,
        K: OverlayCanvas + ?Sized,
    {
        canvas.clear();
        if !self.session.is_enabled() {
            return false;
        }
        let (Some(original), Some(output)) = (&self.original, &self.output) else {
            return false;
        };
        let Some(xref) = self.session.cross_reference() else {
            return false;
        };
        let Some(canvas_rect) = canvas.bounding_rect().filter(|r| !r.size().is_empty()) else {
            return false;
        };

        let inputs = OverlayInputs {
            original,
            output,
            chrome,
            active_output: self.session.pane(Pane::Output).active_filename(),
            canvas_origin: canvas_rect.origin(),
        };
        match OverlayScene::compute(xref, &inputs, self.session.config()) {
            Some(scene) => {
                scene.draw(canvas);
                true
            }
            None => false,
        }
    }
}

impl<E: EditorSurface> Default for Visualizer<E> {
    fn default() -> Self {
        Self::new(LensConfig::default())
    }
}
