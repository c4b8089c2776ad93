//! Bidirectional source map hover and visualization.
//!
//! This crate provides the editor-facing half of maplens without depending on
//! any particular editor widget or drawing API. Hosts implement the
//! capability traits in [`surface`] and forward pointer, lifecycle and timer
//! events; the crate answers with cross-references, decoration sets and
//! overlay drawing calls.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      maplens-source-map                         │
//! │        (payload decoding, MappingIndex, segment extents)        │
//! └─────────────────────────────────────────────────────────────────┘
//!                                 │
//!                                 ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         maplens-core                            │
//! │  colors ─► decorations          hover ─► overlay (geometry)     │
//! │            session (caches, panes)  ◄─  visualizer (events)     │
//! └─────────────────────────────────────────────────────────────────┘
//!                                 │
//!                                 ▼
//!            host editors / overlay canvas (surface traits)
//! ```
//!
//! Every stage but the last is a pure function of its inputs: index, color
//! table, hover resolution, overlay scene. Only [`Visualizer`] touches the
//! host, through [`EditorSurface`], [`PaneChrome`] and [`OverlayCanvas`].
//!
//! # Usage
//!
//! ```rust
//! use maplens_core::{EditorPosition, LensSession, Pane, PointerEvent};
//!
//! let mut session = LensSession::default();
//! session.set_bundle([(
//!     "out.js",
//!     r#"{"version":3,"sources":["src/a.ts"],"names":[],"mappings":"AAAA,UAAU"}"#,
//! )]);
//! session.set_files(Pane::Original, ["src/a.ts"]);
//! session.set_files(Pane::Output, ["out.js"]);
//! session.set_enabled(true);
//! let plan = session.recolor().unwrap();
//! assert_eq!(plan.output.len(), 2);
//!
//! let xref = session
//!     .handle_pointer(PointerEvent::Moved {
//!         pane: Pane::Output,
//!         position: EditorPosition::new(1, 12),
//!     })
//!     .unwrap();
//! assert_eq!(xref.original.column, 10);
//! assert!(xref.original_visible);
//! ```

pub mod colors;
pub mod config;
pub mod decorations;
pub mod error;
pub mod geometry;
pub mod hover;
pub mod overlay;
pub mod palette;
pub mod panes;
pub mod paths;
pub mod schedule;
pub mod session;
pub mod surface;
pub mod visualizer;

// Re-export main types for convenience
pub use colors::SegmentColorTable;
pub use config::{LensConfig, PlaceholderConfig};
pub use decorations::{AppliedDecorations, DecorationPlan};
pub use error::{LensError, Result};
pub use geometry::{Connector, Point, Rect, Size};
pub use hover::{
    CrossReference, GeneratedEndpoint, HoverContext, HoverDirection, OriginalEndpoint, Resolution,
    resolve_original_hover, resolve_output_hover,
};
pub use overlay::{OverlayInputs, OverlayScene};
pub use palette::{PALETTE, PALETTE_SIZE, SegmentColor};
pub use panes::{EditorPosition, Pane, PaneFiles};
pub use paths::SourceMatcher;
pub use schedule::{CanvasSizeTracker, DecorationScheduler};
pub use session::{LensSession, PointerEvent};
pub use surface::{
    Decoration, DecorationId, EditorSurface, OverlayCanvas, PaneChrome, TextRange, WordSpan,
};
pub use visualizer::{TickOutcome, Visualizer};

pub use maplens_source_map::{DecodeError, MappingIndex};
