//! Visualization settings
//!
//! Every field has a default; hosts only send the settings they want to
//! change, as a JSON object.

use serde::{Deserialize, Serialize};

use crate::error::{LensError, Result};

/// Where the "look over there" box goes when a file's tab cannot be boxed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// Offset from the pane's left edge
    pub inset_x: f64,
    /// Offset from the pane's top edge (below the pane header)
    pub inset_y: f64,
    /// Widest the placeholder gets; narrow panes shrink it
    pub max_width: f64,
    pub height: f64,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            inset_x: 20.0,
            inset_y: 35.0,
            max_width: 200.0,
            height: 24.0,
        }
    }
}

/// Configuration for a visualization session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    /// Width of the last segment on a line when it has no symbolic name.
    pub fallback_segment_width: u32,

    /// Tool-specific virtual roots stripped from source ids before matching
    /// them against open files (e.g. `webpack:///`).
    pub virtual_root_prefixes: Vec<String>,

    /// Share of the line height covered by a highlight box.
    pub box_height_ratio: f64,

    /// Minimum width of a highlight box in pixels.
    pub min_box_width: f64,

    /// Cap on the horizontal control-point offset of the connector curve.
    pub max_control_offset: f64,

    /// Length of each arrowhead stroke in pixels.
    pub arrow_size: f64,

    /// Angle between each arrowhead stroke and the curve's end tangent.
    pub arrow_angle_degrees: f64,

    /// Line height used when the editor reports neither line height nor font size.
    pub default_line_height: f64,

    pub placeholder: PlaceholderConfig,

    /// Delay after mount before canvas measurements are trusted.
    pub resize_settle_ms: u64,

    /// Quiet period after content edits before decorations are recomputed.
    pub edit_debounce_ms: u64,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            fallback_segment_width: maplens_source_map::DEFAULT_FALLBACK_WIDTH,
            virtual_root_prefixes: vec!["webpack:///".to_string()],
            box_height_ratio: 0.85,
            min_box_width: 4.0,
            max_control_offset: 100.0,
            arrow_size: 8.0,
            arrow_angle_degrees: 30.0,
            default_line_height: 20.0,
            placeholder: PlaceholderConfig::default(),
            resize_settle_ms: 100,
            edit_debounce_ms: 300,
        }
    }
}

impl LensConfig {
    /// Parse a (possibly partial) configuration object.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(LensError::Config)
    }
}
