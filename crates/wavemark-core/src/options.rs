//! Segment appearance options and their resolution
//!
//! Appearance is configured at three levels, each a sparse [`SegmentOptions`]
//! override set or per-segment attribute:
//!
//! 1. the segment itself (`color`, `border_color`)
//! 2. the view currently rendering the segment
//! 3. the global options supplied at initialization
//!
//! Every attribute is looked up independently through the levels and falls
//! back to a built-in default, so resolution never fails.

use crate::segment::Segment;
use serde::{Deserialize, Serialize};

/// Waveform fill between marker handles when nothing overrides it
pub const DEFAULT_WAVEFORM_COLOR: &str = "#0074d9";

/// Start and end marker handle color
pub const DEFAULT_MARKER_COLOR: &str = "#aaaaaa";

/// Overlay fill and border color
pub const DEFAULT_OVERLAY_COLOR: &str = "#ff0000";

/// Overlay inset from the top and bottom of the view in pixels
pub const DEFAULT_OVERLAY_OFFSET: f32 = 25.0;

/// Overlay border width (not configurable)
pub const OVERLAY_STROKE_WIDTH: f32 = 2.0;

/// Overlay opacity (not configurable)
pub const OVERLAY_OPACITY: f32 = 0.3;

/// Overlay corner radius (not configurable)
pub const OVERLAY_CORNER_RADIUS: f32 = 5.0;

/// How a segment is drawn in a view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentStyle {
    /// Two boundary handles and a colored waveform region
    #[default]
    Markers,
    /// A single translucent rounded rectangle spanning the segment
    Overlay,
}

/// Sparse set of appearance overrides
///
/// Used for both the global and the per-view level. Unset fields defer to the
/// next level down.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<SegmentStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waveform_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_marker_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_marker_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_offset: Option<f32>,
}

impl SegmentOptions {
    pub fn with_style(mut self, style: SegmentStyle) -> Self {
        self.style = Some(style);
        self
    }
}

/// Fully resolved appearance of one segment in one view
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentAppearance {
    pub style: SegmentStyle,
    pub waveform_color: String,
    pub start_marker_color: String,
    pub end_marker_color: String,
    pub overlay_color: String,
    pub overlay_border_color: String,
    pub overlay_offset: f32,
    /// Segment is editable and the view permits editing
    pub draggable: bool,
}

impl SegmentAppearance {
    /// Whether boundary handles should exist for this segment in this view
    pub fn has_marker_handles(&self) -> bool {
        self.style == SegmentStyle::Markers && self.draggable
    }

    /// Handle color for the start or end boundary
    pub fn marker_color(&self, start_marker: bool) -> &str {
        if start_marker {
            &self.start_marker_color
        } else {
            &self.end_marker_color
        }
    }
}

/// Resolve the appearance of `segment` as rendered by a view
///
/// `view_allows_editing` is false for views (such as an overview) that force
/// every segment to be non-editable regardless of its own flag.
pub fn resolve(
    segment: &Segment,
    global: &SegmentOptions,
    view: &SegmentOptions,
    view_allows_editing: bool,
) -> SegmentAppearance {
    let style = view.style.or(global.style).unwrap_or_default();

    let mut waveform_color = layered(
        view.waveform_color.as_deref(),
        global.waveform_color.as_deref(),
        DEFAULT_WAVEFORM_COLOR,
    );
    let mut overlay_color = layered(
        view.overlay_color.as_deref(),
        global.overlay_color.as_deref(),
        DEFAULT_OVERLAY_COLOR,
    );
    let mut overlay_border_color = layered(
        view.overlay_border_color.as_deref(),
        global.overlay_border_color.as_deref(),
        DEFAULT_OVERLAY_COLOR,
    );

    // The segment's own color fills whichever shape the style draws
    if let Some(segment_color) = &segment.color {
        match style {
            SegmentStyle::Markers => waveform_color = segment_color.clone(),
            SegmentStyle::Overlay => overlay_color = segment_color.clone(),
        }
    }
    if let Some(border_color) = &segment.border_color {
        overlay_border_color = border_color.clone();
    }

    SegmentAppearance {
        style,
        waveform_color,
        start_marker_color: layered(
            view.start_marker_color.as_deref(),
            global.start_marker_color.as_deref(),
            DEFAULT_MARKER_COLOR,
        ),
        end_marker_color: layered(
            view.end_marker_color.as_deref(),
            global.end_marker_color.as_deref(),
            DEFAULT_MARKER_COLOR,
        ),
        overlay_color,
        overlay_border_color,
        overlay_offset: view
            .overlay_offset
            .or(global.overlay_offset)
            .unwrap_or(DEFAULT_OVERLAY_OFFSET),
        draggable: segment.editable && view_allows_editing,
    }
}

/// First value set on the view, then the global options, then the default
fn layered(view: Option<&str>, global: Option<&str>, default: &str) -> String {
    view.or(global).unwrap_or(default).to_string()
}
