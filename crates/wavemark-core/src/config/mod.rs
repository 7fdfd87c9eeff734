//! Segment display configuration
//!
//! Global and per-view segment options, marker label font settings, and the
//! generic YAML loading/saving used to persist them.
//!
//! # Usage
//!
//! ```ignore
//! use wavemark_core::config::{
//!     default_config_path, load_segments_config, save_config, SEGMENTS_CONFIG_FILENAME,
//! };
//!
//! let path = default_config_path(SEGMENTS_CONFIG_FILENAME);
//! let config = load_segments_config(&path);
//! save_config(&config, &path)?;
//! ```

mod io;
mod paths;

pub use io::{load_config, load_segments_config, save_config};
pub use paths::{default_config_dir, default_config_path};

use crate::options::SegmentOptions;
use serde::{Deserialize, Serialize};

/// Default config filename within the config directory
pub const SEGMENTS_CONFIG_FILENAME: &str = "segments.yaml";

/// Font style for marker time labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
}

/// Font used for marker time labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerFont {
    /// CSS-style family name ("sans-serif", "serif", "monospace" or a font name)
    pub family: String,
    /// Size in pixels
    pub size: f32,
    pub style: FontStyle,
}

impl Default for MarkerFont {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 11.0,
            style: FontStyle::Normal,
        }
    }
}

/// Configuration of one rendering surface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Overrides applied to every segment this view renders
    pub segment_options: SegmentOptions,
    /// Whether the view lets segments be edited.
    /// `None` uses the view's built-in default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editable_segments: Option<bool>,
}

impl ViewConfig {
    /// Whether segments may be edited, given the view's built-in default
    pub fn allows_editing(&self, default: bool) -> bool {
        self.editable_segments.unwrap_or(default)
    }
}

/// Top-level segment display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentsConfig {
    /// Global overrides shared by every view
    pub segment_options: SegmentOptions,
    /// Detail view (segments editable by default)
    pub zoomview: ViewConfig,
    /// Full-track view (segments non-editable by default)
    pub overview: ViewConfig,
    /// Marker label font
    pub font: MarkerFont,
    /// Decimal places shown in marker time labels
    pub time_label_precision: u32,
}

impl Default for SegmentsConfig {
    fn default() -> Self {
        Self {
            segment_options: SegmentOptions::default(),
            zoomview: ViewConfig::default(),
            overview: ViewConfig::default(),
            font: MarkerFont::default(),
            time_label_precision: 2,
        }
    }
}

/// Highest label precision worth showing (milliseconds)
pub const MAX_TIME_LABEL_PRECISION: u32 = 3;

impl SegmentsConfig {
    /// Replace values that parse but can't be rendered
    ///
    /// Negative or non-finite overlay offsets are dropped so the next layer
    /// down applies. Returns whether anything changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;

        for (scope, options) in [
            ("global", &mut self.segment_options),
            ("zoomview", &mut self.zoomview.segment_options),
            ("overview", &mut self.overview.segment_options),
        ] {
            if let Some(offset) = options.overlay_offset {
                if !offset.is_finite() || offset < 0.0 {
                    log::warn!("SegmentsConfig: Ignoring {} overlay_offset {}", scope, offset);
                    options.overlay_offset = None;
                    changed = true;
                }
            }
        }

        if !self.font.size.is_finite() || self.font.size <= 0.0 {
            log::warn!("SegmentsConfig: Invalid font size {}, using default", self.font.size);
            self.font.size = MarkerFont::default().size;
            changed = true;
        }

        if self.time_label_precision > MAX_TIME_LABEL_PRECISION {
            log::warn!(
                "SegmentsConfig: Clamping time_label_precision {} to {}",
                self.time_label_precision,
                MAX_TIME_LABEL_PRECISION
            );
            self.time_label_precision = MAX_TIME_LABEL_PRECISION;
            changed = true;
        }

        changed
    }
}
