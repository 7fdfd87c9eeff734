//! Wavemark Core - segment model shared by wavemark views
//!
//! Everything here is independent of the rendering toolkit:
//!
//! - **Segments**: time-range records and the collection that owns them
//! - **Options**: per-attribute override sets and the appearance resolver
//! - **Time**: label formatting for marker times
//! - **Config**: YAML loading/saving of segment display settings

pub mod config;
pub mod error;
pub mod options;
pub mod segment;
pub mod time;

pub use error::SegmentError;
pub use options::{
    resolve, SegmentAppearance, SegmentOptions, SegmentStyle,
    DEFAULT_MARKER_COLOR, DEFAULT_OVERLAY_COLOR, DEFAULT_OVERLAY_OFFSET, DEFAULT_WAVEFORM_COLOR,
    OVERLAY_CORNER_RADIUS, OVERLAY_OPACITY, OVERLAY_STROKE_WIDTH,
};
pub use segment::{Segment, SegmentCollection, SegmentSpec, SegmentUpdate};
pub use time::format_time;
