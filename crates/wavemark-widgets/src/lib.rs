//! Segment marker widgets for wavemark waveform views
//!
//! This crate draws segments on top of a waveform in two views, a zoomed
//! detail view and a full-track overview, and lets the user drag segment
//! boundaries with marker handles.
//!
//! ## Architecture (iced 0.14 patterns)
//!
//! - **Editor**: `SegmentsEditor` owns the segments and keeps every view in sync
//! - **Layers**: one `SegmentsLayer` per view resolves appearance and holds shapes
//! - **Markers**: pluggable through `MarkerFactory`; `DefaultMarker` is the stock handle
//! - **Canvas Programs**: translate pointer events into `SegmentsMessage`s
//! - **View functions**: take a layer + callback, return `Element<Message>`
//!
//! ## View Functions
//!
//! - `segments_view`: segments of one view with hoverable, draggable handles

pub mod canvas;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod layer;
pub mod marker;
pub mod message;
pub mod scene;
pub mod segment_shape;
pub mod segments_layer;
pub mod theme;
pub mod view;

pub use editor::{SegmentsEditor, MIN_SEGMENT_DURATION};
pub use error::{MarkerError, WidgetError};
pub use layer::{MarkerLayer, ViewKind, ViewLayer, OVERVIEW_HEIGHT, ZOOMVIEW_HEIGHT};
pub use message::{MarkerHit, SegmentsMessage};
pub use segments_layer::SegmentsLayer;
pub use view::segments_view;

// Marker extension point
pub use marker::{
    default_marker_factory, CreateMarkerOptions, DefaultMarker, MarkerEvent, MarkerFactory,
    SegmentMarker,
};

// Canvas interaction types for advanced usage
pub use canvas::{SegmentsCanvas, SegmentsInteraction};
