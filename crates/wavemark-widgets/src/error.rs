//! Error types for marker and segment layer operations

use thiserror::Error;
use wavemark_core::SegmentError;

/// Misuse of a marker's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MarkerError {
    /// Marker was used before `attach`
    #[error("Marker used before being attached to a group")]
    NotAttached,

    /// `attach` was called a second time
    #[error("Marker is already attached to a group")]
    AlreadyAttached,

    /// The group passed in is not the one the marker attached to
    #[error("Marker shape is missing from its group")]
    ShapeMissing,
}

/// Errors raised by segment layers and the editor
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WidgetError {
    #[error("Segment error: {0}")]
    Segment(#[from] SegmentError),

    #[error("Marker error: {0}")]
    Marker(#[from] MarkerError),
}
