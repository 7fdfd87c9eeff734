//! Error types for segment collection operations

use thiserror::Error;

/// Errors raised when adding or updating segments
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SegmentError {
    /// A boundary time is negative, NaN or infinite
    #[error("Invalid {field} for segment '{id}': {value}")]
    InvalidTime {
        id: String,
        field: &'static str,
        value: f64,
    },

    /// Start time is not strictly before end time
    #[error("Segment '{id}' start time {start_time} must be less than end time {end_time}")]
    StartAfterEnd {
        id: String,
        start_time: f64,
        end_time: f64,
    },

    /// Another segment already uses this id
    #[error("Segment id '{0}' is already in use")]
    DuplicateId(String),

    /// No segment with this id
    #[error("Segment '{0}' not found")]
    NotFound(String),
}
