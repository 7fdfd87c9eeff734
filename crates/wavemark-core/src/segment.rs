//! Segments and the collection that owns them
//!
//! A segment is a labelled time interval with independently editable start
//! and end boundaries. Views never own segments: they receive clones when the
//! collection changes and rebuild their shapes from them.

use crate::error::SegmentError;
use serde::{Deserialize, Serialize};

/// A labelled time interval on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Unique identifier within the collection
    pub id: String,
    /// Start time in seconds
    pub start_time: f64,
    /// End time in seconds (always greater than `start_time`)
    pub end_time: f64,
    /// Whether the boundaries may be dragged
    pub editable: bool,
    /// Optional label shown by hosts that annotate segments
    #[serde(default)]
    pub label_text: String,
    /// Per-segment fill color override (waveform or overlay fill)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Per-segment overlay border color override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

impl Segment {
    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Time of the start or end boundary
    pub fn boundary_time(&self, start_marker: bool) -> f64 {
        if start_marker {
            self.start_time
        } else {
            self.end_time
        }
    }

    /// Whether the segment overlaps the half-open range `[start, end)`
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        self.start_time < end && self.end_time > start
    }

    fn validate(&self) -> Result<(), SegmentError> {
        for (field, value) in [("start_time", self.start_time), ("end_time", self.end_time)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SegmentError::InvalidTime {
                    id: self.id.clone(),
                    field,
                    value,
                });
            }
        }

        if self.start_time >= self.end_time {
            return Err(SegmentError::StartAfterEnd {
                id: self.id.clone(),
                start_time: self.start_time,
                end_time: self.end_time,
            });
        }

        Ok(())
    }
}

/// Parameters for adding a segment
///
/// `id` is generated when omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentSpec {
    pub id: Option<String>,
    pub start_time: f64,
    pub end_time: f64,
    pub editable: bool,
    pub label_text: String,
    pub color: Option<String>,
    pub border_color: Option<String>,
}

impl SegmentSpec {
    /// Spec for a segment spanning `start_time..end_time`
    pub fn new(start_time: f64, end_time: f64) -> Self {
        Self {
            start_time,
            end_time,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label_text = label.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_border_color(mut self, color: impl Into<String>) -> Self {
        self.border_color = Some(color.into());
        self
    }
}

/// Partial update of an existing segment
///
/// `None` leaves the attribute unchanged. Color fields use a nested option so
/// an override can be cleared with `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentUpdate {
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub editable: Option<bool>,
    pub label_text: Option<String>,
    pub color: Option<Option<String>>,
    pub border_color: Option<Option<String>>,
}

impl SegmentUpdate {
    /// Update that only moves the boundaries
    pub fn times(start_time: f64, end_time: f64) -> Self {
        Self {
            start_time: Some(start_time),
            end_time: Some(end_time),
            ..Self::default()
        }
    }
}

/// Ordered collection of segments keyed by id
#[derive(Debug, Clone, Default)]
pub struct SegmentCollection {
    segments: Vec<Segment>,
    next_id: u64,
}

impl SegmentCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment, validating its times and id
    pub fn add(&mut self, spec: SegmentSpec) -> Result<Segment, SegmentError> {
        let id = match spec.id {
            Some(id) => id,
            None => self.generate_id(),
        };

        if self.get(&id).is_some() {
            return Err(SegmentError::DuplicateId(id));
        }

        let segment = Segment {
            id,
            start_time: spec.start_time,
            end_time: spec.end_time,
            editable: spec.editable,
            label_text: spec.label_text,
            color: spec.color,
            border_color: spec.border_color,
        };
        segment.validate()?;

        log::debug!(
            "SegmentCollection::add: '{}' {:.3}..{:.3} (editable: {})",
            segment.id,
            segment.start_time,
            segment.end_time,
            segment.editable
        );

        let index = self
            .segments
            .partition_point(|s| s.start_time <= segment.start_time);
        self.segments.insert(index, segment.clone());
        Ok(segment)
    }

    /// The segment an update would produce, without applying it
    pub fn preview_update(
        &self,
        id: &str,
        update: &SegmentUpdate,
    ) -> Result<Segment, SegmentError> {
        let mut segment = self
            .get(id)
            .cloned()
            .ok_or_else(|| SegmentError::NotFound(id.to_string()))?;

        if let Some(start_time) = update.start_time {
            segment.start_time = start_time;
        }
        if let Some(end_time) = update.end_time {
            segment.end_time = end_time;
        }
        if let Some(editable) = update.editable {
            segment.editable = editable;
        }
        if let Some(label_text) = &update.label_text {
            segment.label_text = label_text.clone();
        }
        if let Some(color) = &update.color {
            segment.color = color.clone();
        }
        if let Some(border_color) = &update.border_color {
            segment.border_color = border_color.clone();
        }
        segment.validate()?;
        Ok(segment)
    }

    /// Apply a partial update and return the updated segment
    ///
    /// The collection is left untouched when the result would be invalid.
    pub fn update(&mut self, id: &str, update: SegmentUpdate) -> Result<Segment, SegmentError> {
        let segment = self.preview_update(id, &update)?;

        if let Some(index) = self.position(id) {
            self.segments.remove(index);
        }
        let index = self
            .segments
            .partition_point(|s| s.start_time <= segment.start_time);
        self.segments.insert(index, segment.clone());

        log::debug!("SegmentCollection::update: '{}'", id);
        Ok(segment)
    }

    /// Remove a segment by id
    pub fn remove_by_id(&mut self, id: &str) -> Option<Segment> {
        let index = self.position(id)?;
        log::debug!("SegmentCollection::remove_by_id: '{}'", id);
        Some(self.segments.remove(index))
    }

    /// Remove every segment, returning them in start-time order
    pub fn remove_all(&mut self) -> Vec<Segment> {
        log::debug!("SegmentCollection::remove_all: {} segments", self.segments.len());
        std::mem::take(&mut self.segments)
    }

    pub fn get(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// All segments ordered by start time
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segments overlapping `[start, end)`
    pub fn find(&self, start: f64, end: f64) -> Vec<&Segment> {
        self.segments
            .iter()
            .filter(|s| s.overlaps(start, end))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.segments.iter().position(|s| s.id == id)
    }

    fn generate_id(&mut self) -> String {
        loop {
            let id = format!("segment.{}", self.next_id);
            self.next_id += 1;
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
