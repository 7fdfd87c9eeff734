//! Segment boundary markers
//!
//! Segment layers never depend on a concrete marker type. They build markers
//! through a [`MarkerFactory`] and drive them through the [`SegmentMarker`]
//! capability set, so a host can replace the default [`DefaultMarker`] with
//! its own implementation.
//!
//! ## Usage
//!
//! ```ignore
//! let factory: MarkerFactory = Rc::new(|options: CreateMarkerOptions| {
//!     Box::new(MyMarker::new(options)) as Box<dyn SegmentMarker>
//! });
//! let editor = SegmentsEditor::new(config).with_marker_factory(factory);
//! ```

mod handle;

pub use handle::{DefaultMarker, HANDLE_HEIGHT, HANDLE_WIDTH, LABEL_OFFSET};

use crate::error::MarkerError;
use crate::layer::{MarkerLayer, ViewKind};
use crate::scene::Group;
use std::rc::Rc;
use wavemark_core::config::MarkerFont;
use wavemark_core::Segment;

/// Pointer interaction delivered to a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerEvent {
    HoverStart,
    HoverEnd,
    DragStart,
    DragEnd,
}

/// Everything a factory gets to build one boundary marker
#[derive(Clone)]
pub struct CreateMarkerOptions {
    pub segment: Segment,
    pub draggable: bool,
    /// Start boundary (`true`) or end boundary (`false`)
    pub start_marker: bool,
    pub color: String,
    pub layer: Rc<dyn MarkerLayer>,
    pub view: ViewKind,
    pub font: MarkerFont,
}

impl std::fmt::Debug for CreateMarkerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateMarkerOptions")
            .field("segment", &self.segment.id)
            .field("draggable", &self.draggable)
            .field("start_marker", &self.start_marker)
            .field("color", &self.color)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

/// Capability set every boundary marker provides
pub trait SegmentMarker {
    /// Create the marker's shapes inside `group`. Called once.
    fn attach(&mut self, group: &mut Group) -> Result<(), MarkerError>;

    /// Re-fit the shapes to the layer's current height
    fn on_resize(&mut self, group: &mut Group) -> Result<(), MarkerError>;

    /// The boundary moved to `time`
    fn on_time_changed(&mut self, group: &mut Group, time: f64) -> Result<(), MarkerError>;

    /// Hover and drag transitions. Markers without interactive behavior can
    /// keep the default.
    fn on_interaction(
        &mut self,
        _group: &mut Group,
        _event: MarkerEvent,
    ) -> Result<(), MarkerError> {
        Ok(())
    }
}

/// Builds one marker per segment boundary
pub type MarkerFactory = Rc<dyn Fn(CreateMarkerOptions) -> Box<dyn SegmentMarker>>;

/// Factory producing [`DefaultMarker`] handles
pub fn default_marker_factory() -> MarkerFactory {
    Rc::new(|options: CreateMarkerOptions| -> Box<dyn SegmentMarker> {
        Box::new(DefaultMarker::new(options))
    })
}
