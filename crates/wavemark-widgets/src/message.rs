//! Messages emitted by segment canvases

use crate::layer::ViewKind;

/// A boundary marker under the pointer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarkerHit {
    pub segment_id: String,
    /// Start boundary (`true`) or end boundary (`false`)
    pub start_marker: bool,
}

/// Pointer interaction with a segment marker
///
/// Published by the segments canvas through the host's callback closure and
/// fed back into [`SegmentsEditor::handle_message`](crate::SegmentsEditor::handle_message).
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentsMessage {
    /// Pointer entered a marker handle (mouse over or touch start)
    HoverStart { view: ViewKind, hit: MarkerHit },

    /// Pointer left a marker handle (mouse out or touch end)
    HoverEnd { view: ViewKind, hit: MarkerHit },

    /// Button pressed on a marker handle
    DragStart { view: ViewKind, hit: MarkerHit },

    /// Dragged marker moved to view-relative `x`
    DragMove { view: ViewKind, hit: MarkerHit, x: f32 },

    /// Button released after a drag
    DragEnd { view: ViewKind, hit: MarkerHit },
}

impl SegmentsMessage {
    pub fn view(&self) -> ViewKind {
        match self {
            SegmentsMessage::HoverStart { view, .. }
            | SegmentsMessage::HoverEnd { view, .. }
            | SegmentsMessage::DragStart { view, .. }
            | SegmentsMessage::DragMove { view, .. }
            | SegmentsMessage::DragEnd { view, .. } => *view,
        }
    }
}
