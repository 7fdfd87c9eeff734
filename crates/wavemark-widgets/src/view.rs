//! Segments view function
//!
//! ## Usage
//!
//! ```ignore
//! fn view(&self) -> Element<Message> {
//!     column![
//!         segments_view(self.editor.view(ViewKind::Zoomview), Message::Segments),
//!         segments_view(self.editor.view(ViewKind::Overview), Message::Segments),
//!     ]
//!     .into()
//! }
//!
//! fn update(&mut self, message: Message) {
//!     if let Message::Segments(msg) = message {
//!         if let Err(e) = self.editor.handle_message(msg) {
//!             log::warn!("Segment interaction failed: {}", e);
//!         }
//!     }
//! }
//! ```

use crate::canvas::SegmentsCanvas;
use crate::message::SegmentsMessage;
use crate::segments_layer::SegmentsLayer;
use iced::widget::Canvas;
use iced::{Element, Length};

/// Create a segments canvas element for one view
///
/// The canvas is as tall as the layer; call
/// [`SegmentsEditor::resize_view`](crate::SegmentsEditor::resize_view) to
/// change it.
pub fn segments_view<'a, Message, F>(layer: &'a SegmentsLayer, on_event: F) -> Element<'a, Message>
where
    Message: Clone + 'a,
    F: Fn(SegmentsMessage) -> Message + 'a,
{
    Canvas::new(SegmentsCanvas { layer, on_event })
        .width(Length::Fill)
        .height(Length::Fixed(layer.height()))
        .into()
}
