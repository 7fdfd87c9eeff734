//! Default draggable boundary handle with a time label
//!
//! The handle is a small rectangle centered on the boundary. The label shows
//! the boundary time while the handle is hovered or dragged; a start marker's
//! label sits to the left of the boundary so it doesn't cover the segment.

use super::{CreateMarkerOptions, MarkerEvent, SegmentMarker};
use crate::cursor::{self, CursorOwner};
use crate::error::MarkerError;
use crate::scene::{Group, RectShape, Shape, ShapeId, TextShape};
use crate::theme::parse_color;
use iced::mouse;

/// Handle width in pixels
pub const HANDLE_WIDTH: f32 = 10.0;

/// Handle height in pixels
pub const HANDLE_HEIGHT: f32 = 20.0;

/// Horizontal distance between the boundary and the label
pub const LABEL_OFFSET: f32 = 24.0;

#[derive(Debug, Clone, Copy)]
struct Attached {
    label: ShapeId,
    handle: ShapeId,
}

/// Default [`SegmentMarker`] implementation
#[derive(Debug)]
pub struct DefaultMarker {
    options: CreateMarkerOptions,
    attached: Option<Attached>,
    cursor_owner: CursorOwner,
}

impl DefaultMarker {
    pub fn new(options: CreateMarkerOptions) -> Self {
        Self {
            options,
            attached: None,
            cursor_owner: CursorOwner::next(),
        }
    }

    pub fn options(&self) -> &CreateMarkerOptions {
        &self.options
    }

    /// Label shape id, once attached
    pub fn label(&self) -> Option<ShapeId> {
        self.attached.map(|a| a.label)
    }

    /// Handle shape id, once attached
    pub fn handle(&self) -> Option<ShapeId> {
        self.attached.map(|a| a.handle)
    }

    fn attached(&self) -> Result<Attached, MarkerError> {
        self.attached.ok_or(MarkerError::NotAttached)
    }

    fn label_x(&self) -> f32 {
        if self.options.start_marker {
            -LABEL_OFFSET
        } else {
            LABEL_OFFSET
        }
    }

    fn fit_to_view(&self, group: &mut Group, attached: Attached) -> Result<(), MarkerError> {
        let height = self.options.layer.height();

        group.text_mut(attached.label).ok_or(MarkerError::ShapeMissing)?.y = height / 2.0 - 5.0;
        group.rect_mut(attached.handle).ok_or(MarkerError::ShapeMissing)?.y = height / 2.0 - 10.5;
        Ok(())
    }

    /// Single show/hide transition shared by hover and drag
    fn set_label_visible(&self, group: &mut Group, visible: bool) -> Result<(), MarkerError> {
        let attached = self.attached()?;
        let label_x = self.label_x();
        let label = group.text_mut(attached.label).ok_or(MarkerError::ShapeMissing)?;

        if visible && self.options.start_marker {
            label.x = label_x - label.width();
        }
        label.visible = visible;
        Ok(())
    }
}

impl SegmentMarker for DefaultMarker {
    fn attach(&mut self, group: &mut Group) -> Result<(), MarkerError> {
        if self.attached.is_some() {
            return Err(MarkerError::AlreadyAttached);
        }

        let time = self.options.segment.boundary_time(self.options.start_marker);

        // Real y positions are set by fit_to_view
        let mut label = TextShape::new(
            self.label_x(),
            0.0,
            self.options.layer.format_time(time),
            self.options.font.clone(),
        );
        label.visible = false;

        let handle = RectShape::new(-(HANDLE_WIDTH / 2.0) + 0.5, 0.0, HANDLE_WIDTH, HANDLE_HEIGHT)
            .with_fill(parse_color(&self.options.color));

        let attached = Attached {
            label: group.add(Shape::Text(label)),
            handle: group.add(Shape::Rect(handle)),
        };
        group.draggable = self.options.draggable;

        self.fit_to_view(group, attached)?;
        self.attached = Some(attached);
        Ok(())
    }

    fn on_resize(&mut self, group: &mut Group) -> Result<(), MarkerError> {
        let attached = self.attached()?;
        self.fit_to_view(group, attached)
    }

    fn on_time_changed(&mut self, group: &mut Group, time: f64) -> Result<(), MarkerError> {
        let attached = self.attached()?;
        let text = self.options.layer.format_time(time);
        group.text_mut(attached.label).ok_or(MarkerError::ShapeMissing)?.text = text;
        Ok(())
    }

    fn on_interaction(&mut self, group: &mut Group, event: MarkerEvent) -> Result<(), MarkerError> {
        match event {
            MarkerEvent::HoverStart => {
                self.set_label_visible(group, true)?;
                cursor::acquire(self.cursor_owner, mouse::Interaction::ResizingHorizontally);
            }
            MarkerEvent::HoverEnd => {
                self.set_label_visible(group, false)?;
                cursor::release(self.cursor_owner);
            }
            MarkerEvent::DragStart if self.options.draggable => {
                self.set_label_visible(group, true)?;
            }
            MarkerEvent::DragEnd if self.options.draggable => {
                self.set_label_visible(group, false)?;
            }
            MarkerEvent::DragStart | MarkerEvent::DragEnd => {
                self.attached()?;
            }
        }
        Ok(())
    }
}

impl Drop for DefaultMarker {
    fn drop(&mut self) {
        // Removed mid-hover: don't leave the resize cursor behind
        if cursor::release(self.cursor_owner) {
            log::debug!(
                "DefaultMarker: Released cursor for segment '{}' on drop",
                self.options.segment.id
            );
        }
    }
}
