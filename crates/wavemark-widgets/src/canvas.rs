//! Canvas Program for a segments layer
//!
//! Translates raw pointer events into [`SegmentsMessage`]s through the
//! host's callback closure. The canvas never mutates the layer; the host
//! feeds each message back into the editor.

use crate::cursor;
use crate::layer::ViewKind;
use crate::message::{MarkerHit, SegmentsMessage};
use crate::segments_layer::SegmentsLayer;
use iced::widget::canvas::{self, Event, Frame, Geometry, Program};
use iced::{mouse, touch, Point, Rectangle, Theme};

/// Canvas state tracking the marker under the pointer
#[derive(Debug, Clone, Default)]
pub struct SegmentsInteraction {
    /// Marker currently hovered or touched
    pub hovered: Option<MarkerHit>,
    /// Marker being dragged with the left button held
    pub dragging: Option<MarkerHit>,
}

/// Canvas program drawing one view's segments
///
/// Takes a callback closure `on_event` that wraps each marker interaction
/// into the host's message type.
pub struct SegmentsCanvas<'a, Message, F>
where
    F: Fn(SegmentsMessage) -> Message,
{
    pub layer: &'a SegmentsLayer,
    pub on_event: F,
}

impl<'a, Message, F> SegmentsCanvas<'a, Message, F>
where
    F: Fn(SegmentsMessage) -> Message,
{
    fn view(&self) -> ViewKind {
        self.layer.view()
    }

    fn publish(&self, message: SegmentsMessage) -> Option<canvas::Action<Message>> {
        Some(canvas::Action::publish((self.on_event)(message)))
    }

    /// Emit at most one hover transition toward `hit`
    ///
    /// Leaving a marker and entering another takes two events: the end is
    /// published first and the next pointer event publishes the start.
    fn hover_to(
        &self,
        interaction: &mut SegmentsInteraction,
        hit: Option<MarkerHit>,
    ) -> Option<canvas::Action<Message>> {
        if interaction.hovered == hit {
            return None;
        }

        if let Some(previous) = interaction.hovered.take() {
            return self.publish(SegmentsMessage::HoverEnd {
                view: self.view(),
                hit: previous,
            });
        }

        let hit = hit?;
        interaction.hovered = Some(hit.clone());
        self.publish(SegmentsMessage::HoverStart {
            view: self.view(),
            hit,
        })
    }
}

impl<'a, Message, F> Program<Message> for SegmentsCanvas<'a, Message, F>
where
    Message: Clone,
    F: Fn(SegmentsMessage) -> Message,
{
    type State = SegmentsInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        if let Some(hit) = interaction.dragging.clone() {
            match event {
                Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                    let position = cursor.position_from(bounds.position())?;
                    return self.publish(SegmentsMessage::DragMove {
                        view: self.view(),
                        hit,
                        x: position.x,
                    });
                }
                Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                    interaction.dragging = None;
                    return self.publish(SegmentsMessage::DragEnd {
                        view: self.view(),
                        hit,
                    });
                }
                _ => return None,
            }
        }

        match event {
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let hit = cursor
                    .position_in(bounds)
                    .and_then(|position| self.layer.hit_test(position));
                self.hover_to(interaction, hit)
            }
            Event::Mouse(mouse::Event::CursorLeft) => self.hover_to(interaction, None),
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                cursor.position_in(bounds)?;
                let hit = interaction.hovered.clone()?;
                interaction.dragging = Some(hit.clone());
                self.publish(SegmentsMessage::DragStart {
                    view: self.view(),
                    hit,
                })
            }
            Event::Touch(touch::Event::FingerPressed { position, .. }) => {
                let local = Point::new(position.x - bounds.x, position.y - bounds.y);
                if !bounds.contains(*position) {
                    return None;
                }
                let hit = self.layer.hit_test(local);
                self.hover_to(interaction, hit)
            }
            Event::Touch(touch::Event::FingerLifted { .. } | touch::Event::FingerLost { .. }) => {
                self.hover_to(interaction, None)
            }
            _ => None,
        }
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if interaction.dragging.is_some() || cursor.is_over(bounds) {
            cursor::current()
        } else {
            mouse::Interaction::default()
        }
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        self.layer.draw(&mut frame);
        vec![frame.into_geometry()]
    }
}
