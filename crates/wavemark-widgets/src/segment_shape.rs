//! One segment as drawn in one view
//!
//! Depending on the resolved style a shape holds either a colored waveform
//! region with optional boundary markers, or a single overlay rectangle.
//! Never both.

use crate::error::WidgetError;
use crate::layer::{MarkerLayer, ViewKind, ViewLayer};
use crate::marker::{CreateMarkerOptions, MarkerEvent, MarkerFactory, SegmentMarker};
use crate::scene::{Group, RectShape};
use crate::theme::parse_color;
use iced::widget::canvas::{Frame, Path, Stroke};
use iced::{Color, Point};
use std::rc::Rc;
use wavemark_core::config::MarkerFont;
use wavemark_core::{
    Segment, SegmentAppearance, SegmentStyle, OVERLAY_CORNER_RADIUS, OVERLAY_OPACITY,
    OVERLAY_STROKE_WIDTH,
};

/// Shared inputs for building shapes in one view
pub struct ShapeContext<'a> {
    pub view: ViewKind,
    pub layer: &'a Rc<ViewLayer>,
    pub factory: &'a MarkerFactory,
    pub font: &'a MarkerFont,
}

/// Waveform region between the boundaries of a markers-style segment
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformShape {
    /// Configured color string
    pub color: String,
    /// Parsed fill color
    pub fill: Color,
}

/// A boundary marker and the group holding its shapes
pub struct MarkerHandle {
    pub group: Group,
    marker: Box<dyn SegmentMarker>,
}

impl MarkerHandle {
    fn interact(&mut self, event: MarkerEvent) -> Result<(), WidgetError> {
        self.marker.on_interaction(&mut self.group, event)?;
        Ok(())
    }
}

/// A segment's shapes in one view
pub struct SegmentShape {
    segment: Segment,
    appearance: SegmentAppearance,
    waveform_shape: Option<WaveformShape>,
    overlay_rect: Option<RectShape>,
    start_marker: Option<MarkerHandle>,
    end_marker: Option<MarkerHandle>,
}

impl SegmentShape {
    pub fn new(
        segment: Segment,
        appearance: SegmentAppearance,
        ctx: &ShapeContext<'_>,
    ) -> Result<Self, WidgetError> {
        let mut shape = Self {
            segment,
            appearance,
            waveform_shape: None,
            overlay_rect: None,
            start_marker: None,
            end_marker: None,
        };

        match shape.appearance.style {
            SegmentStyle::Markers => {
                shape.waveform_shape = Some(WaveformShape {
                    color: shape.appearance.waveform_color.clone(),
                    fill: parse_color(&shape.appearance.waveform_color),
                });

                if shape.appearance.has_marker_handles() {
                    shape.start_marker = Some(shape.create_marker(true, ctx)?);
                    shape.end_marker = Some(shape.create_marker(false, ctx)?);
                }
            }
            SegmentStyle::Overlay => {
                let mut rect = RectShape::new(0.0, 0.0, 0.0, 0.0)
                    .with_fill(parse_color(&shape.appearance.overlay_color))
                    .with_stroke(
                        parse_color(&shape.appearance.overlay_border_color),
                        OVERLAY_STROKE_WIDTH,
                    );
                rect.opacity = OVERLAY_OPACITY;
                rect.corner_radius = OVERLAY_CORNER_RADIUS;
                shape.overlay_rect = Some(rect);
            }
        }

        shape.layout(ctx.layer);
        Ok(shape)
    }

    fn create_marker(
        &self,
        start_marker: bool,
        ctx: &ShapeContext<'_>,
    ) -> Result<MarkerHandle, WidgetError> {
        let layer: Rc<dyn MarkerLayer> = ctx.layer.clone();
        let mut marker = (ctx.factory)(CreateMarkerOptions {
            segment: self.segment.clone(),
            draggable: self.appearance.draggable,
            start_marker,
            color: self.appearance.marker_color(start_marker).to_string(),
            layer,
            view: ctx.view,
            font: ctx.font.clone(),
        });

        let mut group = Group::default();
        marker.attach(&mut group)?;
        Ok(MarkerHandle { group, marker })
    }

    /// Position every shape from the segment times and the view geometry
    fn layout(&mut self, layer: &ViewLayer) {
        let start_x = layer.time_to_pixels(self.segment.start_time);
        let end_x = layer.time_to_pixels(self.segment.end_time);

        if let Some(marker) = &mut self.start_marker {
            marker.group.x = start_x;
        }
        if let Some(marker) = &mut self.end_marker {
            marker.group.x = end_x;
        }

        if let Some(rect) = &mut self.overlay_rect {
            let offset = self.appearance.overlay_offset;
            rect.x = start_x;
            rect.y = offset;
            rect.width = end_x - start_x;
            rect.height = (layer.height() - 2.0 * offset).max(0.0);
        }
    }

    /// Apply new segment times without rebuilding shapes
    ///
    /// The shapes are repositioned even when a marker rejects the new time,
    /// so the view never lags behind the segment.
    pub fn set_segment(&mut self, segment: Segment, layer: &ViewLayer) -> Result<(), WidgetError> {
        self.segment = segment;
        self.layout(layer);

        let (start_time, end_time) = (self.segment.start_time, self.segment.end_time);
        if let Some(marker) = &mut self.start_marker {
            marker.marker.on_time_changed(&mut marker.group, start_time)?;
        }
        if let Some(marker) = &mut self.end_marker {
            marker.marker.on_time_changed(&mut marker.group, end_time)?;
        }
        Ok(())
    }

    /// Refit markers after the view height changed
    pub fn on_resize(&mut self, layer: &ViewLayer) -> Result<(), WidgetError> {
        for marker in [&mut self.start_marker, &mut self.end_marker].into_iter().flatten() {
            marker.marker.on_resize(&mut marker.group)?;
        }
        self.layout(layer);
        Ok(())
    }

    /// Reposition after the view scale changed
    pub fn relayout(&mut self, layer: &ViewLayer) {
        self.layout(layer);
    }

    /// Deliver a hover or drag transition to one boundary marker
    ///
    /// Returns `false` when the segment has no marker for that boundary.
    pub fn marker_interaction(
        &mut self,
        start_marker: bool,
        event: MarkerEvent,
    ) -> Result<bool, WidgetError> {
        match self.marker_mut(start_marker) {
            Some(marker) => {
                marker.interact(event)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Which boundary marker, if any, is under `point`
    pub fn hit_test(&self, point: Point) -> Option<bool> {
        if self.start_marker.as_ref().is_some_and(|m| m.group.hit_test(point)) {
            Some(true)
        } else if self.end_marker.as_ref().is_some_and(|m| m.group.hit_test(point)) {
            Some(false)
        } else {
            None
        }
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    pub fn appearance(&self) -> &SegmentAppearance {
        &self.appearance
    }

    pub fn overlay_offset(&self) -> f32 {
        self.appearance.overlay_offset
    }

    pub fn waveform_shape(&self) -> Option<&WaveformShape> {
        self.waveform_shape.as_ref()
    }

    pub fn overlay_rect(&self) -> Option<&RectShape> {
        self.overlay_rect.as_ref()
    }

    pub fn marker(&self, start_marker: bool) -> Option<&MarkerHandle> {
        if start_marker {
            self.start_marker.as_ref()
        } else {
            self.end_marker.as_ref()
        }
    }

    fn marker_mut(&mut self, start_marker: bool) -> Option<&mut MarkerHandle> {
        if start_marker {
            self.start_marker.as_mut()
        } else {
            self.end_marker.as_mut()
        }
    }

    /// Draw the segment; `peaks` holds one `(min, max)` column per pixel
    pub fn draw(&self, frame: &mut Frame, layer: &ViewLayer, peaks: &[(f32, f32)]) {
        if let Some(waveform) = &self.waveform_shape {
            draw_waveform_region(frame, layer, &self.segment, waveform.fill, peaks);
        }

        if let Some(rect) = &self.overlay_rect {
            rect.draw(frame, Point::ORIGIN);
        }

        for marker in [&self.start_marker, &self.end_marker].into_iter().flatten() {
            marker.group.draw(frame, Point::ORIGIN);
        }
    }
}

/// Redraw the waveform columns inside the segment in its own color
fn draw_waveform_region(
    frame: &mut Frame,
    layer: &ViewLayer,
    segment: &Segment,
    color: Color,
    peaks: &[(f32, f32)],
) {
    if peaks.is_empty() {
        return;
    }

    let height = layer.height();
    let center_y = height / 2.0;
    let scale = height / 2.0;

    let start_x = layer.time_to_pixels(segment.start_time).max(0.0) as usize;
    let end_x = (layer.time_to_pixels(segment.end_time).max(0.0).ceil() as usize).min(peaks.len());

    for (x, &(min, max)) in peaks.iter().enumerate().take(end_x).skip(start_x) {
        let y_top = center_y - max * scale;
        let y_bottom = center_y - min * scale;
        if (y_bottom - y_top).abs() < 0.5 {
            continue;
        }
        frame.stroke(
            &Path::line(Point::new(x as f32, y_top), Point::new(x as f32, y_bottom)),
            Stroke::default().with_color(color).with_width(1.0),
        );
    }
}
