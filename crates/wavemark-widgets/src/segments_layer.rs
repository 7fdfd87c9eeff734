//! All segment shapes of one view
//!
//! The layer resolves each segment's appearance against the global and
//! view-level options and keeps one [`SegmentShape`] per segment id. It
//! reacts to the segment collection symmetrically: add creates shapes, update
//! re-resolves (rebuilding only when the appearance changed), remove destroys
//! the shapes and any markers they own.
//!
//! Updates are two-phase so the editor can build every view's new shapes
//! before committing any of them.

use crate::error::WidgetError;
use crate::layer::{MarkerLayer, ViewKind, ViewLayer};
use crate::marker::{MarkerEvent, MarkerFactory};
use crate::message::MarkerHit;
use crate::segment_shape::{SegmentShape, ShapeContext};
use iced::widget::canvas::Frame;
use iced::Point;
use std::collections::HashMap;
use std::rc::Rc;
use wavemark_core::config::{MarkerFont, ViewConfig};
use wavemark_core::{resolve, Segment, SegmentAppearance, SegmentOptions};

/// Inputs shared by every view, owned by the editor
pub struct LayerContext<'a> {
    pub global: &'a SegmentOptions,
    pub factory: &'a MarkerFactory,
    pub font: &'a MarkerFont,
}

/// A segment change ready to be applied to one view
pub enum PendingUpdate {
    /// Appearance unchanged: move the existing shapes
    Move(Segment),
    /// Appearance changed: swap in freshly built shapes
    Replace(Box<SegmentShape>),
}

/// Segment shapes for one view
pub struct SegmentsLayer {
    view: ViewKind,
    config: ViewConfig,
    layer: Rc<ViewLayer>,
    shapes: HashMap<String, SegmentShape>,
    peaks: Vec<(f32, f32)>,
}

impl SegmentsLayer {
    pub fn new(view: ViewKind, config: ViewConfig, precision: u32) -> Self {
        Self {
            view,
            config,
            layer: Rc::new(ViewLayer::new(view, precision)),
            shapes: HashMap::new(),
            peaks: Vec::new(),
        }
    }

    pub fn view(&self) -> ViewKind {
        self.view
    }

    pub fn layer(&self) -> &ViewLayer {
        &self.layer
    }

    pub fn height(&self) -> f32 {
        self.layer.height()
    }

    /// Whether this view lets segments be edited
    pub fn allows_editing(&self) -> bool {
        self.config.allows_editing(self.view.editable_by_default())
    }

    pub fn segment_shape(&self, id: &str) -> Option<&SegmentShape> {
        self.shapes.get(id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Waveform columns drawn under markers-style segments
    pub fn set_peaks(&mut self, peaks: Vec<(f32, f32)>) {
        self.peaks = peaks;
    }

    fn context<'a>(&'a self, ctx: &'a LayerContext<'a>) -> ShapeContext<'a> {
        ShapeContext {
            view: self.view,
            layer: &self.layer,
            factory: ctx.factory,
            font: ctx.font,
        }
    }

    fn build_shape(
        &self,
        segment: &Segment,
        ctx: &LayerContext<'_>,
    ) -> Result<SegmentShape, WidgetError> {
        let appearance = self.appearance_for(segment, ctx);

        log::debug!(
            "SegmentsLayer[{}]: Building '{}' as {:?} (draggable: {})",
            self.view.name(),
            segment.id,
            appearance.style,
            appearance.draggable
        );

        SegmentShape::new(segment.clone(), appearance, &self.context(ctx))
    }

    fn appearance_for(&self, segment: &Segment, ctx: &LayerContext<'_>) -> SegmentAppearance {
        resolve(
            segment,
            ctx.global,
            &self.config.segment_options,
            self.allows_editing(),
        )
    }

    pub fn add_segment(
        &mut self,
        segment: &Segment,
        ctx: &LayerContext<'_>,
    ) -> Result<(), WidgetError> {
        let shape = self.build_shape(segment, ctx)?;
        self.shapes.insert(segment.id.clone(), shape);
        Ok(())
    }

    /// Work out how a changed segment will be shown, without touching the view
    ///
    /// Replacement shapes are built here, so a failing marker factory leaves
    /// the current shapes in place.
    pub fn prepare_update(
        &self,
        segment: &Segment,
        ctx: &LayerContext<'_>,
    ) -> Result<PendingUpdate, WidgetError> {
        let unchanged = self
            .shapes
            .get(&segment.id)
            .is_some_and(|shape| *shape.appearance() == self.appearance_for(segment, ctx));

        if unchanged {
            Ok(PendingUpdate::Move(segment.clone()))
        } else {
            Ok(PendingUpdate::Replace(Box::new(self.build_shape(segment, ctx)?)))
        }
    }

    /// Commit an update from [`prepare_update`](Self::prepare_update)
    ///
    /// A replaced shape's markers are dropped after the new shape is in place.
    pub fn apply_update(&mut self, update: PendingUpdate) -> Result<(), WidgetError> {
        match update {
            PendingUpdate::Move(segment) => match self.shapes.get_mut(&segment.id) {
                Some(shape) => shape.set_segment(segment, &self.layer),
                None => {
                    log::debug!(
                        "SegmentsLayer[{}]: No shape for '{}', ignoring move",
                        self.view.name(),
                        segment.id
                    );
                    Ok(())
                }
            },
            PendingUpdate::Replace(shape) => {
                let id = shape.segment().id.clone();
                self.shapes.insert(id, *shape);
                Ok(())
            }
        }
    }

    pub fn remove_segment(&mut self, id: &str) -> bool {
        let removed = self.shapes.remove(id).is_some();
        if removed {
            log::debug!("SegmentsLayer[{}]: Removed '{}'", self.view.name(), id);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Apply a new view height and refit every marker
    pub fn resize(&mut self, height: f32) -> Result<(), WidgetError> {
        self.layer.set_height(height);
        for shape in self.shapes.values_mut() {
            shape.on_resize(&self.layer)?;
        }
        Ok(())
    }

    /// Apply a new time scale and reposition every shape
    pub fn set_scale(&mut self, start_time: f64, pixels_per_second: f64) {
        self.layer.set_scale(start_time, pixels_per_second);
        for shape in self.shapes.values_mut() {
            shape.relayout(&self.layer);
        }
    }

    /// Shapes in paint order: earliest start first, ties by id
    fn draw_order(&self) -> Vec<(&String, &SegmentShape)> {
        let mut shapes: Vec<_> = self.shapes.iter().collect();
        shapes.sort_by(|(a_id, a), (b_id, b)| {
            a.segment()
                .start_time
                .total_cmp(&b.segment().start_time)
                .then_with(|| a_id.cmp(b_id))
        });
        shapes
    }

    /// Marker under `point`, if any
    ///
    /// Overlapping handles resolve to the one painted last.
    pub fn hit_test(&self, point: Point) -> Option<MarkerHit> {
        self.draw_order().into_iter().rev().find_map(|(id, shape)| {
            shape.hit_test(point).map(|start_marker| MarkerHit {
                segment_id: id.clone(),
                start_marker,
            })
        })
    }

    /// Deliver a pointer transition to a marker
    ///
    /// Events for markers that no longer exist are ignored; the segment may
    /// have been removed between pointer events.
    pub fn marker_interaction(
        &mut self,
        hit: &MarkerHit,
        event: MarkerEvent,
    ) -> Result<(), WidgetError> {
        let delivered = match self.shapes.get_mut(&hit.segment_id) {
            Some(shape) => shape.marker_interaction(hit.start_marker, event)?,
            None => false,
        };

        if !delivered {
            log::debug!(
                "SegmentsLayer[{}]: No marker for {:?}, ignoring {:?}",
                self.view.name(),
                hit,
                event
            );
        }
        Ok(())
    }

    /// Draw all segments, earliest first
    pub fn draw(&self, frame: &mut Frame) {
        for (_, shape) in self.draw_order() {
            shape.draw(frame, &self.layer, &self.peaks);
        }
    }
}
