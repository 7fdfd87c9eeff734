//! Segment editor: the collection plus every view that renders it
//!
//! The editor is the single entry point for changing segments. Each change
//! is validated against the collection, mirrored into the zoomview and
//! overview layers, and rolled back if any view can't build its shapes, so
//! the views never disagree with the collection.

use crate::error::WidgetError;
use crate::layer::ViewKind;
use crate::marker::{default_marker_factory, MarkerEvent, MarkerFactory};
use crate::message::{MarkerHit, SegmentsMessage};
use crate::segments_layer::{LayerContext, PendingUpdate, SegmentsLayer};
use wavemark_core::config::SegmentsConfig;
use wavemark_core::{Segment, SegmentCollection, SegmentSpec, SegmentUpdate};

/// Shortest segment a drag can produce, in seconds
pub const MIN_SEGMENT_DURATION: f64 = 0.001;

/// Owns the segments and keeps every view in sync with them
pub struct SegmentsEditor {
    config: SegmentsConfig,
    segments: SegmentCollection,
    factory: MarkerFactory,
    zoomview: SegmentsLayer,
    overview: SegmentsLayer,
}

impl SegmentsEditor {
    pub fn new(config: SegmentsConfig) -> Self {
        let precision = config.time_label_precision;
        Self {
            zoomview: SegmentsLayer::new(ViewKind::Zoomview, config.zoomview.clone(), precision),
            overview: SegmentsLayer::new(ViewKind::Overview, config.overview.clone(), precision),
            segments: SegmentCollection::new(),
            factory: default_marker_factory(),
            config,
        }
    }

    /// Replace the default marker with a host-supplied implementation
    ///
    /// Only affects markers created afterwards.
    pub fn with_marker_factory(mut self, factory: MarkerFactory) -> Self {
        self.factory = factory;
        self
    }

    pub fn config(&self) -> &SegmentsConfig {
        &self.config
    }

    pub fn segments(&self) -> &SegmentCollection {
        &self.segments
    }

    pub fn view(&self, view: ViewKind) -> &SegmentsLayer {
        match view {
            ViewKind::Zoomview => &self.zoomview,
            ViewKind::Overview => &self.overview,
        }
    }

    fn view_mut(&mut self, view: ViewKind) -> &mut SegmentsLayer {
        match view {
            ViewKind::Zoomview => &mut self.zoomview,
            ViewKind::Overview => &mut self.overview,
        }
    }

    /// Run `f` against every view
    fn for_each_view<F>(&mut self, mut f: F) -> Result<(), WidgetError>
    where
        F: FnMut(&mut SegmentsLayer, &LayerContext<'_>) -> Result<(), WidgetError>,
    {
        let ctx = LayerContext {
            global: &self.config.segment_options,
            factory: &self.factory,
            font: &self.config.font,
        };
        f(&mut self.zoomview, &ctx)?;
        f(&mut self.overview, &ctx)
    }

    /// Add a segment and create its shapes in every view
    pub fn add_segment(&mut self, spec: SegmentSpec) -> Result<Segment, WidgetError> {
        let segment = self.segments.add(spec)?;

        if let Err(e) = self.for_each_view(|view, ctx| view.add_segment(&segment, ctx)) {
            log::warn!("add_segment: Failed to create shapes for '{}': {}", segment.id, e);
            self.remove_segment(&segment.id);
            return Err(e);
        }

        Ok(segment)
    }

    /// Update a segment and re-resolve its appearance in every view
    ///
    /// Every view prepares its new shapes before anything is committed, so a
    /// failed rebuild leaves the collection and all views as they were.
    pub fn update_segment(
        &mut self,
        id: &str,
        update: SegmentUpdate,
    ) -> Result<Segment, WidgetError> {
        let segment = self.segments.preview_update(id, &update)?;

        let (zoomview, overview) = match self.prepare_views(&segment) {
            Ok(prepared) => prepared,
            Err(e) => {
                log::warn!("update_segment: Failed to rebuild shapes for '{}': {}", id, e);
                return Err(e);
            }
        };

        let segment = self.segments.update(id, update)?;

        // Both views move even if a marker rejects the new time
        let zoomview = self.zoomview.apply_update(zoomview);
        let overview = self.overview.apply_update(overview);
        zoomview.and(overview)?;

        Ok(segment)
    }

    /// Build every view's pending update without committing any
    fn prepare_views(
        &self,
        segment: &Segment,
    ) -> Result<(PendingUpdate, PendingUpdate), WidgetError> {
        let ctx = LayerContext {
            global: &self.config.segment_options,
            factory: &self.factory,
            font: &self.config.font,
        };
        Ok((
            self.zoomview.prepare_update(segment, &ctx)?,
            self.overview.prepare_update(segment, &ctx)?,
        ))
    }

    /// Remove a segment and destroy its shapes and markers
    pub fn remove_segment(&mut self, id: &str) -> Option<Segment> {
        self.zoomview.remove_segment(id);
        self.overview.remove_segment(id);
        self.segments.remove_by_id(id)
    }

    pub fn remove_all_segments(&mut self) {
        self.zoomview.clear();
        self.overview.clear();
        self.segments.remove_all();
    }

    /// Apply a new height to one view
    pub fn resize_view(&mut self, view: ViewKind, height: f32) -> Result<(), WidgetError> {
        log::debug!("resize_view: {} -> {}px", view.name(), height);
        self.view_mut(view).resize(height)
    }

    /// Apply a new time scale to one view
    pub fn set_view_scale(&mut self, view: ViewKind, start_time: f64, pixels_per_second: f64) {
        self.view_mut(view).set_scale(start_time, pixels_per_second);
    }

    /// Provide the waveform columns drawn under markers-style segments
    pub fn set_view_peaks(&mut self, view: ViewKind, peaks: Vec<(f32, f32)>) {
        self.view_mut(view).set_peaks(peaks);
    }

    /// Apply a pointer interaction published by a segments canvas
    pub fn handle_message(&mut self, message: SegmentsMessage) -> Result<(), WidgetError> {
        match message {
            SegmentsMessage::HoverStart { view, hit } => {
                self.view_mut(view).marker_interaction(&hit, MarkerEvent::HoverStart)
            }
            SegmentsMessage::HoverEnd { view, hit } => {
                self.view_mut(view).marker_interaction(&hit, MarkerEvent::HoverEnd)
            }
            SegmentsMessage::DragStart { view, hit } => {
                log::debug!("handle_message: Drag start {:?} in {}", hit, view.name());
                self.view_mut(view).marker_interaction(&hit, MarkerEvent::DragStart)
            }
            SegmentsMessage::DragMove { view, hit, x } => self.drag_marker(view, &hit, x),
            SegmentsMessage::DragEnd { view, hit } => {
                log::debug!("handle_message: Drag end {:?} in {}", hit, view.name());
                self.view_mut(view).marker_interaction(&hit, MarkerEvent::DragEnd)
            }
        }
    }

    /// Move a boundary to view-relative `x`, keeping start before end
    fn drag_marker(&mut self, view: ViewKind, hit: &MarkerHit, x: f32) -> Result<(), WidgetError> {
        if !x.is_finite() {
            return Ok(());
        }

        let layer = self.view(view);
        let draggable = layer
            .segment_shape(&hit.segment_id)
            .and_then(|shape| shape.marker(hit.start_marker))
            .is_some_and(|marker| marker.group.draggable);
        if !draggable {
            return Ok(());
        }

        let Some(segment) = self.segments.get(&hit.segment_id) else {
            return Ok(());
        };

        let time = layer.layer().pixels_to_time(x);
        let update = if hit.start_marker {
            let start_time = time.min(segment.end_time - MIN_SEGMENT_DURATION).max(0.0);
            SegmentUpdate {
                start_time: Some(start_time),
                ..SegmentUpdate::default()
            }
        } else {
            SegmentUpdate {
                end_time: Some(time.max(segment.start_time + MIN_SEGMENT_DURATION)),
                ..SegmentUpdate::default()
            }
        };

        let id = hit.segment_id.clone();
        self.update_segment(&id, update)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor;
    use crate::error::MarkerError;
    use crate::marker::{CreateMarkerOptions, DefaultMarker, SegmentMarker};
    use crate::scene::{Group, Shape, TextShape};
    use crate::theme::parse_color;
    use iced::mouse;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wavemark_core::{SegmentOptions, SegmentStyle};

    type Calls = Rc<RefCell<Vec<CreateMarkerOptions>>>;

    /// Factory recording every call, building default markers
    fn recording_factory() -> (MarkerFactory, Calls) {
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let recorded = calls.clone();
        let factory: MarkerFactory =
            Rc::new(move |options: CreateMarkerOptions| -> Box<dyn SegmentMarker> {
                recorded.borrow_mut().push(options.clone());
                Box::new(DefaultMarker::new(options))
            });
        (factory, calls)
    }

    fn editor(config: SegmentsConfig) -> (SegmentsEditor, Calls) {
        let (factory, calls) = recording_factory();
        (SegmentsEditor::new(config).with_marker_factory(factory), calls)
    }

    fn styled(style: SegmentStyle) -> SegmentsConfig {
        let mut config = SegmentsConfig::default();
        config.segment_options.style = Some(style);
        config
    }

    fn segment1(editable: bool) -> SegmentSpec {
        SegmentSpec::new(0.0, 10.0).with_id("segment1").editable(editable)
    }

    fn label(group: &Group) -> &TextShape {
        group
            .shapes()
            .iter()
            .find_map(|shape| match shape {
                Shape::Text(text) => Some(text),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_editable_markers_create_two_handles_in_zoomview() {
        let (mut editor, calls) = editor(styled(SegmentStyle::Markers));
        editor.add_segment(segment1(true)).unwrap();

        // Overview forces segments non-editable by default
        let calls = calls.borrow();
        assert_eq!(calls.len(), 2);

        let call = &calls[0];
        assert_eq!(call.segment.start_time, 0.0);
        assert_eq!(call.segment.end_time, 10.0);
        assert!(call.segment.editable);
        assert_eq!(call.segment.id, "segment1");
        assert!(call.draggable);
        assert!(call.start_marker);
        assert!(!calls[1].start_marker);
        assert_eq!(call.color, "#aaaaaa");
        assert_eq!(call.layer.height(), editor.view(ViewKind::Zoomview).height());
        assert_eq!(call.view.name(), "zoomview");
    }

    #[test]
    fn test_non_editable_markers_create_no_handles() {
        let (mut editor, calls) = editor(styled(SegmentStyle::Markers));
        editor.add_segment(segment1(false)).unwrap();

        assert_eq!(calls.borrow().len(), 0);
        let shape = editor.view(ViewKind::Zoomview).segment_shape("segment1").unwrap();
        assert!(shape.marker(true).is_none());
        assert!(shape.marker(false).is_none());
    }

    #[test]
    fn test_overview_can_allow_editing() {
        let mut config = styled(SegmentStyle::Markers);
        config.overview.editable_segments = Some(true);
        let (mut editor, calls) = editor(config);
        editor.add_segment(segment1(true)).unwrap();

        let calls = calls.borrow();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[2].view, ViewKind::Overview);
    }

    #[test]
    fn test_default_waveform_color() {
        let (mut editor, _calls) = editor(styled(SegmentStyle::Markers));
        editor.add_segment(segment1(true)).unwrap();

        let shape = editor.view(ViewKind::Zoomview).segment_shape("segment1").unwrap();
        let waveform = shape.waveform_shape().unwrap();
        assert_eq!(waveform.color, "#0074d9");
        assert_eq!(waveform.fill, parse_color("#0074d9"));
        assert!(shape.overlay_rect().is_none());
    }

    #[test]
    fn test_segment_color_overrides_waveform_color() {
        let mut config = styled(SegmentStyle::Markers);
        config.segment_options.waveform_color = Some("#f00".to_string());
        let (mut editor, _calls) = editor(config);
        editor.add_segment(segment1(true).with_color("#0f0")).unwrap();

        let shape = editor.view(ViewKind::Zoomview).segment_shape("segment1").unwrap();
        assert_eq!(shape.waveform_shape().unwrap().color, "#0f0");
    }

    #[test]
    fn test_view_specific_marker_colors() {
        let mut config = styled(SegmentStyle::Markers);
        config.zoomview.segment_options = SegmentOptions {
            start_marker_color: Some("#0f0".to_string()),
            end_marker_color: Some("#080".to_string()),
            ..Default::default()
        };
        let (mut editor, calls) = editor(config);
        editor.add_segment(segment1(true)).unwrap();

        let calls = calls.borrow();
        assert_eq!(calls[0].color, "#0f0");
        assert_eq!(calls[1].color, "#080");

        let shape = editor.view(ViewKind::Zoomview).segment_shape("segment1").unwrap();
        let start_handle = shape.marker(true).unwrap().group.shapes().iter().find_map(|s| match s {
            Shape::Rect(rect) => Some(rect.fill),
            _ => None,
        });
        assert_eq!(start_handle, Some(Some(parse_color("#0f0"))));
    }

    #[test]
    fn test_overlay_creates_no_handles_or_waveform() {
        let (mut editor, calls) = editor(styled(SegmentStyle::Overlay));
        editor.add_segment(segment1(true)).unwrap();

        assert_eq!(calls.borrow().len(), 0);
        let shape = editor.view(ViewKind::Zoomview).segment_shape("segment1").unwrap();
        assert!(shape.waveform_shape().is_none());
        assert!(shape.marker(true).is_none());
        assert!(shape.overlay_rect().is_some());
    }

    #[test]
    fn test_overlay_default_attributes() {
        let (mut editor, _calls) = editor(styled(SegmentStyle::Overlay));
        editor.add_segment(segment1(true)).unwrap();

        let view = editor.view(ViewKind::Zoomview);
        let rect = view.segment_shape("segment1").unwrap().overlay_rect().unwrap();
        assert_eq!(rect.stroke, Some(parse_color("#ff0000")));
        assert_eq!(rect.stroke_width, 2.0);
        assert_eq!(rect.fill, Some(parse_color("#ff0000")));
        assert_eq!(rect.opacity, 0.3);
        assert_eq!(rect.corner_radius, 5.0);

        // Spans the segment, inset by the offset top and bottom
        let layer = view.layer();
        assert_eq!(rect.x, layer.time_to_pixels(0.0));
        assert_eq!(rect.width, layer.time_to_pixels(10.0) - layer.time_to_pixels(0.0));
        assert_eq!(rect.y, 25.0);
        assert_eq!(rect.height, view.height() - 50.0);
    }

    #[test]
    fn test_overlay_segment_colors() {
        let (mut editor, _calls) = editor(styled(SegmentStyle::Overlay));
        editor
            .add_segment(segment1(true).with_color("#0000ff").with_border_color("#00ff00"))
            .unwrap();

        let rect = editor
            .view(ViewKind::Zoomview)
            .segment_shape("segment1")
            .unwrap()
            .overlay_rect()
            .unwrap();
        assert_eq!(rect.stroke, Some(parse_color("#00ff00")));
        assert_eq!(rect.stroke_width, 2.0);
        assert_eq!(rect.fill, Some(parse_color("#0000ff")));
        assert_eq!(rect.opacity, 0.3);
        assert_eq!(rect.corner_radius, 5.0);
    }

    #[test]
    fn test_overlay_offset_per_view() {
        let mut config = styled(SegmentStyle::Overlay);
        config.overview.segment_options.overlay_offset = Some(10.0);
        config.zoomview.segment_options.overlay_offset = Some(20.0);
        let (mut editor, _calls) = editor(config);
        editor.add_segment(segment1(true)).unwrap();

        let zoomview = editor.view(ViewKind::Zoomview).segment_shape("segment1").unwrap();
        let overview = editor.view(ViewKind::Overview).segment_shape("segment1").unwrap();
        assert_eq!(zoomview.overlay_offset(), 20.0);
        assert_eq!(overview.overlay_offset(), 10.0);
    }

    #[test]
    fn test_overlay_colors_view_over_global() {
        let mut config = styled(SegmentStyle::Overlay);
        config.segment_options.overlay_color = Some("#444".to_string());
        config.segment_options.overlay_border_color = Some("#222".to_string());
        config.zoomview.segment_options.overlay_color = Some("#888".to_string());
        config.zoomview.segment_options.overlay_border_color = Some("#aaa".to_string());
        let (mut editor, _calls) = editor(config);
        editor.add_segment(segment1(true)).unwrap();

        let zoomview = editor.view(ViewKind::Zoomview).segment_shape("segment1").unwrap();
        assert_eq!(zoomview.appearance().overlay_color, "#888");
        assert_eq!(zoomview.appearance().overlay_border_color, "#aaa");

        // No overview overrides, so global applies
        let overview = editor.view(ViewKind::Overview).segment_shape("segment1").unwrap();
        assert_eq!(overview.overlay_rect().unwrap().fill, Some(parse_color("#444")));
        assert_eq!(overview.overlay_rect().unwrap().stroke, Some(parse_color("#222")));
    }

    #[test]
    fn test_resize_view_refits_markers() {
        let (mut editor, _calls) = editor(styled(SegmentStyle::Markers));
        editor.add_segment(segment1(true)).unwrap();
        editor.resize_view(ViewKind::Zoomview, 100.0).unwrap();

        let shape = editor.view(ViewKind::Zoomview).segment_shape("segment1").unwrap();
        let group = &shape.marker(true).unwrap().group;
        assert_eq!(label(group).y, 45.0);
        let handle_y = group.shapes().iter().find_map(|s| match s {
            Shape::Rect(rect) => Some(rect.y),
            _ => None,
        });
        assert_eq!(handle_y, Some(39.5));
    }

    #[test]
    fn test_hover_messages_toggle_label() {
        let (mut editor, _calls) = editor(styled(SegmentStyle::Markers));
        editor.add_segment(segment1(true)).unwrap();
        let hit = MarkerHit { segment_id: "segment1".to_string(), start_marker: true };

        editor
            .handle_message(SegmentsMessage::HoverStart {
                view: ViewKind::Zoomview,
                hit: hit.clone(),
            })
            .unwrap();
        let shape = editor.view(ViewKind::Zoomview).segment_shape("segment1").unwrap();
        assert!(label(&shape.marker(true).unwrap().group).visible);
        assert_eq!(cursor::current(), mouse::Interaction::ResizingHorizontally);

        editor
            .handle_message(SegmentsMessage::HoverEnd { view: ViewKind::Zoomview, hit })
            .unwrap();
        let shape = editor.view(ViewKind::Zoomview).segment_shape("segment1").unwrap();
        assert!(!label(&shape.marker(true).unwrap().group).visible);
        assert_eq!(cursor::current(), mouse::Interaction::default());
    }

    #[test]
    fn test_removing_hovered_segment_restores_cursor() {
        let (mut editor, _calls) = editor(styled(SegmentStyle::Markers));
        editor.add_segment(segment1(true)).unwrap();
        let hit = MarkerHit { segment_id: "segment1".to_string(), start_marker: false };

        editor
            .handle_message(SegmentsMessage::HoverStart {
                view: ViewKind::Zoomview,
                hit: hit.clone(),
            })
            .unwrap();
        assert_eq!(cursor::current(), mouse::Interaction::ResizingHorizontally);

        assert!(editor.remove_segment("segment1").is_some());
        assert_eq!(cursor::current(), mouse::Interaction::default());
        assert!(editor.view(ViewKind::Zoomview).is_empty());

        // Late events for the removed marker are ignored
        editor
            .handle_message(SegmentsMessage::HoverEnd { view: ViewKind::Zoomview, hit })
            .unwrap();
    }

    #[test]
    fn test_drag_moves_boundary_and_updates_label() {
        let (mut editor, _calls) = editor(styled(SegmentStyle::Markers));
        editor.add_segment(segment1(true)).unwrap();
        editor.set_view_scale(ViewKind::Zoomview, 0.0, 10.0);
        let hit = MarkerHit { segment_id: "segment1".to_string(), start_marker: true };

        editor
            .handle_message(SegmentsMessage::DragStart {
                view: ViewKind::Zoomview,
                hit: hit.clone(),
            })
            .unwrap();
        editor
            .handle_message(SegmentsMessage::DragMove {
                view: ViewKind::Zoomview,
                hit: hit.clone(),
                x: 25.0,
            })
            .unwrap();

        assert_eq!(editor.segments().get("segment1").unwrap().start_time, 2.5);
        let shape = editor.view(ViewKind::Zoomview).segment_shape("segment1").unwrap();
        let group = &shape.marker(true).unwrap().group;
        assert_eq!(group.x, 25.0);
        assert_eq!(label(group).text, "00:02.50");
        assert!(label(group).visible);

        // Start can't pass the end boundary
        editor
            .handle_message(SegmentsMessage::DragMove {
                view: ViewKind::Zoomview,
                hit: hit.clone(),
                x: 500.0,
            })
            .unwrap();
        let segment = editor.segments().get("segment1").unwrap();
        assert!(segment.start_time < segment.end_time);
        assert_eq!(segment.end_time, 10.0);

        editor
            .handle_message(SegmentsMessage::DragEnd { view: ViewKind::Zoomview, hit })
            .unwrap();
        let shape = editor.view(ViewKind::Zoomview).segment_shape("segment1").unwrap();
        assert!(!label(&shape.marker(true).unwrap().group).visible);
    }

    #[test]
    fn test_drag_ignored_without_handles() {
        let (mut editor, _calls) = editor(styled(SegmentStyle::Markers));
        editor.add_segment(segment1(true)).unwrap();
        let hit = MarkerHit { segment_id: "segment1".to_string(), start_marker: true };

        // Overview has no handles for this segment
        editor
            .handle_message(SegmentsMessage::DragMove { view: ViewKind::Overview, hit, x: 25.0 })
            .unwrap();
        assert_eq!(editor.segments().get("segment1").unwrap().start_time, 0.0);
    }

    #[test]
    fn test_update_rebuilds_on_appearance_change() {
        let (mut editor, calls) = editor(styled(SegmentStyle::Markers));
        editor.add_segment(segment1(true)).unwrap();
        assert_eq!(calls.borrow().len(), 2);

        // Time-only change reuses the markers
        editor.update_segment("segment1", SegmentUpdate::times(1.0, 9.0)).unwrap();
        assert_eq!(calls.borrow().len(), 2);

        // Becoming non-editable destroys the handles
        editor
            .update_segment(
                "segment1",
                SegmentUpdate {
                    editable: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(calls.borrow().len(), 2);
        let shape = editor.view(ViewKind::Zoomview).segment_shape("segment1").unwrap();
        assert!(shape.marker(true).is_none());
        assert!(shape.waveform_shape().is_some());
    }

    #[test]
    fn test_invalid_segment_is_not_rendered() {
        let (mut editor, calls) = editor(styled(SegmentStyle::Markers));
        let err = editor.add_segment(SegmentSpec::new(10.0, 5.0).editable(true)).unwrap_err();

        assert!(matches!(err, WidgetError::Segment(_)));
        assert_eq!(calls.borrow().len(), 0);
        assert!(editor.view(ViewKind::Zoomview).is_empty());
    }

    #[test]
    fn test_remove_all_segments() {
        let (mut editor, _calls) = editor(styled(SegmentStyle::Overlay));
        editor.add_segment(segment1(true)).unwrap();
        editor.add_segment(SegmentSpec::new(20.0, 30.0)).unwrap();
        assert_eq!(editor.view(ViewKind::Overview).len(), 2);

        editor.remove_all_segments();
        assert!(editor.segments().is_empty());
        assert!(editor.view(ViewKind::Zoomview).is_empty());
        assert!(editor.view(ViewKind::Overview).is_empty());
    }

    /// Marker whose attach always fails
    struct RejectingMarker;

    impl SegmentMarker for RejectingMarker {
        fn attach(&mut self, _group: &mut Group) -> Result<(), MarkerError> {
            Err(MarkerError::ShapeMissing)
        }

        fn on_resize(&mut self, _group: &mut Group) -> Result<(), MarkerError> {
            Ok(())
        }

        fn on_time_changed(&mut self, _group: &mut Group, _time: f64) -> Result<(), MarkerError> {
            Ok(())
        }
    }

    /// Factory whose markers fail to attach in the given view
    fn failing_factory(failing_view: Rc<Cell<Option<ViewKind>>>) -> MarkerFactory {
        Rc::new(move |options: CreateMarkerOptions| -> Box<dyn SegmentMarker> {
            if failing_view.get() == Some(options.view) {
                Box::new(RejectingMarker)
            } else {
                Box::new(DefaultMarker::new(options))
            }
        })
    }

    #[test]
    fn test_failed_rebuild_keeps_views_and_collection() {
        let mut config = styled(SegmentStyle::Markers);
        config.overview.editable_segments = Some(true);
        let failing_view = Rc::new(Cell::new(None));
        let mut editor =
            SegmentsEditor::new(config).with_marker_factory(failing_factory(failing_view.clone()));
        editor.add_segment(segment1(false)).unwrap();

        // Zoomview could rebuild, overview can't: nothing may be committed
        failing_view.set(Some(ViewKind::Overview));
        let err = editor
            .update_segment(
                "segment1",
                SegmentUpdate {
                    editable: Some(true),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err, WidgetError::Marker(MarkerError::ShapeMissing));

        assert!(!editor.segments().get("segment1").unwrap().editable);
        for view in ViewKind::ALL {
            let shape = editor.view(view).segment_shape("segment1").unwrap();
            assert!(!shape.segment().editable);
            assert!(shape.marker(true).is_none());
        }

        // Once the factory recovers the same update goes through everywhere
        failing_view.set(None);
        editor
            .update_segment(
                "segment1",
                SegmentUpdate {
                    editable: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        for view in ViewKind::ALL {
            let shape = editor.view(view).segment_shape("segment1").unwrap();
            assert!(shape.marker(true).is_some());
            assert!(shape.marker(false).is_some());
        }
    }

    #[test]
    fn test_failed_add_leaves_nothing_behind() {
        let failing_view = Rc::new(Cell::new(Some(ViewKind::Zoomview)));
        let mut editor = SegmentsEditor::new(styled(SegmentStyle::Markers))
            .with_marker_factory(failing_factory(failing_view));

        assert!(editor.add_segment(segment1(true)).is_err());
        assert!(editor.segments().is_empty());
        assert!(editor.view(ViewKind::Zoomview).is_empty());
        assert!(editor.view(ViewKind::Overview).is_empty());
    }
}
