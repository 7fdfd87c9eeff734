//! View geometry shared by a view's segments and markers
//!
//! Each rendering surface owns one [`ViewLayer`]: its pixel height, how it
//! maps time to pixels, and how it formats marker time labels. Markers only
//! see the narrow [`MarkerLayer`] capability.

use std::cell::Cell;
use wavemark_core::format_time;

/// Detail view height in pixels
pub const ZOOMVIEW_HEIGHT: f32 = 180.0;

/// Full-track view height in pixels
pub const OVERVIEW_HEIGHT: f32 = 54.0;

/// Initial zoomview scale
pub const ZOOMVIEW_PIXELS_PER_SECOND: f64 = 100.0;

/// Initial overview scale, replaced once the track duration is known
pub const OVERVIEW_PIXELS_PER_SECOND: f64 = 10.0;

/// The rendering surfaces a segment can appear in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Zoomed detail view
    Zoomview,
    /// Full-track minimap view
    Overview,
}

impl ViewKind {
    pub const ALL: [ViewKind; 2] = [ViewKind::Zoomview, ViewKind::Overview];

    pub fn name(self) -> &'static str {
        match self {
            ViewKind::Zoomview => "zoomview",
            ViewKind::Overview => "overview",
        }
    }

    /// Whether segments are editable here unless configured otherwise
    pub fn editable_by_default(self) -> bool {
        matches!(self, ViewKind::Zoomview)
    }
}

/// What a marker needs from the view it is drawn in
pub trait MarkerLayer {
    /// Text for a marker time label
    fn format_time(&self, time: f64) -> String;

    /// Current view height in pixels
    fn height(&self) -> f32;
}

/// Geometry of one view
///
/// Height and scale use interior mutability: markers hold a shared handle to
/// the layer and read the current height when told to resize.
#[derive(Debug)]
pub struct ViewLayer {
    kind: ViewKind,
    height: Cell<f32>,
    start_time: Cell<f64>,
    pixels_per_second: Cell<f64>,
    precision: u32,
}

impl ViewLayer {
    pub fn new(kind: ViewKind, precision: u32) -> Self {
        let (height, pixels_per_second) = match kind {
            ViewKind::Zoomview => (ZOOMVIEW_HEIGHT, ZOOMVIEW_PIXELS_PER_SECOND),
            ViewKind::Overview => (OVERVIEW_HEIGHT, OVERVIEW_PIXELS_PER_SECOND),
        };

        Self {
            kind,
            height: Cell::new(height),
            start_time: Cell::new(0.0),
            pixels_per_second: Cell::new(pixels_per_second),
            precision,
        }
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn set_height(&self, height: f32) {
        self.height.set(height.max(0.0));
    }

    /// Set the time shown at x = 0 and the zoom level
    pub fn set_scale(&self, start_time: f64, pixels_per_second: f64) {
        self.start_time.set(start_time.max(0.0));
        if pixels_per_second.is_finite() && pixels_per_second > 0.0 {
            self.pixels_per_second.set(pixels_per_second);
        } else {
            log::warn!(
                "ViewLayer::set_scale: Ignoring invalid scale {} for {}",
                pixels_per_second,
                self.kind.name()
            );
        }
    }

    pub fn start_time(&self) -> f64 {
        self.start_time.get()
    }

    pub fn pixels_per_second(&self) -> f64 {
        self.pixels_per_second.get()
    }

    pub fn time_to_pixels(&self, time: f64) -> f32 {
        ((time - self.start_time.get()) * self.pixels_per_second.get()) as f32
    }

    pub fn pixels_to_time(&self, x: f32) -> f64 {
        self.start_time.get() + x as f64 / self.pixels_per_second.get()
    }
}

impl MarkerLayer for ViewLayer {
    fn format_time(&self, time: f64) -> String {
        format_time(time, self.precision)
    }

    fn height(&self) -> f32 {
        self.height.get()
    }
}
