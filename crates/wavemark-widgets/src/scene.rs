//! Retained scene primitives for segment layers
//!
//! Markers and overlays are built from a few long-lived shapes whose
//! properties change in response to hover, drag and resize. The shapes are
//! plain data; they are drawn onto an iced canvas [`Frame`] every frame.

use crate::theme::{with_opacity, LABEL_COLOR};
use iced::alignment::{Horizontal, Vertical};
use iced::font::{self, Family, Weight};
use iced::widget::canvas::{Frame, Path, Stroke, Text};
use iced::{Color, Font, Point, Size, Vector};
use wavemark_core::config::{FontStyle, MarkerFont};

/// Approximate advance of one glyph as a fraction of the font size
///
/// Label width is estimated rather than shaped so marker layout stays
/// independent of the renderer.
pub const AVERAGE_GLYPH_WIDTH: f32 = 0.6;

/// A rectangle, optionally rounded, filled and stroked
#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f32,
    pub opacity: f32,
    pub corner_radius: f32,
    pub visible: bool,
}

impl RectShape {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: None,
            stroke: None,
            stroke_width: 0.0,
            opacity: 1.0,
            corner_radius: 0.0,
            visible: true,
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: Color, width: f32) -> Self {
        self.stroke = Some(stroke);
        self.stroke_width = width;
        self
    }

    /// Whether `point` (in the shape's parent coordinates) lies inside
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn draw(&self, frame: &mut Frame, origin: Point) {
        if !self.visible || self.width <= 0.0 || self.height <= 0.0 {
            return;
        }

        let top_left = origin + Vector::new(self.x, self.y);
        let size = Size::new(self.width, self.height);
        let path = if self.corner_radius > 0.0 {
            Path::rounded_rectangle(top_left, size, self.corner_radius.into())
        } else {
            Path::rectangle(top_left, size)
        };

        if let Some(fill) = self.fill {
            frame.fill(&path, with_opacity(fill, self.opacity));
        }
        if let Some(stroke) = self.stroke {
            frame.stroke(
                &path,
                Stroke::default()
                    .with_color(with_opacity(stroke, self.opacity))
                    .with_width(self.stroke_width),
            );
        }
    }
}

/// A single line of text anchored at its top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font: MarkerFont,
    pub fill: Color,
    pub visible: bool,
}

impl TextShape {
    pub fn new(x: f32, y: f32, text: impl Into<String>, font: MarkerFont) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            font,
            fill: LABEL_COLOR,
            visible: true,
        }
    }

    /// Rendered width in pixels
    pub fn width(&self) -> f32 {
        self.text.chars().count() as f32 * self.font.size * AVERAGE_GLYPH_WIDTH
    }

    pub fn draw(&self, frame: &mut Frame, origin: Point) {
        if !self.visible {
            return;
        }

        frame.fill_text(Text {
            content: self.text.clone(),
            position: origin + Vector::new(self.x, self.y),
            size: self.font.size.into(),
            color: self.fill,
            font: iced_font(&self.font),
            align_x: Horizontal::Left.into(),
            align_y: Vertical::Top.into(),
            ..Text::default()
        });
    }
}

fn iced_font(marker_font: &MarkerFont) -> Font {
    let family = match marker_font.family.as_str() {
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::SansSerif,
    };

    let (weight, style) = match marker_font.style {
        FontStyle::Normal => (Weight::Normal, font::Style::Normal),
        FontStyle::Bold => (Weight::Bold, font::Style::Normal),
        FontStyle::Italic => (Weight::Normal, font::Style::Italic),
    };

    Font {
        family,
        weight,
        style,
        ..Font::DEFAULT
    }
}

/// Any primitive a group can hold
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect(RectShape),
    Text(TextShape),
}

/// Index of a shape within its group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(usize);

/// A positioned container of shapes
///
/// Child coordinates are relative to the group origin, so moving a marker
/// only changes the group's `x`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub x: f32,
    pub y: f32,
    /// Whether the group follows pointer drags
    pub draggable: bool,
    shapes: Vec<Shape>,
}

impl Group {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn add(&mut self, shape: Shape) -> ShapeId {
        self.shapes.push(shape);
        ShapeId(self.shapes.len() - 1)
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn rect(&self, id: ShapeId) -> Option<&RectShape> {
        match self.shapes.get(id.0) {
            Some(Shape::Rect(rect)) => Some(rect),
            _ => None,
        }
    }

    pub fn rect_mut(&mut self, id: ShapeId) -> Option<&mut RectShape> {
        match self.shapes.get_mut(id.0) {
            Some(Shape::Rect(rect)) => Some(rect),
            _ => None,
        }
    }

    pub fn text(&self, id: ShapeId) -> Option<&TextShape> {
        match self.shapes.get(id.0) {
            Some(Shape::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, id: ShapeId) -> Option<&mut TextShape> {
        match self.shapes.get_mut(id.0) {
            Some(Shape::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Whether `point` (in parent coordinates) hits a visible rectangle
    ///
    /// Text is never a hit target.
    pub fn hit_test(&self, point: Point) -> bool {
        let local = Point::new(point.x - self.x, point.y - self.y);
        self.shapes.iter().any(|shape| match shape {
            Shape::Rect(rect) => rect.visible && rect.contains(local),
            Shape::Text(_) => false,
        })
    }

    pub fn draw(&self, frame: &mut Frame, origin: Point) {
        let origin = origin + Vector::new(self.x, self.y);
        for shape in &self.shapes {
            match shape {
                Shape::Rect(rect) => rect.draw(frame, origin),
                Shape::Text(text) => text.draw(frame, origin),
            }
        }
    }
}
