use egui::{Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::error::InvalidStrokeError;
use crate::geometry;

/// How a stroke's path is painted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaintStyle {
    /// Only the outline is drawn
    #[default]
    Stroke,
    /// The area enclosed by the path is filled
    Fill,
}

/// One completed freehand gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Pos2>,
    /// Unmultiplied sRGBA, the form colors take in saved documents
    color: [u8; 4],
    width: f32,
    style: PaintStyle,
    erase: bool,
}

impl Stroke {
    /// Create a stroke. Invariants are checked by [`Stroke::validate`] when
    /// the stroke is appended to a drawing.
    pub fn new(
        points: Vec<Pos2>,
        color: Color32,
        width: f32,
        style: PaintStyle,
        erase: bool,
    ) -> Self {
        Self::from_unmultiplied(points, color.to_srgba_unmultiplied(), width, style, erase)
    }

    /// Like [`Stroke::new`], with the color given as unmultiplied sRGBA bytes
    pub fn from_unmultiplied(
        points: Vec<Pos2>,
        rgba: [u8; 4],
        width: f32,
        style: PaintStyle,
        erase: bool,
    ) -> Self {
        Self {
            points,
            color: rgba,
            width,
            style,
            erase,
        }
    }

    /// Shorthand for a regular outlined stroke
    pub fn line(points: Vec<Pos2>, color: Color32, width: f32) -> Self {
        Self::new(points, color, width, PaintStyle::Stroke, false)
    }

    /// Shorthand for an erase overlay
    pub fn eraser(points: Vec<Pos2>, width: f32) -> Self {
        Self::new(points, Color32::WHITE, width, PaintStyle::Stroke, true)
    }

    /// Check that the stroke has points, a positive width and finite coordinates
    pub fn validate(&self) -> Result<(), InvalidStrokeError> {
        if self.points.is_empty() {
            return Err(InvalidStrokeError::EmptyPoints);
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(InvalidStrokeError::NonPositiveWidth(self.width));
        }
        if let Some(index) = self
            .points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(InvalidStrokeError::NonFinitePoint { index });
        }
        Ok(())
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        let [r, g, b, a] = self.color;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn rgba_unmultiplied(&self) -> [u8; 4] {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> PaintStyle {
        self.style
    }

    pub fn is_erase(&self) -> bool {
        self.erase
    }

    /// Bounding box of the stroke's points (the painted width is not included)
    pub fn bounds(&self) -> Rect {
        geometry::calculate_bounds(&self.points, 0.0)
    }

    /// Area actually covered on screen, padded by half the stroke width
    pub fn painted_bounds(&self) -> Rect {
        geometry::calculate_bounds(&self.points, self.width / 2.0)
    }
}

/// A gesture that is still being drawn.
///
/// The input handler feeds pointer positions into the builder and calls
/// [`StrokeBuilder::finish`] once the gesture ends, so the drawing only ever
/// sees complete strokes.
#[derive(Debug, Clone)]
pub struct StrokeBuilder {
    points: Vec<Pos2>,
    color: Color32,
    width: f32,
    style: PaintStyle,
    erase: bool,
}

impl StrokeBuilder {
    pub fn new(color: Color32, width: f32) -> Self {
        Self {
            points: Vec::new(),
            color,
            width,
            style: PaintStyle::Stroke,
            erase: false,
        }
    }

    pub fn with_style(mut self, style: PaintStyle) -> Self {
        self.style = style;
        self
    }

    pub fn erasing(mut self, erase: bool) -> Self {
        self.erase = erase;
        self
    }

    pub fn add_point(&mut self, point: Pos2) {
        // Pointers often report the same position twice in a row
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    // Points collected so far, for previewing the gesture
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Turn the gesture into a validated stroke
    pub fn finish(self) -> Result<Stroke, InvalidStrokeError> {
        let stroke = Stroke::new(self.points, self.color, self.width, self.style, self.erase);
        stroke.validate()?;
        Ok(stroke)
    }
}
