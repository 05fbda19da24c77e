use egui::{Color32, Rect};
use serde::{Deserialize, Serialize};

use crate::error::InvalidStrokeError;
use crate::stroke::Stroke;

/// Canvas size used when no explicit size is given
pub const DEFAULT_CANVAS_SIZE: [u32; 2] = [1080, 1920];

/// Everything drawn during one canvas session.
///
/// Strokes are kept in insertion order: later strokes render on top of
/// (or erase) earlier ones. The drawing is the only owner of its strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    width: u32,
    height: u32,
    /// Unmultiplied sRGBA
    background: [u8; 4],
    strokes: Vec<Stroke>,
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_SIZE[0], DEFAULT_CANVAS_SIZE[1])
    }
}

impl Drawing {
    /// Create an empty drawing with a white background.
    ///
    /// Zero dimensions are clamped to one unit so the canvas is never empty.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Color32::WHITE)
    }

    pub fn with_background(width: u32, height: u32, background: Color32) -> Self {
        Self::with_unmultiplied_background(width, height, background.to_srgba_unmultiplied())
    }

    /// Like [`Drawing::with_background`], with the color given as unmultiplied sRGBA bytes
    pub fn with_unmultiplied_background(width: u32, height: u32, background: [u8; 4]) -> Self {
        if width == 0 || height == 0 {
            log::warn!("Canvas size {width}x{height} has an empty side, using at least 1x1");
        }
        Self {
            width: width.max(1),
            height: height.max(1),
            background,
            strokes: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width, self.height]
    }

    /// Color that erase overlays are painted with
    pub fn background(&self) -> Color32 {
        let [r, g, b, a] = self.background;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn background_unmultiplied(&self) -> [u8; 4] {
        self.background
    }

    /// Add a finished stroke on top of everything drawn so far.
    ///
    /// The drawing is left untouched if the stroke is invalid.
    pub fn append_stroke(&mut self, stroke: Stroke) -> Result<(), InvalidStrokeError> {
        stroke.validate()?;
        self.strokes.push(stroke);
        Ok(())
    }

    /// Remove every stroke. The canvas size and background are kept.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// Replace the whole drawing, e.g. after opening a file
    pub fn replace_with(&mut self, other: Drawing) {
        *self = other;
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stroke> {
        self.strokes.iter()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Total number of points over all strokes
    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(|s| s.points().len()).sum()
    }

    /// Box enclosing every stroke point, or [`Rect::NOTHING`] for an empty drawing
    pub fn bounds(&self) -> Rect {
        self.strokes
            .iter()
            .fold(Rect::NOTHING, |acc, stroke| acc.union(stroke.bounds()))
    }

    /// Check every stroke, used when a drawing comes from an untrusted source
    pub fn validate(&self) -> Result<(), InvalidStrokeError> {
        self.strokes.iter().try_for_each(Stroke::validate)
    }
}

impl<'a> IntoIterator for &'a Drawing {
    type Item = &'a Stroke;
    type IntoIter = std::slice::Iter<'a, Stroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.strokes.iter()
    }
}
