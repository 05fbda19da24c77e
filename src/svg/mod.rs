//! SVG import and export of drawings.
//!
//! A drawing becomes an `<svg>` root sized to the canvas with one `<path>`
//! per stroke, in drawing order. Parsing reverses this and tolerates
//! attributes and elements it does not know about.

mod color;
mod parser;
mod path_data;
mod writer;

pub use parser::{parse, parse_str};
pub use writer::{serialize, to_string};

/// Namespace declared on the root element
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Value of a path's `class` attribute, telling apart how the stroke is replayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleMarker {
    /// Regular outlined stroke
    Stroke,
    /// Filled shape
    Fill,
    /// Erase overlay painted in the background color
    Erase,
}

impl StyleMarker {
    pub fn of(stroke: &crate::Stroke) -> Self {
        if stroke.is_erase() {
            StyleMarker::Erase
        } else {
            match stroke.style() {
                crate::PaintStyle::Stroke => StyleMarker::Stroke,
                crate::PaintStyle::Fill => StyleMarker::Fill,
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StyleMarker::Stroke => "stroke",
            StyleMarker::Fill => "fill",
            StyleMarker::Erase => "erase",
        }
    }

    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "stroke" => Some(StyleMarker::Stroke),
            "fill" => Some(StyleMarker::Fill),
            "erase" => Some(StyleMarker::Erase),
            _ => None,
        }
    }
}
