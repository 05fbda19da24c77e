use std::fmt::Write;

use super::{SVG_NAMESPACE, StyleMarker, color, path_data};
use crate::drawing::Drawing;
use crate::stroke::{PaintStyle, Stroke};

/// Serialize a drawing into SVG bytes, ready to be handed to the file layer
pub fn serialize(drawing: &Drawing) -> Vec<u8> {
    to_string(drawing).into_bytes()
}

/// Serialize a drawing into an SVG document.
///
/// The output only depends on the drawing, so the same drawing always
/// produces the same bytes.
pub fn to_string(drawing: &Drawing) -> String {
    let background = color::to_hex(drawing.background_unmultiplied());
    let (width, height) = (drawing.width(), drawing.height());

    let mut svg = String::with_capacity(256 + drawing.len() * 160 + drawing.point_count() * 16);
    let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#);
    let _ = writeln!(
        svg,
        r#"<svg xmlns="{SVG_NAMESPACE}" version="1.1" width="{width}" height="{height}" viewBox="0 0 {width} {height}" style="background-color:{background}">"#
    );

    for stroke in drawing {
        write_path(&mut svg, stroke, &background);
    }

    svg.push_str("</svg>\n");

    log::debug!(
        "Serialized {} strokes ({} points) into {} bytes of SVG",
        drawing.len(),
        drawing.point_count(),
        svg.len()
    );
    svg
}

fn write_path(svg: &mut String, stroke: &Stroke, background: &str) {
    let marker = StyleMarker::of(stroke);
    let color = color::to_hex(stroke.rgba_unmultiplied());
    let fill = match (stroke.style(), stroke.is_erase()) {
        (PaintStyle::Stroke, _) => "none",
        (PaintStyle::Fill, false) => color.as_str(),
        (PaintStyle::Fill, true) => background,
    };

    let _ = write!(
        svg,
        r#"  <path class="{}" d="{}" stroke="{color}" stroke-width="{}" fill="{fill}" stroke-linecap="round" stroke-linejoin="round""#,
        marker.as_str(),
        path_data::encode(stroke.points()),
        stroke.width(),
    );

    // The style property wins over the `stroke` attribute when rendering, so
    // viewers paint the overlay in the background color while the stroke's
    // own color is still recorded.
    if stroke.is_erase() {
        match stroke.style() {
            PaintStyle::Stroke => {
                let _ = write!(svg, r#" style="stroke:{background}""#);
            }
            PaintStyle::Fill => {
                let _ = write!(svg, r#" style="stroke:{background};fill:{background}""#);
            }
        }
    }

    svg.push_str("/>\n");
}
