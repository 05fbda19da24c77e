use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{StyleMarker, color, path_data};
use crate::drawing::Drawing;
use crate::error::MalformedDocumentError;
use crate::stroke::{PaintStyle, Stroke};

type Attributes = HashMap<String, String>;

/// Parse SVG bytes into a drawing
pub fn parse(bytes: &[u8]) -> Result<Drawing, MalformedDocumentError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| MalformedDocumentError::Xml(format!("document is not valid UTF-8: {e}")))?;
    parse_str(text)
}

/// Parse an SVG document into a drawing.
///
/// Either the whole document is understood or an error is returned; a
/// partially read drawing is never handed out.
pub fn parse_str(text: &str) -> Result<Drawing, MalformedDocumentError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut drawing: Option<Drawing> = None;
    let mut depth = 0usize;
    let mut root_closed = false;
    let mut ignored = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                visit_element(&element, depth, root_closed, &mut drawing, &mut ignored)?;
                depth += 1;
            }
            Event::Empty(element) => {
                visit_element(&element, depth, root_closed, &mut drawing, &mut ignored)?;
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::End(_) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    MalformedDocumentError::Xml("closing tag without an opening tag".to_owned())
                })?;
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::Eof => break,
            // Text, comments, declarations and processing instructions carry no strokes
            _ => {}
        }
    }

    let drawing = drawing.ok_or(MalformedDocumentError::MissingRoot)?;
    if !root_closed {
        return Err(MalformedDocumentError::UnclosedRoot);
    }
    if ignored > 0 {
        log::warn!("Ignored {ignored} unsupported elements while reading SVG");
    }
    log::debug!(
        "Parsed SVG drawing {}x{} with {} strokes",
        drawing.width(),
        drawing.height(),
        drawing.len()
    );
    Ok(drawing)
}

fn visit_element(
    element: &BytesStart<'_>,
    depth: usize,
    root_closed: bool,
    drawing: &mut Option<Drawing>,
    ignored: &mut usize,
) -> Result<(), MalformedDocumentError> {
    let name = element.local_name();
    let name = name.as_ref();

    if depth == 0 {
        if root_closed {
            return Err(MalformedDocumentError::Xml(
                "document has more than one root element".to_owned(),
            ));
        }
        if name != b"svg" {
            return Err(MalformedDocumentError::UnexpectedRoot(
                String::from_utf8_lossy(name).into_owned(),
            ));
        }
        *drawing = Some(parse_root(&attributes(element)?)?);
        return Ok(());
    }

    let Some(drawing) = drawing.as_mut() else {
        return Err(MalformedDocumentError::MissingRoot);
    };
    if name == b"path" {
        let stroke = parse_path(&attributes(element)?)?;
        drawing.append_stroke(stroke)?;
    } else {
        *ignored += 1;
    }
    Ok(())
}

fn attributes(element: &BytesStart<'_>) -> Result<Attributes, MalformedDocumentError> {
    let mut map = Attributes::new();
    for attribute in element.attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        map.insert(key, value);
    }
    Ok(map)
}

fn required<'a>(
    attributes: &'a Attributes,
    element: &'static str,
    attribute: &'static str,
) -> Result<&'a str, MalformedDocumentError> {
    attributes
        .get(attribute)
        .map(String::as_str)
        .ok_or(MalformedDocumentError::MissingAttribute { element, attribute })
}

fn invalid(attribute: &str, value: &str) -> MalformedDocumentError {
    MalformedDocumentError::InvalidAttribute {
        attribute: attribute.to_owned(),
        value: value.to_owned(),
    }
}

fn strip_px(value: &str) -> &str {
    let value = value.trim();
    value.strip_suffix("px").unwrap_or(value).trim_end()
}

fn parse_root(attributes: &Attributes) -> Result<Drawing, MalformedDocumentError> {
    let dimension = |attribute: &'static str| -> Result<u32, MalformedDocumentError> {
        let raw = required(attributes, "svg", attribute)?;
        match strip_px(raw).parse::<u32>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(invalid(attribute, raw)),
        }
    };
    let width = dimension("width")?;
    let height = dimension("height")?;

    let background = attributes
        .get("style")
        .and_then(|style| style_property(style, "background-color"))
        .and_then(|value| {
            let parsed = color::parse_hex(value);
            if parsed.is_none() {
                log::warn!("Ignoring unreadable background color {value:?}");
            }
            parsed
        })
        .unwrap_or([255; 4]); // white

    Ok(Drawing::with_unmultiplied_background(width, height, background))
}

/// Look up one property in an inline `style` declaration list
fn style_property<'a>(style: &'a str, property: &str) -> Option<&'a str> {
    style.split(';').find_map(|declaration| {
        let (key, value) = declaration.split_once(':')?;
        (key.trim() == property).then_some(value.trim())
    })
}

fn parse_path(attributes: &Attributes) -> Result<Stroke, MalformedDocumentError> {
    let points = path_data::decode(required(attributes, "path", "d")?)?;

    let raw_color = required(attributes, "path", "stroke")?;
    let color = color::parse_hex(raw_color).ok_or_else(|| invalid("stroke", raw_color))?;

    let raw_width = required(attributes, "path", "stroke-width")?;
    let width = strip_px(raw_width)
        .parse::<f32>()
        .map_err(|_| invalid("stroke-width", raw_width))?;

    let marker = attributes
        .get("class")
        .and_then(|class| class.split_whitespace().find_map(StyleMarker::from_class));
    let filled = attributes
        .get("fill")
        .is_some_and(|fill| fill.trim() != "none");
    let inferred_style = if filled {
        PaintStyle::Fill
    } else {
        PaintStyle::Stroke
    };

    let (style, erase) = match marker {
        Some(StyleMarker::Stroke) => (PaintStyle::Stroke, false),
        Some(StyleMarker::Fill) => (PaintStyle::Fill, false),
        Some(StyleMarker::Erase) => (inferred_style, true),
        None => (inferred_style, false),
    };

    let stroke = Stroke::from_unmultiplied(points, color, width, style, erase);
    stroke.validate()?;
    Ok(stroke)
}
