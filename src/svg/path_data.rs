//! Polyline geometry as SVG path data (`d` attribute).
//!
//! Only move-to and line-to are produced or accepted. A stroke is a single
//! polyline, so a path holds exactly one move-to at its start.

use std::fmt::Write;

use egui::{Pos2, Vec2};

use crate::error::MalformedDocumentError;

/// Encode points as `M x y L x y ...`.
///
/// Coordinates use the shortest representation that reads back to the same
/// `f32`, which keeps the output deterministic.
pub(crate) fn encode(points: &[Pos2]) -> String {
    let mut d = String::with_capacity(points.len() * 12);
    for (i, point) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        if i > 0 {
            d.push(' ');
        }
        let _ = write!(d, "{command}{} {}", point.x, point.y);
    }
    d
}

/// Decode path data back into the polyline's points
pub(crate) fn decode(d: &str) -> Result<Vec<Pos2>, MalformedDocumentError> {
    let mut scanner = Scanner::new(d);
    let mut points: Vec<Pos2> = Vec::new();
    let mut command: Option<u8> = None;

    loop {
        scanner.skip_separators();
        let Some(next) = scanner.peek() else {
            break;
        };

        if next.is_ascii_alphabetic() {
            scanner.advance();
            match next {
                b'M' | b'm' if !points.is_empty() => {
                    return Err(invalid("path has more than one move-to"));
                }
                b'L' | b'l' if points.is_empty() => {
                    return Err(invalid("path must start with a move-to"));
                }
                b'M' | b'm' | b'L' | b'l' => {}
                other => return Err(MalformedDocumentError::UnsupportedCommand(other as char)),
            }
            command = Some(next);
        }

        let Some(current_command) = command else {
            return Err(invalid("path data must start with a command"));
        };

        let offset = Vec2::new(scanner.number()?, scanner.number()?);
        let point = if current_command.is_ascii_lowercase() {
            // Relative to the previous point, or to the origin for a leading `m`
            points.last().copied().unwrap_or(Pos2::ZERO) + offset
        } else {
            offset.to_pos2()
        };
        points.push(point);

        // Coordinates repeated after a move-to are implicit line-tos
        command = match current_command {
            b'M' => Some(b'L'),
            b'm' => Some(b'l'),
            other => Some(other),
        };
    }

    if points.is_empty() {
        return Err(invalid("path has no coordinates"));
    }
    Ok(points)
}

fn invalid(message: &str) -> MalformedDocumentError {
    MalformedDocumentError::InvalidPathData(message.to_owned())
}

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_separators(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b',' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.advance();
        }
        self.pos - start
    }

    fn number(&mut self) -> Result<f32, MalformedDocumentError> {
        self.skip_separators();
        let start = self.pos;

        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.advance();
        }
        let mut digits = self.skip_digits();
        if self.peek() == Some(b'.') {
            self.advance();
            digits += self.skip_digits();
        }
        if digits == 0 {
            return Err(match self.peek() {
                Some(_) => invalid(&format!("expected a number at offset {start}")),
                None => invalid("path data ends in the middle of a coordinate pair"),
            });
        }

        // Only consume an exponent when digits follow it
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some(b'+' | b'-')));
            if self.peek_at(1 + sign).is_some_and(|b| b.is_ascii_digit()) {
                self.pos += 1 + sign;
                self.skip_digits();
            }
        }

        let literal = &self.text[start..self.pos];
        literal
            .parse::<f32>()
            .map_err(|_| invalid(&format!("invalid number {literal:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_polyline() {
        let points = [Pos2::new(10.0, 10.0), Pos2::new(20.5, 20.0), Pos2::new(-3.25, 0.1)];
        assert_eq!(encode(&points), "M10 10 L20.5 20 L-3.25 0.1");
    }

    #[test]
    fn test_encode_single_point() {
        assert_eq!(encode(&[Pos2::new(1.0, 2.0)]), "M1 2");
    }

    #[test]
    fn test_decode_own_output() {
        let points = vec![Pos2::new(0.1, 0.2), Pos2::new(1e-7, 123456.78), Pos2::new(-5.0, 3.0)];
        assert_eq!(decode(&encode(&points)).unwrap(), points);
    }

    #[test]
    fn test_decode_compact_syntax() {
        let points = decode("M1,2L3-4 5e1,6").unwrap();
        assert_eq!(
            points,
            vec![Pos2::new(1.0, 2.0), Pos2::new(3.0, -4.0), Pos2::new(50.0, 6.0)]
        );
    }

    #[test]
    fn test_decode_implicit_and_relative() {
        let points = decode("m 10 10 5 0 l 0 5").unwrap();
        assert_eq!(
            points,
            vec![Pos2::new(10.0, 10.0), Pos2::new(15.0, 10.0), Pos2::new(15.0, 15.0)]
        );
    }

    #[test]
    fn test_rejects_curves_and_close() {
        assert_eq!(
            decode("M0 0 C1 1 2 2 3 3"),
            Err(MalformedDocumentError::UnsupportedCommand('C'))
        );
        assert_eq!(
            decode("M0 0 L1 1 Z"),
            Err(MalformedDocumentError::UnsupportedCommand('Z'))
        );
    }

    #[test]
    fn test_rejects_bad_structure() {
        assert!(decode("").is_err());
        assert!(decode("L1 1").is_err());
        assert!(decode("1 1").is_err());
        assert!(decode("M0 0 M1 1").is_err());
        assert!(decode("M0").is_err());
        assert!(decode("M0 0 L1 x").is_err());
    }
}
