use egui::{Pos2, Rect};

/// Calculate the bounding box for a set of points, grown by `padding` on every side.
///
/// Returns [`Rect::NOTHING`] when there are no points.
pub(crate) fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding, max_y + padding),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_of_points() {
        let rect = calculate_bounds(&[Pos2::new(3.0, 8.0), Pos2::new(-1.0, 2.0)], 0.0);
        assert_eq!(rect.min, Pos2::new(-1.0, 2.0));
        assert_eq!(rect.max, Pos2::new(3.0, 8.0));
    }

    #[test]
    fn test_bounds_with_padding() {
        let rect = calculate_bounds(&[Pos2::new(10.0, 10.0)], 2.5);
        assert_eq!(rect.min, Pos2::new(7.5, 7.5));
        assert_eq!(rect.max, Pos2::new(12.5, 12.5));
    }

    #[test]
    fn test_empty_bounds() {
        assert_eq!(calculate_bounds(&[], 1.0), Rect::NOTHING);
    }
}
