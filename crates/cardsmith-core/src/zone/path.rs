//! Normalized path data for `PATH` zones.

use kurbo::{BezPath, Point, Rect};
use thiserror::Error;

/// Extent given to a collapsed polyline axis, in canvas pixels.
const MIN_PATH_EXTENT: f64 = 1.0;

/// Path data errors.
#[derive(Debug, Error, PartialEq)]
pub enum PathError {
    #[error("Path data is empty")]
    Empty,
    #[error("Invalid path data: {0}")]
    Parse(String),
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Encode a polyline as `M x y L x y ...`. Needs at least two points.
pub fn polyline_to_path_data(points: &[Point]) -> Option<String> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut data = format!("M {} {}", round2(first.x), round2(first.y));
    for p in rest {
        data.push_str(&format!(" L {} {}", round2(p.x), round2(p.y)));
    }
    Some(data)
}

/// Compute the bounding box of a polyline and map its points into the box's
/// 0–100 space.
///
/// A collapsed axis (a perfectly horizontal or vertical stroke) is widened to
/// `MIN_PATH_EXTENT` around the stroke so the box never has zero extent.
pub fn normalize_polyline(points: &[Point]) -> Option<(Rect, Vec<Point>)> {
    let first = points.first()?;
    let mut bounds = Rect::from_points(*first, *first);
    for p in &points[1..] {
        bounds = bounds.union_pt(*p);
    }
    if bounds.width() < f64::EPSILON {
        bounds.x0 -= MIN_PATH_EXTENT / 2.0;
        bounds.x1 = bounds.x0 + MIN_PATH_EXTENT;
    }
    if bounds.height() < f64::EPSILON {
        bounds.y0 -= MIN_PATH_EXTENT / 2.0;
        bounds.y1 = bounds.y0 + MIN_PATH_EXTENT;
    }
    let normalized = points
        .iter()
        .map(|p| {
            Point::new(
                (p.x - bounds.x0) / bounds.width() * 100.0,
                (p.y - bounds.y0) / bounds.height() * 100.0,
            )
        })
        .collect();
    Some((bounds, normalized))
}

/// Parse SVG-like path data.
pub fn parse_path_data(data: &str) -> Result<BezPath, PathError> {
    if data.trim().is_empty() {
        return Err(PathError::Empty);
    }
    BezPath::from_svg(data).map_err(|e| PathError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_needs_two_points() {
        assert!(polyline_to_path_data(&[]).is_none());
        assert!(polyline_to_path_data(&[Point::new(1.0, 1.0)]).is_none());
        let data = polyline_to_path_data(&[Point::new(0.0, 0.0), Point::new(50.0, 100.0)]).unwrap();
        assert_eq!(data, "M 0 0 L 50 100");
    }

    #[test]
    fn test_normalize_polyline() {
        let (bounds, pts) =
            normalize_polyline(&[Point::new(10.0, 20.0), Point::new(30.0, 60.0)]).unwrap();
        assert_eq!(bounds, Rect::new(10.0, 20.0, 30.0, 60.0));
        assert_eq!(pts, vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)]);
    }

    #[test]
    fn test_normalize_horizontal_stroke() {
        let (bounds, pts) =
            normalize_polyline(&[Point::new(10.0, 20.0), Point::new(30.0, 20.0)]).unwrap();
        assert!((bounds.height() - MIN_PATH_EXTENT).abs() < 1e-9);
        assert!((pts[0].y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_collapsed_axis_widens_in_pixels() {
        let (bounds, _) =
            normalize_polyline(&[Point::new(240.0, 80.0), Point::new(240.0, 300.0)]).unwrap();
        assert_eq!((bounds.x0, bounds.x1), (239.5, 240.5));
        assert_eq!((bounds.y0, bounds.y1), (80.0, 300.0));
    }

    #[test]
    fn test_parse_path_data() {
        let path = parse_path_data("M 0 0 L 100 100").unwrap();
        assert_eq!(path.elements().len(), 2);
        assert_eq!(parse_path_data("  "), Err(PathError::Empty));
        assert!(matches!(parse_path_data("M 0 0 K 10 10"), Err(PathError::Parse(_))));
    }
}
