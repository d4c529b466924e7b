//! Shape classification of internal contours.

use serde::Serialize;

use super::types::{BoundingBox, Point};

/// Tolerance for treating the first and last contour points as equal.
pub const CLOSURE_TOLERANCE: f64 = 0.01;
/// Tolerance for treating an edge as horizontal or vertical.
pub const AXIS_TOLERANCE: f64 = 0.01;
/// Point count of a closed rectangle (four corners plus the closing point).
pub const RECTANGLE_POINTS: usize = 5;
/// Round shapes need strictly more points than this.
pub const ROUND_MIN_POINTS: usize = 12;
/// Maximum std-dev of the centroid distance, relative to its mean, for a
/// circle. Calibrated against sample files, not taken from the format.
pub const CIRCULARITY_TOLERANCE: f64 = 0.05;
/// Exclusive bounding-box aspect ratio range of an oval.
pub const OVAL_ASPECT_RANGE: (f64, f64) = (1.2, 3.0);

/// Shape category of an internal contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContourShape {
    /// Closed, five points, all edges axis-aligned.
    Rectangular,
    /// Many points at a near-constant distance from the centroid.
    Circular,
    /// Many points, elongated bounding box.
    Oval,
    /// Anything else.
    Irregular,
}

/// Classifies a contour by its point count and geometry.
pub fn classify(points: &[Point]) -> ContourShape {
    if is_axis_aligned_rectangle(points) {
        return ContourShape::Rectangular;
    }
    if points.len() <= ROUND_MIN_POINTS {
        return ContourShape::Irregular;
    }
    if is_circular(points) {
        return ContourShape::Circular;
    }

    let bounds = BoundingBox::from_points(points);
    let (short, long) = if bounds.width() < bounds.height() {
        (bounds.width(), bounds.height())
    } else {
        (bounds.height(), bounds.width())
    };
    if short > 0.0 {
        let aspect = long / short;
        if aspect > OVAL_ASPECT_RANGE.0 && aspect < OVAL_ASPECT_RANGE.1 {
            return ContourShape::Oval;
        }
    }

    ContourShape::Irregular
}

/// Whether the first and last points coincide.
pub fn is_closed(points: &[Point]) -> bool {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => points.len() > 1 && first.approx_eq(*last, CLOSURE_TOLERANCE),
        _ => false,
    }
}

/// Closed five-point loop whose edges are all horizontal or vertical.
pub fn is_axis_aligned_rectangle(points: &[Point]) -> bool {
    points.len() == RECTANGLE_POINTS
        && is_closed(points)
        && points.windows(2).all(|edge| match edge {
            [a, b] => (a.x - b.x).abs() <= AXIS_TOLERANCE || (a.y - b.y).abs() <= AXIS_TOLERANCE,
            _ => false,
        })
}

/// Points with the closing duplicate removed.
fn distinct_points(points: &[Point]) -> &[Point] {
    if is_closed(points) {
        points.split_last().map_or(points, |(_, rest)| rest)
    } else {
        points
    }
}

#[allow(clippy::cast_precision_loss)]
fn is_circular(points: &[Point]) -> bool {
    let points = distinct_points(points);
    if points.is_empty() {
        return false;
    }
    let count = points.len() as f64;
    let cx = points.iter().map(|p| p.x).sum::<f64>() / count;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / count;

    let distances: Vec<f64> = points
        .iter()
        .map(|p| (p.x - cx).hypot(p.y - cy))
        .collect();
    let mean = distances.iter().sum::<f64>() / count;
    if mean <= 0.0 {
        return false;
    }
    let variance = distances.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / count;

    variance.sqrt() <= CIRCULARITY_TOLERANCE * mean
}
