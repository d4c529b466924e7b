//! `IK` block decoder: openings cut inside a face.

use super::contour;
use crate::geometry::{
    classify, close_loop, BoundingBox, ContourShape, CutRegion, Point, THROUGH_DEPTH,
};
use crate::lexer::Token;

/// Depth of an internal cut when nothing else applies.
pub const DEFAULT_INTERNAL_DEPTH: f64 = 10.0;
/// Depth of circular and oval openings.
pub const ROUND_OPENING_DEPTH: f64 = 15.0;
/// Bounding-box area above which an opening is treated as a through-cut
/// (roughly a 100 × 100 region). Calibrated against sample files.
pub const THROUGH_AREA_THRESHOLD: f64 = 10_000.0;

/// Decodes the internal contour of an `IK` block into one cut region.
///
/// Contours with fewer than three points yield nothing. The shape is
/// classified on the points as written; the emitted contour is then closed
/// by repeating the first point.
pub fn decode(tokens: &[Token]) -> Vec<CutRegion> {
    let points = contour::collect(tokens);
    if points.vertices.len() < 3 {
        if !points.vertices.is_empty() {
            tracing::debug!(
                points = points.vertices.len(),
                "internal contour too short, skipped"
            );
        }
        return Vec::new();
    }

    let explicit_depth = points
        .vertices
        .iter()
        .filter_map(|v| v.extra)
        .filter(|depth| *depth > 0.0)
        .reduce(f64::max);

    let read = points.points();
    let shape = classify(&read);
    let contour = close_loop(read);
    let depth = explicit_depth.unwrap_or_else(|| heuristic_depth(shape, &contour));

    tracing::debug!(?shape, depth, points = contour.len(), "internal contour decoded");

    vec![CutRegion {
        face: points.face,
        contour,
        depth,
        is_transverse: (depth - THROUGH_DEPTH).abs() < f64::EPSILON,
        is_internal: true,
        shape: Some(shape),
    }]
}

/// Depth implied by the opening's shape and size.
///
/// Round openings take precedence over the through-cut area rule.
pub fn heuristic_depth(shape: ContourShape, contour: &[Point]) -> f64 {
    match shape {
        ContourShape::Circular | ContourShape::Oval => ROUND_OPENING_DEPTH,
        ContourShape::Rectangular | ContourShape::Irregular => {
            if BoundingBox::from_points(contour).area() > THROUGH_AREA_THRESHOLD {
                THROUGH_DEPTH
            } else {
                DEFAULT_INTERNAL_DEPTH
            }
        }
    }
}
