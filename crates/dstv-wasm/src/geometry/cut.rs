//! Cut regions: polygons of material to remove from the profile solid.

use serde::Serialize;

use super::classify::{is_closed, ContourShape};
use super::types::{BoundingBox, Point};
use crate::lexer::Face;

/// Depth sentinel meaning the cut goes through the material.
pub const THROUGH_DEPTH: f64 = -1.0;

/// A closed polygon the downstream modeler subtracts from the profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutRegion {
    /// Face the contour was described on.
    pub face: Option<Face>,
    /// Closed polygon, first point repeated at the end.
    pub contour: Vec<Point>,
    /// Cut depth, or [`THROUGH_DEPTH`].
    pub depth: f64,
    /// Cut near either end of the profile, or a through-cut.
    pub is_transverse: bool,
    /// Opening cut from an internal contour rather than a boundary trim.
    pub is_internal: bool,
    /// Shape category, internal cuts only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ContourShape>,
}

impl CutRegion {
    /// External cut covering `rect`, as a closed five-point loop.
    pub fn rectangle(face: Option<Face>, rect: &BoundingBox, depth: f64, is_transverse: bool) -> Self {
        Self {
            face,
            contour: rectangle_loop(rect),
            depth,
            is_transverse,
            is_internal: false,
            shape: None,
        }
    }

    /// Whether the cut goes through the material.
    pub fn is_through(&self) -> bool {
        (self.depth - THROUGH_DEPTH).abs() < f64::EPSILON
    }

    /// Bounding box of the contour.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(&self.contour)
    }
}

/// Counter-clockwise loop around `rect`, closed by repeating the first corner.
pub fn rectangle_loop(rect: &BoundingBox) -> Vec<Point> {
    vec![
        Point::new(rect.min_x, rect.min_y),
        Point::new(rect.max_x, rect.min_y),
        Point::new(rect.max_x, rect.max_y),
        Point::new(rect.min_x, rect.max_y),
        Point::new(rect.min_x, rect.min_y),
    ]
}

/// Returns `points` with the first point appended when the loop is open.
pub fn close_loop(mut points: Vec<Point>) -> Vec<Point> {
    if !is_closed(&points) {
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
    }
    points
}
