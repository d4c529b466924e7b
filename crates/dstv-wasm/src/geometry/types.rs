//! Core geometry types: points, bounding boxes, and the profile envelope.

use serde::{Deserialize, Serialize};

use crate::error::Nc1Error;
use crate::lexer::Face;

/// Default profile length used when neither the caller nor the header
/// supplies one.
pub const DEFAULT_PROFILE_LENGTH: f64 = 2000.0;
/// Default profile (flange) width.
pub const DEFAULT_PROFILE_WIDTH: f64 = 300.0;
/// Default profile (web) height.
pub const DEFAULT_PROFILE_HEIGHT: f64 = 150.0;

/// 2D point in face coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// X coordinate (along the profile length).
    pub x: f64,
    /// Y coordinate (across the face).
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `true` when both coordinates differ by at most `tolerance`.
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    /// Minimum X coordinate.
    pub min_x: f64,
    /// Minimum Y coordinate.
    pub min_y: f64,
    /// Maximum X coordinate.
    pub max_x: f64,
    /// Maximum Y coordinate.
    pub max_y: f64,
}

impl BoundingBox {
    /// Creates an empty bounding box that will expand with the first `update` call.
    pub const fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Bounding box of a point set. Empty input yields an empty box.
    pub fn from_points(points: &[Point]) -> Self {
        let mut bounds = Self::new();
        for p in points {
            bounds.update(p.x, p.y);
        }
        bounds
    }

    /// Expands the bounding box to include the given point.
    pub fn update(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Returns `true` if no point has been added yet.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Extent along X, zero for an empty box.
    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    /// Extent along Y, zero for an empty box.
    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }

    /// Box area, zero for an empty box.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

/// Nominal dimensions of the profile being imported.
///
/// Supplied by the caller, derived from the `ST` header, or defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileContext {
    /// Profile length along X.
    pub length: f64,
    /// Flange width (cross dimension of the `o` and `u` faces).
    pub width: f64,
    /// Profile height (cross dimension of the `v` face).
    pub height: f64,
}

impl ProfileContext {
    /// Checks that every dimension is finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`Nc1Error::InvalidProfile`] naming the first bad dimension.
    pub fn validate(&self) -> Result<(), Nc1Error> {
        for (name, value) in [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Nc1Error::InvalidProfile(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Cross dimension of the given face.
    ///
    /// Flanges use the width, the web uses the height, anything else the
    /// larger of the two.
    pub fn cross_dimension(&self, face: Option<Face>) -> f64 {
        match face {
            Some(Face::Top | Face::Bottom) => self.width,
            Some(Face::Web) => self.height,
            Some(Face::Front) | None => self.width.max(self.height),
        }
    }
}

impl Default for ProfileContext {
    fn default() -> Self {
        Self {
            length: DEFAULT_PROFILE_LENGTH,
            width: DEFAULT_PROFILE_WIDTH,
            height: DEFAULT_PROFILE_HEIGHT,
        }
    }
}

/// Uncut rectangular envelope of one face: `[0, length] × [0, cross]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceRect {
    /// Left edge.
    pub min_x: f64,
    /// Right edge (profile length).
    pub max_x: f64,
    /// Bottom edge.
    pub min_y: f64,
    /// Top edge (face cross dimension).
    pub max_y: f64,
}

impl ReferenceRect {
    /// Reference rectangle with the given length and cross dimension.
    pub const fn new(length: f64, cross: f64) -> Self {
        Self {
            min_x: 0.0,
            max_x: length,
            min_y: 0.0,
            max_y: cross,
        }
    }

    /// Reference rectangle of `face` for the given profile.
    pub fn for_face(face: Option<Face>, profile: &ProfileContext) -> Self {
        Self::new(profile.length, profile.cross_dimension(face))
    }

    /// Length along X.
    pub fn length(&self) -> f64 {
        self.max_x - self.min_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_from_points() {
        let bounds = BoundingBox::from_points(&[
            Point::new(1.0, 2.0),
            Point::new(-3.0, 4.0),
            Point::new(0.5, -1.0),
        ]);
        assert!((bounds.min_x - (-3.0)).abs() < f64::EPSILON);
        assert!((bounds.max_x - 1.0).abs() < f64::EPSILON);
        assert!((bounds.min_y - (-1.0)).abs() < f64::EPSILON);
        assert!((bounds.max_y - 4.0).abs() < f64::EPSILON);
        assert!((bounds.area() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_bounding_box_has_zero_extent() {
        let bounds = BoundingBox::from_points(&[]);
        assert!(bounds.is_empty());
        assert!(bounds.width().abs() < f64::EPSILON);
        assert!(bounds.area().abs() < f64::EPSILON);
    }

    #[test]
    fn cross_dimension_depends_on_face() {
        let profile = ProfileContext {
            length: 1000.0,
            width: 200.0,
            height: 400.0,
        };
        assert!((profile.cross_dimension(Some(Face::Top)) - 200.0).abs() < f64::EPSILON);
        assert!((profile.cross_dimension(Some(Face::Bottom)) - 200.0).abs() < f64::EPSILON);
        assert!((profile.cross_dimension(Some(Face::Web)) - 400.0).abs() < f64::EPSILON);
        assert!((profile.cross_dimension(Some(Face::Front)) - 400.0).abs() < f64::EPSILON);
        assert!((profile.cross_dimension(None) - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn default_profile_context() {
        let profile = ProfileContext::default();
        assert!((profile.length - 2000.0).abs() < f64::EPSILON);
        assert!((profile.width - 300.0).abs() < f64::EPSILON);
        assert!((profile.height - 150.0).abs() < f64::EPSILON);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn bc_profile_rejects_non_positive_dimensions() {
        let profile = ProfileContext {
            length: 0.0,
            ..ProfileContext::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(Nc1Error::InvalidProfile(msg)) if msg.contains("length")
        ));

        let profile = ProfileContext {
            height: f64::NAN,
            ..ProfileContext::default()
        };
        assert!(profile.validate().is_err());
    }
}
