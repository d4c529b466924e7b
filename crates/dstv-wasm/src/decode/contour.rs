//! Point accumulation shared by the `AK` and `IK` decoders.
//!
//! A contour line contributes one vertex. The first line of a contour usually
//! carries the face letter and is lexed as a face-data record; continuation
//! lines are plain numbers:
//!
//! ```text
//! AK
//!   v      0.00u     0.00     0.00
//!       2259.98     0.00     0.00
//! ```

use crate::geometry::Point;
use crate::lexer::{Face, Token, TokenKind};

/// One contour vertex with the optional third field of its line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourVertex {
    /// Vertex position.
    pub point: Point,
    /// Third numeric field (radius or depth, depending on the block).
    pub extra: Option<f64>,
}

/// Vertices of one contour block and the last face letter seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContourPoints {
    /// Face of the contour.
    pub face: Option<Face>,
    /// Vertices in source order.
    pub vertices: Vec<ContourVertex>,
}

impl ContourPoints {
    /// Vertex positions.
    pub fn points(&self) -> Vec<Point> {
        self.vertices.iter().map(|v| v.point).collect()
    }
}

/// Collects the contour vertices of a block's tokens.
///
/// Face-data records with at least two values and lines holding at least two
/// plain numbers each give one vertex; anything shorter is skipped.
pub fn collect(tokens: &[Token]) -> ContourPoints {
    let mut contour = ContourPoints::default();
    let mut pending: Vec<f64> = Vec::new();
    let mut pending_line = 0;

    for token in tokens {
        match &token.kind {
            TokenKind::FaceData(data) => {
                flush(&mut contour, &mut pending);
                contour.face = Some(data.face);
                push_vertex(&mut contour, &data.values);
            }
            _ => {
                let Some(value) = token.number() else {
                    continue;
                };
                if token.line != pending_line {
                    flush(&mut contour, &mut pending);
                    pending_line = token.line;
                }
                pending.push(value);
            }
        }
    }
    flush(&mut contour, &mut pending);

    contour
}

fn flush(contour: &mut ContourPoints, pending: &mut Vec<f64>) {
    push_vertex(contour, pending);
    pending.clear();
}

fn push_vertex(contour: &mut ContourPoints, values: &[f64]) {
    if let [x, y, rest @ ..] = values {
        contour.vertices.push(ContourVertex {
            point: Point::new(*x, *y),
            extra: rest.first().copied(),
        });
    } else if !values.is_empty() {
        tracing::trace!(fields = values.len(), "contour line too short, skipped");
    }
}
