//! `BO` block decoder.

use serde::Serialize;

use crate::lexer::numeral::numeral_prefix_len;
use crate::lexer::{Face, HoleModifier, HoleType, Token};

/// Minimum numeric fields of a hole record: x, y, diameter.
const MIN_HOLE_FIELDS: usize = 3;

/// A hole from a `BO` block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hole {
    /// X coordinate of the hole center.
    pub x: f64,
    /// Y coordinate of the hole center.
    pub y: f64,
    /// Hole diameter, always positive.
    pub diameter: f64,
    /// Face letter as written; interpretation is left to the caller.
    pub face: Face,
    /// Hole depth, 0 when not given.
    pub depth: f64,
    /// Hole type, when the diameter carried a hole-type suffix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole_type: Option<HoleType>,
}

/// Decodes the holes of a `BO` block.
///
/// Numbers are re-read from each face-data token's raw text rather than
/// taken from the lexer. Records with fewer than three values or a
/// non-positive diameter are skipped.
pub fn decode(tokens: &[Token]) -> Vec<Hole> {
    tokens
        .iter()
        .filter_map(|token| {
            let data = token.face_data()?;
            let values = extract_values(&token.raw);
            if values.len() < MIN_HOLE_FIELDS {
                if !values.is_empty() {
                    tracing::debug!(
                        line = token.line,
                        fields = values.len(),
                        "hole record too short, skipped"
                    );
                }
                return None;
            }
            let [x, y, diameter, rest @ ..] = values.as_slice() else {
                return None;
            };
            let hole = Hole {
                x: *x,
                y: *y,
                diameter: *diameter,
                face: data.face,
                depth: rest.first().copied().unwrap_or(0.0),
                hole_type: data.hole_type,
            };
            if hole.diameter <= 0.0 {
                tracing::debug!(
                    line = token.line,
                    diameter = hole.diameter,
                    "non-positive hole diameter, skipped"
                );
                return None;
            }
            Some(hole)
        })
        .collect()
}

/// Reads the plain numeric fields of a raw hole line.
///
/// The leading face letter is dropped (a numeral attached to it is kept),
/// each word contributes its leading numeral, and the two slot fields after
/// a slotted diameter are left out.
pub fn extract_values(raw: &str) -> Vec<f64> {
    let mut values = Vec::new();
    let mut words = raw.split_whitespace();

    if let Some(first) = words.next() {
        let attached = first
            .char_indices()
            .nth(1)
            .and_then(|(idx, _)| first.get(idx..));
        if let Some(value) = attached.and_then(leading_value) {
            values.push(value);
        }
    }

    while let Some(word) = words.next() {
        let Some(value) = leading_value(word) else {
            continue;
        };
        values.push(value);
        if word.ends_with(HoleModifier::Slotted.letter()) {
            words.next();
            words.next();
        }
    }

    values
}

fn leading_value(word: &str) -> Option<f64> {
    let len = numeral_prefix_len(word)?;
    word.get(..len)?.parse::<f64>().ok()
}
