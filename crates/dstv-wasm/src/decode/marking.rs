//! `SI` block decoder: engraved or printed text.

use serde::Serialize;

use crate::lexer::{Face, Token, TokenKind};

/// Letter height used when the block does not give one.
pub const DEFAULT_MARKING_SIZE: f64 = 10.0;
/// Separator between the letter height and the text in `<digits>r<text>`.
const SIZE_SEPARATOR: char = 'r';
/// Unit words that may follow a coordinate.
const UNIT_MARKERS: [&str; 2] = ["u", "mm"];

/// A marking from an `SI` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marking {
    /// Text to mark.
    pub text: String,
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Letter height.
    pub size: f64,
    /// Rotation in degrees.
    pub angle: f64,
    /// Marking depth, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    /// Font style, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    /// Text alignment, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    /// Face the marking is applied to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face: Option<Face>,
}

#[derive(Debug, Default)]
struct MarkingState {
    face: Option<Face>,
    values: Vec<f64>,
    text: Option<String>,
    size: Option<f64>,
}

impl MarkingState {
    fn take_text(&mut self, word: &str) {
        if let Some((size, text)) = split_size_prefix(word) {
            self.size = Some(size);
            if !text.is_empty() {
                self.text = Some(text.to_string());
            }
        } else if UNIT_MARKERS.contains(&word) {
            tracing::trace!(unit = word, "unit marker discarded");
        } else if self.text.is_none() {
            self.text = Some(word.to_string());
        }
    }
}

/// Decodes the marking of an `SI` block.
///
/// The position is read from the first and third numbers; the second number
/// repeats the first in the files seen so far and is not used. Only the first
/// face letter sets the face; a later bare `u` is a unit marker and any other
/// later bare face letter is ignored.
pub fn decode(tokens: &[Token]) -> Vec<Marking> {
    let mut state = MarkingState::default();

    for token in tokens {
        match &token.kind {
            TokenKind::FaceData(data) => {
                match state.face {
                    None => state.face = Some(data.face),
                    Some(_) if !data.values.is_empty() => {}
                    Some(_) if data.face == Face::Bottom => {
                        tracing::trace!(unit = %token.raw, "unit marker discarded");
                    }
                    Some(_) => {
                        tracing::trace!(letter = %token.raw, "later face letter ignored");
                    }
                }
                state.values.extend_from_slice(&data.values);
            }
            TokenKind::Number(_) => state.values.extend(token.number()),
            TokenKind::QuotedText(text) => state.take_text(text),
            TokenKind::Identifier | TokenKind::Unknown => state.take_text(&token.raw),
            _ => {}
        }
    }

    let has_text = state.text.as_deref().is_some_and(|t| !t.is_empty());
    if !has_text && state.values.len() < 2 {
        return Vec::new();
    }

    let value = |idx: usize| state.values.get(idx).copied().unwrap_or(0.0);
    vec![Marking {
        x: value(0),
        y: value(2),
        angle: value(3),
        size: state.size.unwrap_or(DEFAULT_MARKING_SIZE),
        text: state.text.clone().unwrap_or_default(),
        depth: None,
        font_style: None,
        alignment: None,
        face: state.face,
    }]
}

/// Splits `<digits>r<text>` into the letter height and the text.
pub fn split_size_prefix(word: &str) -> Option<(f64, &str)> {
    let (digits, text) = word.split_once(SIZE_SEPARATOR)?;
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    let size = digits.parse::<f64>().ok()?;
    Some((size, text))
}
