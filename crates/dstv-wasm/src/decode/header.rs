//! `ST` block decoder: order data and the nominal profile description.
//!
//! The header is positional. Each non-comment line is one field:
//!
//! ```text
//! ST
//! ** order, drawing, phase, piece
//!   4711
//!   Z-100
//!   1
//!   P12
//!   S235JR
//!   2
//!   HEA200
//!   I
//!   2259.98
//!   190.00
//!   200.00
//!   ...
//! ```

use serde::Serialize;

use crate::geometry::{ProfileContext, DEFAULT_PROFILE_HEIGHT, DEFAULT_PROFILE_WIDTH};
use crate::lexer::numeral::parse_numeral;
use crate::lexer::{Token, TokenKind};

/// Free-text lines that may follow the fixed fields.
pub const MAX_TEXT_LINES: usize = 4;

/// The decoded `ST` block. Fields missing from the file stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileHeader {
    /// Order identification.
    pub order: Option<String>,
    /// Drawing number.
    pub drawing: Option<String>,
    /// Phase number.
    pub phase: Option<String>,
    /// Piece identification.
    pub piece: Option<String>,
    /// Steel grade.
    pub steel_grade: Option<String>,
    /// Number of identical pieces.
    pub quantity: Option<u32>,
    /// Profile designation, e.g. `HEA200`.
    pub profile: Option<String>,
    /// Profile type code (`I`, `U`, `L`, `B`, `RU`, `RO`, `M`, `C`, `T`, `SO`).
    pub profile_code: Option<String>,
    /// Sawing length.
    pub length: Option<f64>,
    /// Profile height.
    pub height: Option<f64>,
    /// Flange width.
    pub flange_width: Option<f64>,
    /// Flange thickness.
    pub flange_thickness: Option<f64>,
    /// Web thickness.
    pub web_thickness: Option<f64>,
    /// Root radius.
    pub radius: Option<f64>,
    /// Weight per meter.
    pub weight_per_meter: Option<f64>,
    /// Paint surface per meter.
    pub paint_surface_per_meter: Option<f64>,
    /// Web start cut angle.
    pub web_start_cut: Option<f64>,
    /// Web end cut angle.
    pub web_end_cut: Option<f64>,
    /// Flange start cut angle.
    pub flange_start_cut: Option<f64>,
    /// Flange end cut angle.
    pub flange_end_cut: Option<f64>,
    /// Trailing free-text lines.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub texts: Vec<String>,
}

impl ProfileHeader {
    /// Profile dimensions described by the header.
    ///
    /// `None` unless the length is positive. A missing width or height falls
    /// back to the default dimension.
    pub fn profile_context(&self) -> Option<ProfileContext> {
        let length = self.length.filter(|l| l.is_finite() && *l > 0.0)?;
        let positive = |value: Option<f64>| value.filter(|v| v.is_finite() && *v > 0.0);
        Some(ProfileContext {
            length,
            width: positive(self.flange_width).unwrap_or(DEFAULT_PROFILE_WIDTH),
            height: positive(self.height).unwrap_or(DEFAULT_PROFILE_HEIGHT),
        })
    }
}

/// Decodes the fields of an `ST` block.
pub fn decode(tokens: &[Token]) -> ProfileHeader {
    let lines = field_lines(tokens);
    let line_count = lines.len();
    let mut fields = lines.into_iter();
    let mut text = || fields.next();

    let mut header = ProfileHeader {
        order: text(),
        drawing: text(),
        phase: text(),
        piece: text(),
        steel_grade: text(),
        ..ProfileHeader::default()
    };
    header.quantity = text().as_deref().and_then(parse_count);
    header.profile = text();
    header.profile_code = text();

    let dimensions = [
        &mut header.length,
        &mut header.height,
        &mut header.flange_width,
        &mut header.flange_thickness,
        &mut header.web_thickness,
        &mut header.radius,
        &mut header.weight_per_meter,
        &mut header.paint_surface_per_meter,
        &mut header.web_start_cut,
        &mut header.web_end_cut,
        &mut header.flange_start_cut,
        &mut header.flange_end_cut,
    ];
    for slot in dimensions {
        *slot = text().as_deref().and_then(parse_decimal);
    }

    header.texts = fields.by_ref().take(MAX_TEXT_LINES).collect();
    let ignored = fields.count();
    if ignored > 0 {
        tracing::debug!(lines = line_count, ignored, "extra header lines ignored");
    }

    header
}

/// Joins the payload tokens of each source line into one field string.
fn field_lines(tokens: &[Token]) -> Vec<String> {
    let mut lines: Vec<(usize, String)> = Vec::new();
    for token in tokens.iter().filter(|t| !t.is_structural()) {
        let word = match &token.kind {
            TokenKind::QuotedText(text) => text.as_str(),
            _ => token.raw.as_str(),
        };
        match lines.last_mut() {
            Some((line, field)) if *line == token.line => {
                field.push(' ');
                field.push_str(word);
            }
            _ => lines.push((token.line, word.to_string())),
        }
    }
    lines.into_iter().map(|(_, field)| field).collect()
}

/// Parses a header number, accepting `,` as the decimal separator.
pub fn parse_decimal(text: &str) -> Option<f64> {
    parse_numeral(&text.trim().replace(',', "."))
}

/// Parses a piece count written either as an integer or as `2.00`.
fn parse_count(text: &str) -> Option<u32> {
    let text = text.trim();
    text.parse::<u32>().ok().or_else(|| {
        let (int, frac) = text.split_once(['.', ','])?;
        frac.chars().all(|ch| ch == '0').then_some(int)?.parse::<u32>().ok()
    })
}
