//! Structural checks over a segmented token stream.
//!
//! Validation only reports. Every issue found here still leaves the file
//! importable with whatever the decoders could recover.

use std::fmt;

use crate::decode::{contour, Segments};
use crate::geometry::is_closed;
use crate::lexer::{BlockKind, Token, TokenKind};

/// A structural problem found in an NC1 file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// No `ST` header block.
    MissingHeader,
    /// No `EN` end marker.
    MissingEnd,
    /// A block with no payload.
    EmptyBlock {
        /// Block keyword.
        kind: BlockKind,
        /// Line of the keyword.
        line: usize,
    },
    /// An `AK` contour whose last point does not return to the first.
    OpenContour {
        /// Line of the `AK` keyword.
        line: usize,
    },
    /// A word the lexer could not classify.
    UnknownToken {
        /// Source line.
        line: usize,
        /// Source column.
        column: usize,
        /// Source text.
        raw: String,
    },
    /// A payload token outside of any block.
    StrayToken {
        /// Source line.
        line: usize,
        /// Source text.
        raw: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHeader => write!(f, "missing {} header block", BlockKind::Header),
            Self::MissingEnd => f.write_str("missing EN end marker"),
            Self::EmptyBlock { kind, line } => write!(f, "line {line}: empty {kind} block"),
            Self::OpenContour { line } => {
                write!(f, "line {line}: external contour is not closed")
            }
            Self::UnknownToken { line, column, raw } => {
                write!(f, "line {line}, column {column}: unrecognized token '{raw}'")
            }
            Self::StrayToken { line, raw } => {
                write!(f, "line {line}: '{raw}' is outside of any block")
            }
        }
    }
}

/// Checks a tokenized file and its segmentation.
pub fn validate(tokens: &[Token], segments: &Segments<'_>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !segments.blocks.iter().any(|b| b.kind == BlockKind::Header) {
        issues.push(ValidationIssue::MissingHeader);
    }
    if !segments.has_end {
        issues.push(ValidationIssue::MissingEnd);
    }

    for block in &segments.blocks {
        if block.payload().next().is_none() {
            issues.push(ValidationIssue::EmptyBlock {
                kind: block.kind,
                line: block.line,
            });
            continue;
        }
        if block.kind == BlockKind::ExternalContour {
            let points = contour::collect(block.tokens).points();
            if points.len() >= 2 && !is_closed(&points) {
                issues.push(ValidationIssue::OpenContour { line: block.line });
            }
        }
    }

    issues.extend(
        tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Unknown)
            .map(|t| ValidationIssue::UnknownToken {
                line: t.line,
                column: t.column,
                raw: t.raw.clone(),
            }),
    );
    issues.extend(segments.stray.iter().map(|t| ValidationIssue::StrayToken {
        line: t.line,
        raw: t.raw.clone(),
    }));

    issues
}
