//! One-shot import of an NC1 file: lexing, segmentation, decoding and
//! validation combined into a single [`Nc1Document`].

use serde::Serialize;

use crate::decode::header::{self, ProfileHeader};
use crate::decode::holes::{self, Hole};
use crate::decode::marking::{self, Marking};
use crate::decode::{external, internal, segment, Block};
use crate::geometry::{CutRegion, ProfileContext};
use crate::lexer::{tokenize, BlockKind, Token};
use crate::validate::{validate, ValidationIssue};

/// Where the profile dimensions used for contour reconstruction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSource {
    /// Supplied by the caller.
    Caller,
    /// Read from the `ST` header.
    Header,
    /// Built-in defaults.
    Default,
}

/// Outcome of one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecodedBlock {
    /// Block keyword.
    pub kind: BlockKind,
    /// Line of the keyword.
    pub line: usize,
    /// Number of records the block produced.
    pub records: usize,
    /// Whether the block kind has a decoder.
    pub decoded: bool,
}

/// Everything recovered from one NC1 file.
#[derive(Debug, Clone, Serialize)]
pub struct Nc1Document {
    /// The first `ST` block, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<ProfileHeader>,
    /// Profile dimensions used to reconstruct external contours.
    pub profile: ProfileContext,
    /// Origin of [`Self::profile`].
    pub profile_source: ProfileSource,
    /// Blocks in source order.
    pub blocks: Vec<DecodedBlock>,
    /// Holes of every `BO` block.
    pub holes: Vec<Hole>,
    /// Cuts of every `AK` and `IK` block.
    pub cuts: Vec<CutRegion>,
    /// Markings of every `SI` block.
    pub markings: Vec<Marking>,
    /// Structural issues found by the validator.
    #[serde(skip)]
    pub issues: Vec<ValidationIssue>,
    /// Human-readable diagnostics.
    pub warnings: Vec<String>,
    /// The token stream the document was decoded from.
    #[serde(skip)]
    pub tokens: Vec<Token>,
}

impl Nc1Document {
    /// Number of blocks whose kind has no decoder.
    pub fn skipped_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| !b.decoded).count()
    }
}

#[derive(Debug, Default)]
struct Operations {
    holes: Vec<Hole>,
    cuts: Vec<CutRegion>,
    markings: Vec<Marking>,
}

impl Operations {
    /// Routes one block to its decoder and returns the number of records.
    fn decode_block(&mut self, block: &Block<'_>, profile: &ProfileContext) -> usize {
        match block.kind {
            BlockKind::Header => 1,
            BlockKind::Holes => append(&mut self.holes, holes::decode(block.tokens)),
            BlockKind::ExternalContour => {
                append(&mut self.cuts, external::decode(block.tokens, profile))
            }
            BlockKind::InternalContour => append(&mut self.cuts, internal::decode(block.tokens)),
            BlockKind::Marking => append(&mut self.markings, marking::decode(block.tokens)),
            BlockKind::PowderMarking
            | BlockKind::PunchMarking
            | BlockKind::SawCut
            | BlockKind::Tolerance
            | BlockKind::Camber
            | BlockKind::Profile
            | BlockKind::Bending => 0,
        }
    }
}

fn append<T>(records: &mut Vec<T>, mut decoded: Vec<T>) -> usize {
    let count = decoded.len();
    records.append(&mut decoded);
    count
}

/// Imports an NC1 text.
///
/// Profile dimensions are taken from `profile` when given, else from the
/// header, else from the defaults. Never fails: anything the decoders cannot
/// use is dropped and reported in [`Nc1Document::warnings`].
pub fn parse(text: &str, profile: Option<ProfileContext>) -> Nc1Document {
    let tokens = tokenize(text);
    let segments = segment(&tokens);
    let mut warnings = Vec::new();

    let mut headers = segments.blocks.iter().filter(|b| b.kind == BlockKind::Header);
    let header = headers.next().map(|b| header::decode(b.tokens));
    for extra in headers {
        warnings.push(format!(
            "line {}: additional {} block ignored",
            extra.line, extra.kind
        ));
    }

    let (profile, profile_source) = resolve_profile(profile, header.as_ref());
    if profile_source == ProfileSource::Default {
        warnings.push(
            "no profile length in header, external contours use default dimensions".to_string(),
        );
    }
    tracing::debug!(?profile_source, length = profile.length, "profile resolved");

    let mut operations = Operations::default();
    let blocks: Vec<DecodedBlock> = segments
        .blocks
        .iter()
        .map(|block| {
            let records = operations.decode_block(block, &profile);
            let decoded = block.kind.is_decoded();
            if decoded {
                tracing::debug!(kind = %block.kind, line = block.line, records, "block decoded");
            } else {
                tracing::debug!(kind = %block.kind, line = block.line, "block skipped");
                warnings.push(format!(
                    "line {}: {} block not supported, skipped",
                    block.line, block.kind
                ));
            }
            DecodedBlock {
                kind: block.kind,
                line: block.line,
                records,
                decoded,
            }
        })
        .collect();

    let issues = validate(&tokens, &segments);
    warnings.extend(issues.iter().map(ToString::to_string));

    Nc1Document {
        header,
        profile,
        profile_source,
        blocks,
        holes: operations.holes,
        cuts: operations.cuts,
        markings: operations.markings,
        issues,
        warnings,
        tokens,
    }
}

/// Picks the profile dimensions: caller first, then header, then defaults.
pub fn resolve_profile(
    explicit: Option<ProfileContext>,
    header: Option<&ProfileHeader>,
) -> (ProfileContext, ProfileSource) {
    match (explicit, header.and_then(ProfileHeader::profile_context)) {
        (Some(profile), _) => (profile, ProfileSource::Caller),
        (None, Some(profile)) => (profile, ProfileSource::Header),
        (None, None) => (ProfileContext::default(), ProfileSource::Default),
    }
}
