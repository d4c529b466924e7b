//! Token types produced by the NC1 lexer.

use std::fmt;

use serde::Serialize;

/// One of the four principal profile faces, as written in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "char")]
pub enum Face {
    /// Top flange (`o`).
    Top,
    /// Bottom flange (`u`).
    Bottom,
    /// Web (`v`).
    Web,
    /// Front face (`h`).
    Front,
}

impl Face {
    /// Decodes a face letter. Face letters are lowercase only.
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'o' => Some(Self::Top),
            'u' => Some(Self::Bottom),
            'v' => Some(Self::Web),
            'h' => Some(Self::Front),
            _ => None,
        }
    }

    /// The letter this face is written as.
    pub const fn letter(self) -> char {
        match self {
            Self::Top => 'o',
            Self::Bottom => 'u',
            Self::Web => 'v',
            Self::Front => 'h',
        }
    }

    /// Decodes a word consisting of exactly one face letter.
    pub fn from_word(word: &str) -> Option<Self> {
        let mut chars = word.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::from_letter(letter),
            _ => None,
        }
    }
}

impl From<Face> for char {
    fn from(face: Face) -> Self {
        face.letter()
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Operation block keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum BlockKind {
    /// `ST`: file header with the profile description.
    Header,
    /// `BO`: holes.
    Holes,
    /// `AK`: external contour.
    ExternalContour,
    /// `IK`: internal contour.
    InternalContour,
    /// `SI`: marking text.
    Marking,
    /// `PU`: powder marking.
    PowderMarking,
    /// `KO`: punch marking.
    PunchMarking,
    /// `SC`: saw cut.
    SawCut,
    /// `TO`: tolerances.
    Tolerance,
    /// `UE`: camber.
    Camber,
    /// `PR`: profile description for special sections.
    Profile,
    /// `KA`: bending.
    Bending,
}

/// Keyword closing the current block.
pub const END_KEYWORD: &str = "EN";

impl BlockKind {
    /// All block kinds, in keyword table order.
    pub const ALL: [Self; 12] = [
        Self::Header,
        Self::Holes,
        Self::ExternalContour,
        Self::InternalContour,
        Self::Marking,
        Self::PowderMarking,
        Self::PunchMarking,
        Self::SawCut,
        Self::Tolerance,
        Self::Camber,
        Self::Profile,
        Self::Bending,
    ];

    /// The two-letter keyword opening this block.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Header => "ST",
            Self::Holes => "BO",
            Self::ExternalContour => "AK",
            Self::InternalContour => "IK",
            Self::Marking => "SI",
            Self::PowderMarking => "PU",
            Self::PunchMarking => "KO",
            Self::SawCut => "SC",
            Self::Tolerance => "TO",
            Self::Camber => "UE",
            Self::Profile => "PR",
            Self::Bending => "KA",
        }
    }

    /// Matches a trimmed line against the keyword table.
    pub fn from_keyword(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == line)
    }

    /// Whether this crate decodes the block's payload.
    pub const fn is_decoded(self) -> bool {
        matches!(
            self,
            Self::Header
                | Self::Holes
                | Self::ExternalContour
                | Self::InternalContour
                | Self::Marking
        )
    }
}

impl From<BlockKind> for &'static str {
    fn from(kind: BlockKind) -> Self {
        kind.keyword()
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Hole-type letter appearing as a standalone word or as a numeral suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "char")]
pub enum HoleModifier {
    /// `l`: slotted (oblong) hole.
    Slotted,
    /// `s`: countersunk hole.
    Countersunk,
    /// `g`: threaded hole.
    Threaded,
    /// `m`: marked (punched, not drilled) hole.
    Marked,
}

impl HoleModifier {
    /// Decodes a hole-type letter.
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'l' => Some(Self::Slotted),
            's' => Some(Self::Countersunk),
            'g' => Some(Self::Threaded),
            'm' => Some(Self::Marked),
            _ => None,
        }
    }

    /// The letter this modifier is written as.
    pub const fn letter(self) -> char {
        match self {
            Self::Slotted => 'l',
            Self::Countersunk => 's',
            Self::Threaded => 'g',
            Self::Marked => 'm',
        }
    }
}

impl From<HoleModifier> for char {
    fn from(modifier: HoleModifier) -> Self {
        modifier.letter()
    }
}

/// Decoded hole type of a face-data record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HoleType {
    /// Oblong hole with its slot length and angle.
    Slotted {
        /// Slot length.
        length: f64,
        /// Slot angle in degrees.
        angle: f64,
    },
    /// Countersunk hole.
    Countersunk,
    /// Threaded hole.
    Threaded,
    /// Marked hole.
    Marked,
}

impl HoleType {
    /// The modifier letter this type was decoded from.
    pub const fn modifier(self) -> HoleModifier {
        match self {
            Self::Slotted { .. } => HoleModifier::Slotted,
            Self::Countersunk => HoleModifier::Countersunk,
            Self::Threaded => HoleModifier::Threaded,
            Self::Marked => HoleModifier::Marked,
        }
    }
}

/// Payload of a composite "face + numbers" record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceData {
    /// Primary face letter.
    pub face: Face,
    /// Plain numeric values, slot fields excluded.
    pub values: Vec<f64>,
    /// Hole type, when a hole-type suffix was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole_type: Option<HoleType>,
}

impl FaceData {
    /// A bare face letter with no payload.
    pub const fn face_only(face: Face) -> Self {
        Self {
            face,
            values: Vec::new(),
            hole_type: None,
        }
    }
}

/// Writes the record back in NC1 line form.
///
/// The hole-type suffix is attached to the third value (the diameter), which
/// is where the format places it.
impl fmt::Display for FaceData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face)?;
        for (idx, value) in self.values.iter().enumerate() {
            write!(f, " {value:.2}")?;
            let is_suffix_slot = idx == 2 || (idx + 1 == self.values.len() && idx < 2);
            if let (true, Some(hole_type)) = (is_suffix_slot, self.hole_type) {
                write!(f, "{}", hole_type.modifier().letter())?;
                if let HoleType::Slotted { length, angle } = hole_type {
                    write!(f, " {length:.2} {angle:.2}")?;
                }
            }
        }
        Ok(())
    }
}

/// Token classification. Each variant carries only the data its kind has.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TokenKind {
    /// Full-line or trailing `**` comment.
    Comment,
    /// Block keyword.
    BlockStart(BlockKind),
    /// `EN` end marker.
    BlockEnd,
    /// Double-quoted text, quotes stripped.
    QuotedText(String),
    /// Composite face record, or a bare face letter.
    FaceData(FaceData),
    /// Plain numeral, possibly with a face-letter suffix kept in `raw`.
    Number(f64),
    /// Standalone hole-type letter.
    HoleTypeModifier(HoleModifier),
    /// Word of identifier characters.
    Identifier,
    /// Anything else.
    Unknown,
}

/// A lexed token with its source position and enclosing block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// Classification and decoded payload.
    #[serde(flatten)]
    pub kind: TokenKind,
    /// Source text of the token.
    pub raw: String,
    /// 1-based source line.
    pub line: usize,
    /// 1-based column of the first character.
    pub column: usize,
    /// Block open when the token was read.
    pub block: Option<BlockKind>,
}

impl Token {
    /// Face-data payload, if this is a face-data token.
    pub const fn face_data(&self) -> Option<&FaceData> {
        match &self.kind {
            TokenKind::FaceData(data) => Some(data),
            _ => None,
        }
    }

    /// Numeric value, if this is a number token.
    pub const fn number(&self) -> Option<f64> {
        match self.kind {
            TokenKind::Number(value) => Some(value),
            _ => None,
        }
    }

    /// Whether the token is structural (comment or block marker) and carries
    /// no payload for a decoder.
    pub const fn is_structural(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Comment | TokenKind::BlockStart(_) | TokenKind::BlockEnd
        )
    }
}
