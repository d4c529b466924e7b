//! NC1 lexer: raw text to an ordered token stream.
//!
//! Lines are classified in priority order: comment, block keyword, end
//! keyword, quoted text, face-data record, and finally word-by-word. The
//! open block is threaded through the fold over lines as an explicit value,
//! so [`tokenize`] holds no state between calls.

pub mod face_data;
pub mod numeral;
pub mod token;

pub use face_data::{is_face_data_line, parse_face_data_line};
pub use token::*;

use numeral::{parse_numeral, split_letter_suffix};

/// Prefix of full-line comments. `**` is covered by the same check.
const COMMENT_PREFIX: char = '*';
/// Prefix of a trailing comment on an otherwise normal line.
const INLINE_COMMENT_PREFIX: &str = "**";
/// Extra characters allowed in identifier words besides ASCII alphanumerics.
const IDENTIFIER_PUNCTUATION: &[char] = &['_', '-', '.', '+', '/', ',', ':', '%'];

#[derive(Debug, Default)]
struct LexState {
    block: Option<BlockKind>,
    tokens: Vec<Token>,
}

/// Source position of a token: 1-based line and column.
#[derive(Debug, Clone, Copy)]
struct Position {
    line: usize,
    column: usize,
}

impl LexState {
    fn push(&mut self, kind: TokenKind, raw: &str, at: Position) {
        self.tokens.push(Token {
            kind,
            raw: raw.to_string(),
            line: at.line,
            column: at.column,
            block: self.block,
        });
    }
}

/// Tokenize an NC1 buffer.
///
/// Accepts `\n` and `\r\n` line endings. Blank lines produce no tokens but
/// still count towards line numbers. Never fails: unrecognized words become
/// [`TokenKind::Unknown`].
pub fn tokenize(text: &str) -> Vec<Token> {
    let state = text
        .lines()
        .enumerate()
        .fold(LexState::default(), |mut state, (idx, raw_line)| {
            lex_line(&mut state, idx + 1, raw_line);
            state
        });
    tracing::trace!(tokens = state.tokens.len(), "tokenized NC1 text");
    state.tokens
}

fn lex_line(state: &mut LexState, line_no: usize, raw_line: &str) {
    let line = raw_line.trim();
    if line.is_empty() {
        return;
    }
    let at = Position {
        line: line_no,
        column: column_of(raw_line, line),
    };

    if line.starts_with(COMMENT_PREFIX) {
        state.push(TokenKind::Comment, line, at);
        return;
    }

    if let Some(kind) = BlockKind::from_keyword(line) {
        state.block = Some(kind);
        state.push(TokenKind::BlockStart(kind), line, at);
        return;
    }

    if line == END_KEYWORD {
        state.push(TokenKind::BlockEnd, line, at);
        state.block = None;
        return;
    }

    if let Some(text) = strip_quotes(line) {
        state.push(TokenKind::QuotedText(text.to_string()), line, at);
        return;
    }

    let (head, comment) = split_inline_comment(line);
    if let Some(data) = parse_face_data_line(head) {
        state.push(TokenKind::FaceData(data), head, at);
    } else {
        for word in head.split_whitespace() {
            let word_at = Position {
                line: line_no,
                column: column_of(raw_line, word),
            };
            state.push(classify_word(word), word, word_at);
        }
    }

    if let Some(comment) = comment {
        let comment_at = Position {
            line: line_no,
            column: column_of(raw_line, comment),
        };
        state.push(TokenKind::Comment, comment, comment_at);
    }
}

/// Classifies one whitespace-separated word of a line that is not a
/// face-data record.
fn classify_word(word: &str) -> TokenKind {
    if let Some(value) = parse_numeral(word) {
        return TokenKind::Number(value);
    }

    if let Some(face) = Face::from_word(word) {
        return TokenKind::FaceData(FaceData::face_only(face));
    }

    let mut chars = word.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        if let Some(modifier) = HoleModifier::from_letter(letter) {
            return TokenKind::HoleTypeModifier(modifier);
        }
    }

    if let Some((numeral, letter)) = split_letter_suffix(word) {
        let known_suffix =
            Face::from_letter(letter).is_some() || HoleModifier::from_letter(letter).is_some();
        if let (true, Some(value)) = (known_suffix, parse_numeral(numeral)) {
            return TokenKind::Number(value);
        }
    }

    if word
        .chars()
        .all(|ch| ch.is_alphanumeric() || IDENTIFIER_PUNCTUATION.contains(&ch))
    {
        TokenKind::Identifier
    } else {
        TokenKind::Unknown
    }
}

fn strip_quotes(line: &str) -> Option<&str> {
    line.strip_prefix('"')?.strip_suffix('"')
}

/// Splits a trailing `**` comment off a line. The comment must start a word.
fn split_inline_comment(line: &str) -> (&str, Option<&str>) {
    let split_at = words_with_offsets(line)
        .find(|(_, word)| word.starts_with(INLINE_COMMENT_PREFIX))
        .map(|(offset, _)| offset);

    match split_at.and_then(|idx| line.get(..idx).zip(line.get(idx..))) {
        Some((head, comment)) => (head.trim_end(), Some(comment)),
        None => (line, None),
    }
}

/// Whitespace-separated words with their byte offsets into `line`.
fn words_with_offsets(line: &str) -> impl Iterator<Item = (usize, &str)> {
    line.split_whitespace().map(move |word| {
        let offset = word.as_ptr() as usize - line.as_ptr() as usize;
        (offset, word)
    })
}

/// 1-based column of `part` inside `line`; `part` must be a subslice of `line`.
fn column_of(line: &str, part: &str) -> usize {
    let offset = (part.as_ptr() as usize).saturating_sub(line.as_ptr() as usize);
    line.get(..offset).map_or(1, |prefix| prefix.chars().count() + 1)
}
