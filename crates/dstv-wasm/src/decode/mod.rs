//! Block segmentation and per-operation decoders.
//!
//! The token stream is cut into blocks at every `BlockStart` token; a block
//! runs until the next block keyword or an `EN` marker. Each block is then
//! handed to the decoder for its kind.

pub mod contour;
pub mod external;
pub mod header;
pub mod holes;
pub mod internal;
pub mod marking;

use crate::lexer::{BlockKind, Token, TokenKind};

/// A contiguous run of tokens belonging to one block.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    /// Block keyword.
    pub kind: BlockKind,
    /// Source line of the keyword.
    pub line: usize,
    /// Tokens of the block, keyword and `EN` marker included.
    pub tokens: &'a [Token],
}

impl Block<'_> {
    /// Tokens carrying payload (comments and markers removed).
    pub fn payload(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|token| !token.is_structural())
    }
}

/// Result of cutting a token stream into blocks.
#[derive(Debug, Default)]
pub struct Segments<'a> {
    /// Blocks in source order.
    pub blocks: Vec<Block<'a>>,
    /// Payload tokens found outside of any block.
    pub stray: Vec<&'a Token>,
    /// Whether an `EN` marker was seen.
    pub has_end: bool,
}

/// Cuts a token stream into blocks.
pub fn segment(tokens: &[Token]) -> Segments<'_> {
    let mut segments = Segments::default();
    let mut open: Option<(BlockKind, usize, usize)> = None;

    for (idx, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::BlockStart(kind) => {
                close_block(&mut segments, tokens, open.take(), idx);
                open = Some((kind, token.line, idx));
            }
            TokenKind::BlockEnd => {
                segments.has_end = true;
                close_block(&mut segments, tokens, open.take(), idx + 1);
            }
            TokenKind::Comment => {}
            _ => {
                if open.is_none() {
                    segments.stray.push(token);
                }
            }
        }
    }
    close_block(&mut segments, tokens, open, tokens.len());

    segments
}

fn close_block<'a>(
    segments: &mut Segments<'a>,
    tokens: &'a [Token],
    open: Option<(BlockKind, usize, usize)>,
    end: usize,
) {
    let Some((kind, line, start)) = open else {
        return;
    };
    if let Some(block_tokens) = tokens.get(start..end) {
        segments.blocks.push(Block {
            kind,
            line,
            tokens: block_tokens,
        });
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn ut_seg_001_blocks_split_at_keywords() {
        let tokens = tokenize("ST\n  1\nBO\n  v 10 20 22\nAK\n  v 0 0 0\nEN\n");
        let segments = segment(&tokens);
        let kinds: Vec<BlockKind> = segments.blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Header,
                BlockKind::Holes,
                BlockKind::ExternalContour
            ]
        );
        assert_eq!(segments.blocks[1].line, 3);
        assert_eq!(segments.blocks[1].payload().count(), 1);
        assert_eq!(segments.blocks[2].tokens.len(), 3, "EN belongs to the block");
        assert!(segments.has_end);
        assert!(segments.stray.is_empty());
    }

    #[test]
    fn ut_seg_002_tokens_after_end_are_stray() {
        let tokens = tokenize("BO\n  v 10 20 22\nEN\n  42\n** trailing comment");
        let segments = segment(&tokens);
        assert_eq!(segments.blocks.len(), 1);
        assert_eq!(segments.stray.len(), 1);
        assert_eq!(segments.stray[0].raw, "42");
    }

    #[test]
    fn bc_seg_001_unterminated_block_runs_to_end() {
        let tokens = tokenize("BO\n  v 10 20 22\n  v 30 20 22");
        let segments = segment(&tokens);
        assert_eq!(segments.blocks.len(), 1);
        assert_eq!(segments.blocks[0].tokens.len(), 3);
        assert!(!segments.has_end);
    }

    #[test]
    fn bc_seg_002_no_tokens_no_blocks() {
        let segments = segment(&[]);
        assert!(segments.blocks.is_empty());
        assert!(segments.stray.is_empty());
    }
}
