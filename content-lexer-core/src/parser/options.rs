//! Lexer configuration

use super::stack_safe::MAX_NESTING_DEPTH;

/// Options controlling how a [`ContentLexer`](super::ContentLexer) tokenizes a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerOptions {
    /// Maximum nesting of arrays and dictionaries before extraction fails
    pub max_nesting_depth: usize,
    /// Accept an inline image `EI` that ends exactly at the last two bytes of a
    /// segment even when no separator follows it
    pub accept_terminator_at_segment_end: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: MAX_NESTING_DEPTH,
            accept_terminator_at_segment_end: true,
        }
    }
}

impl LexerOptions {
    /// Options for streams from trusted producers: a separator must follow
    /// every `EI`, and nesting is kept shallow
    pub fn strict() -> Self {
        Self {
            max_nesting_depth: 64,
            accept_terminator_at_segment_end: false,
        }
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn with_terminator_at_segment_end(mut self, accept: bool) -> Self {
        self.accept_terminator_at_segment_end = accept;
        self
    }
}
