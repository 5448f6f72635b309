//! Content Stream Parser Module
//!
//! This module implements a single-pass tokenizer for PDF page content streams
//! (ISO 32000-1 §7.8.2). A logical stream may be supplied as several independent
//! byte segments; the lexer stitches them together transparently.

pub mod char_class;
pub mod content;
pub mod inline_image;
pub mod lexer;
pub mod objects;
pub mod operators;
pub mod options;
pub mod segments;
pub mod stack_safe;

pub use self::content::{ContentParser, Operation};
pub use self::lexer::{ContentLexer, Token, TokenShape};
pub use self::objects::{PdfName, PdfString};
pub use self::operators::{OpCode, OperatorCategory};
pub use self::options::LexerOptions;
pub use self::segments::{CursorMark, SegmentCursor};

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Content stream parser errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no input bytes")]
    NoInput,

    #[error("Maximum nesting depth exceeded at position {position} (limit: {limit})")]
    RecursionLimit { position: usize, limit: usize },
}
