//! # pdf-content-lexer
//!
//! A single-pass tokenizer for PDF page content streams.
//!
//! ## Features
//!
//! - **Segmented input**: one logical stream may span any number of buffers; token
//!   boundaries need not line up with buffer boundaries
//! - **Malformed input recovery**: numbers and keywords written without separators
//!   (`12/F1`, `ref`) are split back into their tokens
//! - **Inline images**: raw `ID ... EI` payloads are extracted without decoding
//! - **Bounded recursion**: arrays and dictionaries nest only up to a configurable depth
//! - **Operation grouping**: [`ContentParser`] pairs operators with their operands
//!
//! Decompression, object resolution and graphics state are out of scope. The
//! caller supplies already-decoded stream bytes.
//!
//! ## Quick Start
//!
//! ### Tokens
//!
//! ```rust
//! use pdf_content_lexer::{ContentLexer, OpCode, Token};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut lexer = ContentLexer::from_segments([&b"1 0 0 1 0 "[..], &b"0 cm\n"[..]])?;
//!
//! let tokens: Vec<Token> = lexer.by_ref().collect();
//! assert_eq!(tokens.len(), 7);
//! assert_eq!(tokens[6], Token::Operator(OpCode::Cm));
//! assert_eq!(lexer.next_token(), Token::EndOfStream);
//! # Ok(())
//! # }
//! ```
//!
//! ### Operations
//!
//! ```rust
//! use pdf_content_lexer::{ContentParser, OpCode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ops = ContentParser::parse(b"BT /F1 12 Tf (Hello) Tj ET")?;
//! let operators: Vec<OpCode> = ops.iter().map(|op| op.operator).collect();
//! assert_eq!(operators, [OpCode::BT, OpCode::Tf, OpCode::Tj, OpCode::ET]);
//! # Ok(())
//! # }
//! ```

pub mod parser;

pub use parser::{
    ContentLexer, ContentParser, LexerOptions, OpCode, Operation, OperatorCategory, ParseError,
    ParseResult, PdfName, PdfString, Token, TokenShape,
};

/// Current version of pdf-content-lexer
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_lexer_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<ContentLexer>();
        assert_send::<ContentParser>();
    }
}
