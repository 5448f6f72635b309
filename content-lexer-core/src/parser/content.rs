//! PDF Content Stream Parser
//!
//! Groups the lexer's token stream into operations. Operands precede their
//! operator in a content stream, so every value token is collected until the
//! next operator arrives. Inline images (`BI ... ID <data> EI`) are folded
//! into a single `BI` operation.
//!
//! No graphics state is tracked and operand counts are not checked; that is
//! left to the interpreter consuming the operations.

use super::lexer::{ContentLexer, Token};
use super::objects::PdfName;
use super::operators::OpCode;
use super::ParseResult;
use bytes::Bytes;
use std::collections::HashMap;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One operator together with the operands that preceded it
///
/// For `BI` the operands are the image parameters as a
/// [`Token::Dictionary`] followed by a [`Token::InlineImagePayload`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Operation {
    pub operator: OpCode,
    pub operands: Vec<Token>,
}

impl Operation {
    pub fn new(operator: OpCode, operands: Vec<Token>) -> Self {
        Self { operator, operands }
    }

    /// Numeric operands, skipping any that are not numbers
    pub fn numbers(&self) -> Vec<f64> {
        self.operands
            .iter()
            .filter_map(|token| match token {
                Token::Number(value) => Some(*value),
                _ => None,
            })
            .collect()
    }
}

/// Content stream parser
pub struct ContentParser {
    lexer: ContentLexer,
    operands: Vec<Token>,
}

impl ContentParser {
    /// Create a parser pulling tokens from `lexer`
    pub fn new(lexer: ContentLexer) -> Self {
        Self {
            lexer,
            operands: Vec::new(),
        }
    }

    /// Create a parser over the segments of one content stream
    pub fn from_segments(segments: Vec<Bytes>) -> ParseResult<Self> {
        Ok(Self::new(ContentLexer::new(segments)?))
    }

    /// Parse a complete content stream into operations
    pub fn parse(content: &[u8]) -> ParseResult<Vec<Operation>> {
        let parser = Self::new(ContentLexer::from_slice(content)?);
        parser.collect()
    }

    /// Pull the next operation, or `None` at the end of the stream
    ///
    /// Operands left over at the end of the stream are discarded.
    pub fn next_operation(&mut self) -> ParseResult<Option<Operation>> {
        loop {
            match self.lexer.try_next_token()? {
                Token::EndOfStream => {
                    if !self.operands.is_empty() {
                        debug!(
                            count = self.operands.len(),
                            "discarding operands without an operator"
                        );
                        self.operands.clear();
                    }
                    return Ok(None);
                }
                Token::Operator(OpCode::BI) => return self.read_inline_image().map(Some),
                Token::Operator(operator) => {
                    let operands = std::mem::take(&mut self.operands);
                    return Ok(Some(Operation::new(operator, operands)));
                }
                operand => self.operands.push(operand),
            }
        }
    }

    /// Access the underlying lexer
    pub fn lexer(&self) -> &ContentLexer {
        &self.lexer
    }

    pub fn into_lexer(self) -> ContentLexer {
        self.lexer
    }

    fn read_inline_image(&mut self) -> ParseResult<Operation> {
        if !self.operands.is_empty() {
            debug!(count = self.operands.len(), "discarding operands before BI");
            self.operands.clear();
        }

        let mut params = HashMap::new();
        let mut pending_key: Option<PdfName> = None;

        let data = loop {
            match self.lexer.try_next_token()? {
                Token::Operator(OpCode::ID) => break self.lexer.read_inline_image_data(),
                Token::EndOfStream => {
                    info!(
                        position = self.lexer.position(),
                        "inline image parameters have no ID operator"
                    );
                    break Token::InlineImagePayload(Vec::new());
                }
                Token::Name(name) if pending_key.is_none() => pending_key = Some(name),
                value => match pending_key.take() {
                    Some(key) => {
                        params.insert(key, value);
                    }
                    None => debug!(
                        token = ?value,
                        "dropping inline image parameter without a key"
                    ),
                },
            }
        };

        Ok(Operation::new(OpCode::BI, vec![Token::Dictionary(params), data]))
    }
}

impl Iterator for ContentParser {
    type Item = ParseResult<Operation>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_operation().transpose()
    }
}
