//! Content Stream Lexer
//!
//! Tokenizes content streams according to ISO 32000-1 Section 7.8.2. The lexer
//! classifies the byte at the cursor, hands it to the extractor for that token
//! shape, and returns one [`Token`] per call. Malformed input is recovered from
//! locally: over-read numbers and concatenated keywords rewind the cursor so
//! the leftover bytes start the next token.

use super::char_class;
use super::objects::{PdfName, PdfString};
use super::operators::{self, OpCode};
use super::options::LexerOptions;
use super::segments::SegmentCursor;
use super::stack_safe::StackSafeContext;
use super::ParseResult;
use bytes::Bytes;
use std::collections::HashMap;
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Content stream tokens
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Token {
    /// Integer or real number
    Number(f64),

    /// Operator keyword
    Operator(OpCode),

    /// Literal string (text), escapes already applied
    LiteralString(PdfString),

    /// Hex string <hex>, digits kept undecoded
    HexString(PdfString),

    /// Name object /Name
    Name(PdfName),

    /// Array [...]
    Array(Vec<Token>),

    /// Dictionary << ... >>
    Dictionary(HashMap<PdfName, Token>),

    /// Boolean value
    Boolean(bool),

    /// Raw inline image bytes between `ID` and `EI`
    InlineImagePayload(Vec<u8>),

    /// End of stream
    EndOfStream,
}

/// Shape of the next token, decided from its lead byte(s)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenShape {
    NoMore,
    Number,
    Operand,
    LiteralString,
    HexString,
    Name,
    Dictionary,
    Array,
    Boolean,
}

/// Pull tokenizer over one logical content stream
#[derive(Debug)]
pub struct ContentLexer {
    pub(super) cursor: SegmentCursor,
    pub(super) options: LexerOptions,
    context: StackSafeContext,
    last_shape: TokenShape,
    scratch: Vec<u8>,
    poisoned: bool,
}

impl ContentLexer {
    /// Create a lexer over the segments of one content stream
    pub fn new(segments: Vec<Bytes>) -> ParseResult<Self> {
        Self::with_options(segments, LexerOptions::default())
    }

    pub fn with_options(segments: Vec<Bytes>, options: LexerOptions) -> ParseResult<Self> {
        let cursor = SegmentCursor::new(segments)?;
        Ok(Self {
            cursor,
            context: StackSafeContext::with_limit(options.max_nesting_depth),
            options,
            last_shape: TokenShape::NoMore,
            scratch: Vec::with_capacity(32),
            poisoned: false,
        })
    }

    /// Create a lexer from anything convertible into segments
    pub fn from_segments<I>(segments: I) -> ParseResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<Bytes>,
    {
        Self::new(segments.into_iter().map(Into::into).collect())
    }

    /// Create a lexer over a single in-memory buffer
    pub fn from_slice(data: &[u8]) -> ParseResult<Self> {
        Self::new(vec![Bytes::copy_from_slice(data)])
    }

    /// Shape chosen by the most recent classification
    pub fn last_shape(&self) -> TokenShape {
        self.last_shape
    }

    /// Logical byte offset of the cursor
    pub fn position(&self) -> usize {
        self.cursor.offset()
    }

    /// Get the next token from the stream
    ///
    /// Returns [`Token::EndOfStream`] once input is exhausted. A nesting limit
    /// violation is logged and also ends the stream; use
    /// [`try_next_token`](Self::try_next_token) to observe it.
    pub fn next_token(&mut self) -> Token {
        match self.try_next_token() {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "content stream tokenization aborted");
                Token::EndOfStream
            }
        }
    }

    /// Get the next token, reporting nesting limit violations
    ///
    /// After an error the lexer is exhausted and only yields `EndOfStream`.
    pub fn try_next_token(&mut self) -> ParseResult<Token> {
        if self.poisoned {
            return Ok(Token::EndOfStream);
        }

        loop {
            let shape = self.classify();
            if shape == TokenShape::NoMore {
                return Ok(Token::EndOfStream);
            }
            match self.extract(shape) {
                Ok(Some(token)) => return Ok(token),
                Ok(None) => continue,
                Err(err) => {
                    self.poisoned = true;
                    return Err(err);
                }
            }
        }
    }

    /// Decide the shape of the next token, skipping whitespace and comments
    fn classify(&mut self) -> TokenShape {
        self.skip_whitespace_and_comments();

        let shape = match self.cursor.current_byte() {
            None => TokenShape::NoMore,
            Some(b'/') => TokenShape::Name,
            Some(b'(') => TokenShape::LiteralString,
            Some(b'[') => TokenShape::Array,
            Some(b'<') if self.cursor.peek(1) == Some(b'<') => TokenShape::Dictionary,
            Some(b'<') => TokenShape::HexString,
            Some(b't') => TokenShape::Boolean,
            Some(b'f') if self.cursor.peek(1) == Some(b'a') => TokenShape::Boolean,
            Some(lead) if char_class::is_number_byte(lead) => TokenShape::Number,
            Some(_) => TokenShape::Operand,
        };
        self.last_shape = shape;
        shape
    }

    /// Run the extractor for `shape`
    ///
    /// `Ok(None)` means the bytes held no usable token (a number span without
    /// digits) and were skipped.
    fn extract(&mut self, shape: TokenShape) -> ParseResult<Option<Token>> {
        let token = match shape {
            TokenShape::NoMore => Token::EndOfStream,
            TokenShape::Number => match self.read_number() {
                Some(value) => Token::Number(value),
                None => return Ok(None),
            },
            TokenShape::Operand => Token::Operator(self.read_operator()),
            TokenShape::LiteralString => self.read_literal_string(),
            TokenShape::HexString => self.read_hex_string(),
            TokenShape::Name => self.read_name(),
            TokenShape::Boolean => self.read_boolean(),
            TokenShape::Array => self.read_array()?,
            TokenShape::Dictionary => self.read_dictionary()?,
        };
        Ok(Some(token))
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(byte) = self.cursor.current_byte() {
            if char_class::is_whitespace(byte) {
                self.cursor.advance();
            } else if byte == b'%' {
                self.skip_comment();
            } else {
                break;
            }
        }
    }

    fn skip_comment(&mut self) {
        while let Some(byte) = self.cursor.current_byte() {
            if byte == b'\r' || byte == b'\n' {
                break;
            }
            self.cursor.advance();
        }
    }

    /// Append bytes to the scratch buffer while `keep` holds
    fn fill_scratch(&mut self, keep: fn(u8) -> bool) {
        while let Some(byte) = self.cursor.current_byte() {
            if !keep(byte) {
                break;
            }
            self.scratch.push(byte);
            self.cursor.advance();
        }
    }

    fn read_number(&mut self) -> Option<f64> {
        let start = self.cursor.mark();
        self.scratch.clear();
        self.fill_scratch(char_class::is_number_byte);

        let (value, consumed) = accumulate_number(&self.scratch);
        if consumed < self.scratch.len() {
            // Leave the offending byte for the next token
            self.cursor.reset(start);
            self.cursor.advance_by(consumed);
        }

        if value.is_none() {
            debug!(
                position = start.offset(),
                len = consumed,
                "skipping numeric span without digits"
            );
        }
        value
    }

    fn read_operator(&mut self) -> OpCode {
        let start = self.cursor.mark();
        self.scratch.clear();

        // The lead byte always belongs to the span, even a stray delimiter
        if let Some(lead) = self.cursor.current_byte() {
            self.scratch.push(lead);
            self.cursor.advance();
        }
        self.fill_scratch(|b| !char_class::is_token_end(b));

        let (op, backoff) = operators::dispatch(&self.scratch);
        if backoff > 0 {
            self.cursor.reset(start);
            self.cursor.advance_by(self.scratch.len() - backoff);
        }

        if op == OpCode::NoOp {
            debug!(
                position = start.offset(),
                keyword = %String::from_utf8_lossy(&self.scratch),
                "unrecognized operator"
            );
        }
        op
    }

    fn read_name(&mut self) -> Token {
        self.cursor.advance(); // Skip '/'
        self.scratch.clear();
        self.fill_scratch(|b| !char_class::is_token_end(b));
        Token::Name(PdfName::from_latin1(&self.scratch))
    }

    fn read_boolean(&mut self) -> Token {
        self.scratch.clear();
        self.fill_scratch(|b| !char_class::is_token_end(b));
        Token::Boolean(self.scratch == b"true")
    }

    fn read_literal_string(&mut self) -> Token {
        self.cursor.advance(); // Skip opening '('
        let mut result = Vec::new();
        let mut paren_depth = 1usize;

        while let Some(ch) = self.cursor.current_byte() {
            self.cursor.advance();
            match ch {
                b'\\' => self.read_escape(&mut result),
                b'(' => {
                    paren_depth += 1;
                    result.push(ch);
                }
                b')' => {
                    paren_depth -= 1;
                    if paren_depth == 0 {
                        break;
                    }
                    result.push(ch);
                }
                _ => result.push(ch),
            }
        }

        Token::LiteralString(PdfString(result))
    }

    /// Decode the escape whose backslash was just consumed
    fn read_escape(&mut self, out: &mut Vec<u8>) {
        let Some(ch) = self.cursor.current_byte() else {
            return;
        };
        self.cursor.advance();

        match ch {
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'(' | b')' | b'\\' => out.push(ch),
            // Line continuation
            b'\r' => {
                if self.cursor.current_byte() == Some(b'\n') {
                    self.cursor.advance();
                }
            }
            b'\n' => {}
            b'0'..=b'9' => {
                let position = self.cursor.offset() - 1;
                let mut digits = [ch, 0, 0];
                let mut len = 1;
                while len < 3 {
                    match self.cursor.current_byte() {
                        Some(d) if char_class::is_digit(d) => {
                            digits[len] = d;
                            len += 1;
                            self.cursor.advance();
                        }
                        _ => break,
                    }
                }
                out.push(decode_octal(&digits[..len], position));
            }
            _ => out.push(ch), // Unknown escape, treat as literal
        }
    }

    fn read_hex_string(&mut self) -> Token {
        self.cursor.advance(); // Skip opening '<'
        let mut result = Vec::new();

        while let Some(ch) = self.cursor.current_byte() {
            self.cursor.advance();
            if ch == b'>' {
                break;
            }
            result.push(ch);
        }

        Token::HexString(PdfString(result))
    }

    fn read_array(&mut self) -> ParseResult<Token> {
        self.context.enter(self.cursor.offset())?;
        let result = self.read_array_body();
        self.context.exit();
        result
    }

    fn read_array_body(&mut self) -> ParseResult<Token> {
        self.cursor.advance(); // Skip '['
        let mut elements = Vec::new();

        loop {
            self.skip_whitespace_and_comments();
            match self.cursor.current_byte() {
                None => break,
                Some(b']') => {
                    self.cursor.advance();
                    break;
                }
                Some(_) => {
                    if let Some(token) = self.read_element()? {
                        elements.push(token);
                    }
                }
            }
        }

        Ok(Token::Array(elements))
    }

    fn read_dictionary(&mut self) -> ParseResult<Token> {
        self.context.enter(self.cursor.offset())?;
        let result = self.read_dictionary_body();
        self.context.exit();
        result
    }

    fn read_dictionary_body(&mut self) -> ParseResult<Token> {
        self.cursor.advance_by(2); // Skip '<<'
        let mut dict = HashMap::new();
        let mut pending_key: Option<PdfName> = None;

        while !self.at_dictionary_end() {
            let Some(token) = self.read_element()? else {
                continue;
            };
            match pending_key.take() {
                Some(key) => {
                    dict.insert(key, token);
                }
                None => match token {
                    Token::Name(key) => pending_key = Some(key),
                    other => debug!(
                        position = self.cursor.offset(),
                        token = ?other,
                        "dropping dictionary entry with non-name key"
                    ),
                },
            }
        }

        if let Some(key) = pending_key {
            debug!(key = %key, "dropping dictionary key without a value");
        }

        Ok(Token::Dictionary(dict))
    }

    /// Skip to the next entry; true when `>>` was consumed or input ran out
    fn at_dictionary_end(&mut self) -> bool {
        self.skip_whitespace_and_comments();
        match self.cursor.current_byte() {
            None => true,
            Some(b'>') if self.cursor.peek(1) == Some(b'>') => {
                self.cursor.advance_by(2);
                true
            }
            Some(_) => false,
        }
    }

    /// Classify and extract one element of an array or dictionary
    fn read_element(&mut self) -> ParseResult<Option<Token>> {
        let shape = self.classify();
        if shape == TokenShape::NoMore {
            return Ok(None);
        }
        let token = self.extract(shape)?;
        if token.is_none() {
            debug!(
                position = self.cursor.offset(),
                "discarding malformed numeric element"
            );
        }
        Ok(token)
    }
}

impl Iterator for ContentLexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.next_token() {
            Token::EndOfStream => None,
            token => Some(token),
        }
    }
}

/// Significant digits held exactly in the `u64` mantissa
const MAX_MANTISSA_DIGITS: usize = 19;

/// Powers of ten that are exact in an `f64`
const EXACT_POWERS_OF_TEN: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

/// Accumulate a numeric span
///
/// Returns the value, if any digit was seen, and how many bytes took part.
/// Accumulation stops at the first byte that is not a digit or the first
/// `.`; a leading `-` sets the sign.
///
/// Up to 19 significant digits go into an integer mantissa together with a
/// decimal exponent. When the mantissa fits in 53 bits and the scale is an
/// exact power of ten, one division gives the correctly rounded value. Longer
/// spans are handed to the standard decimal parser.
pub(crate) fn accumulate_number(span: &[u8]) -> (Option<f64>, usize) {
    let negative = span.first() == Some(&b'-');
    let mut index = usize::from(negative);

    let mut mantissa = 0u64;
    let mut significant = 0usize;
    let mut exponent = 0i64;
    let mut truncated = false;
    let mut in_fraction = false;
    let mut saw_digit = false;

    while let Some(&byte) = span.get(index) {
        match byte {
            b'0'..=b'9' => {
                saw_digit = true;
                if significant < MAX_MANTISSA_DIGITS {
                    mantissa = mantissa * 10 + u64::from(byte - b'0');
                    if mantissa > 0 {
                        significant += 1;
                    }
                    if in_fraction {
                        exponent -= 1;
                    }
                } else {
                    // Digits past the mantissa only shift the integer part
                    truncated = true;
                    if !in_fraction {
                        exponent += 1;
                    }
                }
            }
            b'.' if !in_fraction => in_fraction = true,
            _ => break,
        }
        index += 1;
    }

    if !saw_digit {
        return (None, index);
    }

    let scale = usize::try_from(-exponent)
        .ok()
        .and_then(|power| EXACT_POWERS_OF_TEN.get(power));
    let magnitude = match scale {
        Some(scale) if !truncated && mantissa <= 1 << 53 => mantissa as f64 / scale,
        _ => return (Some(parse_decimal(&span[..index], mantissa, exponent, negative)), index),
    };

    (Some(if negative { -magnitude } else { magnitude }), index)
}

/// Correctly rounded value of a long numeric span
fn parse_decimal(text: &[u8], mantissa: u64, exponent: i64, negative: bool) -> f64 {
    std::str::from_utf8(text)
        .ok()
        .and_then(|text| text.parse::<f64>().ok())
        .unwrap_or_else(|| {
            let exponent = exponent.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
            let magnitude = mantissa as f64 * 10f64.powi(exponent);
            if negative {
                -magnitude
            } else {
                magnitude
            }
        })
}

/// Decode an escaped digit run as base 8, keeping the low eight bits
fn decode_octal(digits: &[u8], position: usize) -> u8 {
    let parsed = std::str::from_utf8(digits)
        .ok()
        .and_then(|text| u16::from_str_radix(text, 8).ok());

    match parsed {
        Some(value) => (value & 0xFF) as u8,
        None => {
            info!(
                position,
                escape = %String::from_utf8_lossy(digits),
                "invalid octal escape in literal string, using 0"
            );
            0
        }
    }
}
