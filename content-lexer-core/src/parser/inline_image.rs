//! Inline image data extraction
//!
//! Between `ID` and `EI` an inline image carries raw bytes whose length the
//! stream grammar does not state. The data ends at the first `EI` that is
//! followed by a separator, or that sits at the very end of a segment (some
//! producers omit the trailing separator).

use super::char_class;
use super::lexer::{ContentLexer, Token};
use tracing::info;

impl ContentLexer {
    /// Read inline image data up to its `EI` terminator
    ///
    /// Call this right after the lexer returned `Operator(ID)`. The single
    /// whitespace byte following `ID` is skipped, and one whitespace byte before
    /// `EI` is not part of the payload. If no terminator is found the bytes
    /// read so far are returned.
    pub fn read_inline_image_data(&mut self) -> Token {
        let start = self.cursor.offset();
        if self
            .cursor
            .current_byte()
            .is_some_and(char_class::is_whitespace)
        {
            self.cursor.advance();
        }

        let mut data = Vec::new();
        while let Some(byte) = self.cursor.current_byte() {
            if byte == b'E' && self.cursor.peek(1) == Some(b'I') && self.is_image_terminator() {
                if data.last().is_some_and(|&b| char_class::is_whitespace(b)) {
                    data.pop();
                }
                self.cursor.advance_by(2);
                return Token::InlineImagePayload(data);
            }
            data.push(byte);
            self.cursor.advance();
        }

        info!(
            position = start,
            len = data.len(),
            "inline image data has no EI terminator"
        );
        Token::InlineImagePayload(data)
    }

    /// Decide whether the `EI` at the cursor ends the image data
    fn is_image_terminator(&self) -> bool {
        if self.options.accept_terminator_at_segment_end && self.cursor.remaining_in_segment() == 2
        {
            return true;
        }
        match self.cursor.peek(2) {
            Some(follower) => char_class::is_separator(follower),
            None => true,
        }
    }
}
