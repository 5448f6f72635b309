//! Segment cursor
//!
//! A page's content may be stored as several stream objects whose
//! concatenation forms one logical content stream. [`SegmentCursor`] walks
//! those buffers as if they were contiguous, skipping zero-length segments.

use super::{ParseError, ParseResult};
use bytes::Bytes;

/// A saved cursor location, used to re-read bytes of the token being extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorMark {
    segment: usize,
    position: usize,
    base: usize,
}

impl CursorMark {
    /// Logical byte offset of the mark from the start of the stream
    pub fn offset(&self) -> usize {
        self.base + self.position
    }
}

/// Read position over an ordered list of byte segments
///
/// While not at the end, `position` always addresses a byte inside
/// `segments[segment]`.
#[derive(Debug, Clone)]
pub struct SegmentCursor {
    segments: Vec<Bytes>,
    segment: usize,
    position: usize,
    /// Total length of all segments before `segment`
    base: usize,
}

impl SegmentCursor {
    /// Create a cursor over the given segments
    ///
    /// Fails with [`ParseError::NoInput`] when no segments are supplied.
    pub fn new(segments: Vec<Bytes>) -> ParseResult<Self> {
        if segments.is_empty() {
            return Err(ParseError::NoInput);
        }

        let mut cursor = Self {
            segments,
            segment: 0,
            position: 0,
            base: 0,
        };
        cursor.skip_empty_segments();
        Ok(cursor)
    }

    /// Byte at the current position, or `None` once the input is exhausted
    #[inline]
    pub fn current_byte(&self) -> Option<u8> {
        self.segments
            .get(self.segment)
            .and_then(|segment| segment.get(self.position))
            .copied()
    }

    /// Move one byte forward, crossing into the next non-empty segment as needed
    #[inline]
    pub fn advance(&mut self) {
        let Some(len) = self.segments.get(self.segment).map(Bytes::len) else {
            return;
        };
        self.position += 1;
        if self.position >= len {
            self.next_segment(len);
        }
    }

    /// Move `count` bytes forward, stopping at the end of input
    pub fn advance_by(&mut self, mut count: usize) {
        while count > 0 {
            let Some(len) = self.segments.get(self.segment).map(Bytes::len) else {
                return;
            };
            let step = count.min(len - self.position);
            self.position += step;
            count -= step;
            if self.position >= len {
                self.next_segment(len);
            }
        }
    }

    /// Bytes left in the current segment, counting the current byte
    pub fn remaining_in_segment(&self) -> usize {
        self.segments
            .get(self.segment)
            .map_or(0, |segment| segment.len() - self.position)
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.segment >= self.segments.len()
    }

    /// Look `offset` bytes ahead of the current position, across segments
    pub fn peek(&self, offset: usize) -> Option<u8> {
        let mut index = self.segment;
        let mut position = self.position + offset;
        while let Some(segment) = self.segments.get(index) {
            if position < segment.len() {
                return Some(segment[position]);
            }
            position -= segment.len();
            index += 1;
        }
        None
    }

    pub fn mark(&self) -> CursorMark {
        CursorMark {
            segment: self.segment,
            position: self.position,
            base: self.base,
        }
    }

    /// Return to a previously saved mark
    pub fn reset(&mut self, mark: CursorMark) {
        self.segment = mark.segment;
        self.position = mark.position;
        self.base = mark.base;
    }

    /// Logical byte offset from the start of the stream
    pub fn offset(&self) -> usize {
        self.base + self.position
    }

    /// Index of the segment currently being read
    pub fn segment_index(&self) -> usize {
        self.segment
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    fn next_segment(&mut self, finished_len: usize) {
        self.base += finished_len;
        self.segment += 1;
        self.position = 0;
        self.skip_empty_segments();
    }

    fn skip_empty_segments(&mut self) {
        while self
            .segments
            .get(self.segment)
            .is_some_and(|segment| segment.is_empty())
        {
            self.segment += 1;
        }
    }
}
