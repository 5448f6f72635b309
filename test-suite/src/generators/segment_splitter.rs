//! Segment Splitter
//!
//! Splits a content stream into several buffers at random offsets, the way a
//! page whose `/Contents` is an array of streams arrives at the lexer.

use bytes::Bytes;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// Random, reproducible splitter of content streams into segments
pub struct SegmentSplitter {
    rng: StdRng,
    max_segments: usize,
    empty_segment_ratio: f64,
}

impl SegmentSplitter {
    /// Create a splitter seeded for reproducible output
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_segments: 8,
            empty_segment_ratio: 0.0,
        }
    }

    /// Upper bound on the number of non-empty split points
    pub fn with_max_segments(mut self, max_segments: usize) -> Self {
        self.max_segments = max_segments.max(1);
        self
    }

    /// Probability of inserting an empty segment after each piece
    pub fn with_empty_segments(mut self, ratio: f64) -> Self {
        self.empty_segment_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Split `data` into segments whose concatenation equals `data`
    pub fn split(&mut self, data: &[u8]) -> Vec<Bytes> {
        let data = Bytes::copy_from_slice(data);
        let pieces = self.rng.gen_range(1..=self.max_segments);

        let mut offsets: Vec<usize> = (1..pieces)
            .map(|_| self.rng.gen_range(0..=data.len()))
            .collect();
        offsets.sort_unstable();

        let mut segments = Vec::with_capacity(pieces * 2);
        let mut start = 0;
        for end in offsets.into_iter().chain(std::iter::once(data.len())) {
            segments.push(data.slice(start..end));
            start = end;
            if self.rng.gen_bool(self.empty_segment_ratio) {
                segments.push(Bytes::new());
            }
        }

        trace!(len = data.len(), segments = segments.len(), "split content stream");
        segments
    }
}
