//! Content Stream Generators
//!
//! This module provides utilities for generating content streams and splitting
//! them into segments programmatically.

pub mod content_stream_builder;
pub mod malformed;
pub mod segment_splitter;

pub use content_stream_builder::ContentStreamBuilder;
pub use malformed::{malformed_cases, MalformedCase};
pub use segment_splitter::SegmentSplitter;
