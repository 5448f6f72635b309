//! Lexer Benchmarks
//!
//! Throughput of tokenization and operation parsing over generated content
//! streams, whole and split into segments.

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pdf_content_lexer::{ContentLexer, ContentParser, Token};
use pdf_content_lexer_test_suite::{ContentStreamBuilder, SegmentSplitter};

/// Generate content streams of various sizes for benchmarking
fn generate_streams() -> Vec<(String, Vec<u8>)> {
    let mut streams = vec![(
        "sample_page".to_string(),
        ContentStreamBuilder::sample_page().build(),
    )];

    for operations in [100, 1_000, 10_000] {
        let content = ContentStreamBuilder::random(42, operations).build();
        streams.push((format!("random_{operations}"), content));
    }

    streams
}

fn count_tokens(mut lexer: ContentLexer) -> usize {
    let mut count = 0;
    while lexer.next_token() != Token::EndOfStream {
        count += 1;
    }
    count
}

/// Benchmark raw tokenization
fn benchmark_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for (name, content) in generate_streams() {
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::new("whole", &name), &content, |b, content| {
            b.iter(|| {
                let lexer = ContentLexer::from_slice(black_box(content)).unwrap();
                count_tokens(lexer)
            });
        });
    }

    group.finish();
}

/// Benchmark tokenization across segment boundaries
fn benchmark_segmented(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmented");
    let content = ContentStreamBuilder::random(7, 5_000).build();
    group.throughput(Throughput::Bytes(content.len() as u64));

    for max_segments in [1, 8, 64, 512] {
        let segments: Vec<Bytes> = SegmentSplitter::new(7)
            .with_max_segments(max_segments)
            .split(&content);
        group.bench_with_input(
            BenchmarkId::from_parameter(max_segments),
            &segments,
            |b, segments| {
                b.iter(|| {
                    let lexer = ContentLexer::new(black_box(segments.clone())).unwrap();
                    count_tokens(lexer)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark grouping tokens into operations
fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_operations");

    for (name, content) in generate_streams() {
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(&name), &content, |b, content| {
            b.iter(|| ContentParser::parse(black_box(content)).unwrap().len());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_tokenize,
    benchmark_segmented,
    benchmark_parse
);
criterion_main!(benches);
