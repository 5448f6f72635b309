//! Generated Content Stream Tests
//!
//! Streams written by the builder are parsed back, whole and split into random
//! segments, and compared against the operators that were written.

use bytes::Bytes;
use pdf_content_lexer::{
    ContentLexer, ContentParser, LexerOptions, OpCode, Operation, PdfName, PdfString, Token,
};
use pdf_content_lexer_test_suite::{
    generators::malformed_cases,
    utils::{init_tracing, tokenize_all},
    ContentStreamBuilder, SegmentSplitter,
};
use pretty_assertions::assert_eq;

fn parse_segments(segments: Vec<Bytes>, options: LexerOptions) -> Vec<Operation> {
    let lexer = ContentLexer::with_options(segments, options).unwrap();
    ContentParser::new(lexer)
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn operators(operations: &[Operation]) -> Vec<OpCode> {
    operations.iter().map(|op| op.operator).collect()
}

#[test]
fn test_sample_page_operators() {
    init_tracing();
    let builder = ContentStreamBuilder::sample_page();
    let operations = ContentParser::parse(&builder.build()).unwrap();
    assert_eq!(operators(&operations), builder.operators().to_vec());
}

#[test]
fn test_sample_page_operands() {
    let operations = ContentParser::parse(&ContentStreamBuilder::sample_page().build()).unwrap();

    let cm = &operations[1];
    assert_eq!(cm.operator, OpCode::Cm);
    assert_eq!(cm.numbers(), vec![1.0, 0.0, 0.0, 1.0, 72.0, 72.0]);

    let dash = &operations[3];
    assert_eq!(dash.operator, OpCode::D);
    assert_eq!(
        dash.operands,
        vec![
            Token::Array(vec![Token::Number(3.0), Token::Number(2.0)]),
            Token::Number(0.0),
        ]
    );

    let rg = &operations[4];
    assert_eq!(rg.numbers(), vec![0.2, 0.4, 0.6]);

    let show = operations
        .iter()
        .find(|op| op.operator == OpCode::Tj)
        .unwrap();
    assert_eq!(
        show.operands,
        vec![Token::LiteralString(PdfString(
            b"Hello (nested) \\ world".to_vec()
        ))]
    );

    let bdc = operations
        .iter()
        .find(|op| op.operator == OpCode::BDC)
        .unwrap();
    assert_eq!(bdc.operands[0], Token::Name(PdfName::new("P")));
    let Token::Dictionary(properties) = &bdc.operands[1] else {
        panic!("expected property dictionary, got {:?}", bdc.operands);
    };
    assert_eq!(properties[&PdfName::new("MCID")], Token::Number(0.0));

    let hex = operations
        .iter()
        .filter(|op| op.operator == OpCode::Tj)
        .nth(1)
        .unwrap();
    let Token::HexString(digits) = &hex.operands[0] else {
        panic!("expected hex string");
    };
    assert_eq!(digits.decode_hex(), b"Hex".to_vec());
}

#[test]
fn test_random_streams_round_trip() {
    init_tracing();
    for seed in 0..20 {
        let builder = ContentStreamBuilder::random(seed, 200);
        let operations = ContentParser::parse(&builder.build()).unwrap();
        assert_eq!(operators(&operations), builder.operators().to_vec(), "seed {seed}");
    }
}

#[test]
fn test_random_text_survives_escaping() {
    let mut builder = ContentStreamBuilder::new();
    let text: Vec<u8> = (0..=255u8).collect();
    builder.show_text(&text).show_hex_text(&text);

    let operations = ContentParser::parse(&builder.build()).unwrap();
    assert_eq!(
        operations[0].operands,
        vec![Token::LiteralString(PdfString(text.clone()))]
    );
    let Token::HexString(digits) = &operations[1].operands[0] else {
        panic!("expected hex string");
    };
    assert_eq!(digits.decode_hex(), text);
}

#[test]
fn test_inline_images_keep_their_payload() {
    let data = [0x00, 0x20, 0x0A, 0xFF, b'I', b'D'];
    let mut builder = ContentStreamBuilder::new();
    builder
        .save_state()
        .inline_image(3, 2, &data)
        .restore_state();

    let operations = ContentParser::parse(&builder.build()).unwrap();
    assert_eq!(operators(&operations), vec![OpCode::Qq, OpCode::BI, OpCode::Q]);

    let image = &operations[1];
    let Token::Dictionary(params) = &image.operands[0] else {
        panic!("expected image parameters");
    };
    assert_eq!(params[&PdfName::new("W")], Token::Number(3.0));
    assert_eq!(params[&PdfName::new("H")], Token::Number(2.0));
    assert_eq!(params[&PdfName::new("BPC")], Token::Number(8.0));
    assert_eq!(params[&PdfName::new("CS")], Token::Name(PdfName::new("G")));
    assert_eq!(image.operands[1], Token::InlineImagePayload(data.to_vec()));
}

#[test]
fn test_random_splits_match_whole_stream() {
    init_tracing();
    let mut splitter = SegmentSplitter::new(17)
        .with_max_segments(16)
        .with_empty_segments(0.3);

    for seed in 0..10 {
        let content = ContentStreamBuilder::random(seed, 100).build();
        let whole = ContentParser::parse(&content).unwrap();
        for _ in 0..10 {
            let split = parse_segments(splitter.split(&content), LexerOptions::default());
            assert_eq!(split, whole, "seed {seed}");
        }
    }
}

#[test]
fn test_split_token_streams_match() {
    let content = ContentStreamBuilder::sample_page().build();
    let mut whole = ContentLexer::from_slice(&content).unwrap();
    let expected = tokenize_all(&mut whole);

    let mut splitter = SegmentSplitter::new(5).with_max_segments(32);
    for _ in 0..50 {
        let mut lexer = ContentLexer::new(splitter.split(&content)).unwrap();
        assert_eq!(tokenize_all(&mut lexer), expected);
    }
}

fn draw(builder: &mut ContentStreamBuilder) {
    builder
        .save_state()
        .move_to(1.0, 2.5)
        .line_to(-3.0, 4.0)
        .stroke()
        .begin_text()
        .set_font("F1", 9.0)
        .show_text(b"x % not a comment")
        .end_text()
        .inline_image(1, 1, &[0x25, 0x0A])
        .restore_state();
}

#[test]
fn test_comments_and_layout_are_transparent() {
    let mut plain = ContentStreamBuilder::new();
    let mut commented = ContentStreamBuilder::new().with_comments(true);
    let mut compact = ContentStreamBuilder::new().with_line_breaks(false);
    draw(&mut plain);
    draw(&mut commented);
    draw(&mut compact);

    let expected = ContentParser::parse(&plain.build()).unwrap();
    assert_eq!(operators(&expected), plain.operators().to_vec());
    assert_eq!(ContentParser::parse(&commented.build()).unwrap(), expected);
    assert_eq!(ContentParser::parse(&compact.build()).unwrap(), expected);

    let mut headed = b"% header comment\r\n".to_vec();
    headed.extend_from_slice(&plain.build());
    assert_eq!(ContentParser::parse(&headed).unwrap(), expected);
}

#[test]
fn test_malformed_streams_recover() {
    init_tracing();
    for case in malformed_cases() {
        let operations = ContentParser::parse(case.input).unwrap();
        assert_eq!(operators(&operations), case.operators, "case {}", case.name);
    }
}

#[test]
fn test_malformed_streams_split() {
    // Splits may not create new EI terminators at segment ends
    let options = LexerOptions::default().with_terminator_at_segment_end(false);
    let mut splitter = SegmentSplitter::new(23).with_empty_segments(0.5);

    for case in malformed_cases() {
        for _ in 0..20 {
            let operations = parse_segments(splitter.split(case.input), options.clone());
            assert_eq!(operators(&operations), case.operators, "case {}", case.name);
        }
    }
}
