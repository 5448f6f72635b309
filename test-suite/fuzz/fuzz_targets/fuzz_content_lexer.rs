#![no_main]

use libfuzzer_sys::fuzz_target;
use bytes::Bytes;
use pdf_content_lexer::{ContentLexer, LexerOptions, Token};
use pdf_content_lexer_test_suite::{utils::tokenize_all, SegmentSplitter};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // The first byte seeds the split, the rest is the content stream
    let (seed, content) = data.split_at(1);
    // The segment-end EI rule depends on where segments break
    let options = LexerOptions::default().with_terminator_at_segment_end(false);

    let whole = vec![Bytes::copy_from_slice(content)];
    let Ok(mut whole) = ContentLexer::with_options(whole, options.clone()) else {
        return;
    };
    let expected = tokenize_all(&mut whole);
    assert!(expected.len() <= content.len());
    assert_eq!(whole.next_token(), Token::EndOfStream);

    let segments = SegmentSplitter::new(u64::from(seed[0]))
        .with_empty_segments(0.25)
        .split(content);
    if let Ok(mut split) = ContentLexer::with_options(segments, options) {
        assert_eq!(tokenize_all(&mut split), expected);
    }
});
