#![no_main]

use libfuzzer_sys::fuzz_target;
use pdf_content_lexer::{ContentParser, OpCode, Token};

fuzz_target!(|data: &[u8]| {
    let Ok(operations) = ContentParser::parse(data) else {
        return;
    };

    for operation in operations {
        if operation.operator == OpCode::BI {
            assert_eq!(operation.operands.len(), 2);
            assert!(matches!(operation.operands[0], Token::Dictionary(_)));
            assert!(matches!(operation.operands[1], Token::InlineImagePayload(_)));
        }
    }
});
