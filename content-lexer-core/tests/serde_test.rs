//! Serialization of tokens and operations (requires the `serde` feature)

#![cfg(feature = "serde")]

use pdf_content_lexer::{ContentParser, OpCode, Operation, Token};

#[test]
fn test_operations_survive_json() {
    let ops = ContentParser::parse(b"BT /F1 9 Tf [(a) -20 (b)] TJ ET BI /W 1 ID \x7F EI").unwrap();

    let json = serde_json::to_string(&ops).unwrap();
    let restored: Vec<Operation> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, ops);
}

#[test]
fn test_opcode_serializes_by_variant_name() {
    let json = serde_json::to_string(&Token::Operator(OpCode::TStar)).unwrap();
    assert_eq!(json, r#"{"Operator":"TStar"}"#);
}
