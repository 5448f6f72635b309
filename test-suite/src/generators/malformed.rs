//! Malformed Content Streams
//!
//! Real-world producers write content streams that bend the grammar: keywords
//! and numbers without separators, stray delimiters, missing terminators. Each
//! case lists the operators a tolerant parser must still recover.

use pdf_content_lexer::OpCode;

/// A malformed content stream and the operators expected from it
#[derive(Debug, Clone)]
pub struct MalformedCase {
    pub name: &'static str,
    pub input: &'static [u8],
    pub operators: Vec<OpCode>,
}

impl MalformedCase {
    fn new(name: &'static str, input: &'static [u8], operators: &[OpCode]) -> Self {
        Self {
            name,
            input,
            operators: operators.to_vec(),
        }
    }
}

/// All malformed cases
pub fn malformed_cases() -> Vec<MalformedCase> {
    use OpCode::*;

    vec![
        MalformedCase::new("glued_rectangle_fill", b"0 0 10 10 ref", &[Re, Ff]),
        MalformedCase::new("glued_state_operators", b"qq 1 0 0 1 0 0 cmQQ", &[Qq, Qq, Cm, Q, Q]),
        MalformedCase::new("glued_text_object", b"BT/F1 9 Tf(x)Tj ET", &[BT, Tf, Tj, ET]),
        MalformedCase::new("number_then_name", b"/F1 12/F2 Tf", &[Tf]),
        MalformedCase::new("keyword_then_number", b"10 20 m5 5 l", &[Mm, L]),
        MalformedCase::new("double_decimal_point", b"1.2.3 w S", &[Ww, S]),
        MalformedCase::new("lone_signs_and_points", b"- . -. 1 w", &[Ww]),
        MalformedCase::new("comment_without_space", b"q%save state\nQ%restore", &[Qq, Q]),
        MalformedCase::new("stray_closers", b") ] > Q", &[NoOp, NoOp, NoOp, Q]),
        MalformedCase::new("unknown_keyword", b"1 2 zz Q", &[NoOp, Q]),
        MalformedCase::new("null_operand", b"null Q", &[NoOp, Q]),
        MalformedCase::new("invalid_octal_escape", b"(bad\\8escape) Tj", &[Tj]),
        MalformedCase::new("unterminated_string", b"(never closed Tj ET", &[]),
        MalformedCase::new(
            "unterminated_dictionary",
            b"/Tag <</MCID 0 BDC EMC",
            &[],
        ),
        MalformedCase::new(
            "inline_image_without_trailing_separator",
            b"BI /W 1 /H 1 ID \x00\x01EI",
            &[BI],
        ),
        MalformedCase::new(
            "inline_image_with_false_terminator",
            b"BI /W 4 /H 1 ID EIxy EI Q",
            &[BI, Q],
        ),
        MalformedCase::new("inline_image_without_terminator", b"BI /W 1 ID \x01\x02", &[BI]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_case_names_are_unique() {
        let cases = malformed_cases();
        let names: HashSet<_> = cases.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), cases.len());
    }
}
