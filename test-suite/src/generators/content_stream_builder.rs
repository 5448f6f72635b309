//! Content Stream Builder
//!
//! A builder for creating content streams with specific characteristics. The
//! builder records the operator of every emitted operation so tests can
//! compare the parsed result against what was written.

use pdf_content_lexer::OpCode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Builder for creating test content streams
pub struct ContentStreamBuilder {
    content: Vec<u8>,
    operators: Vec<OpCode>,
    line_breaks: bool,
    comments: bool,
}

impl ContentStreamBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
            operators: Vec::new(),
            line_breaks: true,
            comments: false,
        }
    }

    /// End each operation with a line break (default) or a single space
    pub fn with_line_breaks(mut self, line_breaks: bool) -> Self {
        self.line_breaks = line_breaks;
        self
    }

    /// Follow each operation with a comment line
    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }

    pub fn save_state(&mut self) -> &mut Self {
        self.op(&[], OpCode::Qq)
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.op(&[], OpCode::Q)
    }

    pub fn transform(&mut self, matrix: [f64; 6]) -> &mut Self {
        let operands: Vec<String> = matrix.iter().map(|v| format_number(*v)).collect();
        self.op(&operands, OpCode::Cm)
    }

    pub fn line_width(&mut self, width: f64) -> &mut Self {
        self.op(&[format_number(width)], OpCode::Ww)
    }

    pub fn dash(&mut self, pattern: &[f64], phase: f64) -> &mut Self {
        let array = format_array(pattern);
        self.op(&[array, format_number(phase)], OpCode::D)
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.op(&[format_number(x), format_number(y)], OpCode::Mm)
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.op(&[format_number(x), format_number(y)], OpCode::L)
    }

    pub fn curve_to(&mut self, points: [f64; 6]) -> &mut Self {
        let operands: Vec<String> = points.iter().map(|v| format_number(*v)).collect();
        self.op(&operands, OpCode::C)
    }

    pub fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        let operands = [x, y, width, height].map(format_number);
        self.op(&operands, OpCode::Re)
    }

    pub fn close_path(&mut self) -> &mut Self {
        self.op(&[], OpCode::H)
    }

    pub fn fill(&mut self) -> &mut Self {
        self.op(&[], OpCode::Ff)
    }

    pub fn fill_even_odd(&mut self) -> &mut Self {
        self.op(&[], OpCode::FStar)
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.op(&[], OpCode::S)
    }

    pub fn fill_rgb(&mut self, r: f64, g: f64, b: f64) -> &mut Self {
        self.op(&[r, g, b].map(format_number), OpCode::Rg)
    }

    pub fn stroke_gray(&mut self, gray: f64) -> &mut Self {
        self.op(&[format_number(gray)], OpCode::G)
    }

    pub fn begin_text(&mut self) -> &mut Self {
        self.op(&[], OpCode::BT)
    }

    pub fn end_text(&mut self) -> &mut Self {
        self.op(&[], OpCode::ET)
    }

    pub fn set_font(&mut self, name: &str, size: f64) -> &mut Self {
        self.op(&[format!("/{name}"), format_number(size)], OpCode::Tf)
    }

    pub fn move_text(&mut self, x: f64, y: f64) -> &mut Self {
        self.op(&[format_number(x), format_number(y)], OpCode::Td)
    }

    /// Show a string, escaping it as a literal string
    pub fn show_text(&mut self, text: &[u8]) -> &mut Self {
        self.op(&[escape_literal(text)], OpCode::Tj)
    }

    /// Show a string written as a hex string
    pub fn show_hex_text(&mut self, text: &[u8]) -> &mut Self {
        let hex: String = text.iter().map(|b| format!("{b:02X}")).collect();
        self.op(&[format!("<{hex}>")], OpCode::Tj)
    }

    /// Show strings with kerning adjustments between them
    pub fn show_text_array(&mut self, parts: &[(&[u8], f64)]) -> &mut Self {
        let items: Vec<String> = parts
            .iter()
            .map(|(text, adjust)| {
                format!("{} {}", escape_literal(text), format_number(*adjust))
            })
            .collect();
        self.op(&[format!("[{}]", items.join(" "))], OpCode::TJ)
    }

    pub fn begin_marked_content(&mut self, tag: &str, mcid: u32) -> &mut Self {
        self.op(&[format!("/{tag}"), format!("<</MCID {mcid}>>")], OpCode::BDC)
    }

    pub fn end_marked_content(&mut self) -> &mut Self {
        self.op(&[], OpCode::EMC)
    }

    pub fn paint_xobject(&mut self, name: &str) -> &mut Self {
        self.op(&[format!("/{name}")], OpCode::Do)
    }

    /// Write an inline image; `data` must not contain an `EI` followed by a separator
    pub fn inline_image(&mut self, width: u32, height: u32, data: &[u8]) -> &mut Self {
        self.content.extend_from_slice(
            format!("BI /W {width} /H {height} /BPC 8 /CS /G ID ").as_bytes(),
        );
        self.content.extend_from_slice(data);
        self.content.extend_from_slice(b"\nEI");
        self.operators.push(OpCode::BI);
        self.end_operation();
        self
    }

    /// Operators written so far, in order
    pub fn operators(&self) -> &[OpCode] {
        &self.operators
    }

    /// Build the content stream
    pub fn build(&self) -> Vec<u8> {
        self.content.clone()
    }

    /// A page-like stream with graphics, text and marked content
    pub fn sample_page() -> Self {
        let mut builder = Self::new();
        builder
            .save_state()
            .transform([1.0, 0.0, 0.0, 1.0, 72.0, 72.0])
            .line_width(0.5)
            .dash(&[3.0, 2.0], 0.0)
            .fill_rgb(0.2, 0.4, 0.6)
            .rectangle(0.0, 0.0, 200.0, 100.0)
            .fill()
            .move_to(10.0, 10.0)
            .curve_to([20.0, 40.0, 60.0, 40.0, 80.0, 10.0])
            .close_path()
            .stroke()
            .restore_state()
            .begin_marked_content("P", 0)
            .begin_text()
            .set_font("F1", 12.0)
            .move_text(100.0, 700.0)
            .show_text(b"Hello (nested) \\ world")
            .show_text_array(&[(b"A".as_slice(), -120.0), (b"W".as_slice(), 30.5)])
            .show_hex_text(b"Hex")
            .end_text()
            .end_marked_content()
            .paint_xobject("Im1");
        builder
    }

    /// A stream of `operations` randomly chosen operations, reproducible from `seed`
    pub fn random(seed: u64, operations: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut builder = Self::new();
        for _ in 0..operations {
            let x = f64::from(rng.gen_range(-500i32..500)) / 4.0;
            let y = f64::from(rng.gen_range(-500i32..500)) / 4.0;
            match rng.gen_range(0..10) {
                0 => builder.move_to(x, y),
                1 => builder.line_to(x, y),
                2 => builder.rectangle(x, y, 10.0, 20.0),
                3 => builder.fill_rgb(0.25, 0.5, 0.75),
                4 => builder.line_width(x.abs()),
                5 => builder.move_text(x, y),
                6 => builder.show_text(&random_text(&mut rng)),
                7 => builder.show_hex_text(&random_text(&mut rng)),
                8 => builder.inline_image(2, 2, &random_image_data(&mut rng, 4)),
                _ => builder.stroke(),
            };
        }
        builder
    }

    fn op(&mut self, operands: &[String], operator: OpCode) -> &mut Self {
        for operand in operands {
            self.content.extend_from_slice(operand.as_bytes());
            self.content.push(b' ');
        }
        self.content.extend_from_slice(operator.keyword().as_bytes());
        self.operators.push(operator);
        self.end_operation();
        self
    }

    fn end_operation(&mut self) {
        if self.comments {
            self.content.extend_from_slice(b" % generated\n");
        } else if self.line_breaks {
            self.content.push(b'\n');
        } else {
            self.content.push(b' ');
        }
    }
}

impl Default for ContentStreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number the way content stream writers do: no exponent, no trailing `.0`
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

fn format_array(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| format_number(*v)).collect();
    format!("[{}]", items.join(" "))
}

/// Escape bytes as a literal string, using octal escapes for non-printable bytes
pub fn escape_literal(text: &[u8]) -> String {
    let mut out = String::from("(");
    for &b in text {
        match b {
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7E => out.push(b as char),
            _ => out.push_str(&format!("\\{b:03o}")),
        }
    }
    out.push(')');
    out
}

fn random_text(rng: &mut StdRng) -> Vec<u8> {
    let len = rng.gen_range(0..12);
    (0..len).map(|_| rng.gen::<u8>()).collect()
}

/// Random image bytes that never contain an `E`, so no false terminator can appear
pub fn random_image_data(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len)
        .map(|_| match rng.gen::<u8>() {
            b'E' => b'F',
            b => b,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operands_precede_operator() {
        let mut builder = ContentStreamBuilder::new().with_line_breaks(false);
        builder.move_to(1.0, 2.5).line_to(-3.0, 4.0).stroke();
        assert_eq!(builder.build(), b"1 2.5 m -3 4 l S ".to_vec());
        assert_eq!(builder.operators(), &[OpCode::Mm, OpCode::L, OpCode::S]);
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal(b"a(b)c\\"), "(a\\(b\\)c\\\\)");
        assert_eq!(escape_literal(&[0x00, b'x', 0xFF]), "(\\000x\\377)");
    }

    #[test]
    fn test_comments_follow_operations() {
        let mut builder = ContentStreamBuilder::new().with_comments(true);
        builder.save_state();
        assert_eq!(builder.build(), b"q % generated\n".to_vec());
    }

    #[test]
    fn test_random_is_reproducible() {
        let a = ContentStreamBuilder::random(7, 50);
        let b = ContentStreamBuilder::random(7, 50);
        assert_eq!(a.build(), b.build());
        assert_eq!(a.operators().len(), 50);
    }

    #[test]
    fn test_image_data_has_no_terminator_lead() {
        let mut rng = StdRng::seed_from_u64(1);
        let data = random_image_data(&mut rng, 4096);
        assert!(!data.contains(&b'E'));
    }
}
