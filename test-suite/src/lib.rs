//! Test Suite for pdf-content-lexer
//!
//! This crate provides generators for content streams (well-formed and
//! malformed), a random segment splitter, and shared helpers used by the
//! integration tests, benchmarks and fuzz targets.

pub mod generators;

pub use generators::{ContentStreamBuilder, MalformedCase, SegmentSplitter};

/// Common test utilities
pub mod utils {
    use pdf_content_lexer::{ContentLexer, Token};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    /// Install a log subscriber for tests, honouring `RUST_LOG`
    ///
    /// Safe to call from every test; only the first call installs it.
    pub fn init_tracing() {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "pdf_content_lexer=warn".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    }

    /// Tokenize a whole buffer, following `ID` with its inline image payload
    pub fn tokenize_all(lexer: &mut ContentLexer) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            match lexer.next_token() {
                Token::EndOfStream => return tokens,
                token => {
                    let is_image_start = token == Token::Operator(pdf_content_lexer::OpCode::ID);
                    tokens.push(token);
                    if is_image_start {
                        tokens.push(lexer.read_inline_image_data());
                    }
                }
            }
        }
    }
}
