//! Stack-safe parsing utilities
//!
//! Arrays and dictionaries are extracted by recursive descent. This module
//! bounds that recursion so adversarial input such as `[[[[...` fails cleanly
//! instead of overflowing the stack.

use super::{ParseError, ParseResult};

/// Default maximum nesting depth for arrays and dictionaries
pub const MAX_NESTING_DEPTH: usize = 512;

/// Stack-safe parsing context
#[derive(Debug, Clone)]
pub struct StackSafeContext {
    /// Current recursion depth
    pub depth: usize,
    /// Maximum allowed depth
    pub max_depth: usize,
}

impl Default for StackSafeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl StackSafeContext {
    /// Create a new stack-safe context
    pub fn new() -> Self {
        Self::with_limit(MAX_NESTING_DEPTH)
    }

    /// Create a new context with a custom limit
    pub fn with_limit(max_depth: usize) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    /// Enter a new recursion level
    ///
    /// `position` is the stream offset of the opening delimiter, reported on failure.
    pub fn enter(&mut self, position: usize) -> ParseResult<()> {
        if self.depth + 1 > self.max_depth {
            return Err(ParseError::RecursionLimit {
                position,
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Exit a recursion level
    pub fn exit(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_exit() {
        let mut ctx = StackSafeContext::new();
        assert_eq!(ctx.depth, 0);

        ctx.enter(0).unwrap();
        ctx.enter(1).unwrap();
        assert_eq!(ctx.depth, 2);

        ctx.exit();
        ctx.exit();
        assert_eq!(ctx.depth, 0);

        // Exiting at zero stays at zero
        ctx.exit();
        assert_eq!(ctx.depth, 0);
    }

    #[test]
    fn test_limit_exceeded() {
        let mut ctx = StackSafeContext::with_limit(2);
        ctx.enter(0).unwrap();
        ctx.enter(1).unwrap();

        let err = ctx.enter(7).unwrap_err();
        assert_eq!(
            err,
            ParseError::RecursionLimit {
                position: 7,
                limit: 2
            }
        );
        assert_eq!(ctx.depth, 2);
    }

    #[test]
    fn test_zero_limit_rejects_everything() {
        let mut ctx = StackSafeContext::with_limit(0);
        assert!(ctx.enter(0).is_err());
    }
}
