//! Byte classification table
//!
//! Every byte the lexer inspects is looked up once in a 256-entry table built
//! at compile time. Classes overlap, so each entry is a set of flags.

use bitflags::bitflags;

bitflags! {
    /// Lexical classes of a single content stream byte
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CharClass: u8 {
        /// Any byte <= 0x20; skipped between tokens
        const WHITESPACE = 0b0000_0001;
        /// Structural delimiters that end names, booleans and keywords: `( ) < > [ ] /`
        const DELIMITER  = 0b0000_0010;
        /// Bytes in the ordinal range `-`..=`9`, scanned greedily as a number
        const NUMERIC    = 0b0000_0100;
        /// Decimal digits
        const DIGIT      = 0b0000_1000;
        /// Separators recognised around an inline image terminator: space, LF, FF, CR
        const SEPARATOR  = 0b0001_0000;
    }
}

const fn classify(byte: u8) -> u8 {
    let mut bits = 0;
    if byte <= 0x20 {
        bits |= CharClass::WHITESPACE.bits();
    }
    if matches!(byte, b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'/') {
        bits |= CharClass::DELIMITER.bits();
    }
    if byte >= b'-' && byte <= b'9' {
        bits |= CharClass::NUMERIC.bits();
    }
    if byte.is_ascii_digit() {
        bits |= CharClass::DIGIT.bits();
    }
    if matches!(byte, b' ' | b'\n' | 0x0C | b'\r') {
        bits |= CharClass::SEPARATOR.bits();
    }
    bits
}

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = classify(i as u8);
        i += 1;
    }
    table
}

static TABLE: [u8; 256] = build_table();

/// Look up the class set of a byte
#[inline]
pub fn class_of(byte: u8) -> CharClass {
    CharClass::from_bits_retain(TABLE[byte as usize])
}

#[inline]
pub fn is_whitespace(byte: u8) -> bool {
    class_of(byte).contains(CharClass::WHITESPACE)
}

#[inline]
pub fn is_delimiter(byte: u8) -> bool {
    class_of(byte).contains(CharClass::DELIMITER)
}

/// True for bytes that terminate a name, boolean or keyword span
#[inline]
pub fn is_token_end(byte: u8) -> bool {
    class_of(byte).intersects(CharClass::WHITESPACE | CharClass::DELIMITER)
}

#[inline]
pub fn is_number_byte(byte: u8) -> bool {
    class_of(byte).contains(CharClass::NUMERIC)
}

#[inline]
pub fn is_digit(byte: u8) -> bool {
    class_of(byte).contains(CharClass::DIGIT)
}

#[inline]
pub fn is_separator(byte: u8) -> bool {
    class_of(byte).contains(CharClass::SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_covers_control_range() {
        for byte in 0u8..=0x20 {
            assert!(is_whitespace(byte), "byte {byte:#04x}");
        }
        assert!(!is_whitespace(0x21));
        assert!(!is_whitespace(0xFF));
    }

    #[test]
    fn test_delimiters() {
        for &byte in b"()<>[]/" {
            assert!(is_delimiter(byte));
            assert!(is_token_end(byte));
        }
        assert!(!is_delimiter(b'%'));
        assert!(!is_delimiter(b'{'));
    }

    #[test]
    fn test_numeric_range_is_ordinal() {
        let numeric: Vec<u8> = (0u8..=255).filter(|&b| is_number_byte(b)).collect();
        assert_eq!(numeric, b"-./0123456789".to_vec());
    }

    #[test]
    fn test_separator_excludes_tab() {
        assert!(is_separator(b' '));
        assert!(is_separator(b'\n'));
        assert!(is_separator(b'\r'));
        assert!(is_separator(0x0C));
        assert!(!is_separator(b'\t'));
        assert!(!is_separator(0));
    }

    #[test]
    fn test_class_sets_combine() {
        assert_eq!(class_of(b'7'), CharClass::NUMERIC | CharClass::DIGIT);
        assert_eq!(class_of(b'/'), CharClass::DELIMITER | CharClass::NUMERIC);
        assert_eq!(class_of(b' '), CharClass::WHITESPACE | CharClass::SEPARATOR);
        assert!(class_of(b'q').is_empty());
    }
}
