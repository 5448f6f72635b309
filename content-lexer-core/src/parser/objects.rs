//! Name and string values
//!
//! Thin wrappers around the bytes of name and string tokens. Callers that
//! keep their own object model can unwrap them without copying.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// PDF Name object
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PdfName(pub String);

/// PDF String object
///
/// Holds raw bytes exactly as decoded from the stream; no text encoding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PdfString(pub Vec<u8>);

impl PdfString {
    /// Create a new PDF string
    pub fn new(data: Vec<u8>) -> Self {
        PdfString(data)
    }

    /// Get as UTF-8 string if possible
    pub fn as_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.0)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Decode the payload as hexadecimal text
    ///
    /// Hex string tokens keep their digits undecoded; this converts them to
    /// bytes. Whitespace is ignored, other non-hex bytes are skipped, and an
    /// odd trailing digit is padded with `0`.
    pub fn decode_hex(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.0.len() / 2);
        let mut nibble: Option<u8> = None;

        for &ch in &self.0 {
            let digit = match ch {
                b'0'..=b'9' => ch - b'0',
                b'A'..=b'F' => ch - b'A' + 10,
                b'a'..=b'f' => ch - b'a' + 10,
                _ => continue,
            };
            match nibble.take() {
                Some(high) => result.push((high << 4) | digit),
                None => nibble = Some(digit),
            }
        }

        if let Some(high) = nibble {
            result.push(high << 4);
        }
        result
    }
}

impl From<&[u8]> for PdfString {
    fn from(bytes: &[u8]) -> Self {
        PdfString(bytes.to_vec())
    }
}

impl PdfName {
    /// Create a new PDF name
    pub fn new(name: impl Into<String>) -> Self {
        PdfName(name.into())
    }

    /// Get the name as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build a name from raw bytes, widening each byte to one character
    pub fn from_latin1(bytes: &[u8]) -> Self {
        PdfName(bytes.iter().map(|&b| b as char).collect())
    }
}

impl std::fmt::Display for PdfName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex() {
        assert_eq!(PdfString(b"48656C6C6F".to_vec()).decode_hex(), b"Hello".to_vec());
        assert_eq!(PdfString(b"48 65\n6c".to_vec()).decode_hex(), b"Hel".to_vec());
    }

    #[test]
    fn test_decode_hex_odd_digit_is_padded() {
        assert_eq!(PdfString(b"901FA".to_vec()).decode_hex(), vec![0x90, 0x1F, 0xA0]);
        assert!(PdfString(Vec::new()).decode_hex().is_empty());
    }

    #[test]
    fn test_name_from_latin1() {
        let name = PdfName::from_latin1(&[b'F', b'1', 0xE9]);
        assert_eq!(name.as_str(), "F1\u{e9}");
        assert_eq!(name.to_string(), "/F1\u{e9}");
    }

    #[test]
    fn test_string_accessors() {
        let s = PdfString::new(b"abc".to_vec());
        assert_eq!(s.as_bytes(), b"abc");
        assert_eq!(s.as_str().unwrap(), "abc");
        assert!(PdfString(vec![0xFF]).as_str().is_err());
    }
}
