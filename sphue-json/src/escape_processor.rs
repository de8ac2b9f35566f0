// SPDX-License-Identifier: Apache-2.0

use crate::{ByteSource, DecodeError};

/// Escape sequence decoding for string content, enabled by the `unescape`
/// feature. Without it, escapes are copied through verbatim.
pub(crate) struct EscapeProcessor;

impl EscapeProcessor {
    /// Process a simple escape sequence character and return the unescaped byte.
    ///
    /// # Arguments
    /// * `escape_char` - The character following the backslash in an escape sequence
    ///
    /// # Returns
    /// The unescaped byte value, or an error if the escape sequence is invalid.
    pub fn process_simple_escape(escape_char: u8) -> Result<u8, DecodeError> {
        match escape_char {
            b'n' => Ok(b'\n'),
            b't' => Ok(b'\t'),
            b'r' => Ok(b'\r'),
            b'\\' => Ok(b'\\'),
            b'"' => Ok(b'"'),
            b'/' => Ok(b'/'),
            b'b' => Ok(0x08), // Backspace
            b'f' => Ok(0x0C), // Form feed
            _ => Err(DecodeError::InvalidEscapeSequence),
        }
    }

    /// Numeric value (0-15) of a hex digit.
    pub fn validate_hex_digit(byte: u8) -> Result<u32, DecodeError> {
        match byte {
            b'0'..=b'9' => Ok(u32::from(byte - b'0')),
            b'a'..=b'f' => Ok(u32::from(byte - b'a') + 10),
            b'A'..=b'F' => Ok(u32::from(byte - b'A') + 10),
            _ => Err(DecodeError::InvalidUnicodeHex),
        }
    }

    /// Check if a Unicode codepoint is a surrogate half (0xD800-0xDFFF)
    pub fn is_surrogate(codepoint: u32) -> bool {
        (0xD800..=0xDFFF).contains(&codepoint)
    }

    /// Reads the `XXXX` of a `\uXXXX` escape and decodes it.
    ///
    /// Stops at the first non-hex byte, leaving it unconsumed. Surrogate
    /// pairs are not combined and fail with `InvalidUnicodeCodepoint`.
    pub fn read_unicode_escape<S: ByteSource + ?Sized>(src: &mut S) -> Result<char, DecodeError> {
        let mut codepoint = 0u32;
        for _ in 0..4 {
            let byte = src.peek().ok_or(DecodeError::EndOfData)?;
            codepoint = (codepoint << 4) | Self::validate_hex_digit(byte)?;
            src.read();
        }
        if Self::is_surrogate(codepoint) {
            return Err(DecodeError::InvalidUnicodeCodepoint);
        }
        char::from_u32(codepoint).ok_or(DecodeError::InvalidUnicodeCodepoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SliceSource;
    use test_log::test;

    #[test]
    fn test_simple_escapes() {
        assert_eq!(EscapeProcessor::process_simple_escape(b'n'), Ok(b'\n'));
        assert_eq!(EscapeProcessor::process_simple_escape(b'"'), Ok(b'"'));
        assert_eq!(EscapeProcessor::process_simple_escape(b'/'), Ok(b'/'));
        assert_eq!(EscapeProcessor::process_simple_escape(b'b'), Ok(0x08));
        assert_eq!(
            EscapeProcessor::process_simple_escape(b'x'),
            Err(DecodeError::InvalidEscapeSequence)
        );
    }

    #[test]
    fn test_hex_digits() {
        assert_eq!(EscapeProcessor::validate_hex_digit(b'7'), Ok(7));
        assert_eq!(EscapeProcessor::validate_hex_digit(b'a'), Ok(10));
        assert_eq!(EscapeProcessor::validate_hex_digit(b'F'), Ok(15));
        assert_eq!(
            EscapeProcessor::validate_hex_digit(b'g'),
            Err(DecodeError::InvalidUnicodeHex)
        );
    }

    #[test]
    fn test_unicode_escape() {
        let mut source = SliceSource::new(b"00e9rest");
        assert_eq!(EscapeProcessor::read_unicode_escape(&mut source), Ok('\u{e9}'));
        assert_eq!(source.remaining(), b"rest");
    }

    #[test]
    fn test_unicode_escape_errors() {
        let mut source = SliceSource::new(b"d83d");
        assert_eq!(
            EscapeProcessor::read_unicode_escape(&mut source),
            Err(DecodeError::InvalidUnicodeCodepoint)
        );
        let mut source = SliceSource::new(b"12z4");
        assert_eq!(
            EscapeProcessor::read_unicode_escape(&mut source),
            Err(DecodeError::InvalidUnicodeHex)
        );
        assert_eq!(source.remaining(), b"z4");
        let mut source = SliceSource::new(b"12");
        assert_eq!(
            EscapeProcessor::read_unicode_escape(&mut source),
            Err(DecodeError::EndOfData)
        );
    }
}
