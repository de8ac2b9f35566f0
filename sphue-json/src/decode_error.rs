// SPDX-License-Identifier: Apache-2.0

/// Errors that can occur while decoding.
///
/// Every failure is local: the decoder resynchronises on the next sibling
/// value, so a caller may keep decoding after any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// An expected delimiter, bracket or brace was absent.
    StructuralMismatch,
    /// The next value is not of the requested kind.
    TypeMismatch,
    /// A [`Model`](crate::Model) does not recognise this key.
    UnknownKey,
    /// The source ran out of bytes in the middle of a value.
    EndOfData,
    /// A number is malformed (`--1`, `1.`, `1e`, trailing junk).
    InvalidNumber,
    /// A number does not fit the requested type.
    NumericOverflow,
    /// String content is not valid UTF-8.
    InvalidUtf8,
    /// A skipped value nests deeper than the configured bit stack.
    NestingTooDeep,
    /// Invalid escape sequence character.
    InvalidEscapeSequence,
    /// Invalid hex digits in Unicode escape sequence.
    InvalidUnicodeHex,
    /// Valid hex but not a decodable codepoint (surrogates are not decoded).
    InvalidUnicodeCodepoint,
}

impl From<core::str::Utf8Error> for DecodeError {
    fn from(_: core::str::Utf8Error) -> Self {
        DecodeError::InvalidUtf8
    }
}

impl From<alloc::string::FromUtf8Error> for DecodeError {
    fn from(_: alloc::string::FromUtf8Error) -> Self {
        DecodeError::InvalidUtf8
    }
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            DecodeError::StructuralMismatch => "expected delimiter not found",
            DecodeError::TypeMismatch => "value has a different type",
            DecodeError::UnknownKey => "unrecognised key",
            DecodeError::EndOfData => "unexpected end of data",
            DecodeError::InvalidNumber => "malformed number",
            DecodeError::NumericOverflow => "number out of range",
            DecodeError::InvalidUtf8 => "invalid UTF-8 in string",
            DecodeError::NestingTooDeep => "value nested too deeply",
            DecodeError::InvalidEscapeSequence => "invalid escape sequence",
            DecodeError::InvalidUnicodeHex => "invalid hex digit in unicode escape",
            DecodeError::InvalidUnicodeCodepoint => "unsupported unicode codepoint",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec;

    #[test]
    fn test_utf8_error_conversion() {
        // Lone continuation byte, built at runtime to avoid the literal lint
        let invalid = vec![0b1000_0000u8];
        match core::str::from_utf8(&invalid) {
            Err(utf8_error) => assert_eq!(DecodeError::from(utf8_error), DecodeError::InvalidUtf8),
            Ok(_) => panic!("Expected UTF-8 validation to fail"),
        }
        match String::from_utf8(invalid) {
            Err(e) => assert_eq!(DecodeError::from(e), DecodeError::InvalidUtf8),
            Ok(_) => panic!("Expected UTF-8 validation to fail"),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(DecodeError::EndOfData.to_string(), "unexpected end of data");
        assert_eq!(DecodeError::UnknownKey.to_string(), "unrecognised key");
    }
}
