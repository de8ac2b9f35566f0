// SPDX-License-Identifier: Apache-2.0

/// Shape of the next undecoded value, sniffed from its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `"`
    String,
    /// a digit or `-`
    Number,
    /// `{`
    Object,
    /// `[`
    Array,
    /// `t` or `f`
    Bool,
    /// `n`
    Null,
    /// Anything else, including end of data.
    Invalid,
}

impl ValueKind {
    /// Classifies a value by its first byte.
    pub fn from_first_byte(byte: u8) -> Self {
        match byte {
            b'"' => ValueKind::String,
            b'-' | b'0'..=b'9' => ValueKind::Number,
            b'{' => ValueKind::Object,
            b'[' => ValueKind::Array,
            b't' | b'f' => ValueKind::Bool,
            b'n' => ValueKind::Null,
            _ => ValueKind::Invalid,
        }
    }
}

/// JSON insignificant whitespace.
pub(crate) const fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Bytes that end a value at the current nesting level.
pub(crate) const fn is_delimiter(byte: u8) -> bool {
    matches!(byte, b',' | b']' | b'}')
}
