// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "unescape")]
use crate::escape_processor::EscapeProcessor;
use crate::json_number::{read_number, ConfiguredInt, ParsedNumber};
use crate::shared::{is_delimiter, is_whitespace};
use crate::{
    ArraySequence, BitStackConfig, ByteSource, Decode, DecodeError, Model, Scanner, ValueKind,
};

/// A pull decoder over a borrowed [`ByteSource`].
///
/// The decoder holds no state of its own beyond the source's cursor: each
/// getter consumes exactly one value, and when it fails it skips the rest of
/// that value so the next sibling can still be decoded.
///
/// # Example
/// ```
/// use sphue_json::{Decoder, SliceSource, ValueKind};
///
/// let mut source = SliceSource::new(br#"[200, "on"] "#);
/// let mut decoder = Decoder::new(&mut source);
/// assert_eq!(decoder.check_value_type(), ValueKind::Array);
/// let mut values = decoder.iterate_array::<String>().unwrap();
/// assert_eq!(values.next(), Some(Err(sphue_json::DecodeError::TypeMismatch)));
/// assert_eq!(values.next().unwrap().unwrap(), "on");
/// assert!(!values.has_next());
/// values.finish().unwrap();
/// ```
pub struct Decoder<'a, S: ByteSource + ?Sized> {
    src: &'a mut S,
}

impl<'a, S: ByteSource + ?Sized> Decoder<'a, S> {
    /// Creates a decoder positioned at the source's current byte.
    pub fn new(src: &'a mut S) -> Self {
        Self { src }
    }

    /// The underlying source.
    pub fn source(&mut self) -> &mut S {
        self.src
    }

    /// Classifies the next value without consuming it.
    ///
    /// Leading whitespace is consumed. End of data reads as
    /// [`ValueKind::Invalid`].
    pub fn check_value_type(&mut self) -> ValueKind {
        self.src
            .skip_whitespace()
            .map_or(ValueKind::Invalid, ValueKind::from_first_byte)
    }

    /// Whether the next value is an array. Lookahead only.
    pub fn find_array(&mut self) -> bool {
        self.src.find_char(b'[', true)
    }

    /// Whether the next value is an object. Lookahead only.
    pub fn find_object(&mut self) -> bool {
        self.src.find_char(b'{', true)
    }

    /// Discards the next value. See [`Scanner::skip_value`].
    pub fn skip_value(&mut self) -> Result<(), DecodeError> {
        self.src.skip_value()
    }

    /// Discards the next value with a custom nesting capacity.
    pub fn skip_value_with<C: BitStackConfig>(&mut self) -> Result<(), DecodeError> {
        self.src.skip_value_with::<C>()
    }

    /// Skips the value in front of the cursor and reports a type mismatch.
    pub(crate) fn type_mismatch(&mut self) -> DecodeError {
        self.resync();
        DecodeError::TypeMismatch
    }

    /// Skips to the next delimiter after a failed read.
    pub(crate) fn resync(&mut self) {
        if let Err(error) = self.src.skip_value() {
            log::trace!("resync: skip failed: {error}");
        }
    }

    /// Whether the cursor sits right after a complete scalar.
    fn at_value_end(&mut self) -> bool {
        self.src
            .peek()
            .map_or(true, |byte| is_whitespace(byte) || is_delimiter(byte))
    }

    /// Decodes `true` or `false`.
    pub fn get_bool(&mut self) -> Result<bool, DecodeError> {
        let value = match self.src.skip_whitespace() {
            Some(b't') => self.src.read_matches("true", true).then_some(true),
            Some(b'f') => self.src.read_matches("false", true).then_some(false),
            _ => None,
        };
        match value {
            Some(value) if self.at_value_end() => Ok(value),
            _ => Err(self.type_mismatch()),
        }
    }

    /// Decodes `null`.
    pub fn get_null(&mut self) -> Result<(), DecodeError> {
        if self.src.find_char(b'n', true) && self.src.read_matches("null", true) && self.at_value_end()
        {
            return Ok(());
        }
        Err(self.type_mismatch())
    }

    /// Decodes a number, keeping both its exact integer and float views.
    pub fn get_number(&mut self) -> Result<ParsedNumber, DecodeError> {
        if self.check_value_type() != ValueKind::Number {
            return Err(self.type_mismatch());
        }
        match read_number(&mut *self.src) {
            Ok(number) => Ok(number),
            Err(error) => {
                self.resync();
                Err(error)
            }
        }
    }

    /// Decodes a number as the configured integer type.
    ///
    /// Numbers with a fraction or exponent are truncated toward zero.
    pub fn get_int(&mut self) -> Result<ConfiguredInt, DecodeError> {
        self.get_number()?.as_int()
    }

    /// Decodes a number as `f64`.
    pub fn get_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(self.get_number()?.as_f64())
    }

    /// Decodes a number as `f32`.
    pub fn get_f32(&mut self) -> Result<f32, DecodeError> {
        Ok(self.get_number()?.as_f32())
    }

    /// Decodes a string.
    pub fn get_string(&mut self) -> Result<String, DecodeError> {
        let mut value = String::new();
        self.get_string_into(&mut value)?;
        Ok(value)
    }

    /// Decodes a string into `dest`, replacing its contents and reusing its
    /// allocation.
    ///
    /// Without the `unescape` feature a backslash and the byte after it are
    /// copied through as-is; the escape only keeps `\"` from ending the
    /// string. With it, simple escapes and `\uXXXX` are decoded.
    pub fn get_string_into(&mut self, dest: &mut String) -> Result<(), DecodeError> {
        if !self.src.find_char(b'"', true) {
            return Err(self.type_mismatch());
        }
        self.src.read();
        let mut bytes = core::mem::take(dest).into_bytes();
        bytes.clear();
        self.read_string_body(&mut bytes)?;
        *dest = String::from_utf8(bytes)?;
        Ok(())
    }

    /// Consumes string content through the closing quote.
    ///
    /// An escape error does not stop the scan, so the cursor always ends up
    /// past the string when the quote is there.
    fn read_string_body(&mut self, out: &mut Vec<u8>) -> Result<(), DecodeError> {
        let mut escaped = false;
        let mut failure = None;
        loop {
            let byte = self.src.read().ok_or(DecodeError::EndOfData)?;
            if escaped {
                escaped = false;
                if let Err(error) = self.push_escaped(byte, out) {
                    failure = failure.or(Some(error));
                }
            } else {
                match byte {
                    b'\\' => escaped = true,
                    b'"' => break,
                    _ => out.push(byte),
                }
            }
            self.src.yield_now();
        }
        failure.map_or(Ok(()), Err)
    }

    #[cfg(not(feature = "unescape"))]
    fn push_escaped(&mut self, escape: u8, out: &mut Vec<u8>) -> Result<(), DecodeError> {
        out.push(b'\\');
        out.push(escape);
        Ok(())
    }

    #[cfg(feature = "unescape")]
    fn push_escaped(&mut self, escape: u8, out: &mut Vec<u8>) -> Result<(), DecodeError> {
        if escape == b'u' {
            let decoded = EscapeProcessor::read_unicode_escape(&mut *self.src)?;
            let mut utf8 = [0u8; 4];
            out.extend_from_slice(decoded.encode_utf8(&mut utf8).as_bytes());
        } else {
            out.push(EscapeProcessor::process_simple_escape(escape)?);
        }
        Ok(())
    }

    /// Decodes the next scalar as text, whatever its type.
    ///
    /// Strings decode as with [`get_string`](Decoder::get_string); numbers,
    /// booleans and `null` yield their literal text, e.g. `"3.50"` for
    /// `3.50`. Objects and arrays are a type mismatch.
    pub fn get_as_string(&mut self) -> Result<String, DecodeError> {
        let mut value = String::new();
        self.get_as_string_into(&mut value)?;
        Ok(value)
    }

    /// [`get_as_string`](Decoder::get_as_string) into an existing buffer.
    pub fn get_as_string_into(&mut self, dest: &mut String) -> Result<(), DecodeError> {
        match self.check_value_type() {
            ValueKind::String => self.get_string_into(dest),
            ValueKind::Number | ValueKind::Bool | ValueKind::Null => {
                let mut bytes = core::mem::take(dest).into_bytes();
                bytes.clear();
                while let Some(byte) = self.src.peek() {
                    if is_whitespace(byte) || is_delimiter(byte) {
                        break;
                    }
                    bytes.push(byte);
                    self.src.read();
                    self.src.yield_now();
                }
                *dest = String::from_utf8(bytes)?;
                Ok(())
            }
            ValueKind::Object | ValueKind::Array | ValueKind::Invalid => {
                Err(self.type_mismatch())
            }
        }
    }

    /// Decodes an object by handing each member to `model`, in document order.
    ///
    /// When `on_key` fails, for an unknown key or a bad value, the rest of the
    /// member's value is skipped and decoding continues with the next key.
    /// Only a broken object structure fails the call.
    pub fn get_object<M: Model>(&mut self, model: &mut M) -> Result<(), DecodeError> {
        self.src.yield_now();
        if !self.find_object() {
            return Err(self.type_mismatch());
        }
        self.src.read();
        let mut key = String::new();
        while self.src.find_char_skipping(b'"', b',', true) {
            // The key string is consumed through its closing quote even when
            // it fails to decode, so the member can still be skipped.
            let key_result = self.get_string_into(&mut key);
            if !self.src.find_char(b':', true) {
                return Err(self.structural_error());
            }
            self.src.read();
            self.src.skip_whitespace();
            let outcome = match key_result {
                Ok(()) => model.on_key(&key, self),
                Err(error) => {
                    log::debug!("get_object: skipping member with undecodable key: {error}");
                    self.skip_value()?;
                    self.src.yield_now();
                    continue;
                }
            };
            if let Err(error) = outcome {
                log::debug!("get_object: skipping value of \"{key}\": {error}");
                self.skip_value()?;
            }
            self.src.yield_now();
        }
        if self.src.read_if(b'}') {
            Ok(())
        } else {
            Err(self.structural_error())
        }
    }

    fn structural_error(&mut self) -> DecodeError {
        if self.src.available() {
            DecodeError::StructuralMismatch
        } else {
            DecodeError::EndOfData
        }
    }

    /// Decodes the next value as `T`.
    pub fn get<T: Decode>(&mut self) -> Result<T, DecodeError> {
        T::decode(self)
    }

    /// Starts lazily decoding an array of `T`.
    ///
    /// The returned sequence finishes the array when dropped; see
    /// [`ArraySequence`].
    pub fn iterate_array<T: Decode>(&mut self) -> Result<ArraySequence<'_, 'a, S, T>, DecodeError> {
        ArraySequence::new(self)
    }
}
