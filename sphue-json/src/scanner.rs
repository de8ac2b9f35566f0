// SPDX-License-Identifier: Apache-2.0

//! Character-class scanning straight on a [`ByteSource`].
//!
//! None of these rewind: a failed match leaves the source at the first byte
//! that did not match.

use crate::bitstack::NestingStack;
use crate::shared::is_whitespace;
use crate::{BitStackConfig, ByteSource, DecodeError, DefaultConfig};

/// Scanning primitives, available on every [`ByteSource`].
pub trait Scanner: ByteSource {
    /// Consumes whitespace and returns the next significant byte, unconsumed.
    fn skip_whitespace(&mut self) -> Option<u8> {
        while let Some(next) = self.peek() {
            if !is_whitespace(next) {
                return Some(next);
            }
            self.read();
        }
        None
    }

    /// Returns whether the next byte is `target`, without consuming it.
    ///
    /// With `skip_whitespace`, leading whitespace is consumed first.
    fn find_char(&mut self, target: u8, skip_whitespace: bool) -> bool {
        self.find_char_skipping_any(target, &[], skip_whitespace)
    }

    /// Like [`find_char`](Scanner::find_char), also consuming any `skip` bytes.
    fn find_char_skipping(&mut self, target: u8, skip: u8, skip_whitespace: bool) -> bool {
        self.find_char_skipping_any(target, &[skip], skip_whitespace)
    }

    /// Like [`find_char`](Scanner::find_char), also consuming any byte in `skip`.
    fn find_char_skipping_any(&mut self, target: u8, skip: &[u8], skip_whitespace: bool) -> bool {
        while let Some(next) = self.peek() {
            if next == target {
                return true;
            }
            if skip.contains(&next) || (skip_whitespace && is_whitespace(next)) {
                self.read();
            } else {
                return false;
            }
        }
        false
    }

    /// Whether the next byte is `byte`.
    fn peek_matches(&mut self, byte: u8) -> bool {
        self.peek() == Some(byte)
    }

    /// Consumes the next byte if it is `byte`.
    fn read_if(&mut self, byte: u8) -> bool {
        if self.peek_matches(byte) {
            self.read();
            return true;
        }
        false
    }

    /// Compares and consumes `literal` byte by byte.
    ///
    /// Stops at the first mismatch, leaving it unconsumed. The matched prefix
    /// stays consumed.
    fn read_matches(&mut self, literal: &str, case_sensitive: bool) -> bool {
        for expected in literal.bytes() {
            let Some(next) = self.peek() else {
                return false;
            };
            let matched = if case_sensitive {
                next == expected
            } else {
                next.eq_ignore_ascii_case(&expected)
            };
            if !matched {
                return false;
            }
            self.read();
        }
        true
    }

    /// Discards one value, stopping at the `,`, `]` or `}` that follows it.
    ///
    /// Nested containers are consumed through their matching closer and
    /// strings are consumed as a unit, so delimiters inside either do not stop
    /// the scan. The stopping delimiter is left unconsumed. Reaching the end
    /// of data outside any container is not an error.
    fn skip_value(&mut self) -> Result<(), DecodeError> {
        self.skip_value_with::<DefaultConfig>()
    }

    /// [`skip_value`](Scanner::skip_value) with a custom nesting capacity.
    fn skip_value_with<C: BitStackConfig>(&mut self) -> Result<(), DecodeError> {
        let mut stack = NestingStack::<C>::new();
        let mut skipped = 0usize;
        loop {
            let Some(byte) = self.peek() else {
                log::trace!("skip_value: end of data after {skipped} bytes");
                return if stack.is_empty() {
                    Ok(())
                } else {
                    Err(DecodeError::EndOfData)
                };
            };
            match byte {
                b',' if stack.is_empty() => break,
                b']' | b'}' => match stack.top() {
                    None => break,
                    Some(is_object) if is_object == (byte == b'}') => {
                        stack.pop();
                        self.read();
                    }
                    Some(_) => {
                        log::trace!("skip_value: mismatched '{}'", byte as char);
                        return Err(DecodeError::StructuralMismatch);
                    }
                },
                b'{' | b'[' => {
                    stack.push(byte == b'{')?;
                    self.read();
                }
                b'"' => {
                    self.read();
                    skip_string_body(self)?;
                }
                _ => {
                    self.read();
                }
            }
            skipped = skipped.saturating_add(1);
            self.yield_now();
        }
        log::trace!("skip_value: skipped {skipped} tokens");
        Ok(())
    }
}

impl<S: ByteSource + ?Sized> Scanner for S {}

/// Consumes string content after the opening quote, through the closing one.
fn skip_string_body<S: ByteSource + ?Sized>(src: &mut S) -> Result<(), DecodeError> {
    let mut escaped = false;
    while let Some(byte) = src.read() {
        match byte {
            _ if escaped => escaped = false,
            b'\\' => escaped = true,
            b'"' => return Ok(()),
            _ => {}
        }
        src.yield_now();
    }
    Err(DecodeError::EndOfData)
}
