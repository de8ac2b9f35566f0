// SPDX-License-Identifier: Apache-2.0

//! Streaming number accumulation.
//!
//! Numbers are converted while their digits stream past, without buffering
//! the text: an exact integer is accumulated alongside a decimal significand
//! and exponent, and the value is `significand × 10^exponent`.

use core::fmt::{self, Write};
use core::str::FromStr;

use crate::int_parser::IntAccumulator;
use crate::shared::{is_delimiter, is_whitespace};
use crate::{ByteSource, DecodeError, Scanner};

// Type alias for the configured integer type
#[cfg(feature = "int32")]
pub type ConfiguredInt = i32;
#[cfg(feature = "int64")]
pub type ConfiguredInt = i64;

/// Largest significand that can take one more digit without overflowing.
const SIGNIFICAND_LIMIT: u64 = (u64::MAX - 9) / 10;

/// Decimal exponents past this are infinity or zero for any significand.
const EXPONENT_LIMIT: i32 = 400;

/// A JSON number read from a [`ByteSource`].
///
/// Holds both the exact integer (when the text had no fraction or exponent
/// and fits [`ConfiguredInt`]) and a decimal significand/exponent pair for
/// floating point conversion. Significand digits past 19 are dropped, the
/// documented precision limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedNumber {
    negative: bool,
    significand: u64,
    exponent: i32,
    integral: bool,
    exact: Option<ConfiguredInt>,
}

impl ParsedNumber {
    fn new(negative: bool) -> Self {
        Self {
            negative,
            significand: 0,
            exponent: 0,
            integral: true,
            exact: None,
        }
    }

    fn push_significant(&mut self, digit: u8, fractional: bool) {
        if self.significand <= SIGNIFICAND_LIMIT {
            self.significand = self.significand * 10 + u64::from(digit);
            if fractional {
                self.exponent = self.exponent.saturating_sub(1);
            }
        } else if !fractional {
            self.exponent = self.exponent.saturating_add(1);
        }
    }

    /// True when the text had neither a fraction nor an exponent.
    pub fn is_integer(&self) -> bool {
        self.integral
    }

    /// True when the text started with `-`, including `-0`.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The value as `f64`; `-0` keeps its sign.
    pub fn as_f64(&self) -> f64 {
        let magnitude = scale(self.significand, self.exponent);
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// The value as `f32`.
    pub fn as_f32(&self) -> f32 {
        self.as_f64() as f32
    }

    /// The value as the configured integer type.
    ///
    /// Integers are exact. Numbers with a fraction or exponent are truncated
    /// toward zero, so `3.7` gives `3` and `1e3` gives `1000`.
    pub fn as_int(&self) -> Result<ConfiguredInt, DecodeError> {
        if self.integral {
            return self.exact.ok_or(DecodeError::NumericOverflow);
        }
        let value = self.as_f64();
        let lower = ConfiguredInt::MIN as f64;
        if value >= lower && value < -lower {
            Ok(value as ConfiguredInt)
        } else {
            Err(DecodeError::NumericOverflow)
        }
    }
}

/// `significand × 10^exponent`, correctly rounded.
///
/// The accumulated pair is at most 20 digits and a short exponent, so it is
/// written out on the stack and converted by `f64::from_str`.
fn scale(significand: u64, exponent: i32) -> f64 {
    if significand == 0 {
        return 0.0;
    }
    let exponent = exponent.clamp(-EXPONENT_LIMIT, EXPONENT_LIMIT);
    let mut text = DecimalText::default();
    if write!(text, "{significand}e{exponent}").is_err() {
        return f64::NAN;
    }
    text.as_str()
        .and_then(|digits| f64::from_str(digits).ok())
        .unwrap_or(f64::NAN)
}

/// Fixed buffer holding the `<digits>e<exponent>` form of a number.
#[derive(Default)]
struct DecimalText {
    buf: [u8; 32],
    len: usize,
}

impl DecimalText {
    fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.buf.get(..self.len)?).ok()
    }
}

impl fmt::Write for DecimalText {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        let slot = self.buf.get_mut(self.len..end).ok_or(fmt::Error)?;
        slot.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

fn peek_digit<S: ByteSource + ?Sized>(src: &mut S) -> Option<u8> {
    match src.peek()? {
        byte @ b'0'..=b'9' => Some(byte - b'0'),
        _ => None,
    }
}

/// Reads one number: `-`? digits (`.` digits)? ([eE] [+-]? digits)?
///
/// The number must be followed by whitespace, a delimiter or the end of
/// data. On error the source is left at the offending byte.
pub(crate) fn read_number<S: ByteSource + ?Sized>(
    src: &mut S,
) -> Result<ParsedNumber, DecodeError> {
    let negative = src.read_if(b'-');
    let mut number = ParsedNumber::new(negative);
    let mut exact = IntAccumulator::<ConfiguredInt>::new(negative);

    let mut digits = 0usize;
    while let Some(digit) = peek_digit(src) {
        src.read();
        exact.push_digit(digit);
        number.push_significant(digit, false);
        digits += 1;
        src.yield_now();
    }
    if digits == 0 {
        return Err(DecodeError::InvalidNumber);
    }
    number.exact = exact.value();

    if src.read_if(b'.') {
        number.integral = false;
        let mut fraction_digits = 0usize;
        while let Some(digit) = peek_digit(src) {
            src.read();
            number.push_significant(digit, true);
            fraction_digits += 1;
            src.yield_now();
        }
        if fraction_digits == 0 {
            return Err(DecodeError::InvalidNumber);
        }
    }

    if matches!(src.peek(), Some(b'e' | b'E')) {
        src.read();
        number.integral = false;
        let exponent_negative = src.read_if(b'-');
        if !exponent_negative {
            src.read_if(b'+');
        }
        let mut exponent: i32 = 0;
        let mut exponent_digits = 0usize;
        while let Some(digit) = peek_digit(src) {
            src.read();
            exponent = exponent.saturating_mul(10).saturating_add(i32::from(digit));
            exponent_digits += 1;
            src.yield_now();
        }
        if exponent_digits == 0 {
            return Err(DecodeError::InvalidNumber);
        }
        let exponent = if exponent_negative { -exponent } else { exponent };
        number.exponent = number.exponent.saturating_add(exponent);
    }

    match src.peek() {
        Some(byte) if !is_whitespace(byte) && !is_delimiter(byte) => Err(DecodeError::InvalidNumber),
        _ => Ok(number),
    }
}
