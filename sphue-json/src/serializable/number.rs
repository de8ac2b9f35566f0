// SPDX-License-Identifier: Apache-2.0

use core::fmt::{self, Write};

use super::{impl_display_via_json, ToJson};
use crate::ConfiguredInt;

/// Which representation a [`JsonNumber`] currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberType {
    Int,
    Double,
    Float,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum NumberValue {
    Int(ConfiguredInt),
    Double(f64),
    Float(f32),
}

/// A number node holding exactly one active representation.
///
/// Reading a different representation converts on the fly; switching with
/// [`set_type`](JsonNumber::set_type) converts the stored value, so a
/// double switched to an integer is truncated toward zero for good.
/// Two numbers are equal only when both the representation and the value
/// match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsonNumber {
    value: NumberValue,
}

impl JsonNumber {
    pub fn number_type(&self) -> NumberType {
        match self.value {
            NumberValue::Int(_) => NumberType::Int,
            NumberValue::Double(_) => NumberType::Double,
            NumberValue::Float(_) => NumberType::Float,
        }
    }

    /// The value as an integer; floats are truncated and saturate at the
    /// integer bounds, NaN reads as 0.
    pub fn as_int(&self) -> ConfiguredInt {
        match self.value {
            NumberValue::Int(value) => value,
            NumberValue::Double(value) => value as ConfiguredInt,
            NumberValue::Float(value) => value as ConfiguredInt,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self.value {
            NumberValue::Int(value) => value as f64,
            NumberValue::Double(value) => value,
            NumberValue::Float(value) => f64::from(value),
        }
    }

    pub fn as_f32(&self) -> f32 {
        match self.value {
            NumberValue::Int(value) => value as f32,
            NumberValue::Double(value) => value as f32,
            NumberValue::Float(value) => value,
        }
    }

    pub fn set_int(&mut self, value: ConfiguredInt) {
        self.value = NumberValue::Int(value);
    }

    pub fn set_f64(&mut self, value: f64) {
        self.value = NumberValue::Double(value);
    }

    pub fn set_f32(&mut self, value: f32) {
        self.value = NumberValue::Float(value);
    }

    /// Converts the stored value to `number_type`. No-op when it already is.
    pub fn set_type(&mut self, number_type: NumberType) {
        self.value = match number_type {
            NumberType::Int => NumberValue::Int(self.as_int()),
            NumberType::Double => NumberValue::Double(self.as_f64()),
            NumberType::Float => NumberValue::Float(self.as_f32()),
        };
    }
}

impl From<ConfiguredInt> for JsonNumber {
    fn from(value: ConfiguredInt) -> Self {
        Self {
            value: NumberValue::Int(value),
        }
    }
}

impl From<f64> for JsonNumber {
    fn from(value: f64) -> Self {
        Self {
            value: NumberValue::Double(value),
        }
    }
}

impl From<f32> for JsonNumber {
    fn from(value: f32) -> Self {
        Self {
            value: NumberValue::Float(value),
        }
    }
}

// Past these magnitudes the plain decimal form gets long
const LARGE: f64 = 1e16;
const SMALL: f64 = 1e-5;

fn is_exponential(value: f64) -> bool {
    let magnitude = if value < 0.0 { -value } else { value };
    magnitude >= LARGE || (magnitude != 0.0 && magnitude < SMALL)
}

/// Floats use the shortest text that reads back to the same value. JSON has
/// no NaN or infinities, so those render as `null`.
impl ToJson for JsonNumber {
    fn write_json<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        match self.value {
            NumberValue::Int(value) => write!(out, "{value}"),
            NumberValue::Double(value) if !value.is_finite() => out.write_str("null"),
            NumberValue::Double(value) if is_exponential(value) => write!(out, "{value:e}"),
            NumberValue::Double(value) => write!(out, "{value}"),
            NumberValue::Float(value) if !value.is_finite() => out.write_str("null"),
            NumberValue::Float(value) if is_exponential(f64::from(value)) => {
                write!(out, "{value:e}")
            }
            NumberValue::Float(value) => write!(out, "{value}"),
        }
    }
}

impl_display_via_json!(JsonNumber);
