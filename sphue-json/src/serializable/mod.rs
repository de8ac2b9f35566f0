// SPDX-License-Identifier: Apache-2.0

//! Owned JSON trees for building request bodies.
//!
//! A [`Serializable`] is one of five node kinds. Nodes render compactly, with
//! no whitespace between tokens, and rendering never changes the tree.
//! String content is written as stored: a [`JsonString`] must already hold
//! valid JSON string content, which [`JsonString::escaped`] produces from raw
//! text.

use alloc::string::String;
use core::fmt::{self, Write};

mod array;
mod number;
mod object;

pub use array::JsonArray;
pub use number::{JsonNumber, NumberType};
pub use object::JsonObject;

use crate::ConfiguredInt;

/// Rendering to compact JSON text.
pub trait ToJson {
    /// Writes the JSON text of `self` into `out`.
    fn write_json<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result;

    /// The JSON text of `self`.
    fn to_json(&self) -> String {
        let mut json = String::new();
        // Writing into a String cannot fail
        let _ = self.write_json(&mut json);
        json
    }
}

macro_rules! impl_display_via_json {
    ($($node:ty),*) => {
        $(
            impl fmt::Display for $node {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.write_json(f)
                }
            }
        )*
    };
}
pub(crate) use impl_display_via_json;

/// A string node. The content is emitted between quotes without escaping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonString {
    value: String,
}

impl JsonString {
    /// Wraps content that is already valid inside a JSON string.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Builds a node from raw text, escaping quotes, backslashes and control
    /// characters.
    pub fn escaped(text: &str) -> Self {
        let mut value = String::with_capacity(text.len());
        let mut last = 0;
        for (index, ch) in text.char_indices() {
            let short = match ch {
                '"' => Some("\\\""),
                '\\' => Some("\\\\"),
                '\n' => Some("\\n"),
                '\r' => Some("\\r"),
                '\t' => Some("\\t"),
                '\u{08}' => Some("\\b"),
                '\u{0C}' => Some("\\f"),
                _ if ch < ' ' => None,
                _ => continue,
            };
            value.push_str(&text[last..index]);
            match short {
                Some(escape) => value.push_str(escape),
                None => {
                    let _ = write!(value, "\\u{:04x}", u32::from(ch));
                }
            }
            last = index + ch.len_utf8();
        }
        value.push_str(&text[last..]);
        Self { value }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl ToJson for JsonString {
    fn write_json<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        out.write_char('"')?;
        out.write_str(&self.value)?;
        out.write_char('"')
    }
}

/// A `true`/`false` node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonBool {
    value: bool,
}

impl JsonBool {
    pub fn new(value: bool) -> Self {
        Self { value }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn set_value(&mut self, value: bool) {
        self.value = value;
    }
}

impl ToJson for JsonBool {
    fn write_json<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        out.write_str(if self.value { "true" } else { "false" })
    }
}

/// Any encoder node.
#[derive(Debug, Clone, PartialEq)]
pub enum Serializable {
    Str(JsonString),
    Bool(JsonBool),
    Number(JsonNumber),
    Array(JsonArray<Serializable>),
    Object(JsonObject),
}

impl ToJson for Serializable {
    fn write_json<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        match self {
            Serializable::Str(node) => node.write_json(out),
            Serializable::Bool(node) => node.write_json(out),
            Serializable::Number(node) => node.write_json(out),
            Serializable::Array(node) => node.write_json(out),
            Serializable::Object(node) => node.write_json(out),
        }
    }
}

impl_display_via_json!(JsonString, JsonBool, Serializable);

impl From<JsonString> for Serializable {
    fn from(node: JsonString) -> Self {
        Serializable::Str(node)
    }
}

impl From<JsonBool> for Serializable {
    fn from(node: JsonBool) -> Self {
        Serializable::Bool(node)
    }
}

impl From<JsonNumber> for Serializable {
    fn from(node: JsonNumber) -> Self {
        Serializable::Number(node)
    }
}

impl From<JsonObject> for Serializable {
    fn from(node: JsonObject) -> Self {
        Serializable::Object(node)
    }
}

impl<T: Into<Serializable>> From<JsonArray<T>> for Serializable {
    fn from(node: JsonArray<T>) -> Self {
        Serializable::Array(node.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for Serializable {
    fn from(value: &str) -> Self {
        Serializable::Str(JsonString::new(value))
    }
}

impl From<String> for Serializable {
    fn from(value: String) -> Self {
        Serializable::Str(JsonString::new(value))
    }
}

impl From<bool> for Serializable {
    fn from(value: bool) -> Self {
        Serializable::Bool(JsonBool::new(value))
    }
}

// Numbers that fit the configured integer width without loss
macro_rules! impl_from_int {
    ($($int_ty:ty),*) => {
        $(
            impl From<$int_ty> for Serializable {
                #[allow(clippy::useless_conversion)]
                fn from(value: $int_ty) -> Self {
                    Serializable::Number(JsonNumber::from(ConfiguredInt::from(value)))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, u8, u16);
#[cfg(feature = "int64")]
impl_from_int!(i64, u32);

impl From<f64> for Serializable {
    fn from(value: f64) -> Self {
        Serializable::Number(JsonNumber::from(value))
    }
}

impl From<f32> for Serializable {
    fn from(value: f32) -> Self {
        Serializable::Number(JsonNumber::from(value))
    }
}
