// SPDX-License-Identifier: Apache-2.0

//! Streaming JSON for devices with a few kilobytes of RAM.
//!
//! Two halves:
//!
//! - [`Decoder`] pulls exactly the values a caller asks for out of a
//!   [`ByteSource`], one byte at a time, without ever holding the document.
//!   Records participate through the [`Model`] trait, arrays through the lazy
//!   [`ArraySequence`].
//! - [`Serializable`] is a small owned tree of JSON nodes that renders itself
//!   to text with [`ToJson::to_json`].
//!
//! ```
//! use sphue_json::{Decoder, DecodeError, ByteSource, Model, SliceSource};
//!
//! #[derive(Default)]
//! struct Bridge {
//!     id: String,
//!     ip: String,
//! }
//!
//! impl Model for Bridge {
//!     fn on_key<S: ByteSource + ?Sized>(
//!         &mut self,
//!         key: &str,
//!         decoder: &mut Decoder<'_, S>,
//!     ) -> Result<(), DecodeError> {
//!         match key {
//!             "id" => decoder.get_string_into(&mut self.id),
//!             "internalipaddress" => decoder.get_string_into(&mut self.ip),
//!             _ => Err(DecodeError::UnknownKey),
//!         }
//!     }
//! }
//!
//! let mut source = SliceSource::new(br#"{"id":"7","internalipaddress":"192.168.1.2"}"#);
//! let mut decoder = Decoder::new(&mut source);
//! let mut bridge = Bridge::default();
//! decoder.get_object(&mut bridge).unwrap();
//! assert_eq!(bridge.ip, "192.168.1.2");
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

// Compile-time configuration validation
mod config_check;

mod bitstack;
pub use bitstack::{
    ArrayBitBucket, ArrayBitStack, BitBucket, BitStackConfig, BitStackStruct, DefaultConfig,
    DepthCounter,
};

mod byte_source;
pub use byte_source::ByteSource;

mod slice_source;
pub use slice_source::SliceSource;

#[cfg(feature = "std")]
mod read_source;
#[cfg(feature = "std")]
pub use read_source::ReadSource;

mod decode_error;
pub use decode_error::DecodeError;

mod shared;
pub use shared::ValueKind;

mod scanner;
pub use scanner::Scanner;

#[cfg(feature = "unescape")]
mod escape_processor;

mod int_parser;

mod json_number;
pub use json_number::{ConfiguredInt, ParsedNumber};

mod decoder;
pub use decoder::Decoder;

mod model;
pub use model::{Decode, Model};

mod array_sequence;
pub use array_sequence::ArraySequence;

mod serializable;
pub use serializable::{
    JsonArray, JsonBool, JsonNumber, JsonObject, JsonString, NumberType, Serializable, ToJson,
};
