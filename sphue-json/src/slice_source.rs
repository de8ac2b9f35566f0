// SPDX-License-Identifier: Apache-2.0

//! A convenience [`ByteSource`] over an in-memory byte slice.
//!
//! Useful for tests, buffered HTTP bodies, and documents already held in
//! RAM. For production I/O you'll typically implement [`ByteSource`] for
//! your transport directly:
//!
//! - **Network**: the body reader of your HTTP client
//! - **UART/Serial**: a ring buffer filled from an interrupt handler
//! - **std**: [`ReadSource`](crate::ReadSource) behind the `std` feature
//!
//! # Examples
//!
//! ```rust
//! use sphue_json::{Decoder, SliceSource};
//!
//! let mut source = SliceSource::new(br#"  "hello" "#);
//! let mut decoder = Decoder::new(&mut source);
//! assert_eq!(decoder.get_string().unwrap(), "hello");
//! ```

use crate::ByteSource;

/// A [`ByteSource`] that reads from a byte slice.
///
/// Besides the position it counts how often the decoder hit a scheduler
/// courtesy point, which tests use to check long loops stay cooperative.
#[derive(Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
    yields: usize,
}

impl<'a> SliceSource<'a> {
    /// Create a new source positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            yields: 0,
        }
    }

    /// Create a source over UTF-8 text.
    pub fn from_text(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The unconsumed tail of the input.
    pub fn remaining(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or_default()
    }

    /// Number of [`ByteSource::yield_now`] calls received.
    pub fn yields(&self) -> usize {
        self.yields
    }
}

impl ByteSource for SliceSource<'_> {
    fn peek(&mut self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn read(&mut self) -> Option<u8> {
        let byte = self.data.get(self.pos).copied()?;
        self.pos = self.pos.saturating_add(1);
        Some(byte)
    }

    fn yield_now(&mut self) {
        self.yields = self.yields.saturating_add(1);
    }
}
