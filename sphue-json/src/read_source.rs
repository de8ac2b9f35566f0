// SPDX-License-Identifier: Apache-2.0

use std::io::{ErrorKind, Read};

use crate::ByteSource;

/// A [`ByteSource`] over any [`std::io::Read`], with one byte of lookahead.
///
/// Reads one byte at a time, so wrap unbuffered readers such as sockets in a
/// [`std::io::BufReader`]. An I/O error ends the stream; the error is kept
/// for the caller to inspect with [`ReadSource::take_error`].
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: R,
    lookahead: Option<u8>,
    finished: bool,
    error: Option<std::io::Error>,
}

impl<R: Read> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            lookahead: None,
            finished: false,
            error: None,
        }
    }

    /// Takes the I/O error that ended the stream, if any.
    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }

    /// Returns the wrapped reader. A peeked but unread byte is lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill(&mut self) {
        if self.lookahead.is_some() || self.finished {
            return;
        }
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    self.finished = true;
                    return;
                }
                Ok(_) => {
                    self.lookahead = Some(byte[0]);
                    return;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::warn!("ReadSource: ending stream after I/O error: {e}");
                    self.error = Some(e);
                    self.finished = true;
                    return;
                }
            }
        }
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    fn peek(&mut self) -> Option<u8> {
        self.fill();
        self.lookahead
    }

    fn read(&mut self) -> Option<u8> {
        self.fill();
        self.lookahead.take()
    }
}
