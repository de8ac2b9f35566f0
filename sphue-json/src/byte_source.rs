// SPDX-License-Identifier: Apache-2.0

/// A sequential, peekable, non-rewindable source of bytes.
///
/// This is the only thing the decoder needs from the transport. For network
/// input it is typically implemented over the response body of an HTTP
/// client; [`SliceSource`](crate::SliceSource) covers in-memory data.
///
/// # Contract
/// - `peek` **MUST NOT** consume; two `peek` calls without a `read` in
///   between return the same byte
/// - `None` from `peek`/`read` means the stream is finished; implementations
///   **MUST NOT** produce more bytes afterwards
pub trait ByteSource {
    /// Returns the next byte without consuming it.
    fn peek(&mut self) -> Option<u8>;

    /// Consumes and returns the next byte.
    fn read(&mut self) -> Option<u8>;

    /// Whether another byte can be read.
    fn available(&mut self) -> bool {
        self.peek().is_some()
    }

    /// Scheduler courtesy point.
    ///
    /// The decoder calls this inside long loops (digit runs, string content,
    /// value skipping, object members) so a source running on a cooperative
    /// scheduler can let the network stack and timers run. Control returns to
    /// the decoder immediately afterwards. The default does nothing.
    fn yield_now(&mut self) {}
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn peek(&mut self) -> Option<u8> {
        (**self).peek()
    }

    fn read(&mut self) -> Option<u8> {
        (**self).read()
    }

    fn available(&mut self) -> bool {
        (**self).available()
    }

    fn yield_now(&mut self) {
        (**self).yield_now()
    }
}
