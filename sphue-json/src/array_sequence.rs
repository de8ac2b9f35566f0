// SPDX-License-Identifier: Apache-2.0

use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::{ByteSource, Decode, DecodeError, Decoder, Model, Scanner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SequenceState {
    /// Positioned at the next element.
    HasMore,
    /// All elements read, `]` not yet consumed.
    Exhausted,
    /// `]` consumed, or closing failed.
    Finished,
}

/// Lazily decodes the elements of one array.
///
/// Created by [`Decoder::iterate_array`] with the opening `[` consumed. Each
/// step decodes one element and moves past the comma after it. An element
/// that fails to decode is skipped, so the following elements still decode.
///
/// The sequence must be closed to leave the decoder after the array's `]`.
/// [`finish`](ArraySequence::finish) closes it and reports whether the array
/// was well formed; dropping an unfinished sequence closes it as well,
/// skipping any elements that were not read.
pub struct ArraySequence<'d, 'a, S: ByteSource + ?Sized, T> {
    decoder: &'d mut Decoder<'a, S>,
    state: SequenceState,
    _element: PhantomData<fn() -> T>,
}

impl<'d, 'a, S: ByteSource + ?Sized, T> ArraySequence<'d, 'a, S, T> {
    pub(crate) fn new(decoder: &'d mut Decoder<'a, S>) -> Result<Self, DecodeError> {
        if !decoder.find_array() {
            return Err(decoder.type_mismatch());
        }
        let source = decoder.source();
        source.read();
        let state = if source.find_char(b']', true) {
            SequenceState::Exhausted
        } else {
            SequenceState::HasMore
        };
        Ok(Self {
            decoder,
            state,
            _element: PhantomData,
        })
    }

    /// Whether another element is waiting.
    pub fn has_next(&self) -> bool {
        self.state == SequenceState::HasMore
    }

    /// Decodes the next element into an existing model, reusing it.
    ///
    /// Returns `None` once the array has no more elements.
    pub fn next_into<M: Model>(&mut self, model: &mut M) -> Option<Result<(), DecodeError>> {
        if !self.has_next() {
            return None;
        }
        let result = self.decoder.get_object(model);
        Some(self.settle(result))
    }

    /// Skips whatever an element left behind on failure and probes for the
    /// next one.
    fn settle<V>(&mut self, result: Result<V, DecodeError>) -> Result<V, DecodeError> {
        if let Err(error) = &result {
            log::trace!("array element failed: {error}");
            self.decoder.resync();
        }
        let source = self.decoder.source();
        if source.find_char(b',', true) {
            source.read();
            self.state = SequenceState::HasMore;
        } else {
            self.state = SequenceState::Exhausted;
        }
        result
    }

    /// Closes the array, skipping any unread elements and consuming `]`.
    pub fn finish(mut self) -> Result<(), DecodeError> {
        self.close()
    }

    fn close(&mut self) -> Result<(), DecodeError> {
        loop {
            match self.state {
                SequenceState::HasMore => {
                    if let Err(error) = self.decoder.skip_value() {
                        self.state = SequenceState::Finished;
                        return Err(error);
                    }
                    self.settle(Ok(()))?;
                }
                SequenceState::Exhausted => {
                    self.state = SequenceState::Finished;
                    let source = self.decoder.source();
                    return if source.find_char(b']', true) {
                        source.read();
                        Ok(())
                    } else if source.available() {
                        Err(DecodeError::StructuralMismatch)
                    } else {
                        Err(DecodeError::EndOfData)
                    };
                }
                SequenceState::Finished => return Ok(()),
            }
        }
    }
}

impl<S: ByteSource + ?Sized, T: Decode> Iterator for ArraySequence<'_, '_, S, T> {
    type Item = Result<T, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_next() {
            return None;
        }
        let result = T::decode(&mut *self.decoder);
        Some(self.settle(result))
    }
}

impl<S: ByteSource + ?Sized, T: Decode> FusedIterator for ArraySequence<'_, '_, S, T> {}

impl<S: ByteSource + ?Sized, T> Drop for ArraySequence<'_, '_, S, T> {
    fn drop(&mut self) {
        if self.state == SequenceState::Finished {
            return;
        }
        if let Err(error) = self.close() {
            log::warn!("array dropped without finish, closing failed: {error}");
        }
    }
}
