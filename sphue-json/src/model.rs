// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;
use alloc::vec::Vec;

use crate::{ByteSource, DecodeError, Decoder};

/// A record that receives an object's members one key at a time.
///
/// `on_key` must consume exactly one value from `decoder` when it returns
/// `Ok`. On `Err` the decoder skips whatever is left of the value, so a
/// model can reject keys it does not know with [`DecodeError::UnknownKey`]
/// without touching the decoder.
pub trait Model {
    fn on_key<S: ByteSource + ?Sized>(
        &mut self,
        key: &str,
        decoder: &mut Decoder<'_, S>,
    ) -> Result<(), DecodeError>;
}

/// Types that can be produced from the next value of a [`Decoder`].
///
/// Every `Model + Default` is decodable from an object.
pub trait Decode: Sized {
    fn decode<S: ByteSource + ?Sized>(decoder: &mut Decoder<'_, S>) -> Result<Self, DecodeError>;
}

impl<M: Model + Default> Decode for M {
    fn decode<S: ByteSource + ?Sized>(decoder: &mut Decoder<'_, S>) -> Result<Self, DecodeError> {
        let mut model = M::default();
        decoder.get_object(&mut model)?;
        Ok(model)
    }
}

impl Decode for bool {
    fn decode<S: ByteSource + ?Sized>(decoder: &mut Decoder<'_, S>) -> Result<Self, DecodeError> {
        decoder.get_bool()
    }
}

impl Decode for f64 {
    fn decode<S: ByteSource + ?Sized>(decoder: &mut Decoder<'_, S>) -> Result<Self, DecodeError> {
        decoder.get_f64()
    }
}

impl Decode for f32 {
    fn decode<S: ByteSource + ?Sized>(decoder: &mut Decoder<'_, S>) -> Result<Self, DecodeError> {
        decoder.get_f32()
    }
}

impl Decode for String {
    fn decode<S: ByteSource + ?Sized>(decoder: &mut Decoder<'_, S>) -> Result<Self, DecodeError> {
        decoder.get_string()
    }
}

// Integers go through the configured width and are narrowed with a range check
macro_rules! impl_decode_int {
    ($($int_ty:ty),*) => {
        $(
            impl Decode for $int_ty {
                #[allow(clippy::useless_conversion)]
                fn decode<S: ByteSource + ?Sized>(
                    decoder: &mut Decoder<'_, S>,
                ) -> Result<Self, DecodeError> {
                    let value = decoder.get_int()?;
                    <$int_ty>::try_from(value).map_err(|_| DecodeError::NumericOverflow)
                }
            }
        )*
    };
}

impl_decode_int!(u8, u16, u32, u64, i8, i16, i32, i64);

/// `null` decodes as `None`.
impl<T: Decode> Decode for Option<T> {
    fn decode<S: ByteSource + ?Sized>(decoder: &mut Decoder<'_, S>) -> Result<Self, DecodeError> {
        if decoder.check_value_type() == crate::ValueKind::Null {
            decoder.get_null()?;
            return Ok(None);
        }
        T::decode(decoder).map(Some)
    }
}

/// A whole array. The first bad element fails the array; the rest of it is
/// still consumed.
impl<T: Decode> Decode for Vec<T> {
    fn decode<S: ByteSource + ?Sized>(decoder: &mut Decoder<'_, S>) -> Result<Self, DecodeError> {
        let mut sequence = decoder.iterate_array::<T>()?;
        let mut values = Vec::new();
        for value in sequence.by_ref() {
            values.push(value?);
        }
        sequence.finish()?;
        Ok(values)
    }
}
