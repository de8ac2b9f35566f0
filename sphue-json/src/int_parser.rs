// SPDX-License-Identifier: Apache-2.0

// Digit-at-a-time integer accumulation, in the manner of core::num's radix parser

/// Builds an integer one decimal digit at a time with overflow detection.
///
/// Negative numbers are accumulated negatively from the start so the
/// minimum value of the type is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IntAccumulator<T> {
    value: Option<T>,
    negative: bool,
}

macro_rules! define_accumulator {
    ($($int_ty:ty),*) => {
        $(
            impl IntAccumulator<$int_ty> {
                pub const fn new(negative: bool) -> Self {
                    Self {
                        value: Some(0),
                        negative,
                    }
                }

                /// Appends one digit (0-9). Once overflowed, stays overflowed.
                pub fn push_digit(&mut self, digit: u8) {
                    let digit = digit as $int_ty;
                    self.value = self.value.and_then(|value| {
                        let shifted = value.checked_mul(10)?;
                        if self.negative {
                            shifted.checked_sub(digit)
                        } else {
                            shifted.checked_add(digit)
                        }
                    });
                }

                /// The accumulated value, `None` if it overflowed.
                pub const fn value(&self) -> Option<$int_ty> {
                    self.value
                }
            }
        )*
    };
}

// Generate the accumulator for the configured width.
#[cfg(feature = "int32")]
define_accumulator!(i32);
#[cfg(feature = "int64")]
define_accumulator!(i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "int64")]
    mod test_i64 {
        use super::*;

        fn accumulate(negative: bool, digits: &[u8]) -> Option<i64> {
            let mut acc = IntAccumulator::<i64>::new(negative);
            for &d in digits {
                acc.push_digit(d - b'0');
            }
            acc.value()
        }

        #[test]
        fn test_simple() {
            assert_eq!(accumulate(false, b"0"), Some(0));
            assert_eq!(accumulate(false, b"1234567890"), Some(1234567890));
            assert_eq!(accumulate(true, b"1234567890"), Some(-1234567890));
        }

        #[test]
        fn test_limits() {
            assert_eq!(accumulate(false, b"9223372036854775807"), Some(i64::MAX));
            assert_eq!(accumulate(true, b"9223372036854775808"), Some(i64::MIN));
        }

        #[test]
        fn test_overflow_is_sticky() {
            assert_eq!(accumulate(false, b"9223372036854775808"), None);
            assert_eq!(accumulate(true, b"9223372036854775809"), None);
            assert_eq!(accumulate(false, b"92233720368547758080"), None);
        }
    }

    #[cfg(feature = "int32")]
    mod test_i32 {
        use super::*;

        fn accumulate(negative: bool, digits: &[u8]) -> Option<i32> {
            let mut acc = IntAccumulator::<i32>::new(negative);
            for &d in digits {
                acc.push_digit(d - b'0');
            }
            acc.value()
        }

        #[test]
        fn test_simple() {
            assert_eq!(accumulate(false, b"12345"), Some(12345));
            assert_eq!(accumulate(true, b"42"), Some(-42));
        }

        #[test]
        fn test_limits() {
            assert_eq!(accumulate(false, b"2147483647"), Some(i32::MAX));
            assert_eq!(accumulate(true, b"2147483648"), Some(i32::MIN));
        }

        #[test]
        fn test_overflow_is_sticky() {
            assert_eq!(accumulate(false, b"2147483648"), None);
            assert_eq!(accumulate(false, b"99999999999"), None);
        }
    }
}
