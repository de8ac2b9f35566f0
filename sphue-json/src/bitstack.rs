// SPDX-License-Identifier: Apache-2.0

//! Bit-per-level nesting tracker used while skipping values.
//!
//! Each open container occupies one bit (`true` for an object, `false` for
//! an array), so skipping a deeply nested value needs neither recursion nor
//! a heap allocation.

use core::ops::{BitAnd, BitOr, Not, Shl};

use crate::DecodeError;

/// Addressable bit storage for the nesting tracker.
///
/// Implemented for all unsigned integer types and for [`ArrayBitBucket`].
pub trait BitBucket: Default {
    /// Number of bits (and therefore nesting levels) this bucket holds.
    fn capacity() -> usize;
    /// Stores `bit` at `index`. Indexes at or past capacity are ignored.
    fn set(&mut self, index: usize, bit: bool);
    /// Reads the bit at `index`. Indexes at or past capacity read as `false`.
    fn get(&self, index: usize) -> bool;
}

impl<T> BitBucket for T
where
    T: Shl<usize, Output = T>
        + BitAnd<T, Output = T>
        + BitOr<Output = T>
        + Not<Output = T>
        + PartialEq
        + Copy
        + Default
        + From<u8>,
{
    fn capacity() -> usize {
        core::mem::size_of::<T>() * 8
    }

    fn set(&mut self, index: usize, bit: bool) {
        if index >= Self::capacity() {
            return;
        }
        let mask = T::from(1) << index;
        *self = if bit { *self | mask } else { *self & !mask };
    }

    fn get(&self, index: usize) -> bool {
        if index >= Self::capacity() {
            return false;
        }
        (*self & (T::from(1) << index)) != T::from(0)
    }
}

/// Trait for depth counters - tracks nesting depth.
///
/// Provides overflow-checked operations. Implemented for all unsigned
/// integer types.
pub trait DepthCounter: core::fmt::Debug + Copy + Default {
    /// Increment depth, `None` on overflow
    fn increment(self) -> Option<Self>;
    /// Decrement depth, `None` on underflow
    fn decrement(self) -> Option<Self>;
    /// Current depth as an index
    fn as_usize(self) -> usize;
}

macro_rules! impl_depth_counter {
    ($($t:ty),*) => {
        $(
            impl DepthCounter for $t {
                #[inline]
                fn increment(self) -> Option<Self> { self.checked_add(1) }

                #[inline]
                fn decrement(self) -> Option<Self> { self.checked_sub(1) }

                #[inline]
                fn as_usize(self) -> usize { self as usize }
            }
        )*
    };
}

impl_depth_counter!(u8, u16, u32, usize);

/// Configuration trait for the nesting tracker - defines bucket and counter types.
pub trait BitStackConfig {
    /// Bit storage, one bit per open container.
    type Bucket: BitBucket;
    /// Depth counter.
    type Counter: DepthCounter;
}

/// Default configuration: a [u64] bucket and a [u8] counter, 64 levels deep.
pub struct DefaultConfig;

impl BitStackConfig for DefaultConfig {
    type Bucket = u64;
    type Counter = u8;
}

/// Custom bucket and counter types.
///
/// Example: `BitStackStruct<u128, u8>` skips values nested 128 levels deep.
pub struct BitStackStruct<B, C> {
    _phantom: core::marker::PhantomData<(B, C)>,
}

impl<B: BitBucket, C: DepthCounter> BitStackConfig for BitStackStruct<B, C> {
    type Bucket = B;
    type Counter = C;
}

/// Array-backed configuration for very deep documents.
///
/// `ArrayBitStack<4, u64, u16>` tracks 256 levels.
pub type ArrayBitStack<const N: usize, T, D> = BitStackStruct<ArrayBitBucket<N, T>, D>;

/// Array-backed [`BitBucket`] made of `N` integer buckets.
#[derive(Debug)]
pub struct ArrayBitBucket<const N: usize, T>(pub [T; N]);

impl<const N: usize, T: Default + Copy> Default for ArrayBitBucket<N, T> {
    fn default() -> Self {
        ArrayBitBucket([T::default(); N])
    }
}

impl<const N: usize, T: BitBucket + Copy> BitBucket for ArrayBitBucket<N, T> {
    fn capacity() -> usize {
        N * T::capacity()
    }

    fn set(&mut self, index: usize, bit: bool) {
        let width = T::capacity();
        if let Some(bucket) = self.0.get_mut(index / width) {
            bucket.set(index % width, bit);
        }
    }

    fn get(&self, index: usize) -> bool {
        let width = T::capacity();
        self.0
            .get(index / width)
            .is_some_and(|bucket| bucket.get(index % width))
    }
}

/// Stack of open containers, `true` meaning object.
pub(crate) struct NestingStack<C: BitStackConfig> {
    bits: C::Bucket,
    depth: C::Counter,
}

impl<C: BitStackConfig> NestingStack<C> {
    pub fn new() -> Self {
        Self {
            bits: C::Bucket::default(),
            depth: C::Counter::default(),
        }
    }

    pub fn push(&mut self, is_object: bool) -> Result<(), DecodeError> {
        let index = self.depth.as_usize();
        if index >= C::Bucket::capacity() {
            return Err(DecodeError::NestingTooDeep);
        }
        self.depth = self.depth.increment().ok_or(DecodeError::NestingTooDeep)?;
        self.bits.set(index, is_object);
        Ok(())
    }

    /// Pops the innermost container, `None` when nothing is open.
    pub fn pop(&mut self) -> Option<bool> {
        let depth = self.depth.decrement()?;
        self.depth = depth;
        Some(self.bits.get(depth.as_usize()))
    }

    /// Innermost container without popping it.
    pub fn top(&self) -> Option<bool> {
        let depth = self.depth.decrement()?;
        Some(self.bits.get(depth.as_usize()))
    }

    pub fn is_empty(&self) -> bool {
        self.depth.as_usize() == 0
    }
}
