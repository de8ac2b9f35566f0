// SPDX-License-Identifier: Apache-2.0

use alloc::vec::{self, Vec};
use core::fmt::{self, Write};
use core::slice;

use super::ToJson;

/// An ordered array node over one static element type.
///
/// Use `JsonArray<Serializable>` for mixed content.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonArray<T> {
    values: Vec<T>,
}

impl<T> JsonArray<T> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// An empty array with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Appends an element.
    pub fn add(&mut self, value: impl Into<T>) {
        self.values.push(value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.values.iter()
    }
}

impl<T: PartialEq> JsonArray<T> {
    /// Removes the first element equal to `value`. Returns whether one was
    /// found.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.values.iter().position(|candidate| candidate == value) {
            Some(index) => {
                self.values.remove(index);
                true
            }
            None => false,
        }
    }
}

impl<T> Default for JsonArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for JsonArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for JsonArray<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a JsonArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<T: ToJson> ToJson for JsonArray<T> {
    fn write_json<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        out.write_char('[')?;
        for (index, value) in self.values.iter().enumerate() {
            if index > 0 {
                out.write_char(',')?;
            }
            value.write_json(out)?;
        }
        out.write_char(']')
    }
}

impl<T: ToJson> fmt::Display for JsonArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_json(f)
    }
}
