// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

use super::{impl_display_via_json, Serializable, ToJson};

/// An object node. Keys are unique and members render in insertion order.
#[derive(Debug, Clone, Default)]
pub struct JsonObject {
    members: Vec<(String, Serializable)>,
}

impl JsonObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`.
    ///
    /// An existing member with the same key has its value replaced and keeps
    /// its position.
    pub fn add(&mut self, key: &str, value: impl Into<Serializable>) {
        let value = value.into();
        match self.members.iter_mut().find(|(name, _)| name == key) {
            Some((_, slot)) => *slot = value,
            None => self.members.push((String::from(key), value)),
        }
    }

    /// Removes the member under `key`. Returns whether it existed.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.members.iter().position(|(name, _)| name == key) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Serializable> {
        self.members
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Serializable)> {
        self.members
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

/// Member order does not take part in equality.
impl PartialEq for JsonObject {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl ToJson for JsonObject {
    fn write_json<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        out.write_char('{')?;
        for (index, (key, value)) in self.members.iter().enumerate() {
            if index > 0 {
                out.write_char(',')?;
            }
            out.write_char('"')?;
            out.write_str(key)?;
            out.write_str("\":")?;
            value.write_json(out)?;
        }
        out.write_char('}')
    }
}

impl_display_via_json!(JsonObject);
