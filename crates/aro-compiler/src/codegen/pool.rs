//! String constant pool for generated modules.
//!
//! Every string the emitted IR references becomes one private global
//! constant. Strings are collected in a dedicated pass before emission and
//! the pool is then frozen: emission can only look identifiers up, never add.
//! Looking up a string that was not collected is an internal error.

use std::fmt;

use aro_core::CodegenError;
use rustc_hash::FxHashMap;

use super::escape::{escape_ir_bytes, ir_array_len};

/// Identifier of a pooled string. Renders as its global name, `@.str.<id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringId(u32);

impl StringId {
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@.str.{}", self.0)
    }
}

/// Collection-phase pool with deduplication.
///
/// Identifiers are assigned in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct StringConstantPool {
    strings: Vec<String>,
    index: FxHashMap<String, StringId>,
}

impl StringConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or get an existing string, returns its identifier.
    pub fn register(&mut self, value: &str) -> StringId {
        if let Some(&id) = self.index.get(value) {
            return id;
        }
        let id = StringId(self.strings.len() as u32);
        self.strings.push(value.to_string());
        self.index.insert(value.to_string(), id);
        id
    }

    pub fn register_all<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            self.register(value.as_ref());
        }
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Ends the collection phase.
    pub fn freeze(self) -> FrozenStringPool {
        FrozenStringPool {
            strings: self.strings,
            index: self.index,
        }
    }
}

/// Read-only pool used during emission.
#[derive(Debug, Clone, Default)]
pub struct FrozenStringPool {
    strings: Vec<String>,
    index: FxHashMap<String, StringId>,
}

impl FrozenStringPool {
    /// Identifier of a collected string.
    pub fn id(&self, value: &str) -> Result<StringId, CodegenError> {
        self.index
            .get(value)
            .copied()
            .ok_or_else(|| CodegenError::UnregisteredString {
                value: value.to_string(),
            })
    }

    pub fn get(&self, id: StringId) -> Option<&str> {
        self.strings.get(id.0 as usize).map(String::as_str)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.index.contains_key(value)
    }

    /// Strings in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (StringId, &str)> {
        self.strings
            .iter()
            .enumerate()
            .map(|(i, s)| (StringId(i as u32), s.as_str()))
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Writes one global constant per string, sorted by identifier.
    pub fn write_globals(&self, out: &mut impl fmt::Write) -> fmt::Result {
        for (id, value) in self.iter() {
            writeln!(
                out,
                "{id} = private unnamed_addr constant [{} x i8] c\"{}\\00\"",
                ir_array_len(value),
                escape_ir_bytes(value.as_bytes())
            )?;
        }
        Ok(())
    }
}
