//! String interning for identifiers and string literals.
//!
//! The interner stores unique strings in a vector and hands out `StringId`
//! indices for cheap storage and comparison. It is populated during parsing
//! and read-only during execution; lookups at runtime are needed only for
//! name errors, rendering, and builtin dispatch.
//!
//! StringIds are laid out as follows:
//! * 0 to 127 - single character strings for all 128 ASCII characters
//! * 128 onwards - builtin names, then strings interned per module

use ahash::AHashMap;
use strum::IntoEnumIterator;

use crate::builtins::Builtins;

/// Index into the string interner's storage.
///
/// Uses `u32` to save space; the interner never shrinks, so an id stays
/// valid for the lifetime of the parsed module that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub(crate) struct StringId(u32);

impl StringId {
    /// Returns the raw index value.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the StringId for a single-character ASCII string.
    ///
    /// The first 128 interner slots are pre-seeded with one string per
    /// ASCII byte, so string subscription never allocates.
    #[must_use]
    pub fn from_ascii(byte: u8) -> Self {
        debug_assert!(byte.is_ascii());
        Self(u32::from(byte))
    }
}

/// String storage shared by the parser and the evaluator.
#[derive(Debug)]
pub(crate) struct Interns {
    strings: Vec<String>,
    ids: AHashMap<String, StringId>,
}

impl Interns {
    /// Creates an interner pre-seeded with ASCII single-char strings and
    /// the builtin function names.
    pub fn new() -> Self {
        let mut interns = Self {
            strings: Vec::with_capacity(160),
            ids: AHashMap::new(),
        };
        for byte in 0u8..128 {
            let s = char::from(byte).to_string();
            interns.ids.insert(s.clone(), StringId(u32::from(byte)));
            interns.strings.push(s);
        }
        for builtin in Builtins::iter() {
            let name: &'static str = builtin.into();
            interns.intern(name);
        }
        interns
    }

    /// Interns a string, returning the existing id if already present.
    pub fn intern(&mut self, s: &str) -> StringId {
        if let Some(id) = self.ids.get(s) {
            return *id;
        }
        let id = StringId(u32::try_from(self.strings.len()).expect("interner overflow"));
        self.ids.insert(s.to_owned(), id);
        self.strings.push(s.to_owned());
        id
    }

    /// Returns the id of an already-interned string, if any.
    pub fn lookup(&self, s: &str) -> Option<StringId> {
        self.ids.get(s).copied()
    }

    /// Returns the string for an id.
    ///
    /// # Panics
    /// Panics if the id was not produced by this interner.
    pub fn get_str(&self, id: StringId) -> &str {
        &self.strings[id.index()]
    }
}

impl Default for Interns {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let mut interns = Interns::new();
        let a = interns.intern("count");
        let b = interns.intern("count");
        assert_eq!(a, b);
        assert_eq!(interns.get_str(a), "count");
    }

    #[test]
    fn ascii_chars_are_preseeded() {
        let interns = Interns::new();
        let id = StringId::from_ascii(b'x');
        assert_eq!(interns.get_str(id), "x");
        assert_eq!(interns.lookup("x"), Some(id));
    }

    #[test]
    fn builtin_names_are_preseeded() {
        let interns = Interns::new();
        for builtin in Builtins::iter() {
            let name: &'static str = builtin.into();
            assert!(interns.lookup(name).is_some(), "{name} not interned");
        }
    }
}
