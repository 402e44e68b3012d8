//! String interner for identifier storage.
//!
//! Identifiers are interned once when a standardized tree is read, so
//! environment lookups hash a `u32` instead of a string.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    /// The interner ran out of 32-bit indices.
    #[error("interner exceeded capacity: {count} strings, max is {}", u32::MAX)]
    Overflow { count: usize },
}

#[derive(Default)]
struct InternTable {
    map: FxHashMap<Arc<str>, Name>,
    strings: Vec<Arc<str>>,
}

/// Interner mapping identifier text to `Name`s and back.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

/// Interner shared between the reader, the CLI and the engine's display code.
pub type SharedInterner = Arc<StringInterner>;

impl StringInterner {
    /// Create a new interner with the empty string pre-interned as `Name::EMPTY`.
    pub fn new() -> Self {
        let empty: Arc<str> = Arc::from("");
        let mut table = InternTable::default();
        table.map.insert(Arc::clone(&empty), Name::EMPTY);
        table.strings.push(empty);
        StringInterner {
            table: RwLock::new(table),
        }
    }

    /// Try to intern a string, returning its Name or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.table.read().map.get(s) {
            return Ok(name);
        }

        let mut table = self.table.write();
        // Another writer may have won the race between the two locks.
        if let Some(&name) = table.map.get(s) {
            return Ok(name);
        }

        let count = table.strings.len();
        let raw = u32::try_from(count).map_err(|_| InternError::Overflow { count })?;
        let name = Name::from_raw(raw);
        let text: Arc<str> = Arc::from(s);
        table.strings.push(Arc::clone(&text));
        table.map.insert(text, name);
        Ok(name)
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if the interner exceeds `u32::MAX` strings.
    /// Use `try_intern` for fallible interning.
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Resolve a Name back to its text.
    ///
    /// Names from a different interner resolve to the empty string.
    pub fn lookup(&self, name: Name) -> Arc<str> {
        self.table
            .read()
            .strings
            .get(name.index())
            .map_or_else(|| Arc::from(""), Arc::clone)
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Always false: the empty string is pre-interned.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_deduplicates() {
        let interner = StringInterner::new();
        let a = interner.intern("fact");
        let b = interner.intern("fact");
        let c = interner.intern("n");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.len(), 3);
    }

    #[test]
    fn test_lookup_round_trips_text() {
        let interner = StringInterner::new();
        let name = interner.intern("Print");
        assert_eq!(&*interner.lookup(name), "Print");
    }

    #[test]
    fn test_empty_is_preinterned() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(&*interner.lookup(Name::EMPTY), "");
    }

    #[test]
    fn test_foreign_name_resolves_to_empty() {
        let interner = StringInterner::new();
        assert_eq!(&*interner.lookup(Name::from_raw(99)), "");
    }
}
