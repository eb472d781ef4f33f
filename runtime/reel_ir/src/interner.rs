//! String interner for identifier storage.
//!
//! Provides O(1) interning and lookup. A single map guarded by an `RwLock`
//! is enough here: a program interns a handful of identifiers while it is
//! being built, and execution only performs lookups.

// Arc is needed for SharedInterner - the interner is shared between the
// program builder, the finished program, and the interpreter.
use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// Interner exceeded capacity (over 4 billion identifiers).
    Overflow { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Overflow { count } => {
                write!(f, "interner exceeded capacity: {count} identifiers")
            }
        }
    }
}

impl std::error::Error for InternError {}

struct Storage {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name`.
    strings: Vec<&'static str>,
}

impl Storage {
    fn with_empty() -> Self {
        // Pre-intern the empty string at index 0 so Name::EMPTY resolves.
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        Storage {
            map,
            strings: vec![empty],
        }
    }
}

/// String interner for identifiers.
///
/// Interned contents are leaked into `'static` storage; the interner lives
/// for the whole process, matching the lifetime of the programs it names.
///
/// # Thread Safety
/// Uses an `RwLock` for concurrent read access. Wrap in an `Arc` (see
/// [`SharedInterner`]) for sharing between the builder and the interpreter.
pub struct StringInterner {
    storage: RwLock<Storage>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned.
    pub fn new() -> Self {
        StringInterner {
            storage: RwLock::new(Storage::with_empty()),
        }
    }

    /// Try to intern a string, returning its `Name` or an error on overflow.
    pub fn try_intern(&self, text: &str) -> Result<Name, InternError> {
        if let Some(&index) = self.storage.read().map.get(text) {
            return Ok(Name::new(index));
        }
        let mut storage = self.storage.write();
        // Double-check: another writer may have interned it meanwhile.
        if let Some(&index) = storage.map.get(text) {
            return Ok(Name::new(index));
        }
        let index = u32::try_from(storage.strings.len()).map_err(|_| InternError::Overflow {
            count: storage.strings.len(),
        })?;
        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        storage.map.insert(leaked, index);
        storage.strings.push(leaked);
        Ok(Name::new(index))
    }

    /// Intern a string, returning its `Name`.
    ///
    /// # Panics
    /// Panics if the interner exceeds `u32::MAX` identifiers.
    #[allow(
        clippy::expect_used,
        reason = "capacity is effectively unbounded for real programs"
    )]
    pub fn intern(&self, text: &str) -> Name {
        self.try_intern(text).expect("interner capacity exceeded")
    }

    /// Resolve a `Name` back to its string content.
    ///
    /// Returns the empty string for names this interner never produced.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.storage
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.storage.read().strings.len()
    }

    /// Whether the interner holds only the pre-interned empty string.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

/// Shared handle to a [`StringInterner`].
pub type SharedInterner = Arc<StringInterner>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let interner = StringInterner::new();
        let a = interner.intern("_var");
        let b = interner.intern("_var");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_strings_get_distinct_names() {
        let interner = StringInterner::new();
        let a = interner.intern("_x");
        let b = interner.intern("_y");
        assert_ne!(a, b);
    }

    #[test]
    fn lookup_round_trips() {
        let interner = StringInterner::new();
        let name = interner.intern("_factorial");
        assert_eq!(interner.lookup(name), "_factorial");
    }

    #[test]
    fn empty_string_is_pre_interned() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(interner.lookup(Name::EMPTY), "");
        assert!(interner.is_empty());
    }

    #[test]
    fn lookup_of_unknown_name_is_empty() {
        let interner = StringInterner::new();
        assert_eq!(interner.lookup(Name::new(999)), "");
    }

    #[test]
    fn shared_interner_sees_same_names() {
        let shared: SharedInterner = Arc::new(StringInterner::new());
        let clone = Arc::clone(&shared);
        let a = shared.intern("_n");
        let b = clone.intern("_n");
        assert_eq!(a, b);
        assert_eq!(shared.len(), 2);
    }
}
