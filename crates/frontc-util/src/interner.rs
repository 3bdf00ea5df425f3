//! Per-instance string interning.
//!
//! The teacher crate (`faxc-util::symbol`) interns into a process-wide
//! `LazyLock<DashMap<..>>` so that `Symbol` handles are valid across the
//! whole compiler run. This workspace has no such requirement — a lexer
//! run and a grammar load are each scoped to one `Interner` they own, per
//! the "explicitly-constructed context instead of global mutable state"
//! redesign spec.md asks for. The interning contract (equal strings get
//! the same handle; a handle compares in O(1)) is identical; only the
//! lifetime and ownership model changed.

use indexmap::IndexMap;
use std::hash::Hash;
use std::marker::PhantomData;

/// A typed, `Copy` handle into an [`Interner`].
///
/// The type parameter `T` exists purely to keep handles from different
/// interners (e.g. lexeme symbols vs. non-terminal names) from being used
/// interchangeably by accident — it costs nothing at runtime.
pub struct InternerId<T> {
    index: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> InternerId<T> {
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl<T> Clone for InternerId<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for InternerId<T> {}
impl<T> PartialEq for InternerId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}
impl<T> Eq for InternerId<T> {}
impl<T> Hash for InternerId<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}
impl<T> std::fmt::Debug for InternerId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InternerId({})", self.index)
    }
}

/// An insertion-order-preserving string interner.
///
/// Strings are looked up before being inserted, so every distinct string
/// has exactly one [`InternerId`] for the lifetime of this `Interner` —
/// the property spec.md calls "interning" and depends on for lexeme
/// equality checks.
pub struct Interner<T> {
    map: IndexMap<String, InternerId<T>>,
}

impl<T> Default for Interner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Interner<T> {
    pub fn new() -> Self {
        Self {
            map: IndexMap::new(),
        }
    }

    /// Returns the existing handle for `text`, interning it if this is the
    /// first occurrence.
    pub fn intern(&mut self, text: &str) -> InternerId<T> {
        if let Some(&id) = self.map.get(text) {
            return id;
        }
        let id = InternerId {
            index: self.map.len() as u32,
            _marker: PhantomData,
        };
        self.map.insert(text.to_string(), id);
        id
    }

    pub fn lookup(&self, text: &str) -> Option<InternerId<T>> {
        self.map.get(text).copied()
    }

    pub fn resolve(&self, id: InternerId<T>) -> &str {
        self.map
            .get_index(id.index())
            .map(|(s, _)| s.as_str())
            .expect("InternerId not owned by this Interner")
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All handles, in interning order.
    pub fn ids(&self) -> impl Iterator<Item = InternerId<T>> + '_ {
        self.map.values().copied()
    }
}
