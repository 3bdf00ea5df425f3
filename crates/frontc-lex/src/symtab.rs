//! The lexeme symbol table.
//!
//! Every lexeme the lexer sees (identifiers, keywords, numbers, operators,
//! punctuation — everything, per spec.md §2.3) is interned here exactly
//! once. `original_source/lexerDef.h`'s `SymbolTable` is a fixed-bucket
//! hash table mapping lexeme text to a `SymbolTableEntry{lexeme, token,
//! value}`; this type keeps that entry shape but is backed by
//! [`frontc_util::Interner`] instead of a hand-rolled hash chain, per
//! spec.md §9's redesign note against global/ad-hoc table structures.

use frontc_util::Interner;

use crate::token::{LexemeMarker, SymbolId, TokenKind};

/// The numeric value carried by `NUM`/`RNUM` entries. Every other kind
/// carries `Value::None`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    None,
    Int(i64),
    Real(f64),
}

#[derive(Clone, Debug)]
pub struct SymbolTableEntry {
    pub lexeme: String,
    pub kind: TokenKind,
    pub value: Value,
}

/// Owns the interner and the parallel entry storage.
///
/// A `Lexer` owns exactly one `SymbolTable` for the duration of a run;
/// nothing here is shared process-wide.
#[derive(Debug, Default)]
pub struct SymbolTable {
    interner: Interner<LexemeMarker>,
    entries: Vec<SymbolTableEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up `lexeme`; if absent, interns it with `kind` and
    /// `Value::None`. If present, the existing entry's `kind` is left
    /// untouched — a lexeme's classification is decided once, at its
    /// first occurrence, and every later occurrence of the same text (for
    /// identifiers and keywords, text implies kind) reuses it.
    pub fn insert(&mut self, lexeme: &str, kind: TokenKind) -> SymbolId {
        if let Some(id) = self.interner.lookup(lexeme) {
            return id;
        }
        let id = self.interner.intern(lexeme);
        debug_assert_eq!(id.index(), self.entries.len());
        self.entries.push(SymbolTableEntry {
            lexeme: lexeme.to_string(),
            kind,
            value: Value::None,
        });
        id
    }

    /// Like [`Self::insert`] but also records a numeric value, for `NUM`
    /// and `RNUM` lexemes. Distinct numeric spellings of the same value
    /// (e.g. two occurrences of `12`) still share one entry, matching
    /// `insert`'s lookup-before-insert contract.
    pub fn insert_with_value(&mut self, lexeme: &str, kind: TokenKind, value: Value) -> SymbolId {
        let id = self.insert(lexeme, kind);
        self.entries[id.index()].value = value;
        id
    }

    pub fn lookup(&self, lexeme: &str) -> Option<SymbolId> {
        self.interner.lookup(lexeme)
    }

    pub fn entry(&self, id: SymbolId) -> &SymbolTableEntry {
        &self.entries[id.index()]
    }

    pub fn lexeme(&self, id: SymbolId) -> &str {
        &self.entries[id.index()].lexeme
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
