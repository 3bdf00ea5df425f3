//! Grammar symbols and productions.
//!
//! Grounded on `original_source/parserDef.h`'s `SymbolUnit`/`GrammarRule`
//! pair (a tagged terminal-or-non-terminal plus an LHS/RHS production) and
//! on `frontc_util::Interner`'s role in [`frontc_lex::SymbolTable`] — a
//! non-terminal's name (angle brackets included, e.g. `"<program>"`, per
//! spec.md §4.4) is interned exactly the way a lexeme is, giving every
//! distinct non-terminal one stable, `Copy` handle.

use frontc_util::{Interner, InternerId};

use frontc_lex::TokenKind;

/// Marker type for [`frontc_util::Interner`]s keyed by non-terminal name.
pub struct NonTerminalMarker;

/// A handle into [`Grammar`]'s non-terminal table.
pub type NtId = InternerId<NonTerminalMarker>;

/// One symbol on either side of a production: a non-terminal or a
/// terminal token kind. `TokenKind::Eps` stands in for an empty RHS, per
/// spec.md §3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GrammarSymbol {
    NonTerminal(NtId),
    Terminal(TokenKind),
}

impl GrammarSymbol {
    pub fn is_eps(self) -> bool {
        matches!(self, GrammarSymbol::Terminal(TokenKind::Eps))
    }
}

/// `LHS -> RHS1 RHS2 ...`. An empty RHS is represented as the single
/// symbol `Terminal(Eps)` (spec.md §3), never as an empty `Vec`.
#[derive(Clone, Debug)]
pub struct Production {
    pub lhs: NtId,
    pub rhs: Vec<GrammarSymbol>,
}

/// The loaded grammar: an order-preserving array of productions plus the
/// non-terminal name table. Order matters for §4.6's "last wins" parse
/// table conflict resolution, so `productions` is a plain `Vec`, not a
/// set, and the non-terminal interner never reassigns an id once given.
#[derive(Debug, Default)]
pub struct Grammar {
    pub productions: Vec<Production>,
    names: Interner<NonTerminalMarker>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `name` (including its angle brackets), returning its
    /// stable handle.
    pub fn intern_nonterminal(&mut self, name: &str) -> NtId {
        self.names.intern(name)
    }

    pub fn lookup_nonterminal(&self, name: &str) -> Option<NtId> {
        self.names.lookup(name)
    }

    pub fn nonterminal_name(&self, id: NtId) -> &str {
        self.names.resolve(id)
    }

    pub fn nonterminal_count(&self) -> usize {
        self.names.len()
    }

    /// All interned non-terminal ids, in the order they were first seen
    /// (the order productions for them were encountered while loading).
    pub fn nonterminal_ids(&self) -> impl Iterator<Item = NtId> + '_ {
        self.names.ids()
    }

    pub fn add_production(&mut self, lhs: NtId, rhs: Vec<GrammarSymbol>) {
        self.productions.push(Production { lhs, rhs });
    }
}
