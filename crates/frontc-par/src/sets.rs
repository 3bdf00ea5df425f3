//! FIRST/FOLLOW computation.
//!
//! Grounded on `original_source/parser.c`'s `getFirstOfRhs` (lines
//! 568-622), `computeFirstSets` and `computeFollowSets` (lines 1026-1158):
//! textbook fixed-point algorithms, ported to dense bitsets per spec.md
//! §3/§4.5 instead of the original's linked `FirstFollowSet` lists.

use indexmap::IndexMap;

use frontc_lex::TokenKind;

use crate::grammar::{Grammar, GrammarSymbol, NtId};

const WORD_BITS: usize = 64;

/// A dense bitset over `TokenKind` (including the synthetic `Eps`
/// marker). One extra bit past `TokenKind::COUNT` is reserved for `Eps`
/// since `Eps` is itself a `TokenKind` variant, so in practice this is
/// just a bitset over all of `TokenKind`'s `COUNT` variants.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenSet {
    words: [u64; Self::WORDS],
}

impl TokenSet {
    const WORDS: usize = (TokenKind::COUNT + WORD_BITS - 1) / WORD_BITS;

    pub fn new() -> Self {
        Self::default()
    }

    fn index(kind: TokenKind) -> usize {
        // Safe because `TokenKind` has no data and is `#[repr]`-default
        // (C-like) discriminants assigned in declaration order.
        kind as usize
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        let i = Self::index(kind);
        self.words[i / WORD_BITS] & (1u64 << (i % WORD_BITS)) != 0
    }

    /// Returns whether this changed the set (for fixed-point loop
    /// termination).
    pub fn insert(&mut self, kind: TokenKind) -> bool {
        let i = Self::index(kind);
        let word = &mut self.words[i / WORD_BITS];
        let bit = 1u64 << (i % WORD_BITS);
        let changed = *word & bit == 0;
        *word |= bit;
        changed
    }

    /// Unions `other` into `self` (skipping `Eps`, the caller decides
    /// whether epsilon propagates). Returns whether anything changed.
    pub fn union_without_eps(&mut self, other: &TokenSet) -> bool {
        let mut changed = false;
        for kind in all_terminal_kinds() {
            if kind != TokenKind::Eps && other.contains(kind) && self.insert(kind) {
                changed = true;
            }
        }
        changed
    }

    pub fn union(&mut self, other: &TokenSet) -> bool {
        let mut changed = false;
        for i in 0..Self::WORDS {
            let merged = self.words[i] | other.words[i];
            if merged != self.words[i] {
                self.words[i] = merged;
                changed = true;
            }
        }
        changed
    }

    pub fn iter(&self) -> impl Iterator<Item = TokenKind> + '_ {
        all_terminal_kinds().filter(move |&k| self.contains(k))
    }
}

fn all_terminal_kinds() -> impl Iterator<Item = TokenKind> {
    (0..TokenKind::COUNT).map(|i| TokenKind::from_index(i).expect("index in range"))
}

/// FIRST of a right-hand side, per spec.md §4.5: union `FIRST(Xi) \
/// {EPS}` for the longest EPS-containing prefix, including `EPS` itself
/// only if the whole string can derive it (or the string is empty).
pub fn first_of_string(rhs: &[GrammarSymbol], first: &IndexMap<NtId, TokenSet>) -> TokenSet {
    let mut result = TokenSet::new();
    let mut all_nullable = true;

    for symbol in rhs {
        match *symbol {
            GrammarSymbol::Terminal(TokenKind::Eps) => {
                // An explicit EPS production contributes EPS and nothing
                // else; it is always the sole RHS symbol (see the
                // grammar loader), so this ends the scan.
                result.insert(TokenKind::Eps);
                all_nullable = true;
                break;
            }
            GrammarSymbol::Terminal(t) => {
                result.insert(t);
                all_nullable = false;
                break;
            }
            GrammarSymbol::NonTerminal(nt) => {
                let nt_first = first.get(&nt).cloned().unwrap_or_default();
                result.union_without_eps(&nt_first);
                if !nt_first.contains(TokenKind::Eps) {
                    all_nullable = false;
                    break;
                }
            }
        }
    }

    if all_nullable {
        result.insert(TokenKind::Eps);
    }
    result
}

/// Fixed-point FIRST computation over every non-terminal in `grammar`.
pub fn compute_first(grammar: &Grammar) -> IndexMap<NtId, TokenSet> {
    let mut first: IndexMap<NtId, TokenSet> = grammar
        .nonterminal_ids()
        .map(|id| (id, TokenSet::new()))
        .collect();

    loop {
        let mut changed = false;
        for production in &grammar.productions {
            let rhs_first = first_of_string(&production.rhs, &first);
            let entry = first.entry(production.lhs).or_default();
            if entry.union(&rhs_first) {
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    first
}

/// Fixed-point FOLLOW computation, per spec.md §4.5 / `computeFollowSets`.
/// `start` seeds `FOLLOW(start) ⊇ {END_OF_INPUT}`.
pub fn compute_follow(
    grammar: &Grammar,
    first: &IndexMap<NtId, TokenSet>,
    start: NtId,
) -> IndexMap<NtId, TokenSet> {
    let mut follow: IndexMap<NtId, TokenSet> = grammar
        .nonterminal_ids()
        .map(|id| (id, TokenSet::new()))
        .collect();
    follow.entry(start).or_default().insert(TokenKind::EndOfInput);

    loop {
        let mut changed = false;
        for production in &grammar.productions {
            for (i, symbol) in production.rhs.iter().enumerate() {
                let GrammarSymbol::NonTerminal(b) = *symbol else {
                    continue;
                };
                let beta = &production.rhs[i + 1..];
                let first_beta = first_of_string(beta, first);

                let mut addition = TokenSet::new();
                for kind in first_beta.iter() {
                    if kind != TokenKind::Eps {
                        addition.insert(kind);
                    }
                }
                if beta.is_empty() || first_beta.contains(TokenKind::Eps) {
                    let lhs_follow = follow.get(&production.lhs).cloned().unwrap_or_default();
                    addition.union(&lhs_follow);
                }

                if follow.entry(b).or_default().union(&addition) {
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    follow
}
