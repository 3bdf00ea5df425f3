//! The reserved-word table.
//!
//! `original_source/lexer.c`'s `setupKeywordTrie` walks a 27-entry list
//! adding each spelling to a trie keyed one character at a time. A trie
//! earns its keep when insertion is incremental and shared prefixes are
//! common across thousands of entries; with 27 short, mostly
//! prefix-disjoint spellings a `HashMap` lookup after the identifier scan
//! has already collected the whole lexeme is the same algorithm with less
//! machinery, so that is what this table is.
//!
//! `_main` is deliberately absent: it is its own token kind
//! ([`TokenKind::Main`]), not a keyword, and the DFA recognizes it by
//! exact lexeme match on the `FunId` path rather than through this table.

use rustc_hash::FxHashMap;

use crate::token::TokenKind;

pub struct KeywordTable {
    words: FxHashMap<&'static str, TokenKind>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordTable {
    pub fn new() -> Self {
        use TokenKind::*;
        let pairs: &[(&str, TokenKind)] = &[
            ("with", With),
            ("parameters", Parameters),
            ("end", End),
            ("while", While),
            ("union", Union),
            ("endunion", EndUnion),
            ("definetype", DefineType),
            ("as", As),
            ("type", Type),
            ("global", Global),
            ("parameter", Parameter),
            ("list", List),
            ("input", Input),
            ("output", Output),
            ("int", Int),
            ("real", Real),
            ("endwhile", EndWhile),
            ("if", If),
            ("then", Then),
            ("endif", EndIf),
            ("read", Read),
            ("write", Write),
            ("return", Return),
            ("call", Call),
            ("record", Record),
            ("endrecord", EndRecord),
            ("else", Else),
        ];
        let mut words = FxHashMap::default();
        words.reserve(pairs.len());
        for &(spelling, kind) in pairs {
            words.insert(spelling, kind);
        }
        Self { words }
    }

    pub fn lookup(&self, lexeme: &str) -> Option<TokenKind> {
        self.words.get(lexeme).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
