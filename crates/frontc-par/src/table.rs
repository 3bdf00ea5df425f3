//! LL(1) parse-table construction.
//!
//! Grounded on `original_source/parser.c`'s `addRulesToParseTable` (lines
//! 629-680): for each production, populate its LHS's row at every
//! terminal in FIRST(RHS); if RHS is nullable, also populate at every
//! terminal in FOLLOW(LHS). A cell that is already set is overwritten
//! (last production wins) and a diagnostic is emitted, matching the
//! original's "Multiple defined entries in parse table detected!
//! (Overwriting the rule!)" warning — spec.md §4.6 / §9's third preserved
//! design note.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use frontc_lex::TokenKind;
use frontc_util::Handler;

use crate::grammar::{Grammar, NtId};
use crate::sets::{first_of_string, TokenSet};

#[derive(Debug, Default)]
pub struct ParseTable {
    cells: FxHashMap<(NtId, TokenKind), usize>,
}

impl ParseTable {
    pub fn get(&self, nt: NtId, terminal: TokenKind) -> Option<usize> {
        self.cells.get(&(nt, terminal)).copied()
    }

    fn set(&mut self, nt: NtId, terminal: TokenKind, production: usize, grammar: &Grammar, handler: &mut Handler) {
        if let Some(&existing) = self.cells.get(&(nt, terminal)) {
            if existing != production {
                handler.warning(
                    0,
                    format!(
                        "LL(1) conflict in table[{}][{}]: production {} overwritten by production {}",
                        grammar.nonterminal_name(nt),
                        terminal.display_name(),
                        existing,
                        production
                    ),
                );
            }
        }
        self.cells.insert((nt, terminal), production);
    }
}

pub fn build(
    grammar: &Grammar,
    first: &IndexMap<NtId, TokenSet>,
    follow: &IndexMap<NtId, TokenSet>,
    handler: &mut Handler,
) -> ParseTable {
    let mut table = ParseTable::default();

    for (index, production) in grammar.productions.iter().enumerate() {
        let rhs_first = first_of_string(&production.rhs, first);

        for terminal in rhs_first.iter() {
            if terminal != TokenKind::Eps {
                table.set(production.lhs, terminal, index, grammar, handler);
            }
        }

        if rhs_first.contains(TokenKind::Eps) {
            let lhs_follow = follow.get(&production.lhs).cloned().unwrap_or_default();
            for terminal in lhs_follow.iter() {
                table.set(production.lhs, terminal, index, grammar, handler);
            }
        }
    }

    table
}
