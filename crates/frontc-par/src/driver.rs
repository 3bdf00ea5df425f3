//! The stack-driven LL(1) parser.
//!
//! Grounded on `original_source/parser.c`'s `parseTokens` (lines
//! 869-1021): a pushdown stack of parse-tree nodes seeded with the start
//! symbol, driven by the precomputed [`ParseTable`] and
//! `FOLLOW` sets for panic-mode recovery, exactly as spec.md §4.7
//! describes. The stack holds [`NodeId`]s rather than raw grammar
//! symbols (the node already records its own symbol), which is the one
//! structural change from the original's `SymbolUnit` stack.

use indexmap::IndexMap;

use frontc_lex::{SymbolTable, Token, TokenKind};
use frontc_util::Handler;

use crate::grammar::{Grammar, GrammarSymbol, NtId};
use crate::sets::TokenSet;
use crate::table::ParseTable;
use crate::tree::{NodeId, ParseNode, ParseTree};

pub struct Parser<'g> {
    grammar: &'g Grammar,
    table: &'g ParseTable,
    follow: &'g IndexMap<NtId, TokenSet>,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g Grammar, table: &'g ParseTable, follow: &'g IndexMap<NtId, TokenSet>) -> Self {
        Self { grammar, table, follow }
    }

    /// Runs the full stack-driven parse of `tokens` (which must end with
    /// a `TokenKind::EndOfInput` entry, per spec.md §6). Returns the
    /// built tree and whether any syntactic or lexical-as-reported error
    /// occurred. The tree is still produced on failure — spec.md §4.7
    /// requires the tree to exist in memory even when the parse did not
    /// succeed, leaving it to the printer to report the failure instead.
    pub fn parse(
        &self,
        tokens: &[Token],
        symtab: &SymbolTable,
        handler: &mut Handler,
        start: NtId,
    ) -> (ParseTree, bool) {
        let mut tree = ParseTree::new();
        let root = tree.push(ParseNode {
            symbol: GrammarSymbol::NonTerminal(start),
            entry: None,
            line: tokens.first().map(|t| t.line).unwrap_or(0),
            children: Vec::new(),
        });

        let mut stack = vec![root];
        let mut pos = 0usize;
        let mut had_error = false;
        let mut last_line = tokens.first().map(|t| t.line).unwrap_or(0);

        while !stack.is_empty() && pos < tokens.len() {
            let token = tokens[pos];
            let entry = symtab.entry(token.entry);
            let kind = entry.kind;

            if kind == TokenKind::Comment {
                pos += 1;
                continue;
            }
            if kind.is_error() {
                match kind {
                    TokenKind::LexicalError => handler.unrecognized_pattern(token.line, &entry.lexeme),
                    TokenKind::IdLengthExceeded => handler.too_long_identifier(token.line, &entry.lexeme),
                    TokenKind::FunLengthExceeded => {
                        handler.too_long_function_name(token.line, &entry.lexeme)
                    }
                    _ => unreachable!("is_error() implies one of the three markers above"),
                }
                had_error = true;
                pos += 1;
                continue;
            }

            let top = *stack.last().unwrap();
            let top_symbol = tree.node(top).symbol;

            match top_symbol {
                GrammarSymbol::Terminal(TokenKind::Eps) => {
                    stack.pop();
                    tree.node_mut(top).line = token.line;
                }
                GrammarSymbol::Terminal(expected) if expected == kind => {
                    stack.pop();
                    let node = tree.node_mut(top);
                    node.entry = Some(token.entry);
                    node.line = token.line;
                    last_line = token.line;
                    pos += 1;
                }
                GrammarSymbol::Terminal(expected) => {
                    handler.token_mismatch(
                        token.line,
                        kind.display_name(),
                        &entry.lexeme,
                        expected.display_name(),
                    );
                    had_error = true;
                    stack.pop();
                    tree.node_mut(top).line = token.line;
                }
                GrammarSymbol::NonTerminal(nt) => match self.table.get(nt, kind) {
                    Some(production_index) => {
                        stack.pop();
                        let production = &self.grammar.productions[production_index];
                        let mut children = Vec::with_capacity(production.rhs.len());
                        for symbol in &production.rhs {
                            children.push(tree.push(ParseNode {
                                symbol: *symbol,
                                entry: None,
                                line: token.line,
                                children: Vec::new(),
                            }));
                        }
                        for &child in &children {
                            tree.add_child(top, child);
                        }
                        for &child in children.iter().rev() {
                            stack.push(child);
                        }
                    }
                    None => {
                        had_error = true;
                        handler.invalid_token(
                            token.line,
                            kind.display_name(),
                            &entry.lexeme,
                            self.grammar.nonterminal_name(nt),
                        );
                        let in_follow = self
                            .follow
                            .get(&nt)
                            .map(|set| set.contains(kind))
                            .unwrap_or(false);
                        if in_follow {
                            stack.pop();
                            tree.node_mut(top).line = token.line;
                        } else {
                            pos += 1;
                            if pos >= tokens.len() {
                                stack.pop();
                            }
                        }
                    }
                },
            }
        }

        // Stack drained before input ran out, but the loop stopped early
        // (input exhausted mid-parse): report every node still on the
        // stack against the last consumed line, per `parseTokens`'s
        // post-loop `while (!isStackEmpty(...))` cleanup.
        while let Some(top) = stack.pop() {
            had_error = true;
            let symbol = tree.node(top).symbol;
            match symbol {
                GrammarSymbol::NonTerminal(nt) => {
                    handler.invalid_token(last_line, "TK_DOLLAR", "", self.grammar.nonterminal_name(nt));
                }
                GrammarSymbol::Terminal(expected) => {
                    handler.token_mismatch(last_line, "TK_DOLLAR", "", expected.display_name());
                }
            }
            tree.node_mut(top).line = last_line;
        }

        // Stack emptied with residual input before END_OF_INPUT: drain
        // and report, mirroring the post-loop `while (inputPtr && ...)`
        // cleanup.
        while pos < tokens.len() {
            let token = tokens[pos];
            let entry = symtab.entry(token.entry);
            if entry.kind == TokenKind::EndOfInput {
                break;
            }
            had_error = true;
            handler.invalid_token(token.line, entry.kind.display_name(), &entry.lexeme, "TK_DOLLAR");
            pos += 1;
        }

        (tree, had_error)
    }
}
