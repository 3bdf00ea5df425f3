//! Grammar file loader.
//!
//! Grounded on `original_source/parser.c`'s `readGrammar()` (lines
//! 386-465): one production per non-blank line, whitespace-split, first
//! token is the LHS, remaining tokens are RHS symbols. Unlike the
//! original, an unknown symbol name is a fatal [`FrontError`] rather than
//! a silently admitted `NOT_FOUND` sentinel — spec.md §4.4 calls the
//! silent-sentinel behavior a bug to avoid.

use std::fs;
use std::path::Path;

use frontc_lex::TokenKind;
use frontc_util::FrontError;

use crate::grammar::{Grammar, GrammarSymbol};

pub fn load_grammar(path: impl AsRef<Path>) -> Result<Grammar, FrontError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| FrontError::GrammarRead {
        path: path.to_path_buf(),
        source,
    })?;
    load_grammar_str(&text, path)
}

pub(crate) fn load_grammar_str(text: &str, path: &Path) -> Result<Grammar, FrontError> {
    let mut grammar = Grammar::new();

    for (lineno, line) in text.lines().enumerate() {
        let lineno = lineno + 1;
        let mut tokens = line.split_whitespace();
        let Some(lhs_tok) = tokens.next() else {
            continue; // blank line
        };

        let lhs = parse_nonterminal(lhs_tok, lineno, path, &mut grammar)?;

        let mut rhs = Vec::new();
        for tok in tokens {
            rhs.push(parse_symbol(tok, lineno, path, &mut grammar)?);
        }
        if rhs.is_empty() {
            rhs.push(GrammarSymbol::Terminal(TokenKind::Eps));
        }

        grammar.add_production(lhs, rhs);
    }

    Ok(grammar)
}

fn parse_nonterminal(
    tok: &str,
    lineno: usize,
    path: &Path,
    grammar: &mut Grammar,
) -> Result<crate::grammar::NtId, FrontError> {
    if !tok.starts_with('<') || !tok.ends_with('>') {
        return Err(malformed(
            path,
            lineno,
            format!("expected a non-terminal (angle-bracketed) LHS, found \"{tok}\""),
        ));
    }
    Ok(grammar.intern_nonterminal(tok))
}

fn parse_symbol(
    tok: &str,
    lineno: usize,
    path: &Path,
    grammar: &mut Grammar,
) -> Result<GrammarSymbol, FrontError> {
    if tok.starts_with('<') {
        if !tok.ends_with('>') {
            return Err(malformed(
                path,
                lineno,
                format!("unterminated non-terminal name \"{tok}\""),
            ));
        }
        return Ok(GrammarSymbol::NonTerminal(grammar.intern_nonterminal(tok)));
    }

    let grammar_name = format!("TK_{}", tok.to_ascii_uppercase());
    match TokenKind::from_grammar_name(&grammar_name) {
        Some(kind) => Ok(GrammarSymbol::Terminal(kind)),
        None => Err(malformed(
            path,
            lineno,
            format!("unknown terminal symbol \"{tok}\" (looked up as \"{grammar_name}\")"),
        )),
    }
}

fn malformed(path: &Path, lineno: usize, reason: String) -> FrontError {
    FrontError::MalformedGrammar {
        line: lineno,
        reason: format!("{}: {reason}", path.display()),
    }
}
