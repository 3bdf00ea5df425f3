//! Parse-tree report rendering.
//!
//! Grounded on `original_source/parser.c`'s `printTreeNode`,
//! `inorderTraverse`, and `printParseTree` (lines 772-857): a fixed
//! two-line header followed by one fixed-width record per leaf, in
//! inorder. The column widths below are transcribed verbatim from the
//! original's `fprintf` format strings — this is the "stable, part of
//! the external contract" format spec.md §4.8 calls out, so the widths
//! are not reinterpreted or rounded to anything "nicer".

use std::io::{self, Write};

use frontc_lex::{SymbolTable, Value};

use crate::grammar::{Grammar, GrammarSymbol};
use crate::tree::ParseTree;

const HEADER: &str = "lexeme";

/// Writes the full report: header, then one inorder record per leaf.
/// `had_error` short-circuits to the single failure message spec.md §6
/// requires in place of the normal body.
pub fn render(
    tree: &ParseTree,
    grammar: &Grammar,
    symtab: &SymbolTable,
    had_error: bool,
    out: &mut impl Write,
) -> io::Result<()> {
    if had_error {
        writeln!(out, "Parsing failed; errors prevented parse tree emission.")?;
        return Ok(());
    }

    write_header(out)?;

    for (id, parent) in tree.inorder() {
        let node = tree.node(id);
        if !node.is_leaf() {
            continue;
        }
        write_leaf_record(out, tree, grammar, symtab, id, parent)?;
    }

    Ok(())
}

fn write_header(out: &mut impl Write) -> io::Result<()> {
    write!(
        out,
        "{:>32} {:>12} {:>16} {:>20} {:>30} {:>12} {:>30}\n\n",
        HEADER, "lineNum", "tokenName", "valueIfNumber", "parentNodeSymbol", "isLeafNode", "nodeSymbol"
    )
}

fn write_leaf_record(
    out: &mut impl Write,
    tree: &ParseTree,
    grammar: &Grammar,
    symtab: &SymbolTable,
    id: crate::tree::NodeId,
    parent: Option<crate::tree::NodeId>,
) -> io::Result<()> {
    let node = tree.node(id);
    let GrammarSymbol::Terminal(kind) = node.symbol else {
        unreachable!("leaves are always terminal nodes");
    };

    let (lexeme, value) = match node.entry {
        Some(entry) => (symtab.lexeme(entry).to_string(), symtab.entry(entry).value),
        None => ("EPSILON".to_string(), Value::None),
    };

    let value_field = match value {
        Value::Int(v) => format!("{v:>20}"),
        Value::Real(v) => format!("{v:>20.2}"),
        // The original's field is the 11-char literal `"Not number "` (with
        // its own trailing space) right-justified in 20 columns; padding
        // the 10-char string to 19 and appending the same trailing space
        // reproduces that column content exactly.
        Value::None => format!("{:>19} ", "Not number"),
    };

    let parent_field = match parent {
        Some(parent_id) => match tree.node(parent_id).symbol {
            GrammarSymbol::NonTerminal(nt) => grammar.nonterminal_name(nt).to_string(),
            GrammarSymbol::Terminal(_) => "-----".to_string(),
        },
        None => "ROOT".to_string(),
    };

    writeln!(
        out,
        "{:>32} {:>12} {:>16} {} {:>30} {:>12} {:>30}",
        lexeme,
        node.line,
        kind.display_name(),
        value_field,
        parent_field,
        "YES",
        "-----",
    )
}
