//! Phase implementations the CLI wires together.
//!
//! Each function here corresponds to one of spec.md §6's independently
//! invocable modes ("strip comments; tokenize; parse; report timing"),
//! each accepting an input path and an output path. Grounded on
//! `faxc-drv::Session::run_pipeline`'s per-phase structure (lex, then
//! parse, with an early return for intermediate `--emit` modes) but
//! flattened into one function per mode instead of one `EmitType` match,
//! since this front-end has exactly two real phases instead of a full
//! compiler's nine.

use std::fs;
use std::io::Write;
use std::time::Instant;

use tracing::{debug, info};

use frontc_lex::{KeywordTable, Lexer, SymbolTable, TokenKind};
use frontc_par::{build_parse_table, compute_first, compute_follow, load_grammar, render, Parser};
use frontc_util::Handler;

use crate::config::Config;
use crate::error::{DriverError, Result};

fn read_input(config: &Config) -> Result<String> {
    fs::read_to_string(&config.input).map_err(|source| DriverError::InputRead {
        path: config.input.clone(),
        source,
    })
}

fn write_output(config: &Config, contents: &str) -> Result<()> {
    let mut file = fs::File::create(&config.output).map_err(|source| DriverError::OutputWrite {
        path: config.output.clone(),
        source,
    })?;
    file.write_all(contents.as_bytes())
        .map_err(|source| DriverError::OutputWrite {
            path: config.output.clone(),
            source,
        })
}

/// The `%`-to-end-of-line comment syntax has no escape and no string
/// literal type in this language (spec.md §4.2), so a textual strip is
/// exact: find the first `%` on each line and drop everything from there.
/// This mirrors what the lexer's `COMMENT` handling *consumes* without
/// running the DFA at all — the comment-stripping tool is explicitly an
/// external collaborator (spec.md §1), so it stays a driver-level helper
/// rather than a `frontc-lex` module.
pub fn strip_comments(config: &Config) -> Result<()> {
    info!(input = ?config.input, "stripping comments");
    let source = read_input(config)?;
    let stripped: String = source
        .lines()
        .map(|line| match line.find('%') {
            Some(idx) => &line[..idx],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n");
    write_output(config, &stripped)
}

/// Runs the lexer to completion and writes one line per non-error,
/// non-comment token: lexeme, line, token name, and value (for
/// `NUM`/`RNUM`). Lexical errors go to the diagnostic stream (stderr),
/// not the output file, per spec.md §7.
pub fn tokenize(config: &Config) -> Result<()> {
    info!(input = ?config.input, "tokenizing");
    let source = read_input(config)?;
    let keywords = KeywordTable::new();
    let mut symtab = SymbolTable::new();
    let mut handler = Handler::new();

    let tokens = {
        let mut lexer = Lexer::new(source.as_bytes(), &keywords, &mut symtab, &mut handler)
            .expect("reading from an in-memory byte slice never fails");
        lexer.tokenize_all()
    };
    debug!(
        tokens = tokens.len(),
        errors = handler.diagnostics().len(),
        "lexing complete"
    );

    let mut out = String::new();
    for token in &tokens {
        let entry = symtab.entry(token.entry);
        if entry.kind == TokenKind::Comment {
            continue;
        }
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            token.line,
            entry.kind.display_name(),
            entry.lexeme
        ));
    }
    write_output(config, &out)?;

    for diagnostic in handler.diagnostics() {
        eprintln!("{diagnostic}");
    }
    Ok(())
}

/// Loads the grammar, builds FIRST/FOLLOW and the parse table, lexes and
/// parses the input, and writes the parse-tree report (spec.md §4.8) to
/// the output file. Returns [`DriverError::ParseFailed`] when the parse
/// did not succeed, after the (single-line failure) report has already
/// been written — matching spec.md §6's "the file contains a single
/// message ... detailed errors go to a diagnostic stream" contract.
pub fn parse(config: &Config) -> Result<()> {
    info!(input = ?config.input, grammar = ?config.grammar, "parsing");
    let source = read_input(config)?;
    let grammar = load_grammar(&config.grammar)?;
    let start = grammar
        .lookup_nonterminal("<program>")
        .unwrap_or_else(|| grammar.nonterminal_ids().next().expect("grammar has at least one rule"));

    let first = compute_first(&grammar);
    let follow = compute_follow(&grammar, &first, start);

    let mut table_handler = Handler::new();
    let table = build_parse_table(&grammar, &first, &follow, &mut table_handler);
    debug!(conflicts = table_handler.diagnostics().len(), "parse table built");

    let keywords = KeywordTable::new();
    let mut symtab = SymbolTable::new();
    let mut lex_handler = Handler::new();
    let tokens = {
        let mut lexer = Lexer::new(source.as_bytes(), &keywords, &mut symtab, &mut lex_handler)
            .expect("reading from an in-memory byte slice never fails");
        lexer.tokenize_all()
    };
    debug!(tokens = tokens.len(), "lexing complete");

    let parser = Parser::new(&grammar, &table, &follow);
    let (tree, had_error) = parser.parse(&tokens, &symtab, &mut lex_handler, start);
    info!(had_error, "parse complete");

    let mut rendered = Vec::new();
    render(&tree, &grammar, &symtab, had_error, &mut rendered)
        .expect("writing to an in-memory buffer never fails");
    write_output(config, &String::from_utf8_lossy(&rendered))?;

    for diagnostic in table_handler.diagnostics() {
        eprintln!("{diagnostic}");
    }
    for diagnostic in lex_handler.diagnostics() {
        eprintln!("{diagnostic}");
    }

    if had_error {
        return Err(DriverError::ParseFailed {
            count: lex_handler.diagnostics().len(),
        });
    }
    Ok(())
}

/// Runs the lex and parse phases the same way [`parse`] does, but reports
/// per-phase wall-clock timing instead of a parse-tree report — spec.md
/// §6's "report timing" mode. The timed run still performs a full parse;
/// only the output format differs.
pub fn time(config: &Config) -> Result<()> {
    info!(input = ?config.input, "timing run");
    let source = read_input(config)?;
    let grammar = load_grammar(&config.grammar)?;
    let start = grammar
        .lookup_nonterminal("<program>")
        .unwrap_or_else(|| grammar.nonterminal_ids().next().expect("grammar has at least one rule"));

    let table_start = Instant::now();
    let first = compute_first(&grammar);
    let follow = compute_follow(&grammar, &first, start);
    let mut table_handler = Handler::new();
    let table = build_parse_table(&grammar, &first, &follow, &mut table_handler);
    let table_elapsed = table_start.elapsed();
    debug!(elapsed = ?table_elapsed, "parse table built");

    let keywords = KeywordTable::new();
    let mut symtab = SymbolTable::new();
    let mut lex_handler = Handler::new();

    let lex_start = Instant::now();
    let tokens = {
        let mut lexer = Lexer::new(source.as_bytes(), &keywords, &mut symtab, &mut lex_handler)
            .expect("reading from an in-memory byte slice never fails");
        lexer.tokenize_all()
    };
    let lex_elapsed = lex_start.elapsed();
    debug!(elapsed = ?lex_elapsed, tokens = tokens.len(), "lexing complete");

    let parser = Parser::new(&grammar, &table, &follow);
    let parse_start = Instant::now();
    let (_tree, had_error) = parser.parse(&tokens, &symtab, &mut lex_handler, start);
    let parse_elapsed = parse_start.elapsed();
    info!(elapsed = ?parse_elapsed, had_error, "parsing complete");

    let report = format!(
        "table_build\t{:?}\nlex\t{:?}\nparse\t{:?}\ntokens\t{}\nhad_error\t{}\n",
        table_elapsed,
        lex_elapsed,
        parse_elapsed,
        tokens.len(),
        had_error
    );
    write_output(config, &report)
}
