//! frontc-drv — the command-line driver.
//!
//! Wires `frontc-lex` and `frontc-par` together behind four independently
//! invocable modes (spec.md §6): strip comments, tokenize, parse, and
//! report timing. This crate is explicitly out of spec's core scope
//! (§1's "Out of scope" list names "the command-line entry point"), but
//! the workspace still needs a runnable binary end to end, so it exists
//! as a thin wiring layer — no lexing/parsing logic lives here, only
//! argument parsing, file I/O, and dispatch, grounded on `faxt::main`'s
//! `clap`-derive `Cli`/`Commands` split and `faxc-drv::Session`'s
//! phase-by-phase driving.

mod commands;
pub mod config;
pub mod error;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub use config::Config;
pub use error::{DriverError, Result};

#[derive(Parser, Debug)]
#[command(name = "frontc")]
#[command(author = "Front-C Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lexer and LL(1) parser front-end for the source language", long_about = None)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrite the input with `%`-comments removed.
    StripComments(ModeArgs),
    /// Run the lexer and write one token record per line.
    Tokenize(ModeArgs),
    /// Run the lexer and LL(1) parser and write the parse-tree report.
    Parse(ModeArgs),
    /// Run the full pipeline and report per-phase timing instead of a tree.
    Time(ModeArgs),
}

/// Arguments shared by every subcommand: an input path, an output path,
/// and (for the parsing modes) the grammar file to load.
#[derive(Parser, Debug)]
struct ModeArgs {
    /// Source file to read.
    input: PathBuf,

    /// Where to write the mode's output.
    #[arg(short, long)]
    output: PathBuf,

    /// Grammar file (only consulted by `parse` and `time`).
    #[arg(short, long)]
    grammar: Option<PathBuf>,
}

impl ModeArgs {
    fn into_config(self, verbose: bool) -> Config {
        Config::new(self.input, self.output, self.grammar, verbose)
    }
}

/// Parses arguments, initializes logging, and dispatches to the selected
/// mode. The sole entry point `main.rs` calls.
///
/// The per-mode `commands::*` functions return this crate's own
/// [`DriverError`] (so their call sites stay specific about what failed);
/// `run` is the seam where that gets folded into `anyhow::Result`, the
/// way `faxt`'s `main` wraps its `Session` calls — a CLI entry point has
/// no caller left to match on a typed error, so an opaque chain with
/// context is all it needs.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Commands::StripComments(args) => commands::strip_comments(&args.into_config(cli.verbose)),
        Commands::Tokenize(args) => commands::tokenize(&args.into_config(cli.verbose)),
        Commands::Parse(args) => commands::parse(&args.into_config(cli.verbose)),
        Commands::Time(args) => commands::time(&args.into_config(cli.verbose)),
    };
    outcome.context("frontc run failed")
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    // `try_init` rather than `init`: integration tests that spawn this
    // binary's `main()` in-process (none currently do, but subsequent
    // invocations within one test process would) must not panic on a
    // second global-subscriber install.
    let _ = tracing_subscriber::registry().with(filter).with(subscriber).try_init();
}
