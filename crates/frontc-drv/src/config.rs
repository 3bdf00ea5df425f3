//! Run configuration shared by every subcommand.
//!
//! Field-for-field grounded on `faxc-drv::Config`'s settings struct, cut
//! down to what a lexer/parser front-end (rather than a full compiler)
//! needs: an input source path, an output path, the grammar file to load
//! for the parsing modes, and a verbosity flag. Populated by `clap`
//! derive the way `faxt::main::Cli` builds its argument structs.

use std::path::PathBuf;

pub const DEFAULT_GRAMMAR: &str = "grammar/source-language.txt";

#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub grammar: PathBuf,
    pub verbose: bool,
}

impl Config {
    pub fn new(input: PathBuf, output: PathBuf, grammar: Option<PathBuf>, verbose: bool) -> Self {
        Self {
            input,
            output,
            grammar: grammar.unwrap_or_else(|| PathBuf::from(DEFAULT_GRAMMAR)),
            verbose,
        }
    }
}
