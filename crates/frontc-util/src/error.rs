//! Fatal error type.
//!
//! Lexical and syntactic problems are reported through [`crate::diagnostic`]
//! and never stop the run (spec.md §7 taxa 1–2). `FrontError` is only for
//! taxon 3: conditions that make continuing meaningless.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontError {
    #[error("could not read source file {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read grammar file {path}: {source}")]
    GrammarRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed grammar at line {line}: {reason}")]
    MalformedGrammar { line: usize, reason: String },
}
