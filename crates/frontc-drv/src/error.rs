//! CLI-level error type.
//!
//! Grounded on `faxt::error::FaxtError`: a `thiserror` enum distinguishing
//! user-facing failure modes, with `#[from]` conversions for the
//! underlying I/O and front-end errors so `?` composes cleanly through
//! the command functions.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("could not read input file {path}: {source}")]
    InputRead {
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

    #[error(transparent)]
    Front(#[from] frontc_util::FrontError),

    #[error("parsing failed with {count} diagnostic(s) reported")]
    ParseFailed { count: usize },
}

pub type Result<T> = std::result::Result<T, DriverError>;
