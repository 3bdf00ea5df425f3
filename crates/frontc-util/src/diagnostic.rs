//! Diagnostic reporting.
//!
//! Trimmed relative to the teacher's `faxc-util::diagnostic` (no span
//! arithmetic, no diagnostic-code registry): this front-end reports
//! against a source line number only, per spec.md §6, and the five
//! message shapes listed there are the entire public surface. Grounded on
//! `faxc-util::diagnostic::{Diagnostic, Level, Handler}`'s role (a
//! collector the lexer/parser push into, queried for `has_errors` at the
//! end of a run) rather than its span-tracking machinery.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "Error"),
            Level::Warning => write!(f, "Warning"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub line: u32,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}\t{}: {}", self.line, self.level, self.message)
    }
}

/// Collects diagnostics in the order they were reported.
///
/// Unlike `faxc-util::diagnostic::Handler`, this `Handler` is always
/// explicitly owned and passed by `&mut` — there is no interior-mutability
/// fallback, because the lexer and parser already hold `&mut self` at
/// every call site that would need to report something.
#[derive(Debug, Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, level: Level, line: u32, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            level,
            line,
            message: message.into(),
        });
    }

    /// `Line N  Error: Unrecognized pattern: "<lexeme>"`
    pub fn unrecognized_pattern(&mut self, line: u32, lexeme: &str) {
        self.report(
            Level::Error,
            line,
            format!("Unrecognized pattern: \"{lexeme}\""),
        );
    }

    /// `Line N  Error: Too long identifier: "<lexeme>"`
    pub fn too_long_identifier(&mut self, line: u32, lexeme: &str) {
        self.report(
            Level::Error,
            line,
            format!("Too long identifier: \"{lexeme}\""),
        );
    }

    /// `Line N  Error: Too long function name: "<lexeme>"`
    pub fn too_long_function_name(&mut self, line: u32, lexeme: &str) {
        self.report(
            Level::Error,
            line,
            format!("Too long function name: \"{lexeme}\""),
        );
    }

    /// `Line N  Error: The token TK_X for lexeme "<lexeme>" does not match the expected token TK_Y`
    pub fn token_mismatch(&mut self, line: u32, found: &str, lexeme: &str, expected: &str) {
        self.report(
            Level::Error,
            line,
            format!(
                "The token {found} for lexeme \"{lexeme}\" does not match the expected token {expected}"
            ),
        );
    }

    /// `Line N  Error: Invalid token TK_X encountered with value "<lexeme>". Stack top is: <symbol>`
    pub fn invalid_token(&mut self, line: u32, found: &str, lexeme: &str, stack_top: &str) {
        self.report(
            Level::Error,
            line,
            format!(
                "Invalid token {found} encountered with value \"{lexeme}\". Stack top is: {stack_top}"
            ),
        );
    }

    pub fn warning(&mut self, line: u32, message: impl Into<String>) {
        self.report(Level::Warning, line, message);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == Level::Error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
