//! frontc-lex — the lexical analyzer.
//!
//! A hand-rolled DFA reads a byte stream through a twin buffer
//! ([`buffer::TwinBuffer`]), classifies every lexeme against the
//! keyword table and the identifier-class rules in [`lexer::Lexer`],
//! and interns each lexeme exactly once in a [`symtab::SymbolTable`].
//! [`token::TokenKind`] is the full terminal enumeration shared with
//! `frontc-par`'s grammar loader.

mod buffer;
mod keyword;
mod lexer;
mod symtab;
mod token;

#[cfg(test)]
mod edge_cases;

pub use buffer::TwinBuffer;
pub use keyword::KeywordTable;
pub use lexer::Lexer;
pub use symtab::{SymbolTable, SymbolTableEntry, Value};
pub use token::{LexemeMarker, SymbolId, Token, TokenKind};
