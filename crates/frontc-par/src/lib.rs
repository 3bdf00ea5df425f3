//! frontc-par — the LL(1) predictive parser.
//!
//! Loads a grammar from a text file ([`loader::load_grammar`]), computes
//! FIRST/FOLLOW sets ([`sets`]) and an LL(1) parse table ([`table`]),
//! then drives a stack-based top-down parse ([`driver::Parser`]) that
//! builds a [`tree::ParseTree`] and can be rendered with
//! [`printer::render`].

mod driver;
mod grammar;
mod loader;
mod printer;
mod sets;
mod table;
mod tree;

#[cfg(test)]
mod edge_cases;

pub use driver::Parser;
pub use grammar::{Grammar, GrammarSymbol, NonTerminalMarker, NtId, Production};
pub use loader::load_grammar;
pub use printer::render;
pub use sets::{compute_first, compute_follow, first_of_string, TokenSet};
pub use table::{build as build_parse_table, ParseTable};
pub use tree::{NodeId, ParseNode, ParseTree};
