//! frontc-util - shared foundation types for the frontc workspace.
//!
//! This crate carries the utilities every other phase crate needs but that
//! belong to none of them specifically: string interning, diagnostic
//! reporting, and the fatal-error type used at crate boundaries. Nothing
//! here is global or `static` — every piece is owned by whichever
//! `Lexer`/`Parser`/`Grammar` context constructs it, so two independent
//! runs never share state and two interners never collide.

pub mod diagnostic;
pub mod error;
pub mod interner;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use error::FrontError;
pub use interner::{Interner, InternerId};
