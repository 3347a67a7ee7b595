//! Hand-written recursive-descent parser producing `cool_ast::Program`
//! from a `cool_lexer` token stream.
//!
//! This crate deliberately does not use a parser generator (see
//! DESIGN.md): the grammar is small and stable, and a generator would
//! require build-time generated code this workspace cannot compile and
//! verify in this exercise.

mod error_recovery;
pub mod parser;

pub use parser::Parser;

use cool_ast::Program;
use cool_diagnostics::Diagnostic;
use thiserror::Error;

/// Typed syntax failures, independent of how `Diagnostic` renders them
/// (the position itself is carried by the `Diagnostic`'s own `Span`,
/// not duplicated into this message).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("expected {expected}, found '{found}'")]
    UnexpectedToken { expected: String, found: String },
}

/// Parses `source` end to end, returning the best-effort AST together
/// with any diagnostics collected along the way. Never panics on
/// malformed input; a syntax error causes [`error_recovery`] to skip
/// ahead to the next class boundary.
pub fn parse(source: &str, filename: Option<String>) -> (Program, Vec<Diagnostic>) {
    let mut parser = Parser::new(source, filename);
    let program = parser.parse_program();
    (program, parser.into_diagnostics())
}
