/// Lexing and parsing errors.
///
/// Defines all error types that can occur while turning source text into an
/// AST: unrecognized characters, malformed literals, and token sequences that
/// do not match the grammar.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// undefined variables, calls to non-functions, arity mismatches, type errors,
/// and out-of-range indices.
pub mod runtime_error;

pub use parse_error::{LexError, ParseError, SyntaxError};
pub use runtime_error::RuntimeError;

/// Any failure produced while running a Gambl program.
///
/// Returned by [`crate::run`] and [`crate::run_script`], which parse and then
/// evaluate in one step.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The source text could not be lexed or parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation of a parsed program failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
