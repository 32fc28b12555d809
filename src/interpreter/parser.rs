/// Program, expression and `if` entry points.
///
/// Holds `parse_program`, the top-level loop over `;`-separated statements,
/// and the shared `ParseResult` alias.
pub mod core;

/// Prefix operators and primary expressions.
///
/// Handles negation, `not`, literals, identifiers, calls, grouping and
/// postfix indexing.
pub mod unary;

/// Binary operator precedence levels.
///
/// One function per level, from `or` down to `^`.
pub mod binary;

/// Shared token helpers for the parser.
pub(crate) mod utils;

/// Statement parsing.
///
/// Implements function definitions, `return`, `while` and both forms of
/// assignment.
pub mod statement;
