//! # gambl
//!
//! gambl is a small imperative scripting language with a tree-walking
//! interpreter written in Rust. Programs are `;`-separated statements over
//! integers, booleans, strings and arrays, with `if`/`while`, recursive
//! functions, closures and by-reference parameters.
//!
//! The pipeline is lexer, recursive-descent parser, AST, evaluator. The two
//! entry points are [`parse`] and [`evaluate`]; [`run`] does both.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::{
    ast::Node,
    error::{Error, ParseError},
    interpreter::{lexer::tokenize, parser::core::parse_program, value::core::Value},
};
pub use crate::interpreter::{environment::Environment, evaluator::core::evaluate};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the parser
/// and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines one node variant per language construct.
/// - Defines the binary and unary operator sets.
/// - Prints nodes back to re-parsable source text.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing, or
/// evaluating code. Each failure is a distinct variant so callers can match
/// on the exact kind.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches byte offsets and detailed messages for context.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, environments and
/// value representations to provide a complete runtime for Gambl programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Checked integer helpers.
///
/// Floor division and modulo, exponentiation, index normalisation and
/// conversions between `usize` and `i64` that report overflow instead of
/// wrapping.
pub mod util;

/// Parses a complete program into a single AST node.
///
/// Lexing runs to completion first, so a lexical error anywhere in the
/// source is reported before any syntax error. Parsing never partially
/// succeeds: leftover tokens are an error.
///
/// # Example
/// ```
/// use gambl::{ast::Node, parse};
///
/// assert_eq!(parse("42").unwrap(), Node::Number(42));
/// assert_eq!(parse("").unwrap(), Node::Block(vec![]));
/// assert!(parse("1 +").is_err());
/// ```
pub fn parse(source: &str) -> Result<Node, ParseError> {
    let tokens = tokenize(source)?;
    let ast = parse_program(&mut tokens.iter().peekable())?;

    let statements = match &ast {
        Node::Block(statements) => statements.len(),
        _ => 1,
    };
    debug!(tokens = tokens.len(), statements, "parsed program");

    Ok(ast)
}

/// Parses and evaluates `source` against `env`.
///
/// Statements that ran before a failing one keep their effects on `env`.
///
/// # Returns
/// The value of the last statement, or `None` if it produced no value.
///
/// # Example
/// ```
/// use gambl::{Environment, interpreter::value::core::Value, run};
///
/// let env = Environment::with_builtins();
///
/// assert_eq!(run("x = 4; x + 5", &env).unwrap(), Some(Value::Integer(9)));
/// assert_eq!(run("x * 2", &env).unwrap(), Some(Value::Integer(8)));
/// assert!(run("y + 2", &env).is_err());
/// ```
pub fn run(source: &str, env: &Environment) -> Result<Option<Value>, Error> {
    let ast = parse(source)?;
    Ok(evaluate(&ast, env)?)
}

/// Runs a whole script against `env`.
///
/// When `auto_print` is set the final value, if any, is printed to stdout.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use gambl::{Environment, run_script};
///
/// let env = Environment::with_builtins();
///
/// // Simple program: the result is calculated and no error occurs.
/// assert!(run_script("result = 2 + 2", &env, false).is_ok());
///
/// // An intentional error (unknown variable).
/// assert!(run_script("y = x + 1", &env, false).is_err());
/// ```
pub fn run_script(source: &str,
                  env: &Environment,
                  auto_print: bool)
                  -> Result<Option<Value>, Error> {
    let result = run(source, env)?;

    if auto_print && let Some(value) = &result {
        println!("{value}");
    }

    Ok(result)
}
