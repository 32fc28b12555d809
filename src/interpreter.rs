/// The environment module stores variable bindings.
///
/// An environment is a flat name-to-value scope shared by handle. Function
/// calls get a fresh environment built from a snapshot of the function's
/// defining environment plus its bound parameters.
///
/// # Responsibilities
/// - Defines `Environment` with `define`, `get` and `set`.
/// - Defines `Reference`, the handle behind `ref` parameters.
/// - Tracks the nesting depth of user function calls.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST against an environment, performs arithmetic
/// and logical operations, manages bindings, calls functions and builtins,
/// and produces results. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates every AST node kind.
/// - Implements by-value and by-reference parameter passing and closures.
/// - Reports runtime errors such as undefined variables or type mismatches.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens,
/// each corresponding to a number, string, identifier, keyword, operator or
/// delimiter. This is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input into tokens carrying their byte offset.
/// - Skips whitespace and `#` comments.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// A recursive-descent parser with one function per precedence level turns
/// the token stream into a single `Node`.
///
/// # Responsibilities
/// - Converts tokens into AST nodes following the fixed precedence grammar.
/// - Reports expected-versus-found syntax errors.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum: integers, booleans, strings, shared arrays,
///   functions, builtins and reference cells.
/// - Implements truthiness, structural equality and display.
pub mod value;
