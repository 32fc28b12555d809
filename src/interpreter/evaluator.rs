/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions, including
/// arithmetic, exponentiation, comparisons and logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the node dispatch and the `evaluate` entry point.
pub mod core;

/// Utility functions for evaluation.
///
/// Provides variable access, assignment, indexing, conditionals, loops and
/// blocks, plus helpers shared by the other evaluator modules.
pub mod utils;

/// Function evaluation.
///
/// Handles function definitions, user-defined and built-in function calls,
/// argument binding and return value computation.
pub mod function;
