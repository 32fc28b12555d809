/// Comparison operators: `==`, `<`, `>`, `<=`, `>=`.
pub mod comparison;
/// Dispatch from a binary operator to its implementation.
pub mod core;
/// The logical operators `and` and `or`.
pub mod logic;
/// Exponentiation.
pub mod power;
/// Arithmetic on integers, strings and arrays.
pub mod scalar;
