/// Built-in function implementations.
///
/// Contains `len`, which measures strings and arrays.
pub mod builtin;
/// The `print` function implementation.
///
/// Writes its arguments to standard output on one line.
pub mod print;

pub mod core;
