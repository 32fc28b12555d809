/// Integer arithmetic helpers.
///
/// This module provides checked integer operations shared by the evaluator:
/// floor division and modulo, exponentiation, index resolution and safe
/// conversions between `i64` and `usize`.
///
/// All functions that can fail return a `Result` carrying a `RuntimeError`
/// instead of panicking or wrapping.
pub mod num;
