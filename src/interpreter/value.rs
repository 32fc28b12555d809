/// Core runtime value type.
///
/// Defines `Value`, its conversions, truthiness, equality and display.
pub mod core;
/// User-defined function values.
///
/// Defines `Function`, the runtime form of a `def`: parameters, body, and
/// the environment it was defined in.
pub mod function;
