use crate::interpreter::{evaluator::core::EvalResult, value::core::Value};

/// Prints its arguments on one line of standard output.
///
/// Accepts any number of arguments, formatted with
/// [`format_arguments`].
///
/// # Parameters
/// - `args`: The values to print.
///
/// # Returns
/// Always `None`; `print` produces no value.
///
/// # Example
/// ```
/// use gambl::interpreter::{evaluator::function::print::print, value::core::Value};
///
/// // The function prints the values to stdout, but the doctest
/// // only checks the returned result.
/// let result = print(&[Value::from("answer:"), Value::Integer(42)]).unwrap();
///
/// assert_eq!(result, None);
/// ```
#[allow(clippy::unnecessary_wraps)]
pub fn print(args: &[Value]) -> EvalResult<Option<Value>> {
    println!("{}", format_arguments(args));
    Ok(None)
}

/// Joins values with single spaces the way `print` writes them.
///
/// Strings appear raw, arrays as bracketed comma-separated lists with their
/// string elements quoted.
///
/// # Example
/// ```
/// use gambl::interpreter::{evaluator::function::print::format_arguments, value::core::Value};
///
/// let nested = Value::from(vec![Value::Integer(1), Value::from(vec![Value::from("a")])]);
/// let line = format_arguments(&[Value::from("x ="), nested, Value::Bool(true)]);
///
/// assert_eq!(line, "x = [1, [\"a\"]] true");
/// assert_eq!(format_arguments(&[]), "");
/// ```
#[must_use]
pub fn format_arguments(args: &[Value]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
