use crate::{
    interpreter::{
        evaluator::{core::EvalResult, utils::check_arity},
        value::core::Value,
    },
    util::num::usize_to_i64_checked,
};

/// Returns the length of a string or array.
///
/// Accepts exactly one argument.
/// Strings count characters, arrays count elements.
/// Any other value causes a `TypeError` naming its type.
///
/// # Parameters
/// - `args`: Slice containing one argument.
///
/// # Returns
/// `Some(Value::Integer)` containing the length.
///
/// # Example
/// ```
/// use gambl::interpreter::{evaluator::function::builtin::len, value::core::Value};
///
/// let array = Value::from(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
///
/// assert_eq!(len(&[array]).unwrap(), Some(Value::Integer(3)));
/// assert_eq!(len(&[Value::from("cat")]).unwrap(), Some(Value::Integer(3)));
/// assert!(len(&[Value::Integer(42)]).is_err());
/// ```
pub fn len(args: &[Value]) -> EvalResult<Option<Value>> {
    check_arity("len", args, 1)?;

    let length = args[0].length()?;
    Ok(Some(Value::Integer(usize_to_i64_checked(length, "len")?)))
}
