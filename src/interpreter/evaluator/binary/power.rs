use crate::{
    error::RuntimeError,
    interpreter::{environment::Environment, evaluator::core::EvalResult, value::core::Value},
    util::num::checked_pow,
};

impl Environment {
    /// Evaluates an exponentiation operation.
    ///
    /// Both operands must be integers (booleans count as `1`/`0`). The
    /// exponent must not be negative; the result is checked for overflow.
    ///
    /// # Parameters
    /// - `base`: The base value.
    /// - `exponent`: The exponent value.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the result of `base ^ exponent`.
    ///
    /// # Example
    /// ```
    /// use gambl::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let b = Value::Integer(2);
    /// let e = Value::Integer(10);
    ///
    /// let result = Environment::eval_pow(&b, &e).unwrap();
    /// assert_eq!(result, Value::Integer(1024));
    ///
    /// assert!(Environment::eval_pow(&b, &Value::Integer(-1)).is_err());
    /// ```
    pub fn eval_pow(base: &Value, exponent: &Value) -> EvalResult<Value> {
        match (base.as_number(), exponent.as_number()) {
            (Some(b), Some(e)) => checked_pow(b, e).map(Value::Integer),
            _ => {
                Err(RuntimeError::type_error(format!("unsupported operand types for ^: '{}' and \
                                                      '{}'",
                                                     base.type_name(),
                                                     exponent.type_name())))
            },
        }
    }
}
