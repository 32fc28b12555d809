use crate::{
    ast::{Node, UnaryOperator},
    error::RuntimeError,
    interpreter::{environment::Environment, evaluator::core::EvalResult, value::core::Value},
    util::num::overflow,
};

impl Environment {
    /// Evaluates a unary operation node.
    ///
    /// The operand must produce a value.
    pub fn eval_unary_op(&self, op: UnaryOperator, operand: &Node) -> EvalResult<Option<Value>> {
        let value = self.eval_child(operand, "operand")?;
        Self::eval_unary(op, &value).map(Some)
    }

    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: checked integer negation. Booleans negate as `1`/`0`.
    /// - `Not`: boolean negation of the operand's truthiness; works on every
    ///   value.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use gambl::{
    ///     ast::UnaryOperator,
    ///     interpreter::{environment::Environment, value::core::Value},
    /// };
    ///
    /// // Negation
    /// let v = Environment::eval_unary(UnaryOperator::Negate, &Value::Integer(5)).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// // Logical not
    /// let v = Environment::eval_unary(UnaryOperator::Not, &Value::from("")).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    ///
    /// // Strings cannot be negated
    /// assert!(Environment::eval_unary(UnaryOperator::Negate, &Value::from("a")).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match value.as_number() {
                Some(n) => n.checked_neg()
                            .map(Value::Integer)
                            .ok_or_else(|| overflow("-")),
                None => Err(RuntimeError::type_error(format!("bad operand type for unary -: '{}'",
                                                             value.type_name()))),
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
        }
    }
}
