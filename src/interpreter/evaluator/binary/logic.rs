use crate::{
    ast::BinaryOperator,
    interpreter::{environment::Environment, value::core::Value},
};

impl Environment {
    /// Evaluates a logical operation between two already evaluated values.
    ///
    /// The result is one of the operands, chosen by truthiness:
    /// - `a and b` is `a` when `a` is falsy, else `b`.
    /// - `a or b` is `a` when `a` is truthy, else `b`.
    ///
    /// # Parameters
    /// - `op`: The logical operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// The selected operand.
    ///
    /// # Example
    /// ```
    /// use gambl::{
    ///     ast::BinaryOperator,
    ///     interpreter::{environment::Environment, value::core::Value},
    /// };
    ///
    /// let zero = Value::Integer(0);
    /// let five = Value::Integer(5);
    ///
    /// assert_eq!(Environment::eval_logic(BinaryOperator::And, &zero, &five), zero);
    /// assert_eq!(Environment::eval_logic(BinaryOperator::Or, &zero, &five), five);
    /// ```
    #[must_use]
    pub fn eval_logic(op: BinaryOperator, left: &Value, right: &Value) -> Value {
        use BinaryOperator::{And, Or};

        let pick_left = match op {
            And => !left.is_truthy(),
            Or => left.is_truthy(),
            _ => unreachable!("eval_logic used with non logical operator"),
        };
        if pick_left { left.clone() } else { right.clone() }
    }
}
