use crate::{
    ast::{BinaryOperator, Node},
    interpreter::{environment::Environment, evaluator::core::EvalResult, value::core::Value},
};

impl Environment {
    /// Evaluates a binary operation node.
    ///
    /// Both operands are always evaluated, left first, before the operator is
    /// applied; `and` and `or` do not short-circuit.
    pub fn eval_binary_op(&self,
                          left: &Node,
                          op: BinaryOperator,
                          right: &Node)
                          -> EvalResult<Option<Value>> {
        let left = self.eval_child(left, "left operand")?;
        let right = self.eval_child(right, "right operand")?;
        Self::eval_binary(op, &left, &right).map(Some)
    }

    /// Evaluates a binary operation between two values.
    ///
    /// This function routes the operation to specialized handlers depending on
    /// the operator. Arithmetic operations use `eval_arithmetic`. Power calls
    /// `eval_pow`. Relational and equality operators use `eval_comparison`.
    /// Logical operators call `eval_logic`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use gambl::{
    ///     ast::BinaryOperator,
    ///     interpreter::{environment::Environment, value::core::Value},
    /// };
    ///
    /// let left = Value::Integer(3);
    /// let right = Value::Integer(4);
    ///
    /// let result = Environment::eval_binary(BinaryOperator::Add, &left, &right);
    /// assert_eq!(result.unwrap(), Value::Integer(7));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, Or, Pow, Sub,
        };

        match op {
            Add | Sub | Mul | Div | Mod => Self::eval_arithmetic(op, left, right),
            Pow => Self::eval_pow(left, right),
            Equal | Less | Greater | LessEqual | GreaterEqual => {
                Self::eval_comparison(op, left, right)
            },
            And | Or => Ok(Self::eval_logic(op, left, right)),
        }
    }
}
