use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{environment::Environment, value::core::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

impl Environment {
    /// Evaluates a node against this environment.
    ///
    /// This is the main entry point for evaluation. The evaluator dispatches
    /// on the node variant: literals, variables, unary and binary operations,
    /// assignments, arrays and indexing, conditionals, loops, function
    /// definitions and calls, returns and blocks.
    ///
    /// # Parameters
    /// - `node`: Node to evaluate.
    ///
    /// # Returns
    /// `Some(Value)` for nodes that produce a value, or `None` for
    /// constructs that do not yield one (assignments, definitions, `print`).
    ///
    /// # Example
    /// ```
    /// use gambl::{
    ///     ast::{BinaryOperator, Node},
    ///     interpreter::{environment::Environment, value::core::Value},
    /// };
    ///
    /// let env = Environment::new();
    /// let node = Node::BinOp { left:  Box::new(Node::Number(1)),
    ///                          op:    BinaryOperator::Add,
    ///                          right: Box::new(Node::Number(2)), };
    ///
    /// assert_eq!(env.eval(&node).unwrap(), Some(Value::Integer(3)));
    /// ```
    pub fn eval(&self, node: &Node) -> EvalResult<Option<Value>> {
        match node {
            Node::Number(n) => Ok(Some(Value::Integer(*n))),
            Node::Str(s) => Ok(Some(Value::Str(s.clone()))),
            Node::Variable(name) => self.eval_variable(name).map(Some),
            Node::BinOp { left, op, right } => self.eval_binary_op(left, *op, right),
            Node::UnaryOp { op, operand } => self.eval_unary_op(*op, operand),
            Node::Assignment { name, value } => self.eval_assignment(name, value),
            Node::ArrayLiteral(items) => self.eval_array_literal(items),
            Node::Index { base, index } => self.eval_index(base, index),
            Node::AssignIndex { base, index, expr } => self.eval_assign_index(base, index, expr),
            Node::If { condition,
                       then_branch,
                       else_branch, } => {
                self.eval_if(condition, then_branch.as_deref(), else_branch.as_deref())
            },
            Node::While { condition, body } => self.eval_while(condition, body),
            Node::FunctionDef { name,
                                params,
                                statements, } => self.eval_function_def(name, params, statements),
            Node::Call { name, args } => self.eval_call(name, args),
            Node::ReturnValue(value) => self.eval(value),
            Node::Block(statements) => self.eval_block(statements),
        }
    }
}

/// Evaluates `node` against `env`.
///
/// Free-function form of [`Environment::eval`]. Errors propagate unhandled;
/// statements that ran before the failing one keep their effects on `env`.
///
/// # Example
/// ```
/// use gambl::{
///     ast::Node,
///     interpreter::{environment::Environment, evaluator::core::evaluate, value::core::Value},
/// };
///
/// let env = Environment::new();
/// let node = Node::Assignment { name:  "x".into(),
///                               value: Box::new(Node::Number(4)), };
///
/// assert_eq!(evaluate(&node, &env).unwrap(), None);
/// assert_eq!(env.get("x").unwrap(), Value::Integer(4));
/// ```
pub fn evaluate(node: &Node, env: &Environment) -> EvalResult<Option<Value>> {
    env.eval(node)
}
