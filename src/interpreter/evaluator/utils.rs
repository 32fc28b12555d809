use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{environment::Environment, evaluator::core::EvalResult, value::core::Value},
    util::num::normalize_index,
};

impl Environment {
    /// Evaluates a subexpression and ensures that it produces a value.
    ///
    /// Many evaluation paths require the same sequence: evaluate the node,
    /// check for `None`, and report a `MissingValue` error when the node
    /// yields nothing.
    ///
    /// # Parameters
    /// - `node`: Node to evaluate.
    /// - `context`: What the value is needed for, used in the error message.
    ///
    /// # Returns
    /// The evaluated `Value`.
    ///
    /// # Example
    /// ```
    /// use gambl::{
    ///     ast::Node,
    ///     interpreter::{environment::Environment, value::core::Value},
    /// };
    ///
    /// let env = Environment::new();
    /// let assignment = Node::Assignment { name:  "x".into(),
    ///                                     value: Box::new(Node::Number(1)), };
    ///
    /// assert_eq!(env.eval_child(&Node::Number(10), "operand").unwrap(), Value::Integer(10));
    /// assert!(env.eval_child(&assignment, "operand").is_err());
    /// ```
    pub fn eval_child(&self, node: &Node, context: &str) -> EvalResult<Value> {
        self.eval(node)?
            .ok_or_else(|| RuntimeError::missing_value(context))
    }

    /// Looks up a variable by name.
    ///
    /// A variable bound to a reference (a `ref` parameter) reads through to
    /// the referenced variable.
    ///
    /// # Parameters
    /// - `name`: Variable name.
    ///
    /// # Returns
    /// The variable value, or `UndefinedVariable` if it is unbound.
    ///
    /// # Example
    /// ```
    /// use gambl::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let env = Environment::new();
    /// env.define("x", Value::Integer(10));
    ///
    /// assert_eq!(env.eval_variable("x").unwrap(), Value::Integer(10));
    /// assert!(env.eval_variable("y").is_err());
    /// ```
    pub fn eval_variable(&self, name: &str) -> EvalResult<Value> {
        match self.get(name)? {
            Value::Reference(reference) => reference.get(),
            value => Ok(value),
        }
    }

    /// Evaluates `name = value`.
    ///
    /// When `name` is bound to a reference the value is written through to
    /// the referenced variable; otherwise `name` is updated or created in
    /// this environment.
    ///
    /// # Returns
    /// Always `None`.
    pub fn eval_assignment(&self, name: &str, value: &Node) -> EvalResult<Option<Value>> {
        let value = self.eval_child(value, "assigned expression")?;

        match self.lookup(name) {
            Some(Value::Reference(reference)) => reference.set(value),
            _ => self.set(name, value),
        }
        Ok(None)
    }

    /// Evaluates an array literal into a new array.
    ///
    /// Items are evaluated left to right. Every item must produce a value.
    ///
    /// # Example
    /// ```
    /// use gambl::{
    ///     ast::Node,
    ///     interpreter::{environment::Environment, value::core::Value},
    /// };
    ///
    /// let env = Environment::new();
    /// let items = vec![Node::Number(1), Node::Str("a".into())];
    ///
    /// let array = env.eval_array_literal(&items).unwrap().unwrap();
    /// assert_eq!(array, Value::from(vec![Value::Integer(1), Value::from("a")]));
    /// ```
    pub fn eval_array_literal(&self, items: &[Node]) -> EvalResult<Option<Value>> {
        let values = items.iter()
                          .map(|item| self.eval_child(item, "array element"))
                          .collect::<EvalResult<Vec<_>>>()?;
        Ok(Some(Value::from(values)))
    }

    /// Evaluates the read access `base[index]`.
    ///
    /// Arrays yield the element at the index; strings yield the character at
    /// the index as a one-character string. Negative indices count from the
    /// end.
    ///
    /// # Errors
    /// - `TypeError` if the index is not an integer or the base cannot be
    ///   indexed.
    /// - `IndexOutOfRange` if the index is outside the bounds.
    pub fn eval_index(&self, base: &Node, index: &Node) -> EvalResult<Option<Value>> {
        let base = self.eval_child(base, "indexed expression")?;
        let index = self.eval_child(index, "index")?.as_integer("index")?;

        match base {
            Value::Array(items) => {
                let items = items.borrow();
                let position = normalize_index(index, items.len())?;
                Ok(Some(items[position].clone()))
            },
            Value::Str(s) => {
                let length = s.chars().count();
                let position = normalize_index(index, length)?;
                Ok(s.chars().nth(position).map(|c| Value::Str(c.to_string())))
            },
            other => Err(RuntimeError::type_error(format!("'{}' object is not subscriptable",
                                                          other.type_name()))),
        }
    }

    /// Evaluates the write access `base[index] = expr`.
    ///
    /// Base, index and right-hand side are evaluated in that order, then
    /// the array is mutated in place, so every holder of it sees the change.
    ///
    /// # Errors
    /// - `TypeError` if the index is not an integer, or the base is a string
    ///   (strings are immutable) or some other non-array.
    /// - `IndexOutOfRange` if the index is outside the bounds.
    ///
    /// # Returns
    /// Always `None`.
    pub fn eval_assign_index(&self,
                             base: &Node,
                             index: &Node,
                             expr: &Node)
                             -> EvalResult<Option<Value>> {
        let base = self.eval_child(base, "indexed expression")?;
        let index = self.eval_child(index, "index")?.as_integer("index")?;
        let value = self.eval_child(expr, "assigned expression")?;

        let Value::Array(items) = &base else {
            return Err(RuntimeError::type_error(format!("'{}' object does not support item \
                                                         assignment",
                                                        base.type_name())));
        };

        let mut items = items.borrow_mut();
        let position = normalize_index(index, items.len())?;
        items[position] = value;
        Ok(None)
    }

    /// Evaluates a condition for `if` and `while`.
    ///
    /// A condition that produces no value counts as false.
    pub fn eval_condition(&self, condition: &Node) -> EvalResult<bool> {
        Ok(self.eval(condition)?
               .is_some_and(|value| value.is_truthy()))
    }

    /// Evaluates `if condition then a else b`.
    ///
    /// Exactly one branch runs, chosen by the truthiness of the condition. A
    /// missing branch yields `None`.
    ///
    /// # Example
    /// ```
    /// use gambl::{
    ///     ast::Node,
    ///     interpreter::{environment::Environment, value::core::Value},
    /// };
    ///
    /// let env = Environment::new();
    /// let then = Node::Number(1);
    /// let otherwise = Node::Number(2);
    ///
    /// let r = env.eval_if(&Node::Number(0), Some(&then), Some(&otherwise))
    ///            .unwrap();
    /// assert_eq!(r, Some(Value::Integer(2)));
    ///
    /// let r = env.eval_if(&Node::Number(0), Some(&then), None).unwrap();
    /// assert_eq!(r, None);
    /// ```
    pub fn eval_if(&self,
                   condition: &Node,
                   then_branch: Option<&Node>,
                   else_branch: Option<&Node>)
                   -> EvalResult<Option<Value>> {
        let branch = if self.eval_condition(condition)? {
            then_branch
        } else {
            else_branch
        };

        match branch {
            Some(node) => self.eval(node),
            None => Ok(None),
        }
    }

    /// Evaluates `while condition : body`.
    ///
    /// The condition is re-evaluated before every iteration. The loop yields
    /// the result of the last body evaluation, or `None` if the body never
    /// ran.
    pub fn eval_while(&self, condition: &Node, body: &Node) -> EvalResult<Option<Value>> {
        let mut last = None;
        while self.eval_condition(condition)? {
            last = self.eval(body)?;
        }
        Ok(last)
    }

    /// Evaluates a sequence of statements in order.
    ///
    /// Blocks open no new scope. The value of the final statement is
    /// returned, or `None` if the block is empty.
    ///
    /// # Example
    /// ```
    /// use gambl::{
    ///     ast::Node,
    ///     interpreter::{environment::Environment, value::core::Value},
    /// };
    ///
    /// let env = Environment::new();
    ///
    /// // x = 3; x
    /// let statements = vec![Node::Assignment { name:  "x".into(),
    ///                                          value: Box::new(Node::Number(3)), },
    ///                       Node::Variable("x".into())];
    ///
    /// let r = env.eval_block(&statements).unwrap();
    /// assert_eq!(r, Some(Value::Integer(3)));
    /// ```
    pub fn eval_block(&self, statements: &[Node]) -> EvalResult<Option<Value>> {
        let mut last = None;
        for statement in statements {
            last = self.eval(statement)?;
        }
        Ok(last)
    }
}

/// Checks if the argument list matches the expected count.
/// Returns an error naming the function if the count does not match.
///
/// ## Example
/// ```
/// use gambl::interpreter::{evaluator::utils::check_arity, value::core::Value};
///
/// let arg_vals = vec![Value::Integer(2), Value::Integer(1)];
///
/// assert!(check_arity("f", &arg_vals, 2).is_ok()); // Requires exactly 2 arguments.
/// assert!(check_arity("f", &arg_vals, 1).is_err());
/// ```
pub fn check_arity<T>(name: &str, args: &[T], expected: usize) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::ArityMismatch { name: name.to_string(),
                                          expected,
                                          found: args.len() })
    }
}
