use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{environment::Environment, evaluator::core::EvalResult, value::core::Value},
    util::num::{floor_div, floor_mod, overflow, repeat_count, repeat_len},
};

impl Environment {
    /// Evaluates `+`, `-`, `*`, `/` or `%`.
    ///
    /// Integer operands (booleans count as `1`/`0`) use checked arithmetic;
    /// `/` and `%` round toward negative infinity. Beyond integers:
    /// - `+` concatenates two strings, or two arrays into a new array.
    /// - `*` repeats a string or array by an integer count, on either side.
    ///
    /// Every other combination is a `TypeError`.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed value.
    ///
    /// # Example
    /// ```
    /// use gambl::{
    ///     ast::BinaryOperator,
    ///     interpreter::{environment::Environment, value::core::Value},
    /// };
    ///
    /// let r = Environment::eval_arithmetic(BinaryOperator::Div, &Value::Integer(-7), &Value::Integer(2));
    /// assert_eq!(r.unwrap(), Value::Integer(-4));
    ///
    /// let r = Environment::eval_arithmetic(BinaryOperator::Mul, &Value::from("ab"), &Value::Integer(2));
    /// assert_eq!(r.unwrap(), Value::from("abab"));
    ///
    /// let r = Environment::eval_arithmetic(BinaryOperator::Sub, &Value::from("ab"), &Value::Integer(2));
    /// assert!(r.is_err());
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mod, Mul, Sub};
        use Value::{Array, Str};

        if let (Some(a), Some(b)) = (left.as_number(), right.as_number()) {
            return Self::eval_integer_op(op, a, b).map(Value::Integer);
        }

        match (op, left, right) {
            (Add, Str(a), Str(b)) => Ok(Str(format!("{a}{b}"))),
            (Add, Array(a), Array(b)) => {
                let mut items = a.borrow().clone();
                items.extend(b.borrow().iter().cloned());
                Ok(Value::from(items))
            },
            (Mul, Str(s), count) | (Mul, count, Str(s)) if count.as_number().is_some() => {
                let times = repeat_count(count.as_number().unwrap_or(0))?;
                Self::repeat_str(s, times).map(Str)
            },
            (Mul, Array(items), count) | (Mul, count, Array(items))
                if count.as_number().is_some() =>
            {
                let times = repeat_count(count.as_number().unwrap_or(0))?;
                Self::repeat_array(items, times)
            },
            (Add | Sub | Mul | Div | Mod, _, _) => {
                Err(RuntimeError::type_error(format!("unsupported operand types for {op}: '{}' \
                                                      and '{}'",
                                                     left.type_name(),
                                                     right.type_name())))
            },
            _ => unreachable!("eval_arithmetic used with non arithmetic operator"),
        }
    }

    /// Applies an arithmetic operator to two integers.
    fn eval_integer_op(op: BinaryOperator, a: i64, b: i64) -> EvalResult<i64> {
        use BinaryOperator::{Add, Div, Mod, Mul, Sub};

        match op {
            Add => a.checked_add(b).ok_or_else(|| overflow("+")),
            Sub => a.checked_sub(b).ok_or_else(|| overflow("-")),
            Mul => a.checked_mul(b).ok_or_else(|| overflow("*")),
            Div => floor_div(a, b),
            Mod => floor_mod(a, b),
            _ => unreachable!("eval_integer_op used with non arithmetic operator"),
        }
    }

    /// Repeats `s` `times` times.
    ///
    /// Fails with `Overflow` when the result cannot be allocated.
    fn repeat_str(s: &str, times: usize) -> EvalResult<String> {
        let mut repeated = String::new();
        let total = repeat_len(s.len(), times)?;
        if total == 0 {
            return Ok(repeated);
        }
        repeated.try_reserve_exact(total).map_err(|_| overflow("*"))?;
        for _ in 0..times {
            repeated.push_str(s);
        }
        Ok(repeated)
    }

    /// Builds a new array holding `times` copies of the elements of `items`.
    ///
    /// Nested arrays are copied as handles, not deeply.
    fn repeat_array(items: &Rc<RefCell<Vec<Value>>>, times: usize) -> EvalResult<Value> {
        let items = items.borrow();
        let mut repeated = Vec::new();
        let total = repeat_len(items.len(), times)?;
        if total == 0 {
            return Ok(Value::from(repeated));
        }
        repeated.try_reserve_exact(total).map_err(|_| overflow("*"))?;
        for _ in 0..times {
            repeated.extend(items.iter().cloned());
        }
        Ok(Value::from(repeated))
    }
}
