use std::{cell::RefCell, cmp::Ordering, rc::Rc};

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{environment::Environment, evaluator::core::EvalResult, value::core::Value},
};

/// Identities of two arrays being ordered against each other.
type ArrayPair = (*const RefCell<Vec<Value>>, *const RefCell<Vec<Value>>);

impl Environment {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// `==` uses structural equality and accepts any two values. The
    /// relational operators order integers (booleans count as `1`/`0`),
    /// strings, and arrays lexicographically by their elements; any other
    /// pairing is a `TypeError`.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use gambl::{
    ///     ast::BinaryOperator,
    ///     interpreter::{environment::Environment, value::core::Value},
    /// };
    ///
    /// let a = Value::Integer(3);
    /// let b = Value::Integer(5);
    ///
    /// let result = Environment::eval_comparison(BinaryOperator::Less, &a, &b);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    ///
    /// let result = Environment::eval_comparison(BinaryOperator::Less, &a, &Value::from("x"));
    /// assert!(result.is_err());
    /// ```
    pub fn eval_comparison(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual};

        if op == Equal {
            return Ok(Value::Bool(left.loose_eq(right)));
        }

        let ordering = compare_values(left, right)?;
        Ok(Value::Bool(match op {
                           Less => ordering == Ordering::Less,
                           Greater => ordering == Ordering::Greater,
                           LessEqual => ordering != Ordering::Greater,
                           GreaterEqual => ordering != Ordering::Less,
                           _ => unreachable!("eval_comparison used with non comparison operator"),
                       }))
    }
}

/// Orders two values for the relational operators.
///
/// Arrays compare element by element, skipping elements that are equal under
/// `==`. A pair of arrays reached again while it is still being compared
/// orders as equal.
///
/// # Example
/// ```
/// use std::cmp::Ordering;
///
/// use gambl::interpreter::{evaluator::binary::comparison::compare_values, value::core::Value};
///
/// let short = Value::from(vec![Value::Integer(1)]);
/// let long = Value::from(vec![Value::Integer(1), Value::Integer(0)]);
///
/// assert_eq!(compare_values(&short, &long).unwrap(), Ordering::Less);
/// assert_eq!(compare_values(&Value::from("b"), &Value::from("a")).unwrap(),
///            Ordering::Greater);
/// ```
pub fn compare_values(left: &Value, right: &Value) -> EvalResult<Ordering> {
    compare_nested(left, right, &mut Vec::new())
}

fn compare_nested(left: &Value,
                  right: &Value,
                  open: &mut Vec<ArrayPair>)
                  -> EvalResult<Ordering> {
    if let (Some(a), Some(b)) = (left.as_number(), right.as_number()) {
        return Ok(a.cmp(&b));
    }

    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        (Value::Array(a), Value::Array(b)) => {
            let pair = (Rc::as_ptr(a), Rc::as_ptr(b));
            if Rc::ptr_eq(a, b) || open.contains(&pair) {
                return Ok(Ordering::Equal);
            }
            open.push(pair);
            let ordering = compare_elements(&a.borrow(), &b.borrow(), open);
            open.pop();
            ordering
        },
        _ => Err(RuntimeError::type_error(format!("cannot order '{}' and '{}'",
                                                  left.type_name(),
                                                  right.type_name()))),
    }
}

fn compare_elements(a: &[Value],
                    b: &[Value],
                    open: &mut Vec<ArrayPair>)
                    -> EvalResult<Ordering> {
    for (x, y) in a.iter().zip(b.iter()) {
        if x.loose_eq(y) {
            continue;
        }
        let ordering = compare_nested(x, y, open)?;
        if ordering != Ordering::Equal {
            return Ok(ordering);
        }
    }
    Ok(a.len().cmp(&b.len()))
}
