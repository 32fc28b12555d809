use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        environment::Reference,
        evaluator::{core::EvalResult, function::core::Builtin},
        value::function::Function,
    },
};

/// Identity of an array, used to detect cycles while walking nested arrays.
type ArrayPtr = *const RefCell<Vec<Value>>;

/// Represents a runtime value in the interpreter.
///
/// Integers, booleans and strings are copied on assignment and argument
/// passing. Arrays, functions and builtins are handles: cloning a `Value`
/// holding one of them yields another handle to the same underlying object,
/// so mutating an array through one variable is visible through every other
/// variable holding it.
#[derive(Clone)]
pub enum Value {
    /// A 64 bit signed integer.
    Integer(i64),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators and `not`. Behaves as `1`/`0` in
    /// arithmetic and ordering.
    Bool(bool),
    /// An immutable string.
    Str(String),
    /// A mutable, shared, ordered array of values.
    Array(Rc<RefCell<Vec<Self>>>),
    /// A user-defined function together with the environment it was defined
    /// in.
    Function(Rc<Function>),
    /// A host-native function such as `len` or `print`.
    Builtin(&'static Builtin),
    /// A live handle to a caller's variable, bound to `ref` parameters.
    ///
    /// Never stored in arrays or returned from expressions: reading a
    /// variable holding a reference yields the referenced value.
    Reference(Reference),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(RefCell::new(v)))
    }
}

impl Value {
    /// Returns the name of the value's type as shown in error messages.
    ///
    /// # Example
    /// ```
    /// use gambl::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(1).type_name(), "int");
    /// assert_eq!(Value::from("cat").type_name(), "str");
    /// assert_eq!(Value::from(vec![]).type_name(), "array");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "int",
            Self::Bool(_) => "bool",
            Self::Str(_) => "str",
            Self::Array(_) => "array",
            Self::Function(_) => "function",
            Self::Builtin(_) => "builtin",
            Self::Reference(_) => "reference",
        }
    }

    /// Returns whether the value counts as true in a condition.
    ///
    /// Zero, `false`, the empty string and the empty array are falsy;
    /// everything else is truthy.
    ///
    /// # Example
    /// ```
    /// use gambl::interpreter::value::core::Value;
    ///
    /// assert!(Value::Integer(-3).is_truthy());
    /// assert!(!Value::Integer(0).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(Value::from(vec![Value::Integer(0)]).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Integer(n) => *n != 0,
            Self::Bool(b) => *b,
            Self::Str(s) => !s.is_empty(),
            Self::Array(items) => !items.borrow().is_empty(),
            Self::Function(_) | Self::Builtin(_) | Self::Reference(_) => true,
        }
    }

    /// Returns the value as an integer for arithmetic and ordering.
    ///
    /// Booleans count as `1` and `0`. Returns `None` for every other kind.
    #[must_use]
    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Bool(b) => Some(*b as i64),
            _ => None,
        }
    }

    /// Converts the value to `i64`, or returns an error if not an integer.
    ///
    /// # Parameters
    /// - `what`: Describes the value for the error message, e.g. `"index"`.
    ///
    /// # Returns
    /// - `Ok(i64)`: The integer value.
    /// - `Err(RuntimeError::TypeError)`: If not an integer.
    pub fn as_integer(&self, what: &str) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            other => Err(RuntimeError::type_error(format!("{what} must be int, not '{}'",
                                                          other.type_name()))),
        }
    }

    /// Returns the number of elements of an array or characters of a string.
    ///
    /// # Returns
    /// - `Ok(usize)`: The length.
    /// - `Err(RuntimeError::TypeError)`: For any other kind of value.
    ///
    /// # Example
    /// ```
    /// use gambl::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from("héllo").length().unwrap(), 5);
    /// assert!(Value::Integer(42).length().is_err());
    /// ```
    pub fn length(&self) -> EvalResult<usize> {
        match self {
            Self::Str(s) => Ok(s.chars().count()),
            Self::Array(items) => Ok(items.borrow().len()),
            other => Err(RuntimeError::type_error(format!("object of type '{}' has no len()",
                                                          other.type_name()))),
        }
    }

    /// Language-level equality, used by `==`.
    ///
    /// Compares structurally: arrays are equal when their elements are,
    /// booleans equal the integers `1` and `0`, functions and builtins are
    /// equal only to themselves. Never fails, even on arrays that contain
    /// themselves: a pair of arrays met again while still being compared
    /// counts as equal.
    ///
    /// # Example
    /// ```
    /// use gambl::interpreter::value::core::Value;
    ///
    /// let a = Value::from(vec![Value::Integer(1), Value::from("x")]);
    /// let b = Value::from(vec![Value::Bool(true), Value::from("x")]);
    ///
    /// assert!(a.loose_eq(&b));
    /// assert!(!Value::Integer(1).loose_eq(&Value::from("1")));
    /// ```
    #[must_use]
    pub fn loose_eq(&self, other: &Self) -> bool {
        self.eq_nested(other, true, &mut Vec::new())
    }

    /// Structural equality shared by `==` (`loose`) and [`PartialEq`].
    ///
    /// `open` holds the array pairs currently being compared.
    fn eq_nested(&self, other: &Self, loose: bool, open: &mut Vec<(ArrayPtr, ArrayPtr)>) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => {
                let pair = (Rc::as_ptr(a), Rc::as_ptr(b));
                if Rc::ptr_eq(a, b) || open.contains(&pair) {
                    return true;
                }
                open.push(pair);
                let equal = {
                    let (a, b) = (a.borrow(), b.borrow());
                    a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(x, y)| x.eq_nested(y, loose, open))
                };
                open.pop();
                equal
            },
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => a.name == b.name,
            (Self::Reference(a), Self::Reference(b)) => a.same_target(b),
            _ if loose => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
            _ => false,
        }
    }

    /// Renders the value the way it appears inside an array: strings are
    /// quoted, everything else matches [`Display`](fmt::Display).
    ///
    /// # Example
    /// ```
    /// use gambl::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from("hi").repr(), "\"hi\"");
    /// assert_eq!(Value::from("hi").to_string(), "hi");
    /// ```
    #[must_use]
    pub fn repr(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_nested(&mut out, true, &mut Vec::new());
        out
    }

    fn write_nested(&self,
                    f: &mut impl fmt::Write,
                    quoted: bool,
                    open: &mut Vec<ArrayPtr>)
                    -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) if quoted => write!(f, "{s:?}"),
            Self::Str(s) => f.write_str(s),
            Self::Array(items) => {
                let ptr = Rc::as_ptr(items);
                if open.contains(&ptr) {
                    return f.write_str("[...]");
                }
                open.push(ptr);

                f.write_str("[")?;
                for (index, value) in items.borrow().iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    value.write_nested(f, true, open)?;
                }
                f.write_str("]")?;

                open.pop();
                Ok(())
            },
            Self::Function(func) => write!(f, "<function {}>", func.name),
            Self::Builtin(builtin) => write!(f, "<builtin {}>", builtin.name),
            Self::Reference(reference) => write!(f, "<ref {}>", reference.name()),
        }
    }
}

/// Strict equality for host code and tests.
///
/// Unlike [`Value::loose_eq`], values of different kinds are never equal, so
/// `Bool(true) != Integer(1)`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.eq_nested(other, false, &mut Vec::new())
    }
}

/// Debug output in the shape `#[derive(Debug)]` would give, except that an
/// array already being printed shows up as `Array([...])`.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = RefCell::new(Vec::new());
        fmt::Debug::fmt(&DebugNested { value: self,
                                       open:  &open, },
                        f)
    }
}

struct DebugNested<'a> {
    value: &'a Value,
    open:  &'a RefCell<Vec<ArrayPtr>>,
}

impl fmt::Debug for DebugNested<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Integer(n) => f.debug_tuple("Integer").field(n).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Array(items) => {
                let ptr = Rc::as_ptr(items);
                if self.open.borrow().contains(&ptr) {
                    return f.write_str("Array([...])");
                }
                self.open.borrow_mut().push(ptr);

                let items = items.borrow();
                let entries = items.iter().map(|value| DebugNested { value,
                                                                     open: self.open });
                let result = f.debug_tuple("Array")
                              .field(&DebugList(entries))
                              .finish();

                self.open.borrow_mut().pop();
                result
            },
            Value::Function(func) => f.debug_tuple("Function").field(func).finish(),
            Value::Builtin(builtin) => f.debug_tuple("Builtin").field(builtin).finish(),
            Value::Reference(reference) => f.debug_tuple("Reference").field(reference).finish(),
        }
    }
}

/// Prints an iterator of entries as a list.
struct DebugList<I>(I);

impl<'a, I> fmt::Debug for DebugList<I> where I: Iterator<Item = DebugNested<'a>> + Clone
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.clone()).finish()
    }
}

/// Renders the value as `print` shows it.
///
/// Strings appear without quotes at the top level and quoted inside arrays.
///
/// # Example
/// ```
/// use gambl::interpreter::value::core::Value;
///
/// let value = Value::from(vec![Value::Integer(1), Value::from("a"), Value::Bool(false)]);
/// assert_eq!(value.to_string(), "[1, \"a\", false]");
/// ```
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_nested(f, false, &mut Vec::new())
    }
}
