/// Represents all errors that can occur during evaluation.
///
/// Every error aborts the current top-level program; statements that already
/// ran keep their effects.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Read of a name that is not bound in the current environment.
    #[error("undefined variable: {name}")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// A call whose target is bound to something other than a function.
    #[error("{name} is not a function")]
    NotAFunction {
        /// The name used as call target.
        name: String,
    },
    /// A call with the wrong number of arguments.
    #[error("function {name} expects {expected} arguments, got {found}")]
    ArityMismatch {
        /// The name of the function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of arguments supplied.
        found:    usize,
    },
    /// A `ref` parameter received something other than a bare variable.
    #[error("ref parameter {param} of {function} needs a variable")]
    RefArgument {
        /// The function being called.
        function: String,
        /// The `ref` parameter.
        param:    String,
    },
    /// An operator or builtin applied to a value of the wrong kind.
    #[error("type error: {details}")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
    },
    /// Integer index outside the bounds of an array or string.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The index that was requested.
        index: i64,
        /// Length of the indexed value.
        len:   usize,
    },
    /// Integer division or modulo by zero.
    #[error("division by zero")]
    DivisionByZero,
    /// Checked integer arithmetic overflowed.
    #[error("integer overflow in {op}")]
    Overflow {
        /// The operator that overflowed.
        op: String,
    },
    /// An argument has the right type but an unusable value.
    #[error("invalid argument: {details}")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
    },
    /// A construct that produces no value was used where one is required.
    #[error("{context} produced no value")]
    MissingValue {
        /// Where the value was required.
        context: String,
    },
    /// User function calls nested deeper than the environment allows.
    #[error("maximum call depth of {limit} exceeded")]
    RecursionLimit {
        /// The configured limit.
        limit: usize,
    },
}

impl RuntimeError {
    /// Shorthand for a [`RuntimeError::TypeError`] with the given details.
    pub fn type_error(details: impl Into<String>) -> Self {
        Self::TypeError { details: details.into() }
    }

    /// Shorthand for a [`RuntimeError::MissingValue`] naming where it happened.
    pub fn missing_value(context: impl Into<String>) -> Self {
        Self::MissingValue { context: context.into() }
    }
}
