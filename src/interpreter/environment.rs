use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    fmt,
    rc::Rc,
};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::BUILTIN_TABLE},
        value::core::Value,
    },
};

/// Default maximum nesting of user function calls.
///
/// Every call recurses through the evaluator on the host stack. Reaching
/// this limit takes several MiB of stack, more than the 2 MiB a spawned
/// thread (or a `#[test]`) gets by default; run deep programs on a thread
/// with a larger stack, as the `gambl` binary does, or pick a lower limit
/// with [`Environment::with_call_limit`].
pub const DEFAULT_CALL_LIMIT: usize = 512;

/// A flat scope mapping names to values.
///
/// `Environment` is a cheap handle: clones share the same bindings, so a
/// function value can hold on to the environment it was defined in and a
/// [`Reference`] can write into its caller's scope. There is no parent
/// chain; lookups only ever consult this one map.
///
/// # Example
/// ```
/// use gambl::interpreter::{environment::Environment, value::core::Value};
///
/// let env = Environment::new();
/// env.set("x", Value::Integer(1));
///
/// let alias = env.clone();
/// alias.set("x", Value::Integer(2));
///
/// assert_eq!(env.get("x").unwrap(), Value::Integer(2));
/// assert!(env.get("y").is_err());
/// ```
#[derive(Clone)]
pub struct Environment {
    bindings: Rc<RefCell<HashMap<String, Value>>>,
    depth:    Rc<CallDepth>,
}

/// Shared counter of active user function calls.
#[derive(Debug)]
struct CallDepth {
    current: Cell<usize>,
    limit:   usize,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an empty environment with the default call limit.
    ///
    /// See [`DEFAULT_CALL_LIMIT`] for the host stack this limit needs.
    #[must_use]
    pub fn new() -> Self {
        Self::with_call_limit(DEFAULT_CALL_LIMIT)
    }

    /// Creates an empty environment allowing at most `limit` nested user
    /// function calls.
    #[must_use]
    pub fn with_call_limit(limit: usize) -> Self {
        Self { bindings: Rc::new(RefCell::new(HashMap::new())),
               depth:    Rc::new(CallDepth { current: Cell::new(0),
                                             limit }), }
    }

    /// Creates the base environment every top-level program runs in: empty
    /// apart from the builtins `len` and `print`.
    ///
    /// Uses [`DEFAULT_CALL_LIMIT`], which assumes a large host stack.
    ///
    /// # Example
    /// ```
    /// use gambl::interpreter::environment::Environment;
    ///
    /// let env = Environment::with_builtins();
    /// assert!(env.contains("len"));
    /// assert!(env.contains("print"));
    /// ```
    #[must_use]
    pub fn with_builtins() -> Self {
        let env = Self::new();
        env.install_builtins();
        env
    }

    /// Binds every builtin into this environment, replacing user bindings of
    /// the same names.
    pub fn install_builtins(&self) {
        for builtin in BUILTIN_TABLE {
            self.define(builtin.name, Value::Builtin(builtin));
        }
    }

    /// Binds `name` in this environment, overwriting any previous binding.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Returns the value bound to `name`.
    ///
    /// A binding holding a [`Value::Reference`] is returned as is; callers
    /// that want the referenced value dereference it themselves.
    ///
    /// # Errors
    /// [`RuntimeError::UndefinedVariable`] if `name` is not bound here.
    pub fn get(&self, name: &str) -> EvalResult<Value> {
        self.lookup(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string() })
    }

    /// Returns the value bound to `name`, if any.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.bindings.borrow().get(name).cloned()
    }

    /// Updates `name` in place, or defines it here when it is unbound.
    pub fn set(&self, name: &str, value: Value) {
        let mut bindings = self.bindings.borrow_mut();
        if let Some(slot) = bindings.get_mut(name) {
            *slot = value;
        } else {
            bindings.insert(name.to_string(), value);
        }
    }

    /// Returns whether `name` is bound here.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    /// Returns the bound names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names = self.bindings.borrow().keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }

    /// Creates a new environment holding a flat copy of the current
    /// bindings.
    ///
    /// Later changes to either environment are not visible in the other,
    /// although arrays stay shared because array values are handles. The
    /// copy shares the call depth counter.
    ///
    /// # Example
    /// ```
    /// use gambl::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let env = Environment::new();
    /// env.set("x", Value::Integer(1));
    ///
    /// let frame = env.snapshot();
    /// frame.set("x", Value::Integer(2));
    ///
    /// assert_eq!(env.get("x").unwrap(), Value::Integer(1));
    /// assert_eq!(frame.get("x").unwrap(), Value::Integer(2));
    /// ```
    #[must_use]
    pub fn snapshot(&self) -> Self {
        Self { bindings: Rc::new(RefCell::new(self.bindings.borrow().clone())),
               depth:    Rc::clone(&self.depth), }
    }

    /// Returns whether both handles point at the same bindings.
    #[must_use]
    pub fn same_scope(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.bindings, &other.bindings)
    }

    /// Number of user function calls currently active.
    #[must_use]
    pub fn call_depth(&self) -> usize {
        self.depth.current.get()
    }

    /// Marks the start of a user function call.
    ///
    /// The returned guard marks the end of the call when dropped, including
    /// when the call fails.
    ///
    /// # Errors
    /// [`RuntimeError::RecursionLimit`] when the call would exceed the limit.
    pub(crate) fn enter_call(&self) -> EvalResult<CallGuard> {
        let depth = self.depth.current.get();
        if depth >= self.depth.limit {
            return Err(RuntimeError::RecursionLimit { limit: self.depth.limit });
        }
        self.depth.current.set(depth + 1);
        Ok(CallGuard { depth: Rc::clone(&self.depth) })
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Names only: bindings can hold functions that capture this scope.
        f.debug_struct("Environment")
         .field("names", &self.names())
         .finish_non_exhaustive()
    }
}

/// Ends a user function call when dropped.
pub(crate) struct CallGuard {
    depth: Rc<CallDepth>,
}

impl Drop for CallGuard {
    fn drop(&mut self) {
        let depth = self.depth.current.get();
        self.depth.current.set(depth.saturating_sub(1));
    }
}

/// A live handle to a variable in some environment.
///
/// Bound to `ref` parameters: reading the parameter reads the caller's
/// variable and assigning to it writes the caller's variable. When the
/// target slot itself holds a reference (a `ref` parameter passed on to
/// another `ref` parameter) reads and writes follow the chain.
#[derive(Clone, Debug)]
pub struct Reference {
    env:  Environment,
    name: String,
}

impl Reference {
    /// Creates a reference to `name` in `env`.
    pub fn new(env: Environment, name: impl Into<String>) -> Self {
        Self { env,
               name: name.into() }
    }

    /// Name of the referenced variable.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads the current value of the referenced variable.
    ///
    /// # Errors
    /// [`RuntimeError::UndefinedVariable`] if the variable is unbound.
    ///
    /// # Example
    /// ```
    /// use gambl::interpreter::{
    ///     environment::{Environment, Reference},
    ///     value::core::Value,
    /// };
    ///
    /// let caller = Environment::new();
    /// caller.set("x", Value::Integer(10));
    ///
    /// let reference = Reference::new(caller.clone(), "x");
    /// reference.set(Value::Integer(15));
    ///
    /// assert_eq!(reference.get().unwrap(), Value::Integer(15));
    /// assert_eq!(caller.get("x").unwrap(), Value::Integer(15));
    /// ```
    pub fn get(&self) -> EvalResult<Value> {
        match self.env.get(&self.name)? {
            Value::Reference(inner) => inner.get(),
            value => Ok(value),
        }
    }

    /// Writes `value` into the referenced variable, defining it if needed.
    pub fn set(&self, value: Value) {
        match self.env.lookup(&self.name) {
            Some(Value::Reference(inner)) => inner.set(value),
            _ => self.env.set(&self.name, value),
        }
    }

    /// Returns whether both references name the same slot.
    #[must_use]
    pub fn same_target(&self, other: &Self) -> bool {
        self.name == other.name && self.env.same_scope(&other.env)
    }
}
