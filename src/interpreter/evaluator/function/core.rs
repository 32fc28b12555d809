use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
    ast::{Node, Param},
    error::RuntimeError,
    interpreter::{
        environment::{Environment, Reference},
        evaluator::{
            core::EvalResult,
            function::{builtin, print},
        },
        value::{core::Value, function::Function},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values, none of which is
/// a reference. It returns an optional value wrapped in `EvalResult`.
pub type BuiltinFn = fn(&[Value]) -> EvalResult<Option<Value>>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `Variadic` means the builtin accepts any number of arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Variadic,
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BUILTIN_TABLE` (static table installed into base environments),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// Every builtin, in the order they are installed.
        pub static BUILTIN_TABLE: &[Builtin] = &[
            $(
                Builtin { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every builtin.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "len"   => { arity: Arity::Exact(1), func: builtin::len },
    "print" => { arity: Arity::Variadic, func: print::print },
}

/// A host-native function bound into the base environment.
pub struct Builtin {
    /// The name it is bound under.
    pub name: &'static str,
    arity:    Arity,
    func:     BuiltinFn,
}

impl Builtin {
    /// Checks the argument count and runs the builtin.
    ///
    /// # Errors
    /// [`RuntimeError::ArityMismatch`] if the argument count is not accepted,
    /// or whatever the builtin itself reports.
    ///
    /// # Example
    /// ```
    /// use gambl::interpreter::{evaluator::function::core::BUILTIN_TABLE, value::core::Value};
    ///
    /// let len = BUILTIN_TABLE.iter().find(|b| b.name == "len").unwrap();
    ///
    /// assert_eq!(len.call(&[Value::from("cat")]).unwrap(), Some(Value::Integer(3)));
    /// assert!(len.call(&[]).is_err());
    /// ```
    pub fn call(&self, args: &[Value]) -> EvalResult<Option<Value>> {
        if let Arity::Exact(expected) = self.arity
           && args.len() != expected
        {
            return Err(RuntimeError::ArityMismatch { name: self.name.to_string(),
                                                     expected,
                                                     found: args.len() });
        }
        (self.func)(args)
    }
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

impl Environment {
    /// Evaluates a `def` statement.
    ///
    /// Binds a new function value under `name` in this environment,
    /// replacing any previous binding. The function keeps a handle to this
    /// environment and snapshots it whenever it is called.
    ///
    /// # Returns
    /// Always `None`.
    ///
    /// # Example
    /// ```
    /// use gambl::{
    ///     ast::{Node, Param},
    ///     interpreter::{environment::Environment, value::core::Value},
    /// };
    ///
    /// let env = Environment::new();
    /// let body = vec![Node::Variable("x".into())];
    ///
    /// let result = env.eval_function_def("id", &[Param::value("x")], &body).unwrap();
    ///
    /// assert_eq!(result, None);
    /// assert!(matches!(env.get("id").unwrap(), Value::Function(_)));
    /// ```
    #[allow(clippy::unnecessary_wraps)]
    pub fn eval_function_def(&self,
                             name: &str,
                             params: &[Param],
                             statements: &[Node])
                             -> EvalResult<Option<Value>> {
        let function = Function::new(name.to_string(),
                                     params.to_vec(),
                                     statements.to_vec(),
                                     self.clone());
        self.define(name, Value::Function(Rc::new(function)));
        Ok(None)
    }

    /// Evaluates a call `name(args)`.
    ///
    /// The name is resolved in this environment. Builtins receive their
    /// arguments fully evaluated; user functions go through
    /// [`call_function`](Self::call_function).
    ///
    /// # Errors
    /// - [`RuntimeError::UndefinedVariable`] if `name` is unbound.
    /// - [`RuntimeError::NotAFunction`] if it is bound to something else.
    /// - Any error raised while binding arguments or running the callee.
    pub fn eval_call(&self, name: &str, args: &[Node]) -> EvalResult<Option<Value>> {
        let callee = match self.get(name)? {
            Value::Reference(reference) => reference.get()?,
            value => value,
        };

        match callee {
            Value::Builtin(builtin) => {
                let values = args.iter()
                                 .map(|arg| self.eval_child(arg, "argument"))
                                 .collect::<EvalResult<Vec<_>>>()?;
                builtin.call(&values)
            },
            Value::Function(function) => self.call_function(&function, args),
            _ => Err(RuntimeError::NotAFunction { name: name.to_string() }),
        }
    }

    /// Calls a user-defined function with unevaluated argument expressions.
    ///
    /// 1. The argument count must equal the parameter count.
    /// 2. Arguments are bound left to right in this (the caller's)
    ///    environment: a `ref` parameter takes a [`Reference`] to the
    ///    argument variable, anything else takes the argument's value.
    /// 3. A new frame is built from a snapshot of the function's defining
    ///    environment, and the bindings are defined in it.
    /// 4. The body runs in that frame. A top-level `return` ends the call with
    ///    its value; otherwise the call yields the last statement's result.
    ///
    /// # Errors
    /// - [`RuntimeError::ArityMismatch`] on a wrong argument count.
    /// - [`RuntimeError::RefArgument`] when a `ref` parameter gets anything
    ///   but a bare variable.
    /// - [`RuntimeError::RecursionLimit`] when calls nest too deeply.
    pub fn call_function(&self, function: &Function, args: &[Node]) -> EvalResult<Option<Value>> {
        if args.len() != function.params.len() {
            return Err(RuntimeError::ArityMismatch { name:     function.name.clone(),
                                                     expected: function.params.len(),
                                                     found:    args.len(), });
        }

        let bindings = function.params
                               .iter()
                               .zip(args)
                               .map(|(param, arg)| self.bind_argument(function, param, arg))
                               .collect::<EvalResult<Vec<_>>>()?;

        let _call = self.enter_call()?;
        let frame = function.closure.snapshot();
        for (param, value) in function.params.iter().zip(bindings) {
            frame.define(param.name.as_str(), value);
        }

        trace!(function = %function.name, depth = self.call_depth(), "enter");
        let result = frame.run_body(&function.body);
        match &result {
            Ok(_) => trace!(function = %function.name, "exit"),
            Err(error) => debug!(function = %function.name, %error, "call failed"),
        }
        result
    }

    /// Produces the value bound to one parameter.
    fn bind_argument(&self, function: &Function, param: &Param, arg: &Node) -> EvalResult<Value> {
        if !param.is_ref {
            return self.eval_child(arg, "argument");
        }
        match arg {
            Node::Variable(name) => Ok(Value::Reference(Reference::new(self.clone(), name.as_str()))),
            _ => Err(RuntimeError::RefArgument { function: function.name.clone(),
                                                 param:    param.name.clone(), }),
        }
    }

    /// Runs function body statements in order.
    ///
    /// Only a `return` at the top level of the body ends the call early; a
    /// `return` nested in an `if` or `while` just yields its value there.
    fn run_body(&self, statements: &[Node]) -> EvalResult<Option<Value>> {
        let mut last = None;
        for statement in statements {
            if let Node::ReturnValue(value) = statement {
                return self.eval(value);
            }
            last = self.eval(statement)?;
        }
        Ok(last)
    }
}
