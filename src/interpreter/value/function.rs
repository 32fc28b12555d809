use std::fmt;

use crate::{
    ast::{Node, Param},
    interpreter::environment::Environment,
};

/// A user-defined function value.
///
/// Created when a `def` statement is evaluated. Holds on to the environment
/// the definition ran in; every call starts from a flat copy of that
/// environment's bindings as they are at call time, plus the bound
/// parameters.
pub struct Function {
    /// The name the function was defined under.
    pub name:    String,
    /// Declared parameters, in order.
    pub params:  Vec<Param>,
    /// Body statements, in order.
    pub body:    Vec<Node>,
    /// The defining environment.
    pub closure: Environment,
}

impl Function {
    /// Creates a function value closing over `closure`.
    #[must_use]
    pub const fn new(name: String,
                     params: Vec<Param>,
                     body: Vec<Node>,
                     closure: Environment)
                     -> Self {
        Self { name,
               params,
               body,
               closure }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The closure usually binds this very function.
        f.debug_struct("Function")
         .field("name", &self.name)
         .field("params", &self.params)
         .field("body", &self.body)
         .finish_non_exhaustive()
    }
}
