use std::fmt;

/// An abstract syntax tree (AST) node.
///
/// `Node` is a closed set of passive variants, one per syntactic form of the
/// language. Statements and expressions share the type: every node can be
/// evaluated, and the ones that do not produce a value (assignments,
/// definitions) yield "no value" instead.
///
/// Nodes are built once by the parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Integer literal.
    Number(i64),
    /// String literal, escapes already resolved.
    Str(String),
    /// Reference to a variable by name.
    Variable(String),
    /// A binary operation (addition, comparison, etc.).
    BinOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
    },
    /// A unary operation (`not`, `-`).
    UnaryOp {
        /// The operator.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
    },
    /// `name = value`
    Assignment {
        /// Target variable.
        name:  String,
        /// Assigned expression.
        value: Box<Self>,
    },
    /// `[item, ...]`
    ArrayLiteral(Vec<Self>),
    /// Read access `base[index]`.
    Index {
        /// The indexed expression.
        base:  Box<Self>,
        /// The index expression.
        index: Box<Self>,
    },
    /// Write access `base[index] = expr`.
    AssignIndex {
        /// The indexed expression; must evaluate to an array.
        base:  Box<Self>,
        /// The index expression.
        index: Box<Self>,
        /// The assigned expression.
        expr:  Box<Self>,
    },
    /// `if condition then a else b`; either branch may be absent.
    If {
        /// The condition.
        condition:   Box<Self>,
        /// Evaluated when the condition is truthy.
        then_branch: Option<Box<Self>>,
        /// Evaluated when the condition is falsy.
        else_branch: Option<Box<Self>>,
    },
    /// `while condition : body`
    While {
        /// Re-evaluated before every iteration.
        condition: Box<Self>,
        /// The loop body.
        body:      Box<Self>,
    },
    /// `def name(params) : statements`
    FunctionDef {
        /// The name the function is bound to.
        name:       String,
        /// Declared parameters, in order.
        params:     Vec<Param>,
        /// Body statements, in order.
        statements: Vec<Self>,
    },
    /// `name(args)`
    Call {
        /// Name of the function being called.
        name: String,
        /// Argument expressions.
        args: Vec<Self>,
    },
    /// `return value`
    ReturnValue(Box<Self>),
    /// A `;`-separated sequence evaluating to its last statement.
    Block(Vec<Self>),
}

/// A declared function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Whether the parameter was declared with `ref`.
    pub is_ref: bool,
    /// The parameter name.
    pub name:   String,
}

impl Param {
    /// A by-value parameter.
    pub fn value(name: impl Into<String>) -> Self {
        Self { is_ref: false,
               name:   name.into(), }
    }

    /// A `ref` parameter.
    pub fn reference(name: impl Into<String>) -> Self {
        Self { is_ref: true,
               name:   name.into(), }
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Floor division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Exponentiation (`^`)
    Pow,
    /// Equal to (`==`)
    Equal,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical and (`and`)
    And,
    /// Logical or (`or`)
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `not x`).
    Not,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, Or, Pow, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "^",
            Equal => "==",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            And => "and",
            Or => "or",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "not"),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ref {
            write!(f, "ref ")?;
        }
        write!(f, "{}", self.name)
    }
}

/// Renders the node back to source text.
///
/// Operators are fully parenthesised, so the output parses back to the same
/// tree for any program that came out of the parser.
///
/// # Example
/// ```
/// use gambl::parse;
///
/// let ast = parse("x = 1 + 2 * 3; x").unwrap();
///
/// assert_eq!(ast.to_string(), "x = (1 + (2 * 3)); x");
/// assert_eq!(parse(&ast.to_string()).unwrap(), ast);
/// ```
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write_string_literal(f, s),
            Self::Variable(name) => write!(f, "{name}"),
            Self::BinOp { left, op, right } => write!(f, "({left} {op} {right})"),
            Self::UnaryOp { op, operand } => write!(f, "({op} {operand})"),
            Self::Assignment { name, value } => write!(f, "{name} = {value}"),
            Self::ArrayLiteral(items) => {
                write!(f, "[")?;
                write_joined(f, items, ", ")?;
                write!(f, "]")
            },
            Self::Index { base, index } => write!(f, "{base}[{index}]"),
            Self::AssignIndex { base, index, expr } => write!(f, "{base}[{index}] = {expr}"),
            Self::If { condition,
                       then_branch,
                       else_branch, } => {
                write!(f, "if {condition}")?;
                if let Some(branch) = then_branch {
                    write!(f, " then {branch}")?;
                }
                if let Some(branch) = else_branch {
                    write!(f, " else {branch}")?;
                }
                Ok(())
            },
            Self::While { condition, body } => write!(f, "while {condition} : {body}"),
            Self::FunctionDef { name,
                                params,
                                statements, } => {
                write!(f, "def {name}(")?;
                write_joined(f, params, ", ")?;
                write!(f, ") : ")?;
                write_joined(f, statements, "; ")
            },
            Self::Call { name, args } => {
                write!(f, "{name}(")?;
                write_joined(f, args, ", ")?;
                write!(f, ")")
            },
            Self::ReturnValue(value) => write!(f, "return {value}"),
            Self::Block(statements) => write_joined(f, statements, "; "),
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>,
                                 items: &[T],
                                 separator: &str)
                                 -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_string_literal(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            '\0' => f.write_str("\\0")?,
            other => write!(f, "{other}")?,
        }
    }
    f.write_str("\"")
}
