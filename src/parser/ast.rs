use serde::{Deserialize, Serialize};
use std::fmt;

/// A single restricted function definition
///
/// The syntax tree deliberately covers a wider grammar than the translator
/// accepts (calls, boolean/string literals, logical operators, unary
/// operators, `<=`/`>=`, modulo). Parsing succeeds for these; the
/// translation layer rejects them with a serialized form of the node, so
/// diagnostics can point at the exact construct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    /// Function name
    pub name: String,
    /// Formal parameter names, in declaration order
    pub params: Vec<String>,
    /// Body statements
    pub body: Vec<Statement>,
}

/// Statements of the restricted function body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Variable assignment: `x = expr`
    Assign {
        /// Name of the variable being assigned
        target: String,
        /// Right-hand side expression
        value: Expression,
    },

    /// If statement with optional elif chain and else block
    If {
        /// Test expression of the `if`
        condition: Expression,
        /// Statements of the `if` branch
        then_body: Vec<Statement>,
        /// `elif` branches in order
        elif_branches: Vec<ElifBranch>,
        /// Statements of the `else` branch, if present
        else_body: Option<Vec<Statement>>,
    },

    /// While loop
    While {
        /// Loop test expression
        condition: Expression,
        /// Loop body statements
        body: Vec<Statement>,
    },

    /// For loop: `for x in collection`
    For {
        /// Loop variable name
        variable: String,
        /// Expression iterated over
        iterable: Expression,
        /// Loop body statements
        body: Vec<Statement>,
    },

    /// Return statement with optional value
    Return {
        /// Returned expression, if any
        value: Option<Expression>,
    },

    /// Bare expression statement
    Expression(Expression),

    /// No-op `pass` statement
    Pass,
}

/// One `elif` branch of an if statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElifBranch {
    /// Test expression of the branch
    pub condition: Expression,
    /// Statements of the branch
    pub body: Vec<Statement>,
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Integer literal
    IntLiteral(i64),
    /// Boolean literal (`True` / `False`)
    BoolLiteral(bool),
    /// String literal
    StringLiteral(String),
    /// Variable reference
    Variable(String),
    /// Binary operation
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
    },
    /// Unary operation
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<Expression>,
    },
    /// Function call
    Call {
        /// Name of the called function
        function: String,
        /// Argument expressions
        args: Vec<Expression>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// Division (/)
    Div,
    /// Modulo (%)
    Mod,
    /// Equality (==)
    Eq,
    /// Inequality (!=)
    NotEq,
    /// Less than (<)
    Lt,
    /// Greater than (>)
    Gt,
    /// Less or equal (<=)
    LtEq,
    /// Greater or equal (>=)
    GtEq,
    /// Logical conjunction (`and`)
    And,
    /// Logical disjunction (`or`)
    Or,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Arithmetic negation (-x)
    Neg,
    /// Logical negation (`not x`)
    Not,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
            BinaryOp::Mod => write!(f, "%"),
            BinaryOp::Eq => write!(f, "=="),
            BinaryOp::NotEq => write!(f, "!="),
            BinaryOp::Lt => write!(f, "<"),
            BinaryOp::Gt => write!(f, ">"),
            BinaryOp::LtEq => write!(f, "<="),
            BinaryOp::GtEq => write!(f, ">="),
            BinaryOp::And => write!(f, "and"),
            BinaryOp::Or => write!(f, "or"),
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "not "),
        }
    }
}

impl fmt::Display for Expression {
    /// Serialized form of the node, used verbatim in
    /// `UnsupportedConstruct` diagnostics
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::IntLiteral(v) => write!(f, "{}", v),
            Expression::BoolLiteral(true) => write!(f, "True"),
            Expression::BoolLiteral(false) => write!(f, "False"),
            Expression::StringLiteral(s) => write!(f, "'{}'", s),
            Expression::Variable(name) => write!(f, "{}", name),
            Expression::Binary { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Expression::Unary { op, operand } => write!(f, "({}{})", op, operand),
            Expression::Call { function, args } => {
                write!(f, "{}(", function)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
