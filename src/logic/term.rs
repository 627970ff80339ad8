use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary arithmetic operators over integer terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithOp {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Integer division
    Div,
}

/// Comparison operators producing boolean terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    /// Strictly less than
    Lt,
    /// Strictly greater than
    Gt,
    /// Equality
    Eq,
    /// Disequality
    Neq,
}

/// A node in the logical/arithmetic expression representation
///
/// Terms are immutable once constructed and never cyclic. Integer-sorted
/// terms are [`Term::IntLiteral`], [`Term::Variable`] and
/// [`Term::BinaryArith`]; the rest are boolean-sorted. Only boolean-sorted
/// terms may be asserted to a solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    /// Integer constant
    IntLiteral(i64),
    /// Named free variable (integer-sorted)
    Variable(String),
    /// Binary arithmetic over two integer terms
    BinaryArith {
        /// Arithmetic operator
        op: ArithOp,
        /// Left operand
        left: Box<Term>,
        /// Right operand
        right: Box<Term>,
    },
    /// Comparison of two integer terms
    Compare {
        /// Comparison operator
        op: CompareOp,
        /// Left operand
        left: Box<Term>,
        /// Right operand
        right: Box<Term>,
    },
    /// Boolean constant
    BoolLiteral(bool),
    /// Conjunction of boolean terms
    And(Vec<Term>),
    /// Disjunction of boolean terms
    Or(Vec<Term>),
}

impl Term {
    /// Integer constant term
    pub fn int(value: i64) -> Term {
        Term::IntLiteral(value)
    }

    /// Named free variable term
    pub fn var(name: impl Into<String>) -> Term {
        Term::Variable(name.into())
    }

    /// Binary arithmetic term
    pub fn arith(op: ArithOp, left: Term, right: Term) -> Term {
        Term::BinaryArith {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Comparison term
    pub fn compare(op: CompareOp, left: Term, right: Term) -> Term {
        Term::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Conjunction of the given terms
    ///
    /// An empty conjunction is `true`; a singleton collapses to its only
    /// element.
    pub fn conjunction(mut terms: Vec<Term>) -> Term {
        match terms.len() {
            0 => Term::BoolLiteral(true),
            1 => terms.remove(0),
            _ => Term::And(terms),
        }
    }

    /// Disjunction of the given terms
    ///
    /// An empty disjunction is `false`; a singleton collapses to its only
    /// element.
    pub fn disjunction(mut terms: Vec<Term>) -> Term {
        match terms.len() {
            0 => Term::BoolLiteral(false),
            1 => terms.remove(0),
            _ => Term::Or(terms),
        }
    }

    /// Returns true if this term is boolean-sorted (assertable)
    pub fn is_boolean(&self) -> bool {
        matches!(
            self,
            Term::Compare { .. } | Term::BoolLiteral(_) | Term::And(_) | Term::Or(_)
        )
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArithOp::Add => write!(f, "+"),
            ArithOp::Sub => write!(f, "-"),
            ArithOp::Mul => write!(f, "*"),
            ArithOp::Div => write!(f, "/"),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Neq => write!(f, "!="),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Term::IntLiteral(v) => write!(f, "{}", v),
            Term::Variable(name) => write!(f, "{}", name),
            Term::BinaryArith { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Term::Compare { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Term::BoolLiteral(b) => write!(f, "{}", b),
            Term::And(terms) => {
                write!(f, "(and")?;
                for t in terms {
                    write!(f, " {}", t)?;
                }
                write!(f, ")")
            }
            Term::Or(terms) => {
                write!(f, "(or")?;
                for t in terms {
                    write!(f, " {}", t)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_nested_terms() {
        let term = Term::compare(
            CompareOp::Lt,
            Term::arith(ArithOp::Add, Term::var("x"), Term::var("y")),
            Term::int(0),
        );
        assert_eq!(term.to_string(), "((x + y) < 0)");
    }

    #[test]
    fn conjunction_of_none_is_true() {
        assert_eq!(Term::conjunction(vec![]), Term::BoolLiteral(true));
    }

    #[test]
    fn conjunction_of_one_collapses() {
        let c = Term::compare(CompareOp::Gt, Term::var("w"), Term::int(0));
        assert_eq!(Term::conjunction(vec![c.clone()]), c);
    }

    #[test]
    fn disjunction_of_none_is_false() {
        assert_eq!(Term::disjunction(vec![]), Term::BoolLiteral(false));
    }

    #[test]
    fn sort_classification() {
        assert!(!Term::var("x").is_boolean());
        assert!(!Term::int(3).is_boolean());
        assert!(Term::compare(CompareOp::Eq, Term::var("x"), Term::int(0)).is_boolean());
        assert!(Term::And(vec![]).is_boolean());
    }
}
