use crate::error::{Error, Result};
use crate::logic::{ArithOp, CompareOp, Environment, Term};
use crate::parser::{BinaryOp, Expression};

/// Maximum expression nesting depth accepted by the translator
///
/// Deeply nested inputs fail with [`Error::TranslationTooDeep`] instead of
/// exhausting the stack.
pub const MAX_TRANSLATION_DEPTH: usize = 64;

/// Lowers an expression node into a [`Term`] against the given environment
///
/// Pure function: the environment is never mutated. Total over the supported
/// grammar — integer literals, variable references, binary `+ - * /`, and
/// comparisons `< > == !=`. Every other node kind is rejected with
/// [`Error::UnsupportedConstruct`] carrying the serialized node, never
/// silently coerced.
///
/// A variable bound in the environment is replaced by its bound term; an
/// unbound name becomes a free solver variable of the same name.
pub fn translate_expr(expr: &Expression, env: &Environment) -> Result<Term> {
    translate_at(expr, env, 0)
}

fn translate_at(expr: &Expression, env: &Environment, depth: usize) -> Result<Term> {
    if depth >= MAX_TRANSLATION_DEPTH {
        return Err(Error::TranslationTooDeep {
            limit: MAX_TRANSLATION_DEPTH,
        });
    }

    match expr {
        Expression::IntLiteral(value) => Ok(Term::int(*value)),

        Expression::Variable(name) => Ok(env
            .lookup(name)
            .cloned()
            .unwrap_or_else(|| Term::var(name.clone()))),

        Expression::Binary { op, left, right } => {
            let op = match op {
                BinaryOp::Add => Op::Arith(ArithOp::Add),
                BinaryOp::Sub => Op::Arith(ArithOp::Sub),
                BinaryOp::Mul => Op::Arith(ArithOp::Mul),
                BinaryOp::Div => Op::Arith(ArithOp::Div),
                BinaryOp::Lt => Op::Compare(CompareOp::Lt),
                BinaryOp::Gt => Op::Compare(CompareOp::Gt),
                BinaryOp::Eq => Op::Compare(CompareOp::Eq),
                BinaryOp::NotEq => Op::Compare(CompareOp::Neq),
                // `<=`, `>=`, `%`, `and`, `or` are outside the supported
                // grammar.
                _ => return Err(Error::unsupported(expr)),
            };
            let left = translate_at(left, env, depth + 1)?;
            let right = translate_at(right, env, depth + 1)?;
            Ok(match op {
                Op::Arith(op) => Term::arith(op, left, right),
                Op::Compare(op) => Term::compare(op, left, right),
            })
        }

        // Calls, boolean/string literals and unary operators have no term
        // counterpart.
        Expression::BoolLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::Unary { .. }
        | Expression::Call { .. } => Err(Error::unsupported(expr)),
    }
}

enum Op {
    Arith(ArithOp),
    Compare(CompareOp),
}
