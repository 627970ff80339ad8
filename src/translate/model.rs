use tracing::trace;

use super::expr::translate_expr;
use crate::error::Result;
use crate::logic::{Environment, Term};
use crate::parser::{FunctionDef, Statement};

/// Constraint model compiled from one restricted function
///
/// The path condition is the conjunction of every branch test encountered
/// while walking the body in textual order. This is deliberately
/// flow-insensitive: conditions from different, even mutually exclusive,
/// branches are conjoined rather than explored as separate paths, and
/// assignments rebind with last-write-wins across branch boundaries. That
/// approximation is the defining contract of the symbolic-execution mode and
/// must not be "fixed" into a path-sensitive analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramModel {
    /// Conjunction of all branch conditions, in encounter order
    pub path_condition: Term,
    /// Final variable environment after the walk
    pub env: Environment,
    /// Formal parameter names, in declaration order
    pub params: Vec<String>,
}

impl ProgramModel {
    /// Compiles a function into its path condition and final environment
    ///
    /// Each formal parameter becomes a free variable bound to itself.
    /// Assignments translate their right-hand side against the current
    /// environment and rebind the target. `if`/`elif` tests are translated
    /// and conjoined onto the path condition; their bodies (and `else`
    /// bodies) are walked in order. `while`/`for` bodies are walked but
    /// their tests carry no constraint, and `return`, `pass` and bare
    /// expression statements contribute nothing.
    pub fn build(function: &FunctionDef) -> Result<ProgramModel> {
        let mut env = Environment::new();
        for param in &function.params {
            env = env.bind(param.clone(), Term::var(param.clone()));
        }

        let mut conditions = Vec::new();
        walk(&function.body, &mut env, &mut conditions)?;

        let path_condition = Term::conjunction(conditions);
        trace!(%path_condition, "compiled program model");

        Ok(ProgramModel {
            path_condition,
            env,
            params: function.params.clone(),
        })
    }
}

fn walk(statements: &[Statement], env: &mut Environment, conditions: &mut Vec<Term>) -> Result<()> {
    for statement in statements {
        match statement {
            Statement::Assign { target, value } => {
                let term = translate_expr(value, env)?;
                *env = env.bind(target.clone(), term);
            }

            Statement::If {
                condition,
                then_body,
                elif_branches,
                else_body,
            } => {
                conditions.push(translate_expr(condition, env)?);
                walk(then_body, env, conditions)?;
                for branch in elif_branches {
                    conditions.push(translate_expr(&branch.condition, env)?);
                    walk(&branch.body, env, conditions)?;
                }
                if let Some(body) = else_body {
                    walk(body, env, conditions)?;
                }
            }

            // Loop tests carry no constraint; their bodies still take part.
            Statement::While { body, .. } => walk(body, env, conditions)?,
            Statement::For { body, .. } => walk(body, env, conditions)?,

            Statement::Return { .. } | Statement::Expression(_) | Statement::Pass => {}
        }
    }
    Ok(())
}
