use std::collections::{BTreeMap, HashMap};

use tracing::debug;
use z3::ast::{Ast, Bool, Int};
use z3::{Config, Context, Params, SatResult, Solver};

use super::{SatOutcome, SolverAdapter};
use crate::error::{Error, Result};
use crate::logic::{ArithOp, CompareOp, Term};

/// Default satisfiability query budget, in milliseconds
const DEFAULT_TIMEOUT_MS: u32 = 5_000;

/// [`SolverAdapter`] implementation backed by the Z3 decision procedure
///
/// Declarations and assertions are buffered as [`Term`]s; a fresh Z3 context
/// and solver are created inside each [`SolverAdapter::check_sat`] call, so
/// nothing carries over between queries or requests. Queries run under a time
/// budget; a budget-exceeded answer surfaces as [`Error::SolverTimeout`]
/// rather than hanging the request.
pub struct Z3Adapter {
    declarations: Vec<String>,
    assertions: Vec<Term>,
    timeout_ms: u32,
    model: Option<BTreeMap<String, i64>>,
}

impl Z3Adapter {
    /// Creates an adapter with the default query budget
    pub fn new() -> Self {
        Z3Adapter::with_timeout(DEFAULT_TIMEOUT_MS)
    }

    /// Creates an adapter with an explicit query budget in milliseconds
    pub fn with_timeout(timeout_ms: u32) -> Self {
        Z3Adapter {
            declarations: Vec::new(),
            assertions: Vec::new(),
            timeout_ms,
            model: None,
        }
    }
}

impl Default for Z3Adapter {
    fn default() -> Self {
        Z3Adapter::new()
    }
}

impl SolverAdapter for Z3Adapter {
    fn declare(&mut self, name: &str) {
        if !self.declarations.iter().any(|n| n == name) {
            self.declarations.push(name.to_string());
        }
    }

    fn assert_term(&mut self, term: Term) {
        self.assertions.push(term);
    }

    fn check_sat(&mut self) -> Result<SatOutcome> {
        self.model = None;

        let cfg = Config::new();
        let ctx = Context::new(&cfg);
        let solver = Solver::new(&ctx);

        let mut params = Params::new(&ctx);
        params.set_u32("timeout", self.timeout_ms);
        solver.set_params(&params);

        let mut vars: HashMap<String, Int> = HashMap::new();
        for name in &self.declarations {
            vars.insert(name.clone(), Int::new_const(&ctx, name.as_str()));
        }
        for term in &self.assertions {
            let formula = lower_bool(&ctx, term, &mut vars)?;
            solver.assert(&formula);
        }

        debug!(
            declarations = self.declarations.len(),
            assertions = self.assertions.len(),
            "running satisfiability query"
        );

        match solver.check() {
            SatResult::Sat => {
                let model = solver
                    .get_model()
                    .ok_or_else(|| Error::solver("solver reported sat but produced no model"))?;

                // Model completion: every declared variable gets a value,
                // forced or not.
                let mut witness = BTreeMap::new();
                for name in &self.declarations {
                    let value = model
                        .eval(&vars[name], true)
                        .and_then(|v| v.as_i64())
                        .ok_or_else(|| {
                            Error::solver(format!("model has no integer value for '{}'", name))
                        })?;
                    witness.insert(name.clone(), value);
                }
                self.model = Some(witness);
                Ok(SatOutcome::Sat)
            }
            SatResult::Unsat => Ok(SatOutcome::Unsat),
            SatResult::Unknown => {
                let reason = solver
                    .get_reason_unknown()
                    .unwrap_or_else(|| "unknown".to_string());
                if reason.contains("timeout") || reason.contains("canceled") {
                    Err(Error::SolverTimeout {
                        budget_ms: self.timeout_ms,
                    })
                } else {
                    Err(Error::solver(format!("solver answered unknown: {}", reason)))
                }
            }
        }
    }

    fn get_model(&self) -> Result<BTreeMap<String, i64>> {
        self.model
            .clone()
            .ok_or_else(|| Error::solver("no model available; the last query was not satisfiable"))
    }
}

/// Lowers an integer-sorted term into a Z3 integer expression
///
/// Variables mentioned in terms but never declared are created on first
/// use, mirroring how free names enter constraints.
fn lower_int<'ctx>(
    ctx: &'ctx Context,
    term: &Term,
    vars: &mut HashMap<String, Int<'ctx>>,
) -> Result<Int<'ctx>> {
    match term {
        Term::IntLiteral(value) => Ok(Int::from_i64(ctx, *value)),

        Term::Variable(name) => Ok(vars
            .entry(name.clone())
            .or_insert_with(|| Int::new_const(ctx, name.as_str()))
            .clone()),

        Term::BinaryArith { op, left, right } => {
            let left = lower_int(ctx, left, vars)?;
            let right = lower_int(ctx, right, vars)?;
            Ok(match op {
                ArithOp::Add => left + right,
                ArithOp::Sub => left - right,
                ArithOp::Mul => left * right,
                ArithOp::Div => left.div(&right),
            })
        }

        Term::Compare { .. } | Term::BoolLiteral(_) | Term::And(_) | Term::Or(_) => Err(
            Error::solver(format!("expected an integer term, found {}", term)),
        ),
    }
}

/// Lowers a boolean-sorted term into a Z3 boolean expression
fn lower_bool<'ctx>(
    ctx: &'ctx Context,
    term: &Term,
    vars: &mut HashMap<String, Int<'ctx>>,
) -> Result<Bool<'ctx>> {
    match term {
        Term::BoolLiteral(value) => Ok(Bool::from_bool(ctx, *value)),

        Term::Compare { op, left, right } => {
            let left = lower_int(ctx, left, vars)?;
            let right = lower_int(ctx, right, vars)?;
            Ok(match op {
                CompareOp::Lt => left.lt(&right),
                CompareOp::Gt => left.gt(&right),
                CompareOp::Eq => left._eq(&right),
                CompareOp::Neq => left._eq(&right).not(),
            })
        }

        Term::And(terms) => {
            let lowered = terms
                .iter()
                .map(|t| lower_bool(ctx, t, vars))
                .collect::<Result<Vec<_>>>()?;
            let refs: Vec<&Bool> = lowered.iter().collect();
            Ok(Bool::and(ctx, &refs))
        }

        Term::Or(terms) => {
            let lowered = terms
                .iter()
                .map(|t| lower_bool(ctx, t, vars))
                .collect::<Result<Vec<_>>>()?;
            let refs: Vec<&Bool> = lowered.iter().collect();
            Ok(Bool::or(ctx, &refs))
        }

        Term::IntLiteral(_) | Term::Variable(_) | Term::BinaryArith { .. } => Err(Error::solver(
            format!("assertion is not a boolean term: {}", term),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn satisfiable_query_yields_model_for_declared_vars() {
        let mut solver = Z3Adapter::new();
        solver.declare("x");
        solver.assert_term(Term::compare(CompareOp::Gt, Term::var("x"), Term::int(5)));

        assert_eq!(solver.check_sat().unwrap(), SatOutcome::Sat);
        let model = solver.get_model().unwrap();
        assert!(model["x"] > 5);
    }

    #[test]
    fn contradictory_query_is_unsat() {
        let mut solver = Z3Adapter::new();
        solver.declare("x");
        solver.assert_term(Term::compare(CompareOp::Gt, Term::var("x"), Term::int(0)));
        solver.assert_term(Term::compare(CompareOp::Lt, Term::var("x"), Term::int(0)));

        assert_eq!(solver.check_sat().unwrap(), SatOutcome::Unsat);
        assert!(solver.get_model().is_err());
    }

    #[test]
    fn undeclared_variables_are_solved_but_not_reported() {
        let mut solver = Z3Adapter::new();
        solver.declare("x");
        solver.assert_term(Term::compare(CompareOp::Eq, Term::var("x"), Term::var("q")));

        assert_eq!(solver.check_sat().unwrap(), SatOutcome::Sat);
        let model = solver.get_model().unwrap();
        assert!(model.contains_key("x"));
        assert!(!model.contains_key("q"));
    }

    #[test]
    fn model_completion_covers_unconstrained_declarations() {
        let mut solver = Z3Adapter::new();
        solver.declare("free");
        assert_eq!(solver.check_sat().unwrap(), SatOutcome::Sat);
        assert!(solver.get_model().unwrap().contains_key("free"));
    }

    #[test]
    fn asserting_integer_term_is_a_solver_error() {
        let mut solver = Z3Adapter::new();
        solver.assert_term(Term::var("x"));
        assert!(matches!(solver.check_sat(), Err(Error::SolverError(_))));
    }

    #[test]
    fn zero_one_domain_via_disjunction() {
        let mut solver = Z3Adapter::new();
        solver.declare("c");
        solver.assert_term(Term::disjunction(vec![
            Term::compare(CompareOp::Eq, Term::var("c"), Term::int(0)),
            Term::compare(CompareOp::Eq, Term::var("c"), Term::int(1)),
        ]));
        solver.assert_term(Term::compare(CompareOp::Neq, Term::var("c"), Term::int(0)));

        assert_eq!(solver.check_sat().unwrap(), SatOutcome::Sat);
        assert_eq!(solver.get_model().unwrap()["c"], 1);
    }

    #[test]
    fn self_inequality_is_unsat() {
        let mut solver = Z3Adapter::new();
        solver.declare("v");
        solver.assert_term(Term::compare(CompareOp::Neq, Term::var("v"), Term::var("v")));
        assert_eq!(solver.check_sat().unwrap(), SatOutcome::Unsat);
    }
}
