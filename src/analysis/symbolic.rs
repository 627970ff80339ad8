use tracing::debug;

use super::result::{AnalysisResult, Counterexample, Proof};
use crate::error::Result;
use crate::lexer::Scanner;
use crate::parser::FuncParser;
use crate::solver::{SatOutcome, SolverAdapter};
use crate::translate::ProgramModel;

/// Bounded symbolic-execution check of one restricted function
///
/// The source is scanned, parsed into a single function definition and
/// compiled into a path condition. The function's parameters are the free
/// variables of interest; the path condition is asserted as a whole.
/// A satisfying assignment means every accumulated branch condition can hold
/// at once, which this mode reports as Disproved with the assignment
/// (restricted to the declared parameters) as the counterexample. Unsat means
/// the branch conditions are jointly unreachable, reported as Proved.
pub fn symbolic_execution(code: &str, solver: &mut dyn SolverAdapter) -> Result<AnalysisResult> {
    let tokens = Scanner::new(code).scan_tokens()?;
    let function = FuncParser::new(tokens).parse()?;
    let model = ProgramModel::build(&function)?;

    for param in &model.params {
        solver.declare(param);
    }
    solver.assert_term(model.path_condition.clone());

    debug!(function = %function.name, path_condition = %model.path_condition, "running symbolic check");

    match solver.check_sat()? {
        SatOutcome::Sat => Ok(AnalysisResult::Disproved {
            message: None,
            counterexample: Some(Counterexample::Assignment(solver.get_model()?)),
        }),

        SatOutcome::Unsat => Ok(AnalysisResult::Proved {
            message: "No logical errors found!".to_string(),
            proof: Proof::Symbolic {
                explanation: "All condition paths verified successfully.".to_string(),
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::logic::{ArithOp, CompareOp, Term};
    use crate::solver::testing::ScriptedSolver;

    const REFERENCE: &str =
        "def run(x, y):\n    z = x + y\n    if z < 0:\n        return False\n    return True\n";

    #[test]
    fn declares_parameters_and_asserts_the_path_condition() {
        let mut solver = ScriptedSolver::sat(vec![("x", -1), ("y", -1)]);
        symbolic_execution(REFERENCE, &mut solver).unwrap();

        assert_eq!(solver.declared, vec!["x", "y"]);
        assert_eq!(
            solver.asserted,
            vec![Term::compare(
                CompareOp::Lt,
                Term::arith(ArithOp::Add, Term::var("x"), Term::var("y")),
                Term::int(0),
            )]
        );
    }

    #[test]
    fn sat_outcome_is_disproved_with_the_assignment() {
        let mut solver = ScriptedSolver::sat(vec![("x", -1), ("y", -1)]);
        let result = symbolic_execution(REFERENCE, &mut solver).unwrap();
        match result {
            AnalysisResult::Disproved {
                message,
                counterexample: Some(Counterexample::Assignment(bindings)),
            } => {
                assert!(message.is_none());
                assert_eq!(bindings["x"], -1);
                assert_eq!(bindings["y"], -1);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn unsat_outcome_is_proved_with_generic_explanation() {
        let mut solver = ScriptedSolver::unsat();
        let source = "def run(x):\n    if x < 0:\n        if x > 0:\n            return True\n    return False\n";
        match symbolic_execution(source, &mut solver).unwrap() {
            AnalysisResult::Proved { message, proof } => {
                assert_eq!(message, "No logical errors found!");
                assert_eq!(
                    proof,
                    Proof::Symbolic {
                        explanation: "All condition paths verified successfully.".to_string(),
                    }
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn function_call_surfaces_as_unsupported_construct() {
        let mut solver = ScriptedSolver::sat(vec![]);
        let err = symbolic_execution("def run(x): z = helper(x); return z", &mut solver)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedConstruct { .. }));
        assert!(solver.asserted.is_empty());
    }

    #[test]
    fn source_without_a_function_is_malformed() {
        let mut solver = ScriptedSolver::sat(vec![]);
        let err = symbolic_execution("x = 1", &mut solver).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }
}
