use tracing::debug;

use super::request::KnapsackFlags;
use super::result::{AnalysisResult, Counterexample, Proof};
use crate::error::{Error, Result};
use crate::logic::{CompareOp, Term};
use crate::solver::{SatOutcome, SolverAdapter};

/// Number of weight/value pairs in the fixed instance shape
const ITEM_COUNT: usize = 3;

/// Checks the declared constraints over the fixed knapsack instance
///
/// One capacity variable plus three weight and three value variables are
/// declared fresh per call; each enabled flag asserts its inequalities and
/// nothing relates the three groups to each other. The verdict mapping is
/// inverted relative to the other modes and is a preserved compatibility
/// contract: a satisfiable constraint set reports Disproved with the witness
/// as the counterexample, an unsatisfiable one reports Proved.
pub fn check_knapsack(
    flags: &KnapsackFlags,
    solver: &mut dyn SolverAdapter,
) -> Result<AnalysisResult> {
    solver.declare("capacity");
    let weights: Vec<String> = (0..ITEM_COUNT).map(|i| format!("w{}", i)).collect();
    let values: Vec<String> = (0..ITEM_COUNT).map(|i| format!("v{}", i)).collect();
    for name in weights.iter().chain(values.iter()) {
        solver.declare(name);
    }

    if flags.capacity_non_negative {
        // capacity >= 0, spelled within the strict comparison set.
        solver.assert_term(Term::disjunction(vec![
            Term::compare(CompareOp::Gt, Term::var("capacity"), Term::int(0)),
            Term::compare(CompareOp::Eq, Term::var("capacity"), Term::int(0)),
        ]));
    }
    if flags.weights_positive {
        for w in &weights {
            solver.assert_term(Term::compare(CompareOp::Gt, Term::var(w.clone()), Term::int(0)));
        }
    }
    if flags.values_positive {
        for v in &values {
            solver.assert_term(Term::compare(CompareOp::Gt, Term::var(v.clone()), Term::int(0)));
        }
    }

    debug!(?flags, "checking knapsack constraints");

    match solver.check_sat()? {
        SatOutcome::Sat => {
            let model = solver.get_model()?;
            let fetch = |name: &str| -> Result<i64> {
                model
                    .get(name)
                    .copied()
                    .ok_or_else(|| Error::solver(format!("model is missing '{}'", name)))
            };
            Ok(AnalysisResult::Disproved {
                message: None,
                counterexample: Some(Counterexample::Knapsack {
                    capacity: fetch("capacity")?,
                    weights: weights.iter().map(|w| fetch(w)).collect::<Result<_>>()?,
                    values: values.iter().map(|v| fetch(v)).collect::<Result<_>>()?,
                }),
            })
        }

        SatOutcome::Unsat => Ok(AnalysisResult::Proved {
            message: "Knapsack constraints hold for all inputs".to_string(),
            proof: Proof::Knapsack {
                constraints: *flags,
                explanation: explanation(flags),
            },
        }),
    }
}

fn explanation(flags: &KnapsackFlags) -> String {
    let mut enabled = Vec::new();
    if flags.capacity_non_negative {
        enabled.push("capacity >= 0");
    }
    if flags.weights_positive {
        enabled.push("weights > 0");
    }
    if flags.values_positive {
        enabled.push("values > 0");
    }
    if enabled.is_empty() {
        "No constraints were enabled. No violations found.".to_string()
    } else {
        format!("{}. No violations found.", enabled.join(" and "))
    }
}
