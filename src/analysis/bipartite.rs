use std::collections::BTreeMap;

use tracing::debug;

use super::request::Graph;
use super::result::{AnalysisResult, Proof};
use crate::error::{Error, Result};
use crate::logic::{CompareOp, Term};
use crate::solver::{SatOutcome, SolverAdapter};

/// Decides 2-colorability of a graph by reduction to constraint satisfaction
///
/// Each node gets a fresh integer variable constrained to `{0, 1}`; each edge
/// asserts its endpoint variables are unequal. A satisfying assignment is a
/// valid 2-coloring, so here Sat maps to Proved with the coloring attached
/// and Unsat to Disproved. The empty graph is trivially bipartite; a
/// self-loop asserts `v != v` and is unconditionally Disproved.
pub fn check_bipartiteness(graph: &Graph, solver: &mut dyn SolverAdapter) -> Result<AnalysisResult> {
    graph.validate()?;

    for node in &graph.nodes {
        let color = color_var(node);
        solver.declare(&color);
        solver.assert_term(Term::disjunction(vec![
            Term::compare(CompareOp::Eq, Term::var(color.clone()), Term::int(0)),
            Term::compare(CompareOp::Eq, Term::var(color), Term::int(1)),
        ]));
    }

    for edge in &graph.edges {
        solver.assert_term(Term::compare(
            CompareOp::Neq,
            Term::var(color_var(&edge.source)),
            Term::var(color_var(&edge.target)),
        ));
    }

    debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "checking bipartiteness"
    );

    match solver.check_sat()? {
        SatOutcome::Sat => {
            let model = solver.get_model()?;
            let mut coloring = BTreeMap::new();
            for node in &graph.nodes {
                let color = model.get(&color_var(node)).copied().ok_or_else(|| {
                    Error::solver(format!("model is missing a color for node '{}'", node))
                })?;
                coloring.insert(node.clone(), color);
            }
            Ok(AnalysisResult::Proved {
                message: "Graph is bipartite".to_string(),
                proof: Proof::Bipartite {
                    nodes: graph.nodes.clone(),
                    edges: graph.edges.clone(),
                    coloring,
                },
            })
        }

        SatOutcome::Unsat => Ok(AnalysisResult::Disproved {
            message: Some("Graph is NOT bipartite".to_string()),
            counterexample: None,
        }),
    }
}

fn color_var(node: &str) -> String {
    format!("color_{}", node)
}
