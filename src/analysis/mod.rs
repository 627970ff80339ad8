//! Request dispatch, the three verification modes and result rendering
//!
//! [`dispatch`] is the single entry point: it parses the request body, routes
//! it to a checker by its `algorithmType` tag with a fresh solver instance,
//! and renders the outcome. Every internal failure is caught here and
//! rendered as an `{"error": ...}` body, so the caller always receives a
//! well-formed response regardless of what went wrong.

mod bipartite;
mod knapsack;
mod request;
mod result;
mod symbolic;

use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::solver::Z3Adapter;

pub use bipartite::check_bipartiteness;
pub use knapsack::check_knapsack;
pub use request::{AnalysisRequest, Edge, Graph, KnapsackFlags};
pub use result::{AnalysisResult, Counterexample, Proof};
pub use symbolic::symbolic_execution;

/// Routes one analysis request to its mode and renders the response body
pub fn dispatch(body: &Value) -> Value {
    let result = match analyze(body) {
        Ok(result) => result,
        Err(error) => {
            debug!(%error, "request failed");
            AnalysisResult::Error(error)
        }
    };
    result.render()
}

/// Parses and runs one request against a fresh solver
pub fn analyze(body: &Value) -> Result<AnalysisResult> {
    let request = AnalysisRequest::from_json(body)?;
    let mut solver = Z3Adapter::new();
    match request {
        AnalysisRequest::Knapsack(flags) => check_knapsack(&flags, &mut solver),
        AnalysisRequest::Bipartite(graph) => check_bipartiteness(&graph, &mut solver),
        AnalysisRequest::SymbolicExec(code) => symbolic_execution(&code, &mut solver),
    }
}
