use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use super::request::{Edge, KnapsackFlags};
use crate::error::Error;

/// Mode-specific proof data attached to a Proved verdict
#[derive(Debug, Clone, PartialEq)]
pub enum Proof {
    Knapsack {
        constraints: KnapsackFlags,
        explanation: String,
    },
    Bipartite {
        nodes: Vec<String>,
        edges: Vec<Edge>,
        coloring: BTreeMap<String, i64>,
    },
    Symbolic {
        explanation: String,
    },
}

/// Witness assignment reported as evidence a property fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Counterexample {
    /// Fixed-shape knapsack witness
    Knapsack {
        capacity: i64,
        weights: Vec<i64>,
        values: Vec<i64>,
    },
    /// Free-variable assignment from symbolic execution
    Assignment(BTreeMap<String, i64>),
}

/// Normalized outcome of one analysis request
///
/// Exactly one variant is populated; a result never carries both a proof and
/// a counterexample.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    Proved {
        message: String,
        proof: Proof,
    },
    Disproved {
        message: Option<String>,
        counterexample: Option<Counterexample>,
    },
    Error(Error),
}

impl AnalysisResult {
    /// Renders the verdict into its response body
    ///
    /// Proved carries `valid: true` with a message and proof; Disproved
    /// carries `valid: false` plus whichever of message and counterexample
    /// the mode produced; errors collapse to a bare `{"error": ...}` object
    /// with no verdict fields.
    pub fn render(&self) -> Value {
        match self {
            AnalysisResult::Proved { message, proof } => json!({
                "valid": true,
                "message": message,
                "proof": proof.render(),
            }),

            AnalysisResult::Disproved {
                message,
                counterexample,
            } => {
                let mut body = Map::new();
                body.insert("valid".to_string(), Value::Bool(false));
                if let Some(message) = message {
                    body.insert("message".to_string(), json!(message));
                }
                if let Some(counterexample) = counterexample {
                    body.insert("counterexample".to_string(), counterexample.render());
                }
                Value::Object(body)
            }

            AnalysisResult::Error(error) => json!({"error": error.to_string()}),
        }
    }
}

impl Proof {
    fn render(&self) -> Value {
        match self {
            Proof::Knapsack {
                constraints,
                explanation,
            } => json!({
                "constraints": constraints,
                "explanation": explanation,
            }),

            Proof::Bipartite {
                nodes,
                edges,
                coloring,
            } => json!({
                "nodes": nodes,
                "edges": edges,
                "coloring": coloring,
            }),

            Proof::Symbolic { explanation } => json!({"explanation": explanation}),
        }
    }
}

impl Counterexample {
    fn render(&self) -> Value {
        match self {
            Counterexample::Knapsack {
                capacity,
                weights,
                values,
            } => json!({
                "capacity": capacity,
                "weights": weights,
                "values": values,
            }),

            Counterexample::Assignment(bindings) => json!(bindings),
        }
    }
}
