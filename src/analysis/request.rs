use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Named constraint flags for the knapsack mode
///
/// Absent flags default to `false`, so an empty constraints object asserts
/// nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KnapsackFlags {
    pub capacity_non_negative: bool,
    pub weights_positive: bool,
    pub values_positive: bool,
}

impl KnapsackFlags {
    /// True when no flag is enabled
    pub fn is_empty(&self) -> bool {
        !self.capacity_non_negative && !self.weights_positive && !self.values_positive
    }
}

/// Directed edge between two named nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

/// Node and edge sets for the bipartiteness mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Graph {
    pub nodes: Vec<String>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Checks that every edge endpoint names a member of the node set
    pub fn validate(&self) -> Result<()> {
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !self.nodes.iter().any(|n| n == endpoint) {
                    return Err(Error::malformed(format!(
                        "edge endpoint '{}' is not in the node set",
                        endpoint
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Parsed analysis request, one variant per mode
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    Knapsack(KnapsackFlags),
    Bipartite(Graph),
    SymbolicExec(String),
}

impl AnalysisRequest {
    /// Parses a raw request body into a mode-tagged request
    ///
    /// Routing is by the `algorithmType` string. Mode-specific payloads come
    /// from `constraints` (knapsack, bipartite) or `code` (symbolic
    /// execution); a missing `constraints` object is treated as empty.
    pub fn from_json(body: &Value) -> Result<AnalysisRequest> {
        let tag = body
            .get("algorithmType")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::malformed("missing 'algorithmType' field"))?;

        match tag {
            "knapsackOptimal" => {
                let flags = match body.get("constraints") {
                    Some(raw) => KnapsackFlags::deserialize(raw)
                        .map_err(|e| Error::malformed(format!("bad knapsack constraints: {}", e)))?,
                    None => KnapsackFlags::default(),
                };
                Ok(AnalysisRequest::Knapsack(flags))
            }

            "isGraphBipartite" => {
                let graph = match body.get("constraints") {
                    Some(raw) => Graph::deserialize(raw)
                        .map_err(|e| Error::malformed(format!("bad graph constraints: {}", e)))?,
                    None => Graph::default(),
                };
                Ok(AnalysisRequest::Bipartite(graph))
            }

            "symbolicExecution" => {
                let code = body
                    .get("code")
                    .and_then(Value::as_str)
                    .ok_or_else(|| Error::malformed("missing 'code' field"))?;
                Ok(AnalysisRequest::SymbolicExec(code.to_string()))
            }

            _ => Err(Error::UnsupportedAlgorithmType),
        }
    }
}
