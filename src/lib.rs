//! # Algoverify - Program-Property Verification Core
//!
//! Verification backend for an algorithm-learning platform: given a small
//! program fragment or a set of declared constraints, it decides whether a
//! property holds for all inputs or produces a concrete counterexample.
//!
//! Three analysis modes share one pipeline of logical [`logic::Term`]s
//! compiled down to an external decision procedure (Z3 behind the
//! [`solver::SolverAdapter`] interface):
//!
//! - **Knapsack constraint check** - named inequality flags over a
//!   fixed-shape instance of three weights, three values and one capacity.
//! - **Bipartiteness check** - graph 2-colorability reduced to constraint
//!   satisfaction, returning the coloring as proof data.
//! - **Symbolic execution** - a bounded, flow-insensitive check of a
//!   restricted single-function program, reporting a satisfying assignment
//!   of its branch conditions as a counterexample.
//!
//! ## Quick Start
//!
//! Requests are routed by their `algorithmType` tag; the response body is
//! always well-formed, carrying either a verdict or an error:
//!
//! ```rust
//! use algoverify::analysis::dispatch;
//! use serde_json::json;
//!
//! let body = dispatch(&json!({
//!     "algorithmType": "isGraphBipartite",
//!     "constraints": {
//!         "nodes": ["A", "B"],
//!         "edges": [{"source": "A", "target": "B"}]
//!     }
//! }));
//!
//! assert_eq!(body["valid"], json!(true));
//! assert_eq!(body["message"], json!("Graph is bipartite"));
//! ```
//!
//! Every request is independent and stateless: terms, environments and the
//! solver instance are created fresh per request and discarded at its end.

pub mod analysis;
pub mod error;
pub mod lexer;
pub mod logic;
pub mod parser;
pub mod solver;
pub mod translate;

pub use analysis::{dispatch, AnalysisRequest, AnalysisResult};
pub use error::{Error, Result};
pub use logic::{Environment, Term};
pub use solver::{SatOutcome, SolverAdapter, Z3Adapter};
pub use translate::{translate_expr, ProgramModel};
