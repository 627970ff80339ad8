//! Error types for the verification core

use thiserror::Error;

/// Verification core errors
///
/// Every checker-internal failure is converted into one of these variants at
/// the mode boundary; the dispatcher renders them as an `{"error": ...}` body
/// and never lets a failure escape uninterpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The request's `algorithmType` tag names no known analysis mode
    ///
    /// The message text is part of the wire contract and must stay exactly
    /// as-is.
    #[error("Unsupported algorithm type")]
    UnsupportedAlgorithmType,

    /// Missing or ill-typed request fields, an edge referencing an unknown
    /// node, or a source with no recognized function entry point
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// An expression or statement kind outside the supported grammar
    ///
    /// Carries a serialized form of the offending node for diagnostics.
    #[error("Unsupported construct: {node}")]
    UnsupportedConstruct {
        /// Serialized form of the rejected syntax node
        node: String,
    },

    /// Syntax error in submitted source code
    #[error("Syntax error at line {line}, column {col}: {message}")]
    SyntaxError {
        /// Line number where the error occurred (1-indexed)
        line: usize,
        /// Column number where the error occurred (1-indexed)
        col: usize,
        /// Error description
        message: String,
    },

    /// The external decision procedure failed or produced an unusable answer
    #[error("Solver error: {0}")]
    SolverError(String),

    /// The satisfiability query exceeded its time budget
    #[error("Solver query exceeded the time budget of {budget_ms} ms")]
    SolverTimeout {
        /// Budget that was exceeded, in milliseconds
        budget_ms: u32,
    },

    /// Expression nesting exceeded the translation recursion limit
    #[error("Expression nesting exceeds the translation depth limit of {limit}")]
    TranslationTooDeep {
        /// Maximum permitted nesting depth
        limit: usize,
    },
}

impl Error {
    /// Create a malformed-input error with a message
    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedInput(msg.into())
    }

    /// Create an unsupported-construct error from a serializable node
    pub fn unsupported(node: impl ToString) -> Self {
        Error::UnsupportedConstruct {
            node: node.to_string(),
        }
    }

    /// Create a solver error with a message
    pub fn solver(msg: impl Into<String>) -> Self {
        Error::SolverError(msg.into())
    }
}

/// Result type for verification core operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_algorithm_type_message_is_exact() {
        // Wire contract: the dispatcher echoes this text verbatim.
        assert_eq!(
            Error::UnsupportedAlgorithmType.to_string(),
            "Unsupported algorithm type"
        );
    }

    #[test]
    fn unsupported_construct_keeps_node_text() {
        let err = Error::unsupported("helper(x, y)");
        assert!(err.to_string().contains("helper(x, y)"));
    }
}
