//! Error types for type graph construction and lookup

use crate::TypeName;
use thiserror::Error;

/// A malformed graph. These are data errors in whatever produced the
/// graph, never compatibility findings.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A stub whose name has no definition in its graph
    #[error("unresolved type reference: {name}")]
    UnresolvedStub { name: TypeName },

    /// Only named types may be registered in a graph
    #[error("cannot register an unnamed {kind} type")]
    Unnamed { kind: crate::Kind },

    #[error("duplicate type name: {name}")]
    DuplicateName { name: TypeName },

    #[error("invalid graph document: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::UnresolvedStub { .. } => "E-GRAPH-001",
            GraphError::Unnamed { .. } => "E-GRAPH-002",
            GraphError::DuplicateName { .. } => "E-GRAPH-003",
            GraphError::Decode(_) => "E-GRAPH-004",
            GraphError::Io(_) => "E-GRAPH-005",
        }
    }
}
