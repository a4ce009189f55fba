use std::fmt;

use crate::dag::NodeId;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    NodeNotFound,
    NodeOutOfRange,
    NonSquareMatrix,
    CycleDetected,
    InvalidTree,
    InvalidArgument,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::NodeNotFound => "E2001",
            Self::NodeOutOfRange => "E2002",
            Self::CycleDetected => "E2003",
            Self::NonSquareMatrix => "E2004",
            Self::InvalidTree => "E2005",
            Self::InvalidArgument => "E2006",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::NodeNotFound => "Node not found",
            Self::NodeOutOfRange => "Node identifier out of range",
            Self::CycleDetected => "Graph contains a cycle",
            Self::NonSquareMatrix => "Adjacency matrix is not square",
            Self::InvalidTree => "Malformed binary tree",
            Self::InvalidArgument => "Invalid argument",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in lca.toml and retry."),
            Self::NodeNotFound => Some("Query identifiers that are present in the tree."),
            Self::NodeOutOfRange => Some("DAG identifiers are zero-based indices below the node count."),
            Self::CycleDetected => Some("Remove an edge on the cycle so the graph is acyclic."),
            Self::NonSquareMatrix => Some("Every matrix row must have one column per node."),
            Self::InvalidTree => Some("Give every child exactly one parent reachable from the root."),
            Self::InvalidArgument => None,
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised when a graph or tree violates the input preconditions.
///
/// Absent tree nodes and empty DAG results are not errors: the former is
/// reported as `None`, the latter as an empty set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LcaError {
    /// A DAG identifier does not index into the adjacency matrix.
    #[error("node {node} is out of range for a graph of {len} nodes")]
    NodeOutOfRange { node: NodeId, len: usize },

    /// An adjacency matrix row has the wrong number of columns.
    #[error("matrix row {row} has {len} columns, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// The adjacency matrix is not acyclic.
    #[error("graph contains a cycle through node {node}")]
    CycleDetected { node: NodeId },

    /// Tree links do not describe a single rooted binary tree.
    #[error("invalid tree: {0}")]
    InvalidTree(String),
}

impl LcaError {
    /// The machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NodeOutOfRange { .. } => ErrorCode::NodeOutOfRange,
            Self::NonSquareMatrix { .. } => ErrorCode::NonSquareMatrix,
            Self::CycleDetected { .. } => ErrorCode::CycleDetected,
            Self::InvalidTree(_) => ErrorCode::InvalidTree,
        }
    }
}
