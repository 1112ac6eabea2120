//! Error taxonomy shared by the graph model, the loader and the solver.

use crate::graph::Vertex;
use thiserror::Error;

/// Contract violations raised by [`MasProblem`](crate::graph::MasProblem) operations.
///
/// These indicate a caller bug (wrong identifier, malformed permutation), not bad
/// external input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The identifier is not a vertex of the current graph.
    #[error("vertex {0} is not present in the graph")]
    InvalidVertex(Vertex),
    /// The ordering is not a permutation of the graph's vertices.
    #[error("ordering is not a permutation of the graph's vertices: {reason}")]
    InvalidOrdering {
        /// What was wrong with it.
        reason: String,
    },
    /// The matrix or label sequence breaks a structural invariant.
    #[error("invalid adjacency matrix: {0}")]
    InvalidMatrix(String),
}

/// A text instance (or solution file) that does not follow the file grammar.
///
/// The `Display` output of the malformed-instance variants is the exact diagnostic
/// reported to users.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InstanceError {
    /// Header is not a single non-negative integer.
    #[error("Line 1 must contain a single integer.")]
    Header,
    /// Header integer outside `1..=100`.
    #[error("N must be an integer between 1 and 100, inclusive.")]
    OrderOutOfRange,
    /// A matrix row (1-based file line number) is missing, short, long or non-numeric.
    #[error("Line {line} must contain N integers.")]
    RowShape {
        /// File line number, 1-based (the header is line 1).
        line: usize,
    },
    /// An entry other than 0 or 1.
    #[error("The adjacency matrix must be comprised of 0s and 1s.")]
    NonBinary,
    /// A one on the diagonal.
    #[error("A node cannot have an edge to itself.")]
    SelfLoop,
    /// Solution file is not a permutation of `1..=N`.
    #[error("invalid solution: {0}")]
    Solution(String),
    /// File could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Failures surfaced by the solver entry point.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The graph is larger than the configured exhaustive-search bound.
    #[error("graph has {n} vertices; exhaustive search is limited to {max}")]
    TooLarge {
        /// Vertices in the input graph.
        n: usize,
        /// Configured bound.
        max: usize,
    },
    /// A graph operation failed inside the search.
    #[error(transparent)]
    Graph(#[from] GraphError),
}
