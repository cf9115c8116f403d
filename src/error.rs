//! Error types for loading and querying graphs.

use thiserror::Error;

use crate::graph::Vertex;

/// All errors that can occur while building or loading a graph.
#[derive(Error, Debug)]
pub enum GraphError {
    /// An edge references a vertex id beyond the capacity of the store.
    #[error("Vertex {vertex} is out of range for a graph of capacity {bound}")]
    OutOfRange { vertex: Vertex, bound: usize },

    /// The requested capacity exceeds what a dense matrix store supports.
    #[error("Capacity {bound} exceeds the maximum of {max} vertices")]
    CapacityTooLarge { bound: usize, max: usize },

    /// A row could not be interpreted.
    #[error("Malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    /// A matrix is not square or disagrees with its announced row count.
    #[error("Inconsistent matrix: {0}")]
    InconsistentMatrix(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
