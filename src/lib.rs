//! Connectivity and bipartiteness checks for small, dense, undirected graphs.
//!
//! Graphs are stored as a fixed-capacity adjacency matrix ([graph::MatrixGraph]) which is
//! filled once, from a file, a stream or direct calls, and then queried:
//!
//! ```rust
//! use adjcheck::graph::*;
//! use adjcheck::connectivity::*;
//! use adjcheck::bipartite::*;
//!
//! let mut graph = MatrixGraph::new(10);
//! graph.add_edges(vec![(0,1),(0,2),(0,3)]).unwrap();
//!
//! assert!(graph.is_fully_connected());
//! assert!(!graph.is_connected_as(Connectivity::Complete));
//! assert!(graph.is_bipartite(0));
//! ```
#![allow(non_snake_case)]

pub mod bipartite;
pub mod connectivity;
pub mod error;
pub mod graph;
pub mod io;

pub use bipartite::{Coloring, Conflict, Side, TwoColoring};
pub use connectivity::{Connectivity, ConnectivityCheck};
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, MatrixGraph, Vertex, VertexSet, DEFAULT_BOUND, MAX_BOUND};
pub use io::{Delimiter, Layout, LoadFromFile, ReadOptions, WriteToFile};
