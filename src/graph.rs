//!
//! A dense, fixed-capacity graph store backed by an adjacency matrix. The capacity (the
//! *bound*) is chosen by the caller; every vertex id must be smaller than it. Vertices do not
//! have to be added explicitly: the *active range* of the graph is `0..=h` where `h` is the
//! highest vertex referenced so far, and every id in that range counts as a vertex, isolated
//! or not.
//!
//! ```rust
//! use adjcheck::graph::*;
//!
//! fn main() {
//!     let mut graph = MatrixGraph::new(8);
//!     graph.add_edges(vec![(0,1),(1,2),(2,3)].into_iter()).unwrap();
//!
//!     assert_eq!(graph.vertex_range(), 0..=3);
//!     assert!(graph.has_edge(2, 1).unwrap());
//!     assert!(graph.add_edge(8, 0).is_err());
//! }
//! ```
//!
//! Since the matrix is stored in full this structure is only meant for small graphs
//! (tens of vertices). Edges cannot be removed.

use std::cmp::max;
use std::ops::RangeInclusive;

use fxhash::FxHashSet;
use log::{trace, warn};

use crate::error::{GraphError, GraphResult};

pub type Vertex = u32;
pub type Edge = (Vertex, Vertex);
pub type VertexSet = FxHashSet<Vertex>;

/// Capacity used by [MatrixGraph::default].
pub const DEFAULT_BOUND: usize = 30;

/// Largest capacity a [MatrixGraph] accepts; the matrix holds `bound²` entries.
pub const MAX_BOUND: usize = 4096;

/// Undirected graph over the vertex ids `0..bound`, stored as a symmetric boolean matrix.
#[derive(Debug, Clone)]
pub struct MatrixGraph {
    bound: usize,
    adj: Vec<bool>,
    edges: Vec<Edge>,
    highest: Vertex,
}

impl Default for MatrixGraph {
    fn default() -> Self {
        MatrixGraph::new(DEFAULT_BOUND)
    }
}

impl PartialEq for MatrixGraph {
    fn eq(&self, other: &Self) -> bool {
        if self.highest != other.highest {
            return false
        }
        self.vertex_range().all(|u| self.row(u).eq(other.row(u)))
    }
}
impl Eq for MatrixGraph {}

impl MatrixGraph {
    /// Creates an empty graph that can hold the vertices `0..bound`.
    ///
    /// # Panics
    /// If `bound` exceeds [MAX_BOUND]. Use [MatrixGraph::try_new] for capacities that come
    /// from user input.
    pub fn new(bound: usize) -> MatrixGraph {
        assert!(bound <= MAX_BOUND, "capacity {} exceeds the maximum of {}", bound, MAX_BOUND);
        MatrixGraph {
            bound,
            adj: vec![false; bound * bound],
            edges: Vec::new(),
            highest: 0,
        }
    }

    /// Creates an empty graph that can hold the vertices `0..bound`, failing with
    /// [GraphError::CapacityTooLarge] if `bound` exceeds [MAX_BOUND].
    pub fn try_new(bound: usize) -> GraphResult<MatrixGraph> {
        if bound > MAX_BOUND {
            return Err(GraphError::CapacityTooLarge { bound, max: MAX_BOUND })
        }
        Ok(MatrixGraph::new(bound))
    }

    /*
        Construction
    */

    /// Inserts the undirected edge `uv`. Fails with [GraphError::OutOfRange] if either
    /// endpoint does not fit into the graph, in which case nothing is modified.
    ///
    /// Inserting an existing edge again leaves the matrix as it is, but the edge
    /// is recorded a second time in [MatrixGraph::edges].
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) -> GraphResult<()> {
        self.check(u)?;
        self.check(v)?;

        self.set_edge(u, v);
        self.edges.push((u, v));
        Ok(())
    }

    /// Inserts a sequence of edges, stopping at the first one that does not fit.
    pub fn add_edges<I>(&mut self, edges: I) -> GraphResult<()> where I: IntoIterator<Item=Edge> {
        for (u, v) in edges {
            self.add_edge(u, v)?;
        }
        Ok(())
    }

    /// Builds a graph from a square 0/1 matrix whose capacity is exactly its dimension.
    /// See [MatrixGraph::from_matrix_with_bound].
    pub fn from_matrix<R: AsRef<[u8]>>(rows: &[R]) -> GraphResult<MatrixGraph> {
        MatrixGraph::from_matrix_with_bound(rows, rows.len())
    }

    /// Builds a graph from a square 0/1 matrix. Every `1` at position `[i][j]` is inserted
    /// as the edge `ij`; the active range is derived from the dimension of the matrix
    /// rather than from the edges, so trailing isolated vertices are kept.
    ///
    /// Asymmetric matrices are accepted: an entry in either `[i][j]` or `[j][i]` produces
    /// the same undirected edge.
    pub fn from_matrix_with_bound<R: AsRef<[u8]>>(rows: &[R], bound: usize) -> GraphResult<MatrixGraph> {
        let n = rows.len();
        if n > bound {
            return Err(GraphError::OutOfRange { vertex: (n - 1) as Vertex, bound })
        }

        let mut res = MatrixGraph::try_new(bound)?;
        let mut symmetric = true;
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(GraphError::InconsistentMatrix(
                    format!("row {} has {} entries but the matrix has {} rows", i, row.len(), n)))
            }
            for (j, &entry) in row.iter().enumerate() {
                match entry {
                    0 => {}
                    1 => res.add_edge(i as Vertex, j as Vertex)?,
                    x => return Err(GraphError::MalformedInput {
                        line: i + 1,
                        reason: format!("matrix entry {} at column {} is neither 0 nor 1", x, j),
                    })
                }
                symmetric &= entry == rows[j].as_ref().get(i).copied().unwrap_or(entry);
            }
        }

        if !symmetric {
            warn!("Adjacency matrix is not symmetric, treating every entry as an undirected edge");
        }
        if n > 0 {
            res.highest = max(res.highest, (n - 1) as Vertex);
        }

        Ok(res)
    }

    fn check(&self, u: Vertex) -> GraphResult<()> {
        if (u as usize) < self.bound {
            Ok(())
        } else {
            Err(GraphError::OutOfRange { vertex: u, bound: self.bound })
        }
    }

    fn index(&self, u: Vertex, v: Vertex) -> usize {
        (u as usize) * self.bound + (v as usize)
    }

    // Callers must have checked both endpoints against the bound.
    fn set_edge(&mut self, u: Vertex, v: Vertex) {
        let (uv, vu) = (self.index(u, v), self.index(v, u));
        self.adj[uv] = true;
        self.adj[vu] = true;
        self.highest = max(self.highest, max(u, v));
        trace!("Inserted edge {}-{}", u, v);
    }

    /*
        Basic properties and queries
    */

    /// The capacity of this graph: valid vertex ids are `0..bound`.
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// The highest vertex referenced by an edge (or by the matrix dimension).
    pub fn highest_vertex(&self) -> Vertex {
        self.highest
    }

    /// The active vertices `0..=highest_vertex()`.
    pub fn vertex_range(&self) -> RangeInclusive<Vertex> {
        0..=self.highest
    }

    /// Number of vertices in the active range.
    pub fn num_vertices(&self) -> usize {
        self.highest as usize + 1
    }

    /// Number of distinct undirected edges, self-loops included.
    pub fn num_edges(&self) -> usize {
        self.vertex_range()
            .map(|u| (u..=self.highest).filter(|&v| self.adjacent(u, v)).count())
            .sum()
    }

    /// The edges in the order they were inserted, duplicates included.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Looks up the edge `uv`, failing if either vertex lies outside the capacity.
    pub fn has_edge(&self, u: Vertex, v: Vertex) -> GraphResult<bool> {
        self.check(u)?;
        self.check(v)?;
        Ok(self.adj[self.index(u, v)])
    }

    /// Like [MatrixGraph::has_edge], but vertices outside the capacity are simply not adjacent.
    pub fn adjacent(&self, u: Vertex, v: Vertex) -> bool {
        (u as usize) < self.bound && (v as usize) < self.bound && self.adj[self.index(u, v)]
    }

    pub fn self_loop(&self, u: Vertex) -> bool {
        self.adjacent(u, u)
    }

    /// Iterates over the neighbours of `u` in the active range in ascending order.
    pub fn neighbours<'a>(&'a self, u: Vertex) -> impl Iterator<Item=Vertex> + 'a {
        self.vertex_range().filter(move |&v| self.adjacent(u, v))
    }

    pub fn degree(&self, u: Vertex) -> usize {
        self.neighbours(u).count()
    }

    /// The matrix row of `u` restricted to the active range.
    pub fn row<'a>(&'a self, u: Vertex) -> impl Iterator<Item=bool> + 'a {
        self.vertex_range().map(move |v| self.adjacent(u, v))
    }

    /*
        Named graphs
    */

    // The generators below panic if `n` exceeds MAX_BOUND, like MatrixGraph::new.

    /// Generates a path on `n` vertices.
    pub fn path(n: u32) -> MatrixGraph {
        let mut res = MatrixGraph::sized(n);
        for u in 1..n {
            res.insert(u - 1, u);
        }
        res
    }

    /// Generates a cycle on `n` vertices.
    pub fn cycle(n: u32) -> MatrixGraph {
        let mut res = MatrixGraph::sized(n);
        for u in 0..n {
            res.insert(u, (u + 1) % n);
        }
        res
    }

    /// Generates a complete graph (clique) on `n` vertices.
    pub fn clique(n: u32) -> MatrixGraph {
        let mut res = MatrixGraph::sized(n);
        for u in 0..n {
            for v in (u + 1)..n {
                res.insert(u, v);
            }
        }
        res
    }

    /// Generates a star with `n` leaves around the center `0`, so `n+1` vertices total.
    pub fn star(n: u32) -> MatrixGraph {
        MatrixGraph::biclique(1, n)
    }

    /// Generates a complete bipartite graph (biclique) on `s`+`t` vertices.
    pub fn biclique(s: u32, t: u32) -> MatrixGraph {
        let mut res = MatrixGraph::sized(s + t);
        for u in 0..s {
            for v in s..(s + t) {
                res.insert(u, v);
            }
        }
        res
    }

    fn sized(n: u32) -> MatrixGraph {
        let mut res = MatrixGraph::new(max(n, 1) as usize);
        res.highest = n.saturating_sub(1);
        res
    }

    // Only for generators, which size the graph to fit.
    fn insert(&mut self, u: Vertex, v: Vertex) {
        self.set_edge(u, v);
        self.edges.push((u, v));
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn symmetry() {
        let mut G = MatrixGraph::new(5);
        G.add_edge(1, 3).unwrap();

        assert!(G.has_edge(1, 3).unwrap());
        assert!(G.has_edge(3, 1).unwrap());
        assert!(!G.has_edge(1, 2).unwrap());
        assert_eq!(G.vertex_range(), 0..=3);
        assert_eq!(G.num_vertices(), 4);
    }

    #[test]
    fn idempotent_insertion() {
        let mut G = MatrixGraph::new(5);
        G.add_edge(0, 1).unwrap();
        let H = G.clone();
        G.add_edge(0, 1).unwrap();
        G.add_edge(1, 0).unwrap();

        assert_eq!(G, H);
        assert_eq!(G.num_edges(), 1);
        assert_eq!(G.edges(), &[(0, 1), (0, 1), (1, 0)]);
    }

    #[test]
    fn out_of_range() {
        let mut G = MatrixGraph::new(4);
        match G.add_edge(0, 4) {
            Err(GraphError::OutOfRange { vertex, bound }) => {
                assert_eq!(vertex, 4);
                assert_eq!(bound, 4);
            }
            other => panic!("unexpected result {:?}", other),
        }
        // A failed insertion leaves the graph untouched.
        assert!(G.edges().is_empty());
        assert_eq!(G.highest_vertex(), 0);

        assert!(G.add_edge(3, 3).is_ok());
        assert!(G.has_edge(4, 0).is_err());
        assert!(!G.adjacent(4, 0));
    }

    #[test]
    fn default_bound() {
        let mut G = MatrixGraph::default();
        assert_eq!(G.bound(), DEFAULT_BOUND);
        assert!(G.add_edge(0, (DEFAULT_BOUND - 1) as Vertex).is_ok());
        assert!(G.add_edge(0, DEFAULT_BOUND as Vertex).is_err());
    }

    #[test]
    fn capacity_limit() {
        assert!(MatrixGraph::try_new(MAX_BOUND).is_ok());
        match MatrixGraph::try_new(1usize << 32) {
            Err(GraphError::CapacityTooLarge { bound, max }) => {
                assert_eq!(bound, 1usize << 32);
                assert_eq!(max, MAX_BOUND);
            }
            other => panic!("unexpected result {:?}", other),
        }

        let res = MatrixGraph::from_matrix_with_bound(&[[0u8]], usize::MAX);
        assert!(matches!(res, Err(GraphError::CapacityTooLarge { .. })));
    }

    #[test]
    #[should_panic]
    fn oversized_new() {
        MatrixGraph::new(MAX_BOUND + 1);
    }

    #[test]
    fn self_loops() {
        let mut G = MatrixGraph::new(3);
        G.add_edge(2, 2).unwrap();
        assert!(G.self_loop(2));
        assert!(!G.self_loop(0));
        assert_eq!(G.neighbours(2).collect::<Vec<_>>(), vec![2]);
        assert_eq!(G.num_edges(), 1);
    }

    #[test]
    fn neighbourhoods() {
        let G = MatrixGraph::path(5);
        assert_eq!(G.neighbours(0).collect::<Vec<_>>(), vec![1]);
        assert_eq!(G.neighbours(2).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(G.degree(4), 1);
    }

    #[test]
    fn from_matrix() {
        let G = MatrixGraph::from_matrix(&[
            vec![0u8, 1, 0, 0],
            vec![1, 0, 1, 0],
            vec![0, 1, 0, 0],
            vec![0, 0, 0, 0],
        ]).unwrap();

        // The isolated vertex 3 is part of the graph.
        assert_eq!(G.vertex_range(), 0..=3);
        assert_eq!(G.num_edges(), 2);
        assert!(G.has_edge(2, 1).unwrap());

        let mut H = MatrixGraph::new(4);
        H.add_edges(vec![(0, 1), (1, 2)]).unwrap();
        assert_ne!(G, H);
        H.highest = 3;
        assert_eq!(G, H);
    }

    #[test]
    fn from_matrix_asymmetric() {
        let G = MatrixGraph::from_matrix(&[[0u8, 1], [0, 0]]).unwrap();
        assert!(G.has_edge(1, 0).unwrap());
    }

    #[test]
    fn from_matrix_errors() {
        let res = MatrixGraph::from_matrix(&[vec![0u8, 1], vec![1]]);
        assert!(matches!(res, Err(GraphError::InconsistentMatrix(_))));

        let res = MatrixGraph::from_matrix(&[vec![0u8, 2], vec![1, 0]]);
        assert!(matches!(res, Err(GraphError::MalformedInput { line: 1, .. })));

        let res = MatrixGraph::from_matrix_with_bound(&[[0u8; 3]; 3], 2);
        assert!(matches!(res, Err(GraphError::OutOfRange { vertex: 2, bound: 2 })));

        let G = MatrixGraph::from_matrix::<Vec<u8>>(&[]).unwrap();
        assert_eq!(G.num_edges(), 0);
        assert_eq!(G.vertex_range(), 0..=0);
    }

    #[test]
    fn named_graphs() {
        assert_eq!(MatrixGraph::path(5).num_edges(), 4);
        assert_eq!(MatrixGraph::cycle(5).num_edges(), 5);
        assert_eq!(MatrixGraph::clique(5).num_edges(), 10);
        assert_eq!(MatrixGraph::star(3).num_edges(), 3);
        assert_eq!(MatrixGraph::biclique(2, 3).num_edges(), 6);

        assert_eq!(MatrixGraph::clique(1).num_vertices(), 1);
        assert_eq!(MatrixGraph::path(0).num_vertices(), 1);
        assert_eq!(MatrixGraph::star(3).vertex_range(), 0..=3);
    }
}
