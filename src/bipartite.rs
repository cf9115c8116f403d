//!
//! Two-colouring of [MatrixGraph]s. A graph is bipartite iff every connected component can be
//! coloured with two colours such that no edge is monochromatic, which fails precisely on
//! odd cycles. Self-loops are odd cycles of length one and are reported separately.
//!
//! ```rust
//! use adjcheck::graph::*;
//! use adjcheck::bipartite::*;
//!
//! let graph = MatrixGraph::cycle(4);
//! let coloring = graph.two_coloring(0);
//! assert!(coloring.is_bipartite());
//! assert_ne!(coloring.side(0), coloring.side(1));
//!
//! assert!(!MatrixGraph::cycle(5).is_bipartite(0));
//! ```

use std::fmt;

use log::{debug, trace};

use crate::graph::*;

/// One of the two colour classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    Green,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Red => Side::Green,
            Side::Green => Side::Red,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Red => write!(f, "red"),
            Side::Green => write!(f, "green"),
        }
    }
}

/// The reason a two-colouring failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// The vertex has an edge to itself.
    SelfLoop(Vertex),
    /// Both endpoints of this edge ended up with the same colour.
    OddCycle(Vertex, Vertex),
}

/// Outcome of [TwoColoring::two_coloring]: the colours assigned so far and the conflict
/// that stopped the traversal, if any. On success every vertex in the active range is coloured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coloring {
    sides: Vec<Option<Side>>,
    conflict: Option<Conflict>,
}

impl Coloring {
    pub fn is_bipartite(&self) -> bool {
        self.conflict.is_none()
    }

    pub fn conflict(&self) -> Option<Conflict> {
        self.conflict
    }

    /// The colour of `v`, or `None` if `v` was never reached or lies outside the active range.
    pub fn side(&self, v: Vertex) -> Option<Side> {
        self.sides.get(v as usize).copied().flatten()
    }

    /// Colours indexed by vertex.
    pub fn sides(&self) -> &[Option<Side>] {
        &self.sides
    }

    /// The vertices of each colour class, `(red, green)`, in ascending order.
    pub fn classes(&self) -> (Vec<Vertex>, Vec<Vertex>) {
        let pick = |side| -> Vec<Vertex> { self.sides.iter().enumerate()
            .filter(|(_, s)| **s == Some(side))
            .map(|(v, _)| v as Vertex)
            .collect() };
        (pick(Side::Red), pick(Side::Green))
    }
}

pub trait TwoColoring {
    /// Colours the graph starting at `start`, then continues with every vertex that is
    /// still uncoloured so that all components are covered.
    fn two_coloring(&self, start: Vertex) -> Coloring;

    fn is_bipartite(&self, start: Vertex) -> bool {
        self.two_coloring(start).is_bipartite()
    }
}

impl TwoColoring for MatrixGraph {
    fn two_coloring(&self, start: Vertex) -> Coloring {
        let mut res = Coloring { sides: vec![None; self.num_vertices()], conflict: None };

        if let Some(u) = self.vertex_range().find(|&u| self.self_loop(u)) {
            debug!("Vertex {} has a self-loop, graph is not bipartite", u);
            res.conflict = Some(Conflict::SelfLoop(u));
            return res
        }

        let roots = std::iter::once(start)
            .filter(|&s| s <= self.highest_vertex())
            .chain(self.vertex_range());

        for root in roots {
            if res.sides[root as usize].is_some() {
                continue;
            }
            if let Some(conflict) = color_component(self, root, &mut res.sides) {
                debug!("Edge {:?} closes an odd cycle, graph is not bipartite", conflict);
                res.conflict = Some(conflict);
                return res
            }
        }

        debug!("Graph on {} vertices is bipartite", self.num_vertices());
        res
    }
}

fn color_component(graph: &MatrixGraph, root: Vertex, sides: &mut [Option<Side>]) -> Option<Conflict> {
    let mut stack = vec![(root, Side::Green)];
    sides[root as usize] = Some(Side::Green);

    while let Some((u, side)) = stack.pop() {
        trace!("Visiting {} ({})", u, side);

        for v in graph.neighbours(u) {
            match sides[v as usize] {
                None => {
                    sides[v as usize] = Some(side.opposite());
                    stack.push((v, side.opposite()));
                }
                Some(other) if other == side => return Some(Conflict::OddCycle(u, v)),
                Some(_) => {}
            }
        }
    }

    None
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
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn single_vertex() {
        let G = MatrixGraph::new(3);
        let coloring = G.two_coloring(0);
        assert!(coloring.is_bipartite());
        assert_eq!(coloring.sides(), &[Some(Side::Green)]);
    }

    #[test]
    fn even_cycle() {
        let mut G = MatrixGraph::new(4);
        G.add_edges(vec![(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        assert!(G.is_bipartite(0));

        let (red, green) = G.two_coloring(0).classes();
        assert_eq!(red, vec![1, 3]);
        assert_eq!(green, vec![0, 2]);
    }

    #[test]
    fn triangle() {
        let mut G = MatrixGraph::new(3);
        G.add_edges(vec![(0, 1), (1, 2), (2, 0)]).unwrap();
        assert!(!G.is_bipartite(0));
        assert!(matches!(G.two_coloring(0).conflict(), Some(Conflict::OddCycle(_, _))));
    }

    #[test]
    fn self_loop() {
        assert!(MatrixGraph::biclique(2, 2).is_bipartite(0));

        // The same biclique with a loop on vertex 3.
        let mut G = MatrixGraph::new(4);
        G.add_edges(vec![(0, 2), (0, 3), (1, 2), (1, 3), (3, 3)]).unwrap();
        for start in G.vertex_range() {
            assert!(!G.is_bipartite(start));
        }
        assert_eq!(G.two_coloring(1).conflict(), Some(Conflict::SelfLoop(3)));
    }

    #[test]
    fn odd_cycle_in_second_component() {
        // 0 -- 1   and the triangle 2, 3, 4
        let mut G = MatrixGraph::new(5);
        G.add_edges(vec![(0, 1), (2, 3), (3, 4), (4, 2)]).unwrap();
        assert!(!G.is_bipartite(0));
        assert!(!G.is_bipartite(1));
    }

    #[test]
    fn isolated_vertices_are_coloured() {
        let mut G = MatrixGraph::new(5);
        G.add_edge(3, 4).unwrap();
        let coloring = G.two_coloring(3);
        assert!(coloring.is_bipartite());
        assert!(coloring.sides().iter().all(|s| s.is_some()));
        assert_eq!(coloring.side(3), Some(Side::Green));
        assert_eq!(coloring.side(4), Some(Side::Red));
        assert_eq!(coloring.side(7), None);
    }

    #[test]
    fn start_outside_range() {
        let G = MatrixGraph::path(3);
        assert!(G.is_bipartite(10));
    }

    #[test]
    fn idempotent_insertion() {
        let mut G = MatrixGraph::cycle(5);
        let before = G.is_bipartite(0);
        G.add_edge(0, 1).unwrap();
        assert_eq!(G.is_bipartite(0), before);
    }

    #[test]
    fn named_graphs() {
        assert!(MatrixGraph::path(7).is_bipartite(3));
        assert!(MatrixGraph::star(4).is_bipartite(2));
        assert!(MatrixGraph::biclique(3, 4).is_bipartite(0));
        assert!(MatrixGraph::cycle(8).is_bipartite(0));
        assert!(!MatrixGraph::cycle(7).is_bipartite(0));
        assert!(!MatrixGraph::clique(3).is_bipartite(0));
    }

    #[test]
    fn random_colorings_are_proper() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            let n: u32 = rng.gen_range(2..14);
            let mut G = MatrixGraph::new(n as usize);
            for u in 0..n {
                for v in (u + 1)..n {
                    if rng.gen_bool(0.15) {
                        G.add_edge(u, v).unwrap();
                    }
                }
            }

            let coloring = G.two_coloring(rng.gen_range(0..n));
            if coloring.is_bipartite() {
                for &(u, v) in G.edges() {
                    assert_ne!(coloring.side(u), coloring.side(v));
                }
            } else {
                match coloring.conflict() {
                    Some(Conflict::OddCycle(u, v)) => {
                        assert!(G.adjacent(u, v));
                        assert_eq!(coloring.side(u), coloring.side(v));
                    }
                    other => panic!("unexpected conflict {:?}", other),
                }
            }
        }
    }
}
