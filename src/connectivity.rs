use std::fmt;
use std::str::FromStr;

use log::debug;
use union_find_rs::prelude::{DisjointSets, UnionFind};

use crate::graph::*;

/// The two readings of "fully connected" a caller can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Every vertex can reach every other vertex along some path.
    #[default]
    Reachable,
    /// Every pair of distinct vertices is joined by an edge.
    Complete,
}

impl FromStr for Connectivity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reachable" => Ok(Connectivity::Reachable),
            "complete" => Ok(Connectivity::Complete),
            other => Err(format!("Unknown connectivity `{other}`, expected `reachable` or `complete`")),
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connectivity::Reachable => write!(f, "reachable"),
            Connectivity::Complete => write!(f, "complete"),
        }
    }
}

pub trait ConnectivityCheck {
    /// Whether the active range forms a single connected component.
    fn is_fully_connected(&self) -> bool {
        self.is_connected_as(Connectivity::Reachable)
    }

    fn is_connected_as(&self, mode: Connectivity) -> bool;

    /// Whether every pair of distinct vertices in the active range is adjacent.
    fn is_complete(&self) -> bool;

    /// The set of vertices reachable from `start`, as a membership table over the active range.
    fn reachable_from(&self, start: Vertex) -> Vec<bool>;

    /// The connected components of the active range, isolated vertices included.
    fn components(&self) -> Vec<VertexSet>;
}

impl ConnectivityCheck for MatrixGraph {
    fn is_connected_as(&self, mode: Connectivity) -> bool {
        let res = match mode {
            Connectivity::Reachable => self.reachable_from(0).into_iter().all(|seen| seen),
            Connectivity::Complete => self.is_complete(),
        };
        debug!("Graph on {} vertices is {}connected ({})",
            self.num_vertices(), if res { "" } else { "not " }, mode);
        res
    }

    fn is_complete(&self) -> bool {
        for u in self.vertex_range() {
            for v in (u + 1)..=self.highest_vertex() {
                if !self.adjacent(u, v) {
                    return false
                }
            }
        }
        true
    }

    fn reachable_from(&self, start: Vertex) -> Vec<bool> {
        let mut seen = vec![false; self.num_vertices()];
        if start > self.highest_vertex() {
            return seen
        }

        let mut stack = vec![start];
        seen[start as usize] = true;
        while let Some(u) = stack.pop() {
            for v in self.neighbours(u) {
                if !seen[v as usize] {
                    seen[v as usize] = true;
                    stack.push(v);
                }
            }
        }

        seen
    }

    #[allow(unused_must_use)]
    fn components(&self) -> Vec<VertexSet> {
        let mut dsets: DisjointSets<Vertex> = DisjointSets::with_capacity(self.num_vertices());

        for v in self.vertex_range() {
            // Every vertex is added exactly once, so this cannot fail.
            dsets.make_set(v);
        }

        for (u, v) in self.edges() {
            // `union` must not be called on two members of the same set.
            if dsets.find_set(u).ok() != dsets.find_set(v).ok() {
                dsets.union(u, v);
            }
        }

        dsets.into_iter()
            .map(|comp| comp.into_iter().collect())
            .collect()
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
