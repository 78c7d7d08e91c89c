// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Dense CSR backend for [`GraphView`].
//!
//! This is the in-memory reference backend: offsets plus a flat neighbor
//! array, built once and immutable afterwards. External backends (compressed
//! or memory-mapped stores) implement [`GraphView`] directly and never go
//! through this type.

use crate::error::{PeelError, Result};
use crate::graph::GraphView;

/// Immutable undirected graph in CSR form.
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Vertex v's neighbors live at `neighbors[offsets[v]..offsets[v + 1]]`.
    offsets: Vec<usize>,
    neighbors: Vec<u32>,
    max_degree: usize,
}

impl CsrGraph {
    /// Build from an undirected edge list over `n` vertices.
    ///
    /// Each pair `(u, v)` is stored in both directions, so the resulting
    /// adjacency is symmetric by construction. Self-loops and duplicate edges
    /// are dropped (simple graph). Endpoints must lie in `[0, n)`.
    pub fn from_undirected_edges(n: usize, edges: &[(u32, u32)]) -> Result<Self> {
        let mut adjacency: Vec<Vec<u32>> = vec![Vec::new(); n];
        for &(u, v) in edges {
            for endpoint in [u, v] {
                if endpoint as usize >= n {
                    return Err(PeelError::VertexOutOfRange {
                        vertex: endpoint,
                        size: n,
                    });
                }
            }
            if u == v {
                continue;
            }
            adjacency[u as usize].push(v);
            adjacency[v as usize].push(u);
        }
        for list in &mut adjacency {
            list.sort_unstable();
            list.dedup();
        }
        Ok(Self::from_adjacency(adjacency))
    }

    /// Build directly from per-vertex adjacency lists.
    ///
    /// The lists are taken as-is: the caller is responsible for symmetry
    /// (every `u` in `adjacency[v]` must have `v` in `adjacency[u]`). Use
    /// [`from_undirected_edges`](Self::from_undirected_edges) when that
    /// guarantee is not already in hand.
    pub fn from_adjacency(adjacency: Vec<Vec<u32>>) -> Self {
        let n = adjacency.len();
        let mut offsets = vec![0usize; n + 1];
        let mut max_degree = 0;
        for (v, list) in adjacency.iter().enumerate() {
            offsets[v + 1] = offsets[v] + list.len();
            max_degree = max_degree.max(list.len());
        }

        let mut neighbors = Vec::with_capacity(offsets[n]);
        for list in &adjacency {
            neighbors.extend_from_slice(list);
        }

        Self {
            offsets,
            neighbors,
            max_degree,
        }
    }

    /// Number of stored directed arcs (twice the undirected edge count).
    pub fn arc_count(&self) -> usize {
        self.neighbors.len()
    }
}

impl GraphView for CsrGraph {
    #[inline]
    fn size(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    fn outdegree(&self, v: u32) -> usize {
        self.offsets[v as usize + 1] - self.offsets[v as usize]
    }

    #[inline]
    fn neighbors(&self, v: u32) -> &[u32] {
        &self.neighbors[self.offsets[v as usize]..self.offsets[v as usize + 1]]
    }

    #[inline]
    fn max_degree(&self) -> usize {
        self.max_degree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_undirected_edges_symmetrizes() {
        let g = CsrGraph::from_undirected_edges(3, &[(0, 1), (1, 2)]).unwrap();
        assert_eq!(g.size(), 3);
        assert_eq!(g.neighbors(0), &[1]);
        assert_eq!(g.neighbors(1), &[0, 2]);
        assert_eq!(g.neighbors(2), &[1]);
        assert_eq!(g.max_degree(), 2);
        assert_eq!(g.arc_count(), 4);
    }

    #[test]
    fn test_self_loops_and_duplicates_dropped() {
        let g = CsrGraph::from_undirected_edges(2, &[(0, 0), (0, 1), (1, 0), (0, 1)]).unwrap();
        assert_eq!(g.neighbors(0), &[1]);
        assert_eq!(g.neighbors(1), &[0]);
    }

    #[test]
    fn test_endpoint_out_of_range() {
        let err = CsrGraph::from_undirected_edges(2, &[(0, 5)]).unwrap_err();
        assert!(matches!(
            err,
            PeelError::VertexOutOfRange { vertex: 5, size: 2 }
        ));
    }

    #[test]
    fn test_empty_graph() {
        let g = CsrGraph::from_undirected_edges(0, &[]).unwrap();
        assert_eq!(g.size(), 0);
        assert_eq!(g.max_degree(), 0);
        assert_eq!(g.vertices().count(), 0);
    }

    #[test]
    fn test_isolated_vertices_keep_slots() {
        let g = CsrGraph::from_undirected_edges(4, &[(1, 2)]).unwrap();
        assert_eq!(g.outdegree(0), 0);
        assert_eq!(g.outdegree(3), 0);
        assert_eq!(g.neighbors(0), &[] as &[u32]);
    }
}
