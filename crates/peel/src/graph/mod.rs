// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Read-only graph access contract consumed by the decomposition engines.
//!
//! The engines never own storage: they see a graph only through [`GraphView`],
//! a minimal capability that any backend can satisfy, from plain adjacency
//! lists to the bundled dense CSR or a memory-mapped/compressed store. Vertex ids are
//! dense `u32` values in `[0, size())`, assigned by the backend and stable for
//! the duration of a run.
//!
//! The adjacency relation is expected to be symmetric (if `u` appears in
//! `neighbors(v)`, `v` appears in `neighbors(u)`). The engines do not check
//! this; an asymmetric view silently produces values that are not a meaningful
//! k-core. Callers that need a hard guarantee can run [`validate_symmetric`]
//! up front.

mod csr;

pub use csr::CsrGraph;

use crate::error::{PeelError, Result};

/// Read-only view of an undirected graph.
pub trait GraphView {
    /// Number of vertices.
    fn size(&self) -> usize;

    /// Number of neighbors of `v`.
    fn outdegree(&self, v: u32) -> usize;

    /// Neighbor list of `v`, `outdegree(v)` entries long.
    fn neighbors(&self, v: u32) -> &[u32];

    /// Largest out-degree over all vertices.
    ///
    /// The default implementation scans every vertex; backends that can answer
    /// cheaply (or cache the answer) should override it.
    fn max_degree(&self) -> usize {
        self.vertices().map(|v| self.outdegree(v)).max().unwrap_or(0)
    }

    /// Restartable enumerator of all vertex ids, `0..size()`.
    fn vertices(&self) -> std::ops::Range<u32> {
        0..self.size() as u32
    }
}

/// Check that a view satisfies the contract the engines rely on: every
/// neighbor id in range, every neighbor list consistent with `outdegree`.
///
/// The engines run this before touching any per-vertex state, so a malformed
/// backend fails fast instead of mid-decomposition.
pub fn validate<G: GraphView>(graph: &G) -> Result<()> {
    let n = graph.size();
    for v in graph.vertices() {
        let neighbors = graph.neighbors(v);
        let outdegree = graph.outdegree(v);
        if neighbors.len() != outdegree {
            return Err(PeelError::DegreeMismatch {
                vertex: v,
                outdegree,
                actual: neighbors.len(),
            });
        }
        for &u in neighbors {
            if u as usize >= n {
                return Err(PeelError::NeighborOutOfRange {
                    vertex: v,
                    neighbor: u,
                    size: n,
                });
            }
        }
    }
    Ok(())
}

/// Check that the adjacency relation is symmetric.
///
/// This is O(m * d_max) in the general case and is deliberately not run by the
/// engines themselves; it exists for callers that cannot trust their input.
pub fn validate_symmetric<G: GraphView>(graph: &G) -> Result<()> {
    validate(graph)?;
    for v in graph.vertices() {
        for &u in graph.neighbors(v) {
            if !graph.neighbors(u).contains(&v) {
                return Err(PeelError::AsymmetricEdge { from: v, to: u });
            }
        }
    }
    Ok(())
}
