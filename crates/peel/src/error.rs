// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PeelError {
    /// A backend returned a neighbor id outside the vertex range.
    #[error("vertex {vertex} has neighbor {neighbor} outside [0, {size})")]
    NeighborOutOfRange {
        vertex: u32,
        neighbor: u32,
        size: usize,
    },

    /// A backend's neighbor list disagrees with its reported out-degree.
    #[error("vertex {vertex} reports outdegree {outdegree} but yielded {actual} neighbors")]
    DegreeMismatch {
        vertex: u32,
        outdegree: usize,
        actual: usize,
    },

    /// An edge endpoint handed to a graph builder is outside the vertex range.
    #[error("edge endpoint {vertex} outside [0, {size})")]
    VertexOutOfRange { vertex: u32, size: usize },

    /// Edge (from, to) has no reverse edge (to, from).
    #[error("edge ({from}, {to}) has no reverse edge; adjacency is not symmetric")]
    AsymmetricEdge { from: u32, to: u32 },
}

pub type Result<T> = std::result::Result<T, PeelError>;
