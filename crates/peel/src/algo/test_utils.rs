// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use crate::graph::CsrGraph;

/// Build a symmetric CSR graph from an undirected edge list.
pub fn build_test_graph(n: usize, edges: &[(u32, u32)]) -> CsrGraph {
    CsrGraph::from_undirected_edges(n, edges).expect("test edge list must be in range")
}
