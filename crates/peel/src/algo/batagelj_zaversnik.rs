// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Exact k-core decomposition (Batagelj–Zaversnik bucket sort).
//!
//! Counting-sorts vertices by degree, then peels them in ascending order of
//! current degree. When a vertex is popped every unpopped neighbor still has
//! degree at least its own, so the degree it holds at that moment is its
//! exact core number. The working degree array *is* the answer at the end
//! of the pass.

use crate::algo::Algorithm;
use crate::error::Result;
use crate::graph::{self, GraphView};

pub struct KCoreBz;

#[derive(Debug, Clone, Default)]
pub struct KCoreBzConfig {}

/// Summary of a finished decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreStats {
    /// Vertices with nonzero coreness.
    pub active_vertices: usize,
    /// Undirected edge count.
    pub edge_count: u64,
    /// Largest degree in the input.
    pub max_degree: usize,
    /// Largest core number.
    pub max_core: u32,
    /// Mean core number over vertices with nonzero coreness.
    pub avg_core: f64,
}

#[derive(Debug)]
pub struct KCoreBzResult {
    /// Exact core number of every vertex, indexed by vertex id.
    pub core_numbers: Vec<u32>,
    pub stats: CoreStats,
}

impl KCoreBzResult {
    /// Vertices belonging to the k-core.
    pub fn members_of(&self, k: u32) -> impl Iterator<Item = u32> + '_ {
        self.core_numbers
            .iter()
            .enumerate()
            .filter(move |&(_, &core)| core >= k)
            .map(|(v, _)| v as u32)
    }
}

impl Algorithm for KCoreBz {
    type Config = KCoreBzConfig;
    type Result = KCoreBzResult;

    fn name() -> &'static str {
        "kCore.exact"
    }

    fn run<G: GraphView>(graph: &G, _config: Self::Config) -> Result<KCoreBzResult> {
        let n = graph.size();
        if n == 0 {
            return Ok(KCoreBzResult {
                core_numbers: Vec::new(),
                stats: CoreStats {
                    active_vertices: 0,
                    edge_count: 0,
                    max_degree: 0,
                    max_core: 0,
                    avg_core: 0.0,
                },
            });
        }
        graph::validate(graph)?;

        let max_degree = graph.max_degree();

        // Working degrees; mutated during the peel, relabeled as coreness at
        // the end.
        let mut deg = vec![0usize; n];
        let mut arc_count = 0u64;
        for v in graph.vertices() {
            let d = graph.outdegree(v);
            deg[v as usize] = d;
            arc_count += d as u64;
        }

        // bin[d] counts vertices of degree d, then (after the prefix sum)
        // holds the first slot of degree class d in `vert`.
        let mut bin = vec![0usize; max_degree + 1];
        for &d in &deg {
            bin[d] += 1;
        }
        let mut start = 0;
        for b in &mut bin {
            let count = *b;
            *b = start;
            start += count;
        }

        // Scatter vertices into ascending-degree order, recording positions.
        // Invariant from here on: vert[pos[v]] == v.
        let mut vert = vec![0u32; n];
        let mut pos = vec![0usize; n];
        for v in 0..n {
            let d = deg[v];
            pos[v] = bin[d];
            vert[pos[v]] = v as u32;
            bin[d] += 1;
        }

        // The scatter advanced each bin past its class; shift right to make
        // bin[d] the insertion cursor at the front of class d again.
        for d in (1..=max_degree).rev() {
            bin[d] = bin[d - 1];
        }
        bin[0] = 0;

        for i in 0..n {
            // Smallest current degree among unpopped vertices.
            let v = vert[i];
            let deg_v = deg[v as usize];

            for &u in graph.neighbors(v) {
                let u_idx = u as usize;
                if deg[u_idx] > deg_v {
                    // Pull u down one degree class: swap it with the first
                    // vertex of its class, advance the class boundary, then
                    // decrement its degree.
                    let deg_u = deg[u_idx];
                    let pos_u = pos[u_idx];
                    let pos_w = bin[deg_u];
                    let w = vert[pos_w];
                    if u != w {
                        pos[u_idx] = pos_w;
                        pos[w as usize] = pos_u;
                        vert[pos_u] = w;
                        vert[pos_w] = u;
                    }
                    bin[deg_u] += 1;
                    deg[u_idx] -= 1;
                }
            }
        }

        let core_numbers: Vec<u32> = deg.into_iter().map(|d| d as u32).collect();

        let mut max_core = 0u32;
        let mut core_sum = 0u64;
        let mut active_vertices = 0usize;
        for &core in &core_numbers {
            max_core = max_core.max(core);
            core_sum += core as u64;
            if core > 0 {
                active_vertices += 1;
            }
        }
        let avg_core = if active_vertices > 0 {
            core_sum as f64 / active_vertices as f64
        } else {
            0.0
        };

        Ok(KCoreBzResult {
            core_numbers,
            stats: CoreStats {
                active_vertices,
                edge_count: arc_count / 2,
                max_degree,
                max_core,
                avg_core,
            },
        })
    }
}
