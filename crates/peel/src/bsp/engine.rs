// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Minimal in-process engine for the bulk-synchronous boundary.
//!
//! Holds per-edge `u32` values with precomputed mirror indices (the slot of
//! the reverse edge), a boolean task scheduler, and a synchronous iteration
//! loop. Production deployments substitute an out-of-core engine behind the
//! same [`VertexProgram`] contract; this one keeps everything resident and
//! runs updates in vertex-id order.

use fxhash::FxHashMap;

use crate::bsp::{EngineContext, EngineVertex, VertexProgram};
use crate::error::{PeelError, Result};
use crate::graph::{self, GraphView};

#[derive(Debug)]
pub struct SyncEngine {
    /// Vertex v's out-edges occupy `offsets[v]..offsets[v + 1]`.
    offsets: Vec<usize>,
    neighbors: Vec<u32>,
    /// `mirror[e]` is the slot of the reverse edge of `e`.
    mirror: Vec<usize>,
    /// Value last broadcast by the source of each directed edge.
    edge_values: Vec<u32>,
    vertex_values: Vec<u32>,
    active: Vec<bool>,
    iteration: usize,
}

impl SyncEngine {
    /// Materialize the engine state from a graph view.
    ///
    /// Building the mirror table requires every edge to have a reverse edge,
    /// so an asymmetric view is rejected here rather than silently mis-run.
    pub fn new<G: GraphView>(g: &G) -> Result<Self> {
        graph::validate(g)?;
        let n = g.size();

        let mut offsets = Vec::with_capacity(n + 1);
        offsets.push(0);
        let mut neighbors = Vec::new();
        for v in g.vertices() {
            neighbors.extend_from_slice(g.neighbors(v));
            offsets.push(neighbors.len());
        }

        let mut slot_of: FxHashMap<(u32, u32), usize> = FxHashMap::default();
        slot_of.reserve(neighbors.len());
        for v in 0..n as u32 {
            for e in offsets[v as usize]..offsets[v as usize + 1] {
                slot_of.insert((v, neighbors[e]), e);
            }
        }

        let mut mirror = vec![0usize; neighbors.len()];
        for v in 0..n as u32 {
            for e in offsets[v as usize]..offsets[v as usize + 1] {
                let u = neighbors[e];
                match slot_of.get(&(u, v)) {
                    Some(&rev) => mirror[e] = rev,
                    None => return Err(PeelError::AsymmetricEdge { from: v, to: u }),
                }
            }
        }

        Ok(Self {
            offsets,
            neighbors,
            edge_values: vec![0; mirror.len()],
            mirror,
            vertex_values: vec![0; n],
            active: vec![true; n],
            iteration: 0,
        })
    }

    /// Drive the program until the scheduler drains or the program halts.
    /// Returns the number of iterations executed.
    pub fn run(&mut self, program: &mut dyn VertexProgram) -> usize {
        let n = self.vertex_values.len();

        loop {
            if !self.active.iter().any(|&a| a) {
                break;
            }
            let scheduled = std::mem::take(&mut self.active);

            let mut next = vec![false; n];
            let mut halted = false;
            let mut ctx = Ctx {
                iteration: self.iteration,
                next: &mut next,
                halted: &mut halted,
            };

            program.begin_iteration(&mut ctx);
            for v in 0..n {
                if !scheduled[v] {
                    continue;
                }
                let start = self.offsets[v];
                let end = self.offsets[v + 1];
                let mut vertex = VertexView {
                    id: v as u32,
                    start,
                    degree: end - start,
                    neighbors: &self.neighbors,
                    mirror: &self.mirror,
                    edge_values: &mut self.edge_values,
                    value: &mut self.vertex_values[v],
                };
                program.update(&mut vertex, &mut ctx);
            }
            program.end_iteration(&mut ctx);

            self.active = if halted { vec![false; n] } else { next };
            self.iteration += 1;
        }

        self.iteration
    }

    /// Current per-vertex values (the core estimates, for [`CorenessProgram`]).
    ///
    /// [`CorenessProgram`]: crate::bsp::CorenessProgram
    pub fn vertex_values(&self) -> &[u32] {
        &self.vertex_values
    }
}

struct Ctx<'a> {
    iteration: usize,
    next: &'a mut Vec<bool>,
    halted: &'a mut bool,
}

impl EngineContext for Ctx<'_> {
    fn iteration(&self) -> usize {
        self.iteration
    }

    fn schedule(&mut self, v: u32) {
        self.next[v as usize] = true;
    }

    fn remove_all_tasks(&mut self) {
        *self.halted = true;
    }
}

struct VertexView<'a> {
    id: u32,
    start: usize,
    degree: usize,
    neighbors: &'a [u32],
    mirror: &'a [usize],
    edge_values: &'a mut [u32],
    value: &'a mut u32,
}

impl EngineVertex for VertexView<'_> {
    fn id(&self) -> u32 {
        self.id
    }

    fn degree(&self) -> usize {
        self.degree
    }

    fn neighbor(&self, i: usize) -> u32 {
        self.neighbors[self.start + i]
    }

    fn in_edge_value(&self, i: usize) -> u32 {
        // The neighbor broadcast onto its own out-edge; the mirror table
        // points straight at it.
        self.edge_values[self.mirror[self.start + i]]
    }

    fn value(&self) -> u32 {
        *self.value
    }

    fn set_value(&mut self, value: u32) {
        *self.value = value;
    }

    fn broadcast(&mut self, value: u32) {
        for e in self.start..self.start + self.degree {
            self.edge_values[e] = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::test_utils::build_test_graph;
    use crate::bsp::CorenessProgram;

    #[test]
    fn test_engine_rejects_asymmetric_view() {
        let graph = crate::graph::CsrGraph::from_adjacency(vec![vec![1], vec![]]);
        let err = SyncEngine::new(&graph).unwrap_err();
        assert!(matches!(err, PeelError::AsymmetricEdge { from: 0, to: 1 }));
    }

    #[test]
    fn test_seed_iteration_broadcasts_degrees() {
        let graph = build_test_graph(3, &[(0, 1), (1, 2)]);
        let mut engine = SyncEngine::new(&graph).unwrap();
        let mut program = CorenessProgram::new();
        let iterations = engine.run(&mut program);

        assert_eq!(program.iterations(), iterations);
        // Path of three: all coreness 1.
        assert_eq!(engine.vertex_values(), &[1, 1, 1]);
    }

    #[test]
    fn test_isolated_vertices_settle_at_zero() {
        let graph = build_test_graph(4, &[(0, 1)]);
        let mut engine = SyncEngine::new(&graph).unwrap();
        let mut program = CorenessProgram::new();
        engine.run(&mut program);
        assert_eq!(engine.vertex_values(), &[1, 1, 0, 0]);
    }
}
