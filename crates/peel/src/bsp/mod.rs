// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Vertex-centric bulk-synchronous execution boundary.
//!
//! An external out-of-core engine drives the decomposition by calling a
//! [`VertexProgram`] once per scheduled vertex per iteration. The engine owns
//! sharding, disk I/O and task scheduling; the program sees one vertex at a
//! time through [`EngineVertex`] and talks back through [`EngineContext`].
//! Neighbor estimates travel on edges: when a vertex tightens its estimate it
//! broadcasts the new value onto its out-edges, and neighbors read it from
//! their in-edge values on a later iteration.
//!
//! [`SyncEngine`] is a minimal in-process engine implementing this contract,
//! used to exercise the boundary and as the fallback when no external engine
//! is wired in.

mod engine;

pub use engine::SyncEngine;

use crate::algo::{Algorithm, KCoreMontresorResult, upper_bound};
use crate::error::Result;
use crate::graph::GraphView;

/// One vertex as seen by the program during an update call.
///
/// The graph is symmetric, so a vertex has one in-edge per out-edge and
/// `neighbor(i)` names the other endpoint of both.
pub trait EngineVertex {
    fn id(&self) -> u32;
    fn degree(&self) -> usize;
    fn neighbor(&self, i: usize) -> u32;
    /// Value most recently broadcast by `neighbor(i)`.
    fn in_edge_value(&self, i: usize) -> u32;
    fn value(&self) -> u32;
    fn set_value(&mut self, value: u32);
    /// Write `value` onto every out-edge, mirroring it into the neighbors'
    /// in-edge storage.
    fn broadcast(&mut self, value: u32);
}

/// Scheduling services supplied by the engine.
pub trait EngineContext {
    /// Current iteration, starting at 0.
    fn iteration(&self) -> usize;
    /// Schedule `v` for the next iteration.
    fn schedule(&mut self, v: u32);
    /// Stop scheduling entirely; the engine halts after this iteration.
    fn remove_all_tasks(&mut self);
}

/// A vertex-centric program driven by a bulk-synchronous engine.
pub trait VertexProgram {
    fn begin_iteration(&mut self, ctx: &mut dyn EngineContext);
    fn update(&mut self, vertex: &mut dyn EngineVertex, ctx: &mut dyn EngineContext);
    fn end_iteration(&mut self, ctx: &mut dyn EngineContext);
}

/// The Montresor estimator as a vertex-centric program.
///
/// Iteration 0 seeds every vertex with its degree and broadcasts it; later
/// iterations tighten the bound from in-edge values and reschedule only the
/// neighbors whose own bound could tighten in turn. When an iteration updates
/// nothing the program tells the engine to stop.
#[derive(Debug, Default)]
pub struct CorenessProgram {
    values_updated: usize,
    vertices_scheduled: usize,
    iterations: usize,
}

impl CorenessProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterations executed so far, including the seed iteration.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

impl VertexProgram for CorenessProgram {
    fn begin_iteration(&mut self, _ctx: &mut dyn EngineContext) {
        self.values_updated = 0;
        self.vertices_scheduled = 0;
    }

    fn update(&mut self, vertex: &mut dyn EngineVertex, ctx: &mut dyn EngineContext) {
        let degree = vertex.degree();

        if ctx.iteration() == 0 {
            vertex.set_value(degree as u32);
            vertex.broadcast(degree as u32);
            self.values_updated += 1;
            ctx.schedule(vertex.id());
            self.vertices_scheduled += 1;
            return;
        }

        let core_v = vertex.value();
        let estimate = upper_bound(core_v, (0..degree).map(|i| vertex.in_edge_value(i)));
        if estimate < core_v {
            vertex.set_value(estimate);
            vertex.broadcast(estimate);
            self.values_updated += 1;
            for i in 0..degree {
                if estimate <= vertex.in_edge_value(i) {
                    ctx.schedule(vertex.neighbor(i));
                    self.vertices_scheduled += 1;
                }
            }
        }
    }

    fn end_iteration(&mut self, ctx: &mut dyn EngineContext) {
        self.iterations += 1;
        tracing::debug!(
            iteration = ctx.iteration(),
            updated = self.values_updated,
            scheduled = self.vertices_scheduled,
            "bulk-synchronous iteration finished"
        );
        if self.values_updated == 0 {
            ctx.remove_all_tasks();
        }
    }
}

/// The iterative decomposition on the bundled synchronous engine.
///
/// Same fixed point as [`crate::algo::KCoreMontresor`]; only the execution
/// substrate differs.
pub struct KCoreBsp;

#[derive(Debug, Clone, Default)]
pub struct KCoreBspConfig {}

impl Algorithm for KCoreBsp {
    type Config = KCoreBspConfig;
    type Result = KCoreMontresorResult;

    fn name() -> &'static str {
        "kCore.estimate.bsp"
    }

    fn run<G: GraphView>(graph: &G, _config: Self::Config) -> Result<KCoreMontresorResult> {
        let mut engine = SyncEngine::new(graph)?;
        let mut program = CorenessProgram::new();
        let iterations = engine.run(&mut program);
        Ok(KCoreMontresorResult {
            core_numbers: engine.vertex_values().to_vec(),
            rounds: iterations.saturating_sub(1),
            converged: true,
        })
    }
}
