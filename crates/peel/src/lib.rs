// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! k-core decomposition over pluggable graph storage.
//!
//! The library is organized around a small [`GraphView`] contract that any
//! symmetric adjacency store can implement, with [`CsrGraph`] as the bundled
//! in-memory backend. Two engines compute per-vertex coreness on top of it:
//! the exact bucket-sort peeling of [`KCoreBz`] and the iterative
//! local-estimation of [`KCoreMontresor`], whose update function also runs
//! vertex-centrically on a bulk-synchronous engine ([`KCoreBsp`]).
//!
//! ```
//! use peel::{Algorithm, KCoreBz, KCoreBzConfig, CsrGraph};
//!
//! let graph = CsrGraph::from_undirected_edges(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();
//! let result = KCoreBz::run(&graph, KCoreBzConfig::default()).unwrap();
//! assert_eq!(result.core_numbers, vec![2, 2, 2, 1]);
//! ```

pub mod algo;
pub mod bsp;
pub mod error;
pub mod graph;

pub use algo::{
    Algorithm, CoreStats, KCoreBz, KCoreBzConfig, KCoreBzResult, KCoreMontresor,
    KCoreMontresorConfig, KCoreMontresorResult, upper_bound,
};
pub use bsp::{
    CorenessProgram, EngineContext, EngineVertex, KCoreBsp, KCoreBspConfig, SyncEngine,
    VertexProgram,
};
pub use error::{PeelError, Result};
pub use graph::{CsrGraph, GraphView, validate, validate_symmetric};
