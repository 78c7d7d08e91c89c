// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Decomposition engines.
//!
//! Two engines produce per-vertex coreness behind the same [`Algorithm`]
//! interface:
//!
//! - [`KCoreBz`]: the exact linear-time bucket-sort algorithm of Batagelj and
//!   Zaversnik. One pass, O(n + m + d_max).
//!
//! - [`KCoreMontresor`]: the iterative local-estimation algorithm of
//!   Montresor, De Pellegrini and Miorandi. Estimates only ever tighten, so
//!   it can be cut short for a valid upper bound, and its update function
//!   also runs vertex-centrically on a bulk-synchronous engine (see
//!   [`crate::bsp`]).

use crate::error::Result;
use crate::graph::GraphView;

/// Core trait for decomposition algorithms.
pub trait Algorithm {
    /// Algorithm parameters.
    type Config: Default + Clone + Send + 'static;
    /// Result type.
    type Result: Send + 'static;

    /// Algorithm identifier.
    fn name() -> &'static str;

    /// Execute the algorithm over a graph view.
    fn run<G: GraphView>(graph: &G, config: Self::Config) -> Result<Self::Result>;
}

mod batagelj_zaversnik;
pub use batagelj_zaversnik::{CoreStats, KCoreBz, KCoreBzConfig, KCoreBzResult};

mod montresor;
pub use montresor::{KCoreMontresor, KCoreMontresorConfig, KCoreMontresorResult, upper_bound};

#[cfg(test)]
pub mod test_utils;
