// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Iterative k-core estimation (Montresor, De Pellegrini, Miorandi).
//!
//! Every vertex starts at its degree and repeatedly tightens an upper bound
//! on its coreness from its neighbors' current estimates. Estimates only
//! ever decrease, so any interleaving converges to the exact decomposition;
//! the fixed point is reached when a full round changes nothing.
//!
//! This module holds the single implementation of the bound computation
//! ([`upper_bound`]) and the in-process synchronous round loop. The same
//! bound drives the vertex-centric program in [`crate::bsp`]; only the
//! driving loop differs.

use crate::algo::Algorithm;
use crate::error::Result;
use crate::graph::{self, GraphView};

/// Tightened upper bound on the coreness of a vertex, from its current
/// estimate and its neighbors' current estimates.
///
/// Builds a histogram of `min(core_v, core_u)` over the neighbors, then
/// scans downwards from `core_v`: the first `i` such that at least `i`
/// neighbors claim an estimate of at least `i` bounds the vertex's core
/// (the h-index argument). The scan runs through `i = 1` so degree-one
/// structure (paths, stars) tightens all the way down; `i = 0` always
/// satisfies the condition, so the scan is total. When the neighbor
/// estimates do not constrain the vertex at all the result is `core_v`
/// itself, which at the seed round equals the vertex's degree.
pub fn upper_bound(core_v: u32, neighbor_cores: impl Iterator<Item = u32>) -> u32 {
    let mut histogram = vec![0u32; core_v as usize + 1];
    for core_u in neighbor_cores {
        histogram[core_v.min(core_u) as usize] += 1;
    }

    let mut cumul = 0u32;
    let mut i = core_v;
    while i > 0 {
        cumul += histogram[i as usize];
        if cumul >= i {
            return i;
        }
        i -= 1;
    }
    0
}

pub struct KCoreMontresor;

#[derive(Debug, Clone, Default)]
pub struct KCoreMontresorConfig {
    /// Stop after this many update rounds even if not yet converged; the
    /// partial result is then a valid upper bound on every coreness.
    pub max_rounds: Option<usize>,
}

#[derive(Debug)]
pub struct KCoreMontresorResult {
    /// Core estimate of every vertex; exact once `converged` is true.
    pub core_numbers: Vec<u32>,
    /// Update rounds executed after the degree-seeding round.
    pub rounds: usize,
    /// Whether a fixed point was reached.
    pub converged: bool,
}

impl Algorithm for KCoreMontresor {
    type Config = KCoreMontresorConfig;
    type Result = KCoreMontresorResult;

    fn name() -> &'static str {
        "kCore.estimate"
    }

    fn run<G: GraphView>(graph: &G, config: Self::Config) -> Result<KCoreMontresorResult> {
        let n = graph.size();
        if n == 0 {
            return Ok(KCoreMontresorResult {
                core_numbers: Vec::new(),
                rounds: 0,
                converged: true,
            });
        }
        graph::validate(graph)?;

        // Seed round: estimate = degree, everything scheduled.
        let mut core: Vec<u32> = graph.vertices().map(|v| graph.outdegree(v) as u32).collect();
        let mut active = vec![true; n];

        let mut rounds = 0;
        let mut converged = false;
        loop {
            if let Some(limit) = config.max_rounds {
                if rounds >= limit {
                    break;
                }
            }

            let scheduled = std::mem::replace(&mut active, vec![false; n]);
            let mut num_scheduled = 0usize;
            let mut num_updated = 0usize;

            for v in graph.vertices() {
                if !scheduled[v as usize] {
                    continue;
                }
                num_scheduled += 1;

                let core_v = core[v as usize];
                let neighbors = graph.neighbors(v);
                let estimate = upper_bound(core_v, neighbors.iter().map(|&u| core[u as usize]));
                if estimate < core_v {
                    core[v as usize] = estimate;
                    num_updated += 1;
                    // Only neighbors whose own bound could tighten as a
                    // result are worth revisiting.
                    for &u in neighbors {
                        if estimate <= core[u as usize] {
                            active[u as usize] = true;
                        }
                    }
                }
            }

            rounds += 1;
            tracing::debug!(
                round = rounds,
                scheduled = num_scheduled,
                updated = num_updated,
                "estimation round finished"
            );
            if num_updated == 0 {
                converged = true;
                break;
            }
        }

        Ok(KCoreMontresorResult {
            core_numbers: core,
            rounds,
            converged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::test_utils::build_test_graph;
    use crate::algo::{KCoreBz, KCoreBzConfig};

    #[test]
    fn test_empty_graph() {
        let graph = build_test_graph(0, &[]);
        let result = KCoreMontresor::run(&graph, KCoreMontresorConfig::default()).unwrap();
        assert!(result.core_numbers.is_empty());
        assert_eq!(result.rounds, 0);
        assert!(result.converged);
    }

    #[test]
    fn test_triangle_converges_to_two() {
        let graph = build_test_graph(3, &[(0, 1), (1, 2), (2, 0)]);
        let result = KCoreMontresor::run(&graph, KCoreMontresorConfig::default()).unwrap();
        assert_eq!(result.core_numbers, vec![2, 2, 2]);
        assert!(result.converged);
    }

    #[test]
    fn test_star_converges_to_one() {
        let edges: Vec<(u32, u32)> = (1..=4).map(|leaf| (0, leaf)).collect();
        let graph = build_test_graph(5, &edges);
        let result = KCoreMontresor::run(&graph, KCoreMontresorConfig::default()).unwrap();
        assert_eq!(result.core_numbers, vec![1; 5]);
    }

    #[test]
    fn test_agrees_with_exact() {
        // Two triangles joined by a bridge, plus a pendant path.
        let graph = build_test_graph(
            8,
            &[
                (0, 1),
                (1, 2),
                (2, 0),
                (2, 3),
                (3, 4),
                (4, 5),
                (5, 3),
                (5, 6),
                (6, 7),
            ],
        );
        let exact = KCoreBz::run(&graph, KCoreBzConfig::default()).unwrap();
        let estimate = KCoreMontresor::run(&graph, KCoreMontresorConfig::default()).unwrap();
        assert!(estimate.converged);
        assert_eq!(estimate.core_numbers, exact.core_numbers);
    }

    #[test]
    fn test_max_rounds_yields_upper_bound() {
        let graph = build_test_graph(
            6,
            &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)],
        );
        let exact = KCoreBz::run(&graph, KCoreBzConfig::default()).unwrap();
        let cut_short = KCoreMontresor::run(
            &graph,
            KCoreMontresorConfig {
                max_rounds: Some(1),
            },
        )
        .unwrap();
        assert_eq!(cut_short.rounds, 1);
        for v in 0..6 {
            assert!(cut_short.core_numbers[v] >= exact.core_numbers[v]);
        }
    }

    #[test]
    fn test_monotone_convergence() {
        // Drive the loop one bounded round at a time; per-vertex estimates
        // must never increase between rounds.
        let graph = build_test_graph(
            7,
            &[(0, 1), (0, 2), (1, 2), (1, 3), (3, 4), (4, 5), (5, 6), (6, 4)],
        );
        let mut previous: Option<Vec<u32>> = None;
        for limit in 1..6 {
            let result = KCoreMontresor::run(
                &graph,
                KCoreMontresorConfig {
                    max_rounds: Some(limit),
                },
            )
            .unwrap();
            if let Some(prev) = previous {
                for v in 0..7 {
                    assert!(result.core_numbers[v] <= prev[v]);
                }
            }
            previous = Some(result.core_numbers);
        }
    }

    #[test]
    fn test_upper_bound_degenerate_cases() {
        assert_eq!(upper_bound(1, [1u32].into_iter()), 1);
        assert_eq!(upper_bound(0, std::iter::empty()), 0);
        // All neighbors claim 0: nothing supports membership in any core.
        assert_eq!(upper_bound(3, [0u32, 0, 0].into_iter()), 0);
    }

    #[test]
    fn test_upper_bound_h_index() {
        // Three neighbors claiming >= 2 support a bound of 2, not 3.
        assert_eq!(upper_bound(3, [2u32, 2, 2].into_iter()), 2);
        // Three neighbors claiming >= 3 support 3.
        assert_eq!(upper_bound(3, [3u32, 3, 3].into_iter()), 3);
        // Mixed estimates clamp at min(core_v, core_u).
        assert_eq!(upper_bound(2, [5u32, 9, 1, 1].into_iter()), 2);
        // Path interior: two degree-one neighbors pull the bound to 1.
        assert_eq!(upper_bound(2, [1u32, 1].into_iter()), 1);
    }
}
