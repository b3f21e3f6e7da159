//! Shared fixtures for the pathwise benchmark suites.

use pathwise_harness::worlds::graph::{random_graph, WeightedGraph};
use pathwise_harness::worlds::tram::{TramCosts, TransportationProblem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Heuristic quality for graph regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphHeuristic {
    /// All zeros: A* behaves like UCS.
    Zero,
    /// Exact reverse-Dijkstra distances.
    Exact,
    /// Exact distances lowered on random nodes; forces reopens.
    Inconsistent,
}

impl GraphHeuristic {
    pub const ALL: [Self; 3] = [Self::Zero, Self::Exact, Self::Inconsistent];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Exact => "exact",
            Self::Inconsistent => "inconsistent",
        }
    }
}

/// Tram world with default prices.
///
/// # Panics
///
/// Panics if `n == 0`. Benchmark setup failures are fatal.
#[must_use]
pub fn tram_world(n: u64) -> TransportationProblem {
    TransportationProblem::new(n, TramCosts::default()).expect("tram size must be >= 1")
}

/// Seeded random graph carrying the requested heuristic.
///
/// # Panics
///
/// Panics if `n < 2`. Benchmark setup failures are fatal.
#[must_use]
pub fn graph_world(n: usize, seed: u64, heuristic: GraphHeuristic) -> WeightedGraph {
    let graph = random_graph(n, seed).expect("graph needs at least 2 nodes");
    let table = match heuristic {
        GraphHeuristic::Zero => return graph,
        GraphHeuristic::Exact => graph.exact_heuristic(),
        GraphHeuristic::Inconsistent => graph.inconsistent_heuristic(seed),
    };
    graph
        .with_heuristic(table)
        .expect("heuristic table built from the same graph")
}

/// Seeded `(state, priority)` updates for frontier benches over `states`
/// distinct keys. Most keys are updated several times, so a share of the
/// updates are decrease-keys and the rest are rejected no-ops.
#[must_use]
pub fn frontier_workload(states: u32, updates: usize, seed: u64) -> Vec<(u32, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..updates)
        .map(|_| (rng.gen_range(0..states), f64::from(rng.gen_range(0u32..10_000))))
        .collect()
}
