//! World contract: what a domain supplies beyond the bare search problem.
//!
//! A world is a [`SearchProblem`] plus the metadata the benchmark harness
//! needs: a domain name, its parameters, an admissible heuristic and an
//! optimum computed without the search engine. Worlds may NOT run searches
//! themselves; dispatch belongs to [`crate::runner`].

use std::collections::BTreeMap;

use pathwise_search::SearchProblem;

/// The contract a world must implement to be benchmarked.
pub trait SearchWorld: SearchProblem {
    /// Domain identifier recorded in benchmark rows (e.g., `"tram"`).
    fn domain(&self) -> &str;

    /// Instance parameters recorded in benchmark rows.
    fn params(&self) -> BTreeMap<String, serde_json::Value>;

    /// Admissible estimate of remaining cost, used by A*.
    fn heuristic(&self, state: &Self::State) -> f64;

    /// Optimal start-to-goal cost computed independently of the engine
    /// (dynamic programming, reverse Dijkstra). `None` if unreachable.
    fn reference_cost(&self) -> Option<f64>;
}
