//! Harness runner: dispatches a world to one of the engine's algorithms.
//!
//! The runner owns algorithm selection and nothing else. A* is given the
//! world's own heuristic; the other algorithms ignore it.

use pathwise_search::{astar, bfs, dfs, ucs, Algorithm, SearchPolicy, SearchResult};
use tracing::debug;

use crate::contract::SearchWorld;
use crate::error::HarnessError;

/// Parse a user-facing algorithm name (`bfs`, `dfs`, `ucs`, `astar`, `a*`,
/// `a_star`; case-insensitive).
///
/// # Errors
///
/// [`HarnessError::UnknownAlgorithm`] for anything else.
pub fn parse_algorithm(name: &str) -> Result<Algorithm, HarnessError> {
    name.parse().map_err(|_| HarnessError::UnknownAlgorithm {
        name: name.to_string(),
    })
}

/// Run `algorithm` on `world` under `policy`.
///
/// # Errors
///
/// [`HarnessError::Search`] wrapping the engine's `ResourceExhausted` or
/// `NoSolution`.
pub fn run_algorithm<W: SearchWorld>(
    world: &W,
    algorithm: Algorithm,
    policy: &SearchPolicy,
) -> Result<SearchResult<W::State, W::Action>, HarnessError> {
    debug!(domain = world.domain(), %algorithm, "dispatching search");
    let result = match algorithm {
        Algorithm::Bfs => bfs(world, policy)?,
        Algorithm::Dfs => dfs(world, policy)?,
        Algorithm::Ucs => ucs(world, policy)?,
        Algorithm::Astar => {
            let heuristic = |state: &W::State| world.heuristic(state);
            astar(world, &heuristic, policy)?
        }
    };
    Ok(result)
}
