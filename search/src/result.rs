//! Search results and path reconstruction.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use std::time::Duration;

use indexmap::IndexMap;

use crate::node::ParentLink;
use crate::trace::SearchTrace;

/// Which control loop produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Ucs,
    Astar,
}

impl Algorithm {
    /// All algorithms, in a fixed order.
    pub const ALL: [Self; 4] = [Self::Bfs, Self::Dfs, Self::Ucs, Self::Astar];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Ucs => "ucs",
            Self::Astar => "astar",
        }
    }

    /// Whether the algorithm guarantees an optimal cost under nonnegative
    /// edge costs (and, for A*, an admissible heuristic).
    #[must_use]
    pub fn is_cost_optimal(self) -> bool {
        matches!(self, Self::Ucs | Self::Astar)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An algorithm name that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm {0:?} (expected bfs, dfs, ucs or astar)")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    /// Case-insensitive. `a*` and `a_star` are accepted for A*.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            "ucs" => Ok(Self::Ucs),
            "astar" | "a*" | "a_star" => Ok(Self::Astar),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Work counters for one search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Live states dequeued and processed. Stale pops are not counted.
    pub expanded: u64,
    /// Successor edges enumerated, whether or not they improved anything.
    pub generated: u64,
    /// Times an already-recorded cost was strictly improved.
    pub reopens: u64,
    /// Peak live frontier size.
    pub max_frontier: usize,
}

/// Result of a successful search.
#[derive(Debug, Clone)]
pub struct SearchResult<S, A> {
    pub algorithm: Algorithm,
    /// Total path cost. BFS and DFS report the action count.
    pub cost: f64,
    /// Actions start→goal.
    pub actions: Vec<A>,
    /// States start..=goal.
    pub states: Vec<S>,
    pub stats: SearchStats,
    /// Wall-clock time spent inside the call.
    pub runtime: Duration,
    /// Present only when the policy requested tracing.
    pub trace: Option<SearchTrace<S, A>>,
}

impl<S, A> SearchResult<S, A> {
    /// Number of actions in the plan.
    #[must_use]
    pub fn plan_len(&self) -> usize {
        self.actions.len()
    }

    /// The goal state reached (last element of `states`).
    #[must_use]
    pub fn goal(&self) -> Option<&S> {
        self.states.last()
    }

    #[must_use]
    pub fn runtime_secs(&self) -> f64 {
        self.runtime.as_secs_f64()
    }
}

/// Reconstruct the path from the start to `goal` by walking parent links.
///
/// Returns `(states, actions)` in start→goal order. States include both
/// endpoints; `actions.len() == states.len() - 1`.
#[must_use]
pub fn reconstruct_path<S, A>(goal: &S, parent: &IndexMap<S, ParentLink<S, A>>) -> (Vec<S>, Vec<A>)
where
    S: Clone + Eq + Hash,
    A: Clone,
{
    let mut states = vec![goal.clone()];
    let mut actions = Vec::new();
    let mut current = goal;

    while let Some(ParentLink {
        parent: Some(prev),
        action,
    }) = parent.get(current)
    {
        if let Some(action) = action {
            actions.push(action.clone());
        }
        states.push(prev.clone());
        current = prev;
    }

    states.reverse();
    actions.reverse();
    (states, actions)
}
