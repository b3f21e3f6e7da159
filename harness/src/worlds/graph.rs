//! Weighted directed graphs over nodes `0..n`.
//!
//! Used as a second domain and as the fixture for engine properties: a
//! seeded generator produces connected-ish graphs, reverse Dijkstra gives
//! exact distances, and from those we derive both a perfect heuristic and
//! an admissible-but-inconsistent one.

use std::collections::BTreeMap;

use pathwise_search::{Edge, PriorityFrontier, SearchProblem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::contract::SearchWorld;
use crate::error::HarnessError;

/// Directed graph with nonnegative edge costs and fixed endpoints.
///
/// The action of an edge is its target node id.
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    adjacency: Vec<Vec<(usize, f64)>>,
    start: usize,
    goal: usize,
    /// Per-node estimate used by A*. All zeros until replaced.
    heuristic: Vec<f64>,
    seed: Option<u64>,
}

impl WeightedGraph {
    /// An edgeless graph of `n` nodes.
    ///
    /// # Errors
    ///
    /// [`HarnessError::InvalidProblem`] if `start` or `goal` is out of range.
    pub fn new(n: usize, start: usize, goal: usize) -> Result<Self, HarnessError> {
        if start >= n || goal >= n {
            return Err(HarnessError::InvalidProblem {
                detail: format!("endpoints ({start}, {goal}) out of range for {n} nodes"),
            });
        }
        Ok(Self {
            adjacency: vec![Vec::new(); n],
            start,
            goal,
            heuristic: vec![0.0; n],
            seed: None,
        })
    }

    /// Append a directed edge. Parallel edges are kept.
    ///
    /// # Errors
    ///
    /// [`HarnessError::InvalidProblem`] on an unknown node or a negative,
    /// NaN or infinite cost.
    pub fn add_edge(&mut self, from: usize, to: usize, cost: f64) -> Result<(), HarnessError> {
        let n = self.adjacency.len();
        if from >= n || to >= n {
            return Err(HarnessError::InvalidProblem {
                detail: format!("edge {from}->{to} out of range for {n} nodes"),
            });
        }
        if !(cost.is_finite() && cost >= 0.0) {
            return Err(HarnessError::InvalidProblem {
                detail: format!("edge {from}->{to} has invalid cost {cost}"),
            });
        }
        self.adjacency[from].push((to, cost));
        Ok(())
    }

    /// Replace the heuristic table.
    ///
    /// # Errors
    ///
    /// [`HarnessError::InvalidProblem`] if the table length differs from
    /// the node count.
    pub fn with_heuristic(mut self, table: Vec<f64>) -> Result<Self, HarnessError> {
        if table.len() != self.adjacency.len() {
            return Err(HarnessError::InvalidProblem {
                detail: format!(
                    "heuristic has {} entries for {} nodes",
                    table.len(),
                    self.adjacency.len()
                ),
            });
        }
        self.heuristic = table;
        Ok(self)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub fn goal(&self) -> usize {
        self.goal
    }

    #[must_use]
    pub fn heuristic_table(&self) -> &[f64] {
        &self.heuristic
    }

    /// Exact cost from every node to the goal; `None` where unreachable.
    ///
    /// Dijkstra over reversed edges, run on the engine's own frontier.
    #[must_use]
    pub fn distances_to_goal(&self) -> Vec<Option<f64>> {
        let n = self.adjacency.len();
        let mut reverse: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        for (from, edges) in self.adjacency.iter().enumerate() {
            for &(to, cost) in edges {
                reverse[to].push((from, cost));
            }
        }

        let mut dist: Vec<Option<f64>> = vec![None; n];
        let mut frontier = PriorityFrontier::new();
        frontier.update(self.goal, 0.0);
        while let Some((node, d)) = frontier.pop_min() {
            if dist[node].is_some() {
                continue;
            }
            dist[node] = Some(d);
            for &(pred, cost) in &reverse[node] {
                if dist[pred].is_none() {
                    frontier.update(pred, d + cost);
                }
            }
        }
        dist
    }

    /// Exact distances as a heuristic table. Unreachable nodes get 0.
    #[must_use]
    pub fn exact_heuristic(&self) -> Vec<f64> {
        self.distances_to_goal()
            .into_iter()
            .map(|d| d.unwrap_or(0.0))
            .collect()
    }

    /// Exact distances with a few non-goal nodes lowered by 1..=20.
    ///
    /// Never above the true distance, so still admissible, but the drops
    /// usually break consistency and force A* to reopen states.
    #[must_use]
    pub fn inconsistent_heuristic(&self, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = self.adjacency.len();
        let mut table = self.exact_heuristic();
        let lowered = rng.gen_range(1..=(n / 3).max(1));
        for _ in 0..lowered {
            let node = rng.gen_range(0..n);
            if node == self.goal {
                continue;
            }
            let drop = f64::from(rng.gen_range(1u32..=20));
            table[node] = (table[node] - drop).max(0.0);
        }
        table
    }
}

/// Seeded random graph on `n` nodes from 0 to `n - 1`.
///
/// A backbone `0 → 1 → … → n-1` guarantees reachability; between `n` and
/// `4n` extra edges are then drawn uniformly (self-loops skipped). All
/// costs are integers in `1..=9`. Same seed, same graph.
///
/// # Errors
///
/// [`HarnessError::InvalidProblem`] if `n < 2`.
pub fn random_graph(n: usize, seed: u64) -> Result<WeightedGraph, HarnessError> {
    if n < 2 {
        return Err(HarnessError::InvalidProblem {
            detail: format!("random graph needs at least 2 nodes, got {n}"),
        });
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = WeightedGraph::new(n, 0, n - 1)?;
    for i in 0..n - 1 {
        let cost = f64::from(rng.gen_range(1u32..=9));
        graph.add_edge(i, i + 1, cost)?;
    }
    let extra = rng.gen_range(n..=4 * n);
    for _ in 0..extra {
        let from = rng.gen_range(0..n);
        let to = rng.gen_range(0..n);
        if from == to {
            continue;
        }
        let cost = f64::from(rng.gen_range(1u32..=9));
        graph.add_edge(from, to, cost)?;
    }
    graph.seed = Some(seed);
    Ok(graph)
}

impl SearchProblem for WeightedGraph {
    type State = usize;
    type Action = usize;

    fn start_state(&self) -> usize {
        self.start
    }

    fn is_goal(&self, state: &usize) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &usize) -> Vec<Edge<usize, usize>> {
        self.adjacency
            .get(*state)
            .map(|edges| {
                edges
                    .iter()
                    .map(|&(to, cost)| Edge::new(to, to, cost))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl SearchWorld for WeightedGraph {
    fn domain(&self) -> &str {
        "graph"
    }

    fn params(&self) -> BTreeMap<String, serde_json::Value> {
        let mut params = BTreeMap::from([
            ("nodes".to_string(), serde_json::json!(self.node_count())),
            ("edges".to_string(), serde_json::json!(self.edge_count())),
        ]);
        if let Some(seed) = self.seed {
            params.insert("seed".to_string(), serde_json::json!(seed));
        }
        params
    }

    fn heuristic(&self, state: &usize) -> f64 {
        self.heuristic.get(*state).copied().unwrap_or(0.0)
    }

    fn reference_cost(&self) -> Option<f64> {
        self.distances_to_goal().get(self.start).copied().flatten()
    }
}
