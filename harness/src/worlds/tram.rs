//! `Tram`: the walk-vs-tram transportation world.
//!
//! Blocks are numbered `1..=n`. From block `s` you may walk to `s + 1` or
//! take the tram to `2s`, as long as you stay within `n`. Start at block 1,
//! finish at block `n`. Walking and riding have independent costs.
//!
//! The world ships its own optimum: a bottom-up dynamic program over the
//! blocks, used as the reference the engine's answers are checked against.

use std::collections::BTreeMap;
use std::fmt;

use pathwise_search::{Edge, SearchProblem};
use serde::{Deserialize, Serialize};

use crate::contract::SearchWorld;
use crate::error::HarnessError;

/// Per-action costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TramCosts {
    pub walk: f64,
    pub tram: f64,
}

impl TramCosts {
    /// Every action costs 1: search cost equals plan length.
    #[must_use]
    pub fn unit() -> Self {
        Self {
            walk: 1.0,
            tram: 1.0,
        }
    }

    fn cheapest(self) -> f64 {
        self.walk.min(self.tram)
    }
}

impl Default for TramCosts {
    fn default() -> Self {
        Self {
            walk: 1.0,
            tram: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TramAction {
    Walk,
    Tram,
}

impl fmt::Display for TramAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Walk => f.write_str("walk"),
            Self::Tram => f.write_str("tram"),
        }
    }
}

/// The walk-vs-tram search problem.
#[derive(Debug, Clone)]
pub struct TransportationProblem {
    n: u64,
    costs: TramCosts,
    /// `min_steps[s]`: fewest actions from `s` to `n`, ignoring cost.
    min_steps: Vec<u32>,
}

impl TransportationProblem {
    /// Build a world with `n` blocks.
    ///
    /// # Errors
    ///
    /// [`HarnessError::InvalidProblem`] if `n < 1`, `n` does not fit in
    /// memory-addressable tables, or a cost is negative or NaN.
    pub fn new(n: u64, costs: TramCosts) -> Result<Self, HarnessError> {
        if n < 1 {
            return Err(HarnessError::InvalidProblem {
                detail: format!("tram world needs n >= 1, got {n}"),
            });
        }
        if !(costs.walk >= 0.0 && costs.tram >= 0.0) {
            return Err(HarnessError::InvalidProblem {
                detail: format!(
                    "tram costs must be nonnegative, got walk={} tram={}",
                    costs.walk, costs.tram
                ),
            });
        }
        let len = usize::try_from(n).map_err(|_| HarnessError::InvalidProblem {
            detail: format!("tram world size {n} exceeds addressable range"),
        })?;

        let mut min_steps = vec![0u32; len + 1];
        for s in (1..len).rev() {
            let mut best = min_steps[s + 1];
            if 2 * s <= len {
                best = best.min(min_steps[2 * s]);
            }
            min_steps[s] = best + 1;
        }

        Ok(Self {
            n,
            costs,
            min_steps,
        })
    }

    #[must_use]
    pub fn n(&self) -> u64 {
        self.n
    }

    #[must_use]
    pub fn costs(&self) -> TramCosts {
        self.costs
    }

    /// Fewest remaining actions times the cheapest action cost.
    ///
    /// Any plan from `state` needs at least that many actions, each costing
    /// at least the cheapest price, so this never overestimates.
    #[must_use]
    pub fn admissible_heuristic(&self, state: &u64) -> f64 {
        let steps = usize::try_from(*state)
            .ok()
            .and_then(|i| self.min_steps.get(i))
            .copied()
            .unwrap_or(0);
        f64::from(steps) * self.costs.cheapest()
    }

    /// Optimal cost-to-go from every block, indexed by block number.
    ///
    /// Index 0 is unused and holds `0.0`. Ties prefer walking.
    #[must_use]
    pub fn cost_to_go(&self) -> Vec<f64> {
        self.solve_dp().0
    }

    /// Optimal cost from block 1 and the plan achieving it.
    #[must_use]
    pub fn shortest_cost_dp(&self) -> (f64, Vec<Edge<u64, TramAction>>) {
        let (best, choice) = self.solve_dp();
        let mut plan = Vec::new();
        let mut s = 1usize;
        let last = self.min_steps.len() - 1;
        while s < last {
            let (action, next, cost) = match choice[s] {
                TramAction::Walk => (TramAction::Walk, s + 1, self.costs.walk),
                TramAction::Tram => (TramAction::Tram, 2 * s, self.costs.tram),
            };
            plan.push(Edge::new(action, next as u64, cost));
            s = next;
        }
        (best[1], plan)
    }

    fn solve_dp(&self) -> (Vec<f64>, Vec<TramAction>) {
        let len = self.min_steps.len() - 1;
        let mut best = vec![0.0; len + 1];
        let mut choice = vec![TramAction::Walk; len + 1];
        for s in (1..len).rev() {
            best[s] = self.costs.walk + best[s + 1];
            if 2 * s <= len {
                let via_tram = self.costs.tram + best[2 * s];
                if via_tram < best[s] {
                    best[s] = via_tram;
                    choice[s] = TramAction::Tram;
                }
            }
        }
        (best, choice)
    }
}

impl SearchProblem for TransportationProblem {
    type State = u64;
    type Action = TramAction;

    fn start_state(&self) -> u64 {
        1
    }

    fn is_goal(&self, state: &u64) -> bool {
        *state == self.n
    }

    fn successors(&self, state: &u64) -> Vec<Edge<u64, TramAction>> {
        let mut edges = Vec::with_capacity(2);
        if *state < self.n {
            edges.push(Edge::new(TramAction::Walk, state + 1, self.costs.walk));
        }
        if state.saturating_mul(2) <= self.n {
            edges.push(Edge::new(TramAction::Tram, state * 2, self.costs.tram));
        }
        edges
    }
}

impl SearchWorld for TransportationProblem {
    fn domain(&self) -> &str {
        "tram"
    }

    fn params(&self) -> BTreeMap<String, serde_json::Value> {
        BTreeMap::from([
            ("N".to_string(), serde_json::json!(self.n)),
            ("walk_cost".to_string(), serde_json::json!(self.costs.walk)),
            ("tram_cost".to_string(), serde_json::json!(self.costs.tram)),
        ])
    }

    fn heuristic(&self, state: &u64) -> f64 {
        self.admissible_heuristic(state)
    }

    fn reference_cost(&self) -> Option<f64> {
        Some(self.shortest_cost_dp().0)
    }
}
