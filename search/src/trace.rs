//! Opt-in execution trace.
//!
//! A trace is purely observational: it snapshots the search tree at
//! termination and records the order states were expanded in, with the
//! cost and parent each expansion actually used. Exporters in
//! the harness turn it into JSON-lines, DOT or HTML.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::contract::Edge;
use crate::node::ParentLink;
use crate::policy::TraceMode;

/// One generated edge, recorded when edge capture is enabled.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEdge<S, A> {
    pub from: S,
    pub to: S,
    pub action: A,
    pub cost: f64,
}

/// The cost and parent link a state had at the moment it was expanded.
///
/// A reopened state is expanded again later with a cheaper `g` and a new
/// link, so these can differ from the final tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionStep<S, A> {
    pub g: f64,
    pub link: ParentLink<S, A>,
}

/// Snapshot of a search run.
///
/// `parent` and `g` are the best-known tree at termination, in discovery
/// order. `expansions` lists every expanded state in pop order; a reopened
/// state appears once per expansion. `steps[i]` is the cost and link
/// `expansions[i]` was expanded with.
#[derive(Debug, Clone)]
pub struct SearchTrace<S, A> {
    pub parent: IndexMap<S, ParentLink<S, A>>,
    pub g: IndexMap<S, f64>,
    pub expansions: Vec<S>,
    pub steps: Vec<ExpansionStep<S, A>>,
    /// Generated edges in generation order (`None` unless requested).
    pub edges: Option<Vec<TraceEdge<S, A>>>,
    /// Edges generated past the capture cap and not recorded.
    pub edges_dropped: u64,
}

impl<S, A> SearchTrace<S, A> {
    /// Expanded states paired with the step each was expanded at.
    pub fn expansion_steps(&self) -> impl Iterator<Item = (&S, &ExpansionStep<S, A>)> {
        self.expansions.iter().zip(&self.steps)
    }
}

impl<S: Clone + Eq + Hash, A> SearchTrace<S, A> {
    /// Number of states discovered (present in the parent tree).
    #[must_use]
    pub fn discovered(&self) -> usize {
        self.parent.len()
    }

    /// Whether `state` was expanded at least once.
    #[must_use]
    pub fn was_expanded(&self, state: &S) -> bool {
        self.expansions.contains(state)
    }

    /// Walk the parent tree from `state` back to the start.
    ///
    /// Returns the states start..=`state`, or `None` if `state` was never
    /// discovered.
    #[must_use]
    pub fn path_to(&self, state: &S) -> Option<Vec<S>> {
        if !self.parent.contains_key(state) {
            return None;
        }
        let mut path = vec![state.clone()];
        let mut current = state;
        while let Some(ParentLink {
            parent: Some(prev), ..
        }) = self.parent.get(current)
        {
            path.push(prev.clone());
            current = prev;
        }
        path.reverse();
        Some(path)
    }
}

/// In-loop recorder. Only constructed when tracing is enabled, so a
/// disabled trace costs one `Option` check per event.
#[derive(Debug)]
pub(crate) struct TraceRecorder<S, A> {
    expansions: Vec<S>,
    steps: Vec<ExpansionStep<S, A>>,
    edges: Option<Vec<TraceEdge<S, A>>>,
    edge_cap: usize,
    edges_dropped: u64,
}

impl<S: Clone, A: Clone> TraceRecorder<S, A> {
    pub(crate) fn start(mode: TraceMode) -> Option<Self> {
        if !mode.is_enabled() {
            return None;
        }
        let edge_cap = mode.edge_cap();
        Some(Self {
            expansions: Vec::new(),
            steps: Vec::new(),
            edges: edge_cap.map(|_| Vec::new()),
            edge_cap: edge_cap.unwrap_or(0),
            edges_dropped: 0,
        })
    }

    pub(crate) fn record_expansion(&mut self, state: &S, g: f64, link: ParentLink<S, A>) {
        self.expansions.push(state.clone());
        self.steps.push(ExpansionStep { g, link });
    }

    pub(crate) fn record_edge(&mut self, from: &S, edge: &Edge<S, A>) {
        let Some(edges) = self.edges.as_mut() else {
            return;
        };
        if edges.len() >= self.edge_cap {
            self.edges_dropped += 1;
            return;
        }
        edges.push(TraceEdge {
            from: from.clone(),
            to: edge.next.clone(),
            action: edge.action.clone(),
            cost: edge.cost,
        });
    }

    pub(crate) fn finish(
        self,
        parent: IndexMap<S, ParentLink<S, A>>,
        g: IndexMap<S, f64>,
    ) -> SearchTrace<S, A> {
        SearchTrace {
            parent,
            g,
            expansions: self.expansions,
            steps: self.steps,
            edges: self.edges,
            edges_dropped: self.edges_dropped,
        }
    }
}
