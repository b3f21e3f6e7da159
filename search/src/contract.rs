//! Search problem contract trait.

use std::hash::Hash;

/// One transition yielded by [`SearchProblem::successors`].
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<S, A> {
    /// Label of the transition (carried for path reconstruction only).
    pub action: A,
    /// State reached by taking `action`.
    pub next: S,
    /// Step cost. Must be nonnegative when used with UCS or A*.
    pub cost: f64,
}

impl<S, A> Edge<S, A> {
    #[must_use]
    pub fn new(action: A, next: S, cost: f64) -> Self {
        Self { action, next, cost }
    }
}

/// Trait for domains that support search.
///
/// A problem is a pure description of a state space: a start state, a goal
/// predicate and a successor function. It carries no search logic.
///
/// # Contract
///
/// - `successors` must be deterministic: same state → same edges in the same
///   order. The returned sequence must be finite.
/// - Edge costs must be nonnegative when the problem is used with
///   [`crate::ucs`] or [`crate::astar`]. This is not validated; violating it
///   voids the optimality guarantee but does not panic.
/// - BFS and DFS ignore cost magnitudes and charge one unit per action.
pub trait SearchProblem {
    /// Opaque state identity. Only equality and hashing are used.
    type State: Clone + Eq + Hash;
    /// Opaque transition label.
    type Action: Clone;

    /// The state search begins from.
    fn start_state(&self) -> Self::State;

    /// Test whether the given state satisfies the goal.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Enumerate all outgoing edges of `state`.
    fn successors(&self, state: &Self::State) -> Vec<Edge<Self::State, Self::Action>>;
}

impl<P: SearchProblem + ?Sized> SearchProblem for &P {
    type State = P::State;
    type Action = P::Action;

    fn start_state(&self) -> Self::State {
        (**self).start_state()
    }

    fn is_goal(&self, state: &Self::State) -> bool {
        (**self).is_goal(state)
    }

    fn successors(&self, state: &Self::State) -> Vec<Edge<Self::State, Self::Action>> {
        (**self).successors(state)
    }
}
