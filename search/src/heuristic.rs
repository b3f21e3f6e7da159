//! Heuristic estimates for A*.

/// Estimate of the remaining cost from a state to the nearest goal.
///
/// A* returns optimal costs whenever the estimate is *admissible* (never
/// larger than the true remaining cost). Consistency is not required: the
/// search reopens states when an inconsistent estimate closes them too
/// early. The engine does not check either property.
///
/// The estimate must be time-invariant for the duration of one search.
pub trait Heuristic<S> {
    fn estimate(&self, state: &S) -> f64;
}

impl<S, F> Heuristic<S> for F
where
    F: Fn(&S) -> f64,
{
    fn estimate(&self, state: &S) -> f64 {
        self(state)
    }
}

/// Heuristic that always returns zero. A* with it expands like UCS.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<S> Heuristic<S> for ZeroHeuristic {
    fn estimate(&self, _state: &S) -> f64 {
        0.0
    }
}
