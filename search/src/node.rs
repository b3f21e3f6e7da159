//! Parent links and the frontier ordering key.

use std::cmp::Ordering;

/// One entry of the search tree: how a state was first (or most cheaply)
/// reached.
///
/// The start state carries the sentinel `ParentLink::root()` with both
/// fields `None`. A link is only rewritten when the child's cost strictly
/// improves, so the parent map always forms a tree rooted at the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentLink<S, A> {
    /// Predecessor state (`None` for the start state).
    pub parent: Option<S>,
    /// Action taken from `parent` (`None` for the start state).
    pub action: Option<A>,
}

impl<S, A> ParentLink<S, A> {
    /// The start-state sentinel.
    #[must_use]
    pub fn root() -> Self {
        Self {
            parent: None,
            action: None,
        }
    }

    #[must_use]
    pub fn new(parent: S, action: A) -> Self {
        Self {
            parent: Some(parent),
            action: Some(action),
        }
    }

    /// Whether this is the start-state sentinel.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// The frontier ordering key: `(priority, sequence)`.
///
/// Lower priority first, then older insertion sequence. Priorities are
/// compared with [`f64::total_cmp`], so the order is total even for values
/// a misbehaving heuristic might produce.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub priority: f64,
    pub sequence: u64,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.sequence.cmp(&other.sequence))
    }
}
