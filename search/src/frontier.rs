//! Decrease-key priority frontier built on lazy deletion.
//!
//! `BinaryHeap` has no decrease-key. Instead every improvement pushes a fresh
//! entry and a side map records the best live priority per state; heap
//! entries whose priority no longer matches that map are stale and are
//! discarded when they reach the top. Wasted pops are bounded by the number
//! of successful [`PriorityFrontier::update`] calls.
//!
//! Popping a live entry removes the state from the side map. A popped state
//! can therefore be reinserted later at any priority, which is what lets A*
//! reopen a closed state when a cheaper path to it turns up.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use crate::node::FrontierKey;

/// A heap entry wrapping a state with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest priority first, then oldest insertion).
#[derive(Debug)]
struct FrontierEntry<S> {
    key: Reverse<FrontierKey>,
    state: S,
}

impl<S> PartialEq for FrontierEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<S> Eq for FrontierEntry<S> {}

impl<S> PartialOrd for FrontierEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for FrontierEntry<S> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Decrease-key frontier.
///
/// Maintains:
/// - A `BinaryHeap` of `(priority, sequence, state)` entries, possibly stale
/// - A `HashMap` from state to its best live priority
/// - A monotonic insertion sequence used as the tie-break
#[derive(Debug)]
pub struct PriorityFrontier<S> {
    heap: BinaryHeap<FrontierEntry<S>>,
    best: HashMap<S, f64>,
    next_sequence: u64,
    high_water: usize,
    stale_discarded: u64,
}

impl<S: Clone + Eq + Hash> PriorityFrontier<S> {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            best: HashMap::new(),
            next_sequence: 0,
            high_water: 0,
            stale_discarded: 0,
        }
    }

    /// Insert `state`, or lower its priority.
    ///
    /// Pushes iff the state is not tracked or `priority` is strictly lower
    /// than its tracked best. Returns whether a push happened.
    pub fn update(&mut self, state: S, priority: f64) -> bool {
        if let Some(&old) = self.best.get(&state) {
            if priority >= old {
                return false;
            }
        }
        self.best.insert(state.clone(), priority);
        self.heap.push(FrontierEntry {
            key: Reverse(FrontierKey {
                priority,
                sequence: self.next_sequence,
            }),
            state,
        });
        self.next_sequence += 1;
        self.high_water = self.high_water.max(self.best.len());
        true
    }

    /// Pop the live entry with the lowest priority.
    ///
    /// Stale entries met on the way are dropped. The returned state is no
    /// longer tracked. Returns `None` once the heap holds no live entry.
    pub fn pop_min(&mut self) -> Option<(S, f64)> {
        while let Some(FrontierEntry { key, state }) = self.heap.pop() {
            let priority = key.0.priority;
            let live = self
                .best
                .get(&state)
                .is_some_and(|&best| best.total_cmp(&priority).is_eq());
            if live {
                self.best.remove(&state);
                return Some((state, priority));
            }
            self.stale_discarded += 1;
        }
        None
    }

    /// Best tracked priority for `state`, if it is currently live.
    #[must_use]
    pub fn priority_of(&self, state: &S) -> Option<f64> {
        self.best.get(state).copied()
    }

    /// Number of live (tracked) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.best.len()
    }

    /// Whether the frontier has no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// Physical heap size, stale entries included.
    #[must_use]
    pub fn heap_len(&self) -> usize {
        self.heap.len()
    }

    /// High-water mark of the live size.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Stale entries discarded by `pop_min` so far.
    #[must_use]
    pub fn stale_discarded(&self) -> u64 {
        self.stale_discarded
    }
}

impl<S: Clone + Eq + Hash> Default for PriorityFrontier<S> {
    fn default() -> Self {
        Self::new()
    }
}
