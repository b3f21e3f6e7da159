//! Typed search errors.
//!
//! Both variants are fatal to the call and carry no partial result. They are
//! kept distinct so callers can tell "gave up due to budget" from "provably
//! unreachable within the explored space".

use crate::result::Algorithm;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The expansion cap was reached before a goal was found.
    #[error("{algorithm} exceeded max_expansions ({max_expansions}) before reaching a goal")]
    ResourceExhausted {
        algorithm: Algorithm,
        max_expansions: u64,
    },
    /// The frontier emptied without ever reaching a goal.
    #[error("no solution found ({algorithm}) after {expanded} expansions")]
    NoSolution { algorithm: Algorithm, expanded: u64 },
}

impl SearchError {
    /// The algorithm that failed.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::ResourceExhausted { algorithm, .. } | Self::NoSolution { algorithm, .. } => {
                *algorithm
            }
        }
    }

    /// `true` for budget exhaustion, `false` for unreachability.
    #[must_use]
    pub fn is_resource_exhausted(&self) -> bool {
        matches!(self, Self::ResourceExhausted { .. })
    }
}
