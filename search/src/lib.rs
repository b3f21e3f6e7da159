//! Pathwise Search: deterministic graph search over abstract state spaces.
//!
//! This crate provides the search engine only. Domains, benchmarks and trace
//! exporters live in `pathwise_harness`, which depends on this crate and never
//! the reverse.
//!
//! # Crate dependency graph
//!
//! ```text
//! pathwise_search  ←  pathwise_harness
//! (engine)            (domains, bench, exporters)
//! ```
//!
//! # Key types
//!
//! - [`SearchProblem`]: capability contract a domain implements
//! - [`Heuristic`]: remaining-cost estimate for A*
//! - [`PriorityFrontier`]: decrease-key queue with lazy deletion
//! - [`SearchPolicy`]: expansion cap and trace configuration
//! - [`SearchResult`] / [`SearchTrace`]: plan, counters, optional trace
//! - [`SearchError`]: budget exhaustion vs. proven unreachability
//!
//! # Entry points
//!
//! [`bfs`], [`dfs`], [`ucs`] and [`astar`]. Each call owns all of its
//! bookkeeping; nothing is shared between invocations.

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod node;
pub mod policy;
pub mod result;
pub mod search;
pub mod trace;

pub use contract::{Edge, SearchProblem};
pub use error::SearchError;
pub use frontier::PriorityFrontier;
pub use heuristic::{Heuristic, ZeroHeuristic};
pub use node::ParentLink;
pub use policy::{SearchPolicy, TraceMode};
pub use result::{Algorithm, ParseAlgorithmError, SearchResult, SearchStats};
pub use search::{astar, bfs, dfs, ucs};
pub use trace::{ExpansionStep, SearchTrace, TraceEdge};
