//! Search worlds driven by the harness.

pub mod graph;
pub mod tram;

pub use graph::{random_graph, WeightedGraph};
pub use tram::{TramAction, TramCosts, TransportationProblem};
