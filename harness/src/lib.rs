//! Pathwise Harness: domains and consumers of the search engine.
//!
//! The harness drives `pathwise_search` against concrete worlds and turns
//! its results into benchmark rows, trace streams and renderings.
//!
//! The harness does NOT implement search; it calls the engine's entry
//! points. Worlds provide state spaces and reference optima only; the
//! runner owns dispatch.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bench;
pub mod config;
pub mod contract;
pub mod dot;
pub mod error;
pub mod export;
pub mod html;
pub mod runner;
pub mod summary;
pub mod worlds;

pub use error::HarnessError;

/// Version string stamped into every exported artifact.
pub const TOOLKIT_VERSION: &str = env!("CARGO_PKG_VERSION");
