//! Harness error type.

use pathwise_search::SearchError;

/// Error from a harness operation.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// The engine failed (budget exhausted or no solution).
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    /// An algorithm name did not match any known algorithm.
    #[error("unknown algorithm: {name}")]
    UnknownAlgorithm { name: String },
    /// An exporter was given a result without a trace.
    #[error("search result carries no trace; rerun with tracing enabled")]
    MissingTrace,
    /// A world was constructed with invalid parameters.
    #[error("invalid problem: {detail}")]
    InvalidProblem { detail: String },
}
