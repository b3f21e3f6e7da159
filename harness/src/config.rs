//! Benchmark configuration, loadable from TOML.
//!
//! Every field has a default, so an empty file is a valid config:
//!
//! ```toml
//! sizes = [10, 100, 1000]
//! walk_cost = 1.0
//! tram_cost = 2.0
//! algorithms = ["ucs", "astar"]
//! repeats = 1
//! max_expansions = 10000000
//! ```

use std::path::Path;

use pathwise_search::policy::DEFAULT_MAX_EXPANSIONS;
use pathwise_search::{Algorithm, SearchPolicy};
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;
use crate::runner::parse_algorithm;
use crate::worlds::tram::TramCosts;

/// Settings for a tram benchmark sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// World sizes `n` to sweep.
    pub sizes: Vec<u64>,
    pub walk_cost: f64,
    pub tram_cost: f64,
    /// Algorithm names, parsed with [`parse_algorithm`].
    pub algorithms: Vec<String>,
    /// Trials per (size, algorithm) pair.
    pub repeats: u32,
    pub max_expansions: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        let costs = TramCosts::default();
        Self {
            sizes: vec![10, 100, 1000],
            walk_cost: costs.walk,
            tram_cost: costs.tram,
            algorithms: vec!["ucs".to_string(), "astar".to_string()],
            repeats: 1,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

impl BenchConfig {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// [`HarnessError::Config`] on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, HarnessError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML config file.
    ///
    /// # Errors
    ///
    /// [`HarnessError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    #[must_use]
    pub fn costs(&self) -> TramCosts {
        TramCosts {
            walk: self.walk_cost,
            tram: self.tram_cost,
        }
    }

    /// Resolved algorithm list, in config order.
    ///
    /// # Errors
    ///
    /// [`HarnessError::UnknownAlgorithm`] on the first bad name.
    pub fn algorithms(&self) -> Result<Vec<Algorithm>, HarnessError> {
        self.algorithms.iter().map(|name| parse_algorithm(name)).collect()
    }

    /// Untraced engine policy carrying this config's expansion cap.
    #[must_use]
    pub fn policy(&self) -> SearchPolicy {
        SearchPolicy::with_max_expansions(self.max_expansions)
    }
}
