//! Benchmark rows and their JSON-lines / CSV writers.
//!
//! One row is one search call: the world's parameters, the engine's
//! counters, and the gap to the world's independently computed optimum.
//! Rows are versioned by [`BENCH_SCHEMA_VERSION`].

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{SecondsFormat, Utc};
use pathwise_search::{Algorithm, SearchPolicy, SearchResult};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::BenchConfig;
use crate::contract::SearchWorld;
use crate::error::HarnessError;
use crate::runner::run_algorithm;
use crate::worlds::tram::TransportationProblem;
use crate::TOOLKIT_VERSION;

/// Schema version stamped into every benchmark row.
pub const BENCH_SCHEMA_VERSION: &str = "2.0";

/// Counters and costs from one search call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchMetrics {
    pub cost: f64,
    pub plan_len: usize,
    pub expanded: u64,
    pub generated: u64,
    pub reopens: u64,
    pub max_frontier: usize,
    pub runtime_sec: f64,
    /// Optimum from the world's reference solver, if it has one.
    pub dp_opt_cost: Option<f64>,
    /// `cost - dp_opt_cost`. Zero for optimal algorithms.
    pub optimality_gap: Option<f64>,
}

/// A single benchmark observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRow {
    pub schema_version: String,
    pub toolkit_version: String,
    /// RFC 3339 UTC time the row was produced, to the second.
    pub timestamp_utc: String,
    pub domain: String,
    pub algo: String,
    pub trial: u32,
    /// Generator seed for randomized worlds.
    pub seed: Option<u64>,
    pub params: BTreeMap<String, serde_json::Value>,
    pub metrics: BenchMetrics,
}

impl BenchmarkRow {
    /// Build a row from a finished search on `world`.
    #[must_use]
    pub fn from_result<W: SearchWorld>(
        world: &W,
        trial: u32,
        reference_cost: Option<f64>,
        result: &SearchResult<W::State, W::Action>,
    ) -> Self {
        let params = world.params();
        let seed = params.get("seed").and_then(serde_json::Value::as_u64);
        Self {
            schema_version: BENCH_SCHEMA_VERSION.to_string(),
            toolkit_version: TOOLKIT_VERSION.to_string(),
            timestamp_utc: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            domain: world.domain().to_string(),
            algo: result.algorithm.as_str().to_string(),
            trial,
            seed,
            params,
            metrics: BenchMetrics {
                cost: result.cost,
                plan_len: result.plan_len(),
                expanded: result.stats.expanded,
                generated: result.stats.generated,
                reopens: result.stats.reopens,
                max_frontier: result.stats.max_frontier,
                runtime_sec: result.runtime_secs(),
                dp_opt_cost: reference_cost,
                optimality_gap: reference_cost.map(|opt| result.cost - opt),
            },
        }
    }
}

/// Run every algorithm `repeats` times on `world`.
///
/// Rows come out trial-major: all algorithms for trial 0, then trial 1.
///
/// # Errors
///
/// The first engine failure aborts the sweep.
pub fn benchmark_world<W: SearchWorld>(
    world: &W,
    algorithms: &[Algorithm],
    repeats: u32,
    policy: &SearchPolicy,
) -> Result<Vec<BenchmarkRow>, HarnessError> {
    let reference = world.reference_cost();
    let mut rows = Vec::with_capacity(algorithms.len() * repeats as usize);
    for trial in 0..repeats {
        for &algorithm in algorithms {
            let result = run_algorithm(world, algorithm, policy)?;
            rows.push(BenchmarkRow::from_result(world, trial, reference, &result));
        }
    }
    Ok(rows)
}

/// Sweep the tram world over `config.sizes`.
///
/// # Errors
///
/// Invalid sizes, costs or algorithm names, or an engine failure.
pub fn benchmark_tram_search(config: &BenchConfig) -> Result<Vec<BenchmarkRow>, HarnessError> {
    let algorithms = config.algorithms()?;
    let policy = config.policy();
    let mut rows = Vec::new();
    for &n in &config.sizes {
        let world = TransportationProblem::new(n, config.costs())?;
        let mut batch = benchmark_world(&world, &algorithms, config.repeats, &policy)?;
        info!(n, rows = batch.len(), "tram benchmark size complete");
        rows.append(&mut batch);
    }
    Ok(rows)
}

/// Write rows as JSON lines with object keys sorted.
///
/// # Errors
///
/// Serialization or I/O failure.
pub fn write_jsonl<W: Write>(rows: &[BenchmarkRow], mut out: W) -> Result<(), HarnessError> {
    for row in rows {
        // Round-tripping through `Value` sorts keys at every level.
        let value = serde_json::to_value(row)?;
        serde_json::to_writer(&mut out, &value)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Write rows as flat CSV.
///
/// Columns: the envelope fields, then every `param.*` key and every
/// `metric.*` key seen across `rows`, each group sorted. Missing values and
/// nulls are empty cells.
///
/// # Errors
///
/// Serialization or I/O failure.
pub fn write_csv<W: Write>(rows: &[BenchmarkRow], out: W) -> Result<(), HarnessError> {
    let flat: Vec<(&BenchmarkRow, BTreeMap<String, serde_json::Value>)> = rows
        .iter()
        .map(|row| Ok((row, flatten_object(serde_json::to_value(&row.metrics)?))))
        .collect::<Result<_, serde_json::Error>>()?;

    let param_keys: std::collections::BTreeSet<&String> =
        rows.iter().flat_map(|row| row.params.keys()).collect();
    let metric_keys: std::collections::BTreeSet<&String> =
        flat.iter().flat_map(|(_, metrics)| metrics.keys()).collect();

    let mut writer = csv::Writer::from_writer(out);
    let mut header: Vec<String> = ENVELOPE_COLUMNS.iter().map(ToString::to_string).collect();
    header.extend(param_keys.iter().map(|k| format!("param.{k}")));
    header.extend(metric_keys.iter().map(|k| format!("metric.{k}")));
    writer.write_record(&header)?;

    for (row, metrics) in &flat {
        let mut record = vec![
            row.schema_version.clone(),
            row.toolkit_version.clone(),
            row.timestamp_utc.clone(),
            row.domain.clone(),
            row.algo.clone(),
            row.trial.to_string(),
            row.seed.map(|s| s.to_string()).unwrap_or_default(),
        ];
        record.extend(param_keys.iter().map(|k| cell(row.params.get(*k))));
        record.extend(metric_keys.iter().map(|k| cell(metrics.get(*k))));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

const ENVELOPE_COLUMNS: [&str; 7] = [
    "schema_version",
    "toolkit_version",
    "timestamp_utc",
    "domain",
    "algo",
    "trial",
    "seed",
];

fn flatten_object(value: serde_json::Value) -> BTreeMap<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map.into_iter().collect(),
        _ => BTreeMap::new(),
    }
}

fn cell(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
