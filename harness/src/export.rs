//! JSON-lines trace export.
//!
//! A trace stream is one `header` record, one `expand` record per
//! expansion in pop order, one `edge` record per captured edge, and one
//! `finish` record. States and actions are written with their `Display`
//! form so any domain can be exported.
//!
//! The `finish` record carries `trace_digest`: sha256 over the serialized
//! `expand` and `edge` lines. Two runs that explored identically have the
//! same digest regardless of timing or context.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Display;
use std::fs::File;
use std::hash::Hash;
use std::io::{BufWriter, Write};
use std::path::Path;

use pathwise_search::{SearchResult, SearchTrace};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::error::HarnessError;
use crate::TOOLKIT_VERSION;

/// Version of the trace record layout.
pub const TRACE_SCHEMA_VERSION: &str = "2.0";
/// Version of the result summary embedded in `finish`.
pub const RESULT_SCHEMA_VERSION: &str = "2.0";

/// Borrow the trace, or fail with [`HarnessError::MissingTrace`].
pub(crate) fn require_trace<S, A>(
    result: &SearchResult<S, A>,
) -> Result<&SearchTrace<S, A>, HarnessError> {
    result.trace.as_ref().ok_or(HarnessError::MissingTrace)
}

/// States a bounded renderer draws: the whole solution path, then
/// discovered states in discovery order until `max_nodes` is reached.
pub(crate) fn kept_states<'a, S, A>(
    result: &'a SearchResult<S, A>,
    trace: &'a SearchTrace<S, A>,
    max_nodes: usize,
) -> HashSet<&'a S>
where
    S: Eq + Hash,
{
    let mut keep: HashSet<&S> = result.states.iter().collect();
    for state in trace.parent.keys() {
        if keep.len() >= max_nodes {
            break;
        }
        keep.insert(state);
    }
    keep
}

/// All records of the trace stream, header first and finish last.
///
/// `context` is copied verbatim into the header (domain, algorithm,
/// instance parameters, whatever the caller wants to keep with the trace).
///
/// # Errors
///
/// [`HarnessError::MissingTrace`] if the result was produced untraced.
pub fn trace_records<S, A>(
    result: &SearchResult<S, A>,
    context: &BTreeMap<String, Value>,
) -> Result<Vec<Value>, HarnessError>
where
    S: Display + Eq + Hash,
    A: Display,
{
    let trace = require_trace(result)?;
    let body = body_records(trace);
    let digest = digest_records(&body);

    let mut records = Vec::with_capacity(body.len() + 2);
    records.push(json!({
        "type": "header",
        "trace_schema": TRACE_SCHEMA_VERSION,
        "result_schema": RESULT_SCHEMA_VERSION,
        "toolkit_version": TOOLKIT_VERSION,
        "context": context,
    }));
    records.extend(body);
    records.push(json!({
        "type": "finish",
        "schema_version": RESULT_SCHEMA_VERSION,
        "algorithm": result.algorithm.as_str(),
        "cost": result.cost,
        "plan": result.actions.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "states": result.states.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "expanded": result.stats.expanded,
        "generated": result.stats.generated,
        "reopens": result.stats.reopens,
        "max_frontier": result.stats.max_frontier,
        "discovered": trace.parent.len(),
        "edges_dropped": trace.edges_dropped,
        "runtime_sec": result.runtime_secs(),
        "trace_digest": digest,
    }));
    Ok(records)
}

/// Digest of the exploration alone (`sha256:<hex>`).
///
/// # Errors
///
/// [`HarnessError::MissingTrace`] if the result was produced untraced.
pub fn trace_digest<S, A>(result: &SearchResult<S, A>) -> Result<String, HarnessError>
where
    S: Display + Eq + Hash,
    A: Display,
{
    let trace = require_trace(result)?;
    Ok(digest_records(&body_records(trace)))
}

/// Write the trace stream to `out`. Returns the trace digest.
///
/// # Errors
///
/// Missing trace, serialization or I/O failure.
pub fn write_trace_jsonl<S, A, W>(
    result: &SearchResult<S, A>,
    context: &BTreeMap<String, Value>,
    mut out: W,
) -> Result<String, HarnessError>
where
    S: Display + Eq + Hash,
    A: Display,
    W: Write,
{
    let records = trace_records(result, context)?;
    for record in &records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    let digest = records
        .last()
        .and_then(|finish| finish.get("trace_digest"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Ok(digest)
}

/// [`write_trace_jsonl`] into a new file at `path`.
///
/// # Errors
///
/// As [`write_trace_jsonl`], plus failure to create the file.
pub fn write_trace_jsonl_file<S, A>(
    result: &SearchResult<S, A>,
    context: &BTreeMap<String, Value>,
    path: &Path,
) -> Result<String, HarnessError>
where
    S: Display + Eq + Hash,
    A: Display,
{
    let file = File::create(path)?;
    write_trace_jsonl(result, context, BufWriter::new(file))
}

fn body_records<S, A>(trace: &SearchTrace<S, A>) -> Vec<Value>
where
    S: Display + Eq + Hash,
    A: Display,
{
    let mut records = Vec::with_capacity(
        trace.expansions.len() + trace.edges.as_ref().map_or(0, Vec::len),
    );
    for (idx, (state, step)) in trace.expansion_steps().enumerate() {
        let parent = step
            .link
            .parent
            .as_ref()
            .map_or(Value::Null, |p| Value::String(p.to_string()));
        let action = step
            .link
            .action
            .as_ref()
            .map_or(Value::Null, |a| Value::String(a.to_string()));
        records.push(json!({
            "type": "expand",
            "idx": idx,
            "state": state.to_string(),
            "g": step.g,
            "parent": parent,
            "action": action,
        }));
    }
    if let Some(edges) = &trace.edges {
        for edge in edges {
            records.push(json!({
                "type": "edge",
                "src": edge.from.to_string(),
                "dst": edge.to.to_string(),
                "action": edge.action.to_string(),
                "cost": edge.cost,
            }));
        }
    }
    records
}

fn digest_records(records: &[Value]) -> String {
    let mut hasher = Sha256::new();
    for record in records {
        hasher.update(record.to_string().as_bytes());
        hasher.update(b"\n");
    }
    format!("sha256:{}", hex::encode(hasher.finalize()))
}
