//! Exported artifacts keep their schema envelope: trace streams are framed
//! by header and finish records, bench rows carry version fields, and the
//! CSV header is stable.

use std::collections::BTreeMap;

use pathwise_harness::bench::{benchmark_tram_search, write_csv, write_jsonl, BENCH_SCHEMA_VERSION};
use pathwise_harness::config::BenchConfig;
use pathwise_harness::dot::{render_dot, DotOptions};
use pathwise_harness::export::{trace_digest, write_trace_jsonl_file, TRACE_SCHEMA_VERSION};
use pathwise_harness::html::{render_html, viewer_data, HtmlOptions};
use pathwise_harness::runner::run_algorithm;
use pathwise_harness::summary::render_summary;
use pathwise_harness::worlds::tram::{TramCosts, TransportationProblem};
use pathwise_harness::{HarnessError, TOOLKIT_VERSION};
use pathwise_search::{Algorithm, SearchPolicy, TraceMode};
use serde_json::{json, Value};

fn read_lines(path: &std::path::Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn trace_jsonl_header_first_finish_last() {
    let world = TransportationProblem::new(10, TramCosts::default()).unwrap();
    let policy = SearchPolicy::default().traced(TraceMode::ExpansionsAndEdges { max_edges: 1_000 });
    let result = run_algorithm(&world, Algorithm::Astar, &policy).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.jsonl");
    let context = BTreeMap::from([
        ("domain".to_string(), json!("tram")),
        ("algo".to_string(), json!("astar")),
        ("N".to_string(), json!(10)),
    ]);
    let digest = write_trace_jsonl_file(&result, &context, &path).unwrap();
    let records = read_lines(&path);

    let header = &records[0];
    assert_eq!(header["type"], "header");
    assert_eq!(header["trace_schema"], TRACE_SCHEMA_VERSION);
    assert!(header.get("result_schema").is_some());
    assert_eq!(header["toolkit_version"], TOOLKIT_VERSION);
    assert_eq!(header["context"]["domain"], "tram");

    let finish = records.last().unwrap();
    assert_eq!(finish["type"], "finish");
    assert_eq!(finish["trace_digest"], digest.as_str());
    assert_eq!(finish["expanded"], result.stats.expanded);
    assert_eq!(digest, trace_digest(&result).unwrap());

    let middle = &records[1..records.len() - 1];
    assert!(middle.iter().all(|r| r["type"] == "expand" || r["type"] == "edge"));
    let first_edge = middle.iter().position(|r| r["type"] == "edge").unwrap();
    assert!(middle[first_edge..].iter().all(|r| r["type"] == "edge"));
}

#[test]
fn renderers_share_the_missing_trace_error() {
    let world = TransportationProblem::new(10, TramCosts::default()).unwrap();
    let result = run_algorithm(&world, Algorithm::Ucs, &SearchPolicy::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        write_trace_jsonl_file(&result, &BTreeMap::new(), &dir.path().join("t.jsonl")),
        Err(HarnessError::MissingTrace)
    ));
    assert!(matches!(
        render_dot(&result, &DotOptions::default()),
        Err(HarnessError::MissingTrace)
    ));
    assert!(matches!(
        render_html(&result, &BTreeMap::new(), &HtmlOptions::default()),
        Err(HarnessError::MissingTrace)
    ));
    // The text summary needs no trace.
    assert!(render_summary(&result).contains("algorithm    ucs"));
}

#[test]
fn bench_rows_have_schema_envelope() {
    let config = BenchConfig::from_toml_str("sizes = [8]\nrepeats = 1\n").unwrap();
    let rows = benchmark_tram_search(&config).unwrap();
    assert_eq!(rows.len(), 2);

    let mut buf = Vec::new();
    write_jsonl(&rows, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let first: Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
    for key in ["schema_version", "toolkit_version", "timestamp_utc", "trial", "seed", "domain", "algo", "params", "metrics"] {
        assert!(first.get(key).is_some(), "missing {key}");
    }
    assert_eq!(first["schema_version"], BENCH_SCHEMA_VERSION);
    assert_eq!(first["metrics"]["optimality_gap"], 0.0);
}

#[test]
fn bench_csv_header_is_stable() {
    let config = BenchConfig::from_toml_str("sizes = [8, 16]\nalgorithms = [\"bfs\", \"a*\"]\n").unwrap();
    let mut first = Vec::new();
    let mut second = Vec::new();
    write_csv(&benchmark_tram_search(&config).unwrap(), &mut first).unwrap();
    write_csv(&benchmark_tram_search(&config).unwrap(), &mut second).unwrap();

    let header = |bytes: &[u8]| String::from_utf8(bytes.to_vec()).unwrap().lines().next().unwrap().to_string();
    assert_eq!(header(&first), header(&second));
    assert!(header(&first).starts_with("schema_version,toolkit_version,timestamp_utc,domain,algo,trial,seed,param."));
    assert_eq!(String::from_utf8(first).unwrap().lines().count(), 5);
}

#[test]
fn dot_and_html_render_from_one_trace() {
    let world = TransportationProblem::new(20, TramCosts::default()).unwrap();
    let policy = SearchPolicy::default().traced(TraceMode::Expansions);
    let result = run_algorithm(&world, Algorithm::Astar, &policy).unwrap();
    let dot = render_dot(&result, &DotOptions::default()).unwrap();
    let html = render_html(&result, &BTreeMap::new(), &HtmlOptions::titled("tram")).unwrap();
    assert!(dot.contains("digraph Search"));
    assert!(html.contains(&trace_digest(&result).unwrap()));
}

#[test]
fn html_viewer_embeds_edges_within_caps() {
    let world = TransportationProblem::new(300, TramCosts::default()).unwrap();
    let policy = SearchPolicy::default().traced(TraceMode::ExpansionsAndEdges { max_edges: 100_000 });
    let result = run_algorithm(&world, Algorithm::Ucs, &policy).unwrap();

    let full = viewer_data(&result, &BTreeMap::new(), &HtmlOptions::default()).unwrap();
    assert_eq!(full["meta"]["edges_kept"], result.stats.generated);
    assert_eq!(full["edges"][0]["src"], "1");

    let capped = HtmlOptions {
        max_nodes: 10,
        max_edges: 5,
        ..HtmlOptions::default()
    };
    let data = viewer_data(&result, &BTreeMap::new(), &capped).unwrap();
    let kept = data["meta"]["nodes_kept"].as_u64().unwrap();
    assert!(kept as usize >= result.states.len());
    assert!(kept as usize <= capped.max_nodes.max(result.states.len()));
    assert!(data["meta"]["edges_kept"].as_u64().unwrap() <= 5);
    assert_eq!(data["solution"].as_array().unwrap().len(), result.states.len());
}
