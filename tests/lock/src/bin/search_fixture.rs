//! Binary that runs traced searches on fixed worlds and prints
//! deterministic output lines for cross-process verification.
//!
//! Usage: `search_fixture`
//!
//! Output: `key=value` lines. Wall-clock time is deliberately absent.

use std::collections::BTreeMap;
use std::fmt::Display;

use pathwise_harness::contract::SearchWorld;
use pathwise_harness::export::trace_digest;
use pathwise_harness::runner::run_algorithm;
use pathwise_harness::worlds::graph::random_graph;
use pathwise_harness::worlds::tram::{TramCosts, TransportationProblem};
use pathwise_search::{Algorithm, SearchPolicy, TraceMode};

fn report<W>(label: &str, world: &W, policy: &SearchPolicy, lines: &mut BTreeMap<String, String>)
where
    W: SearchWorld,
    W::State: Display,
    W::Action: Display,
{
    for algorithm in Algorithm::ALL {
        let result = run_algorithm(world, algorithm, policy).expect("fixture search failed");
        let digest = trace_digest(&result).expect("fixture result is traced");
        let plan: Vec<String> = result.actions.iter().map(ToString::to_string).collect();
        let key = format!("{label}.{algorithm}");
        lines.insert(format!("{key}.cost"), result.cost.to_string());
        lines.insert(format!("{key}.plan"), plan.join(","));
        lines.insert(format!("{key}.expanded"), result.stats.expanded.to_string());
        lines.insert(format!("{key}.generated"), result.stats.generated.to_string());
        lines.insert(format!("{key}.reopens"), result.stats.reopens.to_string());
        lines.insert(format!("{key}.max_frontier"), result.stats.max_frontier.to_string());
        lines.insert(format!("{key}.trace_digest"), digest);
    }
}

fn main() {
    let policy = SearchPolicy::default().traced(TraceMode::ExpansionsAndEdges { max_edges: 10_000 });
    let mut lines = BTreeMap::new();

    let tram = TransportationProblem::new(200, TramCosts::default()).expect("valid tram world");
    report("tram", &tram, &policy, &mut lines);

    let graph = random_graph(40, 42).expect("valid graph size");
    let heuristic = graph.inconsistent_heuristic(42);
    let graph = graph.with_heuristic(heuristic).expect("heuristic matches node count");
    report("graph", &graph, &policy, &mut lines);

    for (key, value) in lines {
        println!("{key}={value}");
    }
}
