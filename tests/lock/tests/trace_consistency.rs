//! Trace snapshots agree with the result they came from.

use std::collections::{BTreeMap, HashSet};

use pathwise_harness::export::trace_records;
use pathwise_harness::runner::run_algorithm;
use pathwise_harness::worlds::graph::{random_graph, WeightedGraph};
use pathwise_harness::worlds::tram::{TramCosts, TransportationProblem};
use pathwise_search::{Algorithm, SearchPolicy, SearchProblem, TraceMode};

#[test]
fn expansions_parents_and_path_line_up() {
    let world = TransportationProblem::new(150, TramCosts::default()).unwrap();
    let policy = SearchPolicy::default().traced(TraceMode::Expansions);
    for algorithm in Algorithm::ALL {
        let result = run_algorithm(&world, algorithm, &policy).unwrap();
        let trace = result.trace.as_ref().unwrap();

        assert_eq!(trace.expansions.len() as u64, result.stats.expanded, "{algorithm}");
        for state in &trace.expansions {
            assert!(trace.parent.contains_key(state), "{algorithm}: {state} expanded but undiscovered");
            assert!(trace.g.contains_key(state), "{algorithm}: {state} has no g");
        }
        assert_eq!(trace.expansions.first(), Some(&world.start_state()));

        let goal = result.goal().unwrap();
        assert_eq!(trace.path_to(goal).as_ref(), Some(&result.states), "{algorithm}");
        assert!(trace.edges.is_none());
    }
}

#[test]
fn g_values_on_the_path_accumulate_edge_costs() {
    let graph = random_graph(25, 11).unwrap();
    let policy = SearchPolicy::default().traced(TraceMode::Expansions);
    for algorithm in [Algorithm::Ucs, Algorithm::Astar] {
        let result = run_algorithm(&graph, algorithm, &policy).unwrap();
        let trace = result.trace.as_ref().unwrap();
        let mut g = 0.0;
        for pair in result.states.windows(2) {
            let step = graph
                .successors(&pair[0])
                .into_iter()
                .filter(|e| e.next == pair[1])
                .map(|e| e.cost)
                .fold(f64::INFINITY, f64::min);
            g += step;
            assert_eq!(trace.g.get(&pair[1]).copied(), Some(g), "{algorithm}");
        }
        assert_eq!(g, result.cost);
    }
}

#[test]
fn edge_capture_respects_cap_and_counts_drops() {
    let world = TransportationProblem::new(200, TramCosts::default()).unwrap();
    for cap in [0usize, 1, 10, 1_000_000] {
        let policy = SearchPolicy::default().traced(TraceMode::ExpansionsAndEdges { max_edges: cap });
        let result = run_algorithm(&world, Algorithm::Ucs, &policy).unwrap();
        let trace = result.trace.as_ref().unwrap();
        let edges = trace.edges.as_ref().unwrap();
        let generated = result.stats.generated;
        assert_eq!(edges.len() as u64, generated.min(cap as u64), "cap {cap}");
        assert_eq!(edges.len() as u64 + trace.edges_dropped, generated, "cap {cap}");
        for edge in edges {
            assert!(trace.was_expanded(&edge.from));
        }
    }
}

#[test]
fn disabled_tracing_yields_no_trace() {
    let world = TransportationProblem::new(50, TramCosts::default()).unwrap();
    for algorithm in Algorithm::ALL {
        let result = run_algorithm(&world, algorithm, &SearchPolicy::default()).unwrap();
        assert!(result.trace.is_none(), "{algorithm}");
    }
}

#[test]
fn expand_records_use_the_cost_and_parent_of_that_expansion() {
    // 2 is closed at g=4 via 0, then reopened at g=2 via 1.
    let mut graph = WeightedGraph::new(4, 0, 3).unwrap();
    graph.add_edge(0, 1, 1.0).unwrap();
    graph.add_edge(0, 2, 4.0).unwrap();
    graph.add_edge(1, 2, 1.0).unwrap();
    graph.add_edge(2, 3, 5.0).unwrap();
    let graph = graph.with_heuristic(vec![0.0, 6.0, 0.0, 0.0]).unwrap();

    let policy = SearchPolicy::default().traced(TraceMode::Expansions);
    let result = run_algorithm(&graph, Algorithm::Astar, &policy).unwrap();
    let records = trace_records(&result, &BTreeMap::new()).unwrap();
    let expands: Vec<_> = records.iter().filter(|r| r["type"] == "expand").collect();

    let order: Vec<&str> = expands.iter().map(|r| r["state"].as_str().unwrap()).collect();
    assert_eq!(order, ["0", "2", "1", "2", "3"]);
    assert_eq!(expands[1]["g"], 4.0);
    assert_eq!(expands[1]["parent"], "0");
    assert_eq!(expands[3]["g"], 2.0);
    assert_eq!(expands[3]["parent"], "1");
    assert_eq!(expands[4]["g"], 7.0);

    let mut expanded = HashSet::new();
    for record in &expands {
        if let Some(parent) = record["parent"].as_str() {
            assert!(expanded.contains(parent), "{record} names an unexpanded parent");
        }
        expanded.insert(record["state"].as_str().unwrap());
    }
}
