//! Boundary and failure behavior: start == goal, expansion budgets, and
//! unreachable goals.

use pathwise_harness::runner::run_algorithm;
use pathwise_harness::worlds::graph::WeightedGraph;
use pathwise_harness::worlds::tram::{TramCosts, TransportationProblem};
use pathwise_harness::HarnessError;
use pathwise_search::{astar, Algorithm, SearchError, SearchPolicy, TraceMode};

#[test]
fn start_equal_goal_is_an_empty_plan_everywhere() {
    let world = TransportationProblem::new(1, TramCosts::default()).unwrap();
    let policy = SearchPolicy::default().traced(TraceMode::Expansions);
    for algorithm in Algorithm::ALL {
        let result = run_algorithm(&world, algorithm, &policy).unwrap();
        assert_eq!(result.cost, 0.0, "{algorithm}");
        assert!(result.actions.is_empty(), "{algorithm}");
        assert_eq!(result.states, vec![1], "{algorithm}");
        assert_eq!(result.stats.expanded, 0, "{algorithm}");
        assert_eq!(result.stats.generated, 0, "{algorithm}");
        assert_eq!(result.stats.max_frontier, 1, "{algorithm}");
        let trace = result.trace.unwrap();
        assert_eq!(trace.discovered(), 1);
        assert!(trace.expansions.is_empty());
    }
}

#[test]
fn tiny_budget_is_resource_exhausted_for_every_algorithm() {
    let world = TransportationProblem::new(10_000, TramCosts::default()).unwrap();
    let policy = SearchPolicy::with_max_expansions(5);
    for algorithm in Algorithm::ALL {
        let err = run_algorithm(&world, algorithm, &policy).unwrap_err();
        match err {
            HarnessError::Search(SearchError::ResourceExhausted {
                algorithm: reported,
                max_expansions,
            }) => {
                assert_eq!(reported, algorithm);
                assert_eq!(max_expansions, 5);
            }
            other => panic!("{algorithm}: expected ResourceExhausted, got {other:?}"),
        }
    }
}

#[test]
fn budget_boundary_is_exact() {
    let world = TransportationProblem::new(64, TramCosts::default()).unwrap();
    let heuristic = |s: &u64| world.admissible_heuristic(s);
    let needed = astar(&world, &heuristic, &SearchPolicy::default())
        .unwrap()
        .stats
        .expanded;
    assert!(needed > 1);

    let exact = astar(&world, &heuristic, &SearchPolicy::with_max_expansions(needed)).unwrap();
    assert_eq!(exact.stats.expanded, needed);

    let short = astar(&world, &heuristic, &SearchPolicy::with_max_expansions(needed - 1));
    assert!(matches!(short, Err(e) if e.is_resource_exhausted()));
}

#[test]
fn unreachable_goal_is_no_solution_not_exhaustion() {
    // 0 -> 1 -> 2 and an isolated goal 3.
    let mut graph = WeightedGraph::new(4, 0, 3).unwrap();
    graph.add_edge(0, 1, 1.0).unwrap();
    graph.add_edge(1, 2, 1.0).unwrap();
    graph.add_edge(2, 0, 1.0).unwrap();
    assert_eq!(graph.distances_to_goal()[0], None);

    for algorithm in Algorithm::ALL {
        let err = run_algorithm(&graph, algorithm, &SearchPolicy::default()).unwrap_err();
        match err {
            HarnessError::Search(ref e @ SearchError::NoSolution { expanded, .. }) => {
                assert!(!e.is_resource_exhausted());
                assert_eq!(e.algorithm(), algorithm);
                assert_eq!(expanded, 3, "{algorithm} expands the whole component once");
            }
            other => panic!("{algorithm}: expected NoSolution, got {other:?}"),
        }
    }
}

#[test]
fn error_messages_name_the_algorithm() {
    let world = TransportationProblem::new(10_000, TramCosts::default()).unwrap();
    let err = run_algorithm(&world, Algorithm::Dfs, &SearchPolicy::with_max_expansions(2))
        .unwrap_err();
    let text = err.to_string();
    assert!(text.contains("dfs"), "{text}");
    assert!(text.contains('2'), "{text}");
}
