//! Tram world: engine answers agree with the dynamic-programming optimum.

use pathwise_harness::runner::run_algorithm;
use pathwise_harness::worlds::tram::{TramAction, TramCosts, TransportationProblem};
use pathwise_search::{astar, bfs, dfs, ucs, Algorithm, SearchPolicy, SearchProblem};

const EPS: f64 = 1e-9;

fn tram(n: u64, walk: f64, tram: f64) -> TransportationProblem {
    TransportationProblem::new(n, TramCosts { walk, tram }).unwrap()
}

/// Replay a plan from the start and return the final state and its cost.
fn replay(world: &TransportationProblem, actions: &[TramAction]) -> (u64, f64) {
    let mut state = world.start_state();
    let mut cost = 0.0;
    for action in actions {
        let edge = world
            .successors(&state)
            .into_iter()
            .find(|e| e.action == *action)
            .unwrap_or_else(|| panic!("{action} is not legal from {state}"));
        cost += edge.cost;
        state = edge.next;
    }
    (state, cost)
}

#[test]
fn n10_default_costs_optimum_is_six() {
    let world = tram(10, 1.0, 2.0);
    let (dp_cost, dp_plan) = world.shortest_cost_dp();
    assert!((dp_cost - 6.0).abs() < EPS);

    let policy = SearchPolicy::default();
    let u = ucs(&world, &policy).unwrap();
    let a = astar(&world, &|s: &u64| world.admissible_heuristic(s), &policy).unwrap();
    assert!((u.cost - 6.0).abs() < EPS);
    assert!((a.cost - 6.0).abs() < EPS);

    let dp_actions: Vec<TramAction> = dp_plan.iter().map(|e| e.action).collect();
    assert!((replay(&world, &dp_actions).1 - 6.0).abs() < EPS);
    assert_eq!(replay(&world, &u.actions), (10, u.cost));
    assert_eq!(replay(&world, &a.actions), (10, a.cost));
}

#[test]
fn ucs_and_astar_match_dp_across_sizes_and_prices() {
    let prices = [(1.0, 2.0), (1.0, 1.0), (3.0, 0.5), (0.0, 1.0), (2.0, 7.0)];
    let policy = SearchPolicy::default();
    for (walk, tram_cost) in prices {
        for n in 1..=80 {
            let world = tram(n, walk, tram_cost);
            let (dp_cost, _) = world.shortest_cost_dp();
            for algorithm in [Algorithm::Ucs, Algorithm::Astar] {
                let result = run_algorithm(&world, algorithm, &policy).unwrap();
                assert!(
                    (result.cost - dp_cost).abs() < EPS,
                    "{algorithm} n={n} walk={walk} tram={tram_cost}: {} vs dp {dp_cost}",
                    result.cost
                );
                assert_eq!(result.goal(), Some(&n));
            }
        }
    }
}

#[test]
fn astar_expands_no_more_than_ucs() {
    let world = tram(500, 1.0, 2.0);
    let policy = SearchPolicy::default();
    let u = ucs(&world, &policy).unwrap();
    let a = astar(&world, &|s: &u64| world.admissible_heuristic(s), &policy).unwrap();
    assert!(a.stats.expanded <= u.stats.expanded);
}

#[test]
fn bfs_returns_minimum_action_count() {
    let policy = SearchPolicy::default();
    for n in 1..=120 {
        let unit = tram(n, 1.0, 1.0);
        let (fewest, _) = unit.shortest_cost_dp();
        // BFS ignores prices, so run it on the default-priced world.
        let result = bfs(&tram(n, 1.0, 2.0), &policy).unwrap();
        assert!((result.cost - fewest).abs() < EPS, "n={n}");
        assert_eq!(result.plan_len() as f64, result.cost);
    }
}

#[test]
fn dfs_plan_is_legal_but_not_necessarily_optimal() {
    let world = tram(100, 1.0, 2.0);
    let result = dfs(&world, &SearchPolicy::default()).unwrap();
    let (end, _) = replay(&world, &result.actions);
    assert_eq!(end, 100);
    assert_eq!(result.plan_len() as f64, result.cost);
    assert_eq!(result.states.len(), result.plan_len() + 1);
}
