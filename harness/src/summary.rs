//! Plain-text result summary.

use std::fmt::{Display, Write as _};

use pathwise_search::SearchResult;

/// Show at most this many plan actions before eliding.
const MAX_PLAN_ACTIONS: usize = 30;

/// Multi-line human-readable summary of a result.
///
/// Works on traced and untraced results alike; trace sizes are appended
/// when a trace is present.
#[must_use]
pub fn render_summary<S: Display, A: Display>(result: &SearchResult<S, A>) -> String {
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = writeln!(out, "algorithm    {}", result.algorithm);
    let _ = writeln!(out, "cost         {}", result.cost);
    let _ = writeln!(out, "plan_len     {}", result.plan_len());
    if let (Some(start), Some(goal)) = (result.states.first(), result.goal()) {
        let _ = writeln!(out, "route        {start} -> {goal}");
    }
    let shown: Vec<String> = result
        .actions
        .iter()
        .take(MAX_PLAN_ACTIONS)
        .map(ToString::to_string)
        .collect();
    let elided = result.actions.len().saturating_sub(MAX_PLAN_ACTIONS);
    if elided == 0 {
        let _ = writeln!(out, "plan         [{}]", shown.join(", "));
    } else {
        let _ = writeln!(out, "plan         [{}, ... +{elided}]", shown.join(", "));
    }
    let _ = writeln!(out, "expanded     {}", result.stats.expanded);
    let _ = writeln!(out, "generated    {}", result.stats.generated);
    let _ = writeln!(out, "reopens      {}", result.stats.reopens);
    let _ = writeln!(out, "max_frontier {}", result.stats.max_frontier);
    let _ = writeln!(out, "runtime_sec  {:.6}", result.runtime_secs());
    if let Some(trace) = &result.trace {
        let _ = writeln!(
            out,
            "trace        {} discovered, {} expansions recorded",
            trace.parent.len(),
            trace.expansions.len()
        );
        if let Some(edges) = &trace.edges {
            let _ = writeln!(
                out,
                "edges        {} captured, {} dropped",
                edges.len(),
                trace.edges_dropped
            );
        }
    }
    out
}
