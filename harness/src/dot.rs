//! Graphviz DOT rendering of a traced search tree.
//!
//! Nodes are discovered states, edges are the final parent links. Expanded
//! states are boxes, the goal has a double border and solution-path edges
//! are drawn thick. Node ids are discovery indices, so output is stable
//! across runs.
//!
//! ```text
//! dot -Tsvg search.dot -o search.svg
//! ```

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use pathwise_search::SearchResult;

use crate::error::HarnessError;
use crate::export::{kept_states, require_trace};

/// Rendering options.
#[derive(Debug, Clone)]
pub struct DotOptions {
    pub title: String,
    /// Upper bound on rendered nodes. Solution-path states are always kept.
    pub max_nodes: usize,
    /// Append `g=` to node labels.
    pub show_costs: bool,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            title: "search".to_string(),
            max_nodes: 2000,
            show_costs: true,
        }
    }
}

/// Render the result's search tree as a DOT digraph.
///
/// # Errors
///
/// [`HarnessError::MissingTrace`] if the result was produced untraced.
pub fn render_dot<S, A>(result: &SearchResult<S, A>, options: &DotOptions) -> Result<String, HarnessError>
where
    S: Display + Eq + Hash,
    A: Display,
{
    let trace = require_trace(result)?;

    let keep = kept_states(result, trace, options.max_nodes);
    let expanded: HashSet<&S> = trace.expansions.iter().collect();
    let path_edges: HashSet<(&S, &S)> = result
        .states
        .windows(2)
        .map(|pair| (&pair[0], &pair[1]))
        .collect();
    let goal = result.goal();

    let mut out = String::new();
    out.push_str("digraph Search {\n");
    out.push_str("  rankdir=LR;\n");
    out.push_str("  labelloc=\"t\";\n");
    out.push_str(&format!(
        "  label=\"{}\";\n",
        escape(&format!(
            "{} | {} | cost={} | expanded={} | generated={} | reopens={}",
            options.title,
            result.algorithm,
            result.cost,
            result.stats.expanded,
            result.stats.generated,
            result.stats.reopens
        ))
    ));

    for (idx, state) in trace.parent.keys().enumerate() {
        if !keep.contains(state) {
            continue;
        }
        let mut label = escape(&state.to_string());
        if options.show_costs {
            if let Some(g) = trace.g.get(state) {
                label.push_str(&format!("\\ng={g}"));
            }
        }
        let shape = if expanded.contains(state) { "box" } else { "ellipse" };
        let peripheries = if goal == Some(state) { 2 } else { 1 };
        out.push_str(&format!(
            "  n{idx} [label=\"{label}\", shape={shape}, peripheries={peripheries}];\n"
        ));
    }

    for (child, link) in &trace.parent {
        let (Some(parent), Some(action)) = (link.parent.as_ref(), link.action.as_ref()) else {
            continue;
        };
        if !keep.contains(parent) || !keep.contains(child) {
            continue;
        }
        let (Some(from), Some(to)) = (trace.parent.get_index_of(parent), trace.parent.get_index_of(child))
        else {
            continue;
        };
        let width = if path_edges.contains(&(parent, child)) {
            "penwidth=3, "
        } else {
            ""
        };
        out.push_str(&format!(
            "  n{from} -> n{to} [{width}label=\"{}\"];\n",
            escape(&action.to_string())
        ));
    }

    out.push_str("}\n");
    Ok(out)
}

/// Escape user text for a quoted DOT string. Label separators such as
/// `\n` are appended after escaping.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
