//! Self-contained HTML trace viewer.
//!
//! The page draws the parent tree, the captured edges and the solution path
//! on a canvas and replays expansions step by step. Integer states are laid
//! out on a number line, anything else on a hashed grid. The embedded data
//! is bounded by [`HtmlOptions`]: solution-path states are always kept, the
//! rest are filled in discovery order. No network access or external
//! scripts are needed to open the page.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::hash::Hash;
use std::path::Path;

use pathwise_search::SearchResult;
use serde_json::{json, Map, Value};

use crate::error::HarnessError;
use crate::export::{kept_states, require_trace, trace_digest};
use crate::TOOLKIT_VERSION;

/// Viewer options.
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    pub title: String,
    /// Upper bound on embedded states. Solution-path states are always kept.
    pub max_nodes: usize,
    /// Upper bound on embedded generated edges.
    pub max_edges: usize,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            title: "search trace".to_string(),
            max_nodes: 5_000,
            max_edges: 20_000,
        }
    }
}

impl HtmlOptions {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{TITLE}}</title>
<style>
  html, body { margin: 0; height: 100%; font-family: system-ui, sans-serif; color: #222; }
  .wrap { display: grid; grid-template-columns: 360px 1fr; height: 100%; }
  .side { padding: 1rem; overflow-y: auto; border-right: 1px solid #ddd; }
  .main { display: flex; flex-direction: column; }
  #cv { flex: 1; width: 100%; background: #fafafa; }
  #controls button { margin: 0 0.3rem 0.3rem 0; }
  #kv { display: grid; grid-template-columns: auto 1fr; gap: 2px 10px; font-size: 0.85rem; }
  #kv b { color: #666; font-weight: 600; }
  #steps { font-family: ui-monospace, monospace; font-size: 0.8rem; max-height: 40vh; overflow-y: auto; margin-top: 0.8rem; }
  .step { padding: 1px 4px; }
  .step.current { background: #ffe08a; }
  .step.done { color: #888; }
  .step.path { font-weight: bold; color: #1a5fb4; }
  .legend { padding: 0.4rem 1rem; font-size: 0.85rem; border-top: 1px solid #ddd; }
  .legend span { display: inline-block; margin-right: 1rem; }
  .sw { display: inline-block; width: 10px; height: 10px; border-radius: 50%; margin-right: 4px; }
</style>
</head>
<body>
<div class="wrap">
<div class="side">
<h1>{{TITLE}}</h1>
<div id="controls">
  <button id="btnReset">reset</button>
  <button id="btnStep">step</button>
  <button id="btnPlay">play</button>
  <button id="btnEdges">edges</button>
  <button id="btnParents">parents</button>
</div>
<input id="slider" type="range" min="-1" max="0" value="-1" style="width: 100%">
<div id="kv"></div>
<div id="steps"></div>
</div>
<div class="main">
<canvas id="cv"></canvas>
<div class="legend">Legend:
  <span><i class="sw" style="background:#e66100"></i>current</span>
  <span><i class="sw" style="background:#888"></i>expanded</span>
  <span><i class="sw" style="background:#f5c211"></i>discovered</span>
  <span><i class="sw" style="background:#26a269"></i>solution path</span>
</div>
</div>
</div>
<script>
const DATA = {{DATA}};
const meta = DATA.meta;
const nodes = Object.keys(DATA.parent);
const solution = new Set(DATA.solution);
const expanded = DATA.expanded;
const parentEdges = nodes
  .filter(n => DATA.parent[n].parent !== null && DATA.parent[DATA.parent[n].parent] !== undefined)
  .map(n => [DATA.parent[n].parent, n]);
const asInt = s => (/^-?\d+$/.test(s) ? parseInt(s, 10) : null);
const allInt = nodes.length > 0 && nodes.every(n => asInt(n) !== null);
const ints = allInt ? nodes.map(asInt) : [0, 1];
const minN = Math.min(...ints);
const maxN = Math.max(...ints);
let maxG = 0;
for (const n of nodes) maxG = Math.max(maxG, DATA.parent[n].g ?? 0);

const cv = document.getElementById("cv");
const slider = document.getElementById("slider");
const steps = document.getElementById("steps");
slider.max = String(expanded.length - 1);
let cursor = -1;
let timer = null;
let showEdges = true;
let showParents = true;

function place(state, w, h) {
  if (allInt) {
    const x = 30 + (w - 60) * ((asInt(state) - minN) / (maxN - minN || 1));
    const g = DATA.parent[state].g ?? 0;
    const y = 30 + (h - 60) * (1 - g / (maxG || 1));
    return [x, y];
  }
  let hash = 0;
  for (let i = 0; i < state.length; i++) hash = (hash * 31 + state.charCodeAt(i)) >>> 0;
  const cols = 24;
  return [30 + (w - 60) * ((hash % cols) / (cols - 1)), 30 + (h - 60) * ((Math.floor(hash / cols) % cols) / (cols - 1))];
}

const rows = expanded.map(r => {
  const div = document.createElement("div");
  div.className = "step";
  div.textContent = `#${r.idx} ${r.state}  g=${r.g}` + (r.parent === null ? "" : `  via ${r.action} from ${r.parent}`);
  steps.appendChild(div);
  return div;
});

function line(ctx, u, v, w, h, style, width, dash) {
  const [x1, y1] = place(u, w, h);
  const [x2, y2] = place(v, w, h);
  ctx.save();
  ctx.strokeStyle = style;
  ctx.lineWidth = width;
  ctx.setLineDash(dash);
  ctx.beginPath();
  ctx.moveTo(x1, y1);
  ctx.lineTo(x2, y2);
  ctx.stroke();
  ctx.restore();
}

function draw() {
  const rect = cv.getBoundingClientRect();
  cv.width = Math.floor(rect.width * devicePixelRatio);
  cv.height = Math.floor(rect.height * devicePixelRatio);
  const ctx = cv.getContext("2d");
  ctx.scale(devicePixelRatio, devicePixelRatio);
  const w = rect.width;
  const h = rect.height;

  const done = new Set(expanded.slice(0, cursor + 1).map(r => r.state));
  const current = cursor >= 0 ? expanded[cursor].state : null;
  if (showEdges) {
    for (const e of DATA.edges) {
      if (DATA.parent[e.src] !== undefined && DATA.parent[e.dst] !== undefined) line(ctx, e.src, e.dst, w, h, "rgba(0,0,0,0.12)", 1, [2, 3]);
    }
  }
  if (showParents) {
    for (const [u, v] of parentEdges) {
      const onPath = solution.has(u) && solution.has(v);
      line(ctx, u, v, w, h, onPath ? "rgba(38,162,105,0.9)" : "rgba(0,0,0,0.3)", onPath ? 3 : 1, []);
    }
  }
  for (const n of nodes) {
    const [x, y] = place(n, w, h);
    let fill = "#f5c211";
    let r = 3;
    if (done.has(n)) { fill = "#888"; r = 4; }
    if (solution.has(n) && cursor === expanded.length - 1) { fill = "#26a269"; r = 5; }
    if (n === current) { fill = "#e66100"; r = 7; }
    ctx.beginPath();
    ctx.arc(x, y, r, 0, 2 * Math.PI);
    ctx.fillStyle = fill;
    ctx.fill();
    if (n === current || solution.has(n)) {
      ctx.fillStyle = "#222";
      ctx.font = "11px ui-monospace, monospace";
      ctx.fillText(n, x + r + 3, y - r - 2);
    }
  }

  const step = cursor >= 0 ? expanded[cursor] : null;
  const kv = [
    ["algorithm", meta.algorithm],
    ["cost", meta.cost],
    ["expanded", meta.expanded],
    ["generated", meta.generated],
    ["reopens", meta.reopens],
    ["max_frontier", meta.max_frontier],
    ["runtime_sec", meta.runtime_sec.toFixed(6)],
    ["nodes_kept", meta.nodes_kept],
    ["edges_kept", meta.edges_kept],
    ["step", `${cursor + 1} / ${expanded.length}`],
    ["current", step ? step.state : "-"],
    ["g", step ? step.g : "-"],
    ["parent", step && step.parent !== null ? step.parent : "-"],
    ["action", step && step.action !== null ? step.action : "-"],
  ];
  const box = document.getElementById("kv");
  box.textContent = "";
  for (const [k, v] of kv) {
    const key = document.createElement("b");
    key.textContent = k;
    const val = document.createElement("span");
    val.textContent = String(v);
    box.append(key, val);
  }
  rows.forEach((row, j) => {
    row.classList.toggle("current", j === cursor);
    row.classList.toggle("done", j < cursor);
    row.classList.toggle("path", j <= cursor && solution.has(expanded[j].state));
  });
  if (cursor >= 0) rows[cursor].scrollIntoView({ block: "nearest" });
  slider.value = String(cursor);
}

function stop() { if (timer) { clearInterval(timer); timer = null; } }
function advance() {
  if (cursor + 1 >= expanded.length) { stop(); return; }
  cursor += 1;
  draw();
}
document.getElementById("btnStep").onclick = () => { stop(); advance(); };
document.getElementById("btnReset").onclick = () => { stop(); cursor = -1; draw(); };
document.getElementById("btnPlay").onclick = () => { if (timer) { stop(); } else { timer = setInterval(advance, 120); } };
document.getElementById("btnEdges").onclick = () => { showEdges = !showEdges; draw(); };
document.getElementById("btnParents").onclick = () => { showParents = !showParents; draw(); };
slider.oninput = () => { stop(); cursor = parseInt(slider.value, 10); draw(); };
window.onresize = draw;
draw();
</script>
</body>
</html>
"##;

/// The bounded payload embedded as `const DATA`.
///
/// `parent` maps each kept state to its final parent, action and `g`;
/// `expanded` lists expansions of kept states in pop order with the cost
/// and parent each one used; `edges` holds captured edges between kept
/// states, at most `max_edges` of them.
///
/// # Errors
///
/// [`HarnessError::MissingTrace`] if the result was produced untraced.
pub fn viewer_data<S, A>(
    result: &SearchResult<S, A>,
    context: &BTreeMap<String, Value>,
    options: &HtmlOptions,
) -> Result<Value, HarnessError>
where
    S: Display + Eq + Hash,
    A: Display,
{
    let trace = require_trace(result)?;
    let keep = kept_states(result, trace, options.max_nodes);

    let mut parent = Map::new();
    for (state, link) in trace.parent.iter().filter(|(state, _)| keep.contains(state)) {
        parent.insert(
            state.to_string(),
            json!({
                "parent": display_or_null(link.parent.as_ref()),
                "action": display_or_null(link.action.as_ref()),
                "g": trace.g.get(state).copied(),
            }),
        );
    }

    let expanded: Vec<Value> = trace
        .expansion_steps()
        .enumerate()
        .filter(|(_, (state, _))| keep.contains(state))
        .map(|(idx, (state, step))| {
            json!({
                "idx": idx,
                "state": state.to_string(),
                "g": step.g,
                "parent": display_or_null(step.link.parent.as_ref()),
                "action": display_or_null(step.link.action.as_ref()),
            })
        })
        .collect();

    let edges: Vec<Value> = trace
        .edges
        .iter()
        .flatten()
        .filter(|edge| keep.contains(&edge.from) && keep.contains(&edge.to))
        .take(options.max_edges)
        .map(|edge| {
            json!({
                "src": edge.from.to_string(),
                "dst": edge.to.to_string(),
                "action": edge.action.to_string(),
                "cost": edge.cost,
            })
        })
        .collect();

    let meta = json!({
        "title": options.title,
        "toolkit_version": TOOLKIT_VERSION,
        "algorithm": result.algorithm.as_str(),
        "cost": result.cost,
        "expanded": result.stats.expanded,
        "generated": result.stats.generated,
        "reopens": result.stats.reopens,
        "max_frontier": result.stats.max_frontier,
        "runtime_sec": result.runtime_secs(),
        "nodes_kept": parent.len(),
        "edges_kept": edges.len(),
        "trace_digest": trace_digest(result)?,
    });

    Ok(json!({
        "meta": meta,
        "context": context,
        "solution": result.states.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "parent": parent,
        "expanded": expanded,
        "edges": edges,
    }))
}

/// Render the viewer page for a traced result.
///
/// # Errors
///
/// [`HarnessError::MissingTrace`] if the result was produced untraced.
pub fn render_html<S, A>(
    result: &SearchResult<S, A>,
    context: &BTreeMap<String, Value>,
    options: &HtmlOptions,
) -> Result<String, HarnessError>
where
    S: Display + Eq + Hash,
    A: Display,
{
    let data = serde_json::to_string(&viewer_data(result, context, options)?)?;
    // Keep "</script>" inside string data from closing the element.
    let data = data.replace("</", "<\\/");
    Ok(fill_template(&escape_html(&options.title), &data))
}

/// [`render_html`] into a file at `path`.
///
/// # Errors
///
/// As [`render_html`], plus failure to write the file.
pub fn write_html<S, A>(
    result: &SearchResult<S, A>,
    context: &BTreeMap<String, Value>,
    options: &HtmlOptions,
    path: &Path,
) -> Result<(), HarnessError>
where
    S: Display + Eq + Hash,
    A: Display,
{
    std::fs::write(path, render_html(result, context, options)?)?;
    Ok(())
}

/// Single left-to-right pass over [`TEMPLATE`]. Substituted text is never
/// rescanned, so placeholders inside the title or data stay literal.
fn fill_template(title: &str, data: &str) -> String {
    let mut out = String::with_capacity(TEMPLATE.len() + data.len());
    let mut rest = TEMPLATE;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        if let Some(after) = tail.strip_prefix("{{TITLE}}") {
            out.push_str(title);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{{DATA}}") {
            out.push_str(data);
            rest = after;
        } else {
            out.push_str("{{");
            rest = &tail[2..];
        }
    }
    out.push_str(rest);
    out
}

fn display_or_null<T: Display>(value: Option<&T>) -> Value {
    value.map_or(Value::Null, |v| Value::String(v.to_string()))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
