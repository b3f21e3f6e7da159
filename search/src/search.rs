//! Search entry points and expansion loops.
//!
//! Four control loops share one piece of bookkeeping ([`Run`]): the parent
//! tree, the best-known cost map, counters and the optional trace recorder.
//!
//! | algorithm | frontier            | goal test   | reopens |
//! |-----------|---------------------|-------------|---------|
//! | BFS       | FIFO queue          | generation  | never   |
//! | DFS       | LIFO stack          | expansion   | never   |
//! | UCS       | [`PriorityFrontier`] on `g`     | expansion | on strict `g` improvement |
//! | A*        | [`PriorityFrontier`] on `g + h` | expansion | on strict `g` improvement |
//!
//! Every algorithm returns immediately with zero expansions when the start
//! state is already a goal.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::contract::{Edge, SearchProblem};
use crate::error::SearchError;
use crate::frontier::PriorityFrontier;
use crate::heuristic::Heuristic;
use crate::node::ParentLink;
use crate::policy::SearchPolicy;
use crate::result::{reconstruct_path, Algorithm, SearchResult, SearchStats};
use crate::trace::TraceRecorder;

type Outcome<P> = Result<
    SearchResult<<P as SearchProblem>::State, <P as SearchProblem>::Action>,
    SearchError,
>;

/// Per-call bookkeeping shared by all four loops.
struct Run<S, A> {
    algorithm: Algorithm,
    max_expansions: u64,
    started: Instant,
    parent: IndexMap<S, ParentLink<S, A>>,
    g: IndexMap<S, f64>,
    stats: SearchStats,
    recorder: Option<TraceRecorder<S, A>>,
}

impl<S, A> Run<S, A>
where
    S: Clone + Eq + std::hash::Hash,
    A: Clone,
{
    fn new(algorithm: Algorithm, start: &S, policy: &SearchPolicy) -> Self {
        debug!(
            %algorithm,
            max_expansions = policy.max_expansions,
            trace = ?policy.trace,
            "search started"
        );
        let mut parent = IndexMap::new();
        parent.insert(start.clone(), ParentLink::root());
        let mut g = IndexMap::new();
        g.insert(start.clone(), 0.0);
        Self {
            algorithm,
            max_expansions: policy.max_expansions,
            started: Instant::now(),
            parent,
            g,
            stats: SearchStats {
                max_frontier: 1,
                ..SearchStats::default()
            },
            recorder: TraceRecorder::start(policy.trace),
        }
    }

    /// Count one expansion of `state`, or fail if the budget is spent.
    fn expand(&mut self, state: &S) -> Result<(), SearchError> {
        if self.stats.expanded >= self.max_expansions {
            warn!(
                algorithm = %self.algorithm,
                max_expansions = self.max_expansions,
                generated = self.stats.generated,
                "expansion budget exhausted"
            );
            return Err(SearchError::ResourceExhausted {
                algorithm: self.algorithm,
                max_expansions: self.max_expansions,
            });
        }
        self.stats.expanded += 1;
        if let Some(recorder) = self.recorder.as_mut() {
            let g = self.g.get(state).copied().unwrap_or(0.0);
            let link = self
                .parent
                .get(state)
                .cloned()
                .unwrap_or_else(ParentLink::root);
            recorder.record_expansion(state, g, link);
        }
        Ok(())
    }

    fn generate(&mut self, from: &S, edge: &Edge<S, A>) {
        self.stats.generated += 1;
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.record_edge(from, edge);
        }
    }

    fn observe_frontier(&mut self, live: usize) {
        self.stats.max_frontier = self.stats.max_frontier.max(live);
    }

    fn succeed(self, goal: &S, cost: f64) -> SearchResult<S, A> {
        let (states, actions) = reconstruct_path(goal, &self.parent);
        let runtime = self.started.elapsed();
        debug!(
            algorithm = %self.algorithm,
            cost,
            plan_len = actions.len(),
            expanded = self.stats.expanded,
            generated = self.stats.generated,
            reopens = self.stats.reopens,
            max_frontier = self.stats.max_frontier,
            "goal reached"
        );
        let trace = self
            .recorder
            .map(|recorder| recorder.finish(self.parent, self.g));
        SearchResult {
            algorithm: self.algorithm,
            cost,
            actions,
            states,
            stats: self.stats,
            runtime,
            trace,
        }
    }

    fn no_solution(&self) -> SearchError {
        debug!(
            algorithm = %self.algorithm,
            expanded = self.stats.expanded,
            generated = self.stats.generated,
            "frontier exhausted without reaching a goal"
        );
        SearchError::NoSolution {
            algorithm: self.algorithm,
            expanded: self.stats.expanded,
        }
    }
}

/// Breadth-first search.
///
/// Unit cost per action. States are marked visited when generated and never
/// reopened; the goal test runs on each newly generated child, so the
/// shallowest goal is returned.
///
/// # Errors
///
/// [`SearchError::ResourceExhausted`] if `policy.max_expansions` is reached
/// first, [`SearchError::NoSolution`] if the queue empties.
pub fn bfs<P: SearchProblem>(problem: &P, policy: &SearchPolicy) -> Outcome<P> {
    let start = problem.start_state();
    let mut run = Run::new(Algorithm::Bfs, &start, policy);
    if problem.is_goal(&start) {
        return Ok(run.succeed(&start, 0.0));
    }

    let mut queue = VecDeque::from([(start, 0.0)]);
    while let Some((state, depth)) = queue.pop_front() {
        run.expand(&state)?;
        let child_depth = depth + 1.0;
        for edge in problem.successors(&state) {
            run.generate(&state, &edge);
            if run.parent.contains_key(&edge.next) {
                continue;
            }
            run.parent
                .insert(edge.next.clone(), ParentLink::new(state.clone(), edge.action));
            run.g.insert(edge.next.clone(), child_depth);
            if problem.is_goal(&edge.next) {
                return Ok(run.succeed(&edge.next, child_depth));
            }
            queue.push_back((edge.next, child_depth));
            run.observe_frontier(queue.len());
        }
    }
    Err(run.no_solution())
}

/// Depth-first search.
///
/// Unit cost per action. Visited-on-generation, never reopened, goal test
/// on pop. Successors are pushed in enumeration order, so the last one
/// enumerated is explored first. No optimality guarantee.
///
/// # Errors
///
/// [`SearchError::ResourceExhausted`] if `policy.max_expansions` is reached
/// first, [`SearchError::NoSolution`] if the stack empties.
pub fn dfs<P: SearchProblem>(problem: &P, policy: &SearchPolicy) -> Outcome<P> {
    let start = problem.start_state();
    let mut run = Run::new(Algorithm::Dfs, &start, policy);
    if problem.is_goal(&start) {
        return Ok(run.succeed(&start, 0.0));
    }

    let mut stack = vec![(start, 0.0)];
    while let Some((state, depth)) = stack.pop() {
        run.expand(&state)?;
        if problem.is_goal(&state) {
            return Ok(run.succeed(&state, depth));
        }
        for edge in problem.successors(&state) {
            run.generate(&state, &edge);
            if run.parent.contains_key(&edge.next) {
                continue;
            }
            run.parent
                .insert(edge.next.clone(), ParentLink::new(state.clone(), edge.action));
            run.g.insert(edge.next.clone(), depth + 1.0);
            stack.push((edge.next, depth + 1.0));
            run.observe_frontier(stack.len());
        }
    }
    Err(run.no_solution())
}

/// Uniform-cost search.
///
/// Optimal for nonnegative edge costs. See [`astar`] for the shared
/// reopening semantics.
///
/// # Errors
///
/// [`SearchError::ResourceExhausted`] if `policy.max_expansions` is reached
/// first, [`SearchError::NoSolution`] if the frontier empties.
pub fn ucs<P: SearchProblem>(problem: &P, policy: &SearchPolicy) -> Outcome<P> {
    best_first::<P, crate::heuristic::ZeroHeuristic>(problem, None, policy)
}

/// A* search with a caller-supplied heuristic.
///
/// Frontier priority is `f = g + h(state)`. Whenever a strictly cheaper `g`
/// is found for a state, its parent and costs are rewritten and it is pushed
/// again, even if it was already expanded. With an admissible heuristic this
/// keeps the returned cost optimal whether or not the heuristic is
/// consistent; [`crate::SearchStats::reopens`] counts the rewrites.
///
/// # Errors
///
/// [`SearchError::ResourceExhausted`] if `policy.max_expansions` is reached
/// first, [`SearchError::NoSolution`] if the frontier empties.
pub fn astar<P, H>(problem: &P, heuristic: &H, policy: &SearchPolicy) -> Outcome<P>
where
    P: SearchProblem,
    H: Heuristic<P::State> + ?Sized,
{
    best_first(problem, Some(heuristic), policy)
}

/// Shared UCS/A* loop. `heuristic == None` is UCS: priorities are `g` and
/// no separate `f` map is kept.
fn best_first<P, H>(problem: &P, heuristic: Option<&H>, policy: &SearchPolicy) -> Outcome<P>
where
    P: SearchProblem,
    H: Heuristic<P::State> + ?Sized,
{
    let algorithm = if heuristic.is_some() {
        Algorithm::Astar
    } else {
        Algorithm::Ucs
    };
    let start = problem.start_state();
    let mut run = Run::new(algorithm, &start, policy);
    if problem.is_goal(&start) {
        return Ok(run.succeed(&start, 0.0));
    }

    let mut f_scores: Option<HashMap<P::State, f64>> = heuristic.map(|_| HashMap::new());
    let start_priority = match (heuristic, f_scores.as_mut()) {
        (Some(h), Some(f)) => {
            let f0 = h.estimate(&start);
            f.insert(start.clone(), f0);
            f0
        }
        _ => 0.0,
    };

    let mut frontier = PriorityFrontier::new();
    frontier.update(start, start_priority);

    while let Some((state, priority)) = frontier.pop_min() {
        let recorded = match f_scores.as_ref() {
            Some(f) => f.get(&state).copied(),
            None => run.g.get(&state).copied(),
        };
        if !recorded.is_some_and(|r| r.total_cmp(&priority).is_eq()) {
            continue;
        }
        let Some(g_here) = run.g.get(&state).copied() else {
            continue;
        };

        run.expand(&state)?;
        if problem.is_goal(&state) {
            return Ok(run.succeed(&state, g_here));
        }

        for edge in problem.successors(&state) {
            run.generate(&state, &edge);
            let g_next = g_here + edge.cost;
            let known = run.g.get(&edge.next).copied();
            if known.is_some_and(|old| g_next >= old) {
                continue;
            }
            if known.is_some() {
                run.stats.reopens += 1;
            }

            let Edge { action, next, .. } = edge;
            run.g.insert(next.clone(), g_next);
            run.parent
                .insert(next.clone(), ParentLink::new(state.clone(), action));
            let next_priority = match (heuristic, f_scores.as_mut()) {
                (Some(h), Some(f)) => {
                    let f_next = g_next + h.estimate(&next);
                    f.insert(next.clone(), f_next);
                    f_next
                }
                _ => g_next,
            };
            frontier.update(next, next_priority);
            run.observe_frontier(frontier.len());
        }
    }
    Err(run.no_solution())
}
