//! Generalized best-first search.
//!
//! One algorithm, parameterized by a frontier [`Discipline`] and an
//! [`Evaluator`]. BFS, DFS, Dijkstra, greedy best-first and A* are
//! configurations of it, not separate implementations.
//!
//! ## Duplicate handling
//!
//! A reached map records, for every discovered state, its predecessor, the
//! step that reached it, its path cost and its depth. A successor that is
//! already recorded is dropped, except:
//! - priority discipline: it is re-recorded and re-queued when the new path
//!   is strictly cheaper (stale queue entries are skipped on pop)
//! - depth-limited LIFO: it is re-recorded when the new path is strictly
//!   shallower, so a depth bound never hides a reachable goal

use std::time::Instant;

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::core::{
    HeuristicProblem, Path, SearchError, SearchProblem, SearchResult, SearchStats, Step,
};

use super::eval::{Evaluator, Greedy, PathCost, Transition, Unscored, WeightedAStar};
use super::queue::{Discipline, Frontier};

/// Searches that return an action path.
pub trait PathSearch<A> {
    /// Run the search. An empty path means the search was exhausted.
    fn search(&mut self) -> Path<A>;

    /// Counters from the last `search` call.
    fn stats(&self) -> &SearchStats;
}

/// Reached-map entry.
#[derive(Clone, Debug)]
struct Record<S, A> {
    parent: Option<S>,
    step: Step<A>,
    path_cost: f64,
    depth: usize,
}

/// Best-first search over a borrowed problem.
///
/// ## Example
///
/// ```
/// use sealgo::frontier::{BestFirstSearch, PathSearch};
/// use sealgo::problems::GridMaze;
///
/// let maze = GridMaze::parse(&[
///     "S..#",
///     ".#..",
///     "...G",
/// ]).unwrap();
///
/// let mut bfs = BestFirstSearch::breadth_first(&maze);
/// let path = bfs.search();
/// assert_eq!(path.len(), 5);
/// ```
pub struct BestFirstSearch<'p, P: SearchProblem, E> {
    problem: &'p P,
    evaluator: E,
    discipline: Discipline,
    max_depth: Option<usize>,
    stats: SearchStats,
}

/// FIFO frontier, unscored.
pub type BreadthFirst<'p, P> = BestFirstSearch<'p, P, Unscored>;
/// LIFO frontier, unscored, optionally depth-limited.
pub type DepthFirst<'p, P> = BestFirstSearch<'p, P, Unscored>;
/// Priority by path cost.
pub type Dijkstra<'p, P> = BestFirstSearch<'p, P, PathCost>;
/// Priority by successor heuristic.
pub type GreedyBestFirst<'p, P> = BestFirstSearch<'p, P, Greedy>;
/// Priority by `g + w * h`.
pub type AStar<'p, P> = BestFirstSearch<'p, P, WeightedAStar>;

impl<'p, P: SearchProblem> BestFirstSearch<'p, P, Unscored> {
    /// Breadth-first search.
    pub fn breadth_first(problem: &'p P) -> Self {
        Self::unchecked(problem, Unscored, Discipline::Fifo)
    }

    /// Depth-first search, cut off below `max_depth` actions when given.
    pub fn depth_first(problem: &'p P, max_depth: Option<usize>) -> Self {
        let mut search = Self::unchecked(problem, Unscored, Discipline::Lifo);
        search.max_depth = max_depth;
        search
    }
}

impl<'p, P: SearchProblem> BestFirstSearch<'p, P, PathCost> {
    /// Uniform-cost (Dijkstra) search.
    pub fn dijkstra(problem: &'p P) -> Self {
        Self::unchecked(problem, PathCost, Discipline::Priority)
    }
}

impl<'p, P: HeuristicProblem> BestFirstSearch<'p, P, Greedy> {
    /// Greedy best-first search.
    pub fn greedy(problem: &'p P) -> Self {
        Self::unchecked(problem, Greedy, Discipline::Priority)
    }
}

impl<'p, P: HeuristicProblem> BestFirstSearch<'p, P, WeightedAStar> {
    /// A* with heuristic weight `weight` (1 for standard A*).
    pub fn astar(problem: &'p P, weight: f64) -> SearchResult<Self> {
        let evaluator = WeightedAStar::new(weight).inspect_err(|e| warn!(%e, "rejected A* weight"))?;
        Ok(Self::unchecked(problem, evaluator, Discipline::Priority))
    }
}

impl<'p, P: SearchProblem, E: Evaluator<P>> BestFirstSearch<'p, P, E> {
    /// Pair an evaluator with a discipline.
    ///
    /// A scored evaluator (path cost, heuristic) only makes sense with the
    /// priority discipline; pairing it with FIFO or LIFO is rejected.
    pub fn new(problem: &'p P, evaluator: E, discipline: Discipline) -> SearchResult<Self> {
        if evaluator.is_scored() && discipline != Discipline::Priority {
            let err = SearchError::invalid(
                "discipline",
                format!("a scored evaluator needs the priority discipline, got {discipline}"),
            );
            warn!(%err, "rejected best-first configuration");
            return Err(err);
        }
        Ok(Self::unchecked(problem, evaluator, discipline))
    }

    fn unchecked(problem: &'p P, evaluator: E, discipline: Discipline) -> Self {
        Self {
            problem,
            evaluator,
            discipline,
            max_depth: None,
            stats: SearchStats::default(),
        }
    }

    /// Stop expanding states at `depth` actions from the start.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    #[must_use]
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    #[must_use]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub fn problem(&self) -> &'p P {
        self.problem
    }

    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Run the search from the problem's initial state.
    pub fn search(&mut self) -> Path<P::Action> {
        let start = Instant::now();
        self.stats.reset();

        let problem = self.problem;
        let initial = problem.initial_state();
        debug!(discipline = %self.discipline, max_depth = ?self.max_depth, "best-first search started");

        let mut reached: FxHashMap<P::State, Record<P::State, P::Action>> = FxHashMap::default();
        reached.insert(
            initial.clone(),
            Record {
                parent: None,
                step: Step::Stay,
                path_cost: 0.0,
                depth: 0,
            },
        );

        let mut frontier = Frontier::new(self.discipline);
        frontier.push(initial, 0.0, 0.0, 0);
        self.stats.observe_frontier(frontier.len());

        let mut result = Path::not_found();

        while let Some(queued) = frontier.pop() {
            let state = queued.state;
            let Some(record) = reached.get(&state) else {
                continue;
            };
            if self.is_stale(queued.path_cost, queued.depth, record) {
                continue;
            }
            let (path_cost, depth) = (record.path_cost, record.depth);

            if problem.is_goal(&state) {
                result = reconstruct(&reached, state);
                break;
            }

            if self.max_depth.is_some_and(|limit| depth >= limit) {
                continue;
            }

            self.stats.nodes_expanded += 1;
            trace!(?state, path_cost, depth, "expanding");

            for action in problem.actions(&state) {
                let child = problem.result(&state, &action);
                self.stats.nodes_generated += 1;

                let step_cost = problem.action_cost(&state, &action);
                if !(step_cost >= 0.0) {
                    warn!(?state, ?action, step_cost, "negative or NaN action cost");
                    debug_assert!(step_cost >= 0.0, "action costs must be non-negative");
                }
                let child_cost = path_cost + step_cost;
                let child_depth = depth + 1;

                if !self.improves(reached.get(&child), child_cost, child_depth) {
                    continue;
                }

                let score = self.evaluator.score(
                    problem,
                    &Transition {
                        parent: &state,
                        action: &action,
                        child: &child,
                        path_cost: child_cost,
                        depth: child_depth,
                    },
                );

                reached.insert(
                    child.clone(),
                    Record {
                        parent: Some(state.clone()),
                        step: Step::Act(action),
                        path_cost: child_cost,
                        depth: child_depth,
                    },
                );
                frontier.push(child, score, child_cost, child_depth);
            }

            self.stats.observe_frontier(frontier.len());
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            found = result.is_found(),
            length = result.len(),
            cost = result.cost(),
            expanded = self.stats.nodes_expanded,
            generated = self.stats.nodes_generated,
            reached = reached.len(),
            "best-first search finished"
        );
        result
    }

    /// A queue entry is stale when its state has since been recorded with a
    /// better path.
    fn is_stale(&self, path_cost: f64, depth: usize, record: &Record<P::State, P::Action>) -> bool {
        match self.discipline {
            Discipline::Priority => path_cost > record.path_cost,
            Discipline::Lifo => depth > record.depth,
            Discipline::Fifo => false,
        }
    }

    fn improves(
        &self,
        existing: Option<&Record<P::State, P::Action>>,
        path_cost: f64,
        depth: usize,
    ) -> bool {
        let Some(existing) = existing else {
            return true;
        };
        match self.discipline {
            Discipline::Priority => path_cost < existing.path_cost,
            Discipline::Lifo if self.max_depth.is_some() => depth < existing.depth,
            _ => false,
        }
    }

    /// Counters from the last search.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

impl<P: SearchProblem, E: Evaluator<P>> PathSearch<P::Action> for BestFirstSearch<'_, P, E> {
    fn search(&mut self) -> Path<P::Action> {
        BestFirstSearch::search(self)
    }

    fn stats(&self) -> &SearchStats {
        BestFirstSearch::stats(self)
    }
}

/// Walk predecessor links from `goal` back to the initial state.
///
/// The walk is bounded by the size of the reached map; a longer walk means
/// the predecessor links form a cycle (only possible with negative costs),
/// and no path is reported.
fn reconstruct<S, A>(reached: &FxHashMap<S, Record<S, A>>, goal: S) -> Path<A>
where
    S: Clone + Eq + std::hash::Hash + std::fmt::Debug,
    A: Clone,
{
    let Some(goal_record) = reached.get(&goal) else {
        return Path::not_found();
    };
    let cost = goal_record.path_cost;

    let mut steps = Vec::with_capacity(goal_record.depth + 1);
    let mut current = Some(goal);

    while let Some(state) = current {
        if steps.len() > reached.len() {
            warn!(?state, "predecessor links form a cycle; discarding path");
            return Path::not_found();
        }
        let Some(record) = reached.get(&state) else {
            return Path::not_found();
        };
        steps.push(record.step.clone());
        current = record.parent.clone();
    }

    steps.reverse();
    Path::found(steps, cost)
}
