//! AND-OR search over non-deterministic transition models.
//!
//! OR nodes choose an action; AND nodes require a sub-plan for every outcome
//! of the chosen action. Two separate structures guard the recursion:
//! - the current recursion path, a persistent set extended per call; a state
//!   already on it is a cycle and fails that branch only
//! - a memo shared by all calls of one search; it holds every solved state
//!   and every failure that did not depend on a cycle cut-off

use std::rc::Rc;
use std::time::Instant;

use im::HashSet as PathSet;
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::core::{SearchError, SearchResult, SearchStats, UncertainProblem};

use super::plan::{Branches, ConditionalPlan};

/// Largest tolerated deviation of an outcome distribution's sum from 1.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

type PlanRef<P> =
    Rc<ConditionalPlan<<P as UncertainProblem>::State, <P as UncertainProblem>::Action>>;

/// Result of one OR or AND step.
enum Solved<T> {
    Plan(T),
    /// `cyclic` is set when the failure came from a recursion-path cut-off
    /// and could succeed from another path.
    Failed { cyclic: bool },
}

/// AND-OR search bound to one problem.
pub struct AndOrSearch<'p, P: UncertainProblem> {
    problem: &'p P,
    memo: FxHashMap<P::State, Option<PlanRef<P>>>,
    goal: PlanRef<P>,
    stats: SearchStats,
}

impl<'p, P: UncertainProblem> AndOrSearch<'p, P> {
    pub fn new(problem: &'p P) -> Self {
        Self {
            problem,
            memo: FxHashMap::default(),
            goal: Rc::new(ConditionalPlan::Goal),
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn problem(&self) -> &'p P {
        self.problem
    }

    /// Find a conditional plan from the initial state.
    ///
    /// `Ok(None)` means no acyclic plan exists. An `Err` means the problem
    /// returned an invalid outcome distribution.
    pub fn search(&mut self) -> SearchResult<Option<ConditionalPlan<P::State, P::Action>>> {
        let start = Instant::now();
        self.stats.reset();
        self.memo.clear();

        let initial = self.problem.initial_state();
        debug!(?initial, "and-or search started");

        let outcome = self.or_search(&initial, &PathSet::new());
        self.stats.time_us = start.elapsed().as_micros() as u64;

        let plan = match outcome? {
            Solved::Plan(plan) => Some(Rc::try_unwrap(plan).unwrap_or_else(|rc| (*rc).clone())),
            Solved::Failed { .. } => None,
        };
        debug!(
            found = plan.is_some(),
            depth = plan.as_ref().map_or(0, ConditionalPlan::depth),
            expanded = self.stats.nodes_expanded,
            memoized = self.memo.len(),
            "and-or search finished"
        );
        Ok(plan)
    }

    fn or_search(
        &mut self,
        state: &P::State,
        path: &PathSet<P::State>,
    ) -> SearchResult<Solved<PlanRef<P>>> {
        if self.problem.is_goal(state) {
            return Ok(Solved::Plan(Rc::clone(&self.goal)));
        }
        if path.contains(state) {
            trace!(?state, "cycle on recursion path");
            return Ok(Solved::Failed { cyclic: true });
        }
        if let Some(memo) = self.memo.get(state) {
            return Ok(match memo {
                Some(plan) => Solved::Plan(Rc::clone(plan)),
                None => Solved::Failed { cyclic: false },
            });
        }

        self.stats.nodes_expanded += 1;
        let path = path.update(state.clone());
        let mut cyclic = false;

        for action in self.problem.actions(state) {
            let outcomes = self.validated_outcomes(state, &action)?;
            self.stats.nodes_generated += outcomes.len() as u64;

            match self.and_search(outcomes, &path)? {
                Solved::Plan(branches) => {
                    trace!(?state, ?action, "or node solved");
                    let plan = Rc::new(ConditionalPlan::Act { action, branches });
                    self.memo.insert(state.clone(), Some(Rc::clone(&plan)));
                    return Ok(Solved::Plan(plan));
                }
                Solved::Failed { cyclic: c } => cyclic |= c,
            }
        }

        if !cyclic {
            self.memo.insert(state.clone(), None);
        }
        Ok(Solved::Failed { cyclic })
    }

    fn and_search(
        &mut self,
        outcomes: Vec<P::State>,
        path: &PathSet<P::State>,
    ) -> SearchResult<Solved<Branches<P::State, P::Action>>> {
        let mut branches = Branches::with_capacity(outcomes.len());
        for outcome in outcomes {
            match self.or_search(&outcome, path)? {
                Solved::Plan(plan) => branches.push((outcome, plan)),
                Solved::Failed { cyclic } => return Ok(Solved::Failed { cyclic }),
            }
        }
        Ok(Solved::Plan(branches))
    }

    /// Positive-probability outcomes of `action`, after checking that the
    /// distribution is well formed.
    fn validated_outcomes(
        &self,
        state: &P::State,
        action: &P::Action,
    ) -> SearchResult<Vec<P::State>> {
        let outcomes = self.problem.outcomes(state, action);
        let fail = |reason: String| {
            let err = SearchError::InvalidDistribution {
                context: format!("{action:?} in {state:?}"),
                reason,
            };
            warn!(%err, "problem returned an invalid distribution");
            err
        };

        if outcomes.is_empty() {
            return Err(fail("no outcomes".to_string()));
        }
        let mut total = 0.0;
        for (outcome, p) in &outcomes {
            if !p.is_finite() || *p < 0.0 {
                return Err(fail(format!("probability {p} for outcome {outcome:?}")));
            }
            total += p;
        }
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(fail(format!("probabilities sum to {total}")));
        }

        Ok(outcomes
            .into_iter()
            .filter(|(_, p)| *p > 0.0)
            .map(|(s, _)| s)
            .collect())
    }

    /// Counters from the last search. `nodes_expanded` counts OR nodes
    /// expanded, `nodes_generated` the outcome states considered.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
