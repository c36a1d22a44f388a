//! Conditional plans produced by AND-OR search.

use std::rc::Rc;

use smallvec::SmallVec;

use crate::core::UncertainProblem;

/// Branches of one plan node: one sub-plan per possible outcome state.
pub type Branches<S, A> = SmallVec<[(S, Rc<ConditionalPlan<S, A>>); 2]>;

/// A plan that branches on which outcome actually occurred.
///
/// Sub-plans are reference counted: a state reached through several outcome
/// paths shares one memoized sub-plan.
#[derive(Clone, Debug, PartialEq)]
pub enum ConditionalPlan<S, A> {
    /// The current state is a goal; nothing left to do.
    Goal,
    /// Take `action`, observe the resulting state, continue with its branch.
    Act {
        action: A,
        branches: Branches<S, A>,
    },
}

impl<S: PartialEq, A> ConditionalPlan<S, A> {
    #[must_use]
    pub fn is_goal(&self) -> bool {
        matches!(self, ConditionalPlan::Goal)
    }

    /// The action to take now, if any.
    #[must_use]
    pub fn action(&self) -> Option<&A> {
        match self {
            ConditionalPlan::Goal => None,
            ConditionalPlan::Act { action, .. } => Some(action),
        }
    }

    /// The sub-plan to follow after observing `outcome`.
    #[must_use]
    pub fn branch(&self, outcome: &S) -> Option<&ConditionalPlan<S, A>> {
        match self {
            ConditionalPlan::Goal => None,
            ConditionalPlan::Act { branches, .. } => branches
                .iter()
                .find(|(state, _)| state == outcome)
                .map(|(_, plan)| plan.as_ref()),
        }
    }

    /// Longest number of actions along any branch.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            ConditionalPlan::Goal => 0,
            ConditionalPlan::Act { branches, .. } => {
                1 + branches.iter().map(|(_, p)| p.depth()).max().unwrap_or(0)
            }
        }
    }

    /// Number of action nodes, counting shared sub-plans once per use.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ConditionalPlan::Goal => 0,
            ConditionalPlan::Act { branches, .. } => {
                1 + branches.iter().map(|(_, p)| p.len()).sum::<usize>()
            }
        }
    }

    /// True for the trivial plan.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_goal()
    }

    /// Execute the plan from `state` against every combination of outcomes.
    ///
    /// Returns true when every execution ends in a goal state, every planned
    /// action is legal where it is taken, and every positive-probability
    /// outcome has a branch.
    pub fn is_sound_for<P>(&self, problem: &P, state: &S) -> bool
    where
        P: UncertainProblem<State = S, Action = A>,
        A: PartialEq,
    {
        match self {
            ConditionalPlan::Goal => problem.is_goal(state),
            ConditionalPlan::Act { action, .. } => {
                if !problem.actions(state).contains(action) {
                    return false;
                }
                problem
                    .outcomes(state, action)
                    .iter()
                    .filter(|(_, p)| *p > 0.0)
                    .all(|(outcome, _)| {
                        self.branch(outcome)
                            .is_some_and(|sub| sub.is_sound_for(problem, outcome))
                    })
            }
        }
    }
}
