//! The erratic two-cell vacuum world.
//!
//! Sucking a dirty cell cleans it and sometimes the other cell too; sucking
//! a clean cell sometimes deposits dirt. Moves are deterministic.

use serde::{Deserialize, Serialize};

use crate::core::UncertainProblem;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VacuumAction {
    Suck,
    Left,
    Right,
}

/// Robot position and dirt per cell (`[left, right]`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VacuumState {
    pub robot: Side,
    pub dirty: [bool; 2],
}

/// The erratic vacuum world. Goal: both cells clean.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErraticVacuum {
    initial: VacuumState,
}

impl Default for ErraticVacuum {
    /// Robot on the left, both cells dirty.
    fn default() -> Self {
        Self::new(VacuumState {
            robot: Side::Left,
            dirty: [true, true],
        })
    }
}

impl ErraticVacuum {
    #[must_use]
    pub fn new(initial: VacuumState) -> Self {
        Self { initial }
    }
}

/// Merge equal outcome states, keeping first-seen order.
fn merged(outcomes: impl IntoIterator<Item = (VacuumState, f64)>) -> Vec<(VacuumState, f64)> {
    let mut out: Vec<(VacuumState, f64)> = Vec::with_capacity(2);
    for (state, p) in outcomes {
        match out.iter_mut().find(|(s, _)| *s == state) {
            Some(existing) => existing.1 += p,
            None => out.push((state, p)),
        }
    }
    out
}

impl UncertainProblem for ErraticVacuum {
    type State = VacuumState;
    type Action = VacuumAction;

    fn initial_state(&self) -> VacuumState {
        self.initial
    }

    fn actions(&self, state: &VacuumState) -> Vec<VacuumAction> {
        let step = match state.robot {
            Side::Left => VacuumAction::Right,
            Side::Right => VacuumAction::Left,
        };
        vec![VacuumAction::Suck, step]
    }

    fn outcomes(&self, state: &VacuumState, action: &VacuumAction) -> Vec<(VacuumState, f64)> {
        let here = state.robot.index();
        match action {
            VacuumAction::Left => vec![(VacuumState { robot: Side::Left, ..*state }, 1.0)],
            VacuumAction::Right => vec![(VacuumState { robot: Side::Right, ..*state }, 1.0)],
            VacuumAction::Suck if state.dirty[here] => {
                let mut this_only = *state;
                this_only.dirty[here] = false;
                let mut both = this_only;
                both.dirty[state.robot.other().index()] = false;
                merged([(this_only, 0.5), (both, 0.5)])
            }
            VacuumAction::Suck => {
                let mut deposited = *state;
                deposited.dirty[here] = true;
                merged([(*state, 0.5), (deposited, 0.5)])
            }
        }
    }

    fn is_goal(&self, state: &VacuumState) -> bool {
        !state.dirty[0] && !state.dirty[1]
    }
}
