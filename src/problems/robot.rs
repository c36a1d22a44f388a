//! Grid robot whose moves sometimes fail.
//!
//! Each move reaches the neighboring cell with probability `1 - slip` and
//! leaves the robot in place otherwise. With any slip at all, staying put
//! is a cycle, so AND-OR search finds no acyclic plan.

use crate::core::{SearchError, SearchResult, UncertainProblem};

use super::maze::{Cell, Move};

/// A robot on an open `rows x cols` grid, from the top-left corner to the
/// bottom-right one.
#[derive(Clone, Debug, PartialEq)]
pub struct SlipperyRobot {
    rows: u16,
    cols: u16,
    slip: f64,
}

impl SlipperyRobot {
    /// Probability that a move leaves the robot in place.
    pub const DEFAULT_SLIP: f64 = 0.2;

    pub fn new(rows: u16, cols: u16, slip: f64) -> SearchResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(SearchError::invalid("grid", "grid is empty"));
        }
        if !(0.0..1.0).contains(&slip) {
            return Err(SearchError::invalid(
                "slip",
                format!("must be in [0, 1), got {slip}"),
            ));
        }
        Ok(Self { rows, cols, slip })
    }

    #[must_use]
    pub fn goal(&self) -> Cell {
        Cell::new(self.rows - 1, self.cols - 1)
    }

    fn step(&self, cell: Cell, mv: Move) -> Option<Cell> {
        let next = match mv {
            Move::Up => Cell::new(cell.row.checked_sub(1)?, cell.col),
            Move::Down => Cell::new(cell.row + 1, cell.col),
            Move::Left => Cell::new(cell.row, cell.col.checked_sub(1)?),
            Move::Right => Cell::new(cell.row, cell.col + 1),
        };
        (next.row < self.rows && next.col < self.cols).then_some(next)
    }
}

impl UncertainProblem for SlipperyRobot {
    type State = Cell;
    type Action = Move;

    fn initial_state(&self) -> Cell {
        Cell::new(0, 0)
    }

    fn actions(&self, state: &Cell) -> Vec<Move> {
        Move::ALL
            .into_iter()
            .filter(|&mv| self.step(*state, mv).is_some())
            .collect()
    }

    fn outcomes(&self, state: &Cell, action: &Move) -> Vec<(Cell, f64)> {
        match self.step(*state, *action) {
            Some(next) if self.slip > 0.0 => vec![(next, 1.0 - self.slip), (*state, self.slip)],
            Some(next) => vec![(next, 1.0)],
            None => vec![(*state, 1.0)],
        }
    }

    fn is_goal(&self, state: &Cell) -> bool {
        *state == self.goal()
    }
}
