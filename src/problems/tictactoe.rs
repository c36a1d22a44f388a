//! Tic-tac-toe as a two-player zero-sum game.
//!
//! `X` moves first and is the maximizing player. Positions are scored by
//! open lines: `3·X2 + X1 − (3·O2 + O1)`, where `Xk` counts lines holding
//! exactly `k` X marks and no O marks. Won positions score ±100 and full
//! boards without a winner score 0.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{
    GameProblem, HeuristicProblem, Player, SearchError, SearchProblem, SearchResult, StateCache,
};

/// Score of a won position.
pub const WIN_SCORE: f64 = 100.0;

/// Default number of memoized line counts.
pub const PATTERN_CACHE_CAPACITY: usize = 100_000;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A player's mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    #[must_use]
    pub fn player(self) -> Player {
        match self {
            Mark::X => Player::Max,
            Mark::O => Player::Min,
        }
    }
}

/// Nine cells, row-major.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Grid {
    cells: [Option<Mark>; 9],
}

impl Grid {
    #[must_use]
    pub fn get(&self, cell: usize) -> Option<Mark> {
        self.cells.get(cell).copied().flatten()
    }

    fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|c| **c == Some(mark)).count()
    }

    /// The side to move: X when both have placed the same number of marks.
    #[must_use]
    pub fn to_move(&self) -> Mark {
        if self.count(Mark::X) > self.count(Mark::O) {
            Mark::O
        } else {
            Mark::X
        }
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Apply one of the eight board symmetries (0 is the identity).
    fn transformed(&self, symmetry: usize) -> Grid {
        let mut out = Grid::default();
        for (i, mark) in self.cells.iter().enumerate() {
            let (mut r, mut c) = (i / 3, i % 3);
            for _ in 0..symmetry % 4 {
                (r, c) = (c, 2 - r);
            }
            if symmetry >= 4 {
                c = 2 - c;
            }
            out.cells[r * 3 + c] = *mark;
        }
        out
    }

    /// Smallest equivalent grid under rotation and reflection.
    fn canonical(&self) -> Grid {
        (0..8)
            .map(|s| self.transformed(s))
            .min()
            .unwrap_or(*self)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..3 {
                let ch = match self.cells[row * 3 + col] {
                    Some(Mark::X) => 'X',
                    Some(Mark::O) => 'O',
                    None => '.',
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// Per-mark line counts: `x[k]` lines with exactly `k` X marks and no O.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub x: [u8; 4],
    pub o: [u8; 4],
}

fn count_lines(grid: &Grid) -> LineCounts {
    let mut counts = LineCounts::default();
    for line in LINES {
        let marks = line.map(|i| grid.cells[i]);
        let xs = marks.iter().filter(|m| **m == Some(Mark::X)).count();
        let os = marks.iter().filter(|m| **m == Some(Mark::O)).count();
        if os == 0 {
            counts.x[xs] += 1;
        }
        if xs == 0 {
            counts.o[os] += 1;
        }
    }
    counts
}

/// The game, starting from an empty board or a given position.
#[derive(Clone, Debug)]
pub struct TicTacToe {
    initial: Grid,
    reduce_symmetry: bool,
    patterns: StateCache<Grid, LineCounts>,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToe {
    /// Empty board, X to move.
    #[must_use]
    pub fn new() -> Self {
        Self {
            initial: Grid::default(),
            reduce_symmetry: false,
            patterns: StateCache::new(PATTERN_CACHE_CAPACITY),
        }
    }

    /// Start from a position written as nine `X`, `O` or `.` characters,
    /// row-major. Whitespace is ignored.
    pub fn from_position(position: &str) -> SearchResult<Self> {
        let marks: Vec<char> = position.chars().filter(|c| !c.is_whitespace()).collect();
        if marks.len() != 9 {
            return Err(SearchError::invalid(
                "position",
                format!("expected 9 cells, got {}", marks.len()),
            ));
        }

        let mut grid = Grid::default();
        for (i, ch) in marks.into_iter().enumerate() {
            grid.cells[i] = match ch.to_ascii_uppercase() {
                'X' => Some(Mark::X),
                'O' => Some(Mark::O),
                '.' => None,
                other => {
                    return Err(SearchError::invalid(
                        "position",
                        format!("unexpected {other:?} in cell {i}"),
                    ))
                }
            };
        }

        let (x, o) = (grid.count(Mark::X), grid.count(Mark::O));
        if x != o && x != o + 1 {
            return Err(SearchError::invalid(
                "position",
                format!("{x} X marks and {o} O marks cannot occur in play"),
            ));
        }

        let mut game = Self::new();
        game.initial = grid;
        Ok(game)
    }

    /// Offer only one move per class of symmetric results.
    #[must_use]
    pub fn with_symmetry_reduction(mut self, reduce: bool) -> Self {
        self.reduce_symmetry = reduce;
        self
    }

    /// Memoized line counts of `grid`.
    pub fn line_counts(&self, grid: &Grid) -> LineCounts {
        self.patterns.get_or_insert_with(grid, || count_lines(grid))
    }

    #[must_use]
    pub fn winner(&self, grid: &Grid) -> Option<Mark> {
        let counts = self.line_counts(grid);
        if counts.x[3] > 0 {
            Some(Mark::X)
        } else if counts.o[3] > 0 {
            Some(Mark::O)
        } else {
            None
        }
    }

    #[must_use]
    pub fn cache(&self) -> &StateCache<Grid, LineCounts> {
        &self.patterns
    }
}

impl SearchProblem for TicTacToe {
    type State = Grid;
    /// Cell index, 0..9 row-major.
    type Action = u8;

    fn initial_state(&self) -> Grid {
        self.initial
    }

    fn actions(&self, state: &Grid) -> Vec<u8> {
        if self.is_goal(state) {
            return Vec::new();
        }
        let empty = (0..9u8).filter(|&i| state.cells[usize::from(i)].is_none());
        if !self.reduce_symmetry {
            return empty.collect();
        }

        let mut seen = Vec::new();
        empty
            .filter(|i| {
                let canonical = self.result(state, i).canonical();
                if seen.contains(&canonical) {
                    false
                } else {
                    seen.push(canonical);
                    true
                }
            })
            .collect()
    }

    fn result(&self, state: &Grid, action: &u8) -> Grid {
        let mut next = *state;
        let index = usize::from(*action);
        if index < 9 && next.cells[index].is_none() {
            next.cells[index] = Some(state.to_move());
        }
        next
    }

    /// The game is over: someone has won or the board is full.
    fn is_goal(&self, state: &Grid) -> bool {
        self.winner(state).is_some() || state.is_full()
    }
}

impl HeuristicProblem for TicTacToe {
    fn heuristic(&self, state: &Grid) -> f64 {
        let c = self.line_counts(state);
        if c.x[3] > 0 {
            return WIN_SCORE;
        }
        if c.o[3] > 0 {
            return -WIN_SCORE;
        }
        let x = 3 * i32::from(c.x[2]) + i32::from(c.x[1]);
        let o = 3 * i32::from(c.o[2]) + i32::from(c.o[1]);
        f64::from(x - o)
    }
}

impl GameProblem for TicTacToe {
    fn to_move(&self, state: &Grid) -> Player {
        state.to_move().player()
    }
}
