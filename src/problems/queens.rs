//! N-Queens, complete-state formulation.
//!
//! One queen per row; a state lists each row's column. An action moves one
//! row's queen to another column. The heuristic is the number of attacking
//! pairs, which is zero exactly on solutions.

use std::fmt;

use smallvec::SmallVec;

use crate::core::{
    GeneticProblem, HeuristicProblem, SearchError, SearchProblem, SearchResult, SearchRng,
    StateCache,
};

/// Column of the queen in each row.
pub type Board = SmallVec<[u8; 8]>;

/// Default number of memoized conflict counts.
pub const CONFLICT_CACHE_CAPACITY: usize = 100_000;

/// Move the queen in `row` to `col`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueenMove {
    pub row: u8,
    pub col: u8,
}

/// The N-Queens problem on an `n x n` board.
#[derive(Clone, Debug)]
pub struct NQueens {
    n: u8,
    initial: Board,
    conflicts: StateCache<Board, u32>,
}

impl NQueens {
    /// An `n`-queens problem whose initial board is drawn from `seed`.
    pub fn new(n: usize, seed: u64) -> SearchResult<Self> {
        let n = Self::check_size(n)?;
        let mut rng = SearchRng::new(seed);
        let initial = random_board(n, &mut rng);
        Ok(Self::build(n, initial))
    }

    /// A problem starting from an explicit board.
    pub fn with_board(board: &[u8]) -> SearchResult<Self> {
        let n = Self::check_size(board.len())?;
        if let Some(&col) = board.iter().find(|&&c| c >= n) {
            return Err(SearchError::invalid(
                "board",
                format!("column {col} is off a {n}x{n} board"),
            ));
        }
        Ok(Self::build(n, board.iter().copied().collect()))
    }

    /// Replace the conflict cache with one of a different capacity.
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.conflicts = StateCache::new(capacity);
        self
    }

    fn check_size(n: usize) -> SearchResult<u8> {
        match u8::try_from(n) {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(SearchError::invalid(
                "n",
                format!("board size must be in 1..=255, got {n}"),
            )),
        }
    }

    fn build(n: u8, initial: Board) -> Self {
        Self {
            n,
            initial,
            conflicts: StateCache::new(CONFLICT_CACHE_CAPACITY),
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        usize::from(self.n)
    }

    /// Number of attacking queen pairs (same column or diagonal).
    pub fn conflicts(&self, board: &Board) -> u32 {
        self.conflicts
            .get_or_insert_with(board, || count_conflicts(board))
    }

    /// The memo behind [`conflicts`](Self::conflicts).
    #[must_use]
    pub fn cache(&self) -> &StateCache<Board, u32> {
        &self.conflicts
    }
}

fn random_board(n: u8, rng: &mut SearchRng) -> Board {
    (0..n)
        .map(|_| rng.gen_range(0..usize::from(n)) as u8)
        .collect()
}

fn count_conflicts(board: &[u8]) -> u32 {
    let mut pairs = 0;
    for (i, &a) in board.iter().enumerate() {
        for (j, &b) in board.iter().enumerate().skip(i + 1) {
            if a == b || usize::from(a.abs_diff(b)) == j - i {
                pairs += 1;
            }
        }
    }
    pairs
}

impl SearchProblem for NQueens {
    type State = Board;
    type Action = QueenMove;

    fn initial_state(&self) -> Board {
        self.initial.clone()
    }

    fn actions(&self, state: &Board) -> Vec<QueenMove> {
        let mut moves = Vec::with_capacity(state.len() * state.len().saturating_sub(1));
        for (row, &current) in state.iter().enumerate() {
            for col in 0..self.n {
                if col != current {
                    moves.push(QueenMove {
                        row: row as u8,
                        col,
                    });
                }
            }
        }
        moves
    }

    fn result(&self, state: &Board, action: &QueenMove) -> Board {
        let mut next = state.clone();
        next[usize::from(action.row)] = action.col;
        next
    }

    fn is_goal(&self, state: &Board) -> bool {
        self.conflicts(state) == 0
    }
}

impl HeuristicProblem for NQueens {
    fn heuristic(&self, state: &Board) -> f64 {
        f64::from(self.conflicts(state))
    }

    fn sample_state(&self, rng: &mut SearchRng) -> Board {
        random_board(self.n, rng)
    }
}

impl GeneticProblem for NQueens {
    /// One-point crossover: rows before a random cut from `a`, the rest
    /// from `b`.
    fn crossover(&self, a: &Board, b: &Board, rng: &mut SearchRng) -> Board {
        if a.len() < 2 {
            return a.clone();
        }
        let cut = rng.gen_range(1..a.len());
        a[..cut].iter().chain(&b[cut..]).copied().collect()
    }

    /// Move one random row's queen to a random column.
    fn mutate(&self, state: &Board, rng: &mut SearchRng) -> Board {
        let mut next = state.clone();
        let row = rng.gen_range(0..next.len());
        next[row] = rng.gen_range(0..usize::from(self.n)) as u8;
        next
    }
}

/// Board diagram, one row per line, `Q` for queens.
pub struct Diagram<'a>(pub &'a [u8]);

impl fmt::Display for Diagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0.len();
        for (row, &col) in self.0.iter().enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for c in 0..n {
                if c > 0 {
                    f.write_str(" ")?;
                }
                f.write_str(if usize::from(col) == c { "Q" } else { "." })?;
            }
        }
        Ok(())
    }
}
