//! Four-connected grid maze with unit step cost.

use serde::{Deserialize, Serialize};

use crate::core::{HeuristicProblem, SearchError, SearchProblem, SearchResult, SearchRng};

/// A grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: u16,
    pub col: u16,
}

impl Cell {
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub fn manhattan(self, other: Cell) -> u32 {
        u32::from(self.row.abs_diff(other.row)) + u32::from(self.col.abs_diff(other.col))
    }
}

/// One step in a compass direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves in the order actions are generated.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// A rectangular maze. Moves into walls or off the grid are not actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridMaze {
    rows: u16,
    cols: u16,
    walls: Vec<bool>,
    start: Cell,
    goal: Cell,
}

impl GridMaze {
    /// Parse a maze drawn with `#` walls, `.` floor, `S` start and `G` goal.
    ///
    /// ```
    /// use sealgo::problems::{Cell, GridMaze};
    ///
    /// let maze = GridMaze::parse(&["S.#", "..G"]).unwrap();
    /// assert_eq!(maze.start(), Cell::new(0, 0));
    /// assert_eq!(maze.goal(), Cell::new(1, 2));
    /// assert!(maze.is_wall(Cell::new(0, 2)));
    /// ```
    pub fn parse(lines: &[&str]) -> SearchResult<Self> {
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.chars().count());

        let mut walls = Vec::with_capacity(rows * cols);
        let mut start = None;
        let mut goal = None;

        for (r, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(SearchError::invalid(
                    "maze",
                    format!("row {r} has {} cells, expected {cols}", line.chars().count()),
                ));
            }
            for (c, ch) in line.chars().enumerate() {
                let cell = Cell::new(r as u16, c as u16);
                match ch {
                    '#' => walls.push(true),
                    '.' => walls.push(false),
                    'S' => {
                        start = Some(cell);
                        walls.push(false);
                    }
                    'G' => {
                        goal = Some(cell);
                        walls.push(false);
                    }
                    other => {
                        return Err(SearchError::invalid(
                            "maze",
                            format!("unexpected {other:?} at row {r}, column {c}"),
                        ))
                    }
                }
            }
        }

        let start = start.ok_or_else(|| SearchError::invalid("maze", "no start cell `S`"))?;
        let goal = goal.ok_or_else(|| SearchError::invalid("maze", "no goal cell `G`"))?;
        Self::from_walls(rows, cols, walls, start, goal)
    }

    /// Build a maze from a row-major wall mask.
    pub fn from_walls(
        rows: usize,
        cols: usize,
        walls: Vec<bool>,
        start: Cell,
        goal: Cell,
    ) -> SearchResult<Self> {
        let (Ok(r), Ok(c)) = (u16::try_from(rows), u16::try_from(cols)) else {
            return Err(SearchError::invalid("maze", "grid too large"));
        };
        if rows == 0 || cols == 0 {
            return Err(SearchError::invalid("maze", "grid is empty"));
        }
        if walls.len() != rows * cols {
            return Err(SearchError::invalid(
                "maze",
                format!("{} wall flags for a {rows}x{cols} grid", walls.len()),
            ));
        }

        let maze = Self {
            rows: r,
            cols: c,
            walls,
            start,
            goal,
        };
        for (name, cell) in [("start", start), ("goal", goal)] {
            if !maze.contains(cell) || maze.is_wall(cell) {
                return Err(SearchError::invalid(
                    "maze",
                    format!("{name} {cell:?} is off the grid or inside a wall"),
                ));
            }
        }
        Ok(maze)
    }

    #[must_use]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[must_use]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (usize::from(self.rows), usize::from(self.cols))
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Walls and off-grid cells are both blocked.
    #[must_use]
    pub fn is_wall(&self, cell: Cell) -> bool {
        !self.contains(cell)
            || self.walls[usize::from(cell.row) * usize::from(self.cols) + usize::from(cell.col)]
    }

    /// The cell one step away, if it is on the grid.
    #[must_use]
    pub fn neighbor(&self, cell: Cell, mv: Move) -> Option<Cell> {
        let (row, col) = match mv {
            Move::Up => (cell.row.checked_sub(1)?, cell.col),
            Move::Down => (cell.row.checked_add(1)?, cell.col),
            Move::Left => (cell.row, cell.col.checked_sub(1)?),
            Move::Right => (cell.row, cell.col.checked_add(1)?),
        };
        let next = Cell::new(row, col);
        self.contains(next).then_some(next)
    }

    /// Every open cell, row-major.
    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows)
            .flat_map(move |r| (0..self.cols).map(move |c| Cell::new(r, c)))
            .filter(|&cell| !self.is_wall(cell))
    }
}

impl SearchProblem for GridMaze {
    type State = Cell;
    type Action = Move;

    fn initial_state(&self) -> Cell {
        self.start
    }

    fn actions(&self, state: &Cell) -> Vec<Move> {
        Move::ALL
            .into_iter()
            .filter(|&mv| self.neighbor(*state, mv).is_some_and(|n| !self.is_wall(n)))
            .collect()
    }

    fn result(&self, state: &Cell, action: &Move) -> Cell {
        match self.neighbor(*state, *action) {
            Some(next) if !self.is_wall(next) => next,
            _ => *state,
        }
    }

    fn is_goal(&self, state: &Cell) -> bool {
        *state == self.goal
    }
}

impl HeuristicProblem for GridMaze {
    /// Manhattan distance to the goal; admissible and consistent.
    fn heuristic(&self, state: &Cell) -> f64 {
        f64::from(state.manhattan(self.goal))
    }

    /// A uniformly random open cell.
    fn sample_state(&self, rng: &mut SearchRng) -> Cell {
        let open: Vec<Cell> = self.open_cells().collect();
        rng.choose(&open).copied().unwrap_or(self.start)
    }
}
