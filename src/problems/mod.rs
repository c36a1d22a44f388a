//! Reference problems.
//!
//! Small, well-understood problems used by the tests, the benchmarks and the
//! documentation:
//! - `NQueens`: complete-state N-Queens, also a genetic encoding
//! - `GridMaze`: four-connected maze with a Manhattan heuristic
//! - `WeightedGraph`: explicit graph with arbitrary edge costs
//! - `TicTacToe`: 3x3 game for minimax
//! - `ErraticVacuum`: non-deterministic vacuum world with acyclic plans
//! - `SlipperyRobot`: non-deterministic grid whose only plans are cyclic

mod graph;
mod maze;
mod queens;
mod robot;
mod tictactoe;
mod vacuum;

pub use graph::{NodeId, WeightedGraph};
pub use maze::{Cell, GridMaze, Move};
pub use queens::{Board, Diagram, NQueens, QueenMove, CONFLICT_CACHE_CAPACITY};
pub use robot::SlipperyRobot;
pub use tictactoe::{Grid, LineCounts, Mark, TicTacToe, PATTERN_CACHE_CAPACITY, WIN_SCORE};
pub use vacuum::{ErraticVacuum, Side, VacuumAction, VacuumState};
