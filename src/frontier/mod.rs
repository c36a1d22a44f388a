//! Uninformed and informed frontier search.
//!
//! Every algorithm here is [`BestFirstSearch`] with a fixed discipline and
//! evaluation strategy, except [`IterativeDeepening`], which reruns the
//! depth-limited configuration with growing bounds.
//!
//! | Algorithm | Discipline | Evaluator |
//! |---|---|---|
//! | BFS | FIFO | [`Unscored`] |
//! | DFS | LIFO | [`Unscored`] |
//! | Dijkstra | priority | [`PathCost`] |
//! | Greedy best-first | priority | [`Greedy`] |
//! | A* | priority | [`WeightedAStar`] |

pub mod best_first;
pub mod config;
pub mod eval;
pub mod iterative;
pub mod queue;

pub use best_first::{
    AStar, BestFirstSearch, BreadthFirst, DepthFirst, Dijkstra, GreedyBestFirst, PathSearch,
};
pub use config::DepthConfig;
pub use eval::{Evaluator, Greedy, PathCost, Transition, Unscored, WeightedAStar};
pub use iterative::IterativeDeepening;
pub use queue::{Discipline, Frontier, Queued};
