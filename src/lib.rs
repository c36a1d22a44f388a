//! # sealgo
//!
//! A generic state-space search engine.
//!
//! ## Design Principles
//!
//! 1. **Problem-Agnostic**: Algorithms see states and actions only through
//!    the traits in `core::problem`. They hash, compare and clone states but
//!    never look inside them.
//!
//! 2. **One Algorithm, Many Configurations**: BFS, DFS, Dijkstra, greedy
//!    best-first and A* are the same best-first search with a different
//!    frontier discipline and evaluation strategy.
//!
//! 3. **Failure Is Not an Error**: An exhausted search returns an empty path,
//!    `None` or `false`. `SearchError` is reserved for configuration mistakes
//!    and detectable contract violations, reported before work starts.
//!
//! ## Architecture
//!
//! - **Borrowed Problems**: Every algorithm holds a shared reference to its
//!   problem for its whole life; problems are never mutated.
//!
//! - **Deterministic Randomness**: Stochastic algorithms draw from a seeded
//!   `SearchRng`, so a configuration plus a seed reproduces a run.
//!
//! - **Value-Keyed Memoization**: Expensive per-state predicates are cached
//!   in a bounded LRU `StateCache` owned by the problem.
//!
//! ## Modules
//!
//! - `core`: Problem traits, path steps, errors, RNG, caching, statistics
//! - `frontier`: Best-first search family and iterative deepening
//! - `and_or`: AND-OR search producing conditional plans
//! - `adversarial`: Minimax with alpha-beta pruning
//! - `local`: Hill climbing family, simulated annealing, beam search,
//!   genetic algorithm, random restarts
//! - `problems`: Reference problems (N-Queens, mazes, tic-tac-toe, ...)

pub mod adversarial;
pub mod and_or;
pub mod core;
pub mod frontier;
pub mod local;
pub mod problems;

pub use crate::core::{
    Deterministic, GameProblem, GeneticProblem, HeuristicProblem, Path, Player, SearchError,
    SearchProblem, SearchResult, SearchRng, SearchStats, StateCache, Step, UncertainProblem,
};

pub use crate::frontier::{
    AStar, BestFirstSearch, BreadthFirst, DepthConfig, DepthFirst, Dijkstra, Discipline,
    Evaluator, GreedyBestFirst, IterativeDeepening, PathSearch,
};

pub use crate::and_or::{AndOrSearch, ConditionalPlan};

pub use crate::adversarial::{Minimax, MinimaxConfig};

pub use crate::local::{
    Acceptance, AnnealingConfig, BeamConfig, FirstChoiceHillClimbing, GeneticAlgorithm,
    GeneticConfig, HillClimbing, LocalBeamSearch, LocalConfig, LocalSearch, RandomRestart,
    RestartConfig, SimulatedAnnealing, StochasticHillClimbing,
};
