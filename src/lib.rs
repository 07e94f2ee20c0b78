//! # 8-Puzzle Solver Library
//!
//! This library provides the state model for the 3x3 sliding tile puzzle and
//! four search strategies that find a move sequence from a starting board to
//! the goal board.
//!
//! It is used by three binaries:
//! - `solver`: Takes a board and an algorithm, then prints the path, its cost
//!   and search statistics.
//! - `strategy_evaluator`: Runs every strategy over a set of seeded boards and
//!   compares their expansions and timing.
//! - `human_player`: Lets a person slide the tiles from the command line.
//!
//! ## Modules
//! - `engine`: Board representation (`State`), moves (`Move`), the goal
//!   configuration (`Goal`) and neighbor generation.
//! - `heuristics`: Manhattan and Euclidean distance estimates used by A*.
//! - `solver`: Breadth-first, depth-limited, iterative-deepening and A* search,
//!   all returning a `SearchResult`.
//! - `utils`: Parsing boards from text and replaying a found path.
//! - `error`: The `SolveError` type.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;
