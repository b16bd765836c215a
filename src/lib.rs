//! # Slider puzzle solver
//!
//! State-space search for square sliding-tile puzzles such as the 15- and
//! 24-puzzle.
//!
//! ## Modules
//! - `puzzle`: the immutable [`Board`], slides ([`Move`]), validation,
//!   solvability and random-walk scrambling.
//! - `heuristic`: pluggable distance estimates for A*.
//! - `search`: [`SearchEngine`] with breadth-first search and A*/Dijkstra.

pub mod heuristic;
pub mod puzzle;
pub mod search;

pub use heuristic::{Estimate, Heuristic, UnknownHeuristic};
pub use puzzle::{Board, BoardError, Move};
pub use search::{new_search, Algorithm, Outcome, SearchEngine, SearchResult};
