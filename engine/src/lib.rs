//! Core solving engine for the Tents puzzle.
//!
//! The crate exposes a `Puzzle`/`Grid` data model (`board`), a memoized line
//! enumerator (`line`), local deduction rules (`heuristics`), a connected-region
//! decomposition step (`region`), a fixed-point propagation driver
//! (`propagate`), a tree-indexed backtracking search (`search`), and the
//! top-level `solve`/`next_move` entry points (`solve`) that compose them.
//!
//! Puzzle generation, rendering, and any interaction loop are deliberately
//! outside this crate; see `tents-bots` for move-supplying strategies built on
//! top of this API.

/// Practical upper bound on a puzzle's side length, chosen so that a single
/// row or column fits in the bitsets used throughout `line` and `search`.
pub const MAX_SIZE: usize = 64;

pub mod board;
pub mod cancel;
pub mod cellset;
pub mod errors;
pub mod heuristics;
pub mod line;
pub mod propagate;
pub mod region;
pub mod search;
pub mod solve;

pub use board::{Cell, Grid, Puzzle};
pub use errors::{ContractViolation, SolveError};
pub use solve::{solve, Move};
