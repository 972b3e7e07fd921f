use thiserror::Error;

/// A caller-supplied `Puzzle` broke one of its declared invariants. These are
/// programmer errors: the constructor aborts before any `Puzzle` escapes, so
/// no caller-visible state is ever mutated on this path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("puzzle size {size} must be positive")]
    NonPositiveSize { size: i64 },

    #[error("puzzle size {size} exceeds the maximum supported size {max}")]
    SizeTooLarge { size: usize, max: usize },

    #[error("tree at ({row}, {col}) is out of bounds for a {size}x{size} board")]
    TreeOutOfBounds { row: usize, col: usize, size: usize },

    #[error("tree at ({row}, {col}) is listed more than once")]
    DuplicateTree { row: usize, col: usize },

    #[error("expected {expected} row targets, got {actual}")]
    RowTargetLengthMismatch { expected: usize, actual: usize },

    #[error("expected {expected} column targets, got {actual}")]
    ColTargetLengthMismatch { expected: usize, actual: usize },

    #[error(
        "row targets sum to {row_sum} but column targets sum to {col_sum}; both must equal the tree count ({tree_count})"
    )]
    TargetSumMismatch {
        row_sum: u32,
        col_sum: u32,
        tree_count: usize,
    },
}

/// Failure outcomes for a top-level solve attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// Propagation and search both exhausted every branch: no tent placement
    /// satisfies every tree, row target, and column target simultaneously.
    #[error("puzzle has no solution")]
    Infeasible,

    /// A cancellation token was signalled while search was in progress.
    #[error("solve was interrupted before completion")]
    Interrupted,

    /// The input `Puzzle` or `Grid` itself was malformed.
    #[error(transparent)]
    Contract(#[from] ContractViolation),
}
