//! Top-level entry points: `solve` composes propagation with backtracking
//! search; `next_move`/`next_move_from_solution` implement the move stream
//! that diffs a cached solution against a live, partially filled grid.

use log::info;

use crate::board::{Cell, Grid, Puzzle};
use crate::cancel::CancellationToken;
use crate::errors::SolveError;
use crate::propagate::propagate;
use crate::search::{search, SearchError};

/// One cell of the diff between a cached solution and a live, partially
/// filled grid: the next cell the player should fill in, and how many
/// cells the scan inspected to find it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub value: Cell,
    pub cells_scanned: u64,
}

/// Runs propagation to a fixed point, then backtracking search if UNKNOWN
/// cells remain. `initial_grid` is consumed and returned solved; it is
/// typically `puzzle.new_grid()`, or a player's in-progress grid.
pub fn solve(puzzle: &Puzzle, initial_grid: Grid) -> Result<Grid, SolveError> {
    solve_with_cancel(puzzle, initial_grid, None)
}

/// As [`solve`], but polls `cancel` between search decisions so a caller
/// can abort a long-running solve.
pub fn solve_with_cancel(
    puzzle: &Puzzle,
    mut grid: Grid,
    cancel: Option<&CancellationToken>,
) -> Result<Grid, SolveError> {
    if propagate(puzzle, &mut grid).is_err() {
        return Err(SolveError::Infeasible);
    }

    if grid.count_unknown() > 0 {
        match search(puzzle, &mut grid, cancel) {
            Ok(()) => {}
            Err(SearchError::Infeasible) => return Err(SolveError::Infeasible),
            Err(SearchError::Interrupted) => return Err(SolveError::Interrupted),
        }
    }

    info!("solve: completed with 0 unknown cells remaining");
    Ok(grid)
}

/// The lazy, memoized form of the move stream: solves fresh from `puzzle`
/// and diffs against `live_grid`. Callers that want to avoid re-solving on
/// every call should cache the result of [`solve`] themselves and call
/// [`next_move_from_solution`] directly, mirroring how the bots layer
/// caches its own solved grid.
pub fn next_move(puzzle: &Puzzle, live_grid: &Grid) -> Result<Option<Move>, SolveError> {
    let solution = solve(puzzle, puzzle.new_grid())?;
    Ok(next_move_from_solution(&solution, live_grid))
}

/// Diffs a cached solved `Grid` against a live grid: the first UNKNOWN cell
/// (row-major) that the solution has as TENT, else the first UNKNOWN cell
/// at all (to be filled with GRASS), else `None`.
pub fn next_move_from_solution(solution: &Grid, live: &Grid) -> Option<Move> {
    let size = solution.size();
    let mut cells_scanned = 0u64;

    for row in 0..size {
        for col in 0..size {
            cells_scanned += 1;
            if live.get(row, col).is_unknown() && solution.get(row, col).is_tent() {
                return Some(Move {
                    row,
                    col,
                    value: Cell::Tent,
                    cells_scanned,
                });
            }
        }
    }

    for row in 0..size {
        for col in 0..size {
            cells_scanned += 1;
            if live.get(row, col).is_unknown() {
                return Some(Move {
                    row,
                    col,
                    value: Cell::Grass,
                    cells_scanned,
                });
            }
        }
    }

    None
}
