//! The backtracking solver: tree-indexed depth-first search with
//! minimum-remaining-values variable ordering, forward checking on
//! row/column budgets, and 8-neighbour adjacency checks. Used once
//! propagation stalls with UNKNOWN cells remaining.

use log::{debug, trace};

use crate::board::{Cell, Grid, Puzzle};
use crate::cancel::CancellationToken;

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("no tent placement satisfies every tree and every row/column target")]
    Infeasible,
    #[error("search was interrupted before completion")]
    Interrupted,
}

/// Completes `grid` in place. On success every UNKNOWN cell has become
/// TENT or GRASS. On failure `grid` is restored to its pre-call state.
pub fn search(
    puzzle: &Puzzle,
    grid: &mut Grid,
    cancel: Option<&CancellationToken>,
) -> Result<(), SearchError> {
    let remaining: Vec<(usize, usize)> = puzzle
        .trees()
        .iter()
        .copied()
        .filter(|&(r, c)| !tree_is_satisfied(grid, r, c))
        .collect();

    debug!("search: starting with {} unsatisfied trees", remaining.len());

    if solve_trees(puzzle, grid, &remaining, cancel)? {
        finalize_grass(grid);
        Ok(())
    } else {
        Err(SearchError::Infeasible)
    }
}

fn tree_is_satisfied(grid: &Grid, row: usize, col: usize) -> bool {
    grid.orthogonal_neighbors(row, col)
        .into_iter()
        .any(|(r, c)| grid.get(r, c).is_tent())
}

/// The orthogonal neighbours of `(row, col)` that are still legal tent
/// spots: UNKNOWN, not 8-adjacent to an existing tent, and within both
/// row and column budget.
fn domain(grid: &Grid, row: usize, col: usize) -> Vec<(usize, usize)> {
    grid.orthogonal_neighbors(row, col)
        .into_iter()
        .filter(|&(r, c)| grid.get(r, c).is_unknown())
        .filter(|&(r, c)| grid.row_remaining(r) > 0 && grid.col_remaining(c) > 0)
        .filter(|&(r, c)| {
            grid.neighbors8(r, c)
                .into_iter()
                .all(|(nr, nc)| !grid.get(nr, nc).is_tent())
        })
        .collect()
}

struct EditRecord {
    tent: (usize, usize),
    grassed: Vec<(usize, usize)>,
}

fn place_tent(grid: &mut Grid, row: usize, col: usize) -> EditRecord {
    grid.set(row, col, Cell::Tent)
        .expect("domain() only offers cells that legally accept a tent");
    let mut grassed = Vec::new();
    for (r, c) in grid.neighbors8(row, col) {
        if grid.get(r, c).is_unknown() {
            grid.set(r, c, Cell::Grass).expect("grassing an UNKNOWN neighbor cannot fail");
            grassed.push((r, c));
        }
    }
    EditRecord {
        tent: (row, col),
        grassed,
    }
}

fn undo(grid: &mut Grid, edit: EditRecord) {
    for (r, c) in edit.grassed {
        grid.set(r, c, Cell::Unknown).expect("undo cannot violate any invariant");
    }
    let (r, c) = edit.tent;
    grid.set(r, c, Cell::Unknown).expect("undo cannot violate any invariant");
}

/// Recursively satisfies every tree in `remaining`. Returns `Ok(true)` on
/// success (grid mutated to a full solution), `Ok(false)` if this subtree
/// has no solution (grid restored to its state on entry).
fn solve_trees(
    puzzle: &Puzzle,
    grid: &mut Grid,
    remaining: &[(usize, usize)],
    cancel: Option<&CancellationToken>,
) -> Result<bool, SearchError> {
    if let Some(token) = cancel {
        if token.is_cancelled() {
            return Err(SearchError::Interrupted);
        }
    }

    let unsatisfied: Vec<(usize, usize)> = remaining
        .iter()
        .copied()
        .filter(|&(r, c)| !tree_is_satisfied(grid, r, c))
        .collect();

    if unsatisfied.is_empty() {
        let size = grid.size();
        let budgets_closed = (0..size).all(|row| grid.row_remaining(row) == 0)
            && (0..size).all(|col| grid.col_remaining(col) == 0);
        return Ok(budgets_closed);
    }

    let mut best_index = 0;
    let mut best_domain = domain(grid, unsatisfied[0].0, unsatisfied[0].1);
    for (i, &(r, c)) in unsatisfied.iter().enumerate().skip(1) {
        let candidate = domain(grid, r, c);
        if candidate.len() < best_domain.len() {
            best_index = i;
            best_domain = candidate;
        }
        if best_domain.is_empty() {
            break;
        }
    }

    if best_domain.is_empty() {
        trace!("search: tree {:?} has no legal domain, backtracking", unsatisfied[best_index]);
        return Ok(false);
    }

    let chosen_tree = unsatisfied[best_index];
    let rest: Vec<(usize, usize)> = unsatisfied
        .iter()
        .copied()
        .filter(|&t| t != chosen_tree)
        .collect();

    for (row, col) in best_domain {
        let edit = place_tent(grid, row, col);
        if solve_trees(puzzle, grid, &rest, cancel)? {
            return Ok(true);
        }
        undo(grid, edit);
    }

    Ok(false)
}

fn finalize_grass(grid: &mut Grid) {
    let size = grid.size();
    for row in 0..size {
        for col in 0..size {
            if grid.get(row, col).is_unknown() {
                grid.set(row, col, Cell::Grass).expect("a closed-budget board never needs more tents");
            }
        }
    }
}
