//! Local deduction rules: six cheap, single-pass rules that each derive at
//! most one forced cell from the current board state. Applied in a fixed
//! order for move-by-move mode; the order does not affect the set reached
//! once [`crate::propagate`] runs them to a fixed point.

use crate::board::{Cell, Grid, Puzzle};
use crate::cellset::IndexSet;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Rule {
    AdjacencyExclusion,
    RowColSaturation,
    RowColForcing,
    IsolatedTree,
    NoMansLand,
    LockedCandidates,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Deduction {
    pub row: usize,
    pub col: usize,
    pub value: Cell,
    pub rule: Rule,
}

/// Runs the six rules in order and returns the first deduction found, or
/// `None` if no rule fires against the current board.
pub fn next_deduction(puzzle: &Puzzle, grid: &Grid) -> Option<Deduction> {
    adjacency_exclusion(grid)
        .or_else(|| row_col_saturation(puzzle, grid))
        .or_else(|| row_col_forcing(puzzle, grid))
        .or_else(|| isolated_tree(puzzle, grid))
        .or_else(|| no_mans_land(puzzle, grid))
        .or_else(|| locked_candidates(puzzle, grid))
}

/// A tree with no adjacent tent and no remaining UNKNOWN orthogonal
/// neighbour can never be satisfied. Detecting this is how the propagation
/// driver and the backtracking solver agree on what "infeasible" means.
pub fn find_starved_tree(puzzle: &Puzzle, grid: &Grid) -> Option<(usize, usize)> {
    for &(row, col) in puzzle.trees() {
        if tree_is_satisfied(grid, row, col) {
            continue;
        }
        let has_unknown = grid
            .orthogonal_neighbors(row, col)
            .into_iter()
            .any(|(r, c)| grid.get(r, c).is_unknown());
        if !has_unknown {
            return Some((row, col));
        }
    }
    None
}

fn tree_is_satisfied(grid: &Grid, row: usize, col: usize) -> bool {
    grid.orthogonal_neighbors(row, col)
        .into_iter()
        .any(|(r, c)| grid.get(r, c).is_tent())
}

/// The orthogonal UNKNOWN neighbours of an unsatisfied tree; empty for a
/// tree that already has its tent.
fn tree_domain(grid: &Grid, row: usize, col: usize) -> Vec<(usize, usize)> {
    if tree_is_satisfied(grid, row, col) {
        return Vec::new();
    }
    grid.orthogonal_neighbors(row, col)
        .into_iter()
        .filter(|&(r, c)| grid.get(r, c).is_unknown())
        .collect()
}

fn adjacency_exclusion(grid: &Grid) -> Option<Deduction> {
    let size = grid.size();
    for row in 0..size {
        for col in 0..size {
            if !grid.get(row, col).is_unknown() {
                continue;
            }
            let touches_tent = grid
                .neighbors8(row, col)
                .into_iter()
                .any(|(r, c)| grid.get(r, c).is_tent());
            if touches_tent {
                return Some(Deduction {
                    row,
                    col,
                    value: Cell::Grass,
                    rule: Rule::AdjacencyExclusion,
                });
            }
        }
    }
    None
}

fn row_col_saturation(puzzle: &Puzzle, grid: &Grid) -> Option<Deduction> {
    let size = grid.size();
    for row in 0..size {
        if grid.row_remaining(row) == 0 {
            for col in 0..size {
                if grid.get(row, col).is_unknown() {
                    return Some(Deduction {
                        row,
                        col,
                        value: Cell::Grass,
                        rule: Rule::RowColSaturation,
                    });
                }
            }
        }
    }
    for col in 0..size {
        if grid.col_remaining(col) == 0 {
            for row in 0..size {
                if grid.get(row, col).is_unknown() {
                    return Some(Deduction {
                        row,
                        col,
                        value: Cell::Grass,
                        rule: Rule::RowColSaturation,
                    });
                }
            }
        }
    }
    let _ = puzzle;
    None
}

fn row_col_forcing(puzzle: &Puzzle, grid: &Grid) -> Option<Deduction> {
    let size = grid.size();
    for row in 0..size {
        let unknown = (0..size).filter(|&c| grid.get(row, c).is_unknown()).count() as u32;
        if unknown > 0 && grid.row_tents(row) + unknown == puzzle.row_target(row) {
            for col in 0..size {
                if grid.get(row, col).is_unknown() {
                    return Some(Deduction {
                        row,
                        col,
                        value: Cell::Tent,
                        rule: Rule::RowColForcing,
                    });
                }
            }
        }
    }
    for col in 0..size {
        let unknown = (0..size).filter(|&r| grid.get(r, col).is_unknown()).count() as u32;
        if unknown > 0 && grid.col_tents(col) + unknown == puzzle.col_target(col) {
            for row in 0..size {
                if grid.get(row, col).is_unknown() {
                    return Some(Deduction {
                        row,
                        col,
                        value: Cell::Tent,
                        rule: Rule::RowColForcing,
                    });
                }
            }
        }
    }
    None
}

fn isolated_tree(puzzle: &Puzzle, grid: &Grid) -> Option<Deduction> {
    for &(row, col) in puzzle.trees() {
        let domain = tree_domain(grid, row, col);
        if domain.len() == 1 {
            let (r, c) = domain[0];
            return Some(Deduction {
                row: r,
                col: c,
                value: Cell::Tent,
                rule: Rule::IsolatedTree,
            });
        }
    }
    None
}

fn no_mans_land(puzzle: &Puzzle, grid: &Grid) -> Option<Deduction> {
    let size = grid.size();
    for row in 0..size {
        for col in 0..size {
            if !grid.get(row, col).is_unknown() {
                continue;
            }
            let near_tree = grid
                .orthogonal_neighbors(row, col)
                .into_iter()
                .any(|(r, c)| grid.get(r, c).is_tree());
            if !near_tree {
                return Some(Deduction {
                    row,
                    col,
                    value: Cell::Grass,
                    rule: Rule::NoMansLand,
                });
            }
        }
    }
    let _ = puzzle;
    None
}

fn locked_candidates(puzzle: &Puzzle, grid: &Grid) -> Option<Deduction> {
    let size = grid.size();

    for row in 0..size {
        if grid.row_remaining(row) == 0 {
            continue;
        }
        // `reserved` is a bitset over column indices: a tree locked to this
        // row can only reserve one of the row's own `size` columns.
        let mut reserved = IndexSet::new();
        let mut locked_trees = 0u32;
        for &(tr, tc) in puzzle.trees() {
            let domain = tree_domain(grid, tr, tc);
            if domain.is_empty() {
                continue;
            }
            if domain.iter().all(|&(dr, _)| dr == row) {
                locked_trees += 1;
                for &(_, dc) in &domain {
                    reserved.insert(dc as u8);
                }
            }
        }
        if grid.row_tents(row) + locked_trees == puzzle.row_target(row) {
            for col in 0..size {
                if grid.get(row, col).is_unknown() && !reserved.contains(col as u8) {
                    return Some(Deduction {
                        row,
                        col,
                        value: Cell::Grass,
                        rule: Rule::LockedCandidates,
                    });
                }
            }
        }
    }

    for col in 0..size {
        if grid.col_remaining(col) == 0 {
            continue;
        }
        let mut reserved = IndexSet::new();
        let mut locked_trees = 0u32;
        for &(tr, tc) in puzzle.trees() {
            let domain = tree_domain(grid, tr, tc);
            if domain.is_empty() {
                continue;
            }
            if domain.iter().all(|&(_, dc)| dc == col) {
                locked_trees += 1;
                for &(dr, _) in &domain {
                    reserved.insert(dr as u8);
                }
            }
        }
        if grid.col_tents(col) + locked_trees == puzzle.col_target(col) {
            for row in 0..size {
                if grid.get(row, col).is_unknown() && !reserved.contains(row as u8) {
                    return Some(Deduction {
                        row,
                        col,
                        value: Cell::Grass,
                        rule: Rule::LockedCandidates,
                    });
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_exclusion_grasses_neighbor_of_tent() {
        let puzzle = Puzzle::new(3, vec![], vec![1, 0, 0], vec![1, 0, 0]).unwrap();
        let mut grid = puzzle.new_grid();
        grid.set(0, 0, Cell::Tent).unwrap();
        let deduction = next_deduction(&puzzle, &grid).unwrap();
        assert_eq!(deduction.rule, Rule::AdjacencyExclusion);
        assert_eq!(deduction.value, Cell::Grass);
    }

    #[test]
    fn isolated_tree_forces_its_only_unknown_neighbor() {
        // Exercises the rule directly rather than through `next_deduction`,
        // since narrowing a tree to a single legal neighbor this way also
        // tends to saturate its row/column, which would otherwise race with
        // row_col_forcing for the same cell.
        let puzzle = Puzzle::new(3, vec![(1, 1)], vec![0, 1, 0], vec![0, 1, 0]).unwrap();
        let mut grid = puzzle.new_grid();
        grid.set(0, 1, Cell::Grass).unwrap();
        grid.set(2, 1, Cell::Grass).unwrap();
        grid.set(1, 0, Cell::Grass).unwrap();
        let deduction = isolated_tree(&puzzle, &grid).unwrap();
        assert_eq!((deduction.row, deduction.col), (1, 2));
        assert_eq!(deduction.value, Cell::Tent);
    }

    #[test]
    fn no_mans_land_grasses_cell_with_no_adjacent_tree() {
        let puzzle = Puzzle::new(3, vec![(0, 0)], vec![1, 0, 0], vec![1, 0, 0]).unwrap();
        let grid = puzzle.new_grid();
        let deduction = no_mans_land(&puzzle, &grid).unwrap();
        assert_eq!((deduction.row, deduction.col), (0, 2));
        assert_eq!(deduction.value, Cell::Grass);
    }

    #[test]
    fn starved_tree_is_detected() {
        let puzzle = Puzzle::new(3, vec![(1, 1)], vec![0, 1, 0], vec![0, 1, 0]).unwrap();
        let mut grid = puzzle.new_grid();
        for (r, c) in grid.orthogonal_neighbors(1, 1) {
            grid.set(r, c, Cell::Grass).unwrap();
        }
        assert_eq!(find_starved_tree(&puzzle, &grid), Some((1, 1)));
    }
}
