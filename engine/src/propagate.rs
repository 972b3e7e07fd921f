//! The propagation driver: runs local heuristics to a fixed point, then one
//! region-decomposed line-enumeration pass, and repeats until a full cycle
//! commits nothing or the board is proven infeasible.

use log::{debug, trace};

use crate::board::{Grid, Puzzle};
use crate::heuristics::{find_starved_tree, next_deduction};
use crate::region::propagate_regions;

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
#[error("propagation proved the puzzle has no solution")]
pub struct PropagationInfeasible;

/// Repeatedly applies the local heuristics until they stall, then one
/// region-decomposed line-enumeration pass, until a whole cycle makes no
/// further commits. Returns whether anything changed from the grid's
/// starting state.
pub fn propagate(puzzle: &Puzzle, grid: &mut Grid) -> Result<bool, PropagationInfeasible> {
    let mut changed_overall = false;

    loop {
        let mut cycle_changed = false;

        while let Some(deduction) = next_deduction(puzzle, grid) {
            trace!(
                "propagate: {:?} -> {:?} at ({}, {})",
                deduction.rule, deduction.value, deduction.row, deduction.col
            );
            match grid.set(deduction.row, deduction.col, deduction.value) {
                Ok(true) => {
                    cycle_changed = true;
                    changed_overall = true;
                }
                Ok(false) => break,
                Err(_) => return Err(PropagationInfeasible),
            }
            if find_starved_tree(puzzle, grid).is_some() {
                return Err(PropagationInfeasible);
            }
        }

        match propagate_regions(puzzle, grid) {
            Ok(did_change) => {
                cycle_changed |= did_change;
                changed_overall |= did_change;
            }
            Err(_) => return Err(PropagationInfeasible),
        }

        if find_starved_tree(puzzle, grid).is_some() {
            return Err(PropagationInfeasible);
        }

        if !cycle_changed {
            break;
        }
    }

    debug!(
        "propagate: settled with {} unknown cells remaining",
        grid.count_unknown()
    );
    Ok(changed_overall)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Puzzle};

    #[test]
    fn fully_resolves_a_uniquely_solvable_puzzle() {
        let puzzle = Puzzle::new(3, vec![(0, 1)], vec![1, 0, 0], vec![1, 0, 0]).unwrap();
        let mut grid = puzzle.new_grid();
        let changed = propagate(&puzzle, &mut grid).unwrap();
        assert!(changed);
        assert_eq!(grid.count_unknown(), 0);
        assert_eq!(grid.get(0, 0), Cell::Tent);
    }

    #[test]
    fn detects_infeasible_adjacent_forced_tents() {
        let trees = vec![(0, 0), (0, 1)];
        let puzzle = Puzzle::new(3, trees, vec![0, 2, 0], vec![1, 1, 0]).unwrap();
        let mut grid = puzzle.new_grid();
        assert!(propagate(&puzzle, &mut grid).is_err());
    }

    #[test]
    fn scenario_leaves_strictly_fewer_unknown_cells() {
        let puzzle = Puzzle::new(
            5,
            vec![(1, 1), (3, 3)],
            vec![0, 1, 0, 1, 0],
            vec![1, 0, 0, 0, 1],
        )
        .unwrap();
        let mut grid = puzzle.new_grid();
        // column 2 entirely grass, as in the scenario this mirrors
        for row in 0..5 {
            grid.set(row, 2, Cell::Grass).unwrap();
        }
        let before = grid.count_unknown();
        propagate(&puzzle, &mut grid).unwrap();
        assert!(grid.count_unknown() < before);
        for row in [0usize, 2, 4] {
            for col in 0..5 {
                assert_ne!(grid.get(row, col), Cell::Unknown);
            }
        }
        for col in [1usize, 3] {
            for row in 0..5 {
                assert_ne!(grid.get(row, col), Cell::Unknown);
            }
        }
    }
}
