//! The middle tier: local heuristics plus one pass of the line enumerator
//! and region decomposer, re-run from scratch every call. Nothing is
//! cached between calls; every move recomputes propagation from the live
//! grid as it stands.

use tents::board::{Cell, Grid, Puzzle};
use tents::propagate::propagate;
use tents::Move;

pub struct SmartBot {
    puzzle: Puzzle,
    grid: Grid,
}

impl SmartBot {
    pub fn new(puzzle: Puzzle, grid: Grid) -> Self {
        SmartBot { puzzle, grid }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn apply(&mut self, row: usize, col: usize, value: Cell) {
        let _ = self.grid.set(row, col, value);
    }

    /// Runs propagation to a fixed point on a scratch copy of the live grid
    /// and diffs the two: the first cell propagation newly decided, tents
    /// before grass, row-major. Unlike the cached [`crate::backbot::BackBot`],
    /// nothing here survives between calls.
    pub fn get_best_move(&self) -> Option<Move> {
        let mut scratch = self.grid.clone();
        if propagate(&self.puzzle, &mut scratch).is_err() {
            return None;
        }

        let size = self.puzzle.size();
        let mut cells_scanned = 0u64;

        for row in 0..size {
            for col in 0..size {
                cells_scanned += 1;
                if self.grid.get(row, col).is_unknown() && scratch.get(row, col) == Cell::Tent {
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
                if self.grid.get(row, col).is_unknown() && scratch.get(row, col) == Cell::Grass {
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
}
