//! The cheapest and weakest of the three strategies: local heuristics only,
//! re-derived from scratch on every call. Nothing is remembered between
//! moves.

use tents::board::{Cell, Puzzle};
use tents::heuristics::next_deduction;
use tents::Move;

pub struct GreedyBot {
    puzzle: Puzzle,
    grid: tents::board::Grid,
}

impl GreedyBot {
    pub fn new(puzzle: Puzzle, grid: tents::board::Grid) -> Self {
        GreedyBot { puzzle, grid }
    }

    pub fn grid(&self) -> &tents::board::Grid {
        &self.grid
    }

    /// Applies an external move (e.g. a human player's placement) to the
    /// bot's own view of the board.
    pub fn apply(&mut self, row: usize, col: usize, value: Cell) {
        let _ = self.grid.set(row, col, value);
    }

    /// Runs the six local deduction rules once, in priority order, over the
    /// live grid. `cells_scanned` reports a full-board scan cost since the
    /// heuristics do not track a finer-grained counter themselves.
    pub fn get_best_move(&self) -> Option<Move> {
        let deduction = next_deduction(&self.puzzle, &self.grid)?;
        let size = self.puzzle.size();
        Some(Move {
            row: deduction.row,
            col: deduction.col,
            value: deduction.value,
            cells_scanned: (size * size) as u64,
        })
    }
}
