//! The strongest tier: full propagation followed by backtracking search,
//! solved once and cached. Later calls skip straight to diffing the cached
//! solution against the live grid instead of resolving from scratch.

use log::info;

use tents::board::{Cell, Grid, Puzzle};
use tents::solve::next_move_from_solution;
use tents::{solve, Move};

pub struct BackBot {
    puzzle: Puzzle,
    grid: Grid,
    solution: Option<Grid>,
}

impl BackBot {
    pub fn new(puzzle: Puzzle, grid: Grid) -> Self {
        BackBot {
            puzzle,
            grid,
            solution: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Applies an external move to the bot's own view of the board. The
    /// cached solution is unaffected: it was already computed against the
    /// original puzzle, not the live grid, so it remains valid as long as
    /// the move agrees with it.
    pub fn apply(&mut self, row: usize, col: usize, value: Cell) {
        let _ = self.grid.set(row, col, value);
    }

    /// Solves once (caching the result) on the first call, then serves
    /// every subsequent call as a cheap diff against the cached solution.
    pub fn get_best_move(&mut self) -> Option<Move> {
        if self.solution.is_none() {
            match solve(&self.puzzle, self.puzzle.new_grid()) {
                Ok(solved) => {
                    info!("backbot: solved and cached a full solution");
                    self.solution = Some(solved);
                }
                Err(_) => return None,
            }
        }
        let solution = self.solution.as_ref().expect("just populated above");
        next_move_from_solution(solution, &self.grid)
    }
}
