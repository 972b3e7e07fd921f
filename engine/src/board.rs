//! The `Puzzle`/`Grid` data model: immutable puzzle metadata plus a mutable
//! cell grid, and the orthogonal/8-neighbour helpers every other module
//! builds on.

use arrayvec::ArrayVec;
use serde_derive::{Deserialize, Serialize};

use crate::errors::ContractViolation;
use crate::MAX_SIZE;

/// A single board cell. The discriminants match the wire encoding used in
/// tests and trace output: UNKNOWN=0, TREE=1, TENT=2, GRASS=3.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    Unknown = 0,
    Tree = 1,
    Tent = 2,
    Grass = 3,
}

impl Cell {
    pub fn is_unknown(self) -> bool {
        matches!(self, Cell::Unknown)
    }

    pub fn is_tent(self) -> bool {
        matches!(self, Cell::Tent)
    }

    pub fn is_tree(self) -> bool {
        matches!(self, Cell::Tree)
    }

    pub fn is_grass(self) -> bool {
        matches!(self, Cell::Grass)
    }
}

/// Immutable puzzle metadata: board size, tree positions, and per-line
/// tent targets. Constructed once and never mutated; every invariant is
/// checked up front so a `Puzzle` that exists is always well-formed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Puzzle {
    size: usize,
    trees: Vec<(usize, usize)>,
    row_target: Vec<u32>,
    col_target: Vec<u32>,
}

impl Puzzle {
    pub fn new(
        size: usize,
        trees: Vec<(usize, usize)>,
        row_target: Vec<u32>,
        col_target: Vec<u32>,
    ) -> Result<Puzzle, ContractViolation> {
        if size == 0 {
            return Err(ContractViolation::NonPositiveSize { size: 0 });
        }
        if size > MAX_SIZE {
            return Err(ContractViolation::SizeTooLarge {
                size,
                max: MAX_SIZE,
            });
        }
        if row_target.len() != size {
            return Err(ContractViolation::RowTargetLengthMismatch {
                expected: size,
                actual: row_target.len(),
            });
        }
        if col_target.len() != size {
            return Err(ContractViolation::ColTargetLengthMismatch {
                expected: size,
                actual: col_target.len(),
            });
        }
        let mut seen = std::collections::HashSet::with_capacity(trees.len());
        for &(row, col) in &trees {
            if row >= size || col >= size {
                return Err(ContractViolation::TreeOutOfBounds { row, col, size });
            }
            if !seen.insert((row, col)) {
                return Err(ContractViolation::DuplicateTree { row, col });
            }
        }

        let row_sum: u32 = row_target.iter().sum();
        let col_sum: u32 = col_target.iter().sum();
        if row_sum != col_sum || row_sum as usize != trees.len() {
            return Err(ContractViolation::TargetSumMismatch {
                row_sum,
                col_sum,
                tree_count: trees.len(),
            });
        }

        Ok(Puzzle {
            size,
            trees,
            row_target,
            col_target,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn trees(&self) -> &[(usize, usize)] {
        &self.trees
    }

    pub fn row_target(&self, row: usize) -> u32 {
        self.row_target[row]
    }

    pub fn col_target(&self, col: usize) -> u32 {
        self.col_target[col]
    }

    pub fn row_targets(&self) -> &[u32] {
        &self.row_target
    }

    pub fn col_targets(&self) -> &[u32] {
        &self.col_target
    }

    pub fn is_tree(&self, row: usize, col: usize) -> bool {
        self.trees.contains(&(row, col))
    }

    /// A fresh grid for this puzzle: trees marked, everything else UNKNOWN,
    /// budgets initialized from the puzzle's own targets.
    pub fn new_grid(&self) -> Grid {
        let mut grid = Grid::blank(self.size, self.row_target.clone(), self.col_target.clone());
        for &(row, col) in &self.trees {
            grid.cells[row * self.size + col] = Cell::Tree;
        }
        grid
    }
}

/// The mutable per-solve board state: cell values plus the running tent
/// counts and remaining budgets per row/column, kept O(1) to query.
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    row_target: Vec<u32>,
    col_target: Vec<u32>,
    row_tents: Vec<u32>,
    col_tents: Vec<u32>,
}

impl Grid {
    fn blank(size: usize, row_target: Vec<u32>, col_target: Vec<u32>) -> Grid {
        Grid {
            size,
            cells: vec![Cell::Unknown; size * size],
            row_target,
            col_target,
            row_tents: vec![0; size],
            col_tents: vec![0; size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }

    pub fn row_tents(&self, row: usize) -> u32 {
        self.row_tents[row]
    }

    pub fn col_tents(&self, col: usize) -> u32 {
        self.col_tents[col]
    }

    pub fn row_remaining(&self, row: usize) -> u32 {
        self.row_target[row] - self.row_tents[row]
    }

    pub fn col_remaining(&self, col: usize) -> u32 {
        self.col_target[col] - self.col_tents[col]
    }

    pub fn row_target(&self, row: usize) -> u32 {
        self.row_target[row]
    }

    pub fn col_target(&self, col: usize) -> u32 {
        self.col_target[col]
    }

    /// Commits `value` at `(row, col)`. Idempotent when the cell already
    /// holds `value`. Returns `Ok(true)` when a change was made, `Ok(false)`
    /// when it was a no-op, and `Err` when the commit would break a Grid
    /// invariant (overwriting a TREE cell, placing a TENT 8-adjacent to
    /// another TENT, or exceeding a row/column tent budget). A rejected
    /// commit never partially applies.
    pub fn set(&mut self, row: usize, col: usize, value: Cell) -> Result<bool, GridInvariant> {
        let current = self.get(row, col);
        if current == value {
            return Ok(false);
        }
        if current == Cell::Tree {
            return Err(GridInvariant::TreeOverwrite { row, col });
        }
        if value == Cell::Tent {
            if self.row_tents[row] + 1 > self.row_target[row] {
                return Err(GridInvariant::RowBudgetExceeded { row });
            }
            if self.col_tents[col] + 1 > self.col_target[col] {
                return Err(GridInvariant::ColBudgetExceeded { col });
            }
            for (nr, nc) in neighbors8(row, col, self.size) {
                if self.get(nr, nc) == Cell::Tent {
                    return Err(GridInvariant::AdjacentTents {
                        first: (nr, nc),
                        second: (row, col),
                    });
                }
            }
        }

        if current == Cell::Tent {
            self.row_tents[row] -= 1;
            self.col_tents[col] -= 1;
        }
        if value == Cell::Tent {
            self.row_tents[row] += 1;
            self.col_tents[col] += 1;
        }
        self.cells[row * self.size + col] = value;
        Ok(true)
    }

    pub fn orthogonal_neighbors(&self, row: usize, col: usize) -> ArrayVec<(usize, usize), 4> {
        orthogonal_neighbors(row, col, self.size)
    }

    pub fn neighbors8(&self, row: usize, col: usize) -> ArrayVec<(usize, usize), 8> {
        neighbors8(row, col, self.size)
    }

    pub fn count_unknown(&self) -> usize {
        self.cells.iter().filter(|c| c.is_unknown()).count()
    }
}

pub fn orthogonal_neighbors(row: usize, col: usize, size: usize) -> ArrayVec<(usize, usize), 4> {
    let mut out = ArrayVec::new();
    if row > 0 {
        out.push((row - 1, col));
    }
    if row + 1 < size {
        out.push((row + 1, col));
    }
    if col > 0 {
        out.push((row, col - 1));
    }
    if col + 1 < size {
        out.push((row, col + 1));
    }
    out
}

pub fn neighbors8(row: usize, col: usize, size: usize) -> ArrayVec<(usize, usize), 8> {
    let mut out = ArrayVec::new();
    let row = row as isize;
    let col = col as isize;
    for dr in -1isize..=1 {
        for dc in -1isize..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let r = row + dr;
            let c = col + dc;
            if r >= 0 && c >= 0 && (r as usize) < size && (c as usize) < size {
                out.push((r as usize, c as usize));
            }
        }
    }
    out
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum GridInvariant {
    #[error("cannot overwrite tree at ({row}, {col})")]
    TreeOverwrite { row: usize, col: usize },
    #[error("row {row} tent budget exceeded")]
    RowBudgetExceeded { row: usize },
    #[error("column {col} tent budget exceeded")]
    ColBudgetExceeded { col: usize },
    #[error("tent at {second:?} would touch tent at {first:?}")]
    AdjacentTents {
        first: (usize, usize),
        second: (usize, usize),
    },
}
