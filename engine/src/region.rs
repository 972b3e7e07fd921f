//! Region decomposition: partitions the UNKNOWN cells into connected
//! components under 8-neighbour adjacency, then restricts line enumeration
//! to the rows/columns each component actually touches. Soundness-preserving:
//! when at most one component exists, this degenerates to running the line
//! enumerator over every row and column.

use std::collections::{HashSet, VecDeque};

use crate::board::{Cell, Grid, Puzzle};
use crate::line::{enumerate_line, forced_from_completions};

/// A maximal 8-connected group of UNKNOWN cells, plus the distinct rows and
/// columns it touches.
#[derive(Debug, Clone)]
pub struct Region {
    pub cells: Vec<(usize, usize)>,
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
}

/// Finds the connected components of the UNKNOWN-cell graph under 8-adjacency.
pub fn connected_components(grid: &Grid) -> Vec<Region> {
    let size = grid.size();
    let mut visited = vec![false; size * size];
    let mut regions = Vec::new();

    for row in 0..size {
        for col in 0..size {
            if visited[row * size + col] || !grid.get(row, col).is_unknown() {
                continue;
            }
            let mut cells = Vec::new();
            let mut rows = HashSet::new();
            let mut cols = HashSet::new();
            let mut queue = VecDeque::new();
            queue.push_back((row, col));
            visited[row * size + col] = true;

            while let Some((r, c)) = queue.pop_front() {
                cells.push((r, c));
                rows.insert(r);
                cols.insert(c);
                for (nr, nc) in grid.neighbors8(r, c) {
                    if !visited[nr * size + nc] && grid.get(nr, nc).is_unknown() {
                        visited[nr * size + nc] = true;
                        queue.push_back((nr, nc));
                    }
                }
            }

            let mut rows: Vec<_> = rows.into_iter().collect();
            let mut cols: Vec<_> = cols.into_iter().collect();
            rows.sort_unstable();
            cols.sort_unstable();
            regions.push(Region { cells, rows, cols });
        }
    }

    regions
}

/// Runs the line enumerator over exactly the lines the board's regions
/// touch and applies every forced cell it finds. Returns `Ok(true)` if any
/// cell changed, `Ok(false)` if the board was already stable, and `Err` if
/// a line turns out to have no legal completion (board-level infeasibility).
pub fn propagate_regions(puzzle: &Puzzle, grid: &mut Grid) -> Result<bool, LineInfeasible> {
    let regions = connected_components(grid);
    let (rows, cols) = if regions.len() <= 1 {
        let all_rows = (0..grid.size()).collect::<Vec<_>>();
        let all_cols = (0..grid.size()).collect::<Vec<_>>();
        (all_rows, all_cols)
    } else {
        let mut rows = HashSet::new();
        let mut cols = HashSet::new();
        for region in &regions {
            rows.extend(region.rows.iter().copied());
            cols.extend(region.cols.iter().copied());
        }
        (rows.into_iter().collect(), cols.into_iter().collect())
    };

    let mut changed = false;

    for row in rows {
        let line: Vec<Cell> = (0..grid.size()).map(|col| grid.get(row, col)).collect();
        let completions = enumerate_line(grid.size(), puzzle.row_target(row), &line);
        if completions.is_empty() {
            return Err(LineInfeasible::Row(row));
        }
        for (col, value) in forced_from_completions(&completions) {
            if grid.get(row, col).is_unknown() {
                let did_change = grid.set(row, col, value).map_err(|_| LineInfeasible::Row(row))?;
                changed |= did_change;
            }
        }
    }

    for col in cols {
        let line: Vec<Cell> = (0..grid.size()).map(|row| grid.get(row, col)).collect();
        let completions = enumerate_line(grid.size(), puzzle.col_target(col), &line);
        if completions.is_empty() {
            return Err(LineInfeasible::Col(col));
        }
        for (row, value) in forced_from_completions(&completions) {
            if grid.get(row, col).is_unknown() {
                let did_change = grid.set(row, col, value).map_err(|_| LineInfeasible::Col(col))?;
                changed |= did_change;
            }
        }
    }

    Ok(changed)
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum LineInfeasible {
    #[error("row {0} has no legal completion")]
    Row(usize),
    #[error("column {0} has no legal completion")]
    Col(usize),
}
