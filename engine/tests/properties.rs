//! Property tests over randomly generated, guaranteed-solvable puzzles.
//! The generator is test-only (puzzle generation is outside the library's
//! public surface) and builds each puzzle by placing tree/tent pairs first,
//! respecting orthogonal and 8-neighbour adjacency, and deriving row/column
//! targets from that placement afterward.

use std::collections::HashSet;

use quickcheck_macros::quickcheck;
use rand::prelude::*;

use tents::board::{neighbors8, orthogonal_neighbors, Cell, Grid};
use tents::{solve, Puzzle};

fn generate_puzzle(seed: u64, size: usize, num_trees: usize) -> Puzzle {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut trees = Vec::new();
    let mut tents = Vec::new();
    let mut occupied = HashSet::new();
    let mut attempts = 0;

    while trees.len() < num_trees && attempts < 10_000 {
        attempts += 1;
        let tr = rng.random_range(0..size);
        let tc = rng.random_range(0..size);
        if occupied.contains(&(tr, tc)) {
            continue;
        }

        let mut candidates = orthogonal_neighbors(tr, tc, size);
        candidates.shuffle(&mut rng);
        let mut placed = false;
        for (nr, nc) in candidates {
            if occupied.contains(&(nr, nc)) {
                continue;
            }
            let touches_tent = neighbors8(nr, nc, size)
                .into_iter()
                .any(|cell| tents.contains(&cell));
            if touches_tent {
                continue;
            }
            tents.push((nr, nc));
            occupied.insert((nr, nc));
            placed = true;
            break;
        }
        if !placed {
            continue;
        }
        trees.push((tr, tc));
        occupied.insert((tr, tc));
    }

    let mut row_target = vec![0u32; size];
    let mut col_target = vec![0u32; size];
    for &(r, c) in &tents {
        row_target[r] += 1;
        col_target[c] += 1;
    }

    Puzzle::new(size, trees, row_target, col_target).expect("generator only emits well-formed puzzles")
}

fn assert_valid_solution(puzzle: &Puzzle, grid: &Grid) {
    let size = grid.size();
    assert_eq!(grid.count_unknown(), 0);

    for row in 0..size {
        assert_eq!(grid.row_remaining(row), 0);
    }
    for col in 0..size {
        assert_eq!(grid.col_remaining(col), 0);
    }

    for &(tr, tc) in puzzle.trees() {
        let tent_neighbors = orthogonal_neighbors(tr, tc, size)
            .into_iter()
            .filter(|&(r, c)| grid.get(r, c) == Cell::Tent)
            .count();
        assert_eq!(tent_neighbors, 1);
    }

    for row in 0..size {
        for col in 0..size {
            if grid.get(row, col) == Cell::Tent {
                for (nr, nc) in neighbors8(row, col, size) {
                    assert_ne!(grid.get(nr, nc), Cell::Tent);
                }
                let paired_tree = orthogonal_neighbors(row, col, size)
                    .into_iter()
                    .filter(|&(r, c)| grid.get(r, c) == Cell::Tree)
                    .count();
                assert_eq!(paired_tree, 1);
            }
        }
    }
}

#[quickcheck]
fn solved_grid_satisfies_every_invariant(seed: u64) -> bool {
    let size = 4 + (seed % 5) as usize;
    let num_trees = 2 + (seed % 3) as usize;
    let puzzle = generate_puzzle(seed, size, num_trees);

    let grid = solve(&puzzle, puzzle.new_grid()).expect("generator-built puzzles are always solvable");
    assert_valid_solution(&puzzle, &grid);
    true
}

#[quickcheck]
fn propagation_is_idempotent(seed: u64) -> bool {
    use tents::propagate::propagate;

    let size = 4 + (seed % 5) as usize;
    let num_trees = 2 + (seed % 3) as usize;
    let puzzle = generate_puzzle(seed, size, num_trees);
    let mut grid = puzzle.new_grid();

    let _ = propagate(&puzzle, &mut grid);
    let before = grid.clone();
    let changed_again = propagate(&puzzle, &mut grid).unwrap_or(false);

    assert!(!changed_again);
    for row in 0..size {
        for col in 0..size {
            assert_eq!(before.get(row, col), grid.get(row, col));
        }
    }
    true
}

#[quickcheck]
fn rewiped_solution_resolves_to_a_valid_solution(seed: u64) -> bool {
    let size = 4 + (seed % 5) as usize;
    let num_trees = 2 + (seed % 3) as usize;
    let puzzle = generate_puzzle(seed, size, num_trees);

    let solved = solve(&puzzle, puzzle.new_grid()).expect("generator-built puzzles are always solvable");

    let mut wiped = puzzle.new_grid();
    for row in 0..size {
        for col in 0..size {
            if solved.get(row, col) != Cell::Tree {
                assert!(wiped.get(row, col) == Cell::Unknown || wiped.get(row, col) == Cell::Tree);
            }
        }
    }

    let resolved = solve(&puzzle, wiped).expect("a puzzle solvable once is solvable again from the same starting point");
    assert_valid_solution(&puzzle, &resolved);
    true
}

#[quickcheck]
fn enumerate_line_is_deterministic(seed: u64) -> bool {
    use tents::line::enumerate_line;

    let length = 3 + (seed % 6) as usize;
    let target = (seed % (length as u64 + 1)) as u32;
    let line = vec![Cell::Unknown; length];

    let first = enumerate_line(length, target, &line);
    let second = enumerate_line(length, target, &line);
    assert_eq!(first.len(), second.len());
    true
}
