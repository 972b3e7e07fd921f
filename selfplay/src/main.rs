extern crate rand;

extern crate tents;
extern crate tents_bots;

use std::collections::HashSet;
use std::time::{Duration, Instant};

use rand::prelude::*;

use tents::board::{neighbors8, orthogonal_neighbors};
use tents::Puzzle;

/// Places `num_trees` tree/tent pairs with no illegal adjacency, then
/// derives row/column targets from the tent placements. The same
/// generation order as the engine's own benchmark and property-test
/// helpers, so puzzles produced here are solvable by construction.
fn generate_puzzle(rng: &mut impl Rng, size: usize, num_trees: usize) -> Puzzle {
    let mut trees = Vec::new();
    let mut tents = Vec::new();
    let mut occupied = HashSet::new();

    while trees.len() < num_trees {
        let tr = rng.random_range(0..size);
        let tc = rng.random_range(0..size);
        if occupied.contains(&(tr, tc)) {
            continue;
        }

        let mut candidates = orthogonal_neighbors(tr, tc, size);
        candidates.shuffle(rng);
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

fn main() {
    let trials = 1000;
    let size = 10;
    let num_trees = 15;

    let mut rng = rand::rng();
    let mut solved = 0;
    let mut total_time = Duration::ZERO;

    for _ in 0..trials {
        let puzzle = generate_puzzle(&mut rng, size, num_trees);
        let start = Instant::now();
        match tents::solve(&puzzle, puzzle.new_grid()) {
            Ok(_) => solved += 1,
            Err(_) => {}
        }
        total_time += start.elapsed();
    }

    println!("{} / {} puzzles solved.", solved, trials);
    println!("average solve time: {:?}", total_time / trials);

    play_with_backbot();
}

/// Runs a single puzzle through `BackBot` move by move, the way an
/// interaction loop would, to exercise the cache-then-diff path end to end.
fn play_with_backbot() {
    let mut rng = rand::rng();
    let puzzle = generate_puzzle(&mut rng, 8, 10);
    let grid = puzzle.new_grid();
    let mut bot = tents_bots::BackBot::new(puzzle, grid);

    let mut moves = 0;
    while let Some(mv) = bot.get_best_move() {
        bot.apply(mv.row, mv.col, mv.value);
        moves += 1;
    }
    println!("BackBot filled the board in {} moves.", moves);
}
