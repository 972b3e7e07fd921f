use std::collections::HashSet;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;

use tents::board::{neighbors8, orthogonal_neighbors};
use tents::Puzzle;
use tents_bots::BackBot;

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

fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let puzzle = generate_puzzle(&mut rng, 10, 15);

    c.bench_function("backbot_full_game", |b| {
        b.iter(|| {
            let grid = puzzle.new_grid();
            let mut bot = BackBot::new(puzzle.clone(), grid);
            while let Some(mv) = bot.get_best_move() {
                bot.apply(mv.row, mv.col, mv.value);
            }
            black_box(bot.grid().count_unknown())
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
