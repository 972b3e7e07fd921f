//! The memoized line enumerator: depth-first enumeration of every legal
//! tent/grass completion of a single row or column, plus the intersection
//! step that extracts cells forced across every completion.

use std::collections::HashMap;
use std::rc::Rc;

use crate::board::Cell;

/// Enumerates every completion of a line of `length` cells with exactly
/// `target` tents. The set of fixed positions is folded into `line` itself:
/// any index with `line[i] != Cell::Unknown` is already decided (TREE/TENT/
/// GRASS) and every completion leaves it unchanged, so there is no separate
/// `fixed` set to pass — `line`'s own non-UNKNOWN entries are that set.
/// Returns an empty vector when the line is infeasible under its own fixed
/// cells and target.
pub fn enumerate_line(length: usize, target: u32, line: &[Cell]) -> Vec<Vec<Cell>> {
    assert_eq!(line.len(), length, "line must have exactly `length` cells");

    let mut suffix_trees = vec![0u32; length + 1];
    for i in (0..length).rev() {
        suffix_trees[i] = suffix_trees[i + 1] + u32::from(line[i] == Cell::Tree);
    }

    let mut memo = HashMap::new();
    let rc = suffixes(0, 0, false, length, target, line, &suffix_trees, &mut memo);
    rc.as_ref().clone()
}

/// For each index, checks whether every completion agrees on its value.
/// TREE positions are never reported (they carry no information; they are
/// part of the puzzle, not a deduction). The map is empty when `completions`
/// is empty.
pub fn forced_from_completions(completions: &[Vec<Cell>]) -> HashMap<usize, Cell> {
    let mut forced = HashMap::new();
    let Some(first) = completions.first() else {
        return forced;
    };
    for i in 0..first.len() {
        let value = first[i];
        if value == Cell::Tree {
            continue;
        }
        if completions.iter().all(|completion| completion[i] == value) {
            forced.insert(i, value);
        }
    }
    forced
}

type Memo = HashMap<(usize, u32, bool), Rc<Vec<Vec<Cell>>>>;

/// Enumerates completions of `line[index..]` given `placed` tents already
/// committed in `line[..index]` and whether the immediately preceding
/// position holds a tent. Memoized on `(index, placed, last_was_tent)`:
/// sound because the line and its target are fixed for the whole call.
fn suffixes(
    index: usize,
    placed: u32,
    last_was_tent: bool,
    length: usize,
    target: u32,
    line: &[Cell],
    suffix_trees: &[u32],
    memo: &mut Memo,
) -> Rc<Vec<Vec<Cell>>> {
    if placed > target {
        return Rc::new(Vec::new());
    }
    if index == length {
        return if placed == target {
            Rc::new(vec![Vec::new()])
        } else {
            Rc::new(Vec::new())
        };
    }

    let remaining_positions = (length - index) as u32;
    let remaining_trees = suffix_trees[index];
    let available = remaining_positions - remaining_trees;
    if placed + available < target {
        return Rc::new(Vec::new());
    }

    let key = (index, placed, last_was_tent);
    if let Some(cached) = memo.get(&key) {
        return Rc::clone(cached);
    }

    let mut results = Vec::new();
    let mut extend_with = |value: Cell, rest: &Rc<Vec<Vec<Cell>>>, out: &mut Vec<Vec<Cell>>| {
        for suffix in rest.iter() {
            let mut full = Vec::with_capacity(length - index);
            full.push(value);
            full.extend_from_slice(suffix);
            out.push(full);
        }
    };

    match line[index] {
        Cell::Tree => {
            let rest = suffixes(index + 1, placed, false, length, target, line, suffix_trees, memo);
            extend_with(Cell::Tree, &rest, &mut results);
        }
        Cell::Tent => {
            if !last_was_tent {
                let rest = suffixes(index + 1, placed + 1, true, length, target, line, suffix_trees, memo);
                extend_with(Cell::Tent, &rest, &mut results);
            }
        }
        Cell::Grass => {
            let rest = suffixes(index + 1, placed, false, length, target, line, suffix_trees, memo);
            extend_with(Cell::Grass, &rest, &mut results);
        }
        Cell::Unknown => {
            if !last_was_tent {
                let rest = suffixes(index + 1, placed + 1, true, length, target, line, suffix_trees, memo);
                extend_with(Cell::Tent, &rest, &mut results);
            }
            let rest = suffixes(index + 1, placed, false, length, target, line, suffix_trees, memo);
            extend_with(Cell::Grass, &rest, &mut results);
        }
    }

    let rc = Rc::new(results);
    memo.insert(key, Rc::clone(&rc));
    rc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(n: usize) -> Vec<Cell> {
        vec![Cell::Unknown; n]
    }

    #[test]
    fn four_cells_two_tents_has_three_completions() {
        let completions = enumerate_line(4, 2, &u(4));
        let expected: Vec<Vec<Cell>> = vec![
            vec![Cell::Tent, Cell::Grass, Cell::Tent, Cell::Grass],
            vec![Cell::Tent, Cell::Grass, Cell::Grass, Cell::Tent],
            vec![Cell::Grass, Cell::Tent, Cell::Grass, Cell::Tent],
        ];
        assert_eq!(completions.len(), expected.len());
        for completion in &expected {
            assert!(completions.contains(completion));
        }
    }

    #[test]
    fn zero_target_forces_all_grass() {
        let completions = enumerate_line(5, 0, &u(5));
        assert_eq!(completions, vec![vec![Cell::Grass; 5]]);
        let forced = forced_from_completions(&completions);
        for i in 0..5 {
            assert_eq!(forced[&i], Cell::Grass);
        }
    }

    #[test]
    fn impossible_target_is_empty() {
        let completions = enumerate_line(3, 3, &u(3));
        assert!(completions.is_empty());
        assert!(forced_from_completions(&completions).is_empty());
    }

    #[test]
    fn fixed_tent_blocks_adjacent_tent() {
        let mut line = u(3);
        line[0] = Cell::Tent;
        let completions = enumerate_line(3, 2, &line);
        for completion in &completions {
            assert_ne!(completion[1], Cell::Tent);
        }
    }

    #[test]
    fn tree_passes_through_unchanged() {
        let mut line = u(3);
        line[1] = Cell::Tree;
        let completions = enumerate_line(3, 1, &line);
        for completion in &completions {
            assert_eq!(completion[1], Cell::Tree);
        }
    }

    #[test]
    fn forced_never_reports_tree() {
        let mut line = u(3);
        line[1] = Cell::Tree;
        let completions = enumerate_line(3, 0, &line);
        let forced = forced_from_completions(&completions);
        assert!(!forced.contains_key(&1));
        assert_eq!(forced[&0], Cell::Grass);
        assert_eq!(forced[&2], Cell::Grass);
    }
}
