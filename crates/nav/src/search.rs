//! A* search over a bounded grid with 8-directional movement.
//!
//! The search never signals failure through an error channel: an empty path
//! is the terminal result for "no route". Identical inputs always produce an
//! identical path.

use std::collections::{HashMap, HashSet};

use crate::barrier::BarrierSet;
use crate::cell::{GridCell, NEIGHBOR_OFFSETS};

/// Cost of a cardinal step.
const CARDINAL_COST: f64 = 1.0;

/// Cost of a diagonal step. A truncated approximation of √2, kept as a
/// literal; path selection among equal-length routes depends on this exact
/// value.
const DIAGONAL_COST: f64 = 1.414;

/// Finds a walkable route from `start` to `goal`.
///
/// Returns the cell sequence including both endpoints, `[start]` when the
/// endpoints coincide, or an empty path when the goal is a barrier, out of
/// bounds, or unreachable.
///
/// The heuristic is Chebyshev distance, which never overestimates because a
/// diagonal step costs more than the 1 it saves. Diagonal expansion rejects
/// moves that would pass a barrier corner: a diagonal neighbor is only
/// admitted when both adjacent cardinal cells are clear.
///
/// Frontier selection is a linear scan for the lowest `g + h`, with ties
/// resolved to the first-discovered candidate. The scan is O(V) per pop,
/// O(V²) overall, which is acceptable at the grid sizes involved here; a
/// `BinaryHeap` frontier is the equivalent choice for larger grids but needs
/// extra bookkeeping to keep the same tie order.
pub fn find_path(
    start: GridCell,
    goal: GridCell,
    barriers: &BarrierSet,
    grid_size: i32,
) -> Vec<GridCell> {
    if !start.in_bounds(grid_size) || !goal.in_bounds(grid_size) {
        return Vec::new();
    }
    if start == goal {
        return vec![start];
    }
    if barriers.contains(goal) {
        return Vec::new();
    }

    // Insertion order of `open` is the tie-break order; removal must not
    // disturb it.
    let mut open: Vec<GridCell> = vec![start];
    let mut g_score: HashMap<GridCell, f64> = HashMap::from([(start, 0.0)]);
    let mut came_from: HashMap<GridCell, GridCell> = HashMap::new();
    let mut closed: HashSet<GridCell> = HashSet::new();

    while !open.is_empty() {
        let mut best_idx = 0;
        let mut best_f = g_score[&open[0]] + heuristic(open[0], goal);
        for (idx, &cell) in open.iter().enumerate().skip(1) {
            let f = g_score[&cell] + heuristic(cell, goal);
            if f < best_f {
                best_idx = idx;
                best_f = f;
            }
        }
        let current = open.remove(best_idx);

        if current == goal {
            return reconstruct(&came_from, current);
        }
        closed.insert(current);

        for (dx, dy) in NEIGHBOR_OFFSETS {
            let neighbor = current.offset(dx, dy);
            if !neighbor.in_bounds(grid_size) || barriers.contains(neighbor) {
                continue;
            }
            let diagonal = dx != 0 && dy != 0;
            if diagonal
                && (barriers.contains(current.offset(dx, 0))
                    || barriers.contains(current.offset(0, dy)))
            {
                continue;
            }
            if closed.contains(&neighbor) {
                continue;
            }

            let step = if diagonal { DIAGONAL_COST } else { CARDINAL_COST };
            let tentative = g_score[&current] + step;
            match g_score.get(&neighbor) {
                None => {
                    g_score.insert(neighbor, tentative);
                    came_from.insert(neighbor, current);
                    open.push(neighbor);
                }
                Some(&known) if tentative < known => {
                    g_score.insert(neighbor, tentative);
                    came_from.insert(neighbor, current);
                }
                Some(_) => {}
            }
        }
    }

    Vec::new()
}

/// Resolves the approach point next to a (typically non-walkable) target.
///
/// Scans the 8 neighbor offsets in the fixed [`NEIGHBOR_OFFSETS`] order and
/// returns the first in-bounds, non-barrier cell, or `None` when every
/// neighbor is blocked or out of bounds.
pub fn find_adjacent_cell(
    target: GridCell,
    barriers: &BarrierSet,
    grid_size: i32,
) -> Option<GridCell> {
    NEIGHBOR_OFFSETS
        .iter()
        .map(|&(dx, dy)| target.offset(dx, dy))
        .find(|&cell| cell.in_bounds(grid_size) && !barriers.contains(cell))
}

fn heuristic(cell: GridCell, goal: GridCell) -> f64 {
    cell.chebyshev(goal) as f64
}

fn reconstruct(came_from: &HashMap<GridCell, GridCell>, goal: GridCell) -> Vec<GridCell> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&parent) = came_from.get(&current) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Direction;

    fn barriers(cells: &[(i32, i32)]) -> BarrierSet {
        cells.iter().map(|&(x, y)| GridCell::new(x, y)).collect()
    }

    fn assert_unit_steps(path: &[GridCell]) {
        for pair in path.windows(2) {
            let dir = Direction::from_delta(pair[1].x - pair[0].x, pair[1].y - pair[0].y);
            assert_ne!(dir, Direction::None, "non-unit step {} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn start_equals_goal_yields_single_cell() {
        let path = find_path(
            GridCell::new(3, 3),
            GridCell::new(3, 3),
            &BarrierSet::new(),
            10,
        );
        assert_eq!(path, vec![GridCell::new(3, 3)]);
    }

    #[test]
    fn goal_on_barrier_is_unreachable_even_when_adjacent() {
        let path = find_path(
            GridCell::new(0, 0),
            GridCell::new(1, 0),
            &barriers(&[(1, 0)]),
            5,
        );
        assert!(path.is_empty());
    }

    #[test]
    fn open_grid_diagonal_run() {
        let path = find_path(
            GridCell::new(0, 0),
            GridCell::new(4, 4),
            &BarrierSet::new(),
            5,
        );
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], GridCell::new(0, 0));
        assert_eq!(path[4], GridCell::new(4, 4));
        assert_unit_steps(&path);
        let dirs: Vec<Direction> = path
            .windows(2)
            .map(|p| Direction::from_delta(p[1].x - p[0].x, p[1].y - p[0].y))
            .collect();
        assert_eq!(dirs, vec![Direction::DownRight; 4]);
    }

    #[test]
    fn corner_cut_is_rejected_and_path_routes_around() {
        // A single barrier corner: the direct diagonal is illegal, the route
        // goes through the clear cardinal neighbor instead.
        let path = find_path(
            GridCell::new(0, 0),
            GridCell::new(1, 1),
            &barriers(&[(1, 0)]),
            3,
        );
        assert_eq!(
            path,
            vec![GridCell::new(0, 0), GridCell::new(0, 1), GridCell::new(1, 1)]
        );
    }

    #[test]
    fn double_barrier_corner_seals_the_start() {
        // Both cardinal neighbors blocked: the diagonal between them is
        // rejected and no other exit from (0, 0) exists.
        let path = find_path(
            GridCell::new(0, 0),
            GridCell::new(1, 1),
            &barriers(&[(1, 0), (0, 1)]),
            3,
        );
        assert!(path.is_empty());
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let ring = barriers(&[
            (3, 2),
            (4, 2),
            (5, 2),
            (3, 3),
            (5, 3),
            (3, 4),
            (4, 4),
            (5, 4),
        ]);
        let path = find_path(GridCell::new(0, 0), GridCell::new(4, 3), &ring, 8);
        assert!(path.is_empty());
    }

    #[test]
    fn equal_cost_routes_resolve_to_first_discovered() {
        // (0,0) -> (2,1) admits Right+DownRight and DownRight+Right at equal
        // cost; discovery order keeps the cardinal-first route.
        let path = find_path(
            GridCell::new(0, 0),
            GridCell::new(2, 1),
            &BarrierSet::new(),
            5,
        );
        assert_eq!(
            path,
            vec![GridCell::new(0, 0), GridCell::new(1, 0), GridCell::new(2, 1)]
        );
    }

    #[test]
    fn identical_inputs_yield_identical_paths() {
        let walls = barriers(&[(2, 2), (2, 3), (3, 2), (6, 6), (1, 5)]);
        let a = find_path(GridCell::new(0, 0), GridCell::new(7, 7), &walls, 8);
        let b = find_path(GridCell::new(0, 0), GridCell::new(7, 7), &walls, 8);
        assert!(!a.is_empty());
        assert_unit_steps(&a);
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_bounds_endpoints_are_unreachable() {
        let none = BarrierSet::new();
        assert!(find_path(GridCell::new(-1, 0), GridCell::new(2, 2), &none, 5).is_empty());
        assert!(find_path(GridCell::new(0, 0), GridCell::new(5, 5), &none, 5).is_empty());
    }

    #[test]
    fn adjacent_cell_follows_fixed_scan_order() {
        // All neighbors clear: the scan starts with the cell above.
        let cell = find_adjacent_cell(GridCell::new(4, 4), &BarrierSet::new(), 9);
        assert_eq!(cell, Some(GridCell::new(4, 3)));

        // Block the cardinals; the first diagonal in scan order wins.
        let cardinals = barriers(&[(4, 3), (4, 5), (3, 4), (5, 4)]);
        let cell = find_adjacent_cell(GridCell::new(4, 4), &cardinals, 9);
        assert_eq!(cell, Some(GridCell::new(3, 3)));
    }

    #[test]
    fn adjacent_cell_is_none_when_fully_blocked() {
        let ring = barriers(&[
            (3, 3),
            (4, 3),
            (5, 3),
            (3, 4),
            (5, 4),
            (3, 5),
            (4, 5),
            (5, 5),
        ]);
        assert_eq!(find_adjacent_cell(GridCell::new(4, 4), &ring, 9), None);
    }

    #[test]
    fn corner_target_skips_out_of_bounds_neighbors() {
        let cell = find_adjacent_cell(GridCell::new(0, 0), &BarrierSet::new(), 5);
        assert_eq!(cell, Some(GridCell::new(0, 1)));
    }
}
