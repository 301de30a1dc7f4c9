//! Recursive division.
//!
//! Each chamber is split by a full cross of walls into four sub-chambers.
//! Exactly three of the cross's four arms get a single gap, which joins the
//! four sub-chambers into one tree without closing a loop. Applied
//! recursively, the room graph ends up a spanning tree: a perfect maze.
//!
//! Ref: https://en.wikipedia.org/wiki/Maze_generation_algorithm#Recursive_division_method

use crate::grid::{room_to_grid, wall_to_grid, CellState, Grid, Pos};
use crate::rng::RandomRange;
use crate::Traversal;

/// Interior wall lines still to be partitioned, inclusive on both axes.
///
/// Line `n` separates room `n` from room `n + 1`, so a region `(r1, r2, c1, c2)`
/// covers rooms `r1..=r2+1` by `c1..=c2+1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub r1: usize,
    pub r2: usize,
    pub c1: usize,
    pub c2: usize,
}

impl Region {
    /// Every interior wall line of a `width x height` maze.
    pub fn root(width: usize, height: usize) -> Self {
        Self {
            r1: 1,
            r2: height - 1,
            c1: 1,
            c2: width - 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.r2 < self.r1 || self.c2 < self.c1
    }

    /// The four sub-regions left by a cut at `(horiz, vert)`, in recursion order.
    fn split(&self, horiz: usize, vert: usize) -> [Region; 4] {
        let Region { r1, r2, c1, c2 } = *self;
        [
            Region { r1, r2: horiz - 1, c1, c2: vert - 1 },
            Region { r1: horiz + 1, r2, c1, c2: vert - 1 },
            Region { r1, r2: horiz - 1, c1: vert + 1, c2 },
            Region { r1: horiz + 1, r2, c1: vert + 1, c2 },
        ]
    }
}

/// Carve the whole interior of a lattice-stamped grid.
pub fn divide<R: RandomRange>(grid: &mut Grid, rng: &mut R, traversal: Traversal) {
    let root = Region::root(grid.width(), grid.height());
    match traversal {
        Traversal::Recursive => partition_recursive(grid, rng, root),
        Traversal::ExplicitStack => partition_with_stack(grid, rng, root),
    }
}

fn partition_recursive<R: RandomRange>(grid: &mut Grid, rng: &mut R, region: Region) {
    if region.is_empty() {
        return;
    }
    let (horiz, vert) = partition_once(grid, rng, region);
    for sub in region.split(horiz, vert) {
        partition_recursive(grid, rng, sub);
    }
}

/// Same pre-order as [`partition_recursive`], so the RNG sees an identical
/// draw sequence and the carved grid is identical.
fn partition_with_stack<R: RandomRange>(grid: &mut Grid, rng: &mut R, root: Region) {
    let mut pending = vec![root];
    while let Some(region) = pending.pop() {
        if region.is_empty() {
            continue;
        }
        let (horiz, vert) = partition_once(grid, rng, region);
        pending.extend(region.split(horiz, vert).into_iter().rev());
    }
}

/// Stamp one cross and open three of its arms. Returns the cut lines.
fn partition_once<R: RandomRange>(grid: &mut Grid, rng: &mut R, region: Region) -> (usize, usize) {
    let Region { r1, r2, c1, c2 } = region;

    let horiz = if r1 == r2 {
        r1
    } else {
        banded_cut(rng, r1, r2, 1, 4)
    };
    let vert = if c1 == c2 {
        c1
    } else {
        banded_cut(rng, c1, c2, 1, 3)
    };

    let wall_row = wall_to_grid(horiz);
    let wall_col = wall_to_grid(vert);
    let rows = wall_to_grid(r1) - 1..=wall_to_grid(r2) + 1;
    let cols = wall_to_grid(c1) - 1..=wall_to_grid(c2) + 1;

    for col in cols {
        grid.set_cell(Pos::new(wall_row, col), CellState::Wall);
    }
    for row in rows {
        grid.set_cell(Pos::new(row, wall_col), CellState::Wall);
    }

    let mut gaps = [true, true, true, false];
    rng.shuffle(&mut gaps);

    if gaps[0] {
        let col = rng.randint(c1, vert);
        grid.set_cell(Pos::new(wall_row, room_to_grid(col)), CellState::Open);
    }
    if gaps[1] {
        let col = rng.randint(vert + 1, c2 + 1);
        grid.set_cell(Pos::new(wall_row, room_to_grid(col)), CellState::Open);
    }
    if gaps[2] {
        let row = rng.randint(r1, horiz);
        grid.set_cell(Pos::new(room_to_grid(row), wall_col), CellState::Open);
    }
    if gaps[3] {
        let row = rng.randint(horiz + 1, r2 + 1);
        grid.set_cell(Pos::new(room_to_grid(row), wall_col), CellState::Open);
    }

    tracing::trace!(?region, horiz, vert, ?gaps, "partitioned chamber");
    (horiz, vert)
}

/// Draw a cut line from the middle band of `[lo, hi]`.
///
/// The band runs from `num/den` to `(den-num)/den` of the way between `lo + 1`
/// and `hi - 1`, rounded half up. Rows use quarters and columns thirds, which
/// varies the chamber aspect ratios. A two-line region yields an inverted
/// band; the draw still happens and lands on its start.
fn banded_cut<R: RandomRange>(rng: &mut R, lo: usize, hi: usize, num: i64, den: i64) -> usize {
    let x = lo as i64 + 1;
    let span = hi as i64 - 1 - x;
    let start = round_half_up(x, span * num, den);
    let end = round_half_up(x, span * (den - num), den);
    rng.randint(start, end.max(start))
}

/// `round(x + num / den)` with halves rounded up. Callers keep the value positive.
fn round_half_up(x: i64, num: i64, den: i64) -> usize {
    (2 * den * x + 2 * num + den).div_euclid(2 * den) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ReplayRng, SimpleLcg};

    fn carved(width: usize, height: usize, seed: u32, traversal: Traversal) -> Grid {
        let mut grid = Grid::for_rooms(width, height).unwrap();
        grid.stamp_lattice();
        divide(&mut grid, &mut SimpleLcg::new(seed), traversal);
        grid
    }

    fn open_segments(grid: &Grid) -> usize {
        grid.iter()
            .filter(|(pos, state)| {
                *state == CellState::Open && (pos.row % 2 == 0) != (pos.col % 2 == 0)
            })
            .count()
    }

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round_half_up(2, -1, 4), 2); // 1.75
        assert_eq!(round_half_up(2, -3, 4), 1); // 1.25
        assert_eq!(round_half_up(2, 2, 4), 3); // 2.5
        assert_eq!(round_half_up(3, 1, 3), 3); // 3.33
        assert_eq!(round_half_up(3, 2, 3), 4); // 3.67
    }

    #[test]
    fn two_line_region_cuts_on_second_line() {
        let mut rng = ReplayRng::new(vec![5]);
        assert_eq!(banded_cut(&mut rng, 1, 2, 1, 4), 2);
        assert_eq!(rng.consumed(), 1);
    }

    #[test]
    fn cut_stays_inside_region() {
        let mut rng = SimpleLcg::new(31337);
        for lo in 1..6 {
            for hi in lo + 1..lo + 20 {
                for (num, den) in [(1, 4), (1, 3)] {
                    let cut = banded_cut(&mut rng, lo, hi, num, den);
                    assert!((lo..=hi).contains(&cut), "cut {cut} outside [{lo}, {hi}]");
                }
            }
        }
    }

    #[test]
    fn wide_region_cuts_within_middle_band() {
        // x = 2, y = 17: quarters give [6, 13]
        let mut rng = ReplayRng::new(vec![0]);
        assert_eq!(banded_cut(&mut rng, 1, 18, 1, 4), 6);
        let mut rng = ReplayRng::new(vec![100]);
        assert_eq!(banded_cut(&mut rng, 1, 18, 1, 4), 13);
    }

    #[test]
    fn empty_regions_are_a_no_op() {
        let mut grid = Grid::for_rooms(1, 4).unwrap();
        grid.stamp_lattice();
        let before = grid.clone();
        divide(&mut grid, &mut SimpleLcg::new(5), Traversal::Recursive);
        assert_eq!(grid, before);
        assert!(Region::root(1, 4).is_empty());
    }

    #[test]
    fn single_partition_leaves_exactly_three_gaps() {
        // 2x2 rooms: one cross at line 1 on both axes, four arms of one segment each
        let grid = carved(2, 2, 404, Traversal::Recursive);
        let open_arms = [Pos::new(2, 1), Pos::new(2, 3), Pos::new(1, 2), Pos::new(3, 2)]
            .into_iter()
            .filter(|&pos| grid.cell_state(pos) == Ok(CellState::Open))
            .count();
        assert_eq!(open_arms, 3);
    }

    #[test]
    fn carved_grid_is_a_spanning_tree_by_edge_count() {
        for seed in 1..50 {
            let grid = carved(7, 5, seed, Traversal::ExplicitStack);
            assert_eq!(open_segments(&grid), 7 * 5 - 1, "seed {seed}");
        }
    }

    #[test]
    fn rooms_are_never_walled() {
        let grid = carved(9, 6, 8, Traversal::Recursive);
        for (pos, state) in grid.iter() {
            if pos.row % 2 == 1 && pos.col % 2 == 1 {
                assert_eq!(state, CellState::Open, "room {pos} was walled");
            }
            if pos.row % 2 == 0 && pos.col % 2 == 0 {
                assert_eq!(state, CellState::Wall, "intersection {pos} was opened");
            }
        }
    }

    #[test]
    fn stack_and_recursion_carve_identically() {
        for seed in [1, 2, 99, 4096, 2918957128] {
            assert_eq!(
                carved(12, 9, seed, Traversal::Recursive),
                carved(12, 9, seed, Traversal::ExplicitStack),
            );
        }
    }
}
