//! Legal single-step moves for the path search.

use crate::grid::{CellState, DoorKind, Grid, Pos};

/// Step offsets in resolver order: up, right, down, left.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// The in-grid cells one orthogonal step from `pos`, in resolver order.
pub fn orthogonal_steps(grid: &Grid, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
    DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
        // wrapping_add_signed underflows to a huge index, which the bounds check rejects
        let next = Pos::new(
            pos.row.wrapping_add_signed(dr),
            pos.col.wrapping_add_signed(dc),
        );
        grid.in_bounds(next).then_some(next)
    })
}

/// Cells reachable from `pos` in one step: open cells and the exit door.
///
/// When the exit is adjacent it is returned alone, so the search commits to
/// the goal instead of wandering past it.
pub fn neighbors(grid: &Grid, pos: Pos) -> Vec<Pos> {
    let mut moves = Vec::with_capacity(4);
    for next in orthogonal_steps(grid, pos) {
        match grid.cell_state(next) {
            Ok(CellState::Door(DoorKind::Exit)) => return vec![next],
            Ok(CellState::Open) => moves.push(next),
            _ => {}
        }
    }
    moves
}
