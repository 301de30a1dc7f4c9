//! Entrance and exit placement on the border rows.

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};
use crate::grid::{room_to_grid, CellState, DoorKind, Grid, Pos};
use crate::rng::RandomRange;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doors {
    pub entrance: Pos,
    pub exit: Pos,
}

/// Open the exit in the top row and the entrance in the bottom row, each above
/// or below a uniformly chosen room column.
///
/// The exit is drawn first. Must run before the lattice is stamped; stamping
/// leaves door cells alone.
pub fn place_doors<R: RandomRange>(grid: &mut Grid, rng: &mut R) -> Result<Doors> {
    let width = grid.width();
    if width < 1 {
        return Err(MazeError::InvalidDimensions {
            width,
            height: grid.height(),
        });
    }

    let exit = Pos::new(0, room_to_grid(rng.randint(1, width)));
    grid.set_cell(exit, CellState::Door(DoorKind::Exit));

    let entrance = Pos::new(grid.rows() - 1, room_to_grid(rng.randint(1, width)));
    grid.set_cell(entrance, CellState::Door(DoorKind::Entrance));

    Ok(Doors { entrance, exit })
}
