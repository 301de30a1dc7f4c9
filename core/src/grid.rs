//! The cell matrix and its coordinate mapping.
//!
//! A maze of `width x height` rooms is stored as a `(2*height + 1) x (2*width + 1)`
//! matrix. Cells at odd row and odd column are rooms; every other cell belongs
//! to the wall lattice and is either a wall or a carved gap. Room `n`
//! (1-based) lives at grid index `2*(n-1) + 1`, wall line `n` at `2*n`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance; 1 for cells that share an edge.
    pub fn manhattan(self, other: Pos) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorKind {
    Entrance,
    Exit,
}

impl DoorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DoorKind::Entrance => "entrance",
            DoorKind::Exit => "exit",
        }
    }
}

/// Structural state of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    Wall,
    Open,
    Door(DoorKind),
}

impl CellState {
    pub fn is_door(self) -> bool {
        matches!(self, CellState::Door(_))
    }

    /// Open cells and doors of either kind.
    pub fn is_traversable(self) -> bool {
        !matches!(self, CellState::Wall)
    }
}

/// Grid index of the 1-based room `n` along one axis.
pub const fn room_to_grid(n: usize) -> usize {
    2 * (n - 1) + 1
}

/// Grid index of the 1-based wall line `n` along one axis.
pub const fn wall_to_grid(n: usize) -> usize {
    2 * n
}

/// Largest cell matrix a maze may allocate, about 1000 x 1000 rooms.
pub const MAX_CELLS: usize = 4_000_000;

/// `(rows, cols)` for a `width x height` room maze, or `None` when a side is
/// empty, the arithmetic overflows, or the matrix exceeds [`MAX_CELLS`].
fn matrix_extent(width: usize, height: usize) -> Option<(usize, usize)> {
    if width < 1 || height < 1 {
        return None;
    }
    let rows = height.checked_mul(2)?.checked_add(1)?;
    let cols = width.checked_mul(2)?.checked_add(1)?;
    let cells = rows.checked_mul(cols)?;
    (cells <= MAX_CELLS).then_some((rows, cols))
}

/// Fixed-size cell matrix, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// A grid sized for `width x height` rooms with every cell open.
    pub fn for_rooms(width: usize, height: usize) -> Result<Self> {
        let (rows, cols) =
            matrix_extent(width, height).ok_or(MazeError::InvalidDimensions { width, height })?;
        Ok(Self {
            rows,
            cols,
            cells: vec![CellState::Open; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Room count along the horizontal axis.
    pub fn width(&self) -> usize {
        self.cols / 2
    }

    /// Room count along the vertical axis.
    pub fn height(&self) -> usize {
        self.rows / 2
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn cell_state(&self, pos: Pos) -> Result<CellState> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Overwrite a cell. Callers guarantee `pos` is inside the matrix; an
    /// out-of-range write is a bug and panics.
    pub fn set_cell(&mut self, pos: Pos, state: CellState) {
        assert!(
            self.in_bounds(pos),
            "set_cell {pos} outside {}x{} grid",
            self.rows,
            self.cols
        );
        let idx = pos.row * self.cols + pos.col;
        self.cells[idx] = state;
    }

    /// Flat index of `pos`, rejecting anything outside the matrix.
    pub fn index(&self, pos: Pos) -> Result<usize> {
        if !self.in_bounds(pos) {
            return Err(MazeError::OutOfRange {
                row: pos.row,
                col: pos.col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(pos.row * self.cols + pos.col)
    }

    /// Row-major iterator over every cell and its position.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, CellState)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &state)| (Pos::new(idx / cols, idx % cols), state))
    }

    /// Stamp the fixed wall lattice: border rows and columns plus every
    /// even/even intersection. Door cells are left untouched.
    pub(crate) fn stamp_lattice(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let pos = Pos::new(row, col);
                let on_border =
                    row == 0 || row == self.rows - 1 || col == 0 || col == self.cols - 1;
                let intersection = row % 2 == 0 && col % 2 == 0;
                if (on_border || intersection) && !self.cells[row * self.cols + col].is_door() {
                    self.set_cell(pos, CellState::Wall);
                }
            }
        }
    }
}
