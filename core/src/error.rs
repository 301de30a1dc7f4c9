//! Error taxonomy shared by every maze operation.

use thiserror::Error;

use crate::grid::Pos;

pub type Result<T> = std::result::Result<T, MazeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Width or height below one room, or a cell matrix too large to allocate.
    #[error(
        "invalid maze dimensions {width}x{height}: both must be at least 1 and the grid at most {} cells",
        crate::grid::MAX_CELLS
    )]
    InvalidDimensions { width: usize, height: usize },

    /// Grid access outside the cell matrix.
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// The search exhausted every branch without reaching the exit.
    ///
    /// A correctly partitioned maze is always connected, so this signals a
    /// broken generator rather than a recoverable condition.
    #[error("no path from {entrance} to {exit}; maze connectivity is broken")]
    NoPathFound { entrance: Pos, exit: Pos },
}
