//! Perfect maze generation and path search.
//!
//! A maze of `width x height` rooms lives on a `(2*height+1) x (2*width+1)`
//! cell grid. Construction places an exit on the top border and an entrance
//! on the bottom border, then carves the interior by recursive division so
//! that every pair of rooms is joined by exactly one simple path. The path
//! search walks that grid depth-first and records a push/pop trace for
//! playback.

pub mod adjacency;
pub mod classify;
pub mod divider;
pub mod doors;
pub mod error;
pub mod grid;
pub mod maze;
pub mod pathing;
pub mod rng;
pub mod steps;

pub use classify::{CellClass, Highlight};
pub use error::{MazeError, Result};
pub use grid::{CellState, DoorKind, Grid, Pos, MAX_CELLS};
pub use maze::Maze;
pub use pathing::{AllPaths, FoundPath, PathEnumerator, TraceEvent};
pub use rng::{RandSource, RandomRange, RecordingRng, ReplayRng, SimpleLcg};
pub use steps::StepCounts;

/// How the divider and the path search walk their work.
///
/// Both strategies make the same random draws in the same order and produce
/// identical grids, paths and traces. `ExplicitStack` keeps the call stack
/// flat on large grids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Traversal {
    Recursive,
    #[default]
    ExplicitStack,
}
