//! Step counting: minimal orthogonal step distance from one cell to every
//! cell reachable through open cells and doors.

use crate::adjacency::orthogonal_steps;
use crate::error::Result;
use crate::grid::{CellState, DoorKind, Grid, Pos};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepCounts {
    rows: usize,
    cols: usize,
    steps: Vec<Option<u32>>,
    max: u32,
}

impl StepCounts {
    /// Largest step count assigned.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Steps from the start to `pos`, `None` when unreachable or off-grid.
    pub fn steps_to(&self, pos: Pos) -> Option<u32> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        self.steps
            .get(pos.row * self.cols + pos.col)
            .copied()
            .flatten()
    }

    /// Number of cells that received a count.
    pub fn reached(&self) -> usize {
        self.steps.iter().filter(|steps| steps.is_some()).count()
    }
}

/// Flood outward from `start` one frontier at a time.
///
/// A cell holding the `stop` door is counted but not expanded. A start cell
/// that is a wall reaches nothing.
pub fn step_counts(grid: &Grid, start: Pos, stop: Option<DoorKind>) -> Result<StepCounts> {
    let start_state = grid.cell_state(start)?;
    let cols = grid.cols();
    let mut steps = vec![None; grid.rows() * cols];
    let mut max = 0;

    if start_state.is_traversable() {
        steps[start.row * cols + start.col] = Some(0);
        let mut frontier = vec![start];
        let mut distance = 0;
        while !frontier.is_empty() {
            distance += 1;
            let mut next_frontier = Vec::new();
            for &pos in &frontier {
                if stop.is_some_and(|kind| grid.cell_state(pos) == Ok(CellState::Door(kind))) {
                    continue;
                }
                for next in orthogonal_steps(grid, pos) {
                    let idx = next.row * cols + next.col;
                    let traversable = grid
                        .cell_state(next)
                        .map(|state| state.is_traversable())
                        .unwrap_or(false);
                    if traversable && steps[idx].is_none() {
                        steps[idx] = Some(distance);
                        max = distance;
                        next_frontier.push(next);
                    }
                }
            }
            frontier = next_frontier;
        }
    }

    Ok(StepCounts {
        rows: grid.rows(),
        cols,
        steps,
        max,
    })
}
