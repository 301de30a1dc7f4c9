//! Maze construction and queries.
//!
//! Construction order is fixed so a given draw sequence always yields the same
//! maze:
//! 1. Exit column on the top row, then entrance column on the bottom row
//! 2. Stamp the wall lattice around the doors
//! 3. Recursively divide the interior
//!
//! After construction the structure never changes; only the highlight layer
//! used by renderers is mutable.

use std::fmt;

use crate::classify::{Annotations, CellClass, Highlight};
use crate::divider::divide;
use crate::doors::{place_doors, Doors};
use crate::error::Result;
use crate::grid::{CellState, DoorKind, Grid, Pos};
use crate::pathing::{AllPaths, FoundPath, PathEnumerator};
use crate::rng::{RandomRange, SimpleLcg};
use crate::steps::{step_counts, StepCounts};
use crate::Traversal;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    doors: Doors,
    annotations: Annotations,
    traversal: Traversal,
}

impl Maze {
    /// Generate a `width x height` room maze.
    ///
    /// # Arguments
    /// * `width` - Rooms per row, at least 1
    /// * `height` - Rooms per column, at least 1
    /// * `rng` - Source of every random draw
    ///
    /// # Returns
    /// A perfect maze with one entrance on the bottom row and one exit on the
    /// top row, or `InvalidDimensions` when a side is zero or the cell matrix
    /// would exceed [`crate::MAX_CELLS`].
    pub fn generate<R: RandomRange>(width: usize, height: usize, rng: &mut R) -> Result<Self> {
        Self::generate_with(width, height, rng, Traversal::default())
    }

    pub fn generate_with<R: RandomRange>(
        width: usize,
        height: usize,
        rng: &mut R,
        traversal: Traversal,
    ) -> Result<Self> {
        let mut grid = Grid::for_rooms(width, height)?;
        let doors = place_doors(&mut grid, rng)?;
        grid.stamp_lattice();
        divide(&mut grid, rng, traversal);

        tracing::debug!(
            width,
            height,
            entrance = %doors.entrance,
            exit = %doors.exit,
            "generated maze"
        );

        let annotations = Annotations::new(grid.rows() * grid.cols());
        Ok(Self {
            grid,
            doors,
            annotations,
            traversal,
        })
    }

    /// Deterministic maze from a MINSTD seed.
    pub fn from_seed(width: usize, height: usize, seed: u32) -> Result<Self> {
        Self::generate(width, height, &mut SimpleLcg::new(seed))
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn entry_position(&self) -> Pos {
        self.doors.entrance
    }

    pub fn exit_position(&self) -> Pos {
        self.doors.exit
    }

    pub fn cell_state(&self, pos: Pos) -> Result<CellState> {
        self.grid.cell_state(pos)
    }

    pub fn cell_classification(&self, pos: Pos) -> Result<CellClass> {
        let idx = self.grid.index(pos)?;
        Ok(CellClass {
            state: self.grid.cell_state(pos)?,
            highlight: self.annotations.get(idx),
        })
    }

    /// Annotate a cell for rendering. The exit door is never annotated.
    pub fn highlight(&mut self, pos: Pos, highlight: Highlight) -> Result<()> {
        let idx = self.grid.index(pos)?;
        if self.grid.cell_state(pos)? == CellState::Door(DoorKind::Exit) {
            return Ok(());
        }
        self.annotations.set(idx, highlight);
        Ok(())
    }

    pub fn highlight_path(&mut self, path: &[Pos]) -> Result<()> {
        for &pos in path {
            self.highlight(pos, Highlight::FinalPath)?;
        }
        Ok(())
    }

    pub fn clear_highlights(&mut self) {
        self.annotations.clear();
    }

    /// First path between two cells, found depth-first.
    pub fn find_path(&self, entry: Pos, exit: Pos) -> Result<FoundPath> {
        PathEnumerator::new(&self.grid, self.traversal).find_path(entry, exit)
    }

    /// Every simple path between two cells.
    pub fn all_paths(&self, entry: Pos, exit: Pos) -> Result<AllPaths> {
        PathEnumerator::new(&self.grid, self.traversal).all_paths(entry, exit)
    }

    /// Path from this maze's entrance to its exit.
    pub fn solve(&self) -> Result<FoundPath> {
        self.find_path(self.doors.entrance, self.doors.exit)
    }

    pub fn step_counts(&self, start: Pos, stop: Option<DoorKind>) -> Result<StepCounts> {
        step_counts(&self.grid, start, stop)
    }

    /// Grid as rows of `0` (wall) and `1` (open or door).
    pub fn to_binary_grid(&self) -> Vec<Vec<u8>> {
        (0..self.rows())
            .map(|row| {
                (0..self.cols())
                    .map(|col| {
                        let traversable = self
                            .grid
                            .cell_state(Pos::new(row, col))
                            .map(|state| state.is_traversable())
                            .unwrap_or(false);
                        u8::from(traversable)
                    })
                    .collect()
            })
            .collect()
    }

    /// Class names for every cell, row by row.
    pub fn class_names(&self) -> Vec<Vec<String>> {
        (0..self.rows())
            .map(|row| {
                (0..self.cols())
                    .map(|col| {
                        self.cell_classification(Pos::new(row, col))
                            .map(|class| class.class_name())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect()
    }
}

/// `#` wall, space open, `E` entrance, `X` exit, `.` highlighted.
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let class = self
                    .cell_classification(Pos::new(row, col))
                    .map_err(|_| fmt::Error)?;
                let glyph = match (class.state, class.highlight) {
                    (CellState::Wall, _) => '#',
                    (CellState::Door(DoorKind::Entrance), _) => 'E',
                    (CellState::Door(DoorKind::Exit), _) => 'X',
                    (CellState::Open, Some(_)) => '.',
                    (CellState::Open, None) => ' ',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MazeError;
    use crate::pathing::is_valid_path;

    #[test]
    fn test_maze_generation() {
        let maze = Maze::from_seed(5, 5, 12345).unwrap();
        assert_eq!(maze.rows(), 11);
        assert_eq!(maze.cols(), 11);
        assert_eq!(maze.cell_state(Pos::new(0, 0)), Ok(CellState::Wall));
        assert_eq!(maze.cell_state(Pos::new(1, 1)), Ok(CellState::Open));
        assert_eq!(maze.cell_state(Pos::new(9, 9)), Ok(CellState::Open));
    }

    #[test]
    fn test_determinism() {
        let maze1 = Maze::from_seed(10, 10, 99999).unwrap();
        let maze2 = Maze::from_seed(10, 10, 99999).unwrap();
        assert_eq!(maze1.to_binary_grid(), maze2.to_binary_grid());
        assert_eq!(maze1.entry_position(), maze2.entry_position());
    }

    #[test]
    fn test_different_seeds() {
        let maze1 = Maze::from_seed(10, 10, 11111).unwrap();
        let maze2 = Maze::from_seed(10, 10, 22222).unwrap();
        assert_ne!(maze1.to_binary_grid(), maze2.to_binary_grid());
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Maze::from_seed(0, 4, 1).unwrap_err(),
            MazeError::InvalidDimensions { width: 0, height: 4 }
        );
    }

    #[test]
    fn test_single_room() {
        let maze = Maze::from_seed(1, 1, 7).unwrap();
        assert_eq!(maze.exit_position(), Pos::new(0, 1));
        assert_eq!(maze.entry_position(), Pos::new(2, 1));

        let found = maze.solve().unwrap();
        assert_eq!(found.path, vec![Pos::new(2, 1), Pos::new(1, 1), Pos::new(0, 1)]);
    }

    #[test]
    fn test_solve_walks_the_maze() {
        let maze = Maze::from_seed(20, 20, 2918957128).unwrap();
        let found = maze.solve().unwrap();
        assert!(is_valid_path(
            maze.grid(),
            &found.path,
            maze.entry_position(),
            maze.exit_position()
        ));
    }

    #[test]
    fn test_highlights_skip_exit_and_do_not_affect_search() {
        let mut maze = Maze::from_seed(6, 4, 321).unwrap();
        let before = maze.solve().unwrap();

        maze.highlight_path(&before.path).unwrap();
        let exit = maze.cell_classification(maze.exit_position()).unwrap();
        assert_eq!(exit.highlight, None);
        assert_eq!(exit.class_name(), "door exit");
        let entry = maze.cell_classification(maze.entry_position()).unwrap();
        assert_eq!(entry.class_name(), "door entrance finalpath");

        assert_eq!(maze.solve().unwrap(), before);

        maze.clear_highlights();
        assert!(maze
            .class_names()
            .iter()
            .flatten()
            .all(|name| !name.contains("finalpath")));
    }

    #[test]
    fn test_highlight_out_of_range() {
        let mut maze = Maze::from_seed(2, 2, 1).unwrap();
        assert!(maze.highlight(Pos::new(5, 0), Highlight::Current).is_err());
        assert!(maze.cell_classification(Pos::new(0, 5)).is_err());
    }

    #[test]
    fn test_display_marks_doors_and_path() {
        let mut maze = Maze::from_seed(3, 2, 55).unwrap();
        let found = maze.solve().unwrap();
        maze.highlight_path(&found.path).unwrap();

        let text = maze.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), maze.rows());
        assert!(lines.iter().all(|line| line.chars().count() == maze.cols()));
        assert_eq!(lines[0].matches('X').count(), 1);
        assert_eq!(lines[maze.rows() - 1].matches('E').count(), 1);
        assert_eq!(text.matches('.').count(), found.path.len() - 2);
    }

    #[test]
    fn test_step_counts_reach_exit() {
        let maze = Maze::from_seed(8, 8, 4242).unwrap();
        let found = maze.solve().unwrap();
        let counts = maze.step_counts(maze.entry_position(), Some(DoorKind::Exit)).unwrap();
        // the tree has a single route, so the depth-first path is also the shortest
        assert_eq!(
            counts.steps_to(maze.exit_position()),
            Some(found.path.len() as u32 - 1)
        );
    }

    #[test]
    fn test_traversals_build_the_same_maze() {
        let recursive =
            Maze::generate_with(15, 11, &mut SimpleLcg::new(8), Traversal::Recursive).unwrap();
        let stacked =
            Maze::generate_with(15, 11, &mut SimpleLcg::new(8), Traversal::ExplicitStack).unwrap();
        assert_eq!(recursive.grid(), stacked.grid());
        assert_eq!(recursive.solve().unwrap(), stacked.solve().unwrap());
    }
}
