pub use maze_core;

use std::fs;
use std::path::Path;

use anyhow::Context;
use maze_core::{Maze, MazeError, Pos, TraceEvent};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Path search strategy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// Stop at the first path that reaches the exit
    #[default]
    FirstMatch,
    /// Keep backtracking after each hit and collect every simple path
    Exhaustive,
}

impl std::str::FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-match" | "first" => Ok(SearchMode::FirstMatch),
            "exhaustive" | "all" => Ok(SearchMode::Exhaustive),
            _ => Err(format!("Invalid search mode: '{}'. Must be 'first-match' or 'exhaustive'", s)),
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::FirstMatch => write!(f, "first-match"),
            SearchMode::Exhaustive => write!(f, "exhaustive"),
        }
    }
}

/// Everything a client needs to draw a maze.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MazeSnapshot {
    /// Rooms per row
    pub width: usize,

    /// Rooms per column
    pub height: usize,

    /// The seed used to generate this maze
    /// Regenerating with the same dimensions and seed yields the same maze
    pub seed: u32,

    pub rows: usize,
    pub cols: usize,
    pub entry: Pos,
    pub exit: Pos,

    /// Class names per cell ("wall", "door exit", "finalpath", ...)
    pub cells: Vec<Vec<String>>,

    /// Binary grid (0=wall, 1=open or door)
    pub grid: Vec<Vec<u8>>,
}

impl MazeSnapshot {
    fn capture(maze: &Maze, seed: u32) -> Self {
        Self {
            width: maze.width(),
            height: maze.height(),
            seed,
            rows: maze.rows(),
            cols: maze.cols(),
            entry: maze.entry_position(),
            exit: maze.exit_position(),
            cells: maze.class_names(),
            grid: maze.to_binary_grid(),
        }
    }
}

/// Output from solving a maze
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SolveReport {
    /// The solved maze, with the path highlighted as "finalpath"
    pub snapshot: MazeSnapshot,

    pub mode: SearchMode,

    /// Path from entrance to exit (the first one found in exhaustive mode)
    pub path: Vec<Pos>,

    /// Number of distinct paths found
    pub paths_found: usize,

    /// Push/pop events in search order, for step-by-step playback
    pub trace: Vec<TraceEvent>,
}

/// Generate a maze snapshot.
///
/// # Arguments
/// * `width` - Rooms per row (at least 1)
/// * `height` - Rooms per column (at least 1)
/// * `seed` - Optional seed; a random one is drawn when `None`
///
/// # Returns
/// * `Ok(MazeSnapshot)` - Grid classes, binary grid, doors and the seed used
/// * `Err(MazeError::InvalidDimensions)` - If either dimension is zero or the grid
///   would exceed `maze_core::MAX_CELLS` cells
///
/// # Example
/// ```no_run
/// let snapshot = host::generate_maze(10, 8, Some(2918957128)).unwrap();
/// println!("Maze {}x{} entry={} exit={}",
///          snapshot.width, snapshot.height, snapshot.entry, snapshot.exit);
/// ```
pub fn generate_maze(width: usize, height: usize, seed: Option<u32>) -> Result<MazeSnapshot, MazeError> {
    let seed = seed.unwrap_or_else(random_seed);
    tracing::info!("Generating {}x{} maze with seed {}", width, height, seed);

    let maze = Maze::from_seed(width, height, seed)?;
    Ok(MazeSnapshot::capture(&maze, seed))
}

/// Fresh seed for callers that did not supply one.
pub fn random_seed() -> u32 {
    rand::random()
}

/// Regenerate a maze from its seed and highlight the path through it.
///
/// Generation is deterministic, so the same `(width, height, seed)` always
/// yields the maze a client was shown earlier.
pub fn solved_maze(
    width: usize,
    height: usize,
    seed: u32,
    mode: SearchMode,
) -> Result<(Maze, SolveReportParts), MazeError> {
    let mut maze = Maze::from_seed(width, height, seed)?;
    let (entry, exit) = (maze.entry_position(), maze.exit_position());

    let parts = match mode {
        SearchMode::FirstMatch => {
            let found = maze.find_path(entry, exit);
            let found = found.inspect_err(|e| tracing::error!("Maze invariant broken: {}", e))?;
            SolveReportParts {
                path: found.path,
                paths_found: 1,
                trace: found.trace,
            }
        }
        SearchMode::Exhaustive => {
            let all = maze.all_paths(entry, exit);
            let mut all = all.inspect_err(|e| tracing::error!("Maze invariant broken: {}", e))?;
            let paths_found = all.paths.len();
            SolveReportParts {
                path: all.paths.swap_remove(0),
                paths_found,
                trace: all.trace,
            }
        }
    };

    maze.highlight_path(&parts.path)?;
    Ok((maze, parts))
}

/// Search results before they are attached to a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReportParts {
    pub path: Vec<Pos>,
    pub paths_found: usize,
    pub trace: Vec<TraceEvent>,
}

/// Solve a maze identified by its dimensions and seed.
///
/// # Arguments
/// * `width`, `height` - Maze dimensions in rooms
/// * `seed` - The seed the maze was generated from
/// * `mode` - First-match or exhaustive search
///
/// # Returns
/// * `Ok(SolveReport)` - Path, playback trace and highlighted snapshot
/// * `Err(MazeError::NoPathFound)` - Only if maze generation is broken
///
/// # Example
/// ```no_run
/// use host::{solve_maze, SearchMode};
///
/// let report = solve_maze(10, 8, 2918957128, SearchMode::FirstMatch).unwrap();
/// println!("Path of {} cells, {} trace events", report.path.len(), report.trace.len());
/// ```
pub fn solve_maze(width: usize, height: usize, seed: u32, mode: SearchMode) -> Result<SolveReport, MazeError> {
    tracing::info!("Solving {}x{} maze seed {} ({})", width, height, seed, mode);

    let (maze, parts) = solved_maze(width, height, seed, mode)?;

    tracing::info!(
        "Solved maze seed {}: path {} cells, {} paths, {} trace events",
        seed,
        parts.path.len(),
        parts.paths_found,
        parts.trace.len()
    );

    Ok(SolveReport {
        snapshot: MazeSnapshot::capture(&maze, seed),
        mode,
        path: parts.path,
        paths_found: parts.paths_found,
        trace: parts.trace,
    })
}

/// Write a snapshot or report as pretty JSON.
pub fn save_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Largest JSON file `load_json` will read.
pub const MAX_JSON_BYTES: u64 = 256_000_000;

pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();

    // Check the size on disk so an oversized file is never read into memory
    let size = fs::metadata(path)
        .with_context(|| format!("reading {}", path.display()))?
        .len();
    if size > MAX_JSON_BYTES {
        anyhow::bail!("{} is too large ({} bytes, max {})", path.display(), size, MAX_JSON_BYTES);
    }

    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
}
