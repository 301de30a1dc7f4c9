//! Depth-first path search with explicit backtracking.
//!
//! Every cell on the candidate path is marked `OnStack`; a cell goes back to
//! `Unvisited` when the search backs out of it, so it can be entered again
//! along a different prefix. Each push and pop is recorded as a
//! [`TraceEvent`] for playback by an animation client.
//!
//! [`PathEnumerator::find_path`] stops at the first path that reaches the
//! exit: no ancestor explores further and committed cells are never popped.
//! [`PathEnumerator::all_paths`] keeps going and collects every simple path.

use std::collections::HashSet;
use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};

use crate::adjacency::neighbors;
use crate::error::{MazeError, Result};
use crate::grid::{Grid, Pos};
use crate::Traversal;

/// One step of search progress: `pos` entered the path (`pushed`) or left it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    #[serde(flatten)]
    pub pos: Pos,
    pub pushed: bool,
}

/// Result of a first-match search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundPath {
    pub path: Vec<Pos>,
    pub trace: Vec<TraceEvent>,
}

/// Result of an exhaustive search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllPaths {
    pub paths: Vec<Vec<Pos>>,
    pub trace: Vec<TraceEvent>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    OnStack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StopRule {
    FirstMatch,
    Exhaustive,
}

/// Search state owned by a single call.
struct Search {
    cols: usize,
    state: Vec<VisitState>,
    path: Vec<Pos>,
    trace: Vec<TraceEvent>,
    found: Vec<Vec<Pos>>,
}

impl Search {
    fn new(grid: &Grid) -> Self {
        Self {
            cols: grid.cols(),
            state: vec![VisitState::Unvisited; grid.rows() * grid.cols()],
            path: Vec::new(),
            trace: Vec::new(),
            found: Vec::new(),
        }
    }

    fn on_stack(&self, pos: Pos) -> bool {
        self.state[pos.row * self.cols + pos.col] == VisitState::OnStack
    }

    fn push(&mut self, pos: Pos) {
        self.state[pos.row * self.cols + pos.col] = VisitState::OnStack;
        self.path.push(pos);
        self.trace.push(TraceEvent { pos, pushed: true });
    }

    fn pop(&mut self) {
        if let Some(pos) = self.path.pop() {
            self.state[pos.row * self.cols + pos.col] = VisitState::Unvisited;
            self.trace.push(TraceEvent { pos, pushed: false });
        }
    }

    /// Record the current path as a hit. Breaks when the rule says stop.
    fn reached_exit(&mut self, rule: StopRule) -> ControlFlow<()> {
        self.found.push(self.path.clone());
        match rule {
            StopRule::FirstMatch => ControlFlow::Break(()),
            StopRule::Exhaustive => {
                self.pop();
                ControlFlow::Continue(())
            }
        }
    }
}

/// Pending moves of one cell on the explicit stack.
struct Frame {
    moves: Vec<Pos>,
    next: usize,
}

impl Frame {
    fn next_unvisited(&mut self, search: &Search) -> Option<Pos> {
        while let Some(&pos) = self.moves.get(self.next) {
            self.next += 1;
            if !search.on_stack(pos) {
                return Some(pos);
            }
        }
        None
    }
}

pub struct PathEnumerator<'a> {
    grid: &'a Grid,
    traversal: Traversal,
}

impl<'a> PathEnumerator<'a> {
    pub fn new(grid: &'a Grid, traversal: Traversal) -> Self {
        Self { grid, traversal }
    }

    /// First path from `entrance` to `exit`, with the trace that found it.
    pub fn find_path(&self, entrance: Pos, exit: Pos) -> Result<FoundPath> {
        let mut search = self.run(entrance, exit, StopRule::FirstMatch)?;
        match search.found.pop() {
            Some(path) => Ok(FoundPath {
                path,
                trace: search.trace,
            }),
            None => Err(MazeError::NoPathFound { entrance, exit }),
        }
    }

    /// Every simple path from `entrance` to `exit`, in discovery order.
    pub fn all_paths(&self, entrance: Pos, exit: Pos) -> Result<AllPaths> {
        let search = self.run(entrance, exit, StopRule::Exhaustive)?;
        if search.found.is_empty() {
            return Err(MazeError::NoPathFound { entrance, exit });
        }
        Ok(AllPaths {
            paths: search.found,
            trace: search.trace,
        })
    }

    fn run(&self, entrance: Pos, exit: Pos, rule: StopRule) -> Result<Search> {
        self.grid.index(entrance)?;
        self.grid.index(exit)?;

        let mut search = Search::new(self.grid);
        match self.traversal {
            Traversal::Recursive => {
                let _ = self.descend(entrance, exit, rule, &mut search);
            }
            Traversal::ExplicitStack => self.walk_with_stack(entrance, exit, rule, &mut search),
        }

        tracing::debug!(
            %entrance,
            %exit,
            paths = search.found.len(),
            events = search.trace.len(),
            "path search finished"
        );
        Ok(search)
    }

    fn descend(&self, pos: Pos, exit: Pos, rule: StopRule, search: &mut Search) -> ControlFlow<()> {
        search.push(pos);
        if pos == exit {
            return search.reached_exit(rule);
        }
        for next in neighbors(self.grid, pos) {
            if !search.on_stack(next) {
                self.descend(next, exit, rule, search)?;
            }
        }
        search.pop();
        ControlFlow::Continue(())
    }

    /// Mirrors [`Self::descend`] event for event, without growing the call stack.
    fn walk_with_stack(&self, start: Pos, exit: Pos, rule: StopRule, search: &mut Search) {
        search.push(start);
        if start == exit {
            let _ = search.reached_exit(rule);
            return;
        }

        let mut frames = vec![Frame {
            moves: neighbors(self.grid, start),
            next: 0,
        }];
        while let Some(frame) = frames.last_mut() {
            match frame.next_unvisited(search) {
                Some(next) => {
                    search.push(next);
                    if next == exit {
                        if search.reached_exit(rule).is_break() {
                            return;
                        }
                        continue;
                    }
                    frames.push(Frame {
                        moves: neighbors(self.grid, next),
                        next: 0,
                    });
                }
                None => {
                    frames.pop();
                    search.pop();
                }
            }
        }
    }
}

/// Whether `path` walks from `entrance` to `exit` through traversable cells in
/// single orthogonal steps, never repeating a cell.
pub fn is_valid_path(grid: &Grid, path: &[Pos], entrance: Pos, exit: Pos) -> bool {
    if path.first() != Some(&entrance) || path.last() != Some(&exit) {
        return false;
    }
    let mut seen = HashSet::with_capacity(path.len());
    let all_traversable = path.iter().all(|&pos| {
        seen.insert(pos)
            && grid
                .cell_state(pos)
                .map(|state| state.is_traversable())
                .unwrap_or(false)
    });
    all_traversable && path.windows(2).all(|step| step[0].manhattan(step[1]) == 1)
}
