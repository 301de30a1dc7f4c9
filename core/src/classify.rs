//! Cell classification for renderers.
//!
//! Highlights live in their own layer beside the grid. The search and the
//! step counter never read them.

use serde::{Deserialize, Serialize};

use crate::grid::CellState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    /// The cell the search is standing on.
    Current,
    /// On the candidate path being explored.
    CurrentPath,
    /// On the path that reached the exit.
    FinalPath,
}

impl Highlight {
    pub fn as_str(self) -> &'static str {
        match self {
            Highlight::Current => "current",
            Highlight::CurrentPath => "currentpath",
            Highlight::FinalPath => "finalpath",
        }
    }
}

/// Structural state plus rendering annotation of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellClass {
    pub state: CellState,
    pub highlight: Option<Highlight>,
}

impl CellClass {
    /// Space-separated tags: `wall`, `door entrance`, `door exit`, or empty for
    /// an open cell, followed by the highlight tag if any.
    pub fn class_name(&self) -> String {
        let mut tags: Vec<&str> = match self.state {
            CellState::Wall => vec!["wall"],
            CellState::Open => vec![],
            CellState::Door(kind) => vec!["door", kind.as_str()],
        };
        if let Some(highlight) = self.highlight {
            tags.push(highlight.as_str());
        }
        tags.join(" ")
    }
}

/// Per-cell highlight layer, indexed like the grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Annotations {
    marks: Vec<Option<Highlight>>,
}

impl Annotations {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            marks: vec![None; len],
        }
    }

    pub(crate) fn get(&self, idx: usize) -> Option<Highlight> {
        self.marks.get(idx).copied().flatten()
    }

    pub(crate) fn set(&mut self, idx: usize, highlight: Highlight) {
        self.marks[idx] = Some(highlight);
    }

    pub(crate) fn clear(&mut self) {
        self.marks.fill(None);
    }
}
