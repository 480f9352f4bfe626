use gridpath_core::Point;

/// A shortest path found by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Point>,
    cost: i32,
}

impl Path {
    pub(crate) fn new(cells: Vec<Point>, cost: i32) -> Self {
        Self { cells, cost }
    }

    /// Cells from start to goal, both included.
    #[inline]
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    /// Number of unit steps, i.e. `g` of the goal.
    #[inline]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// Number of steps (cells minus one).
    #[inline]
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.cells.first().copied()
    }

    #[inline]
    pub fn goal(&self) -> Option<Point> {
        self.cells.last().copied()
    }
}

/// How a search run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// The goal was reached.
    Found(Path),
    /// The open set ran dry; the goal is unreachable.
    NotFound,
    /// The observer asked the search to stop.
    Cancelled,
}

impl SearchOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The path, if one was found.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(p) => Some(p),
            _ => None,
        }
    }
}

/// Counters describing the last search run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells popped from the open set.
    pub expanded: usize,
    /// Cells pushed into the open set, start included.
    pub pushed: usize,
    /// Observer invocations.
    pub ticks: usize,
}
