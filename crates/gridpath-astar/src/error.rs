use gridpath_core::{CellKind, Point};
use thiserror::Error;

/// Reasons a search is rejected before it starts.
///
/// Running out of candidates or being cancelled are not errors; see
/// [`SearchOutcome`](crate::SearchOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Start or goal lies outside the grid.
    #[error("cell {point} is outside the grid")]
    OutOfBounds { point: Point },
    /// Start or goal is not painted as such.
    #[error("cell {point} is {found}, expected {expected}")]
    Misclassified {
        point: Point,
        expected: CellKind,
        found: CellKind,
    },
}
