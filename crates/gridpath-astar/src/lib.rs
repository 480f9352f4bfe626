//! A* shortest-path search over a [`gridpath_core::Grid`].
//!
//! The search is incremental and observable: it paints the cells it queues
//! and expands, and hands control to a [`StepObserver`] after every step so
//! a front-end can render progress or cancel the run.
//!
//! - [`AStar`] is the reusable engine; it keeps its per-cell arrays between
//!   runs and exposes the scores of the last run.
//! - [`find_path`] runs one search with a throwaway engine.
//! - [`solve`] searches between the grid's own start and goal marks without
//!   an observer.
//!
//! The open set is ordered by `(f, insertion sequence)`: ties on `f` go to
//! the cell queued first, which makes runs reproducible for identical input.

mod astar;
mod distance;
mod error;
mod node;
mod outcome;
mod traits;

pub use astar::{AStar, find_path, solve};
pub use distance::manhattan;
pub use error::SearchError;
pub use node::UNREACHABLE;
pub use outcome::{Path, SearchOutcome, SearchStats};
pub use traits::{NoopObserver, StepControl, StepObserver};
