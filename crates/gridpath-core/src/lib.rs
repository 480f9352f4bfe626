//! **gridpath-core**: the board model of the gridpath pathfinder.
//!
//! This crate provides geometry primitives, the [`CellKind`] classification
//! painted on each cell, and the square [`Grid`] that search algorithms
//! walk. Neighbourhoods are 4-connected and computed on demand.

pub mod cell;
pub mod config;
pub mod geom;
pub mod grid;

pub use cell::{Cell, CellKind};
pub use config::GridConfig;
pub use geom::{Point, Range};
pub use grid::{Grid, GridParseError};
