//! The [`Cell`] type and its [`CellKind`] classification.

use std::fmt;

use crate::geom::Point;

/// What a grid cell currently represents.
///
/// `Empty`, `Obstacle`, `Start` and `Goal` are painted by the user;
/// `Frontier`, `Visited` and `Path` are written by a search run and only
/// matter for display.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Empty,
    Obstacle,
    Start,
    Goal,
    /// Queued in the open set of a running search.
    Frontier,
    /// Already expanded by a search.
    Visited,
    /// Part of the reconstructed shortest path.
    Path,
}

impl CellKind {
    /// Whether a search may step onto a cell of this kind.
    #[inline]
    pub const fn is_traversable(self) -> bool {
        !matches!(self, Self::Obstacle)
    }

    /// Whether this kind is a leftover mark of a search run.
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Self::Frontier | Self::Visited | Self::Path)
    }

    /// The character used by [`Grid::from_ascii`](crate::Grid::from_ascii)
    /// and the text dump of a grid.
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Obstacle => '#',
            Self::Start => 'S',
            Self::Goal => 'G',
            Self::Frontier => '+',
            Self::Visited => 'x',
            Self::Path => '*',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub const fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Empty),
            '#' => Some(Self::Obstacle),
            'S' => Some(Self::Start),
            'G' => Some(Self::Goal),
            '+' => Some(Self::Frontier),
            'x' => Some(Self::Visited),
            '*' => Some(Self::Path),
            _ => None,
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Obstacle => "obstacle",
            Self::Start => "start",
            Self::Goal => "goal",
            Self::Frontier => "frontier",
            Self::Visited => "visited",
            Self::Path => "path",
        };
        f.write_str(name)
    }
}

/// A classified grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point,
    pub kind: CellKind,
}
