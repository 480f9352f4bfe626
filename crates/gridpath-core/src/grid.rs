//! The [`Grid`] type: a square board of classified cells.
//!
//! Cells are stored row-major. Neighbour sets are never cached; they are
//! derived from the current classifications on every query, so editing
//! obstacles can never leave a stale adjacency behind.

use std::fmt;

use thiserror::Error;

use crate::cell::{Cell, CellKind};
use crate::config::{DEFAULT_CELL_SIZE, GridConfig};
use crate::geom::{Point, Range};

/// Orthogonal offsets in neighbour order: row+1, row-1, col+1, col-1.
const DIRS: [Point; 4] = [
    Point::new(0, 1),
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(-1, 0),
];

/// Errors from [`Grid::from_ascii`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridParseError {
    /// The picture contains no rows.
    #[error("grid picture is empty")]
    Empty,
    /// A line does not have as many cells as there are lines.
    #[error("grid picture is not square: line {line} has {width} cells, expected {rows}")]
    NotSquare { line: usize, width: usize, rows: usize },
    /// A character that does not name a [`CellKind`].
    #[error("unknown cell character {ch:?} at {pos}")]
    UnknownGlyph { ch: char, pos: Point },
}

/// A `rows × rows` board of [`CellKind`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    kinds: Vec<CellKind>,
    rows: i32,
    cell_size: i32,
}

impl Grid {
    /// Create a `rows × rows` grid of empty cells. A non-positive `rows`
    /// gives an empty grid.
    pub fn new(rows: i32, cell_size: i32) -> Self {
        let rows = rows.max(0);
        Self {
            kinds: vec![CellKind::Empty; (rows as usize) * (rows as usize)],
            rows,
            cell_size: cell_size.max(1),
        }
    }

    /// Create an empty grid from a [`GridConfig`].
    pub fn from_config(cfg: &GridConfig) -> Self {
        Self::new(cfg.rows, cfg.cell_size)
    }

    /// Build a grid from a text picture, one line per row.
    ///
    /// `.` is empty, `#` an obstacle, `S` the start, `G` the goal (search
    /// marks `+`, `x` and `*` are accepted too). Leading and trailing
    /// whitespace of each line is ignored, as are blank lines.
    pub fn from_ascii(s: &str) -> Result<Self, GridParseError> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(GridParseError::Empty);
        }
        let rows = lines.len();
        let mut grid = Self::new(rows as i32, DEFAULT_CELL_SIZE);
        for (y, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != rows {
                return Err(GridParseError::NotSquare {
                    line: y,
                    width,
                    rows,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let kind =
                    CellKind::from_glyph(ch).ok_or(GridParseError::UnknownGlyph { ch, pos })?;
                grid.classify(pos, kind);
            }
        }
        Ok(grid)
    }

    /// Number of rows (equal to the number of columns).
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Pixel size of one cell.
    #[inline]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.rows, self.rows)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether the grid has no cells at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Flat row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index_of(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.rows as usize) + (p.x as usize))
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[inline]
    pub fn point_at(&self, idx: usize) -> Point {
        let rows = self.rows.max(1) as usize;
        Point::new((idx % rows) as i32, (idx / rows) as i32)
    }

    /// Classification of the cell at `p`.
    #[inline]
    pub fn kind(&self, p: Point) -> Option<CellKind> {
        self.index_of(p).map(|i| self.kinds[i])
    }

    /// The cell at `p`.
    #[inline]
    pub fn cell(&self, p: Point) -> Option<Cell> {
        self.kind(p).map(|kind| Cell { pos: p, kind })
    }

    /// Set the classification of the cell at `p`. No-op if `p` is out of
    /// bounds. Start/goal uniqueness is not checked.
    pub fn classify(&mut self, p: Point, kind: CellKind) {
        if let Some(i) = self.index_of(p) {
            self.kinds[i] = kind;
        }
    }

    /// Return the cell at `p` to `Empty`.
    pub fn reset(&mut self, p: Point) {
        self.classify(p, CellKind::Empty);
    }

    /// Reset every cell to `Empty`.
    pub fn clear(&mut self) {
        self.kinds.fill(CellKind::Empty);
    }

    /// Reset frontier, visited and path marks to `Empty`, keeping
    /// obstacles, start and goal.
    pub fn clear_search(&mut self) {
        for k in self.kinds.iter_mut() {
            if k.is_search_mark() {
                *k = CellKind::Empty;
            }
        }
    }

    /// First cell (row-major) classified as `kind`.
    pub fn find_kind(&self, kind: CellKind) -> Option<Point> {
        self.kinds
            .iter()
            .position(|&k| k == kind)
            .map(|i| self.point_at(i))
    }

    /// Number of cells classified as `kind`.
    pub fn count_kind(&self, kind: CellKind) -> usize {
        self.kinds.iter().filter(|&&k| k == kind).count()
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| Cell {
                pos: self.point_at(i),
                kind,
            })
    }

    /// Append the traversable orthogonal neighbours of `p` to `buf`, in the
    /// order row+1, row-1, col+1, col-1. The caller clears `buf`.
    pub fn neighbors_into(&self, p: Point, buf: &mut Vec<Point>) {
        for d in DIRS {
            let n = p + d;
            if self.kind(n).is_some_and(CellKind::is_traversable) {
                buf.push(n);
            }
        }
    }

    /// The traversable orthogonal neighbours of `p` (at most four).
    pub fn neighbors_of(&self, p: Point) -> Vec<Point> {
        let mut buf = Vec::with_capacity(4);
        self.neighbors_into(p, &mut buf);
        buf
    }

    /// Top-left pixel of the cell at `p`.
    #[inline]
    pub fn pixel_origin(&self, p: Point) -> Point {
        p * self.cell_size
    }

    /// Cell under the pixel position `px`, or `None` outside the board.
    pub fn cell_at_pixel(&self, px: Point) -> Option<Point> {
        if px.x < 0 || px.y < 0 {
            return None;
        }
        let p = px / self.cell_size;
        self.contains(p).then_some(p)
    }
}

impl fmt::Display for Grid {
    /// One line per row, using [`CellKind::glyph`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.kinds.chunks(self.rows.max(1) as usize) {
            for k in row {
                write!(f, "{}", k.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
