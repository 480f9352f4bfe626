//! Grid construction parameters.

/// Default number of rows (and columns) of a board.
pub const DEFAULT_ROWS: i32 = 50;

/// Default pixel size of one cell: 50 cells of 16 pixels make an 800 pixel
/// board.
pub const DEFAULT_CELL_SIZE: i32 = 16;

/// Parameters for [`Grid::from_config`](crate::Grid::from_config).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Number of rows; the grid is always `rows × rows`.
    pub rows: i32,
    /// Uniform pixel size of a cell. Only renderers look at it.
    pub cell_size: i32,
}

impl GridConfig {
    /// Configuration with the default board size.
    pub const fn new() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }

    /// Set the number of rows (builder).
    pub const fn with_rows(mut self, rows: i32) -> Self {
        self.rows = rows;
        self
    }

    /// Set the cell pixel size (builder).
    pub const fn with_cell_size(mut self, cell_size: i32) -> Self {
        self.cell_size = cell_size;
        self
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_board_is_800_pixels() {
        let cfg = GridConfig::default();
        assert_eq!(cfg.rows, 50);
        assert_eq!(cfg.rows * cfg.cell_size, 800);
    }

    #[test]
    fn builders() {
        let cfg = GridConfig::new().with_rows(10).with_cell_size(3);
        assert_eq!(cfg, GridConfig { rows: 10, cell_size: 3 });
    }
}
