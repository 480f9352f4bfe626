use std::time::Duration;

use gridpath_core::GridConfig;
use log::warn;

/// Environment variable overriding [`GridConfig::rows`].
pub const ROWS_VAR: &str = "GRIDPATH_ROWS";
/// Environment variable overriding [`GridConfig::cell_size`], in terminal
/// rows per cell.
pub const CELL_SIZE_VAR: &str = "GRIDPATH_CELL_SIZE";
/// Environment variable overriding [`EditorConfig::step_delay`], in
/// milliseconds.
pub const STEP_MS_VAR: &str = "GRIDPATH_STEP_MS";

/// Largest board a session accepts; far beyond any real terminal.
pub const MAX_ROWS: i32 = 1000;
/// Largest cell size a session accepts.
pub const MAX_CELL_SIZE: i32 = 8;

/// Settings of an interactive editing session.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EditorConfig {
    pub grid: GridConfig,
    /// Pause after every rendered search step.
    pub step_delay: Duration,
    /// Obstacle probability used by the scatter command.
    pub scatter_density: f64,
}

impl EditorConfig {
    pub fn new() -> Self {
        Self {
            // each cell takes two terminal columns
            grid: GridConfig::new().with_rows(30).with_cell_size(1),
            step_delay: Duration::from_millis(15),
            scatter_density: 0.3,
        }
    }

    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    pub fn with_scatter_density(mut self, density: f64) -> Self {
        self.scatter_density = density;
        self
    }

    /// Defaults overridden by `GRIDPATH_ROWS`, `GRIDPATH_CELL_SIZE` and
    /// `GRIDPATH_STEP_MS`.
    pub fn from_env() -> Self {
        Self::new().with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides looked up by variable name. Unparsable or
    /// out-of-range values are logged and ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(ROWS_VAR) {
            match raw.trim().parse::<i32>() {
                Ok(rows) if (1..=MAX_ROWS).contains(&rows) => {
                    self.grid = self.grid.with_rows(rows);
                }
                _ => warn!("ignoring {ROWS_VAR}={raw:?}: expected 1 to {MAX_ROWS}"),
            }
        }
        if let Some(raw) = lookup(CELL_SIZE_VAR) {
            match raw.trim().parse::<i32>() {
                Ok(size) if (1..=MAX_CELL_SIZE).contains(&size) => {
                    self.grid = self.grid.with_cell_size(size);
                }
                _ => warn!("ignoring {CELL_SIZE_VAR}={raw:?}: expected 1 to {MAX_CELL_SIZE}"),
            }
        }
        if let Some(raw) = lookup(STEP_MS_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.step_delay = Duration::from_millis(ms),
                Err(_) => warn!("ignoring {STEP_MS_VAR}={raw:?}: expected milliseconds"),
            }
        }
        self
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}
