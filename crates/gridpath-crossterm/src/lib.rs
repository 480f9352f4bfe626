//! Crossterm front-end for gridpath.
//!
//! Paint a board with the mouse, then watch A* explore it:
//!
//! - the first left click places the start, the second the goal, later
//!   clicks (and drags) place obstacles; right click erases
//! - `space` runs the search, animating every step
//! - `r` removes the search marks, `c` wipes the board, `o` scatters
//!   random obstacles, `q` / `Esc` quits (also while a search runs)
//!
//! [`Editor`] holds the editing rules and works without a terminal;
//! [`Session`] binds it to one through [`TerminalView`].

mod config;
mod editor;
mod input;
mod session;
mod view;

pub use config::{
    CELL_SIZE_VAR, EditorConfig, MAX_CELL_SIZE, MAX_ROWS, ROWS_VAR, STEP_MS_VAR,
};
pub use editor::Editor;
pub use input::{CELL_COLS, EditorInput, Layout, is_quit, to_input};
pub use session::{CancelToken, Session};
pub use view::{TerminalView, changed_cells, kind_color};

/// Run an interactive session on the current terminal until the user
/// quits.
pub fn run_editor(config: EditorConfig) -> std::io::Result<()> {
    Session::new(config).run()
}
