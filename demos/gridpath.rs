//! Interactive A* visualiser in the terminal.
//!
//! Run: cargo run --bin gridpath
//!
//! `GRIDPATH_ROWS` sets the board size and `GRIDPATH_STEP_MS` the pause
//! between animation steps. Logs go to stderr (`RUST_LOG=debug`), so
//! redirect them: `cargo run --bin gridpath 2> gridpath.log`.

use gridpath_crossterm::{EditorConfig, run_editor};

fn main() {
    env_logger::init();

    let config = EditorConfig::from_env();
    log::info!(
        "board {0}x{0}, {1:?} per step",
        config.grid.rows,
        config.step_delay
    );

    if let Err(e) = run_editor(config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
