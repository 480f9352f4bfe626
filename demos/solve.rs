//! Solve a maze given as a text picture and print the explored board.
//!
//! Run: cargo run --bin solve [maze-file]
//!
//! Without an argument a built-in maze is used. `.` is floor, `#` wall,
//! `S` start and `G` goal; the board must be square.

use gridpath_astar::{AStar, SearchOutcome, StepControl};
use gridpath_core::{CellKind, Grid};

const MAZE: &str = "
S.....#...
.####.#.#.
.#....#.#.
.#.####.#.
.#......#.
.######.#.
......#.#.
.####.#.##
....#.....
###.#####G
";

fn main() {
    env_logger::init();

    let text = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error: cannot read {path}: {e}");
                std::process::exit(1);
            }
        },
        None => MAZE.to_owned(),
    };

    let mut grid = match Grid::from_ascii(&text) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let (Some(start), Some(goal)) = (
        grid.find_kind(CellKind::Start),
        grid.find_kind(CellKind::Goal),
    ) else {
        eprintln!("Error: the maze needs one S and one G");
        std::process::exit(1);
    };

    let mut astar = AStar::new();
    let mut frames = 0usize;
    let outcome = astar.find_path(&mut grid, start, goal, |_: &Grid| {
        frames += 1;
        StepControl::Continue
    });

    match outcome {
        Ok(SearchOutcome::Found(path)) => println!("path of {} steps", path.cost()),
        Ok(SearchOutcome::NotFound) => println!("no path"),
        Ok(SearchOutcome::Cancelled) => println!("cancelled"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
    let stats = astar.last_stats();
    println!(
        "{} cells expanded, {} queued, {frames} frames",
        stats.expanded, stats.pushed
    );
    print!("{grid}");
}
