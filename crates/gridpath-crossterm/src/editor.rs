//! The board editing rules, independent of any terminal.

use gridpath_astar::{AStar, SearchError, SearchOutcome, StepObserver};
use gridpath_core::{CellKind, Grid, GridConfig, Point};
use log::debug;
use rand::Rng;

/// A board being edited: the grid plus the endpoints placed so far.
///
/// The first painted cell becomes the start, the second the goal, every
/// later one an obstacle. Once a search has run the board is locked
/// against edits until its marks are cleared.
#[derive(Debug, Clone)]
pub struct Editor {
    grid: Grid,
    start: Option<Point>,
    goal: Option<Point>,
    locked: bool,
}

impl Editor {
    pub fn new(cfg: &GridConfig) -> Self {
        Self::with_grid(Grid::from_config(cfg))
    }

    /// Edit an existing grid, adopting its start and goal marks.
    pub fn with_grid(grid: Grid) -> Self {
        Self {
            start: grid.find_kind(CellKind::Start),
            goal: grid.find_kind(CellKind::Goal),
            grid,
            locked: false,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    /// Whether a search has run since the marks were last cleared.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Paint the cell at `p`: start first, then goal, then obstacles.
    /// Endpoints are never painted over. Returns whether the board changed.
    pub fn paint(&mut self, p: Point) -> bool {
        if self.locked || !self.grid.contains(p) {
            return false;
        }
        let is_endpoint = self.start == Some(p) || self.goal == Some(p);
        if self.start.is_none() && self.goal != Some(p) {
            self.start = Some(p);
            self.grid.classify(p, CellKind::Start);
        } else if self.goal.is_none() && self.start != Some(p) {
            self.goal = Some(p);
            self.grid.classify(p, CellKind::Goal);
        } else if !is_endpoint && self.grid.kind(p) != Some(CellKind::Obstacle) {
            self.grid.classify(p, CellKind::Obstacle);
        } else {
            return false;
        }
        true
    }

    /// Reset the cell at `p`, forgetting it if it was the start or goal.
    pub fn erase(&mut self, p: Point) -> bool {
        if self.locked || self.grid.kind(p).is_none_or(|k| k == CellKind::Empty) {
            return false;
        }
        self.grid.reset(p);
        if self.start == Some(p) {
            self.start = None;
        } else if self.goal == Some(p) {
            self.goal = None;
        }
        true
    }

    /// Wipe the whole board.
    pub fn clear_board(&mut self) {
        self.grid.clear();
        self.start = None;
        self.goal = None;
        self.locked = false;
    }

    /// Remove the marks of the last search and unlock the board.
    pub fn clear_search(&mut self) {
        self.clear_marks();
        self.locked = false;
    }

    // A cancelled run can leave the goal painted as Frontier or Path, so the
    // endpoints are restored from the editor's own record.
    fn clear_marks(&mut self) {
        self.grid.clear_search();
        if let Some(p) = self.start {
            self.grid.classify(p, CellKind::Start);
        }
        if let Some(p) = self.goal {
            self.grid.classify(p, CellKind::Goal);
        }
    }

    /// Turn each empty cell into an obstacle with probability `density`.
    /// Returns the number of obstacles added.
    pub fn scatter<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) -> usize {
        if self.locked {
            return 0;
        }
        let density = density.clamp(0.0, 1.0);
        let mut added = 0;
        for p in self.grid.bounds() {
            if self.grid.kind(p) == Some(CellKind::Empty) && rng.random_bool(density) {
                self.grid.classify(p, CellKind::Obstacle);
                added += 1;
            }
        }
        debug!("editor: scattered {added} obstacles");
        added
    }

    /// Search between the placed endpoints, clearing the marks of any
    /// earlier run first. Returns `Ok(None)` when an endpoint is missing.
    pub fn run<O: StepObserver>(
        &mut self,
        astar: &mut AStar,
        observer: O,
    ) -> Result<Option<SearchOutcome>, SearchError> {
        let (Some(start), Some(goal)) = (self.start, self.goal) else {
            return Ok(None);
        };
        self.clear_marks();
        let outcome = astar.find_path(&mut self.grid, start, goal, observer)?;
        self.locked = true;
        Ok(Some(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_astar::{NoopObserver, StepControl};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn editor(rows: i32) -> Editor {
        Editor::new(&GridConfig::new().with_rows(rows))
    }

    #[test]
    fn paints_start_goal_then_obstacles() {
        let mut ed = editor(4);
        assert!(ed.paint(Point::new(0, 0)));
        assert!(ed.paint(Point::new(3, 3)));
        assert!(ed.paint(Point::new(1, 1)));
        assert_eq!(ed.start(), Some(Point::new(0, 0)));
        assert_eq!(ed.goal(), Some(Point::new(3, 3)));
        assert_eq!(ed.grid().kind(Point::new(1, 1)), Some(CellKind::Obstacle));
    }

    #[test]
    fn never_paints_over_endpoints() {
        let mut ed = editor(4);
        ed.paint(Point::new(0, 0));
        // the goal cannot land on the start
        assert!(!ed.paint(Point::new(0, 0)));
        assert_eq!(ed.goal(), None);
        ed.paint(Point::new(2, 0));
        assert!(!ed.paint(Point::new(2, 0)));
        assert_eq!(ed.grid().kind(Point::new(2, 0)), Some(CellKind::Goal));
        assert!(!ed.paint(Point::new(9, 9)));
    }

    #[test]
    fn erasing_an_endpoint_frees_its_slot() {
        let mut ed = editor(4);
        ed.paint(Point::new(0, 0));
        ed.paint(Point::new(3, 3));
        assert!(ed.erase(Point::new(0, 0)));
        assert_eq!(ed.start(), None);
        // next paint becomes the start again, not an obstacle
        ed.paint(Point::new(1, 2));
        assert_eq!(ed.start(), Some(Point::new(1, 2)));
        assert_eq!(ed.grid().kind(Point::new(1, 2)), Some(CellKind::Start));
        assert!(!ed.erase(Point::new(2, 2)));
    }

    #[test]
    fn painting_goal_slot_when_start_was_erased() {
        let mut ed = editor(4);
        ed.paint(Point::new(0, 0));
        ed.paint(Point::new(3, 3));
        ed.erase(Point::new(0, 0));
        // the goal cell cannot become the new start
        assert!(!ed.paint(Point::new(3, 3)));
        assert_eq!(ed.start(), None);
    }

    #[test]
    fn run_needs_both_endpoints() {
        let mut ed = editor(3);
        let mut astar = AStar::new();
        ed.paint(Point::new(0, 0));
        assert_eq!(ed.run(&mut astar, NoopObserver).unwrap(), None);
        assert!(!ed.is_locked());
    }

    #[test]
    fn run_locks_until_marks_are_cleared() {
        let mut ed = editor(3);
        let mut astar = AStar::new();
        ed.paint(Point::new(0, 0));
        ed.paint(Point::new(2, 2));
        let out = ed.run(&mut astar, NoopObserver).unwrap().unwrap();
        assert_eq!(out.path().unwrap().cost(), 4);
        assert!(ed.is_locked());
        assert!(!ed.paint(Point::new(1, 1)));
        assert!(!ed.erase(Point::new(0, 0)));

        ed.clear_search();
        assert!(!ed.is_locked());
        assert_eq!(ed.grid().count_kind(CellKind::Path), 0);
        assert_eq!(ed.grid().kind(Point::new(2, 2)), Some(CellKind::Goal));
        assert!(ed.paint(Point::new(1, 1)));
    }

    #[test]
    fn rerun_starts_from_clean_marks() {
        let mut ed = editor(4);
        let mut astar = AStar::new();
        ed.paint(Point::new(0, 0));
        ed.paint(Point::new(3, 0));
        let first = ed.run(&mut astar, NoopObserver).unwrap();
        let marks = ed.grid().clone();
        let second = ed.run(&mut astar, NoopObserver).unwrap();
        assert_eq!(first, second);
        assert_eq!(&marks, ed.grid());
    }

    #[test]
    fn cancelled_run_reports_cancelled() {
        let mut ed = editor(5);
        let mut astar = AStar::new();
        ed.paint(Point::new(0, 0));
        ed.paint(Point::new(4, 4));
        let out = ed
            .run(&mut astar, |_: &Grid| StepControl::Abort)
            .unwrap();
        assert_eq!(out, Some(SearchOutcome::Cancelled));
    }

    #[test]
    fn reset_after_cancelled_run_restores_goal() {
        let mut ed = editor(3);
        let mut astar = AStar::new();
        ed.paint(Point::new(0, 0));
        ed.paint(Point::new(1, 0));
        let out = ed.run(&mut astar, |_: &Grid| StepControl::Abort).unwrap();
        assert_eq!(out, Some(SearchOutcome::Cancelled));
        // queued right before the first tick
        assert_eq!(ed.grid().kind(Point::new(1, 0)), Some(CellKind::Frontier));

        ed.clear_search();
        assert_eq!(ed.grid().kind(Point::new(1, 0)), Some(CellKind::Goal));
        assert_eq!(ed.grid().kind(Point::new(0, 0)), Some(CellKind::Start));
        let out = ed.run(&mut astar, NoopObserver).unwrap().unwrap();
        assert_eq!(out.path().unwrap().cost(), 1);
    }

    #[test]
    fn rerun_after_abort_during_path_walk() {
        let mut ed = editor(3);
        let mut astar = AStar::new();
        ed.paint(Point::new(0, 0));
        ed.paint(Point::new(1, 0));
        let mut ticks = 0;
        let out = ed
            .run(&mut astar, |_: &Grid| {
                ticks += 1;
                StepControl::abort_if(ticks == 2)
            })
            .unwrap();
        assert_eq!(out, Some(SearchOutcome::Cancelled));
        assert_eq!(ed.grid().kind(Point::new(1, 0)), Some(CellKind::Path));

        let out = ed.run(&mut astar, NoopObserver).unwrap();
        assert!(out.is_some_and(|o| o.is_found()));
        assert_eq!(ed.grid().kind(Point::new(1, 0)), Some(CellKind::Goal));
    }

    #[test]
    fn rejected_run_leaves_board_unlocked() {
        let mut ed = editor(3);
        let mut astar = AStar::new();
        ed.paint(Point::new(0, 0));
        ed.paint(Point::new(2, 0));
        // a goal outside the board is rejected before the search starts
        ed.goal = Some(Point::new(5, 5));
        assert!(ed.run(&mut astar, NoopObserver).is_err());
        assert!(!ed.is_locked());
    }

    #[test]
    fn clear_board_forgets_everything() {
        let mut ed = editor(3);
        ed.paint(Point::new(0, 0));
        ed.paint(Point::new(1, 0));
        ed.paint(Point::new(2, 0));
        ed.clear_board();
        assert_eq!(ed.start(), None);
        assert_eq!(ed.goal(), None);
        assert_eq!(ed.grid().count_kind(CellKind::Empty), 9);
    }

    #[test]
    fn scatter_keeps_endpoints() {
        let mut ed = editor(10);
        ed.paint(Point::new(0, 0));
        ed.paint(Point::new(9, 9));
        let mut rng = StdRng::seed_from_u64(1);
        let added = ed.scatter(&mut rng, 1.0);
        assert_eq!(added, 98);
        assert_eq!(ed.grid().kind(Point::new(0, 0)), Some(CellKind::Start));
        assert_eq!(ed.grid().kind(Point::new(9, 9)), Some(CellKind::Goal));
        assert_eq!(ed.scatter(&mut rng, 0.5), 0);
    }

    #[test]
    fn with_grid_adopts_existing_marks() {
        let g = Grid::from_ascii(
            "
            .S
            G.
            ",
        )
        .unwrap();
        let ed = Editor::with_grid(g);
        assert_eq!(ed.start(), Some(Point::new(1, 0)));
        assert_eq!(ed.goal(), Some(Point::new(0, 1)));
    }
}
