use std::collections::BinaryHeap;

use gridpath_core::{CellKind, Grid, Point};
use log::{debug, trace, warn};

use crate::distance::manhattan;
use crate::error::SearchError;
use crate::node::{NO_PARENT, Node, OpenEntry, UNREACHABLE};
use crate::outcome::{Path, SearchOutcome, SearchStats};
use crate::traits::{NoopObserver, StepControl, StepObserver};

/// Reusable A* engine for a [`Grid`].
///
/// The engine owns the per-cell `g`/`f`/parent arrays. They are allocated
/// once per grid size and invalidated lazily between runs by a generation
/// counter, so repeated searches do not allocate after warm-up. After a run
/// the scores of that run stay queryable through [`g_score`](Self::g_score)
/// and [`came_from`](Self::came_from).
pub struct AStar {
    nodes: Vec<Node>,
    generation: u32,
    rows: i32,
    stats: SearchStats,
    // scratch buffer for neighbour queries
    nbuf: Vec<Point>,
}

impl Default for AStar {
    fn default() -> Self {
        Self::new()
    }
}

impl AStar {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generation: 0,
            rows: 0,
            stats: SearchStats::default(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Counters of the last run.
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Best known cost from the start to `p` in the last run, or `None` if
    /// the run never reached `p`.
    pub fn g_score(&self, p: Point) -> Option<i32> {
        self.node(p).map(|n| n.g).filter(|&g| g != UNREACHABLE)
    }

    /// Estimated total cost through `p` in the last run.
    pub fn f_score(&self, p: Point) -> Option<i32> {
        self.node(p).map(|n| n.f).filter(|&f| f != UNREACHABLE)
    }

    /// Predecessor of `p` on the best path found by the last run.
    pub fn came_from(&self, p: Point) -> Option<Point> {
        self.node(p)
            .map(|n| n.parent)
            .filter(|&parent| parent != NO_PARENT)
            .map(|parent| self.point(parent))
    }

    /// Search for a shortest path from `start` to `goal`.
    ///
    /// `start` must be classified [`CellKind::Start`] and `goal`
    /// [`CellKind::Goal`]; when they coincide the cell may hold either.
    /// Invalid input is rejected before the grid is touched.
    ///
    /// While running, the engine paints newly queued cells `Frontier` and
    /// expanded cells `Visited`, and calls `observer` once per expansion.
    /// On success it paints the path cells `Path`, calling `observer` once
    /// per painted cell, then restores the start and goal marks.
    ///
    /// If the observer returns [`StepControl::Abort`], the run stops at once
    /// with [`SearchOutcome::Cancelled`] and the grid is left as it was when
    /// the observer was called.
    pub fn find_path<O: StepObserver>(
        &mut self,
        grid: &mut Grid,
        start: Point,
        goal: Point,
        mut observer: O,
    ) -> Result<SearchOutcome, SearchError> {
        if let Err(err) = validate(grid, start, goal) {
            warn!("astar: rejected search {start} -> {goal}: {err}");
            return Err(err);
        }
        self.prepare(grid);
        let cur_gen = self.generation;

        // validate() guarantees both are inside the grid.
        let (Some(start_idx), Some(goal_idx)) = (grid.index_of(start), grid.index_of(goal)) else {
            return Err(SearchError::OutOfBounds { point: start });
        };
        debug!(
            "astar: searching {start} -> {goal} on a {0}x{0} grid",
            grid.rows()
        );

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.f = manhattan(start, goal);
            node.parent = NO_PARENT;
            node.generation = cur_gen;
            node.open = true;
        }

        // Insertion counter; never reset within a run.
        let mut seq: u64 = 0;
        let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
        open.push(OpenEntry {
            f: self.nodes[start_idx].f,
            seq,
            idx: start_idx,
        });
        self.stats.pushed += 1;

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = loop {
            let Some(current) = open.pop() else {
                break SearchOutcome::NotFound;
            };
            let ci = current.idx;
            self.nodes[ci].open = false;
            self.stats.expanded += 1;

            if ci == goal_idx {
                break self.trace_path(grid, start_idx, goal_idx, &mut observer);
            }

            let current_point = self.point(ci);
            let current_g = self.nodes[ci].g;
            trace!("astar: expanding {current_point} (g = {current_g})");

            nbuf.clear();
            grid.neighbors_into(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = grid.index_of(np) else {
                    continue;
                };
                let tentative_g = current_g + 1;

                let n = &mut self.nodes[ni];
                if n.generation != cur_gen {
                    *n = Node {
                        generation: cur_gen,
                        ..Node::default()
                    };
                }
                if tentative_g >= n.g {
                    continue;
                }

                n.g = tentative_g;
                n.f = tentative_g + manhattan(np, goal);
                n.parent = ci;

                // A queued cell keeps the key it was pushed with.
                if !n.open {
                    n.open = true;
                    seq += 1;
                    open.push(OpenEntry {
                        f: n.f,
                        seq,
                        idx: ni,
                    });
                    self.stats.pushed += 1;
                    grid.classify(np, CellKind::Frontier);
                }
            }

            if self.tick(grid, &mut observer).is_abort() {
                break SearchOutcome::Cancelled;
            }

            if ci != start_idx {
                grid.classify(current_point, CellKind::Visited);
            }
        };

        self.nbuf = nbuf;

        let stats = self.stats;
        match &outcome {
            SearchOutcome::Found(path) => debug!(
                "astar: found path of {} steps ({} expanded, {} queued)",
                path.cost(),
                stats.expanded,
                stats.pushed
            ),
            SearchOutcome::NotFound => debug!(
                "astar: goal unreachable ({} expanded, {} queued)",
                stats.expanded, stats.pushed
            ),
            SearchOutcome::Cancelled => debug!(
                "astar: cancelled after {} expansions",
                stats.expanded
            ),
        }
        Ok(outcome)
    }

    /// Walk the parent links back from the goal, painting the path.
    fn trace_path<O: StepObserver>(
        &mut self,
        grid: &mut Grid,
        start_idx: usize,
        goal_idx: usize,
        observer: &mut O,
    ) -> SearchOutcome {
        let cost = self.nodes[goal_idx].g;

        let mut cells = Vec::with_capacity(cost.max(0) as usize + 1);
        let mut ci = goal_idx;
        while ci != start_idx && ci != NO_PARENT {
            let p = self.point(ci);
            cells.push(p);
            grid.classify(p, CellKind::Path);
            if self.tick(grid, observer).is_abort() {
                return SearchOutcome::Cancelled;
            }
            ci = self.nodes[ci].parent;
        }

        let start = self.point(start_idx);
        if goal_idx != start_idx {
            grid.classify(self.point(goal_idx), CellKind::Goal);
            grid.classify(start, CellKind::Start);
        }
        cells.push(start);
        cells.reverse();
        SearchOutcome::Found(Path::new(cells, cost))
    }

    #[inline]
    fn tick<O: StepObserver>(&mut self, grid: &Grid, observer: &mut O) -> StepControl {
        self.stats.ticks += 1;
        observer.on_step(grid)
    }

    /// Size the node array for `grid` and start a new generation.
    fn prepare(&mut self, grid: &Grid) {
        self.stats = SearchStats::default();
        if self.nodes.len() != grid.len() || self.rows != grid.rows() {
            self.nodes.clear();
            self.nodes.resize(grid.len(), Node::default());
            self.rows = grid.rows();
            self.generation = 0;
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: old generations could alias the new one.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
    }

    /// Node of `p` if it belongs to the last run.
    fn node(&self, p: Point) -> Option<&Node> {
        if p.x < 0 || p.y < 0 || p.x >= self.rows || p.y >= self.rows {
            return None;
        }
        let idx = (p.y as usize) * (self.rows as usize) + (p.x as usize);
        self.nodes
            .get(idx)
            .filter(|n| self.generation != 0 && n.generation == self.generation)
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        let rows = self.rows.max(1) as usize;
        Point::new((idx % rows) as i32, (idx / rows) as i32)
    }
}

/// Check that `start` and `goal` are in bounds and painted as such.
fn validate(grid: &Grid, start: Point, goal: Point) -> Result<(), SearchError> {
    let kind_at = |p: Point| grid.kind(p).ok_or(SearchError::OutOfBounds { point: p });
    let start_kind = kind_at(start)?;
    let goal_kind = kind_at(goal)?;

    if start == goal {
        return match start_kind {
            CellKind::Start | CellKind::Goal => Ok(()),
            found => Err(SearchError::Misclassified {
                point: start,
                expected: CellKind::Start,
                found,
            }),
        };
    }
    if start_kind != CellKind::Start {
        return Err(SearchError::Misclassified {
            point: start,
            expected: CellKind::Start,
            found: start_kind,
        });
    }
    if goal_kind != CellKind::Goal {
        return Err(SearchError::Misclassified {
            point: goal,
            expected: CellKind::Goal,
            found: goal_kind,
        });
    }
    Ok(())
}

/// Run a single search with a throwaway [`AStar`].
pub fn find_path<O: StepObserver>(
    grid: &mut Grid,
    start: Point,
    goal: Point,
    observer: O,
) -> Result<SearchOutcome, SearchError> {
    AStar::new().find_path(grid, start, goal, observer)
}

/// Run a search with no observer, using the grid's own start and goal
/// marks. Returns `Ok(None)` when the grid lacks a start or a goal.
pub fn solve(grid: &mut Grid) -> Result<Option<SearchOutcome>, SearchError> {
    let (Some(start), Some(goal)) = (
        grid.find_kind(CellKind::Start),
        grid.find_kind(CellKind::Goal),
    ) else {
        return Ok(None);
    };
    find_path(grid, start, goal, NoopObserver).map(Some)
}
