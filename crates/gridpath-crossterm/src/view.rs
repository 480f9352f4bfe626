//! Drawing a [`Grid`] on a terminal.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, event, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{self, ClearType},
};
use gridpath_core::{Cell, CellKind, Grid};

use crate::input::{CELL_COLS, Layout};

/// Background colour of each cell kind.
pub fn kind_color(kind: CellKind) -> Color {
    let (r, g, b) = match kind {
        CellKind::Empty => (255, 255, 255),
        CellKind::Obstacle => (0, 0, 0),
        CellKind::Start => (255, 165, 0),
        CellKind::Goal => (64, 224, 208),
        CellKind::Frontier => (0, 255, 0),
        CellKind::Visited => (255, 0, 0),
        CellKind::Path => (128, 0, 128),
    };
    Color::Rgb { r, g, b }
}

/// Cells of `grid` whose kind differs from `prev`. A size mismatch means
/// every cell changed.
pub fn changed_cells(prev: &[CellKind], grid: &Grid) -> Vec<Cell> {
    if prev.len() != grid.len() {
        return grid.iter().collect();
    }
    grid.iter()
        .zip(prev)
        .filter(|(cell, old)| cell.kind != **old)
        .map(|(cell, _)| cell)
        .collect()
}

/// Renders a grid and a status line, redrawing only changed cells.
///
/// A view built with [`TerminalView::stdout`] owns the terminal: it enters
/// raw mode and the alternate screen, captures the mouse, and restores
/// everything when dropped.
pub struct TerminalView<W: Write> {
    out: W,
    layout: Layout,
    drawn: Vec<CellKind>,
    status: Option<String>,
    owns_terminal: bool,
}

impl TerminalView<Stdout> {
    /// Take over the terminal.
    pub fn stdout() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        let entered = queue!(
            out,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )
        .and_then(|()| out.flush());
        if let Err(err) = entered {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        let mut view = Self::with_writer(out);
        view.owns_terminal = true;
        Ok(view)
    }
}

impl<W: Write> TerminalView<W> {
    /// Draw into `out` without touching terminal modes.
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            layout: Layout::new(),
            drawn: Vec::new(),
            status: None,
            owns_terminal: false,
        }
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Forget what is on screen so the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.drawn.clear();
        self.status = None;
    }

    /// Bring the screen up to date with `grid` and `status`.
    pub fn draw(&mut self, grid: &Grid, status: &str) -> io::Result<()> {
        if self.drawn.is_empty() {
            queue!(self.out, ResetColor, terminal::Clear(ClearType::All))?;
        }
        let height = u16::try_from(grid.cell_size()).unwrap_or(u16::MAX);
        let blank = " ".repeat(usize::from(height) * usize::from(CELL_COLS));
        for cell in changed_cells(&self.drawn, grid) {
            let (column, row) = self.layout.screen_pos(grid, cell.pos);
            queue!(self.out, SetBackgroundColor(kind_color(cell.kind)))?;
            for dy in 0..height {
                queue!(
                    self.out,
                    cursor::MoveTo(column, row.saturating_add(dy)),
                    Print(&blank)
                )?;
            }
        }
        self.drawn.clear();
        self.drawn.extend(grid.iter().map(|c| c.kind));

        if self.status.as_deref() != Some(status) {
            queue!(
                self.out,
                ResetColor,
                cursor::MoveTo(0, 0),
                terminal::Clear(ClearType::CurrentLine),
                Print(status)
            )?;
            self.status = Some(status.to_owned());
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Drop for TerminalView<W> {
    fn drop(&mut self) {
        if !self.owns_terminal {
            return;
        }
        let _ = queue!(
            self.out,
            ResetColor,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = self.out.flush();
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_core::Point;

    #[test]
    fn every_kind_has_a_distinct_color() {
        let kinds = [
            CellKind::Empty,
            CellKind::Obstacle,
            CellKind::Start,
            CellKind::Goal,
            CellKind::Frontier,
            CellKind::Visited,
            CellKind::Path,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(kind_color(*a), kind_color(*b));
            }
        }
    }

    #[test]
    fn diff_reports_only_changed_cells() {
        let mut g = Grid::new(3, 1);
        let prev: Vec<_> = g.iter().map(|c| c.kind).collect();
        assert!(changed_cells(&prev, &g).is_empty());
        g.classify(Point::new(1, 2), CellKind::Visited);
        let diff = changed_cells(&prev, &g);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0].pos, Point::new(1, 2));
        assert_eq!(diff[0].kind, CellKind::Visited);
        assert_eq!(changed_cells(&[], &g).len(), 9);
    }

    #[test]
    fn second_draw_of_same_state_writes_nothing_new() {
        let g = Grid::new(4, 1);
        let mut view = TerminalView::with_writer(Vec::new());
        view.draw(&g, "ready").unwrap();
        let first = view.writer().len();
        assert!(first > 0);
        view.draw(&g, "ready").unwrap();
        let second = view.writer().len() - first;
        // only the trailing colour reset
        let mut reset = Vec::new();
        queue!(reset, ResetColor).unwrap();
        assert_eq!(second, reset.len());
    }

    #[test]
    fn invalidate_forces_full_repaint() {
        let g = Grid::new(2, 1);
        let mut view = TerminalView::with_writer(Vec::new());
        view.draw(&g, "a").unwrap();
        let first = view.writer().len();
        view.invalidate();
        view.draw(&g, "a").unwrap();
        assert_eq!(view.writer().len() - first, first);
    }

    #[test]
    fn tall_cells_fill_every_row() {
        let g = Grid::new(1, 2);
        let mut view = TerminalView::with_writer(Vec::new());
        view.draw(&g, "").unwrap();
        let out = String::from_utf8(view.writer().clone()).unwrap();
        // crossterm positions are 1-based: rows 1 and 2, column 0
        assert!(out.contains("\x1b[2;1H    "));
        assert!(out.contains("\x1b[3;1H    "));
        assert!(!out.contains("\x1b[4;1H"));
    }
}
