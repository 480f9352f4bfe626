//! Mapping of crossterm events to editor commands.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use gridpath_core::{Grid, Point};

/// Terminal columns used to draw one cell, so cells look roughly square.
pub const CELL_COLS: u16 = 2;

/// What the user asked for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditorInput {
    /// Left button on a cell: place start, goal or obstacle.
    Paint(Point),
    /// Right button on a cell: reset it.
    Erase(Point),
    /// Start the search.
    Run,
    /// Wipe the whole board.
    ClearBoard,
    /// Remove the marks of the last search.
    ClearSearch,
    /// Sprinkle random obstacles.
    Scatter,
    Quit,
}

/// Where the board sits on the terminal screen.
///
/// Terminal rows play the part of the grid's pixels: a cell is
/// [`Grid::cell_size`] rows tall and `CELL_COLS` times as many columns wide.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Screen position (column, row) of the top-left cell.
    pub origin: Point,
}

impl Layout {
    /// The board right below a one-line status bar.
    pub fn new() -> Self {
        Self {
            origin: Point::new(0, 1),
        }
    }

    /// Cell of `grid` under the terminal position `(column, row)`.
    pub fn cell_at(&self, grid: &Grid, column: u16, row: u16) -> Option<Point> {
        let x = i32::from(column) - self.origin.x;
        let y = i32::from(row) - self.origin.y;
        grid.cell_at_pixel(Point::new(x.div_euclid(i32::from(CELL_COLS)), y))
    }

    /// Terminal position (column, row) of the top-left corner of cell `p`,
    /// saturated to the terminal's coordinate range.
    pub fn screen_pos(&self, grid: &Grid, p: Point) -> (u16, u16) {
        let px = grid.pixel_origin(p);
        let column = i64::from(self.origin.x) + i64::from(px.x) * i64::from(CELL_COLS);
        let row = i64::from(self.origin.y) + i64::from(px.y);
        (saturate(column), saturate(row))
    }

    /// Terminal size (columns, rows) needed to show the status bar and the
    /// whole of `grid`.
    pub fn required_size(&self, grid: &Grid) -> (u16, u16) {
        self.screen_pos(grid, Point::new(grid.rows(), grid.rows()))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

fn saturate(v: i64) -> u16 {
    u16::try_from(v.max(0)).unwrap_or(u16::MAX)
}

/// Whether `ev` asks to leave the program.
pub fn is_quit(ev: &Event) -> bool {
    matches!(to_key_input(ev), Some(EditorInput::Quit))
}

/// Translate a terminal event into an editor command.
pub fn to_input(ev: &Event, layout: &Layout, grid: &Grid) -> Option<EditorInput> {
    match ev {
        Event::Key(_) => to_key_input(ev),
        Event::Mouse(me) => to_mouse_input(me, layout, grid),
        _ => None,
    }
}

fn to_key_input(ev: &Event) -> Option<EditorInput> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = ev
    else {
        return None;
    };
    if *kind == KeyEventKind::Release {
        return None;
    }
    if modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(code, KeyCode::Char('c')).then_some(EditorInput::Quit);
    }
    match code {
        KeyCode::Char(' ') => Some(EditorInput::Run),
        KeyCode::Char('c') => Some(EditorInput::ClearBoard),
        KeyCode::Char('r') => Some(EditorInput::ClearSearch),
        KeyCode::Char('o') => Some(EditorInput::Scatter),
        KeyCode::Char('q') | KeyCode::Esc => Some(EditorInput::Quit),
        _ => None,
    }
}

fn to_mouse_input(me: &MouseEvent, layout: &Layout, grid: &Grid) -> Option<EditorInput> {
    let button = match me.kind {
        MouseEventKind::Down(b) | MouseEventKind::Drag(b) => b,
        _ => return None,
    };
    let p = layout.cell_at(grid, me.column, me.row)?;
    match button {
        MouseButton::Left => Some(EditorInput::Paint(p)),
        MouseButton::Right => Some(EditorInput::Erase(p)),
        MouseButton::Middle => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn keys_map_to_commands() {
        let (layout, g) = (Layout::new(), Grid::new(10, 1));
        let input = |code| to_input(&key(code), &layout, &g);
        assert_eq!(input(KeyCode::Char(' ')), Some(EditorInput::Run));
        assert_eq!(input(KeyCode::Char('c')), Some(EditorInput::ClearBoard));
        assert_eq!(input(KeyCode::Char('r')), Some(EditorInput::ClearSearch));
        assert_eq!(input(KeyCode::Char('o')), Some(EditorInput::Scatter));
        assert_eq!(input(KeyCode::Esc), Some(EditorInput::Quit));
        assert_eq!(input(KeyCode::Char('z')), None);
    }

    #[test]
    fn ctrl_c_quits_instead_of_clearing() {
        let ev = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(is_quit(&ev));
        assert!(is_quit(&key(KeyCode::Char('q'))));
        assert!(!is_quit(&key(KeyCode::Char('c'))));
    }

    #[test]
    fn mouse_buttons_paint_and_erase() {
        let (layout, g) = (Layout::new(), Grid::new(10, 1));
        // columns 4 and 5 both belong to cell x = 2; row 1 is board row 0
        assert_eq!(
            to_input(&mouse(MouseEventKind::Down(MouseButton::Left), 5, 1), &layout, &g),
            Some(EditorInput::Paint(Point::new(2, 0)))
        );
        assert_eq!(
            to_input(&mouse(MouseEventKind::Drag(MouseButton::Right), 4, 3), &layout, &g),
            Some(EditorInput::Erase(Point::new(2, 2)))
        );
        assert_eq!(
            to_input(&mouse(MouseEventKind::Up(MouseButton::Left), 4, 3), &layout, &g),
            None
        );
    }

    #[test]
    fn clicks_outside_the_board_are_ignored() {
        let (layout, g) = (Layout::new(), Grid::new(3, 1));
        // the status bar row
        assert_eq!(layout.cell_at(&g, 0, 0), None);
        assert_eq!(layout.cell_at(&g, 6, 1), None);
        assert_eq!(layout.cell_at(&g, 0, 4), None);
        assert_eq!(layout.cell_at(&g, 5, 3), Some(Point::new(2, 2)));
    }

    #[test]
    fn screen_positions_invert_cell_lookup() {
        let (layout, g) = (Layout::new(), Grid::new(8, 1));
        for p in [Point::new(0, 0), Point::new(7, 3), Point::new(4, 7)] {
            let (column, row) = layout.screen_pos(&g, p);
            assert_eq!(layout.cell_at(&g, column, row), Some(p));
            assert_eq!(layout.cell_at(&g, column + 1, row), Some(p));
        }
        assert_eq!(layout.required_size(&g), (16, 9));
    }

    #[test]
    fn larger_cells_span_several_rows() {
        let (layout, g) = (Layout::new(), Grid::new(4, 3));
        assert_eq!(layout.screen_pos(&g, Point::new(1, 2)), (6, 7));
        // a 3-row cell is 6 columns wide
        assert_eq!(layout.cell_at(&g, 11, 9), Some(Point::new(1, 2)));
        assert_eq!(layout.cell_at(&g, 12, 9), Some(Point::new(2, 2)));
        assert_eq!(layout.required_size(&g), (24, 13));
    }

    #[test]
    fn huge_boards_saturate_instead_of_wrapping() {
        let (layout, g) = (Layout::new(), Grid::new(1, 40_000));
        assert_eq!(layout.screen_pos(&g, Point::new(0, 0)), (0, 1));
        assert_eq!(layout.screen_pos(&g, Point::new(1, 1)), (u16::MAX, 40_001));
        let (layout, g) = (Layout::new(), Grid::new(1, 70_000));
        assert_eq!(layout.required_size(&g), (u16::MAX, u16::MAX));
    }
}
