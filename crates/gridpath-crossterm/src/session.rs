//! The interactive loop: read input, edit, search, redraw.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::event;
use crossterm::terminal;
use gridpath_astar::{AStar, SearchOutcome, StepControl};
use gridpath_core::Grid;
use log::{debug, info, warn};

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::input::{EditorInput, is_quit, to_input};
use crate::view::TerminalView;

const HELP: &str =
    "left: start/goal/wall  right: erase  space: search  o: scatter  r: reset  c: clear  q: quit";

/// Cooperative cancellation flag shared between a session and its owner.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    done: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation. Any running search stops at its next step
    /// and the session loop exits.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

/// Whether the session loop should keep going.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// An editing session bound to a terminal.
pub struct Session {
    editor: Editor,
    astar: AStar,
    config: EditorConfig,
    cancel: CancelToken,
    message: String,
}

impl Session {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            editor: Editor::new(&config.grid),
            astar: AStar::new(),
            config,
            cancel: CancelToken::new(),
            message: String::new(),
        }
    }

    /// A handle that stops the session from elsewhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Status line text.
    pub fn status(&self) -> String {
        if self.message.is_empty() {
            HELP.to_owned()
        } else {
            format!("{}  |  {HELP}", self.message)
        }
    }

    /// Take over the terminal and run until the user quits.
    pub fn run(&mut self) -> io::Result<()> {
        let rows = self.editor.grid().rows();
        let mut view = TerminalView::stdout()?;
        let (need_cols, need_rows) = view.layout().required_size(self.editor.grid());
        if let Ok((cols, term_rows)) = terminal::size() {
            if cols < need_cols || term_rows < need_rows {
                warn!("terminal is {cols}x{term_rows}, the board needs {need_cols}x{need_rows}");
            }
        }
        info!("session: started on a {rows}x{rows} board");

        let status = self.status();
        view.draw(self.editor.grid(), &status)?;
        while !self.cancel.is_cancelled() {
            if !event::poll(Duration::from_millis(50))? {
                continue;
            }
            let ev = event::read()?;
            if let event::Event::Resize(..) = ev {
                view.invalidate();
            }
            if let Some(input) = to_input(&ev, view.layout(), self.editor.grid()) {
                if self.handle(input, &mut view)? == Flow::Quit {
                    break;
                }
            }
            let status = self.status();
            view.draw(self.editor.grid(), &status)?;
        }
        info!("session: finished");
        Ok(())
    }

    fn handle<W: Write>(
        &mut self,
        input: EditorInput,
        view: &mut TerminalView<W>,
    ) -> io::Result<Flow> {
        match input {
            EditorInput::Paint(p) => {
                self.editor.paint(p);
            }
            EditorInput::Erase(p) => {
                self.editor.erase(p);
            }
            EditorInput::ClearBoard => {
                self.editor.clear_board();
                self.message.clear();
            }
            EditorInput::ClearSearch => {
                self.editor.clear_search();
                self.message.clear();
            }
            EditorInput::Scatter => {
                let added = self
                    .editor
                    .scatter(&mut rand::rng(), self.config.scatter_density);
                if added == 0 && self.editor.is_locked() {
                    self.message = "press r to edit again".to_owned();
                }
            }
            EditorInput::Run => return self.search(view),
            EditorInput::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Run the search, animating every step on `view`.
    fn search<W: Write>(&mut self, view: &mut TerminalView<W>) -> io::Result<Flow> {
        let delay = self.config.step_delay;
        let cancel = self.cancel.clone();
        let mut io_err = None;

        let observer = |grid: &Grid| {
            if let Err(err) = view.draw(grid, "searching...  q: abort") {
                io_err = Some(err);
                return StepControl::Abort;
            }
            if cancel.is_cancelled() {
                return StepControl::Abort;
            }
            match wait_for_quit(delay) {
                Ok(true) => cancel.cancel(),
                Ok(false) => {}
                Err(err) => {
                    io_err = Some(err);
                    return StepControl::Abort;
                }
            }
            StepControl::abort_if(cancel.is_cancelled())
        };
        let result = self.editor.run(&mut self.astar, observer);
        if let Some(err) = io_err {
            return Err(err);
        }

        self.message = match result {
            Ok(None) => "place a start and a goal first".to_owned(),
            Ok(Some(SearchOutcome::Found(path))) => format!("path found: {} steps", path.cost()),
            Ok(Some(SearchOutcome::NotFound)) => "no path".to_owned(),
            Ok(Some(SearchOutcome::Cancelled)) => {
                debug!("session: search aborted");
                return Ok(Flow::Quit);
            }
            Err(err) => format!("cannot search: {err}"),
        };
        let stats = self.astar.last_stats();
        debug!(
            "session: {} ({} expanded, {} ticks)",
            self.message, stats.expanded, stats.ticks
        );
        Ok(Flow::Continue)
    }
}

/// Wait up to `delay` for input, reporting whether a quit key came in.
/// Other input read meanwhile is dropped.
fn wait_for_quit(delay: Duration) -> io::Result<bool> {
    let deadline = Instant::now() + delay;
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        if !event::poll(left)? {
            return Ok(false);
        }
        if is_quit(&event::read()?) {
            return Ok(true);
        }
        if left.is_zero() {
            return Ok(false);
        }
    }
}
