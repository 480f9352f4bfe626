use gridpath_core::Grid;

/// What an observer wants the search to do after a step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StepControl {
    #[default]
    Continue,
    /// Stop the search now and report it as cancelled.
    Abort,
}

impl StepControl {
    /// `Abort` when `cond` holds, `Continue` otherwise.
    #[inline]
    pub fn abort_if(cond: bool) -> Self {
        if cond { Self::Abort } else { Self::Continue }
    }

    #[inline]
    pub fn is_abort(self) -> bool {
        self == Self::Abort
    }
}

/// Render-tick hook invoked by a search after every state-changing step.
///
/// The observer gets a read-only view of the grid as it stands after the
/// step. It runs synchronously on the search's thread, so any pacing
/// (sleeping, frame limiting) happens inside it.
pub trait StepObserver {
    fn on_step(&mut self, grid: &Grid) -> StepControl;
}

impl<F> StepObserver for F
where
    F: FnMut(&Grid) -> StepControl,
{
    #[inline]
    fn on_step(&mut self, grid: &Grid) -> StepControl {
        self(grid)
    }
}

/// An observer that ignores every step and never aborts.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    #[inline]
    fn on_step(&mut self, _grid: &Grid) -> StepControl {
        StepControl::Continue
    }
}
