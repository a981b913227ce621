//! Hooks for watching a run from the outside.

use super::outcome::Halt;

/// Receives a callback after every transition of a run.
///
/// Observers see state names and a borrow of the cargo the next handler will
/// receive; they cannot alter either. Closures of the shape
/// `FnMut(usize, &str, &str, &C)` are observers.
pub trait Observer<C> {
    /// Called after the handler for `from` returned `to`. `step` is 1-based.
    fn on_transition(&mut self, step: usize, from: &str, to: &str, cargo: &C);

    /// Called once when the run halts without a handler error.
    fn on_halt(&mut self, _halt: &Halt, _steps: usize) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl<C> Observer<C> for NoopObserver {
    fn on_transition(&mut self, _step: usize, _from: &str, _to: &str, _cargo: &C) {}
}

impl<C, F> Observer<C> for F
where
    F: FnMut(usize, &str, &str, &C),
{
    fn on_transition(&mut self, step: usize, from: &str, to: &str, cargo: &C) {
        self(step, from, to, cargo)
    }
}
