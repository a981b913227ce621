//! What a run reports back.

use super::limits::LimitExceeded;
use crate::core::{HandlerError, RunHistory};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a run stopped.
///
/// `EndState` and `MissingHandler` are both ordinary, silent stops: the
/// executor raises no error for either. They are told apart here only so
/// callers can inspect the difference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Halt {
    /// A handler returned a name registered as an end state
    EndState,

    /// The current state has no registered handler
    MissingHandler,

    /// A budget ran out or the run was cancelled
    Limit(LimitExceeded),
}

/// Result of a run that halted without a handler error.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport<C> {
    /// The state the run started in
    pub start_state: String,
    /// The last state name reached
    ///
    /// For `EndState` this is the end state; for `MissingHandler` the name
    /// with no handler; for `Limit` the state whose handler would have run next.
    pub final_state: String,
    /// The cargo as last produced (or as passed in, if nothing ran)
    pub cargo: C,
    /// Number of handler invocations
    pub steps: usize,
    pub halt: Halt,
    /// Present when the run was asked to record one
    pub history: Option<RunHistory>,
}

impl<C> RunReport<C> {
    /// Check if the run reached a declared end state.
    pub fn halted_at_end(&self) -> bool {
        self.halt == Halt::EndState
    }

    pub fn into_cargo(self) -> C {
        self.cargo
    }
}

/// Errors that abort a run.
///
/// The executor itself never fails; the only error is a handler's own.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Handler for state '{state}' failed at step {step}: {source}")]
    Handler {
        state: String,
        step: usize,
        source: HandlerError,
    },
}
