//! The executor that drives a machine.
//!
//! A [`Machine`] owns a registry of named handlers, a start state and a set
//! of end states. Running it threads cargo from handler to handler until a
//! returned state name is an end state or has no handler.
//!
//! # Optional bounds
//!
//! The loop has no built-in iteration cap: a machine whose handlers never
//! return an end state runs forever. Callers that need a bound pass
//! [`RunOptions`] with [`RunLimits`] or a [`CancelToken`]; a run stopped
//! that way reports [`Halt::Limit`], never [`Halt::EndState`].
//!
//! # Example
//!
//! ```rust
//! use fsmdrive::core::{HandlerResult, Transition};
//! use fsmdrive::engine::{Halt, Machine};
//!
//! fn count_up(n: u32) -> HandlerResult<u32> {
//!     if n >= 3 {
//!         Ok(Transition::to("done", n))
//!     } else {
//!         Ok(Transition::to("count", n + 1))
//!     }
//! }
//!
//! let mut machine = Machine::new("count");
//! machine.add_state("count", count_up);
//! machine.add_end_state("done");
//!
//! let report = machine.run(0).unwrap();
//! assert_eq!(report.halt, Halt::EndState);
//! assert_eq!(report.steps, 4);
//! assert_eq!(report.cargo, 3);
//! ```

mod limits;
mod machine;
mod observer;
mod options;
mod outcome;

pub use limits::{LimitExceeded, RunLimits};
pub use machine::Machine;
pub use observer::{NoopObserver, Observer};
pub use options::{CancelToken, RunOptions};
pub use outcome::{Halt, RunError, RunReport};
