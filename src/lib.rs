//! Fsmdrive: a small named-state machine executor
//!
//! A machine is a registry of handlers keyed by state name, a start state and
//! a set of end states. Running it hands the cargo to the start handler, which
//! returns the next state name and the transformed cargo; the executor keeps
//! dispatching until a returned name is an end state or has no handler.
//!
//! # Core Concepts
//!
//! - **Handler**: behavior bound to a state via the `Handler` trait
//! - **Cargo**: the payload threaded from handler to handler
//! - **Machine**: the registry plus the drive loop
//! - **Limits**: optional step/time budgets and cancellation for bounded runs
//! - **Snapshot**: a serializable summary of a finished run
//!
//! # Example
//!
//! ```rust
//! use fsmdrive::core::{HandlerResult, Transition};
//! use fsmdrive::engine::{Halt, Machine};
//!
//! fn classify(n: i64) -> HandlerResult<i64> {
//!     match n {
//!         n if n < 0 => Ok(Transition::to("negative", n)),
//!         0 => Ok(Transition::to("zero", n)),
//!         n => Ok(Transition::to("classify", n - 1)),
//!     }
//! }
//!
//! let mut machine = Machine::new("classify");
//! machine.add_state("classify", classify);
//! machine.add_end_state("zero");
//! machine.add_end_state("negative");
//!
//! let report = machine.run(3).unwrap();
//! assert_eq!(report.halt, Halt::EndState);
//! assert_eq!(report.final_state, "zero");
//! assert_eq!(report.steps, 4);
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod snapshot;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder};
pub use crate::core::{Cargo, Handler, HandlerError, HandlerResult, Transition};
pub use engine::{Halt, Machine, RunError, RunLimits, RunOptions, RunReport};
pub use snapshot::RunSnapshot;
