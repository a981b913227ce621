//! Builder API for assembling machines.
//!
//! [`MachineBuilder`] gives a fluent alternative to calling
//! [`Machine::add_state`](crate::engine::Machine::add_state) by hand, and the
//! [`machine!`](crate::machine) macro covers literal definitions.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;
