//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::core::{Cargo, Handler, HandlerResult};
use crate::engine::Machine;

/// Builder for constructing machines with a fluent API.
///
/// Registrations are replayed in call order, so a name bound twice keeps its
/// last handler. `build` does not check that the start state has a handler:
/// running such a machine simply performs no work.
///
/// # Example
///
/// ```rust
/// use fsmdrive::builder::MachineBuilder;
/// use fsmdrive::core::Transition;
///
/// let machine = MachineBuilder::new()
///     .start("draft")
///     .state_fn("draft", |words: u32| Ok(Transition::to("published", words + 10)))
///     .end_state("published")
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.run(0).unwrap().cargo, 10);
/// ```
pub struct MachineBuilder<C = Cargo> {
    start: Option<String>,
    states: Vec<(String, Box<dyn Handler<C>>)>,
    end_states: Vec<String>,
}

impl<C> MachineBuilder<C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            start: None,
            states: Vec::new(),
            end_states: Vec::new(),
        }
    }

    /// Set the start state (required).
    pub fn start(mut self, name: impl Into<String>) -> Self {
        self.start = Some(name.into());
        self
    }

    /// Bind a handler to a state name.
    pub fn state<H>(mut self, name: impl Into<String>, handler: H) -> Self
    where
        H: Handler<C> + 'static,
    {
        self.states.push((name.into(), Box::new(handler)));
        self
    }

    /// Bind a closure to a state name.
    pub fn state_fn<F>(self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(C) -> HandlerResult<C> + Send + Sync + 'static,
    {
        self.state(name, handler)
    }

    /// Mark a state name as terminal.
    pub fn end_state(mut self, name: impl Into<String>) -> Self {
        self.end_states.push(name.into());
        self
    }

    /// Mark several state names as terminal.
    pub fn end_states<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.end_states.extend(names.into_iter().map(Into::into));
        self
    }

    /// Build the machine.
    /// Returns an error if no start state was given.
    pub fn build(self) -> Result<Machine<C>, BuildError> {
        let start = self.start.ok_or(BuildError::MissingStartState)?;

        let mut machine = Machine::new(start);
        for (name, handler) in self.states {
            machine.add_boxed_state(name, handler);
        }
        for name in self.end_states {
            machine.add_end_state(name);
        }

        Ok(machine)
    }
}

impl<C> Default for MachineBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HandlerError, Transition};
    use crate::engine::Halt;

    #[test]
    fn builder_requires_start_state() {
        let result = MachineBuilder::<u8>::new().end_state("done").build();

        assert!(matches!(result, Err(BuildError::MissingStartState)));
    }

    #[test]
    fn builder_allows_start_without_handler() {
        let machine = MachineBuilder::<u8>::new().start("missing").build().unwrap();

        let report = machine.run(3).unwrap();
        assert_eq!(report.steps, 0);
        assert_eq!(report.halt, Halt::MissingHandler);
    }

    #[test]
    fn fluent_api_builds_machine() {
        let machine = MachineBuilder::new()
            .start("a")
            .state_fn("a", |n: u8| Ok(Transition::to("b", n + 1)))
            .state_fn("b", |n: u8| Ok(Transition::to("c", n * 2)))
            .end_states(["c", "d"])
            .build()
            .unwrap();

        assert!(machine.is_end_state("c"));
        assert!(machine.is_end_state("d"));

        let report = machine.run(1).unwrap();
        assert_eq!(report.cargo, 4);
        assert_eq!(report.final_state, "c");
    }

    #[test]
    fn later_registration_wins() {
        let machine = MachineBuilder::new()
            .start("a")
            .state_fn("a", |_n: u8| Err(HandlerError::Failed("stale".to_string())))
            .state_fn("a", |n: u8| Ok(Transition::to("end", n)))
            .end_state("end")
            .build()
            .unwrap();

        assert!(machine.run(0).unwrap().halted_at_end());
    }
}
