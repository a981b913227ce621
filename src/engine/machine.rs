//! The named-state machine and its drive loop.

use super::observer::{NoopObserver, Observer};
use super::options::RunOptions;
use super::outcome::{Halt, RunError, RunReport};
use crate::core::{Cargo, Handler, HandlerResult, RunHistory, StepRecord, Transition};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::time::Instant;
use tracing::{debug, debug_span, trace, warn};

/// A registry of named handlers plus a start state and a set of end states.
///
/// The handler map and the end-state set are independent: a name may be in
/// either, both or neither. The executor consults the end-state set to decide
/// termination and the handler map to decide the next invocation.
///
/// A machine is assembled through [`add_state`](Self::add_state) and
/// [`add_end_state`](Self::add_end_state) and then run any number of times;
/// runs only borrow it.
pub struct Machine<C = Cargo> {
    handlers: HashMap<String, Box<dyn Handler<C>>>,
    start_state: String,
    end_states: HashSet<String>,
}

impl<C> Machine<C> {
    /// Create a machine with an empty registry and no end states.
    pub fn new(start_state: impl Into<String>) -> Self {
        Self {
            handlers: HashMap::new(),
            start_state: start_state.into(),
            end_states: HashSet::new(),
        }
    }

    /// Bind `handler` to `name`, replacing any earlier binding.
    pub fn add_state<H>(&mut self, name: impl Into<String>, handler: H)
    where
        H: Handler<C> + 'static,
    {
        self.add_boxed_state(name.into(), Box::new(handler));
    }

    pub(crate) fn add_boxed_state(&mut self, name: String, handler: Box<dyn Handler<C>>) {
        if self.handlers.insert(name.clone(), handler).is_some() {
            debug!(state = %name, "replaced existing handler");
        }
    }

    /// Bind a closure to `name`.
    ///
    /// Same as [`add_state`](Self::add_state), but the `Fn` bound lets the
    /// compiler infer the closure's return type.
    pub fn add_state_fn<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(C) -> HandlerResult<C> + Send + Sync + 'static,
    {
        self.add_state(name, handler);
    }

    /// Mark `name` as terminal. It needs no handler.
    pub fn add_end_state(&mut self, name: impl Into<String>) {
        self.end_states.insert(name.into());
    }

    pub fn start_state(&self) -> &str {
        &self.start_state
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn is_end_state(&self, name: &str) -> bool {
        self.end_states.contains(name)
    }

    /// Names with a registered handler, sorted.
    pub fn state_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered end states, sorted.
    pub fn end_state_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.end_states.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Drive the machine from the start state with `cargo`.
    ///
    /// Stops when a handler returns an end state, or when the state to run
    /// next has no handler. A missing start handler means zero invocations
    /// and is not an error. There is no iteration cap; see
    /// [`run_with`](Self::run_with) for bounded runs.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Handler`] if a handler fails; the run stops there.
    pub fn run(&self, cargo: C) -> Result<RunReport<C>, RunError> {
        self.run_with(cargo, &RunOptions::default(), &mut NoopObserver)
    }

    /// Drive the machine with limits, cancellation, history and an observer.
    ///
    /// Limits are checked after the next handler is found and before it is
    /// invoked, so a run whose budget is exactly sufficient still reaches its
    /// end state.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Handler`] if a handler fails; the run stops there.
    pub fn run_with(
        &self,
        cargo: C,
        options: &RunOptions,
        observer: &mut dyn Observer<C>,
    ) -> Result<RunReport<C>, RunError> {
        let span = debug_span!("fsm_run", start = %self.start_state);
        let _entered = span.enter();

        let started = Instant::now();
        let mut history = options.records_history().then(RunHistory::new);
        let mut current = self.start_state.clone();
        let mut cargo = cargo;
        let mut steps = 0;

        let halt = loop {
            let Some(handler) = self.handlers.get(&current) else {
                debug!(state = %current, steps, "no handler registered, halting");
                break Halt::MissingHandler;
            };

            if let Err(exceeded) = options.check(steps, started.elapsed()) {
                warn!(state = %current, steps, %exceeded, "run stopped by limit");
                break Halt::Limit(exceeded);
            }

            let Transition {
                next,
                cargo: next_cargo,
            } = handler
                .transition(cargo)
                .map_err(|source| RunError::Handler {
                    state: current.clone(),
                    step: steps + 1,
                    source,
                })?;
            steps += 1;

            trace!(step = steps, from = %current, to = %next, "transition");
            observer.on_transition(steps, &current, &next, &next_cargo);

            let reached_end = self.end_states.contains(&next);
            let from = std::mem::replace(&mut current, next);
            if let Some(history) = history.as_mut() {
                history.record(StepRecord::new(steps, from, current.as_str()));
            }
            cargo = next_cargo;

            if reached_end {
                debug!(state = %current, steps, "reached end state");
                break Halt::EndState;
            }
        };

        observer.on_halt(&halt, steps);

        Ok(RunReport {
            start_state: self.start_state.clone(),
            final_state: current,
            cargo,
            steps,
            halt,
            history,
        })
    }
}

impl<C> fmt::Debug for Machine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("start_state", &self.start_state)
            .field("states", &self.state_names())
            .field("end_states", &self.end_state_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HandlerError;
    use crate::engine::{CancelToken, LimitExceeded, RunLimits};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn goto(next: &'static str) -> impl Fn(u32) -> HandlerResult<u32> + Send + Sync {
        move |n| Ok(Transition::to(next, n + 1))
    }

    #[test]
    fn linear_machine_reaches_end_state() {
        let mut machine = Machine::new("a");
        machine.add_state("a", goto("b"));
        machine.add_state("b", goto("c"));
        machine.add_end_state("c");

        let report = machine.run(0).unwrap();

        assert_eq!(report.halt, Halt::EndState);
        assert_eq!(report.steps, 2);
        assert_eq!(report.final_state, "c");
        assert_eq!(report.cargo, 2);
        assert!(report.history.is_none());
    }

    #[test]
    fn missing_start_handler_is_a_silent_no_op() {
        let calls = Arc::new(AtomicUsize::new(0));
        let spy = Arc::clone(&calls);

        let mut machine = Machine::new("nowhere");
        machine.add_state_fn("somewhere", move |n: u32| {
            spy.fetch_add(1, Ordering::SeqCst);
            Ok(Transition::to("end", n))
        });
        machine.add_end_state("end");

        let report = machine.run(7).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(report.steps, 0);
        assert_eq!(report.halt, Halt::MissingHandler);
        assert_eq!(report.final_state, "nowhere");
        assert_eq!(report.cargo, 7);
    }

    #[test]
    fn missing_handler_mid_run_stops_silently() {
        let mut machine = Machine::new("a");
        machine.add_state("a", goto("ghost"));
        machine.add_end_state("end");

        let report = machine.run(0).unwrap();

        assert_eq!(report.halt, Halt::MissingHandler);
        assert_eq!(report.final_state, "ghost");
        assert_eq!(report.steps, 1);
        assert_eq!(report.cargo, 1);
    }

    #[test]
    fn end_state_wins_over_registered_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let spy = Arc::clone(&calls);

        let mut machine = Machine::new("a");
        machine.add_state("a", goto("done"));
        machine.add_state_fn("done", move |n: u32| {
            spy.fetch_add(1, Ordering::SeqCst);
            Ok(Transition::to("a", n))
        });
        machine.add_end_state("done");

        let report = machine.run(0).unwrap();

        assert_eq!(report.halt, Halt::EndState);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn start_state_can_be_an_end_state() {
        let mut machine = Machine::new("loop");
        machine.add_state("loop", goto("loop"));
        machine.add_end_state("loop");

        let report = machine.run(0).unwrap();

        assert_eq!(report.steps, 1);
        assert_eq!(report.halt, Halt::EndState);
    }

    #[test]
    fn handler_error_aborts_run_with_context() {
        let mut machine = Machine::new("a");
        machine.add_state("a", goto("b"));
        machine.add_state_fn("b", |_n: u32| Err(HandlerError::Failed("boom".to_string())));
        machine.add_end_state("c");

        let err = machine.run(0).unwrap_err();

        match err {
            RunError::Handler {
                state,
                step,
                source,
            } => {
                assert_eq!(state, "b");
                assert_eq!(step, 2);
                assert!(matches!(source, HandlerError::Failed(msg) if msg == "boom"));
            }
        }
    }

    #[test]
    fn history_records_each_transition() {
        let mut machine = Machine::new("a");
        machine.add_state("a", goto("b"));
        machine.add_state("b", goto("c"));
        machine.add_end_state("c");

        let options = RunOptions::new().record_history(true);
        let report = machine.run_with(0, &options, &mut NoopObserver).unwrap();

        let history = report.history.unwrap();
        assert_eq!(history.get_path(), vec!["a", "b", "c"]);
        assert_eq!(history.records()[1].step, 2);
    }

    #[test]
    fn step_budget_stops_a_cycle() {
        let mut machine = Machine::new("spin");
        machine.add_state("spin", goto("spin"));
        machine.add_end_state("never");

        let options = RunOptions::new().limits(RunLimits::new().max_steps(25));
        let report = machine.run_with(0, &options, &mut NoopObserver).unwrap();

        assert_eq!(
            report.halt,
            Halt::Limit(LimitExceeded::MaxSteps { max: 25 })
        );
        assert_eq!(report.steps, 25);
        assert_eq!(report.cargo, 25);
        assert_eq!(report.final_state, "spin");
    }

    #[test]
    fn exact_budget_still_reaches_end() {
        let mut machine = Machine::new("a");
        machine.add_state("a", goto("b"));
        machine.add_state("b", goto("end"));
        machine.add_end_state("end");

        let options = RunOptions::new().limits(RunLimits::new().max_steps(2));
        let report = machine.run_with(0, &options, &mut NoopObserver).unwrap();

        assert_eq!(report.halt, Halt::EndState);
    }

    #[test]
    fn cancelled_token_prevents_any_invocation() {
        let mut machine = Machine::new("a");
        machine.add_state("a", goto("end"));
        machine.add_end_state("end");

        let token = CancelToken::new();
        token.cancel();
        let options = RunOptions::new().cancel_token(token);
        let report = machine.run_with(0, &options, &mut NoopObserver).unwrap();

        assert_eq!(report.steps, 0);
        assert_eq!(report.halt, Halt::Limit(LimitExceeded::Cancelled));
    }

    #[test]
    fn observer_sees_every_transition_and_the_halt() {
        struct Recorder {
            seen: Vec<(usize, String, String, u32)>,
            halted: Option<(Halt, usize)>,
        }

        impl Observer<u32> for Recorder {
            fn on_transition(&mut self, step: usize, from: &str, to: &str, cargo: &u32) {
                self.seen.push((step, from.to_string(), to.to_string(), *cargo));
            }

            fn on_halt(&mut self, halt: &Halt, steps: usize) {
                self.halted = Some((halt.clone(), steps));
            }
        }

        let mut machine = Machine::new("a");
        machine.add_state("a", goto("b"));
        machine.add_state("b", goto("end"));
        machine.add_end_state("end");

        let mut recorder = Recorder {
            seen: Vec::new(),
            halted: None,
        };
        machine
            .run_with(10, &RunOptions::default(), &mut recorder)
            .unwrap();

        assert_eq!(
            recorder.seen,
            vec![
                (1, "a".to_string(), "b".to_string(), 11),
                (2, "b".to_string(), "end".to_string(), 12),
            ]
        );
        assert_eq!(recorder.halted, Some((Halt::EndState, 2)));
    }

    #[test]
    fn queries_reflect_registration() {
        let mut machine: Machine<u32> = Machine::new("a");
        machine.add_state("b", goto("a"));
        machine.add_state("a", goto("b"));
        machine.add_end_state("z");

        assert_eq!(machine.start_state(), "a");
        assert!(machine.has_state("a"));
        assert!(!machine.has_state("z"));
        assert!(machine.is_end_state("z"));
        assert_eq!(machine.state_names(), vec!["a", "b"]);
        assert_eq!(machine.end_state_names(), vec!["z"]);
    }

    #[test]
    fn debug_lists_names_not_handlers() {
        let mut machine: Machine<u32> = Machine::new("a");
        machine.add_state("a", goto("end"));
        machine.add_end_state("end");

        assert_eq!(
            format!("{machine:?}"),
            r#"Machine { start_state: "a", states: ["a"], end_states: ["end"] }"#
        );
    }
}
