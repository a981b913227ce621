//! The handler contract bound to each named state.
//!
//! A handler consumes the current cargo and hands back the name of the next
//! state together with the cargo to carry into it. Handlers never see the
//! machine that invokes them.

use thiserror::Error;

/// What a handler hands back after one invocation.
///
/// # Example
///
/// ```rust
/// use fsmdrive::core::Transition;
///
/// let transition = Transition::to("tens", 12.5_f64);
/// assert_eq!(transition.next, "tens");
/// assert_eq!(transition.cargo, 12.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<C> {
    /// Name of the state to enter next
    pub next: String,
    /// Cargo to pass to the next handler
    pub cargo: C,
}

impl<C> Transition<C> {
    /// Create a transition into `next` carrying `cargo`.
    pub fn to(next: impl Into<String>, cargo: C) -> Self {
        Self {
            next: next.into(),
            cargo,
        }
    }

    /// Split into `(next, cargo)`.
    pub fn into_parts(self) -> (String, C) {
        (self.next, self.cargo)
    }
}

impl<C> From<(String, C)> for Transition<C> {
    fn from((next, cargo): (String, C)) -> Self {
        Self { next, cargo }
    }
}

impl<C> From<(&str, C)> for Transition<C> {
    fn from((next, cargo): (&str, C)) -> Self {
        Self::to(next, cargo)
    }
}

/// Faults a handler reports instead of panicking.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Payload mismatch: expected {expected}, found {found}")]
    PayloadMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Handler failed: {0}")]
    Failed(String),
}

/// Return type of [`Handler::transition`].
pub type HandlerResult<C> = Result<Transition<C>, HandlerError>;

/// Behavior bound to a named state.
///
/// Handlers are invoked through `&self` so a single registration can serve
/// any number of runs. Plain functions and closures of the shape
/// `Fn(C) -> HandlerResult<C>` implement this trait automatically.
///
/// # Example
///
/// ```rust
/// use fsmdrive::core::{Handler, HandlerResult, Transition};
///
/// struct Countdown;
///
/// impl Handler<u32> for Countdown {
///     fn transition(&self, n: u32) -> HandlerResult<u32> {
///         if n == 0 {
///             Ok(Transition::to("liftoff", n))
///         } else {
///             Ok(Transition::to("countdown", n - 1))
///         }
///     }
/// }
///
/// let next = Countdown.transition(3).unwrap();
/// assert_eq!(next, Transition::to("countdown", 2));
/// ```
pub trait Handler<C>: Send + Sync {
    /// Consume `cargo` and pick the next state.
    fn transition(&self, cargo: C) -> HandlerResult<C>;
}

impl<C, F> Handler<C> for F
where
    F: Fn(C) -> HandlerResult<C> + Send + Sync,
{
    fn transition(&self, cargo: C) -> HandlerResult<C> {
        self(cargo)
    }
}
