//! Macros for literal machine definitions.

/// Define a machine inline.
///
/// Handlers go through [`Machine::add_state`](crate::engine::Machine::add_state),
/// so any `Handler` works: handler structs, `fn` items, or closures with an
/// annotated return type. The end-state list is optional.
///
/// # Example
///
/// ```
/// use fsmdrive::core::{HandlerResult, Transition};
/// use fsmdrive::machine;
///
/// fn red(ticks: u32) -> HandlerResult<u32> {
///     Ok(Transition::to("green", ticks + 1))
/// }
///
/// fn green(ticks: u32) -> HandlerResult<u32> {
///     if ticks >= 4 {
///         Ok(Transition::to("off", ticks))
///     } else {
///         Ok(Transition::to("red", ticks + 1))
///     }
/// }
///
/// let lights = machine! {
///     start: "red",
///     states: {
///         "red" => red,
///         "green" => green,
///     },
///     end: ["off"],
/// };
///
/// assert_eq!(lights.run(0).unwrap().final_state, "off");
/// ```
#[macro_export]
macro_rules! machine {
    (
        start: $start:expr,
        states: {
            $($name:expr => $handler:expr),* $(,)?
        }
        $(, end: [$($end:expr),* $(,)?])?
        $(,)?
    ) => {{
        let mut machine = $crate::engine::Machine::new($start);
        $(machine.add_state($name, $handler);)*
        $($(machine.add_end_state($end);)*)?
        machine
    }};
}
