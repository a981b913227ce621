//! Build errors for the machine builder.

use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Start state not specified. Call .start(name) before .build()")]
    MissingStartState,
}
