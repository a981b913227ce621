//! Core executor types.
//!
//! This module contains the pieces every machine is assembled from:
//! - The `Handler` contract bound to each named state
//! - `Cargo`, the opaque payload for handlers whose shapes are only known at runtime
//! - Run history tracking
//!
//! Nothing in here drives a machine; see [`crate::engine`] for the loop.

mod cargo;
mod handler;
mod history;

pub use cargo::Cargo;
pub use handler::{Handler, HandlerError, HandlerResult, Transition};
pub use history::{RunHistory, StepRecord};
