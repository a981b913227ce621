//! Opaque, dynamically typed cargo.
//!
//! Machines are generic over their cargo type, so a closed set of payload
//! shapes is best modeled as an enum. `Cargo` covers the other case: handlers
//! plugged in from different places that each expect their own concrete type.

use super::handler::HandlerError;
use std::any::{type_name, Any};
use std::fmt;

/// A boxed value that remembers the name of its concrete type.
///
/// Handlers unwrap it with [`Cargo::downcast`]; asking for the wrong type
/// yields [`HandlerError::PayloadMismatch`] rather than a panic.
///
/// # Example
///
/// ```rust
/// use fsmdrive::core::{Cargo, HandlerError};
///
/// let cargo = Cargo::new(1.5_f64);
/// assert!(cargo.is::<f64>());
/// assert_eq!(cargo.downcast::<f64>().unwrap(), 1.5);
///
/// let wrong = Cargo::new("text");
/// assert!(matches!(
///     wrong.downcast::<f64>(),
///     Err(HandlerError::PayloadMismatch { expected: "f64", .. })
/// ));
/// ```
pub struct Cargo {
    value: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl Cargo {
    /// Wrap a value.
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Name of the wrapped value's concrete type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check whether the wrapped value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Borrow the wrapped value as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Result<&T, HandlerError> {
        self.value
            .downcast_ref::<T>()
            .ok_or_else(|| self.mismatch::<T>())
    }

    /// Take the wrapped value out as a `T`.
    pub fn downcast<T: Any>(self) -> Result<T, HandlerError> {
        let found = self.type_name;
        self.value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| HandlerError::PayloadMismatch {
                expected: type_name::<T>(),
                found,
            })
    }

    fn mismatch<T: Any>(&self) -> HandlerError {
        HandlerError::PayloadMismatch {
            expected: type_name::<T>(),
            found: self.type_name,
        }
    }
}

impl fmt::Debug for Cargo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cargo")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
