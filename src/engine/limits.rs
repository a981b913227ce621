//! Optional per-run budgets.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Why a run was stopped before reaching an end state or a missing handler.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LimitExceeded {
    #[error("Run cancelled")]
    Cancelled,

    #[error("Maximum steps ({max}) exceeded")]
    MaxSteps { max: usize },

    #[error("Timeout ({timeout:?}) exceeded (elapsed: {elapsed:?})")]
    Timeout {
        timeout: Duration,
        elapsed: Duration,
    },
}

/// Step and wall-clock budgets for a single run.
///
/// Both budgets default to unlimited. The timeout travels as milliseconds
/// (`timeout_ms`) when serialized, so limits can live in a host's config file.
///
/// # Example
///
/// ```rust
/// use fsmdrive::engine::RunLimits;
/// use std::time::Duration;
///
/// let limits = RunLimits::new()
///     .max_steps(50)
///     .timeout(Duration::from_secs(2));
///
/// let parsed: RunLimits =
///     serde_json::from_str(r#"{ "max_steps": 50, "timeout_ms": 2000 }"#).unwrap();
/// assert_eq!(limits, parsed);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunLimits {
    #[serde(default)]
    max_steps: Option<usize>,

    #[serde(default, rename = "timeout_ms", with = "timeout_ms")]
    timeout: Option<Duration>,
}

impl RunLimits {
    /// No limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow at most `n` handler invocations.
    pub fn max_steps(mut self, n: usize) -> Self {
        self.max_steps = Some(n);
        self
    }

    /// Stop once `duration` has elapsed since the run began.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn step_budget(&self) -> Option<usize> {
        self.max_steps
    }

    pub fn time_budget(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn is_unlimited(&self) -> bool {
        self.max_steps.is_none() && self.timeout.is_none()
    }

    /// Check whether one more invocation is allowed after `steps`
    /// invocations and `elapsed` time. The step budget is checked first.
    pub fn check(&self, steps: usize, elapsed: Duration) -> Result<(), LimitExceeded> {
        if let Some(max) = self.max_steps {
            if steps >= max {
                return Err(LimitExceeded::MaxSteps { max });
            }
        }

        if let Some(timeout) = self.timeout {
            if elapsed > timeout {
                return Err(LimitExceeded::Timeout { timeout, elapsed });
            }
        }

        Ok(())
    }
}

mod timeout_ms {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
