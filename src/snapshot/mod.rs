//! Serializable summaries of finished runs.
//!
//! A snapshot keeps what a run did (where it started, where it stopped, why,
//! and optionally every step) so it can be logged, stored or shipped
//! elsewhere. It never holds handlers or cargo.

use crate::core::RunHistory;
use crate::engine::{Halt, RunReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable record of one run.
///
/// # Example
///
/// ```rust
/// use fsmdrive::core::{HandlerResult, Transition};
/// use fsmdrive::engine::{Machine, NoopObserver, RunOptions};
/// use fsmdrive::snapshot::RunSnapshot;
///
/// fn step(n: u8) -> HandlerResult<u8> {
///     Ok(Transition::to("done", n))
/// }
///
/// let mut machine = Machine::new("step");
/// machine.add_state("step", step);
/// machine.add_end_state("done");
///
/// let options = RunOptions::new().record_history(true);
/// let report = machine.run_with(0, &options, &mut NoopObserver).unwrap();
///
/// let snapshot = RunSnapshot::capture(&report);
/// let json = snapshot.to_json().unwrap();
/// assert_eq!(RunSnapshot::from_json(&json).unwrap(), snapshot);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// State the run started in
    pub start_state: String,

    /// Last state name the run reached
    pub final_state: String,

    /// Number of handler invocations
    pub steps: usize,

    /// Why the run stopped
    pub halt: Halt,

    /// Step-by-step history, when the run recorded one
    pub history: Option<RunHistory>,
}

impl RunSnapshot {
    /// Capture a snapshot of a finished run.
    pub fn capture<C>(report: &RunReport<C>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            start_state: report.start_state.clone(),
            final_state: report.final_state.clone(),
            steps: report.steps,
            halt: report.halt.clone(),
            history: report.history.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate()
    }

    /// Encode in bincode's compact binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate()
    }

    fn validate(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}
