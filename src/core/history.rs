//! Run history tracking.
//!
//! A history is the ordered list of transitions a single run took. It only
//! records state names, never cargo, so it can always be serialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single handler invocation.
///
/// # Example
///
/// ```rust
/// use fsmdrive::core::StepRecord;
///
/// let record = StepRecord::new(1, "ones", "tens");
/// assert_eq!(record.step, 1);
/// assert_eq!(record.from, "ones");
/// assert_eq!(record.to, "tens");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// 1-based index of the invocation within its run
    pub step: usize,
    /// The state whose handler ran
    pub from: String,
    /// The state name the handler returned
    pub to: String,
    /// When the handler returned
    pub timestamp: DateTime<Utc>,
}

impl StepRecord {
    /// Create a record stamped with the current time.
    pub fn new(step: usize, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            step,
            from: from.into(),
            to: to.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of the transitions taken by one run.
///
/// # Example
///
/// ```rust
/// use fsmdrive::core::{RunHistory, StepRecord};
///
/// let mut history = RunHistory::new();
/// history.record(StepRecord::new(1, "ones", "tens"));
/// history.record(StepRecord::new(2, "tens", "outofrange"));
///
/// assert_eq!(history.get_path(), vec!["ones", "tens", "outofrange"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunHistory {
    records: Vec<StepRecord>,
}

impl RunHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record.
    pub fn record(&mut self, record: StepRecord) {
        self.records.push(record);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the first `from` state followed by the `to` state of each
    /// record, so a run of `n` steps yields `n + 1` names.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(first.from.as_str());
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }

    /// Duration from the first to the last record.
    ///
    /// Returns `None` if nothing was recorded.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    /// All records in order.
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_history_is_empty() {
        let history = RunHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_appends_in_order() {
        let mut history = RunHistory::new();
        history.record(StepRecord::new(1, "a", "b"));
        history.record(StepRecord::new(2, "b", "c"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.records()[0].step, 1);
        assert_eq!(history.records()[1].step, 2);
    }

    #[test]
    fn get_path_includes_self_loops() {
        let mut history = RunHistory::new();
        history.record(StepRecord::new(1, "tens", "tens"));
        history.record(StepRecord::new(2, "tens", "outofrange"));

        assert_eq!(history.get_path(), vec!["tens", "tens", "outofrange"]);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = RunHistory::new();
        history.record(StepRecord::new(1, "a", "b"));

        std::thread::sleep(Duration::from_millis(10));

        history.record(StepRecord::new(2, "b", "c"));

        let duration = history.duration().unwrap();
        assert!(duration >= Duration::from_millis(10));
    }

    #[test]
    fn single_record_has_duration_zero() {
        let mut history = RunHistory::new();
        history.record(StepRecord::new(1, "a", "b"));

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = RunHistory::new();
        history.record(StepRecord::new(1, "ones", "twenties"));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: RunHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
