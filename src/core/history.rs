//! Step history of a running machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single executed step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// The state that was executed
    pub from: String,
    /// The state selected to execute next
    pub to: String,
    /// When the step completed
    pub timestamp: DateTime<Utc>,
}

impl StepRecord {
    /// Whether the step took a transition rather than looping.
    pub fn changed_state(&self) -> bool {
        self.from != self.to
    }
}

/// Ordered history of executed steps.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use ringlet_kripke::core::{StateHistory, StepRecord};
///
/// let mut history = StateHistory::new();
/// history.record(StepRecord {
///     from: "Red".to_string(),
///     to: "Green".to_string(),
///     timestamp: Utc::now(),
/// });
/// history.record(StepRecord {
///     from: "Green".to_string(),
///     to: "Green".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec!["Red", "Green", "Green"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateHistory {
    steps: Vec<StepRecord>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn record(&mut self, step: StepRecord) {
        self.steps.push(step);
    }

    /// States in execution order: the first executed state, then the
    /// `to` state of each step.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.steps.len() + 1);
        if let Some(first) = self.steps.first() {
            path.push(first.from.as_str());
        }
        path.extend(self.steps.iter().map(|step| step.to.as_str()));
        path
    }

    /// Elapsed time between the first and last recorded steps.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.steps.first()?, self.steps.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}
