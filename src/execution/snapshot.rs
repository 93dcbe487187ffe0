//! Property snapshots captured during a ringlet step.

use crate::property::ExtractedProperties;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where within a step a snapshot was taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StepPoint {
    /// Before anything ran.
    Start,
    /// After `on_entry`.
    AfterEntry,
    /// After evaluating the guard of the transition at this index.
    Guard(usize),
    /// After `on_exit`, when a transition was taken.
    AfterExit,
    /// After `main`, when no transition was taken.
    AfterMain,
}

impl fmt::Display for StepPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.pad("start"),
            Self::AfterEntry => f.pad("entry"),
            Self::Guard(index) => f.pad(&format!("guard{index}")),
            Self::AfterExit => f.pad("exit"),
            Self::AfterMain => f.pad("main"),
        }
    }
}

/// Properties observed at one point of a step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Id of the state being executed.
    pub state: String,
    pub point: StepPoint,
    pub properties: ExtractedProperties,
}
