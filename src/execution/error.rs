//! Execution error types.

use thiserror::Error;

/// Errors raised by a single ringlet step.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RingletError {
    /// A step must yield a pre-step snapshot and a post-step snapshot.
    #[error("Step of state '{state}' produced {count} snapshot(s), at least 2 are required")]
    MissingSnapshots { state: String, count: usize },
}

/// Errors raised by [`FiniteStateMachine`](super::FiniteStateMachine) operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FsmError {
    #[error("Machine is already suspended")]
    AlreadySuspended,

    #[error("Machine is not suspended")]
    NotSuspended,

    #[error("Machine has no suspend state")]
    NoSuspendState,

    #[error("Machine has no exit state")]
    NoExitState,

    #[error("Unknown state '{id}'")]
    UnknownState { id: String },

    #[error(transparent)]
    Ringlet(#[from] RingletError),
}
