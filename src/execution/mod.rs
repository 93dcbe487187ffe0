//! Execution of state machines.
//!
//! - [`Ringlet`] executes exactly one step of one state and records the
//!   property snapshots taken while doing so
//! - [`FiniteStateMachine`] wraps a ringlet with current/previous pointers
//!   and the suspend/resume/restart/exit operations

mod error;
mod machine;
mod ringlet;
mod snapshot;

pub use error::{FsmError, RingletError};
pub use machine::FiniteStateMachine;
pub use ringlet::Ringlet;
pub use snapshot::{Snapshot, StepPoint};
