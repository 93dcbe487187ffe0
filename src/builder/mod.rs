//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders for states and machines. Machine
//! definitions are validated as a whole before a
//! [`FiniteStateMachine`](crate::execution::FiniteStateMachine) is created.

pub mod error;
pub mod machine;
pub mod state;

pub use error::{BuildError, DefinitionError};
pub use machine::MachineBuilder;
pub use state::StateBuilder;
