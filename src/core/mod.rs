//! Core state machine types.
//!
//! This module contains the static description of a machine:
//! - States and their behaviour hooks via the `Behaviour` trait
//! - Guard predicates and ordered transitions
//! - The context of external and machine-local variables
//! - Step history of a running machine

mod guard;
mod history;
mod state;
mod transition;

pub use guard::Guard;
pub use history::{StateHistory, StepRecord};
pub use state::{Behaviour, Context, ContextOf, State, StateTable};
pub use transition::Transition;
