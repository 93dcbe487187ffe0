//! Build errors for machine builders.

use thiserror::Error;

/// A single problem in a machine definition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DefinitionError {
    #[error("State '{id}' is defined more than once")]
    DuplicateState { id: String },

    #[error("Transition from '{from}' targets unknown state '{target}'")]
    UnknownTarget { from: String, target: String },

    #[error("Initial state '{id}' is not defined")]
    UnknownInitialState { id: String },

    #[error("Suspend state '{id}' is not defined")]
    UnknownSuspendState { id: String },

    #[error("Exit state '{id}' is not defined")]
    UnknownExitState { id: String },
}

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(id) before .build()")]
    MissingInitialState,

    #[error("No states defined. Add at least one state")]
    NoStates,

    #[error("Invalid machine definition: {}", describe(.0))]
    InvalidDefinition(Vec<DefinitionError>),
}

fn describe(problems: &[DefinitionError]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
