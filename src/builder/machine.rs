//! Builder for constructing finite state machines.

use crate::builder::error::{BuildError, DefinitionError};
use crate::core::{Behaviour, ContextOf, State, StateTable};
use crate::execution::{FiniteStateMachine, Ringlet};
use crate::property::InspectingExtractor;
use rustc_hash::FxHashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing finite state machines with a fluent API.
///
/// `build` validates the whole definition at once and reports every
/// problem it finds, not just the first.
pub struct MachineBuilder<B: Behaviour, X = InspectingExtractor> {
    name: String,
    context: ContextOf<B>,
    states: Vec<State<B>>,
    initial: Option<String>,
    initial_previous: Option<String>,
    suspend_state: Option<String>,
    exit_state: Option<String>,
    observe_guards: bool,
    extractor: X,
}

impl<B: Behaviour> MachineBuilder<B, InspectingExtractor> {
    /// Create a new builder for a machine named `name` operating on `context`.
    pub fn new(name: impl Into<String>, context: ContextOf<B>) -> Self {
        Self {
            name: name.into(),
            context,
            states: Vec::new(),
            initial: None,
            initial_previous: None,
            suspend_state: None,
            exit_state: None,
            observe_guards: false,
            extractor: InspectingExtractor,
        }
    }
}

impl<B: Behaviour, X> MachineBuilder<B, X> {
    /// Add a state.
    pub fn state(mut self, state: State<B>) -> Self {
        self.states.push(state);
        self
    }

    /// Add multiple states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = State<B>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, id: impl Into<String>) -> Self {
        self.initial = Some(id.into());
        self
    }

    /// Set the state treated as executed before the initial state.
    ///
    /// Defaults to none, so the initial state's `on_entry` runs on the
    /// first step.
    pub fn initial_previous(mut self, id: impl Into<String>) -> Self {
        self.initial_previous = Some(id.into());
        self
    }

    pub fn suspend_state(mut self, id: impl Into<String>) -> Self {
        self.suspend_state = Some(id.into());
        self
    }

    pub fn exit_state(mut self, id: impl Into<String>) -> Self {
        self.exit_state = Some(id.into());
        self
    }

    /// Snapshot after every guard evaluation.
    pub fn observe_guards(mut self, observe: bool) -> Self {
        self.observe_guards = observe;
        self
    }

    /// Replace the property extractor.
    pub fn extractor<Y>(self, extractor: Y) -> MachineBuilder<B, Y> {
        MachineBuilder {
            name: self.name,
            context: self.context,
            states: self.states,
            initial: self.initial,
            initial_previous: self.initial_previous,
            suspend_state: self.suspend_state,
            exit_state: self.exit_state,
            observe_guards: self.observe_guards,
            extractor,
        }
    }

    /// Build the machine.
    /// Returns an error if required fields are missing or the definition is
    /// inconsistent.
    pub fn build(self) -> Result<FiniteStateMachine<B, X>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let checks = validate(
            &self.states,
            &initial,
            self.suspend_state.as_deref(),
            self.exit_state.as_deref(),
        );
        if let Validation::Failure(problems) = checks {
            return Err(BuildError::InvalidDefinition(
                problems.iter().cloned().collect(),
            ));
        }

        let states: StateTable<B> = self
            .states
            .into_iter()
            .map(|state| (state.id().to_string(), state))
            .collect();
        let ringlet = Ringlet::new(self.extractor).observing_guards(self.observe_guards);

        Ok(FiniteStateMachine::from_parts(
            self.name,
            states,
            self.context,
            ringlet,
            initial,
            self.initial_previous,
            self.suspend_state,
            self.exit_state,
        ))
    }
}

/// Check the definition, accumulating ALL problems.
fn validate<B: Behaviour>(
    states: &[State<B>],
    initial: &str,
    suspend_state: Option<&str>,
    exit_state: Option<&str>,
) -> Validation<(), NonEmptyVec<DefinitionError>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<DefinitionError>>> = Vec::new();
    let mut ids = FxHashSet::default();

    for state in states {
        if !ids.insert(state.id()) {
            checks.push(Validation::fail(DefinitionError::DuplicateState {
                id: state.id().to_string(),
            }));
        }
    }

    for state in states {
        for transition in state.transitions() {
            if !ids.contains(transition.target()) {
                checks.push(Validation::fail(DefinitionError::UnknownTarget {
                    from: state.id().to_string(),
                    target: transition.target().to_string(),
                }));
            }
        }
    }

    if !ids.contains(initial) {
        checks.push(Validation::fail(DefinitionError::UnknownInitialState {
            id: initial.to_string(),
        }));
    }

    if let Some(id) = suspend_state.filter(|id| !ids.contains(id)) {
        checks.push(Validation::fail(DefinitionError::UnknownSuspendState {
            id: id.to_string(),
        }));
    }

    if let Some(id) = exit_state.filter(|id| !ids.contains(id)) {
        checks.push(Validation::fail(DefinitionError::UnknownExitState {
            id: id.to_string(),
        }));
    }

    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateBuilder;
    use crate::core::Context;
    use crate::property::{Fields, Inspectable};

    #[derive(Clone, Debug)]
    enum Phase {
        Start,
        End,
    }

    impl Inspectable for Phase {
        fn inspect(&self, _fields: &mut Fields<'_>) {}
    }

    impl Behaviour for Phase {
        type External = ();
        type Vars = ();
    }

    fn builder() -> MachineBuilder<Phase> {
        MachineBuilder::new("phases", Context::new((), ()))
    }

    #[test]
    fn builder_requires_initial_state() {
        let result = builder()
            .state(StateBuilder::new("Start", Phase::Start).build())
            .build();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn builder_requires_states() {
        let result = builder().initial("Start").build();

        assert!(matches!(result, Err(BuildError::NoStates)));
    }

    #[test]
    fn validation_accumulates_all_problems() {
        let result = builder()
            .state(StateBuilder::new("Start", Phase::Start).otherwise("Middle").build())
            .state(StateBuilder::new("Start", Phase::Start).build())
            .initial("Begin")
            .suspend_state("Paused")
            .exit_state("Gone")
            .build();

        match result {
            Err(BuildError::InvalidDefinition(problems)) => {
                assert_eq!(problems.len(), 5);
                assert!(problems.contains(&DefinitionError::DuplicateState {
                    id: "Start".to_string()
                }));
                assert!(problems.contains(&DefinitionError::UnknownTarget {
                    from: "Start".to_string(),
                    target: "Middle".to_string()
                }));
                assert!(problems.contains(&DefinitionError::UnknownInitialState {
                    id: "Begin".to_string()
                }));
                assert!(problems.contains(&DefinitionError::UnknownSuspendState {
                    id: "Paused".to_string()
                }));
                assert!(problems.contains(&DefinitionError::UnknownExitState {
                    id: "Gone".to_string()
                }));
            }
            Err(other) => panic!("Expected invalid definition, got {other}"),
            Ok(_) => panic!("Expected invalid definition, got a machine"),
        }
    }

    #[test]
    fn fluent_api_builds_machine() {
        let machine = builder()
            .states(vec![
                StateBuilder::new("Start", Phase::Start).otherwise("End").build(),
                StateBuilder::new("End", Phase::End).build(),
            ])
            .initial("Start")
            .exit_state("End")
            .observe_guards(true)
            .build()
            .unwrap();

        assert_eq!(machine.name(), "phases");
        assert_eq!(machine.current(), "Start");
        assert_eq!(machine.states().len(), 2);
        assert!(machine.ringlet().observes_guards());
    }
}
