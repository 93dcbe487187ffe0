//! States, behaviours and the execution context they act on.

use super::transition::Transition;
use crate::property::{Assignable, Inspectable};
use std::collections::BTreeMap;
use std::fmt::{self, Debug};

/// Variables a state machine reads and writes while it runs.
///
/// `external` holds the external/global variables the explorer spins over;
/// `fsm` holds machine-local variables that are observed but never spun.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Context<E, V> {
    pub external: E,
    pub fsm: V,
}

impl<E, V> Context<E, V> {
    pub fn new(external: E, fsm: V) -> Self {
        Self { external, fsm }
    }
}

/// Context type of a behaviour.
pub type ContextOf<B> = Context<<B as Behaviour>::External, <B as Behaviour>::Vars>;

/// Behaviour hooks of a state.
///
/// Implement this on an enum with one variant per kind of state. Variant
/// data is the state's own observable data and is listed through
/// [`Inspectable`]; hooks that are not overridden do nothing.
///
/// # Example
///
/// ```rust
/// use ringlet_kripke::core::{Behaviour, Context};
/// use ringlet_kripke::inspectable;
/// use ringlet_kripke::property::{Fields, Inspectable};
///
/// inspectable! {
///     #[derive(Clone, Debug, Default)]
///     pub struct Lamp {
///         pub switch_on: bool,
///     }
/// }
///
/// inspectable! {
///     #[derive(Clone, Debug, Default)]
///     pub struct Output {
///         pub lit: bool,
///     }
/// }
///
/// #[derive(Clone, Debug)]
/// enum LampState {
///     Dark,
///     Lit,
/// }
///
/// impl Inspectable for LampState {
///     fn inspect(&self, _fields: &mut Fields<'_>) {}
/// }
///
/// impl Behaviour for LampState {
///     type External = Lamp;
///     type Vars = Output;
///
///     fn on_entry(&mut self, context: &mut Context<Lamp, Output>) {
///         context.fsm.lit = matches!(self, Self::Lit);
///     }
/// }
/// ```
pub trait Behaviour: Inspectable + Clone + Debug {
    type External: Inspectable + Assignable + Clone + Debug;
    type Vars: Inspectable + Clone + Debug;

    /// Runs when the state is executed right after a different state.
    fn on_entry(&mut self, _context: &mut Context<Self::External, Self::Vars>) {}

    /// Runs when no transition is taken.
    fn main(&mut self, _context: &mut Context<Self::External, Self::Vars>) {}

    /// Runs when a transition out of the state is taken.
    fn on_exit(&mut self, _context: &mut Context<Self::External, Self::Vars>) {}
}

/// A named unit of behaviour with an ordered list of guarded transitions.
#[derive(Clone)]
pub struct State<B: Behaviour> {
    id: String,
    behaviour: B,
    transitions: Vec<Transition<B>>,
}

impl<B: Behaviour> State<B> {
    pub fn new(id: impl Into<String>, behaviour: B) -> Self {
        Self {
            id: id.into(),
            behaviour,
            transitions: Vec::new(),
        }
    }

    /// Append a transition; transitions are evaluated in insertion order.
    pub fn with_transition(mut self, transition: Transition<B>) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn add_transition(&mut self, transition: Transition<B>) {
        self.transitions.push(transition);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn behaviour(&self) -> &B {
        &self.behaviour
    }

    pub fn behaviour_mut(&mut self) -> &mut B {
        &mut self.behaviour
    }

    pub fn transitions(&self) -> &[Transition<B>] {
        &self.transitions
    }

    pub fn has_transitions(&self) -> bool {
        !self.transitions.is_empty()
    }
}

impl<B: Behaviour> Debug for State<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("id", &self.id)
            .field("behaviour", &self.behaviour)
            .field(
                "transitions",
                &self.transitions.iter().map(Transition::target).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// All states of one machine, keyed by id.
pub type StateTable<B> = BTreeMap<String, State<B>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{properties_of, Fields, PropertyValue};

    #[derive(Clone, Debug, PartialEq)]
    enum Phase {
        Waiting { polls: u8 },
        Done,
    }

    impl Inspectable for Phase {
        fn inspect(&self, fields: &mut Fields<'_>) {
            if let Self::Waiting { polls } = self {
                fields.field("polls", polls);
            }
        }
    }

    impl Behaviour for Phase {
        type External = ();
        type Vars = ();

        fn main(&mut self, _context: &mut Context<(), ()>) {
            if let Self::Waiting { polls } = self {
                *polls = polls.saturating_add(1);
            }
        }
    }

    #[test]
    fn new_state_has_no_transitions() {
        let state = State::new("Done", Phase::Done);

        assert_eq!(state.id(), "Done");
        assert!(!state.has_transitions());
    }

    #[test]
    fn transitions_keep_insertion_order() {
        let state = State::new("Waiting", Phase::Waiting { polls: 0 })
            .with_transition(Transition::always("Done"))
            .with_transition(Transition::always("Waiting"));

        let targets: Vec<_> = state.transitions().iter().map(Transition::target).collect();
        assert_eq!(targets, vec!["Done", "Waiting"]);
    }

    #[test]
    fn behaviour_mutation_is_visible_in_properties() {
        let mut state = State::new("Waiting", Phase::Waiting { polls: 0 });
        let mut context = Context::new((), ());

        state.behaviour_mut().main(&mut context);

        let list = properties_of(state.behaviour());
        assert_eq!(list.get("polls"), Some(&PropertyValue::UInt8(1)));
    }

    #[test]
    fn cloned_state_is_independent() {
        let original = State::new("Waiting", Phase::Waiting { polls: 0 });
        let mut copy = original.clone();
        copy.behaviour_mut().main(&mut Context::new((), ()));

        assert_eq!(original.behaviour(), &Phase::Waiting { polls: 0 });
        assert_eq!(copy.behaviour(), &Phase::Waiting { polls: 1 });
    }
}
