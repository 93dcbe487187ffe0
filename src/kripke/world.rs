//! Comparable snapshots of an exploration branch.

use crate::core::{Behaviour, ContextOf, StateTable};
use crate::property::{PropertyExtractor, PropertyList};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Everything that determines how a branch continues: the state about to
/// execute, whether its `on_entry` hook will fire, the external and fsm
/// variables, and the data of every state.
///
/// Equality and hashing use the canonical fingerprint, so two worlds built
/// from structurally equal property lists are equal whatever order their
/// properties were inserted in.
///
/// # Example
///
/// ```rust
/// use ringlet_kripke::kripke::World;
/// use ringlet_kripke::property::{PropertyList, PropertyValue};
/// use std::collections::BTreeMap;
///
/// let mut a = PropertyList::new();
/// a.insert("door", PropertyValue::Bool(true));
/// a.insert("timer", PropertyValue::UInt8(3));
///
/// let mut b = PropertyList::new();
/// b.insert("timer", PropertyValue::UInt8(3));
/// b.insert("door", PropertyValue::Bool(true));
///
/// let first = World::new("Idle", false, a, PropertyList::new(), BTreeMap::new());
/// let second = World::new("Idle", false, b, PropertyList::new(), BTreeMap::new());
///
/// assert_eq!(first, second);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct World {
    executing_state: String,
    entering: bool,
    external: PropertyList,
    fsm: PropertyList,
    state_defaults: BTreeMap<String, PropertyList>,
    fingerprint: String,
}

impl World {
    pub fn new(
        executing_state: impl Into<String>,
        entering: bool,
        external: PropertyList,
        fsm: PropertyList,
        state_defaults: BTreeMap<String, PropertyList>,
    ) -> Self {
        let executing_state = executing_state.into();
        let fingerprint = fingerprint(&executing_state, entering, &external, &fsm, &state_defaults);
        Self {
            executing_state,
            entering,
            external,
            fsm,
            state_defaults,
            fingerprint,
        }
    }

    /// Capture the world of a branch about to execute `executing_state`.
    pub fn capture<B, X>(
        executing_state: &str,
        entering: bool,
        extractor: &X,
        context: &ContextOf<B>,
        states: &StateTable<B>,
    ) -> Self
    where
        B: Behaviour,
        X: PropertyExtractor<B>,
    {
        let state_defaults = states
            .iter()
            .map(|(id, state)| (id.clone(), extractor.state_properties(state)))
            .collect();

        Self::new(
            executing_state,
            entering,
            extractor.external_properties(&context.external),
            extractor.fsm_properties(&context.fsm),
            state_defaults,
        )
    }

    pub fn executing_state(&self) -> &str {
        &self.executing_state
    }

    pub fn entering(&self) -> bool {
        self.entering
    }

    pub fn external(&self) -> &PropertyList {
        &self.external
    }

    pub fn fsm(&self) -> &PropertyList {
        &self.fsm
    }

    pub fn state_defaults(&self) -> &BTreeMap<String, PropertyList> {
        &self.state_defaults
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn fingerprint(
    executing_state: &str,
    entering: bool,
    external: &PropertyList,
    fsm: &PropertyList,
    state_defaults: &BTreeMap<String, PropertyList>,
) -> String {
    let states = state_defaults
        .iter()
        .map(|(id, properties)| format!("{id:?}: {properties}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "state={executing_state:?};entering={entering};external={external};fsm={fsm};states={{{states}}}"
    )
}

impl PartialEq for World {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
    }
}

impl Eq for World {}

impl Hash for World {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fingerprint)
    }
}
