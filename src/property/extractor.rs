//! Extraction of property lists from machines.

use super::inspect::properties_of;
use super::list::PropertyList;
use super::value::PropertyValue;
use crate::core::{Behaviour, ContextOf, State};
use serde::{Deserialize, Serialize};

/// The three property lists observed at one point of execution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedProperties {
    pub state: PropertyList,
    pub fsm: PropertyList,
    pub external: PropertyList,
}

impl ExtractedProperties {
    /// Merge into one list with `state`, `fsm` and `external` compounds.
    pub fn combined(&self) -> PropertyList {
        let mut list = PropertyList::new();
        list.insert("state", PropertyValue::Compound(self.state.clone()));
        list.insert("fsm", PropertyValue::Compound(self.fsm.clone()));
        list.insert("external", PropertyValue::Compound(self.external.clone()));
        list
    }
}

/// Converts variables and states into named property lists.
///
/// Implementations must never include a state's bookkeeping (its id or
/// transition list), only its behaviour data.
pub trait PropertyExtractor<B: Behaviour>: Clone {
    fn state_properties(&self, state: &State<B>) -> PropertyList;

    fn fsm_properties(&self, vars: &B::Vars) -> PropertyList;

    fn external_properties(&self, external: &B::External) -> PropertyList;

    fn extract(&self, context: &ContextOf<B>, state: &State<B>) -> ExtractedProperties {
        ExtractedProperties {
            state: self.state_properties(state),
            fsm: self.fsm_properties(&context.fsm),
            external: self.external_properties(&context.external),
        }
    }
}

/// Extractor backed by each type's [`Inspectable`](super::Inspectable) impl.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InspectingExtractor;

impl<B: Behaviour> PropertyExtractor<B> for InspectingExtractor {
    fn state_properties(&self, state: &State<B>) -> PropertyList {
        properties_of(state.behaviour())
    }

    fn fsm_properties(&self, vars: &B::Vars) -> PropertyList {
        properties_of(vars)
    }

    fn external_properties(&self, external: &B::External) -> PropertyList {
        properties_of(external)
    }
}
