//! Builder for constructing states.

use crate::core::{Behaviour, ContextOf, Guard, State, Transition};

/// Builder for constructing a state and its ordered transitions.
pub struct StateBuilder<B: Behaviour> {
    state: State<B>,
}

impl<B: Behaviour> StateBuilder<B> {
    pub fn new(id: impl Into<String>, behaviour: B) -> Self {
        Self {
            state: State::new(id, behaviour),
        }
    }

    /// Add a transition to `target` taken when `predicate` holds.
    pub fn when<F>(mut self, target: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&B, &ContextOf<B>) -> bool + Send + Sync + 'static,
    {
        self.state.add_transition(Transition::when(target, predicate));
        self
    }

    /// Add a transition guarded by an existing guard.
    pub fn guarded(mut self, target: impl Into<String>, guard: Guard<B>) -> Self {
        self.state.add_transition(Transition::new(target, guard));
        self
    }

    /// Add an unconditional transition. Transitions added after it never fire.
    pub fn otherwise(mut self, target: impl Into<String>) -> Self {
        self.state.add_transition(Transition::always(target));
        self
    }

    pub fn build(self) -> State<B> {
        self.state
    }
}
