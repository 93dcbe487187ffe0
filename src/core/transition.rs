//! Guarded transitions between states.

use super::guard::Guard;
use super::state::{Behaviour, ContextOf};

/// A transition to the state named `target`, taken when `guard` passes.
pub struct Transition<B: Behaviour> {
    guard: Guard<B>,
    target: String,
}

impl<B: Behaviour> Transition<B> {
    pub fn new(target: impl Into<String>, guard: Guard<B>) -> Self {
        Self {
            guard,
            target: target.into(),
        }
    }

    /// An unconditional transition.
    pub fn always(target: impl Into<String>) -> Self {
        Self::new(target, Guard::always())
    }

    /// A transition guarded by a closure.
    pub fn when<F>(target: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&B, &ContextOf<B>) -> bool + Send + Sync + 'static,
    {
        Self::new(target, Guard::new(predicate))
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn guard(&self) -> &Guard<B> {
        &self.guard
    }

    /// Check if the transition can fire from `behaviour` in `context` (pure).
    pub fn can_fire(&self, behaviour: &B, context: &ContextOf<B>) -> bool {
        self.guard.check(behaviour, context)
    }
}

impl<B: Behaviour> Clone for Transition<B> {
    fn clone(&self) -> Self {
        Self {
            guard: self.guard.clone(),
            target: self.target.clone(),
        }
    }
}
