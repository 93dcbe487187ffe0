//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over a state's behaviour data and the
//! machine context. They never mutate either.

use super::state::{Behaviour, ContextOf};
use std::sync::Arc;

/// Pure predicate that determines if a transition can fire.
///
/// # Example
///
/// ```rust
/// use ringlet_kripke::core::{Behaviour, Context, Guard};
/// use ringlet_kripke::property::{Fields, Inspectable};
///
/// #[derive(Clone, Debug)]
/// struct Counter(u8);
///
/// impl Inspectable for Counter {
///     fn inspect(&self, fields: &mut Fields<'_>) {
///         fields.field("count", &self.0);
///     }
/// }
///
/// impl Behaviour for Counter {
///     type External = ();
///     type Vars = ();
/// }
///
/// let saturated = Guard::new(|counter: &Counter, _: &Context<(), ()>| counter.0 >= 3);
///
/// assert!(saturated.check(&Counter(3), &Context::new((), ())));
/// assert!(!saturated.check(&Counter(1), &Context::new((), ())));
/// ```
pub struct Guard<B: Behaviour> {
    predicate: Arc<dyn Fn(&B, &ContextOf<B>) -> bool + Send + Sync>,
}

impl<B: Behaviour> Guard<B> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&B, &ContextOf<B>) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// A guard that always passes.
    pub fn always() -> Self {
        Self::new(|_, _| true)
    }

    /// Evaluate the guard.
    pub fn check(&self, behaviour: &B, context: &ContextOf<B>) -> bool {
        (self.predicate)(behaviour, context)
    }
}

impl<B: Behaviour> Clone for Guard<B> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}
