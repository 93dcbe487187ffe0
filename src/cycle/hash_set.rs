//! Exact detection backed by a set of every element seen.

use super::CycleDetector;
use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Remembers every element; an element is in a cycle iff it was inserted
/// before.
///
/// # Example
///
/// ```rust
/// use ringlet_kripke::cycle::{CycleDetector, HashSetCycleDetector};
///
/// let detector = HashSetCycleDetector;
/// let data = detector.initial_data();
///
/// let (seen, data) = detector.in_cycle(data, &"idle");
/// assert!(!seen);
/// let (seen, _) = detector.in_cycle(data, &"idle");
/// assert!(seen);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HashSetCycleDetector;

impl<E: Clone + Eq + Hash> CycleDetector<E> for HashSetCycleDetector {
    type Data = FxHashSet<E>;

    fn initial_data(&self) -> Self::Data {
        FxHashSet::default()
    }

    fn in_cycle(&self, mut data: Self::Data, element: &E) -> (bool, Self::Data) {
        let seen = !data.insert(element.clone());
        (seen, data)
    }
}
