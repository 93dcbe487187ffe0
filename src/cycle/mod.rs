//! Visited-state detection.
//!
//! A [`CycleDetector`] threads opaque data through an exploration: each
//! check consumes the current data and returns the updated data together
//! with whether the element was seen before. Two strategies are provided.
//!
//! - [`HashSetCycleDetector`] remembers every element. Detection is exact;
//!   memory grows with the number of distinct elements.
//! - [`PeriodicCycleDetector`] remembers one checkpoint and compares only
//!   against it, replacing it on a doubling schedule. Memory is constant but
//!   an element is only recognised when it recurs on a periodic sequence.
//!   A branch whose worlds eventually cycle is always cut off; a branch that
//!   interleaves several cycles out of rhythm may not be.
//!
//! The structure generator threads one detector value along each branch.
//! Cutting off revisits across branches is the job of its shared explored
//! set (see `GeneratorConfig::share_explored`), which is what bounds a
//! branching exploration under either strategy.

pub mod hash_set;
pub mod periodic;

pub use hash_set::HashSetCycleDetector;
pub use periodic::{Checkpoint, PeriodicCycleDetector};

/// Reports whether an element has been seen before.
pub trait CycleDetector<E> {
    type Data: Clone;

    /// Data for an exploration that has seen nothing yet.
    fn initial_data(&self) -> Self::Data;

    /// Check `element` against `data`, returning the verdict and the data to
    /// use for the next check.
    fn in_cycle(&self, data: Self::Data, element: &E) -> (bool, Self::Data);
}
