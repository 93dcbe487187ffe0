//! Worklist entries.

use super::structure::NodeId;
use crate::core::{Behaviour, ContextOf, StateTable};
use crate::execution::Ringlet;

/// One branch of the exploration waiting to execute `state`.
///
/// Every part is owned, so branches never alias each other's variables or
/// cycle detector data.
pub(crate) struct Job<B: Behaviour, X, S> {
    pub(crate) state: String,
    pub(crate) states: StateTable<B>,
    pub(crate) ringlet: Ringlet<X>,
    pub(crate) context: ContextOf<B>,
    /// Final node of the step that led here.
    pub(crate) last: Option<NodeId>,
    /// Detector data for the worlds along this branch.
    pub(crate) cycle: S,
}
