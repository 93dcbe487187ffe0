//! The explored graph.

use super::registry::PropertyRanges;
use crate::execution::StepPoint;
use crate::property::PropertyList;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Version identifier for the persisted structure format.
pub const STRUCTURE_VERSION: u32 = 1;

/// Index of a node within its [`KripkeStructure`].
pub type NodeId = usize;

/// One explored node: the properties observed at one point of a step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KripkeState {
    /// Id of the state being executed when the snapshot was taken.
    pub state_name: String,
    pub fsm_name: String,
    pub machine_name: String,
    pub point: StepPoint,
    /// Combined `state`, `fsm` and `external` properties.
    pub properties: PropertyList,
    /// The node this one was first reached from within a step.
    pub previous: Option<NodeId>,
    /// Successor nodes, without duplicates.
    pub targets: Vec<NodeId>,
}

/// A directed graph of explored nodes, ready for a model checker view.
///
/// Nodes live in an arena and refer to each other by [`NodeId`]. A node is
/// unique per (state, step point, properties).
///
/// Node identity is coarser than a [`World`](super::World): it leaves out
/// whether the state is about to be entered and the data of the other
/// states. Distinct worlds may therefore share a start node, and the
/// successors of such a node merge the steps of all of them rather than
/// describing a nondeterministic choice.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KripkeStructure {
    pub(crate) format_version: u32,
    pub(crate) id: Uuid,
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) machine_name: String,
    pub(crate) fsm_name: String,
    pub(crate) nodes: Vec<KripkeState>,
    pub(crate) initial: Vec<NodeId>,
    pub(crate) ranges: BTreeMap<String, PropertyRanges>,
}

impl KripkeStructure {
    pub fn format_version(&self) -> u32 {
        self.format_version
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn machine_name(&self) -> &str {
        &self.machine_name
    }

    pub fn fsm_name(&self) -> &str {
        &self.fsm_name
    }

    pub fn nodes(&self) -> &[KripkeState] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&KripkeState> {
        self.nodes.get(id)
    }

    /// Nodes at which exploration starts.
    pub fn initial(&self) -> &[NodeId] {
        &self.initial
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every edge as a `(from, to)` pair, ordered by source node.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .flat_map(|(from, node)| node.targets.iter().map(move |&to| (from, to)))
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.targets.len()).sum()
    }

    /// Successors of `id`; empty for unknown ids.
    pub fn successors(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map_or(&[][..], |node| node.targets.as_slice())
    }

    /// Ids of the nodes observed while executing `state_name`.
    pub fn nodes_of_state<'a>(&'a self, state_name: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| node.state_name == state_name)
            .map(|(id, _)| id)
    }

    /// Distinct values observed for the properties of each state.
    pub fn ranges(&self) -> &BTreeMap<String, PropertyRanges> {
        &self.ranges
    }

    pub fn state_ranges(&self, state_name: &str) -> Option<&PropertyRanges> {
        self.ranges.get(state_name)
    }
}
