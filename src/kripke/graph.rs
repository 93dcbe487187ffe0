//! Incremental construction of a [`KripkeStructure`].

use super::registry::PropertyRanges;
use super::structure::{KripkeState, KripkeStructure, NodeId, STRUCTURE_VERSION};
use crate::execution::{Snapshot, StepPoint};
use chrono::Utc;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct NodeKey {
    state: String,
    point: StepPoint,
    properties: String,
}

impl NodeKey {
    fn of(snapshot: &Snapshot) -> Self {
        Self {
            state: snapshot.state.clone(),
            point: snapshot.point,
            properties: snapshot.properties.combined().canonical(),
        }
    }
}

/// Arena of nodes indexed by their identity.
pub(crate) struct GraphBuilder {
    machine_name: String,
    fsm_name: String,
    nodes: Vec<KripkeState>,
    index: FxHashMap<NodeKey, NodeId>,
    initial: Vec<NodeId>,
}

impl GraphBuilder {
    pub(crate) fn new(machine_name: impl Into<String>, fsm_name: impl Into<String>) -> Self {
        Self {
            machine_name: machine_name.into(),
            fsm_name: fsm_name.into(),
            nodes: Vec::new(),
            index: FxHashMap::default(),
            initial: Vec::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The node already holding `snapshot`, if any.
    pub(crate) fn find(&self, snapshot: &Snapshot) -> Option<NodeId> {
        self.index.get(&NodeKey::of(snapshot)).copied()
    }

    fn node_for(&mut self, snapshot: &Snapshot, previous: Option<NodeId>) -> NodeId {
        let key = NodeKey::of(snapshot);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }

        let id = self.nodes.len();
        self.nodes.push(KripkeState {
            state_name: snapshot.state.clone(),
            fsm_name: self.fsm_name.clone(),
            machine_name: self.machine_name.clone(),
            point: snapshot.point,
            properties: snapshot.properties.combined(),
            previous,
            targets: Vec::new(),
        });
        self.index.insert(key, id);
        id
    }

    pub(crate) fn link(&mut self, from: NodeId, to: NodeId) {
        if let Some(node) = self.nodes.get_mut(from) {
            if !node.targets.contains(&to) {
                node.targets.push(to);
            }
        }
    }

    /// Chain the snapshots of one step after `last`, the final node of the
    /// step before. Without `last` the step's first node is initial.
    ///
    /// Returns the final node of this step.
    pub(crate) fn record_step(&mut self, last: Option<NodeId>, snapshots: &[Snapshot]) -> Option<NodeId> {
        let mut previous = None;
        for snapshot in snapshots {
            let id = self.node_for(snapshot, previous);
            match (previous, last) {
                (Some(from), _) | (None, Some(from)) => self.link(from, id),
                (None, None) => {
                    if !self.initial.contains(&id) {
                        self.initial.push(id);
                    }
                }
            }
            previous = Some(id);
        }
        previous.or(last)
    }

    pub(crate) fn finish(self, ranges: BTreeMap<String, PropertyRanges>) -> KripkeStructure {
        KripkeStructure {
            format_version: STRUCTURE_VERSION,
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            machine_name: self.machine_name,
            fsm_name: self.fsm_name,
            nodes: self.nodes,
            initial: self.initial,
            ranges,
        }
    }
}
