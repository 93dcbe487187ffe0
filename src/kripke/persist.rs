//! Saving and loading explored structures.
//!
//! JSON cannot represent non-finite floats; structures holding them must
//! use the binary format.

use super::error::PersistError;
use super::structure::{KripkeStructure, STRUCTURE_VERSION};

impl KripkeStructure {
    pub fn to_json(&self) -> Result<String, PersistError> {
        serde_json::to_string(self).map_err(|e| PersistError::SerializationFailed(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, PersistError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PersistError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let structure: Self = serde_json::from_str(json)
            .map_err(|e| PersistError::DeserializationFailed(e.to_string()))?;
        structure.validate()?;
        Ok(structure)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, PersistError> {
        bincode::serialize(self).map_err(|e| PersistError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, PersistError> {
        let structure: Self = bincode::deserialize(bytes)
            .map_err(|e| PersistError::DeserializationFailed(e.to_string()))?;
        structure.validate()?;
        Ok(structure)
    }

    fn validate(&self) -> Result<(), PersistError> {
        if self.format_version != STRUCTURE_VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: self.format_version,
                supported: STRUCTURE_VERSION,
            });
        }

        let len = self.nodes.len();
        if let Some(id) = self.initial.iter().find(|&&id| id >= len) {
            return Err(PersistError::ValidationFailed(format!(
                "initial node {id} out of range ({len} nodes)"
            )));
        }

        for (from, node) in self.nodes.iter().enumerate() {
            if let Some(to) = node.targets.iter().find(|&&to| to >= len) {
                return Err(PersistError::ValidationFailed(format!(
                    "edge {from} -> {to} out of range ({len} nodes)"
                )));
            }
            if let Some(previous) = node.previous.filter(|&previous| previous >= len) {
                return Err(PersistError::ValidationFailed(format!(
                    "node {from} refers to missing previous node {previous}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::StepPoint;
    use crate::kripke::registry::PropertyRanges;
    use crate::kripke::structure::KripkeState;
    use crate::property::{PropertyList, PropertyValue};
    use chrono::Utc;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn structure() -> KripkeStructure {
        let mut properties = PropertyList::new();
        properties.insert("ready", PropertyValue::Bool(true));
        properties.insert("ratio", PropertyValue::Double(0.25));

        let mut ranges = PropertyRanges::new();
        ranges.observe(&properties);
        let mut all_ranges = BTreeMap::new();
        all_ranges.insert("Ready".to_string(), ranges);

        let node = |point, targets| KripkeState {
            state_name: "Ready".to_string(),
            fsm_name: "gate".to_string(),
            machine_name: "bench".to_string(),
            point,
            properties: properties.clone(),
            previous: None,
            targets,
        };

        KripkeStructure {
            format_version: STRUCTURE_VERSION,
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            machine_name: "bench".to_string(),
            fsm_name: "gate".to_string(),
            nodes: vec![node(StepPoint::Start, vec![1]), node(StepPoint::Guard(0), vec![0])],
            initial: vec![0],
            ranges: all_ranges,
        }
    }

    #[test]
    fn json_round_trip_preserves_structure() {
        let original = structure();

        let restored = KripkeStructure::from_json(&original.to_json().unwrap()).unwrap();

        assert_eq!(restored.id(), original.id());
        assert_eq!(restored.nodes(), original.nodes());
        assert_eq!(restored.initial(), original.initial());
        assert_eq!(restored.ranges(), original.ranges());
    }

    #[test]
    fn binary_round_trip_preserves_structure() {
        let original = structure();

        let restored = KripkeStructure::from_binary(&original.to_binary().unwrap()).unwrap();

        assert_eq!(restored.nodes(), original.nodes());
        assert_eq!(restored.generated_at(), original.generated_at());
    }

    #[test]
    fn pretty_json_is_readable_and_loadable() {
        let json = structure().to_json_pretty().unwrap();

        assert!(json.contains('\n'));
        assert!(KripkeStructure::from_json(&json).is_ok());
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut future = structure();
        future.format_version = STRUCTURE_VERSION + 1;

        let result = KripkeStructure::from_json(&future.to_json().unwrap());

        assert!(matches!(
            result,
            Err(PersistError::UnsupportedVersion { found, supported })
                if found == STRUCTURE_VERSION + 1 && supported == STRUCTURE_VERSION
        ));
    }

    #[test]
    fn dangling_edges_are_rejected() {
        let mut broken = structure();
        broken.nodes[1].targets.push(9);

        let result = KripkeStructure::from_binary(&broken.to_binary().unwrap());

        assert!(matches!(result, Err(PersistError::ValidationFailed(_))));
    }

    #[test]
    fn dangling_initial_node_is_rejected() {
        let mut broken = structure();
        broken.initial.push(5);

        let result = KripkeStructure::from_json(&broken.to_json().unwrap());

        assert!(matches!(result, Err(PersistError::ValidationFailed(_))));
    }

    #[test]
    fn garbage_fails_to_deserialize() {
        assert!(matches!(
            KripkeStructure::from_json("{not json"),
            Err(PersistError::DeserializationFailed(_))
        ));
        assert!(matches!(
            KripkeStructure::from_binary(&[1, 2, 3]),
            Err(PersistError::DeserializationFailed(_))
        ));
    }
}
