//! Kripke structure generation.
//!
//! [`StructureGenerator`] explores every reachable world of a
//! [`FiniteStateMachine`](crate::execution::FiniteStateMachine) and records
//! the observed snapshots as a [`KripkeStructure`], a directed graph of
//! [`KripkeState`] nodes that model checker views can serialize.

pub mod config;
pub mod error;
pub mod generator;
mod graph;
mod job;
pub mod persist;
pub mod registry;
pub mod structure;
pub mod world;

pub use config::{GeneratorConfig, WorklistOrder};
pub use error::{GenerateError, PersistError};
pub use generator::StructureGenerator;
pub use registry::PropertyRanges;
pub use structure::{KripkeState, KripkeStructure, NodeId, STRUCTURE_VERSION};
pub use world::World;
