//! Ringlet Kripke: step-wise state machine execution and exhaustive
//! Kripke structure generation.
//!
//! A machine is a table of states, each with a behaviour and an ordered
//! list of guarded transitions. The [`Ringlet`](execution::Ringlet)
//! executes one step of one state and snapshots the observable properties
//! along the way. The [`StructureGenerator`](kripke::StructureGenerator)
//! drives the ringlet over every combination of the external variables and
//! turns the snapshots into a [`KripkeStructure`](kripke::KripkeStructure)
//! for model checkers.
//!
//! # Core Concepts
//!
//! - **Behaviour**: Enum of state kinds with `on_entry`, `main` and `on_exit` hooks
//! - **Inspectable**: Types list their own named, typed fields
//! - **Spinner**: Deterministic enumeration of one variable's domain
//! - **CycleDetector**: Stops exploration of worlds already seen
//!
//! # Example
//!
//! ```rust
//! use ringlet_kripke::builder::{MachineBuilder, StateBuilder};
//! use ringlet_kripke::core::{Behaviour, Context};
//! use ringlet_kripke::inspectable;
//! use ringlet_kripke::kripke::StructureGenerator;
//! use ringlet_kripke::property::{Fields, Inspectable};
//!
//! inspectable! {
//!     #[derive(Clone, Debug, Default)]
//!     pub struct Door {
//!         pub open: bool,
//!     }
//! }
//!
//! inspectable! {
//!     #[derive(Clone, Debug, Default)]
//!     pub struct Alarm {
//!         pub ringing: bool,
//!     }
//! }
//!
//! #[derive(Clone, Debug)]
//! enum Guarding {
//!     Armed,
//!     Triggered,
//! }
//!
//! impl Inspectable for Guarding {
//!     fn inspect(&self, _fields: &mut Fields<'_>) {}
//! }
//!
//! impl Behaviour for Guarding {
//!     type External = Door;
//!     type Vars = Alarm;
//!
//!     fn on_entry(&mut self, context: &mut Context<Door, Alarm>) {
//!         context.fsm.ringing = matches!(self, Self::Triggered);
//!     }
//! }
//!
//! let mut machine = MachineBuilder::new("alarm", Context::new(Door::default(), Alarm::default()))
//!     .state(
//!         StateBuilder::new("Armed", Guarding::Armed)
//!             .when("Triggered", |_, c: &Context<Door, Alarm>| c.external.open)
//!             .build(),
//!     )
//!     .state(StateBuilder::new("Triggered", Guarding::Triggered).build())
//!     .initial("Armed")
//!     .build()
//!     .unwrap();
//!
//! let structure = StructureGenerator::new().generate("house", &machine).unwrap();
//! assert!(structure.nodes_of_state("Triggered").next().is_some());
//!
//! machine.context_mut().external.open = true;
//! machine.next().unwrap();
//! assert_eq!(machine.current(), "Triggered");
//! ```

pub mod builder;
pub mod core;
pub mod cycle;
pub mod execution;
pub mod kripke;
pub mod property;
pub mod spinner;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder, StateBuilder};
pub use core::{Behaviour, Context, Guard, State, StateHistory, Transition};
pub use cycle::{CycleDetector, HashSetCycleDetector, PeriodicCycleDetector};
pub use execution::{FiniteStateMachine, FsmError, Ringlet, RingletError, Snapshot, StepPoint};
pub use kripke::{GenerateError, GeneratorConfig, KripkeState, KripkeStructure, StructureGenerator, World};
pub use property::{Inspectable, InspectingExtractor, PropertyExtractor, PropertyList, PropertyValue};
pub use spinner::{MultiSpinner, Spinner, SpinnerRegistry};
