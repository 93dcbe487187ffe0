//! Machines shared by the integration tests.

#![allow(dead_code)]

use ringlet_kripke::builder::{MachineBuilder, StateBuilder};
use ringlet_kripke::core::{Behaviour, Context};
use ringlet_kripke::execution::FiniteStateMachine;
use ringlet_kripke::inspectable;
use ringlet_kripke::property::{Fields, Inspectable, InspectingExtractor};

inspectable! {
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Panel {
        pub button_pushed: bool,
        pub door_open: bool,
        pub time_left: bool,
    }
}

inspectable! {
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Outputs {
        pub light: bool,
        pub motor: bool,
    }
}

pub type MicrowaveContext = Context<Panel, Outputs>;

#[derive(Clone, Debug)]
pub enum Microwave {
    Idle,
    Cooking { cycles: u8 },
    Broken,
}

impl Inspectable for Microwave {
    fn inspect(&self, fields: &mut Fields<'_>) {
        if let Self::Cooking { cycles } = self {
            fields.field("cycles", cycles);
        }
    }
}

impl Behaviour for Microwave {
    type External = Panel;
    type Vars = Outputs;

    fn on_entry(&mut self, context: &mut MicrowaveContext) {
        match self {
            Self::Idle => {
                context.fsm.motor = false;
                context.fsm.light = context.external.door_open;
            }
            Self::Cooking { cycles } => {
                *cycles = 0;
                context.fsm.motor = true;
                context.fsm.light = true;
            }
            Self::Broken => {
                context.fsm.motor = false;
                context.fsm.light = false;
            }
        }
    }

    fn main(&mut self, context: &mut MicrowaveContext) {
        match self {
            Self::Idle => context.fsm.light = context.external.door_open,
            Self::Cooking { cycles } => *cycles = (*cycles + 1).min(3),
            Self::Broken => {}
        }
    }

    fn on_exit(&mut self, context: &mut MicrowaveContext) {
        if let Self::Cooking { .. } = self {
            context.fsm.motor = false;
        }
    }
}

pub fn microwave() -> FiniteStateMachine<Microwave, InspectingExtractor> {
    microwave_builder().build().unwrap()
}

pub fn microwave_builder() -> MachineBuilder<Microwave> {
    MachineBuilder::new("microwave", Context::new(Panel::default(), Outputs::default()))
        .state(
            StateBuilder::new("Idle", Microwave::Idle)
                .when("Cooking", |_, c: &MicrowaveContext| {
                    c.external.button_pushed && !c.external.door_open && c.external.time_left
                })
                .build(),
        )
        .state(
            StateBuilder::new("Cooking", Microwave::Cooking { cycles: 0 })
                .when("Idle", |_, c: &MicrowaveContext| {
                    c.external.door_open || !c.external.time_left
                })
                .build(),
        )
        .state(StateBuilder::new("Broken", Microwave::Broken).build())
        .initial("Idle")
        .suspend_state("Broken")
        .exit_state("Broken")
}

#[derive(Clone, Debug)]
pub enum Lamp {
    Red,
    Green,
    Yellow,
}

impl Inspectable for Lamp {
    fn inspect(&self, _fields: &mut Fields<'_>) {}
}

impl Behaviour for Lamp {
    type External = ();
    type Vars = ();
}

pub fn traffic_light() -> FiniteStateMachine<Lamp, InspectingExtractor> {
    MachineBuilder::new("traffic_light", Context::new((), ()))
        .state(StateBuilder::new("Red", Lamp::Red).otherwise("Green").build())
        .state(StateBuilder::new("Green", Lamp::Green).otherwise("Yellow").build())
        .state(StateBuilder::new("Yellow", Lamp::Yellow).otherwise("Red").build())
        .initial("Red")
        .build()
        .unwrap()
}
