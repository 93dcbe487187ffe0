//! Microwave Verification Model
//!
//! This demo explores every reachable world of a microwave controller and
//! prints the resulting Kripke structure.
//!
//! Key concepts:
//! - External variables spun over every combination
//! - Entry, main and exit hooks observed as separate nodes
//! - Cycle detection bounding the exploration
//! - Observed property ranges per state
//!
//! Run with: RUST_LOG=debug cargo run --example microwave

use ringlet_kripke::builder::{MachineBuilder, StateBuilder};
use ringlet_kripke::core::{Behaviour, Context};
use ringlet_kripke::inspectable;
use ringlet_kripke::kripke::{GeneratorConfig, StructureGenerator};
use ringlet_kripke::property::{Fields, Inspectable};
use tracing_subscriber::EnvFilter;

inspectable! {
    #[derive(Clone, Debug, Default)]
    struct Panel {
        button_pushed: bool,
        door_open: bool,
        time_left: bool,
    }
}

inspectable! {
    #[derive(Clone, Debug, Default)]
    struct Outputs {
        light: bool,
        motor: bool,
    }
}

type Ctx = Context<Panel, Outputs>;

#[derive(Clone, Debug)]
enum Microwave {
    Idle,
    Cooking,
}

impl Inspectable for Microwave {
    fn inspect(&self, _fields: &mut Fields<'_>) {}
}

impl Behaviour for Microwave {
    type External = Panel;
    type Vars = Outputs;

    fn on_entry(&mut self, context: &mut Ctx) {
        context.fsm.motor = matches!(self, Self::Cooking);
        context.fsm.light = matches!(self, Self::Cooking) || context.external.door_open;
    }

    fn main(&mut self, context: &mut Ctx) {
        if let Self::Idle = self {
            context.fsm.light = context.external.door_open;
        }
    }

    fn on_exit(&mut self, context: &mut Ctx) {
        context.fsm.motor = false;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    println!("=== Microwave Verification Model ===\n");

    let machine = MachineBuilder::new("microwave", Context::new(Panel::default(), Outputs::default()))
        .state(
            StateBuilder::new("Idle", Microwave::Idle)
                .when("Cooking", |_, c: &Ctx| {
                    c.external.button_pushed && !c.external.door_open && c.external.time_left
                })
                .build(),
        )
        .state(
            StateBuilder::new("Cooking", Microwave::Cooking)
                .when("Idle", |_, c: &Ctx| c.external.door_open || !c.external.time_left)
                .build(),
        )
        .initial("Idle")
        .build()?;

    let structure = StructureGenerator::new()
        .with_config(GeneratorConfig::default())
        .generate("kitchen", &machine)?;

    println!("Nodes:         {}", structure.len());
    println!("Edges:         {}", structure.edge_count());
    println!("Initial nodes: {}\n", structure.initial().len());

    for (id, node) in structure.nodes().iter().enumerate().take(12) {
        println!(
            "  #{id:<3} {:<8} {:<6} {} -> {:?}",
            node.state_name, node.point, node.properties, node.targets
        );
    }
    if structure.len() > 12 {
        println!("  ... {} more", structure.len() - 12);
    }

    let json = structure.to_json_pretty()?;
    println!("\nSerialized structure: {} bytes of JSON", json.len());

    Ok(())
}
