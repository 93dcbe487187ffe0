//! Exhaustive exploration of a machine's reachable worlds.

use super::config::{GeneratorConfig, WorklistOrder};
use super::error::GenerateError;
use super::graph::GraphBuilder;
use super::job::Job;
use super::registry::CanonicalRegistry;
use super::structure::{KripkeStructure, NodeId};
use super::world::World;
use crate::core::{Behaviour, ContextOf, State, StateTable};
use crate::cycle::{CycleDetector, HashSetCycleDetector};
use crate::execution::{FiniteStateMachine, Ringlet, Snapshot, StepPoint};
use crate::property::{Assignable, PropertyExtractor, PropertyList, PropertyValue};
use crate::spinner::{MultiSpinner, Spinner, SpinnerRegistry};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, trace};

/// Builds a [`KripkeStructure`] by executing every reachable combination of
/// a machine's external variables.
///
/// Starting from the machine's initial state, every job enumerates all
/// assignments of the external variables. Each assignment forms a
/// [`World`]. A world is skipped when it recurs on its own branch, as
/// reported by the cycle detector, or, with
/// [`share_explored`](GeneratorConfig::share_explored), when another branch
/// has already expanded it. Every other world executes one ringlet step
/// whose snapshots become nodes, and the resulting branch is queued as a new
/// job carrying the updated detector data. Generation ends when the worklist
/// is empty.
///
/// Exploration is single-threaded. The canonical registry, the explored set
/// and the graph are owned by the run; each job owns its own copy of the
/// states, the ringlet, the variables and the cycle detector data.
///
/// # Example
///
/// ```rust
/// use ringlet_kripke::builder::{MachineBuilder, StateBuilder};
/// use ringlet_kripke::core::{Behaviour, Context};
/// use ringlet_kripke::inspectable;
/// use ringlet_kripke::kripke::StructureGenerator;
/// use ringlet_kripke::property::{Fields, Inspectable};
///
/// inspectable! {
///     #[derive(Clone, Debug, Default)]
///     pub struct Switch {
///         pub pressed: bool,
///     }
/// }
///
/// #[derive(Clone, Debug)]
/// enum Lamp {
///     Off,
///     On,
/// }
///
/// impl Inspectable for Lamp {
///     fn inspect(&self, _fields: &mut Fields<'_>) {}
/// }
///
/// impl Behaviour for Lamp {
///     type External = Switch;
///     type Vars = ();
/// }
///
/// let machine = MachineBuilder::new("lamp", Context::new(Switch::default(), ()))
///     .state(StateBuilder::new("Off", Lamp::Off).when("On", |_, c: &Context<Switch, ()>| c.external.pressed).build())
///     .state(StateBuilder::new("On", Lamp::On).when("Off", |_, c: &Context<Switch, ()>| c.external.pressed).build())
///     .initial("Off")
///     .build()
///     .unwrap();
///
/// let structure = StructureGenerator::new().generate("bench", &machine).unwrap();
///
/// assert!(!structure.is_empty());
/// assert_eq!(structure.initial().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct StructureGenerator<D = HashSetCycleDetector> {
    detector: D,
    config: GeneratorConfig,
    spinners: SpinnerRegistry,
}

impl StructureGenerator<HashSetCycleDetector> {
    /// Generator with exact cycle detection and the default spinners.
    pub fn new() -> Self {
        Self::with_detector(HashSetCycleDetector)
    }
}

impl Default for StructureGenerator<HashSetCycleDetector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> StructureGenerator<D> {
    pub fn with_detector(detector: D) -> Self {
        Self {
            detector,
            config: GeneratorConfig::default(),
            spinners: SpinnerRegistry::default(),
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_spinners(mut self, spinners: SpinnerRegistry) -> Self {
        self.spinners = spinners;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn spinners(&self) -> &SpinnerRegistry {
        &self.spinners
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Explore `fsm` from its initial state and return the complete graph.
    ///
    /// Exploration starts from the machine's current variables and state
    /// data, with the initial state entered as if `initial_previous` had
    /// just executed.
    pub fn generate<B, X>(
        &self,
        machine_name: &str,
        fsm: &FiniteStateMachine<B, X>,
    ) -> Result<KripkeStructure, GenerateError>
    where
        B: Behaviour,
        X: PropertyExtractor<B>,
        D: CycleDetector<World>,
    {
        let never = AtomicBool::new(false);
        self.generate_with_cancel(machine_name, fsm, &never)
    }

    /// Like [`generate`](Self::generate), returning
    /// [`GenerateError::Cancelled`] as soon as `cancel` is set.
    pub fn generate_with_cancel<B, X>(
        &self,
        machine_name: &str,
        fsm: &FiniteStateMachine<B, X>,
        cancel: &AtomicBool,
    ) -> Result<KripkeStructure, GenerateError>
    where
        B: Behaviour,
        X: PropertyExtractor<B>,
        D: CycleDetector<World>,
    {
        info!(
            machine = machine_name,
            fsm = fsm.name(),
            initial = fsm.initial(),
            order = ?self.config.order,
            "Starting structure generation"
        );

        let extractor = fsm.ringlet().extractor().clone();
        let states = fsm.states().clone();
        let initial = states
            .get(fsm.initial())
            .ok_or_else(|| GenerateError::UnknownState {
                id: fsm.initial().to_string(),
            })?;

        let mut registry = CanonicalRegistry::new();
        registry.register(initial.id());
        registry.observe(initial.id(), &extractor.state_properties(initial));

        let mut ringlet =
            Ringlet::new(extractor.clone()).observing_guards(fsm.ringlet().observes_guards());
        ringlet.set_previous(fsm.initial_previous().map(str::to_string));

        let mut run = Run {
            extractor,
            registry,
            graph: GraphBuilder::new(machine_name, fsm.name()),
            explored: self.config.share_explored.then(FxHashSet::default),
            worklist: VecDeque::new(),
        };
        run.worklist.push_back(Job {
            state: fsm.initial().to_string(),
            states,
            ringlet,
            context: fsm.context().clone(),
            last: None,
            cycle: self.detector.initial_data(),
        });

        let mut jobs = 0;
        while let Some(job) = self.pop(&mut run.worklist) {
            if cancel.load(Ordering::Relaxed) {
                return Err(GenerateError::Cancelled);
            }
            if let Some(limit) = self.config.max_jobs {
                if jobs >= limit {
                    return Err(GenerateError::JobLimitExceeded { limit });
                }
            }
            jobs += 1;
            self.expand(job, &mut run, cancel)?;
        }

        let states = run.registry.len();
        let structure = run.graph.finish(run.registry.into_ranges());
        info!(
            machine = machine_name,
            fsm = fsm.name(),
            states,
            nodes = structure.len(),
            edges = structure.edge_count(),
            jobs,
            "Finished structure generation"
        );
        Ok(structure)
    }

    fn pop<T>(&self, worklist: &mut VecDeque<T>) -> Option<T> {
        match self.config.order {
            WorklistOrder::Fifo => worklist.pop_front(),
            WorklistOrder::Lifo => worklist.pop_back(),
        }
    }

    /// Execute one step for every unseen assignment of the job's external
    /// variables.
    fn expand<B, X>(
        &self,
        job: Job<B, X, <D as CycleDetector<World>>::Data>,
        run: &mut Run<B, X, <D as CycleDetector<World>>::Data>,
        cancel: &AtomicBool,
    ) -> Result<(), GenerateError>
    where
        B: Behaviour,
        X: PropertyExtractor<B>,
        D: CycleDetector<World>,
    {
        let state = job
            .states
            .get(&job.state)
            .ok_or_else(|| GenerateError::UnknownState {
                id: job.state.clone(),
            })?;
        run.registry
            .observe(&job.state, &run.extractor.state_properties(state));

        let external = run.extractor.external_properties(&job.context.external);
        let (names, spinners): (Vec<String>, Vec<Spinner>) = external
            .iter()
            .map(|(name, value)| (name.clone(), self.spinners.spinner_for(name, value)))
            .unzip();
        let entering = job.ringlet.will_enter(&job.state);

        debug!(
            state = %job.state,
            entering,
            variables = names.len(),
            "Expanding job"
        );

        for combination in MultiSpinner::new(spinners) {
            if cancel.load(Ordering::Relaxed) {
                return Err(GenerateError::Cancelled);
            }

            let mut context = job.context.clone();
            apply::<B>(&mut context, &external, &names, &combination)?;

            let world = World::capture(&job.state, entering, &run.extractor, &context, &job.states);
            let (repeated, cycle) = self.detector.in_cycle(job.cycle.clone(), &world);

            if repeated || !run.claim(&world) {
                trace!(state = %job.state, world = %world, repeated, "Skipping explored world");
                if self.config.link_revisits {
                    run.link_revisit(job.last, state, &context);
                }
                continue;
            }

            self.step(&job, context, cycle, run)?;
        }
        Ok(())
    }

    /// Run one ringlet step on independent copies of the job's parts and
    /// queue the resulting branch.
    fn step<B, X>(
        &self,
        job: &Job<B, X, <D as CycleDetector<World>>::Data>,
        mut context: ContextOf<B>,
        cycle: <D as CycleDetector<World>>::Data,
        run: &mut Run<B, X, <D as CycleDetector<World>>::Data>,
    ) -> Result<(), GenerateError>
    where
        B: Behaviour,
        X: PropertyExtractor<B>,
        D: CycleDetector<World>,
    {
        let mut states: StateTable<B> = job.states.clone();
        let mut ringlet = job.ringlet.clone();
        let state = states
            .get_mut(&job.state)
            .ok_or_else(|| GenerateError::UnknownState {
                id: job.state.clone(),
            })?;

        let next = ringlet.execute(state, &mut context)?;
        let snapshots = ringlet.take_snapshots();
        for snapshot in &snapshots {
            run.registry
                .observe(&snapshot.state, &snapshot.properties.state);
        }
        let last = run.graph.record_step(job.last, &snapshots);

        if !states.contains_key(&next) {
            return Err(GenerateError::UnknownState { id: next });
        }
        run.registry.register(&next);

        trace!(
            from = %job.state,
            to = %next,
            snapshots = snapshots.len(),
            nodes = run.graph.len(),
            "Queued branch"
        );
        run.worklist.push_back(Job {
            state: next,
            states,
            ringlet,
            context,
            last,
            cycle,
        });
        Ok(())
    }
}

/// State owned by one generation run.
struct Run<B: Behaviour, X, S> {
    extractor: X,
    registry: CanonicalRegistry,
    graph: GraphBuilder,
    /// Worlds expanded by any branch, when shared.
    explored: Option<FxHashSet<World>>,
    worklist: VecDeque<Job<B, X, S>>,
}

impl<B, X, S> Run<B, X, S>
where
    B: Behaviour,
    X: PropertyExtractor<B>,
{
    /// Claim `world` for expansion. Fails if another branch already has.
    fn claim(&mut self, world: &World) -> bool {
        match &mut self.explored {
            Some(explored) => explored.insert(world.clone()),
            None => true,
        }
    }

    /// Link `last` to the node a revisited world starts from.
    fn link_revisit(
        &mut self,
        last: Option<NodeId>,
        state: &State<B>,
        context: &ContextOf<B>,
    ) {
        let Some(last) = last else {
            return;
        };
        let start = Snapshot {
            state: state.id().to_string(),
            point: StepPoint::Start,
            properties: self.extractor.extract(context, state),
        };
        if let Some(node) = self.graph.find(&start) {
            self.graph.link(last, node);
        }
    }
}

/// Write every spun value that differs from the current one back into the
/// external variables.
fn apply<B: Behaviour>(
    context: &mut ContextOf<B>,
    current: &PropertyList,
    names: &[String],
    values: &[PropertyValue],
) -> Result<(), GenerateError> {
    for (name, value) in names.iter().zip(values) {
        if current.get(name) != Some(value) {
            context.external.assign(name, value)?;
        }
    }
    Ok(())
}
