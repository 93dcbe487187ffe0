//! Single-step execution of a state.

use super::error::RingletError;
use super::snapshot::{Snapshot, StepPoint};
use crate::core::{Behaviour, ContextOf, State};
use crate::property::PropertyExtractor;
use tracing::trace;

/// Executes one step of one state.
///
/// A step is: snapshot; `on_entry` and snapshot when the state differs from
/// the one executed immediately before; evaluation of the transitions in
/// order; then either `on_exit` of the first satisfied transition or `main`,
/// followed by a final snapshot. The ringlet keeps only the id of the
/// previously executed state and the snapshots of the last call.
#[derive(Clone, Debug)]
pub struct Ringlet<X> {
    extractor: X,
    previous: Option<String>,
    observe_guards: bool,
    snapshots: Vec<Snapshot>,
}

impl<X> Ringlet<X> {
    pub fn new(extractor: X) -> Self {
        Self {
            extractor,
            previous: None,
            observe_guards: false,
            snapshots: Vec::new(),
        }
    }

    /// Also snapshot after every guard evaluation.
    pub fn observing_guards(mut self, observe: bool) -> Self {
        self.observe_guards = observe;
        self
    }

    pub fn observes_guards(&self) -> bool {
        self.observe_guards
    }

    pub fn extractor(&self) -> &X {
        &self.extractor
    }

    /// Id of the state executed by the last call.
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn set_previous(&mut self, previous: Option<String>) {
        self.previous = previous;
    }

    /// Whether executing `state_id` next would run its `on_entry` hook.
    pub fn will_enter(&self, state_id: &str) -> bool {
        self.previous.as_deref() != Some(state_id)
    }

    /// Snapshots taken by the last call to [`execute`](Self::execute).
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn take_snapshots(&mut self) -> Vec<Snapshot> {
        std::mem::take(&mut self.snapshots)
    }

    /// Execute one step of `state`, returning the id of the next state.
    pub fn execute<B>(
        &mut self,
        state: &mut State<B>,
        context: &mut ContextOf<B>,
    ) -> Result<String, RingletError>
    where
        B: Behaviour,
        X: PropertyExtractor<B>,
    {
        self.snapshots.clear();
        self.capture(StepPoint::Start, state, context);

        if self.will_enter(state.id()) {
            state.behaviour_mut().on_entry(context);
            self.capture(StepPoint::AfterEntry, state, context);
        }
        self.previous = Some(state.id().to_string());

        let mut target = None;
        for (index, transition) in state.transitions().iter().enumerate() {
            let fired = transition.can_fire(state.behaviour(), context);
            if self.observe_guards {
                self.capture(StepPoint::Guard(index), state, context);
            }
            if fired {
                target = Some(transition.target().to_string());
                break;
            }
        }

        let next = match target {
            Some(target) => {
                state.behaviour_mut().on_exit(context);
                self.capture(StepPoint::AfterExit, state, context);
                target
            }
            None => {
                state.behaviour_mut().main(context);
                self.capture(StepPoint::AfterMain, state, context);
                state.id().to_string()
            }
        };

        if self.snapshots.len() < 2 {
            return Err(RingletError::MissingSnapshots {
                state: state.id().to_string(),
                count: self.snapshots.len(),
            });
        }

        trace!(
            state = state.id(),
            next = %next,
            snapshots = self.snapshots.len(),
            "ringlet step"
        );
        Ok(next)
    }

    fn capture<B>(&mut self, point: StepPoint, state: &State<B>, context: &ContextOf<B>)
    where
        B: Behaviour,
        X: PropertyExtractor<B>,
    {
        self.snapshots.push(Snapshot {
            state: state.id().to_string(),
            point,
            properties: self.extractor.extract(context, state),
        });
    }
}
