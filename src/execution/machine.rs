//! Scheduling wrapper around a ringlet.

use super::error::FsmError;
use super::ringlet::Ringlet;
use crate::core::{Behaviour, ContextOf, State, StateHistory, StateTable, StepRecord};
use crate::property::PropertyExtractor;
use chrono::Utc;
use tracing::debug;

/// A finite state machine that can be stepped, suspended, resumed,
/// restarted and exited.
///
/// Machines are built with [`MachineBuilder`](crate::builder::MachineBuilder),
/// which validates that every referenced state exists.
pub struct FiniteStateMachine<B: Behaviour, X> {
    name: String,
    states: StateTable<B>,
    context: ContextOf<B>,
    ringlet: Ringlet<X>,
    current: String,
    previous: Option<String>,
    initial: String,
    initial_previous: Option<String>,
    suspend_state: Option<String>,
    suspended_state: Option<String>,
    exit_state: Option<String>,
    history: StateHistory,
}

impl<B: Behaviour, X> FiniteStateMachine<B, X> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        name: String,
        states: StateTable<B>,
        context: ContextOf<B>,
        ringlet: Ringlet<X>,
        initial: String,
        initial_previous: Option<String>,
        suspend_state: Option<String>,
        exit_state: Option<String>,
    ) -> Self {
        Self {
            name,
            states,
            context,
            ringlet,
            current: initial.clone(),
            previous: initial_previous.clone(),
            initial,
            initial_previous,
            suspend_state,
            suspended_state: None,
            exit_state,
            history: StateHistory::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the state that executes on the next call to [`next`](Self::next).
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn initial(&self) -> &str {
        &self.initial
    }

    pub fn initial_previous(&self) -> Option<&str> {
        self.initial_previous.as_deref()
    }

    pub fn suspend_state(&self) -> Option<&str> {
        self.suspend_state.as_deref()
    }

    /// The state that was current when the machine was suspended.
    pub fn suspended_state(&self) -> Option<&str> {
        self.suspended_state.as_deref()
    }

    pub fn exit_state(&self) -> Option<&str> {
        self.exit_state.as_deref()
    }

    pub fn state(&self, id: &str) -> Option<&State<B>> {
        self.states.get(id)
    }

    pub fn current_state(&self) -> Option<&State<B>> {
        self.states.get(&self.current)
    }

    pub fn states(&self) -> &StateTable<B> {
        &self.states
    }

    pub fn context(&self) -> &ContextOf<B> {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ContextOf<B> {
        &mut self.context
    }

    pub fn ringlet(&self) -> &Ringlet<X> {
        &self.ringlet
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn is_suspended(&self) -> bool {
        self.suspend_state.as_deref() == Some(self.current.as_str())
    }

    /// True when the machine is not suspended, the current state has no
    /// transitions, and it was also the previously executed state.
    pub fn has_finished(&self) -> bool {
        !self.is_suspended()
            && self
                .current_state()
                .is_some_and(|state| !state.has_transitions())
            && self.previous.as_deref() == Some(self.current.as_str())
    }

    /// Park the machine in its suspend state.
    pub fn suspend(&mut self) -> Result<(), FsmError> {
        if self.is_suspended() {
            return Err(FsmError::AlreadySuspended);
        }
        let suspend_state = self.suspend_state.clone().ok_or(FsmError::NoSuspendState)?;
        debug!(machine = %self.name, from = %self.current, "suspending");
        self.suspended_state = Some(std::mem::replace(&mut self.current, suspend_state));
        Ok(())
    }

    /// Return to the state that was current when the machine was suspended.
    pub fn resume(&mut self) -> Result<(), FsmError> {
        let suspended = self.suspended_state.take().ok_or(FsmError::NotSuspended)?;
        debug!(machine = %self.name, to = %suspended, "resuming");
        self.current = suspended;
        Ok(())
    }

    /// Resume if suspended, then return to the initial state.
    pub fn restart(&mut self) {
        self.resume_if_suspended();
        self.current = self.initial.clone();
        self.previous = self.initial_previous.clone();
    }

    /// Resume if suspended, then move to the exit state so the machine
    /// reports [`has_finished`](Self::has_finished).
    pub fn exit(&mut self) -> Result<(), FsmError> {
        let exit_state = self.exit_state.clone().ok_or(FsmError::NoExitState)?;
        self.resume_if_suspended();
        self.current = exit_state.clone();
        self.previous = Some(exit_state);
        Ok(())
    }

    fn resume_if_suspended(&mut self) {
        if let Some(suspended) = self.suspended_state.take() {
            self.current = suspended;
        }
    }
}

impl<B, X> FiniteStateMachine<B, X>
where
    B: Behaviour,
    X: PropertyExtractor<B>,
{
    /// Execute one ringlet step of the current state.
    pub fn next(&mut self) -> Result<(), FsmError> {
        let id = self.current.clone();
        let state = self
            .states
            .get_mut(&id)
            .ok_or_else(|| FsmError::UnknownState { id: id.clone() })?;

        self.ringlet.set_previous(self.previous.clone());
        let next = self.ringlet.execute(state, &mut self.context)?;
        if !self.states.contains_key(&next) {
            return Err(FsmError::UnknownState { id: next });
        }

        self.history.record(StepRecord {
            from: id.clone(),
            to: next.clone(),
            timestamp: Utc::now(),
        });
        self.previous = Some(id);
        self.current = next;
        Ok(())
    }

    /// Step until the machine finishes or `max_steps` steps have run.
    /// Returns the number of steps executed.
    pub fn run(&mut self, max_steps: usize) -> Result<usize, FsmError> {
        let mut steps = 0;
        while steps < max_steps && !self.has_finished() {
            self.next()?;
            steps += 1;
        }
        Ok(steps)
    }
}
