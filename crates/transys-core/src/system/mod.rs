//! The transition system container: states, transitions, and the arc
//! mutation primitives that keep them consistent.
//!
//! Transitions live in a single registry keyed by [`TransitionId`]. Each
//! state holds the IDs of the transitions that touch it, split into incoming
//! and outgoing sets. Every public operation preserves two invariants:
//!
//! - every registered transition appears in its source's outgoing set and
//!   its target's incoming set;
//! - every ID in an incidence set names a registered transition whose
//!   source (or target) is that state.

pub mod state;
pub mod transition;

use std::collections::{HashMap, HashSet, VecDeque};

use thiserror::Error;
use tracing::debug;

use self::state::{State, StateId};
use self::transition::{Transition, TransitionData, TransitionId};

/// Errors raised by transition system operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionSystemError {
    #[error("state {0} is not part of this transition system")]
    InvalidReference(StateId),

    #[error("state not found: {0}")]
    StateNotFound(StateId),

    #[error("transition not found: {0}")]
    TransitionNotFound(TransitionId),

    #[error("cycle detected involving state {0}")]
    CyclicGraph(StateId),

    #[error("reduction from state {state} exceeded the depth limit of {limit}")]
    DepthLimitExceeded { state: StateId, limit: usize },

    #[error("transition {transition} refers to missing state {state}")]
    DanglingTransition {
        transition: TransitionId,
        state: StateId,
    },

    #[error("incidence of transition {transition} at state {state} is out of sync with the registry")]
    BrokenIncidence {
        transition: TransitionId,
        state: StateId,
    },
}

/// A labeled directed multigraph of states and transitions.
#[derive(Debug, Clone, Default)]
pub struct TransitionSystem {
    states: HashMap<StateId, State>,
    transitions: HashMap<TransitionId, Transition>,
}

impl TransitionSystem {
    /// Create an empty transition system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new state with the given name and return its ID.
    ///
    /// Names are not checked for uniqueness.
    pub fn add_state(&mut self, name: impl Into<String>) -> StateId {
        let state = State::new(name);
        let id = state.id;
        self.states.insert(id, state);
        id
    }

    /// Look up a state by ID.
    pub fn state(&self, id: &StateId) -> Option<&State> {
        self.states.get(id)
    }

    /// Look up a transition by ID.
    pub fn transition(&self, id: &TransitionId) -> Option<&Transition> {
        self.transitions.get(id)
    }

    /// Find the first state carrying `name`.
    pub fn find_state(&self, name: &str) -> Option<StateId> {
        self.states.values().find(|s| s.name == name).map(|s| s.id)
    }

    /// Whether `id` names a state of this system.
    pub fn contains_state(&self, id: &StateId) -> bool {
        self.states.contains_key(id)
    }

    /// Iterate over all states.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    /// Iterate over all transitions.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.values()
    }

    /// Return the total number of states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Return the total number of transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Transitions leaving `id`, resolved against the registry.
    pub fn outgoing_transitions(&self, id: &StateId) -> impl Iterator<Item = &Transition> {
        self.states
            .get(id)
            .into_iter()
            .flat_map(|s| s.outgoing.iter())
            .filter_map(move |tid| self.transitions.get(tid))
    }

    /// Transitions entering `id`, resolved against the registry.
    pub fn incoming_transitions(&self, id: &StateId) -> impl Iterator<Item = &Transition> {
        self.states
            .get(id)
            .into_iter()
            .flat_map(|s| s.incoming.iter())
            .filter_map(move |tid| self.transitions.get(tid))
    }

    /// Distinct direct successors of `id`.
    pub fn successors(&self, id: &StateId) -> Vec<StateId> {
        let mut seen = HashSet::new();
        self.outgoing_transitions(id)
            .map(|t| t.target)
            .filter(|target| seen.insert(*target))
            .collect()
    }

    /// Every parallel transition going directly from `from` to `to`.
    pub fn transitions_between(&self, from: &StateId, to: &StateId) -> Vec<TransitionId> {
        self.outgoing_transitions(from)
            .filter(|t| t.target == *to)
            .map(|t| t.id)
            .collect()
    }

    /// Whether `to` can be reached from `from` along directed transitions.
    /// Every state reaches itself.
    pub fn is_reachable(&self, from: &StateId, to: &StateId) -> bool {
        if from == to {
            return self.states.contains_key(from);
        }

        let mut visited = HashSet::from([*from]);
        let mut queue = VecDeque::from([*from]);
        while let Some(current) = queue.pop_front() {
            for next in self.successors(&current) {
                if next == *to {
                    return true;
                }
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// Add a transition named `name` from `from` to `to` with no data.
    pub fn add_arc(
        &mut self,
        name: impl Into<String>,
        from: StateId,
        to: StateId,
    ) -> Result<TransitionId, TransitionSystemError> {
        self.add_arc_with_data(name, from, to, TransitionData::new())
    }

    /// Add a transition carrying `data`. Both endpoints must already belong
    /// to this system; otherwise nothing is changed.
    pub fn add_arc_with_data(
        &mut self,
        name: impl Into<String>,
        from: StateId,
        to: StateId,
        data: TransitionData,
    ) -> Result<TransitionId, TransitionSystemError> {
        for endpoint in [from, to] {
            if !self.contains_state(&endpoint) {
                return Err(TransitionSystemError::InvalidReference(endpoint));
            }
        }

        let transition = Transition::new(name, from, to).with_data(data);
        let id = transition.id;
        debug!(transition = %id, name = %transition.name, %from, %to, "adding arc");

        if let Some(source) = self.states.get_mut(&from) {
            source.outgoing.insert(id);
        }
        if let Some(target) = self.states.get_mut(&to) {
            target.incoming.insert(id);
        }
        self.transitions.insert(id, transition);
        Ok(id)
    }

    /// Remove every transition named `name` that goes from `from` to `to`.
    ///
    /// Transitions with the same name elsewhere in the system are kept.
    /// Returns the number removed; a missing name or pair removes nothing.
    pub fn remove_arc_by_name(&mut self, name: &str, from: &StateId, to: &StateId) -> usize {
        let doomed: Vec<TransitionId> = self
            .outgoing_transitions(from)
            .filter(|t| t.target == *to && t.name == name)
            .map(|t| t.id)
            .collect();
        self.detach_all(doomed)
    }

    /// Remove every transition named `name`, wherever it is in the system.
    pub fn remove_arcs_named(&mut self, name: &str) -> usize {
        let doomed: Vec<TransitionId> = self
            .transitions
            .values()
            .filter(|t| t.name == name)
            .map(|t| t.id)
            .collect();
        self.detach_all(doomed)
    }

    /// Remove every transition going directly from `from` to `to`,
    /// whatever its name. Returns the number removed.
    pub fn remove_all_arcs_between(&mut self, from: &StateId, to: &StateId) -> usize {
        let doomed = self.transitions_between(from, to);
        self.detach_all(doomed)
    }

    /// Remove one transition by ID.
    pub fn remove_transition(&mut self, id: TransitionId) -> Result<Transition, TransitionSystemError> {
        self.detach(&id)
            .ok_or(TransitionSystemError::TransitionNotFound(id))
    }

    /// Remove a state together with every transition touching it.
    pub fn remove_state(&mut self, id: StateId) -> Result<State, TransitionSystemError> {
        let state = self
            .states
            .get(&id)
            .ok_or(TransitionSystemError::StateNotFound(id))?;

        let touching: Vec<TransitionId> = state
            .outgoing
            .iter()
            .chain(state.incoming.iter())
            .copied()
            .collect();
        self.detach_all(touching);

        debug!(state = %id, "removing state");
        self.states
            .remove(&id)
            .ok_or(TransitionSystemError::StateNotFound(id))
    }

    /// Check that the registry and all incidence sets agree.
    pub fn validate(&self) -> Result<(), Vec<TransitionSystemError>> {
        let mut errors = Vec::new();

        for t in self.transitions.values() {
            match self.states.get(&t.source) {
                Some(s) if s.outgoing.contains(&t.id) => {}
                Some(_) => errors.push(TransitionSystemError::BrokenIncidence {
                    transition: t.id,
                    state: t.source,
                }),
                None => errors.push(TransitionSystemError::DanglingTransition {
                    transition: t.id,
                    state: t.source,
                }),
            }
            match self.states.get(&t.target) {
                Some(s) if s.incoming.contains(&t.id) => {}
                Some(_) => errors.push(TransitionSystemError::BrokenIncidence {
                    transition: t.id,
                    state: t.target,
                }),
                None => errors.push(TransitionSystemError::DanglingTransition {
                    transition: t.id,
                    state: t.target,
                }),
            }
        }

        for s in self.states.values() {
            for tid in &s.outgoing {
                if !self.transitions.get(tid).is_some_and(|t| t.source == s.id) {
                    errors.push(TransitionSystemError::BrokenIncidence {
                        transition: *tid,
                        state: s.id,
                    });
                }
            }
            for tid in &s.incoming {
                if !self.transitions.get(tid).is_some_and(|t| t.target == s.id) {
                    errors.push(TransitionSystemError::BrokenIncidence {
                        transition: *tid,
                        state: s.id,
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn detach_all(&mut self, ids: Vec<TransitionId>) -> usize {
        ids.iter().filter(|id| self.detach(id).is_some()).count()
    }

    /// Remove a transition from the registry and both incidence sets.
    fn detach(&mut self, id: &TransitionId) -> Option<Transition> {
        let transition = self.transitions.remove(id)?;
        if let Some(source) = self.states.get_mut(&transition.source) {
            source.outgoing.remove(id);
        }
        if let Some(target) = self.states.get_mut(&transition.target) {
            target.incoming.remove(id);
        }
        debug!(
            transition = %id,
            name = %transition.name,
            from = %transition.source,
            to = %transition.target,
            "removed arc"
        );
        Some(transition)
    }
}
