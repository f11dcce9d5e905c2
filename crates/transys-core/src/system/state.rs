//! States and their incidence sets.
//!
//! A state is a node of a transition system. It records which transitions
//! leave it and which arrive at it; both sets hold handles into the owning
//! system's transition registry.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use uuid::Uuid;

use super::transition::TransitionId;

/// Globally unique state identifier.
pub type StateId = Uuid;

/// A state in a transition system.
///
/// Equality and hashing use the identifier only, so two states with the same
/// name are still distinct states.
#[derive(Debug, Clone)]
pub struct State {
    /// Unique identifier.
    pub id: StateId,
    /// Human-readable label.
    pub name: String,
    pub(crate) incoming: HashSet<TransitionId>,
    pub(crate) outgoing: HashSet<TransitionId>,
}

impl State {
    /// Create a new state with a random UUID and empty incidence sets.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Create a state with a specific ID.
    pub fn with_id(id: StateId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            incoming: HashSet::new(),
            outgoing: HashSet::new(),
        }
    }

    /// Transitions whose target is this state.
    pub fn incoming(&self) -> impl Iterator<Item = &TransitionId> {
        self.incoming.iter()
    }

    /// Transitions whose source is this state.
    pub fn outgoing(&self) -> impl Iterator<Item = &TransitionId> {
        self.outgoing.iter()
    }

    pub fn in_degree(&self) -> usize {
        self.incoming.len()
    }

    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }

    /// Whether `transition` arrives at this state.
    pub fn has_incoming(&self, transition: &TransitionId) -> bool {
        self.incoming.contains(transition)
    }

    /// Whether `transition` leaves this state.
    pub fn has_outgoing(&self, transition: &TransitionId) -> bool {
        self.outgoing.contains(transition)
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_distinct_states() {
        let a = State::new("A");
        let b = State::new("A");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn with_id_keeps_identity() {
        let id = StateId::new_v4();
        let s = State::with_id(id, "done");
        assert_eq!(s.id, id);
        assert_eq!(s, State::with_id(id, "renamed"));
    }

    #[test]
    fn new_state_has_no_incidence() {
        let s = State::new("idle");
        assert_eq!(s.in_degree(), 0);
        assert_eq!(s.out_degree(), 0);
        assert_eq!(s.to_string(), "idle");
    }
}
