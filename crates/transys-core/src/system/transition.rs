//! Transitions (arcs) between states.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use uuid::Uuid;

use super::state::StateId;

/// Globally unique transition identifier.
pub type TransitionId = Uuid;

/// Opaque payload attached to a transition. Never interpreted here.
pub type TransitionData = HashMap<String, String>;

/// A named, directed arc from one state to another.
///
/// Names are labels, not keys: several transitions may share a name, even
/// between the same pair of states.
#[derive(Debug, Clone)]
pub struct Transition {
    /// Unique identifier.
    pub id: TransitionId,
    /// Label of the move.
    pub name: String,
    /// State the transition leaves.
    pub source: StateId,
    /// State the transition enters.
    pub target: StateId,
    /// Auxiliary data carried along with the arc.
    pub data: TransitionData,
}

impl Transition {
    /// Create a new transition with a random UUID and no data.
    pub fn new(name: impl Into<String>, source: StateId, target: StateId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            source,
            target,
            data: TransitionData::new(),
        }
    }

    /// Attach a payload to this transition.
    pub fn with_data(mut self, data: TransitionData) -> Self {
        self.data = data;
        self
    }

    /// Whether this transition goes from `from` to `to`.
    pub fn connects(&self, from: &StateId, to: &StateId) -> bool {
        self.source == *from && self.target == *to
    }
}

impl PartialEq for Transition {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Transition {}

impl Hash for Transition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({} -> {})", self.name, self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_survives_data_changes() {
        let src = Uuid::new_v4();
        let dst = Uuid::new_v4();
        let t = Transition::new("a", src, dst);
        let mut changed = t.clone();
        changed.data.insert("count".to_string(), "3".to_string());
        assert_eq!(t, changed);
        assert_ne!(t, Transition::new("a", src, dst));
    }

    #[test]
    fn connects_is_directional() {
        let src = Uuid::new_v4();
        let dst = Uuid::new_v4();
        let t = Transition::new("a", src, dst);
        assert!(t.connects(&src, &dst));
        assert!(!t.connects(&dst, &src));
    }
}
