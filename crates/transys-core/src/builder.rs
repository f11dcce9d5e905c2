//! Name-based construction API for transition systems.
//!
//! `TransitionSystemBuilder` lets callers that only know state labels (for
//! instance the output of a discovery step) wire up a system without keeping
//! track of IDs themselves. Within one builder, a name always denotes the same
//! state.
//!
//! # Example
//!
//! ```rust
//! use transys_core::builder::TransitionSystemBuilder;
//!
//! let mut builder = TransitionSystemBuilder::new();
//! builder.arc("register", "start", "registered");
//! builder.arc("approve", "registered", "done");
//! builder.arc("fast-track", "start", "done");
//!
//! let mut ts = builder.build();
//! assert_eq!(ts.state_count(), 3);
//!
//! let report = ts.transitive_reduction().unwrap();
//! assert_eq!(report.removed, 1);
//! ```

use std::collections::HashMap;

use crate::system::state::StateId;
use crate::system::transition::{TransitionData, TransitionId};
use crate::system::TransitionSystem;

/// A builder for constructing transition systems by state name.
#[derive(Debug, Default)]
pub struct TransitionSystemBuilder {
    system: TransitionSystem,
    names: HashMap<String, StateId>,
}

impl TransitionSystemBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state called `name`, or return the existing one.
    pub fn state(&mut self, name: &str) -> StateId {
        if let Some(id) = self.names.get(name) {
            return *id;
        }
        let id = self.system.add_state(name);
        self.names.insert(name.to_string(), id);
        id
    }

    /// Add an arc between two named states, creating them as needed.
    pub fn arc(&mut self, name: &str, from: &str, to: &str) -> TransitionId {
        self.arc_with_data(name, from, to, TransitionData::new())
    }

    /// Add an arc carrying `data` between two named states.
    pub fn arc_with_data(
        &mut self,
        name: &str,
        from: &str,
        to: &str,
        data: TransitionData,
    ) -> TransitionId {
        let from = self.state(from);
        let to = self.state(to);
        self.system
            .add_arc_with_data(name, from, to, data)
            .expect("builder states are always members of the system")
    }

    /// Look up the ID of a named state.
    pub fn id(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    /// All name-to-ID bindings made so far.
    pub fn ids(&self) -> &HashMap<String, StateId> {
        &self.names
    }

    /// Finish construction.
    pub fn build(self) -> TransitionSystem {
        self.system
    }

    /// Finish construction, also returning the name-to-ID bindings.
    pub fn build_with_ids(self) -> (TransitionSystem, HashMap<String, StateId>) {
        (self.system, self.names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_reused() {
        let mut b = TransitionSystemBuilder::new();
        let first = b.state("A");
        let second = b.state("A");
        assert_eq!(first, second);
        assert_eq!(b.build().state_count(), 1);
    }

    #[test]
    fn arc_creates_missing_states() {
        let mut b = TransitionSystemBuilder::new();
        let t = b.arc("ab", "A", "B");
        let a = b.id("A").unwrap();
        let bid = b.id("B").unwrap();

        let ts = b.build();
        assert_eq!(ts.state_count(), 2);
        let transition = ts.transition(&t).unwrap();
        assert!(transition.connects(&a, &bid));
        assert!(ts.validate().is_ok());
    }

    #[test]
    fn build_with_ids_keeps_bindings() {
        let mut b = TransitionSystemBuilder::new();
        b.arc("x", "p", "q");
        assert_eq!(b.ids().len(), 2);
        assert_eq!(b.ids().get("q").copied(), b.id("q"));
        let (ts, ids) = b.build_with_ids();
        assert_eq!(ids.len(), 2);
        assert_eq!(ts.find_state("p"), ids.get("p").copied());
    }

    #[test]
    fn arc_data_is_kept() {
        let mut b = TransitionSystemBuilder::new();
        let data = TransitionData::from([("cost".to_string(), "4".to_string())]);
        let t = b.arc_with_data("x", "p", "q", data.clone());
        assert_eq!(b.build().transition(&t).unwrap().data, data);
    }
}
