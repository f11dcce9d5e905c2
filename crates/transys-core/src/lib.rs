//! Transition systems for process-mining pipelines.
//!
//! A [`TransitionSystem`] is a labeled directed multigraph: states connected
//! by named transitions. This crate provides the arc mutation primitives that
//! keep the transition registry and per-state incidence sets in sync, and a
//! transitive reduction that strips shortcut arcs from acyclic systems.

pub mod builder;
pub mod reduction;
pub mod system;

pub use builder::TransitionSystemBuilder;
pub use reduction::{ReductionConfig, ReductionReport};
pub use system::state::{State, StateId};
pub use system::transition::{Transition, TransitionData, TransitionId};
pub use system::{TransitionSystem, TransitionSystemError};
