//! Transitive reduction of acyclic transition systems.
//!
//! An arc `u -> w` is redundant when `w` can also be reached from `u` along a
//! path of two or more arcs. Reduction deletes every redundant arc (including
//! all parallel copies of it) and keeps everything else, so reachability
//! between any two states is unchanged.
//!
//! Each state gets its own pass. The pass snapshots the state's direct
//! successors, then walks everything reachable below them with an explicit
//! stack, deleting arcs from the pass root to every node it meets on the way
//! down. A `visited` set scoped to the pass keeps each node from being
//! expanded twice.
//!
//! Cyclic input is rejected up front by a topological sort, before any arc
//! is removed.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::Deserialize;
use tracing::{debug, info, trace, warn};

use crate::system::state::StateId;
use crate::system::{TransitionSystem, TransitionSystemError};

/// Default ceiling on the depth of a single descent.
pub const DEFAULT_MAX_DEPTH: usize = 65_536;

/// Tunables for [`TransitionSystem::transitive_reduction_with`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReductionConfig {
    /// Most states a single descent path may hold before the pass gives up
    /// with [`TransitionSystemError::DepthLimitExceeded`].
    pub max_depth: usize,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Outcome of a reduction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReductionReport {
    /// Number of transitions deleted.
    pub removed: usize,
    /// Number of per-state passes executed.
    pub passes: usize,
}

impl TransitionSystem {
    /// Compute a topological ordering of the states.
    ///
    /// For every transition `(u, v)`, `u` comes before `v`. Ties are broken
    /// by state name, then ID, so the order is stable across runs of the same
    /// system. Any cycle, self-loops included, is reported as
    /// [`TransitionSystemError::CyclicGraph`].
    pub fn topological_order(&self) -> Result<Vec<StateId>, TransitionSystemError> {
        let mut in_degree: HashMap<StateId, usize> =
            self.states().map(|s| (s.id, 0)).collect();
        for t in self.transitions() {
            *in_degree.entry(t.target).or_default() += 1;
        }

        let key = |id: StateId| (self.state(&id).map_or("", |s| s.name.as_str()), id);
        let mut ready: BinaryHeap<Reverse<(&str, StateId)>> = in_degree
            .iter()
            .filter(|(_, &deg)| deg == 0)
            .map(|(id, _)| Reverse(key(*id)))
            .collect();

        let mut order = Vec::with_capacity(in_degree.len());
        while let Some(Reverse((_, id))) = ready.pop() {
            order.push(id);
            for t in self.outgoing_transitions(&id) {
                if let Some(deg) = in_degree.get_mut(&t.target) {
                    *deg -= 1;
                    if *deg == 0 {
                        ready.push(Reverse(key(t.target)));
                    }
                }
            }
        }

        if order.len() == in_degree.len() {
            return Ok(order);
        }

        let stuck = in_degree
            .iter()
            .filter(|(_, &deg)| deg > 0)
            .map(|(id, _)| key(*id))
            .min();
        match stuck {
            Some((_, state)) => Err(TransitionSystemError::CyclicGraph(state)),
            None => Ok(order),
        }
    }

    /// Whether the system has no directed cycle.
    pub fn is_acyclic(&self) -> bool {
        self.topological_order().is_ok()
    }

    /// Remove every arc implied by a longer path, using the default
    /// [`ReductionConfig`].
    pub fn transitive_reduction(&mut self) -> Result<ReductionReport, TransitionSystemError> {
        self.transitive_reduction_with(&ReductionConfig::default())
    }

    /// Remove every arc implied by a longer path.
    ///
    /// Fails with [`TransitionSystemError::CyclicGraph`] without touching the
    /// system if it contains a cycle. A [`TransitionSystemError::DepthLimitExceeded`]
    /// stops the run part way; arcs already removed were redundant, so
    /// reachability is still intact.
    pub fn transitive_reduction_with(
        &mut self,
        config: &ReductionConfig,
    ) -> Result<ReductionReport, TransitionSystemError> {
        let order = self.topological_order().inspect_err(|err| {
            warn!(%err, "refusing to reduce a cyclic transition system");
        })?;

        let mut report = ReductionReport::default();
        for root in order {
            report.removed += self.reduce_from(root, config.max_depth)?;
            report.passes += 1;
        }

        info!(
            removed = report.removed,
            passes = report.passes,
            remaining = self.transition_count(),
            "transitive reduction finished"
        );
        Ok(report)
    }

    /// One pass: delete arcs from `root` to anything reachable at distance
    /// two or more. Returns the number of transitions deleted.
    fn reduce_from(&mut self, root: StateId, max_depth: usize) -> Result<usize, TransitionSystemError> {
        let children = self.successors(&root);
        debug!(state = %root, children = children.len(), "reducing from state");

        let mut visited: HashSet<StateId> = HashSet::new();
        let mut removed = 0;

        for child in children {
            // A child reached earlier through a sibling has nothing new below it.
            if visited.contains(&child) {
                continue;
            }

            // One frame per node on the current path: its unexplored successors.
            let mut stack: Vec<Vec<StateId>> = vec![self.successors(&child)];
            while let Some(pending) = stack.last_mut() {
                let Some(next) = pending.pop() else {
                    stack.pop();
                    continue;
                };
                if !visited.insert(next) {
                    continue;
                }

                let dropped = self.remove_all_arcs_between(&root, &next);
                if dropped > 0 {
                    trace!(from = %root, to = %next, dropped, "dropped redundant arcs");
                    removed += dropped;
                }

                if stack.len() >= max_depth {
                    return Err(TransitionSystemError::DepthLimitExceeded {
                        state: root,
                        limit: max_depth,
                    });
                }
                let below = self.successors(&next);
                stack.push(below);
            }
        }

        Ok(removed)
    }
}
