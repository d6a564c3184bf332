//! Dictionary projection of the store.
//!
//! [`Automaton::snapshot`] produces a structural copy of the store suitable
//! for transport or storage. The projection is a pure, repeatable function
//! of the store contents: output lists are sorted regardless of insertion
//! order, and every map is ordered, so two snapshots of equal stores
//! serialize identically.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::store::{Automaton, StateId};

/// A structural snapshot of an automaton.
///
/// `transitions` carries one entry per state, including states with no
/// outgoing transitions; `outputs` only carries output-bearing states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomatonSnapshot<X> {
    pub initial: StateId,
    pub finals: BTreeSet<StateId>,
    pub outputs: BTreeMap<StateId, Vec<X>>,
    pub transitions: BTreeMap<StateId, BTreeMap<String, StateId>>,
}

impl<X: Clone> Automaton<X> {
    /// Project the current store contents into an [`AutomatonSnapshot`].
    /// The store is not mutated.
    pub fn snapshot(&self) -> AutomatonSnapshot<X> {
        let mut outputs = BTreeMap::new();
        let mut transitions = BTreeMap::new();
        for state in self.states() {
            let out = self.outputs(state);
            if !out.is_empty() {
                outputs.insert(state, out.to_vec());
            }
            transitions.insert(state, self.transition_maps()[state.index()].clone());
        }
        AutomatonSnapshot {
            initial: self.initial_state(),
            finals: self.final_states().into_iter().collect(),
            outputs,
            transitions,
        }
    }
}
