//! The mutable automaton store.
//!
//! The store owns the state set, the per-state transition maps, the
//! final-state set, and the per-state output collections. It is pure data
//! plus accessors and mutators; the scanning algorithms live in
//! [`scan`](super::scan) and only ever read the store.
//!
//! States are allocated by a monotonic counter owned by the store and are
//! never removed or renumbered. The store starts with exactly one state, the
//! initial state `0`, and grows through append-only mutations.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::ScanfaError;

/// A state identifier - an index into the store's state table.
///
/// Identifiers are assigned in strictly increasing creation order starting at
/// the initial state `0`, and can be freely copied.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(u32);

impl StateId {
    /// The initial state of every automaton.
    pub const INITIAL: StateId = StateId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Aggregate counts over the store, as reported by [`Automaton::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutomatonStats {
    pub state_count: usize,
    pub final_state_count: usize,
    /// Installed `(state, symbol) -> target` entries across all states.
    /// Overwriting an existing pair does not grow this count.
    pub transition_count: usize,
}

/// A mutable multi-pattern matching automaton.
///
/// Callers build the automaton transition by transition: allocate states with
/// [`add_state`](Automaton::add_state), wire them with
/// [`add_transition`](Automaton::add_transition), promote match states with
/// [`mark_final`](Automaton::mark_final), and attach the matched pattern
/// values with [`add_output`](Automaton::add_output). Failure behavior is the
/// caller's to encode: either fold failure transitions into the table ahead
/// of a strict scan, or configure default successors for the fallback scan.
///
/// `X` is the output value type reported on a match, typically the matched
/// pattern itself. Mutations that name a state which was never created fail
/// with [`ScanfaError::UnknownState`].
#[derive(Clone, Debug)]
pub struct Automaton<X> {
    /// Outgoing transitions per state, keyed by symbol. Kept ordered so the
    /// alphabet and both projections are deterministic.
    transitions: Vec<BTreeMap<String, StateId>>,
    finals: FxHashSet<StateId>,
    /// Per-state outputs, each kept sorted and deduplicated.
    outputs: Vec<SmallVec<[X; 2]>>,
    /// Per-state fallback targets for the fallback scan. Absent entries
    /// resolve to the initial state.
    defaults: FxHashMap<StateId, StateId>,
}

impl<X> Default for Automaton<X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X> Automaton<X> {
    /// Create a store holding just the initial state, with no transitions,
    /// no final states, and no outputs.
    pub fn new() -> Self {
        Self {
            transitions: vec![BTreeMap::new()],
            finals: FxHashSet::default(),
            outputs: vec![SmallVec::new()],
            defaults: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn initial_state(&self) -> StateId {
        StateId::INITIAL
    }

    /// Allocate a fresh state with no outgoing transitions, not final, and
    /// no outputs. Identifiers are never reused.
    pub fn add_state(&mut self) -> StateId {
        let id = StateId(self.transitions.len() as u32);
        self.transitions.push(BTreeMap::new());
        self.outputs.push(SmallVec::new());
        id
    }

    #[inline]
    fn check_state(&self, state: StateId) -> Result<(), ScanfaError> {
        if state.index() < self.transitions.len() {
            Ok(())
        } else {
            Err(ScanfaError::UnknownState(state))
        }
    }

    /// Install `(from, symbol) -> to`, overwriting any previous target for
    /// the pair (last write wins).
    ///
    /// Symbols are arbitrary non-empty tokens, not just single characters.
    /// An empty symbol fails with [`ScanfaError::InvalidSymbol`] and leaves
    /// the store unmodified. Returns the store handle so mutations chain
    /// with `?`.
    pub fn add_transition(
        &mut self,
        from: StateId,
        symbol: &str,
        to: StateId,
    ) -> Result<&mut Self, ScanfaError> {
        if symbol.is_empty() {
            return Err(ScanfaError::InvalidSymbol);
        }
        self.check_state(from)?;
        self.check_state(to)?;
        self.transitions[from.index()].insert(symbol.to_string(), to);
        Ok(self)
    }

    /// The target of `(from, symbol)`, or `None` if no such transition
    /// exists. Absence is a first-class outcome consumed by the scanners'
    /// failure policies, not an error.
    #[inline]
    pub fn target(&self, from: StateId, symbol: &str) -> Option<StateId> {
        self.transitions.get(from.index())?.get(symbol).copied()
    }

    /// Idempotently add `state` to the final-state set. There is no way to
    /// demote a state back to non-final.
    pub fn mark_final(&mut self, state: StateId) -> Result<&mut Self, ScanfaError> {
        self.check_state(state)?;
        self.finals.insert(state);
        Ok(self)
    }

    #[inline]
    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.contains(&state)
    }

    /// All state identifiers in creation order, initial state first.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.transitions.len() as u32).map(StateId)
    }

    /// The final-state identifiers in ascending numeric order. Creation
    /// order and numeric order coincide.
    pub fn final_states(&self) -> Vec<StateId> {
        let mut finals: Vec<StateId> = self.finals.iter().copied().collect();
        finals.sort_unstable();
        finals
    }

    /// The distinct transition symbols, sorted lexicographically. The
    /// ordering is part of the contract, not incidental.
    pub fn alphabet(&self) -> Vec<&str> {
        let mut letters: Vec<&str> = self
            .transitions
            .iter()
            .flat_map(|t| t.keys().map(String::as_str))
            .collect();
        letters.sort_unstable();
        letters.dedup();
        letters
    }

    /// Configure the state the fallback scan adopts when no transition
    /// matches the current symbol at `state`.
    pub fn set_default_successor(
        &mut self,
        state: StateId,
        target: StateId,
    ) -> Result<&mut Self, ScanfaError> {
        self.check_state(state)?;
        self.check_state(target)?;
        self.defaults.insert(state, target);
        Ok(self)
    }

    /// The fallback target for `state`: the configured default successor,
    /// or the initial state if none was set.
    #[inline]
    pub fn default_successor(&self, state: StateId) -> StateId {
        self.defaults.get(&state).copied().unwrap_or(StateId::INITIAL)
    }

    pub fn stats(&self) -> AutomatonStats {
        AutomatonStats {
            state_count: self.transitions.len(),
            final_state_count: self.finals.len(),
            transition_count: self.transitions.iter().map(BTreeMap::len).sum(),
        }
    }

    /// The outputs attached to `state`, in ascending order. Empty if the
    /// state carries none.
    pub fn outputs(&self, state: StateId) -> &[X] {
        self.outputs
            .get(state.index())
            .map(SmallVec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn transition_maps(&self) -> &[BTreeMap<String, StateId>] {
        &self.transitions
    }
}

impl<X: Ord> Automaton<X> {
    /// Insert `value` into the state's output set if absent. Re-adding an
    /// already-present output is a no-op.
    pub fn add_output(&mut self, state: StateId, value: X) -> Result<&mut Self, ScanfaError> {
        self.check_state(state)?;
        let outputs = &mut self.outputs[state.index()];
        if let Err(pos) = outputs.binary_search(&value) {
            outputs.insert(pos, value);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScanfaError;

    #[test]
    fn test_construction() {
        let fa: Automaton<String> = Automaton::new();
        let s0 = fa.initial_state();
        assert_eq!(s0, StateId::INITIAL);
        assert_eq!(fa.states().collect::<Vec<_>>(), vec![s0]);
        assert!(fa.final_states().is_empty());
        assert!(fa.alphabet().is_empty());
        assert_eq!(
            fa.stats(),
            AutomatonStats {
                state_count: 1,
                final_state_count: 0,
                transition_count: 0,
            }
        );
    }

    #[test]
    fn test_add_state_is_monotonic() {
        let mut fa: Automaton<String> = Automaton::new();
        let s0 = fa.initial_state();
        let s1 = fa.add_state();
        let s2 = fa.add_state();
        assert_eq!(fa.states().collect::<Vec<_>>(), vec![s0, s1, s2]);
        assert!(s0 < s1 && s1 < s2);
    }

    #[test]
    fn test_add_transition_with_empty_symbol() {
        let mut fa: Automaton<String> = Automaton::new();
        let s0 = fa.initial_state();
        let err = fa.add_transition(s0, "", s0).unwrap_err();
        assert_eq!(err, ScanfaError::InvalidSymbol);
        // Failed mutation leaves the store untouched
        assert_eq!(fa.stats().transition_count, 0);
        assert!(fa.alphabet().is_empty());
    }

    #[test]
    fn test_add_transition_and_target() {
        let mut fa: Automaton<String> = Automaton::new();
        let s0 = fa.initial_state();
        let s1 = fa.add_state();
        let s2 = fa.add_state();

        fa.add_transition(s0, "a", s1).unwrap();
        assert_eq!(fa.target(s0, "a"), Some(s1));
        assert_eq!(fa.alphabet(), vec!["a"]);

        fa.add_transition(s0, "b", s2).unwrap();
        assert_eq!(fa.target(s0, "b"), Some(s2));
        assert_eq!(fa.alphabet(), vec!["a", "b"]);

        fa.add_transition(s1, "a", s0).unwrap();
        assert_eq!(fa.target(s1, "a"), Some(s0));

        assert_eq!(fa.target(s2, "a"), None);
        assert_eq!(fa.target(s0, "c"), None);
    }

    #[test]
    fn test_add_transition_overwrites() {
        let mut fa: Automaton<String> = Automaton::new();
        let s0 = fa.initial_state();
        let s1 = fa.add_state();
        let s2 = fa.add_state();

        fa.add_transition(s0, "a", s1).unwrap();
        fa.add_transition(s0, "a", s2).unwrap();
        assert_eq!(fa.target(s0, "a"), Some(s2), "last write wins");
        assert_eq!(
            fa.stats().transition_count,
            1,
            "overwrite must not double-count"
        );
    }

    #[test]
    fn test_multi_character_symbols() {
        let mut fa: Automaton<String> = Automaton::new();
        let s0 = fa.initial_state();
        let s1 = fa.add_state();
        fa.add_transition(s0, "sh", s1).unwrap();
        assert_eq!(fa.target(s0, "sh"), Some(s1));
        assert_eq!(fa.target(s0, "s"), None);
        assert_eq!(fa.alphabet(), vec!["sh"]);
    }

    #[test]
    fn test_unknown_state_is_rejected() {
        let mut big: Automaton<String> = Automaton::new();
        for _ in 0..5 {
            big.add_state();
        }
        let foreign = big.add_state();

        let mut fa: Automaton<String> = Automaton::new();
        let s0 = fa.initial_state();
        assert_eq!(
            fa.add_transition(s0, "a", foreign).unwrap_err(),
            ScanfaError::UnknownState(foreign)
        );
        assert_eq!(
            fa.mark_final(foreign).unwrap_err(),
            ScanfaError::UnknownState(foreign)
        );
        assert_eq!(
            fa.add_output(foreign, "x".to_string()).unwrap_err(),
            ScanfaError::UnknownState(foreign)
        );
        assert_eq!(fa.stats().transition_count, 0);
    }

    #[test]
    fn test_final_states_sorted_and_idempotent() {
        let mut fa: Automaton<String> = Automaton::new();
        let s0 = fa.initial_state();
        let s1 = fa.add_state();
        let s2 = fa.add_state();

        assert!(fa.final_states().is_empty());
        fa.mark_final(s2).unwrap();
        fa.mark_final(s1).unwrap();
        fa.mark_final(s1).unwrap();
        assert_eq!(fa.final_states(), vec![s1, s2]);
        assert!(fa.is_final(s1));
        assert!(!fa.is_final(s0));

        // The initial state can be promoted too
        fa.mark_final(s0).unwrap();
        assert!(fa.is_final(s0));
        assert_eq!(fa.stats().final_state_count, 3);
    }

    #[test]
    fn test_output_set_semantics() {
        let mut fa: Automaton<u32> = Automaton::new();
        let s0 = fa.initial_state();
        assert!(fa.outputs(s0).is_empty());

        fa.add_output(s0, 1).unwrap();
        assert_eq!(fa.outputs(s0), &[1]);
        fa.add_output(s0, 2).unwrap();
        assert_eq!(fa.outputs(s0), &[1, 2]);
        fa.add_output(s0, 1).unwrap();
        assert_eq!(fa.outputs(s0), &[1, 2], "re-adding is a no-op");
    }

    #[test]
    fn test_outputs_on_non_final_state_are_allowed() {
        let mut fa: Automaton<String> = Automaton::new();
        let s1 = fa.add_state();
        fa.add_output(s1, "x".to_string()).unwrap();
        assert!(!fa.is_final(s1));
        assert_eq!(fa.outputs(s1), &["x".to_string()]);
    }

    #[test]
    fn test_default_successor_resolution() {
        let mut fa: Automaton<String> = Automaton::new();
        let s0 = fa.initial_state();
        let s1 = fa.add_state();
        let s2 = fa.add_state();

        assert_eq!(fa.default_successor(s1), s0, "unset resolves to initial");
        fa.set_default_successor(s1, s2).unwrap();
        assert_eq!(fa.default_successor(s1), s2);
        assert_eq!(fa.default_successor(s2), s0);
    }

    #[test]
    fn test_chained_mutation() -> Result<(), ScanfaError> {
        let mut fa = Automaton::new();
        let s0 = fa.initial_state();
        let s1 = fa.add_state();
        fa.add_transition(s0, "a", s1)?
            .add_transition(s1, "a", s0)?
            .mark_final(s1)?
            .add_output(s1, "a".to_string())?;

        assert!(fa.is_final(s1));
        assert_eq!(fa.stats().transition_count, 2);
        Ok(())
    }
}
