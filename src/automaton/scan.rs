//! Scanning algorithms over the automaton store.
//!
//! Two scan variants run the automaton once over an input text and report
//! every occurrence of every pattern. They differ only in what happens when
//! a symbol has no transition:
//!
//! - [`search`](Automaton::search): strict - the scan hard-stops on the
//!   first unmapped symbol. Assumes the caller pre-folded failure
//!   transitions into the table.
//! - [`search_with_fallback`](Automaton::search_with_fallback): the
//!   unmapped symbol is consumed and the scan drops to the state's default
//!   successor, normally the initial state.
//!
//! Both are read-only over the store, perform no backtracking, and derive
//! match boundaries purely from the current position and the output's width.

use super::store::{Automaton, StateId};

/// A single reported occurrence: `output` matched the scanned text over the
/// half-open symbol range `start..end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<X> {
    pub output: X,
    pub start: usize,
    pub end: usize,
}

/// Width of an output value, measured in scanned symbols.
///
/// The scanners treat outputs as opaque; this trait is the one seam they
/// need to compute `start = end - width` for a match ending at `end`.
pub trait OutputLen {
    fn output_len(&self) -> usize;
}

impl OutputLen for String {
    fn output_len(&self) -> usize {
        self.chars().count()
    }
}

impl OutputLen for &str {
    fn output_len(&self) -> usize {
        self.chars().count()
    }
}

impl OutputLen for char {
    fn output_len(&self) -> usize {
        1
    }
}

impl<X> Automaton<X> {
    /// Run the strict transition rule across the whole text: accepted iff
    /// every symbol has a transition and the landing state is final.
    /// Outputs are not consulted.
    pub fn accepts(&self, text: &str) -> bool {
        let mut state = self.initial_state();
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            match self.target(state, ch.encode_utf8(&mut buf)) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_final(state)
    }
}

impl<X: Clone + OutputLen> Automaton<X> {
    /// Strict scan: report every pattern occurrence, halting permanently on
    /// the first symbol with no transition.
    ///
    /// Matches are reported in discovery order; when one state carries
    /// several outputs they are emitted in ascending output order, so
    /// results are reproducible across runs. Offsets count symbols
    /// (characters), and every reported triple satisfies
    /// `text[start..end] == output` for character-per-symbol automatons.
    pub fn search(&self, text: &str) -> Vec<Match<X>> {
        let mut matches = Vec::new();
        let mut state = self.initial_state();
        let mut pos = 0;
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            match self.target(state, ch.encode_utf8(&mut buf)) {
                Some(next) => {
                    state = next;
                    pos += 1;
                    self.emit(state, pos, &mut matches);
                }
                // Hard stop: nothing past this symbol is processed.
                None => break,
            }
        }
        matches
    }

    /// Fallback scan: like [`search`](Automaton::search), but an unmapped
    /// symbol is consumed (not retried) and the scan continues from the
    /// state's default successor.
    ///
    /// This keeps the scan alive across out-of-alphabet delimiters, e.g.
    /// separators in tokenized text that belong to no pattern.
    pub fn search_with_fallback(&self, text: &str) -> Vec<Match<X>> {
        let mut matches = Vec::new();
        let mut state = self.initial_state();
        let mut pos = 0;
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            match self.target(state, ch.encode_utf8(&mut buf)) {
                Some(next) => {
                    state = next;
                    pos += 1;
                    self.emit(state, pos, &mut matches);
                }
                None => {
                    state = self.default_successor(state);
                    pos += 1;
                }
            }
        }
        matches
    }

    /// Emit one match per output attached to `state`, if it is final.
    fn emit(&self, state: StateId, end: usize, matches: &mut Vec<Match<X>>) {
        if !self.is_final(state) {
            return;
        }
        // Outputs are stored sorted, so emission order is deterministic.
        for output in self.outputs(state) {
            matches.push(Match {
                output: output.clone(),
                start: end.saturating_sub(output.output_len()),
                end,
            });
        }
    }
}
