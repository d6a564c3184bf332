//! scanfa: multi-pattern string matching over an explicitly constructed
//! finite automaton.
//!
//! Patterns are encoded as paths through states of a mutable [`Automaton`]:
//! the caller wires the transitions, marks the terminal states final, and
//! attaches the matched patterns as outputs. A single pass of
//! [`search`](Automaton::search) then reports every occurrence of every
//! pattern as an `(output, start, end)` triple.
//!
//! ```
//! use scanfa::Automaton;
//!
//! let mut fa = Automaton::new();
//! let s0 = fa.initial_state();
//! let s1 = fa.add_state();
//! let s2 = fa.add_state();
//! fa.add_transition(s0, "a", s1)?
//!     .add_transition(s1, "b", s2)?
//!     .mark_final(s2)?
//!     .add_output(s2, "ab".to_string())?;
//!
//! let matches = fa.search("ab");
//! assert_eq!(matches[0].output, "ab");
//! assert_eq!((matches[0].start, matches[0].end), (0, 2));
//! # Ok::<(), scanfa::ScanfaError>(())
//! ```
//!
//! The automaton is deliberately not built from a pattern set: callers that
//! want Aho-Corasick behavior fold the goto/fail structure into the
//! transition table themselves (strict scans), or lean on per-state default
//! successors to recover from out-of-alphabet symbols
//! ([`search_with_fallback`](Automaton::search_with_fallback)).

mod automaton;

pub use automaton::{Automaton, AutomatonSnapshot, AutomatonStats, Match, OutputLen, StateId};

use std::fmt;

/// Errors raised by store mutations.
///
/// Absent transitions during scanning are not errors; they are ordinary
/// control flow consumed by the scanners' failure policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanfaError {
    /// `add_transition` was given an empty symbol. The store is left
    /// unmodified.
    InvalidSymbol,
    /// A mutation named a state that was never created in this automaton.
    UnknownState(StateId),
}

impl fmt::Display for ScanfaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanfaError::InvalidSymbol => write!(f, "transition symbols must be non-empty"),
            ScanfaError::UnknownState(state) => {
                write!(f, "unknown state identifier {}", state.index())
            }
        }
    }
}

impl std::error::Error for ScanfaError {}
