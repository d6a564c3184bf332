//! The matching automaton: mutable store, scanners, and projections.
//!
//! # Module Organization
//!
//! - `store`: the mutable automaton store (states, transitions, final
//!   states, outputs, default successors)
//! - `scan`: the strict and fallback scanning algorithms plus the
//!   acceptance check
//! - `snapshot`: the dictionary/serialization projection
//! - `dot`: the DOT graph-rendering projection

mod dot;
mod scan;
mod snapshot;
mod store;

pub use scan::{Match, OutputLen};
pub use snapshot::AutomatonSnapshot;
pub use store::{Automaton, AutomatonStats, StateId};
