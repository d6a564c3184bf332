//! DOT rendering of the store.
//!
//! A display aid only; nothing in the scanning algorithms consumes this.

use super::store::Automaton;

const HEADER: &str = "digraph automaton {\n\
                      rankdir = LR;\n\
                      label = \"\";\n\
                      center = 1;\n\
                      ranksep = \"0.4\";\n\
                      nodesep = \"0.25\";\n";

impl<X> Automaton<X> {
    /// Render the automaton as a DOT directed graph.
    ///
    /// One node declaration per state in creation order (double circle for
    /// finals), each immediately followed by that state's outgoing edges in
    /// symbol order.
    pub fn to_dot(&self) -> String {
        let mut dot = String::from(HEADER);
        for state in self.states() {
            let shape = if self.is_final(state) {
                "doublecircle"
            } else {
                "circle"
            };
            dot.push_str(&format!(
                "{} [label = \"{}\", shape = {}, style = bold, fontsize = 14]\n",
                state.index(),
                state.index(),
                shape
            ));
            for (symbol, to) in &self.transition_maps()[state.index()] {
                dot.push_str(&format!(
                    "\t{} -> {} [label = \"{}\", fontsize = 14];\n",
                    state.index(),
                    to.index(),
                    symbol
                ));
            }
        }
        dot.push('}');
        dot
    }
}
