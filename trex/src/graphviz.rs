//! Graphviz `.dot` export. A pure rendering collaborator: it only reads an [`Automaton`], so the
//! same function serves both [`crate::nfa::Nfa`] and [`crate::dfa::Dfa`].

use crate::automaton::Automaton;
use std::fmt::Write as _;

/// Renders `automaton` as a `digraph` suitable for `dot -Tpng`. `title` is set as the graph
/// label; pass an empty string for none.
pub fn to_dot(automaton: &impl Automaton, title: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph finite_state_machine {{");
    let _ = writeln!(out, "    labelloc=\"t\";");
    let _ = writeln!(out, "    label=\"{title}\";");
    let _ = writeln!(out, "    rankdir=LR;");
    let _ = writeln!(out, "    size=\"8,5\"");

    let accepting: Vec<String> = automaton
        .states()
        .into_iter()
        .filter(|s| automaton.is_accepting(*s))
        .map(|s| s.to_string())
        .collect();
    let _ = writeln!(
        out,
        "    node [shape = doublecircle]; {};",
        accepting.join(" ")
    );
    let _ = writeln!(out, "    node [shape = circle];");
    let _ = writeln!(
        out,
        "    node [shape = none, label = \"\", width = 0]; start_marker;"
    );
    let _ = writeln!(
        out,
        "    start_marker -> {} [label = \"\"];",
        automaton.start()
    );

    for t in automaton.transitions() {
        let _ = writeln!(
            out,
            "    {} -> {} [ label = \"{}\" ];",
            t.source, t.dest, t.label
        );
    }

    let _ = writeln!(out, "}}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse;
    use crate::nfa::Nfa;

    #[test]
    fn renders_a_digraph_header_and_one_edge_per_transition() {
        let nfa = Nfa::from_ast(&parse("ab").unwrap());
        let dot = to_dot(&nfa, "ab");
        assert!(dot.starts_with("digraph finite_state_machine {"));
        assert!(dot.ends_with("}\n"));
        assert_eq!(
            dot.matches("->").count(),
            nfa.transitions().len() + 1, // plus the synthetic start_marker edge
        );
    }

    #[test]
    fn dfa_renders_with_doublecircle_accepting_states() {
        let dfa = Nfa::from_ast(&parse("a|b").unwrap()).to_dfa();
        let dot = to_dot(&dfa, "");
        assert!(dot.contains("doublecircle"));
    }
}
