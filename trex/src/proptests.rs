//! Structural property tests over randomly generated, grammar-valid regex source, in the same
//! spirit as the teacher's `random_regex` fuzzing strategy: build small regexes recursively from
//! the grammar itself, rather than from arbitrary strings, so every generated case is guaranteed
//! parseable.

use crate::automaton::{Automaton, Label};
use crate::parse;
use proptest::prelude::*;
use std::collections::HashSet;

/// Generates source strings guaranteed to match the grammar in `ast.rs`: a single alphanumeric
/// leaf, recursively grown by grouping, `*`/`+` quantification, concatenation, and alternation.
fn arbitrary_regex() -> impl Strategy<Value = String> {
    "[a-z]".prop_recursive(6, 64, 8, |inner| {
        prop_oneof![
            5 => prop::collection::vec(inner.clone(), 1..4)
                .prop_map(|parts| parts.join("")),
            3 => prop::collection::vec(inner.clone(), 2..4)
                .prop_map(|parts| format!("({})", parts.join("|"))),
            2 => inner.clone().prop_map(|r| format!("({r})*")),
            2 => inner.clone().prop_map(|r| format!("({r})+")),
        ]
    })
}

proptest! {
    /// Every grammar-valid regex compiles to an NFA with exactly one accepting state, and every
    /// state referenced by a transition lies within the fragment's own numbering.
    #[test]
    fn nfa_has_single_start_and_accept(src in arbitrary_regex()) {
        let ast = parse(&src).unwrap();
        let nfa = ast.to_nfa();

        let states = nfa.states();
        let accepting: Vec<_> = states.iter().copied().filter(|s| nfa.is_accepting(*s)).collect();
        prop_assert_eq!(accepting.len(), 1);
        prop_assert!(states.contains(&nfa.start()));

        let min = states.iter().map(|s| s.index()).min().unwrap();
        let max = states.iter().map(|s| s.index()).max().unwrap();
        for t in nfa.transitions() {
            prop_assert!((min..=max).contains(&t.source.index()));
            prop_assert!((min..=max).contains(&t.dest.index()));
        }
    }

    /// Subset construction never produces two transitions out of the same DFA state agreeing on
    /// label, and never carries an epsilon label.
    #[test]
    fn dfa_is_deterministic(src in arbitrary_regex()) {
        let dfa = parse(&src).unwrap().to_nfa().to_dfa();
        for state in dfa.states() {
            let mut seen_labels = HashSet::new();
            for t in dfa.transitions().iter().filter(|t| t.source == state) {
                prop_assert_ne!(t.label, Label::Epsilon);
                prop_assert!(seen_labels.insert(t.label), "duplicate label out of {state}");
            }
        }
    }

    /// The DFA's start state is always index 0, regardless of how large or shaped the source
    /// NFA is.
    #[test]
    fn dfa_start_is_always_index_zero(src in arbitrary_regex()) {
        let dfa = parse(&src).unwrap().to_nfa().to_dfa();
        prop_assert_eq!(dfa.start().index(), 0);
    }

    /// A DFA compiled from an NFA never has more states than the NFA has distinct subsets of
    /// states, i.e. it is bounded by `2^|nfa states|` — a sanity bound, not a tight one.
    #[test]
    fn dfa_state_count_is_bounded_by_powerset_of_nfa_states(src in arbitrary_regex()) {
        let nfa = parse(&src).unwrap().to_nfa();
        let nfa_state_count = nfa.states().len();
        let dfa = nfa.to_dfa();
        prop_assert!(dfa.num_states() <= 1usize << nfa_state_count.min(20));
    }
}
