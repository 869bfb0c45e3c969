//! Nondeterministic finite automata built by Thompson's construction and compiled down to a
//! [`crate::dfa::Dfa`] by subset construction.

mod fragment;

use crate::ast::{AstNode, Quantifier};
use crate::automaton::{Automaton, Label, StateId, Transition};
use crate::dfa::Dfa;
use fragment::Fragment;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// An NFA produced from an [`AstNode`]. Built with exactly one accepting state — Thompson's
/// construction never needs more than one — though [`Automaton::is_accepting`] doesn't assume
/// that's the only way an NFA could ever be shaped.
#[derive(Debug, Clone)]
pub struct Nfa {
    pub(crate) transitions: Vec<Transition>,
    pub(crate) start: StateId,
    pub(crate) accept: StateId,
}

impl Nfa {
    /// Compiles `ast` into an NFA via Thompson's construction.
    pub fn from_ast(ast: &AstNode) -> Nfa {
        to_fragment(ast).into_nfa()
    }

    /// The ε-closure of a set of states: every state reachable from `states` by following only
    /// ε-transitions, `states` themselves included.
    fn epsilon_closure(&self, states: &[StateId]) -> Vec<StateId> {
        let mut closure: BTreeSet<StateId> = states.iter().copied().collect();
        let mut worklist: Vec<StateId> = states.to_vec();
        while let Some(state) = worklist.pop() {
            for t in &self.transitions {
                if t.source == state && t.label.is_epsilon() && closure.insert(t.dest) {
                    worklist.push(t.dest);
                }
            }
        }
        closure.into_iter().collect()
    }

    /// Every state reachable from `states` by consuming exactly one `c`.
    fn move_on(&self, states: &[StateId], c: char) -> Vec<StateId> {
        let mut dest: BTreeSet<StateId> = BTreeSet::new();
        for t in &self.transitions {
            if t.label == Label::Char(c) && states.contains(&t.source) {
                dest.insert(t.dest);
            }
        }
        dest.into_iter().collect()
    }

    /// Every non-epsilon label reachable from `states`, in ascending order — the DFA's resulting
    /// transition table is built in this order so that two calls on equal input always produce
    /// identical output.
    fn labels_from(&self, states: &[StateId]) -> Vec<char> {
        let mut labels: BTreeSet<char> = BTreeSet::new();
        for t in &self.transitions {
            if let Label::Char(c) = t.label {
                if states.contains(&t.source) {
                    labels.insert(c);
                }
            }
        }
        labels.into_iter().collect()
    }

    /// Subset construction: compiles this NFA into an equivalent [`Dfa`].
    ///
    /// Empty-transition policy: if consuming `c` from a subset's ε-closure yields no states at
    /// all, no transition is emitted and no new DFA state is registered for it. A DFA state
    /// therefore has strictly fewer than `|alphabet|` outgoing transitions whenever some input
    /// symbol leads nowhere, rather than every dead end being materialized as an explicit sink
    /// state.
    pub fn to_dfa(&self) -> Dfa {
        let start_subset = self.epsilon_closure(&[self.start]);

        let mut registry: Vec<Vec<StateId>> = vec![start_subset.clone()];
        let mut index: HashMap<Vec<StateId>, usize> = HashMap::new();
        index.insert(start_subset, 0);

        let mut worklist: Vec<usize> = vec![0];
        let mut transitions = Vec::new();

        while let Some(current) = worklist.pop() {
            let subset = registry[current].clone();
            for c in self.labels_from(&subset) {
                let moved = self.move_on(&subset, c);
                if moved.is_empty() {
                    continue;
                }
                let closure = self.epsilon_closure(&moved);
                let dest_index = *index.entry(closure.clone()).or_insert_with(|| {
                    registry.push(closure);
                    let id = registry.len() - 1;
                    worklist.push(id);
                    id
                });
                transitions.push(Transition {
                    source: StateId(current),
                    label: Label::Char(c),
                    dest: StateId(dest_index),
                });
            }
        }

        let accepting = registry
            .iter()
            .enumerate()
            .filter(|(_, subset)| subset.contains(&self.accept))
            .map(|(i, _)| StateId(i))
            .collect();

        Dfa {
            num_states: registry.len(),
            transitions,
            start: StateId(0),
            accepting,
        }
    }
}

impl Automaton for Nfa {
    fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    fn states(&self) -> Vec<StateId> {
        let mut states: BTreeSet<StateId> = BTreeSet::new();
        states.insert(self.start);
        states.insert(self.accept);
        for t in &self.transitions {
            states.insert(t.source);
            states.insert(t.dest);
        }
        states.into_iter().collect()
    }

    fn start(&self) -> StateId {
        self.start
    }

    fn is_accepting(&self, state: StateId) -> bool {
        state == self.accept
    }
}

/// A plain transition table, one line per edge, in the same spirit as the teacher's
/// `to_table`/`ascii_table` rendering — just without the file-format round-trip concerns those
/// carry, since this crate never needs to read an automaton back in from text.
impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "start: {}, accept: {}", self.start, self.accept)?;
        for t in &self.transitions {
            writeln!(f, "{} --{}--> {}", t.source, t.label, t.dest)?;
        }
        Ok(())
    }
}

/// Translates a single AST node into a [`Fragment`], recursively assembling children first. This
/// is the Thompson's-construction translation table: `Char` is the base case, `Concat`/`Disj`
/// fold their children with [`Fragment::concat`]/[`Fragment::alternate`], and `Quality` applies
/// [`Fragment::star`]/[`Fragment::plus`].
fn to_fragment(node: &AstNode) -> Fragment {
    match node {
        AstNode::Char(c) => Fragment::literal(*c),
        AstNode::Group(inner) => to_fragment(inner),
        AstNode::Unity(inner) => to_fragment(inner),
        AstNode::Quality(inner, Quantifier::None) => to_fragment(inner),
        AstNode::Quality(inner, Quantifier::Star) => to_fragment(inner).star(),
        AstNode::Quality(inner, Quantifier::Plus) => to_fragment(inner).plus(),
        AstNode::Concat(children) => {
            let mut iter = children.iter();
            let first = to_fragment(iter.next().expect("Concat is never empty"));
            iter.fold(first, |acc, child| acc.concat(to_fragment(child)))
        }
        AstNode::Disj(children) => {
            let mut iter = children.iter();
            let first = to_fragment(iter.next().expect("Disj is never empty"));
            iter.fold(first, |acc, child| acc.alternate(to_fragment(child)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse;

    fn nfa_for(src: &str) -> Nfa {
        Nfa::from_ast(&parse(src).unwrap())
    }

    #[test]
    fn single_char_nfa_has_one_transition() {
        let nfa = nfa_for("a");
        assert_eq!(nfa.transitions.len(), 1);
        assert_eq!(nfa.transitions[0].label, Label::Char('a'));
    }

    #[test]
    fn alternation_nfa_has_six_states() {
        let nfa = nfa_for("a|b");
        assert_eq!(nfa.states().len(), 6);
    }

    #[test]
    fn epsilon_closure_includes_self() {
        let nfa = nfa_for("a");
        let closure = nfa.epsilon_closure(&[nfa.start]);
        assert!(closure.contains(&nfa.start));
    }

    #[test]
    fn to_dfa_start_subset_is_state_zero() {
        let dfa = nfa_for("a*b").to_dfa();
        assert_eq!(dfa.start(), StateId(0));
    }

    #[test]
    fn display_prints_one_line_per_transition() {
        let nfa = nfa_for("ab");
        let rendered = nfa.to_string();
        assert_eq!(rendered.lines().count(), nfa.transitions.len() + 1);
    }
}
