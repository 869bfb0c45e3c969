//! Deterministic finite automata, produced from an [`crate::nfa::Nfa`] by subset construction.

use crate::automaton::{Automaton, Label, StateId, Transition};
use std::fmt;
use thiserror::Error;

/// A DFA. States are numbered `0..num_states`; `num_states` is tracked explicitly because a dead
/// end — a state with no outgoing transition on any symbol — would otherwise be unreachable from
/// [`Dfa::transitions`] alone.
#[derive(Debug, Clone)]
pub struct Dfa {
    pub(crate) num_states: usize,
    pub(crate) transitions: Vec<Transition>,
    pub(crate) start: StateId,
    pub(crate) accepting: Vec<StateId>,
}

/// A malformed walk through a DFA: the input exhausted every transition from some state without
/// reaching an accepting one, or no transition existed for the next symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DfaRunError {
    /// No transition out of `state` is labeled `symbol`.
    #[error("no transition from state {state} on '{symbol}'")]
    Stuck { state: usize, symbol: char },
}

impl Dfa {
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// Walks `input` from the start state, following exactly one transition per character.
    /// Returns whether the final state is accepting, or an error if some character has no
    /// matching transition.
    pub fn accepts(&self, input: &str) -> Result<bool, DfaRunError> {
        let mut state = self.start;
        for c in input.chars() {
            let next = self
                .transitions
                .iter()
                .find(|t| t.source == state && t.label == Label::Char(c))
                .map(|t| t.dest);
            match next {
                Some(dest) => state = dest,
                None => {
                    return Err(DfaRunError::Stuck {
                        state: state.index(),
                        symbol: c,
                    })
                }
            }
        }
        Ok(self.is_accepting(state))
    }
}

/// A plain transition table, one line per edge, in the same spirit as the teacher's
/// `to_table`/`ascii_table` rendering.
impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "start: {}, accept: {{{}}}",
            self.start,
            self.accepting
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )?;
        for t in &self.transitions {
            writeln!(f, "{} --{}--> {}", t.source, t.label, t.dest)?;
        }
        Ok(())
    }
}

impl Automaton for Dfa {
    fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    fn states(&self) -> Vec<StateId> {
        (0..self.num_states).map(StateId).collect()
    }

    fn start(&self) -> StateId {
        self.start
    }

    fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse;
    use crate::nfa::Nfa;

    fn dfa_for(src: &str) -> Dfa {
        Nfa::from_ast(&parse(src).unwrap()).to_dfa()
    }

    #[test]
    fn single_char_accepts_exactly_that_string() {
        let dfa = dfa_for("a");
        assert_eq!(dfa.accepts("a"), Ok(true));
        assert!(dfa.accepts("aa").is_err());
        assert!(dfa.accepts("b").is_err());
    }

    #[test]
    fn star_accepts_empty_and_repetitions() {
        let dfa = dfa_for("a*");
        assert_eq!(dfa.accepts(""), Ok(true));
        assert_eq!(dfa.accepts("aaaa"), Ok(true));
    }

    #[test]
    fn plus_rejects_empty_but_accepts_repetitions() {
        let dfa = dfa_for("a+");
        assert_eq!(dfa.accepts(""), Ok(false));
        assert_eq!(dfa.accepts("aaa"), Ok(true));
    }

    #[test]
    fn disjunction_accepts_either_branch() {
        let dfa = dfa_for("a|b");
        assert_eq!(dfa.accepts("a"), Ok(true));
        assert_eq!(dfa.accepts("b"), Ok(true));
        assert!(dfa.accepts("c").is_err());
    }

    #[test]
    fn concatenation_requires_full_sequence() {
        let dfa = dfa_for("ab");
        assert_eq!(dfa.accepts("ab"), Ok(true));
        assert_eq!(dfa.accepts("a"), Ok(false));
    }

    #[test]
    fn display_lists_start_accept_and_every_transition() {
        let dfa = dfa_for("a|b");
        let rendered = dfa.to_string();
        assert!(rendered.starts_with("start: 0, accept:"));
        assert_eq!(rendered.lines().count(), dfa.transitions.len() + 1);
    }
}
