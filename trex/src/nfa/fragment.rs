//! The NFA fragment algebra: every AST variant lowers to a [`Fragment`] with exactly one start
//! state and one accept state, and the three compositional primitives here — concatenation,
//! alternation, and Kleene star — are the entire vocabulary `AstNode::to_nfa` is built from.
//!
//! A fragment tracks its own numeric invariants so that two fragments built independently (and
//! therefore numbered starting from 0) can always be spliced together without their state ids
//! colliding.

use crate::automaton::{Label, StateId, Transition};
use crate::nfa::Nfa;

#[derive(Debug, Clone)]
pub(crate) struct Fragment {
    pub(crate) transitions: Vec<Transition>,
    pub(crate) start: StateId,
    pub(crate) accept: StateId,
}

impl Fragment {
    /// The fragment for a single literal character: states `{0, 1}`, a single transition
    /// `0 --c--> 1`.
    pub(crate) fn literal(c: char) -> Self {
        Fragment {
            transitions: vec![Transition {
                source: StateId(0),
                label: Label::Char(c),
                dest: StateId(1),
            }],
            start: StateId(0),
            accept: StateId(1),
        }
    }

    /// The smallest state number referenced anywhere in this fragment.
    pub(crate) fn min_state(&self) -> usize {
        self.transitions
            .iter()
            .flat_map(|t| [t.source.index(), t.dest.index()])
            .chain([self.start.index(), self.accept.index()])
            .min()
            .unwrap_or(0)
    }

    /// The largest state number referenced anywhere in this fragment.
    pub(crate) fn max_state(&self) -> usize {
        self.transitions
            .iter()
            .flat_map(|t| [t.source.index(), t.dest.index()])
            .chain([self.start.index(), self.accept.index()])
            .max()
            .unwrap_or(0)
    }

    /// Adds `k` to the start, accept, and every transition endpoint, to disambiguate this
    /// fragment's state numbers before splicing it into another.
    pub(crate) fn add_offset(&mut self, k: usize) {
        self.start = StateId(self.start.index() + k);
        self.accept = StateId(self.accept.index() + k);
        for t in &mut self.transitions {
            t.source = StateId(t.source.index() + k);
            t.dest = StateId(t.dest.index() + k);
        }
    }

    /// Substitutes `new` for `old` in every transition endpoint, start, and accept — used to
    /// merge two states into one after splicing two fragments together.
    pub(crate) fn replace_node(&mut self, old: StateId, new: StateId) {
        if self.start == old {
            self.start = new;
        }
        if self.accept == old {
            self.accept = new;
        }
        for t in &mut self.transitions {
            if t.source == old {
                t.source = new;
            }
            if t.dest == old {
                t.dest = new;
            }
        }
    }

    /// `left ⧺ right`: `right`'s start is merged into `left`'s accept, so the combined fragment
    /// has `left`'s start and `right`'s accept.
    pub(crate) fn concat(mut self, mut right: Fragment) -> Fragment {
        let k = if self.max_state() == self.accept.index() {
            self.max_state()
        } else {
            self.max_state() + 1
        };
        right.add_offset(k);
        right.replace_node(right.start, StateId(k));
        self.replace_node(self.accept, StateId(k));

        let accept = right.accept;
        self.transitions.extend(right.transitions);
        Fragment {
            transitions: self.transitions,
            start: self.start,
            accept,
        }
    }

    /// `self | disjunct`: a fresh start ε-branches to both operands' starts, and a fresh accept
    /// is ε-joined from both operands' accepts.
    pub(crate) fn alternate(mut self, mut disjunct: Fragment) -> Fragment {
        let new_start = StateId(self.min_state());
        self.add_offset(1);
        self.transitions.push(Transition {
            source: new_start,
            label: Label::Epsilon,
            dest: self.start,
        });
        self.start = new_start;

        let new_accept = StateId(self.max_state() + 1);
        self.transitions.push(Transition {
            source: self.accept,
            label: Label::Epsilon,
            dest: new_accept,
        });
        self.accept = new_accept;

        disjunct.add_offset(new_accept.index() + 1);
        self.transitions.push(Transition {
            source: self.start,
            label: Label::Epsilon,
            dest: disjunct.start,
        });
        self.transitions.push(Transition {
            source: disjunct.accept,
            label: Label::Epsilon,
            dest: self.accept,
        });
        self.transitions.extend(disjunct.transitions);
        self
    }

    /// `child*`: zero or more repetitions. Applied in place.
    pub(crate) fn star(mut self) -> Fragment {
        self.transitions.push(Transition {
            source: self.start,
            label: Label::Epsilon,
            dest: self.accept,
        });
        self.transitions.push(Transition {
            source: self.accept,
            label: Label::Epsilon,
            dest: self.start,
        });
        let new_accept = StateId(self.max_state() + 1);
        self.transitions.push(Transition {
            source: self.accept,
            label: Label::Epsilon,
            dest: new_accept,
        });
        self.accept = new_accept;
        self
    }

    /// `child+`: `child` concatenated with a freshly cloned `child*`. The clone is required
    /// because offsetting during concatenation mutates state numbers in place, and `child` is
    /// still needed unmodified for the non-repeating first occurrence.
    pub(crate) fn plus(self) -> Fragment {
        let repeated = self.clone().star();
        self.concat(repeated)
    }

    pub(crate) fn into_nfa(self) -> Nfa {
        Nfa {
            transitions: self.transitions,
            start: self.start,
            accept: self.accept,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_has_two_states_one_transition() {
        let f = Fragment::literal('a');
        assert_eq!(f.min_state(), 0);
        assert_eq!(f.max_state(), 1);
        assert_eq!(f.transitions.len(), 1);
    }

    #[test]
    fn concat_preserves_single_start_and_accept() {
        let f = Fragment::literal('a').concat(Fragment::literal('b'));
        assert_ne!(f.start, f.accept);
        assert_eq!(f.transitions.len(), 2);
    }

    #[test]
    fn alternate_produces_six_states_for_two_literals() {
        let f = Fragment::literal('a').alternate(Fragment::literal('b'));
        assert_eq!(f.max_state() - f.min_state() + 1, 6);
        // Two labeled transitions (a, b) and four epsilon transitions.
        assert_eq!(f.transitions.len(), 6);
        assert_eq!(
            f.transitions
                .iter()
                .filter(|t| t.label.is_epsilon())
                .count(),
            4
        );
    }

    #[test]
    fn star_keeps_accept_free_of_incoming_non_epsilon_edges() {
        let f = Fragment::literal('a').star();
        assert!(f
            .transitions
            .iter()
            .filter(|t| t.dest == f.accept)
            .all(|t| t.label.is_epsilon()));
    }
}
