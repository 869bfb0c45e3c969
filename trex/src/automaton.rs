//! Shared data shape for [`crate::nfa::Nfa`] and [`crate::dfa::Dfa`]: a flat set of labeled
//! [`Transition`]s between opaque [`StateId`]s, plus a designated start state. This is the
//! "Automaton value" described alongside the NFA and DFA definitions: both automata are built
//! from the same three pieces, they just differ in how many states they may occupy at once and
//! whether [`Label::Epsilon`] is allowed to appear.

use std::fmt;

/// An opaque state identifier. States are nonnegative integers; nothing besides identity and
/// ordering is ever read out of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// The raw index backing this state. Exposed for display and for collaborators (Graphviz
    /// export, table rendering) that need a stable key to print.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A transition label: either a single alphanumeric input symbol, or the unconditional ε-move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    /// An unconditional transition, taken without consuming input.
    Epsilon,
    /// A transition taken upon seeing this exact character.
    Char(char),
}

impl Label {
    pub fn is_epsilon(self) -> bool {
        matches!(self, Label::Epsilon)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Epsilon => write!(f, "ε"),
            Label::Char(c) => write!(f, "{c}"),
        }
    }
}

/// A single `(source, label, dest)` edge. Multiple transitions sharing a `(source, label)` pair
/// are permitted on an [`crate::nfa::Nfa`] (that's the "N"); a [`crate::dfa::Dfa`] never has two
/// such transitions agreeing on `source` and a non-epsilon `label`, and never carries
/// [`Label::Epsilon`] at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub source: StateId,
    pub label: Label,
    pub dest: StateId,
}

/// Common read-only view shared by [`crate::nfa::Nfa`] and [`crate::dfa::Dfa`], used by the
/// rendering collaborators ([`crate::graphviz`] and the `Display` impls) so they only need to be
/// written once.
pub trait Automaton {
    /// All transitions, in insertion order.
    fn transitions(&self) -> &[Transition];
    /// Every state id referenced by this automaton, the start and accepting states included.
    fn states(&self) -> Vec<StateId>;
    /// The single start state.
    fn start(&self) -> StateId;
    /// Whether `state` is one of this automaton's accepting states.
    fn is_accepting(&self, state: StateId) -> bool;
}
