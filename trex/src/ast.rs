//! The regex grammar and its recursive-descent parser.
//!
//! `Disj := Concat ('|' Concat)*`
//! `Concat := Quality+`
//! `Quality := Unity ('*' | '+')?`
//! `Unity := Char | Group`
//! `Group := '(' Disj ')'`
//! `Char := [A-Za-z0-9]`
//!
//! Each nonterminal is parsed by a free function taking a [`Cursor`] and returning a
//! [`ParseOutcome`]: `Matched` on success, `NoMatch` when the production simply doesn't apply
//! here (a legitimate signal for the caller to try an alternative — the cursor is left exactly
//! where it was), or `Error` for a hard, unrecoverable failure such as an unclosed group.

use crate::cursor::Cursor;
use crate::nfa::Nfa;
use std::fmt;
use thiserror::Error;

/// A quantifier suffix. `?` is intentionally not among these — it isn't part of this language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    None,
    Star,
    Plus,
}

/// A parsed regular expression, tagged by grammar production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    /// A single literal alphanumeric character.
    Char(char),
    /// A parenthesized subexpression: `'(' Disj ')'`.
    Group(Box<AstNode>),
    /// A `Char` or a `Group`, kept distinct from its child only to mirror the grammar; carries
    /// no information of its own.
    Unity(Box<AstNode>),
    /// A `Unity` with an optional repetition quantifier.
    Quality(Box<AstNode>, Quantifier),
    /// A nonempty, ordered sequence of `Quality` nodes, juxtaposed.
    Concat(Vec<AstNode>),
    /// A nonempty, ordered sequence of `Concat` nodes, separated by `|`.
    Disj(Vec<AstNode>),
}

impl AstNode {
    /// Compiles this AST into an NFA via Thompson's construction. A thin wrapper around
    /// [`Nfa::from_ast`] kept here so callers can go straight from source text to an automaton
    /// without naming the `nfa` module.
    pub fn to_nfa(&self) -> Nfa {
        Nfa::from_ast(self)
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::Char(c) => write!(f, "{c}"),
            AstNode::Group(inner) => write!(f, "Group({inner})"),
            AstNode::Unity(inner) => write!(f, "{inner}"),
            AstNode::Quality(inner, Quantifier::None) => write!(f, "{inner}"),
            AstNode::Quality(inner, Quantifier::Star) => write!(f, "ZeroOrMore({inner})"),
            AstNode::Quality(inner, Quantifier::Plus) => write!(f, "OneOrMore({inner})"),
            AstNode::Concat(children) => {
                write!(f, "Concat(")?;
                for (i, c) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{c}")?;
                }
                write!(f, ")")
            }
            AstNode::Disj(children) => {
                write!(f, "Disj(")?;
                for (i, c) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{c}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A structural parse failure. Raised only by the top-level [`parse`] entry point and by
/// [`Group::from_cursor`]-style productions where "no match" isn't a legitimate outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `(` was consumed with no matching `)`.
    #[error("unclosed group: expected ')'")]
    UnclosedGroup,
    /// The top-level `Disj` succeeded, but the cursor isn't at end of input.
    #[error("unexpected trailing input")]
    TrailingInput,
    /// A `|` was followed by nothing parseable as a `Concat`.
    #[error("expected an alternative after '|'")]
    EmptyAlternative,
    /// The top-level `Disj` matched nothing at all.
    #[error("empty input")]
    EmptyInput,
}

/// The three-way result of attempting to parse a single grammar production.
enum ParseOutcome<T> {
    Matched(T),
    NoMatch,
    Error(ParseError),
}

use ParseOutcome::{Error, Matched, NoMatch};

/// Parses `source` as a `Disj` and requires the whole string to be consumed.
pub fn parse(source: &str) -> Result<AstNode, ParseError> {
    let chars: Vec<char> = source.chars().collect();
    let mut cursor = Cursor::new(&chars);
    match disj(&mut cursor) {
        Matched(node) => {
            if cursor.is_eof() {
                Ok(node)
            } else {
                Err(ParseError::TrailingInput)
            }
        }
        NoMatch => Err(ParseError::EmptyInput),
        Error(e) => Err(e),
    }
}

/// `Char := [A-Za-z0-9]`. Never consumes on failure.
fn char_node(cur: &mut Cursor) -> ParseOutcome<AstNode> {
    match cur.pop() {
        Some(c) if c.is_ascii_alphanumeric() => Matched(AstNode::Char(c)),
        Some(_) => {
            cur.push_back();
            NoMatch
        }
        None => NoMatch,
    }
}

/// `Group := '(' Disj ')'`. The inner `Disj` must succeed once `(` is seen; a missing `)` is a
/// hard error, not a "no match".
fn group(cur: &mut Cursor) -> ParseOutcome<AstNode> {
    if !cur.pop_if('(') {
        return NoMatch;
    }
    let inner = match disj(cur) {
        Matched(node) => node,
        NoMatch => return Error(ParseError::UnclosedGroup),
        Error(e) => return Error(e),
    };
    if cur.pop_if(')') {
        Matched(AstNode::Group(Box::new(inner)))
    } else {
        Error(ParseError::UnclosedGroup)
    }
}

/// `Unity := Char | Group`.
fn unity(cur: &mut Cursor) -> ParseOutcome<AstNode> {
    if cur.peek() == Some('(') {
        match group(cur) {
            Matched(node) => Matched(AstNode::Unity(Box::new(node))),
            NoMatch => NoMatch,
            Error(e) => Error(e),
        }
    } else {
        match char_node(cur) {
            Matched(node) => Matched(AstNode::Unity(Box::new(node))),
            NoMatch => NoMatch,
            Error(e) => Error(e),
        }
    }
}

/// `Quality := Unity ('*' | '+')?`.
fn quality(cur: &mut Cursor) -> ParseOutcome<AstNode> {
    let inner = match unity(cur) {
        Matched(node) => node,
        NoMatch => return NoMatch,
        Error(e) => return Error(e),
    };
    let quantifier = if cur.pop_if('*') {
        Quantifier::Star
    } else if cur.pop_if('+') {
        Quantifier::Plus
    } else {
        Quantifier::None
    };
    Matched(AstNode::Quality(Box::new(inner), quantifier))
}

/// `Concat := Quality+`. Parses greedily until a `Quality` fails to match.
fn concat(cur: &mut Cursor) -> ParseOutcome<AstNode> {
    let mut children = Vec::new();
    loop {
        match quality(cur) {
            Matched(node) => children.push(node),
            NoMatch => break,
            Error(e) => return Error(e),
        }
    }
    if children.is_empty() {
        NoMatch
    } else {
        Matched(AstNode::Concat(children))
    }
}

/// `Disj := Concat ('|' Concat)*`.
///
/// A trailing `|` (one not followed by a parseable `Concat`) is rejected with
/// [`ParseError::EmptyAlternative`] rather than silently treated as end-of-alternation — see
/// `DESIGN.md` for the reasoning.
fn disj(cur: &mut Cursor) -> ParseOutcome<AstNode> {
    let mut children = Vec::new();
    match concat(cur) {
        Matched(node) => children.push(node),
        NoMatch => return NoMatch,
        Error(e) => return Error(e),
    }
    while cur.pop_if('|') {
        match concat(cur) {
            Matched(node) => children.push(node),
            NoMatch => return Error(ParseError::EmptyAlternative),
            Error(e) => return Error(e),
        }
    }
    Matched(AstNode::Disj(children))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(node: &AstNode, out: &mut Vec<char>) {
        match node {
            AstNode::Char(c) => out.push(*c),
            AstNode::Group(inner) | AstNode::Unity(inner) | AstNode::Quality(inner, _) => {
                leaves(inner, out)
            }
            AstNode::Concat(children) | AstNode::Disj(children) => {
                children.iter().for_each(|c| leaves(c, out))
            }
        }
    }

    #[test]
    fn single_char() {
        let ast = parse("a").unwrap();
        assert_eq!(ast, AstNode::Disj(vec![AstNode::Concat(vec![AstNode::Quality(
            Box::new(AstNode::Unity(Box::new(AstNode::Char('a')))),
            Quantifier::None,
        )])]));
    }

    #[test]
    fn leftmost_char_traversal_reproduces_alnum_source() {
        for s in ["a", "ab*cd*", "a(bc|d)*", "z+(a|b)", "a|(bc)+d"] {
            let ast = parse(s).unwrap();
            let mut out = Vec::new();
            leaves(&ast, &mut out);
            let expected: Vec<char> = s.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
            assert_eq!(out, expected, "mismatch for {s}");
        }
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(parse(""), Err(ParseError::EmptyInput));
    }

    #[test]
    fn unclosed_group_is_an_error() {
        assert_eq!(parse("("), Err(ParseError::UnclosedGroup));
        assert_eq!(parse("(a"), Err(ParseError::UnclosedGroup));
    }

    #[test]
    fn trailing_input_is_an_error() {
        assert_eq!(parse("a)"), Err(ParseError::TrailingInput));
        assert_eq!(parse("a#"), Err(ParseError::TrailingInput));
    }

    #[test]
    fn trailing_pipe_is_an_empty_alternative_error() {
        assert_eq!(parse("a|"), Err(ParseError::EmptyAlternative));
        assert_eq!(parse("a**"), Err(ParseError::TrailingInput));
    }

    #[test]
    fn disjunction_and_grouping_parse() {
        assert!(parse("a|b").is_ok());
        assert!(parse("a(bc|d)*").is_ok());
        assert!(parse("z+(a|b)").is_ok());
        assert!(parse("a|(bc)+d").is_ok());
    }
}
