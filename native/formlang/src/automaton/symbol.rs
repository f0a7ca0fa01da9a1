//! Symbol types for automata transitions.

use std::borrow::Borrow;
use std::fmt;

/// Glyph used when rendering epsilon transitions and empty right-hand sides.
pub const EPSILON_GLYPH: &str = "ε";

/// A symbol identifier: the index of a symbol in an automaton's sorted
/// alphabet. The special value `EPSILON` represents an epsilon (empty)
/// transition.
pub type SymbolId = u32;

/// Special symbol ID representing epsilon (empty) transitions.
/// We use u32::MAX as the epsilon marker.
pub const EPSILON: SymbolId = u32::MAX;

/// Check if a symbol id is an epsilon transition.
#[inline]
pub fn is_epsilon(symbol: SymbolId) -> bool {
    symbol == EPSILON
}

/// An opaque label naming a terminal or a nonterminal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the symbol's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

// Lets alphabets keyed by `Symbol` be probed with a plain `&str`.
impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The label of a transition edge: either an input symbol or epsilon.
///
/// Epsilon sorts before every symbol.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    Epsilon,
    Symbol(Symbol),
}

impl Label {
    /// Create a label for the symbol `name`.
    pub fn symbol(name: impl Into<Symbol>) -> Self {
        Label::Symbol(name.into())
    }

    /// Check if this is the epsilon label.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Label::Epsilon)
    }

    /// The labelled symbol, or `None` for epsilon.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Label::Epsilon => None,
            Label::Symbol(symbol) => Some(symbol),
        }
    }
}

impl From<Symbol> for Label {
    fn from(symbol: Symbol) -> Self {
        Label::Symbol(symbol)
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Label::Symbol(name.into())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Epsilon => f.write_str(EPSILON_GLYPH),
            Label::Symbol(symbol) => symbol.fmt(f),
        }
    }
}
