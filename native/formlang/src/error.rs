//! Error type shared by automaton construction and grammar translation.

use crate::automaton::{State, Symbol};
use crate::grammar::Production;

/// Errors raised while building automata and grammars or translating
/// between them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormlangError {
    #[error("automaton has no initial state")]
    MissingInitialState,
    #[error("state `{0}` is not declared")]
    UnknownState(State),
    #[error("symbol `{0}` is not declared")]
    UnknownSymbol(Symbol),
    #[error("invalid grammar: {0}")]
    InvalidGrammar(String),
    #[error("production #{index} ({production}) is not right-linear")]
    NotRightLinear { index: usize, production: Production },
}

pub type Result<T> = std::result::Result<T, FormlangError>;
