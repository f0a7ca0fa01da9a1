//! Finite automata, right-linear grammars and Chomsky classification.
//!
//! - [`automaton`] -- epsilon-NFAs, membership testing, subset construction,
//!   minimization and random word sampling
//! - [`grammar`] -- grammars, grammar/automaton translation and
//!   classification
//! - [`error`] -- the shared error type

pub mod automaton;
pub mod error;
pub mod grammar;
#[cfg(feature = "python")]
mod python_bindings;

pub use automaton::{Automaton, AutomatonBuilder, Label, State, Symbol};
pub use error::{FormlangError, Result};
pub use grammar::{ChomskyClass, Grammar, Production, classify};
