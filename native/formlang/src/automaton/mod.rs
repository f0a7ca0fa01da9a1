//! Finite automata.
//!
//! This module provides an epsilon-NFA representation with:
//! - Epsilon closure computation
//! - Membership testing by multi-state simulation
//! - Subset construction (NFA to DFA conversion)
//! - Hopcroft-style DFA minimization
//! - Random word sampling

mod finite;
mod minimize;
mod sample;
mod state;
mod subset_construction;
mod symbol;

pub(crate) use finite::TransitionSpec;
pub use finite::{Automaton, AutomatonBuilder};
pub use minimize::minimize;
pub use sample::MAX_SAMPLE_STEPS;
pub use state::{ACCEPT_NAME, State, StateId, StateSet};
pub use subset_construction::{SubsetConstruction, subset_construction};
pub use symbol::{EPSILON, EPSILON_GLYPH, Label, Symbol, SymbolId};
