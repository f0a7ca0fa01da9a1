//! State types for automata.

use crate::automaton::symbol::Symbol;
use fixedbitset::FixedBitSet;
use std::fmt;

/// Rendering of the translator's synthetic accepting state.
pub const ACCEPT_NAME: &str = "X";

/// A state identifier: the index of a state in an automaton's sorted state
/// table.
pub type StateId = u32;

/// A state of an automaton.
///
/// `Named` states come from the caller (grammar nonterminals, hand-built
/// automata). `Accept` is the accepting state invented by the grammar
/// translator and can never be confused with a named state, even one spelled
/// `X`. `Subset(n)` is the n-th state discovered by subset construction (or
/// the n-th class produced by minimization) and renders as `Qn`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    Named(Symbol),
    Accept,
    Subset(u32),
}

impl State {
    /// Create a state named by the caller.
    pub fn named(name: impl Into<Symbol>) -> Self {
        State::Named(name.into())
    }

    /// The symbol this state becomes when the automaton is read back as a
    /// grammar.
    pub fn to_symbol(&self) -> Symbol {
        match self {
            State::Named(symbol) => symbol.clone(),
            other => Symbol::new(other.to_string()),
        }
    }
}

impl From<&str> for State {
    fn from(name: &str) -> Self {
        State::Named(name.into())
    }
}

impl From<Symbol> for State {
    fn from(symbol: Symbol) -> Self {
        State::Named(symbol)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Named(symbol) => symbol.fmt(f),
            State::Accept => f.write_str(ACCEPT_NAME),
            State::Subset(n) => write!(f, "Q{n}"),
        }
    }
}

/// A set of state ids backed by a bit set that grows on demand.
///
/// Equality ignores the capacity of the underlying bit set.
#[derive(Clone, Default)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// An empty set sized for `capacity` states.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Insert a state, returning `true` if it was not already present.
    pub fn insert(&mut self, state: StateId) -> bool {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        !self.bits.put(idx)
    }

    /// Check if a state is in the set.
    pub fn contains(&self, state: StateId) -> bool {
        self.bits.contains(state as usize)
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Get the number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over the members in increasing id order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    /// Add every member of `other` to this set.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// Check if the two sets share at least one state.
    pub fn intersects(&self, other: &StateSet) -> bool {
        !self.bits.is_disjoint(&other.bits)
    }

    /// Members of `self` that are also in `other`.
    pub fn intersection(&self, other: &StateSet) -> StateSet {
        self.bits
            .intersection(&other.bits)
            .map(|i| i as StateId)
            .collect()
    }

    /// Members of `self` that are not in `other`.
    pub fn difference(&self, other: &StateSet) -> StateSet {
        self.bits
            .difference(&other.bits)
            .map(|i| i as StateId)
            .collect()
    }

    /// Sorted member ids, used as the canonical key of a subset.
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for StateSet {}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::default();
        for state in iter {
            set.insert(state);
        }
        set
    }
}
