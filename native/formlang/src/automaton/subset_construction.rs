//! Subset construction algorithm for converting an ε-NFA to a DFA.

use crate::automaton::finite::{Automaton, TransitionSpec};
use crate::automaton::state::{State, StateId};
use crate::automaton::symbol::Label;
use indexmap::IndexMap;
use std::collections::{BTreeSet, VecDeque};
use tracing::{debug, trace};

/// The result of [`subset_construction`]: the deterministic automaton and,
/// for each of its states, the source states it stands for.
#[derive(Debug, Clone)]
pub struct SubsetConstruction {
    pub dfa: Automaton,
    /// `subsets[n]` lists the source states merged into `Qn`, sorted.
    pub subsets: Vec<Vec<State>>,
}

/// Convert an automaton to an equivalent deterministic one using the
/// powerset construction.
///
/// Subsets are named `Q0, Q1, …` in the order they are first discovered and
/// processed in that same order. Symbols are tried in sorted order, so the
/// naming is reproducible.
pub fn subset_construction(nfa: &Automaton) -> SubsetConstruction {
    // Subsets keyed by their sorted member ids; the index is the Qn number
    let mut state_mapping: IndexMap<Vec<StateId>, u32> = IndexMap::new();
    let mut worklist = VecDeque::new();
    let mut transitions = TransitionSpec::new();
    let mut finals = BTreeSet::new();

    let initial_set = nfa.closure_of(nfa.initial_id()).clone();
    debug!(
        states = nfa.num_states(),
        transitions = nfa.num_transitions(),
        "starting subset construction"
    );

    state_mapping.insert(initial_set.to_vec(), 0);
    if initial_set.intersects(nfa.final_set()) {
        finals.insert(State::Subset(0));
    }
    worklist.push_back((initial_set, 0));

    while let Some((current_set, current)) = worklist.pop_front() {
        for symbol in nfa.symbol_ids() {
            let next_set = nfa.move_on_symbol(&current_set, symbol);
            if next_set.is_empty() {
                // No transition on this symbol; the DFA stays partial
                continue;
            }

            let next_key = next_set.to_vec();
            let next = match state_mapping.get(&next_key) {
                Some(&existing) => existing,
                None => {
                    let new_state = state_mapping.len() as u32;
                    trace!(state = new_state, members = ?next_key, "discovered subset");
                    state_mapping.insert(next_key, new_state);
                    if next_set.intersects(nfa.final_set()) {
                        finals.insert(State::Subset(new_state));
                    }
                    worklist.push_back((next_set, new_state));
                    new_state
                }
            };

            if let Some(symbol) = nfa.symbol(symbol) {
                transitions
                    .entry((State::Subset(current), Label::Symbol(symbol.clone())))
                    .or_default()
                    .insert(State::Subset(next));
            }
        }
    }

    let subsets: Vec<Vec<State>> = state_mapping
        .keys()
        .map(|members| members.iter().map(|&id| nfa.state(id).clone()).collect())
        .collect();
    let states: BTreeSet<State> = (0..subsets.len() as u32).map(State::Subset).collect();
    let alphabet = nfa.alphabet().cloned().collect();

    debug!(states = subsets.len(), "finished subset construction");

    let dfa = Automaton::from_parts(&states, &alphabet, &transitions, &State::Subset(0), &finals);

    SubsetConstruction { dfa, subsets }
}

impl Automaton {
    /// Determinize via [`subset_construction`].
    pub fn to_dfa(&self) -> Automaton {
        subset_construction(self).dfa
    }
}
