//! DFA minimization by Hopcroft-style partition refinement.

use crate::automaton::finite::{Automaton, TransitionSpec};
use crate::automaton::state::{State, StateId, StateSet};
use crate::automaton::symbol::{Label, SymbolId, is_epsilon};
use std::collections::{BTreeSet, HashMap, VecDeque};
use tracing::debug;

/// A complete transition function over a DFA plus one implicit sink state,
/// which absorbs every missing transition.
struct Completed {
    /// `delta[state][symbol]`; the sink is the last state
    delta: Vec<Vec<StateId>>,
    /// Reverse transitions: (destination, symbol) -> set of sources
    reverse: HashMap<(StateId, SymbolId), StateSet>,
    num_symbols: usize,
}

impl Completed {
    fn new(dfa: &Automaton) -> Self {
        let num_symbols = dfa.symbol_ids().count();
        let sink = dfa.num_states() as StateId;
        let num_states = sink as usize + 1;

        let mut delta = vec![vec![sink; num_symbols]; num_states];
        for (src, sym, dst) in dfa.edges() {
            if !is_epsilon(sym) {
                delta[src as usize][sym as usize] = dst;
            }
        }

        let mut reverse: HashMap<(StateId, SymbolId), StateSet> = HashMap::new();
        for (src, row) in delta.iter().enumerate() {
            for (sym, &dst) in row.iter().enumerate() {
                reverse
                    .entry((dst, sym as SymbolId))
                    .or_insert_with(|| StateSet::with_capacity(num_states))
                    .insert(src as StateId);
            }
        }

        Self {
            delta,
            reverse,
            num_symbols,
        }
    }

    fn symbols(&self) -> impl Iterator<Item = SymbolId> + '_ {
        (0..self.num_symbols).map(|s| s as SymbolId)
    }

    fn next(&self, state: StateId, symbol: SymbolId) -> StateId {
        self.delta[state as usize][symbol as usize]
    }

    /// Find all states reachable from `start`.
    fn reachable_from(&self, start: StateId) -> StateSet {
        let mut reachable = StateSet::with_capacity(self.delta.len());
        let mut queue = VecDeque::from([start]);

        while let Some(state) = queue.pop_front() {
            if !reachable.insert(state) {
                continue;
            }
            for symbol in self.symbols() {
                let next = self.next(state, symbol);
                if !reachable.contains(next) {
                    queue.push_back(next);
                }
            }
        }

        reachable
    }

    /// Find all states that reach `targets` on `symbol`.
    fn predecessors(&self, targets: &StateSet, symbol: SymbolId) -> StateSet {
        let mut predecessors = StateSet::with_capacity(self.delta.len());
        for target in targets.iter() {
            if let Some(sources) = self.reverse.get(&(target, symbol)) {
                predecessors.union_with(sources);
            }
        }
        predecessors
    }
}

/// Refine {final, non-final} until every block is stable with respect to
/// every other block, restricted to `reachable`.
fn refine(completed: &Completed, reachable: &StateSet, finals: &StateSet) -> Vec<StateSet> {
    let mut partitions: Vec<StateSet> = [
        reachable.intersection(finals),
        reachable.difference(finals),
    ]
    .into_iter()
    .filter(|block| !block.is_empty())
    .collect();

    let mut worklist: VecDeque<(usize, SymbolId)> = (0..partitions.len())
        .flat_map(|idx| completed.symbols().map(move |sym| (idx, sym)))
        .collect();

    while let Some((splitter_idx, symbol)) = worklist.pop_front() {
        let predecessors = completed.predecessors(&partitions[splitter_idx], symbol);
        if predecessors.is_empty() {
            continue;
        }

        let mut splits = Vec::new();
        for (part_idx, partition) in partitions.iter().enumerate() {
            let inside = partition.intersection(&predecessors);
            let outside = partition.difference(&predecessors);
            if !inside.is_empty() && !outside.is_empty() {
                splits.push((part_idx, inside, outside));
            }
        }

        for (part_idx, inside, outside) in splits {
            let new_idx = partitions.len();
            partitions[part_idx] = inside;
            partitions.push(outside);

            // Both halves changed, so both must act as splitters again
            for sym in completed.symbols() {
                worklist.push_back((part_idx, sym));
                worklist.push_back((new_idx, sym));
            }
        }
    }

    partitions
}

/// Minimize an automaton, determinizing it first if needed.
///
/// Dead and unreachable states are removed, so the result may be partial.
/// Classes are renamed `Q0, Q1, …` in breadth-first order from the initial
/// class, trying symbols in sorted order.
pub fn minimize(automaton: &Automaton) -> Automaton {
    let determinized;
    let dfa = if automaton.is_deterministic() && !automaton.has_epsilon_transitions() {
        automaton
    } else {
        determinized = automaton.to_dfa();
        &determinized
    };

    let completed = Completed::new(dfa);
    let reachable = completed.reachable_from(dfa.initial_id());
    let partitions = refine(&completed, &reachable, dfa.final_set());

    let mut class_of: HashMap<StateId, usize> = HashMap::new();
    for (class, partition) in partitions.iter().enumerate() {
        for state in partition.iter() {
            class_of.insert(state, class);
        }
    }
    let final_class = |class: usize| partitions[class].intersects(dfa.final_set());
    let class_next = |class: usize, symbol: SymbolId| -> Option<usize> {
        let representative = partitions[class].iter().next()?;
        class_of.get(&completed.next(representative, symbol)).copied()
    };

    // A class is live when some final class is reachable from it
    let mut live: Vec<bool> = (0..partitions.len()).map(final_class).collect();
    let mut changed = true;
    while changed {
        changed = false;
        for class in 0..partitions.len() {
            if !live[class]
                && completed
                    .symbols()
                    .any(|s| class_next(class, s).is_some_and(|n| live[n]))
            {
                live[class] = true;
                changed = true;
            }
        }
    }

    // Rename live classes in breadth-first order from the initial class
    let initial_class = class_of.get(&dfa.initial_id()).copied().unwrap_or_default();
    let mut renamed: HashMap<usize, u32> = HashMap::from([(initial_class, 0)]);
    let mut queue = VecDeque::from([initial_class]);
    let mut transitions = TransitionSpec::new();
    let mut finals = BTreeSet::new();

    while let Some(class) = queue.pop_front() {
        let name = renamed[&class];
        if final_class(class) {
            finals.insert(State::Subset(name));
        }
        for symbol in completed.symbols() {
            let Some(next) = class_next(class, symbol).filter(|&n| live[n]) else {
                continue;
            };
            let next_name = match renamed.get(&next) {
                Some(&existing) => existing,
                None => {
                    let fresh = renamed.len() as u32;
                    renamed.insert(next, fresh);
                    queue.push_back(next);
                    fresh
                }
            };
            if let Some(symbol) = dfa.symbol(symbol) {
                transitions
                    .entry((State::Subset(name), Label::Symbol(symbol.clone())))
                    .or_default()
                    .insert(State::Subset(next_name));
            }
        }
    }

    let states: BTreeSet<State> = (0..renamed.len() as u32).map(State::Subset).collect();
    let alphabet = dfa.alphabet().cloned().collect();
    debug!(
        before = dfa.num_states(),
        after = states.len(),
        "minimized automaton"
    );

    Automaton::from_parts(&states, &alphabet, &transitions, &State::Subset(0), &finals)
}

impl Automaton {
    /// The minimal deterministic automaton recognizing the same language.
    pub fn minimize(&self) -> Automaton {
        minimize(self)
    }
}
