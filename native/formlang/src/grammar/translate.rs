//! Conversion between right-linear grammars and finite automata.

use crate::automaton::{EPSILON, Automaton, Label, State, StateId, Symbol, TransitionSpec};
use crate::error::{FormlangError, Result};
use crate::grammar::{Grammar, Production};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Build the automaton of a right-linear grammar.
///
/// Every nonterminal becomes a state, plus [`State::Accept`] as the only
/// final state. Each production adds one edge:
///
/// | production | edge |
/// |---|---|
/// | `A → ε` | `A --ε--> Accept` |
/// | `A → a` | `A --a--> Accept` |
/// | `A → a B` | `A --a--> B` |
///
/// Any other production shape is rejected with
/// [`FormlangError::NotRightLinear`].
pub fn grammar_to_automaton(grammar: &Grammar) -> Result<Automaton> {
    debug!(
        productions = grammar.productions().len(),
        "translating grammar to automaton"
    );

    let mut transitions = TransitionSpec::new();
    for (index, production) in grammar.productions().iter().enumerate() {
        let not_right_linear = || FormlangError::NotRightLinear {
            index,
            production: production.clone(),
        };

        let [lhs] = production.lhs.as_slice() else {
            return Err(not_right_linear());
        };
        if !grammar.is_nonterminal(lhs) {
            return Err(not_right_linear());
        }

        let (label, destination) = match production.rhs.as_slice() {
            [] => (Label::Epsilon, State::Accept),
            [terminal] if grammar.is_terminal(terminal) => {
                (Label::Symbol(terminal.clone()), State::Accept)
            }
            [terminal, next] if grammar.is_terminal(terminal) && grammar.is_nonterminal(next) => {
                (Label::Symbol(terminal.clone()), State::Named(next.clone()))
            }
            _ => return Err(not_right_linear()),
        };

        transitions
            .entry((State::Named(lhs.clone()), label))
            .or_default()
            .insert(destination);
    }

    let states: BTreeSet<State> = grammar
        .nonterminals()
        .iter()
        .cloned()
        .map(State::Named)
        .chain([State::Accept])
        .collect();
    let finals = BTreeSet::from([State::Accept]);
    let initial = State::Named(grammar.start().clone());

    let automaton =
        Automaton::from_parts(&states, grammar.terminals(), &transitions, &initial, &finals);
    debug!(
        states = automaton.num_states(),
        transitions = automaton.num_transitions(),
        "grammar translated"
    );
    Ok(automaton)
}

/// Read an automaton back as a right-linear grammar.
///
/// States other than [`State::Accept`] become nonterminals, the alphabet
/// becomes the terminals and the initial state the start symbol. For a state
/// `p` and every edge `q --a--> r` with `q` in the epsilon closure of `p`:
///
/// - `p → a` is emitted when `r` reaches a final state through epsilon edges;
/// - `p → a r` is emitted when `r` is not the accepting sentinel and is
///   either non-final or has edges of its own.
///
/// `start → ε` is added when the initial state's closure is final. Fails
/// with [`FormlangError::InvalidGrammar`] when two states share a name (a
/// named `Q0` next to the subset state `Q0`) or a state is named like a
/// terminal.
pub fn automaton_to_grammar(automaton: &Automaton) -> Result<Grammar> {
    let accept = automaton.state_id(&State::Accept);
    let finals = automaton.final_set();
    let name = |id: StateId| automaton.state(id).to_symbol();
    let reaches_final = |id: StateId| automaton.closure_of(id).intersects(finals);
    let has_continuation = |id: StateId| {
        automaton
            .closure_of(id)
            .iter()
            .any(|q| automaton.outgoing(q).any(|(symbol, _)| symbol != EPSILON))
    };

    let start = automaton.initial_state().to_symbol();
    let mut nonterminals = BTreeSet::new();
    for state in automaton.states().filter(|state| **state != State::Accept) {
        let symbol = state.to_symbol();
        if !nonterminals.insert(symbol.clone()) {
            return Err(FormlangError::InvalidGrammar(format!(
                "more than one state is named `{symbol}`"
            )));
        }
    }
    nonterminals.insert(start.clone());
    let terminals: BTreeSet<Symbol> = automaton.alphabet().cloned().collect();

    let mut productions = Vec::new();
    let mut seen = HashSet::new();
    let mut emit = |production: Production| {
        if seen.insert(production.clone()) {
            productions.push(production);
        }
    };

    for p in 0..automaton.num_states() as StateId {
        if Some(p) == accept {
            continue;
        }
        for q in automaton.closure_of(p).iter() {
            for (symbol, r) in automaton.outgoing(q) {
                let Some(terminal) = automaton.symbol(symbol) else {
                    continue;
                };
                if reaches_final(r) {
                    emit(Production::new([name(p)], [terminal.clone()]));
                }
                if Some(r) != accept && (!reaches_final(r) || has_continuation(r)) {
                    emit(Production::new([name(p)], [terminal.clone(), name(r)]));
                }
            }
        }
    }
    if reaches_final(automaton.initial_id()) {
        emit(Production::epsilon(start.clone()));
    }

    Grammar::new(terminals, nonterminals, start, productions)
}

impl Automaton {
    /// Read this automaton back as a grammar. See [`automaton_to_grammar`].
    pub fn to_grammar(&self) -> Result<Grammar> {
        automaton_to_grammar(self)
    }
}
