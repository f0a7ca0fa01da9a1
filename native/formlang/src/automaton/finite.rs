//! Finite automaton with epsilon transitions.
//!
//! States and symbols are interned in sorted order, so every id-based
//! iteration (alphabet, state table, transition table) is reproducible.

use crate::automaton::state::{State, StateId, StateSet};
use crate::automaton::symbol::{EPSILON, Label, Symbol, SymbolId, is_epsilon};
use crate::error::{FormlangError, Result};
use indexmap::{IndexMap, IndexSet};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

pub(crate) type TransitionSpec = BTreeMap<(State, Label), BTreeSet<State>>;

/// Mutable collector for the parts of an [`Automaton`].
///
/// Transition endpoints, the initial state and final states are registered as
/// states when added. Transition labels must be declared with
/// [`add_symbol`](Self::add_symbol) before [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    states: BTreeSet<State>,
    alphabet: BTreeSet<Symbol>,
    transitions: TransitionSpec,
    initial: Option<State>,
    finals: BTreeSet<State>,
}

impl AutomatonBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a state, e.g. one without any transitions.
    pub fn add_state(&mut self, state: impl Into<State>) -> &mut Self {
        self.states.insert(state.into());
        self
    }

    /// Add a symbol to the alphabet.
    pub fn add_symbol(&mut self, symbol: impl Into<Symbol>) -> &mut Self {
        self.alphabet.insert(symbol.into());
        self
    }

    /// Add a transition from `source` to `destination` on `label`.
    pub fn add_transition(
        &mut self,
        source: impl Into<State>,
        label: impl Into<Label>,
        destination: impl Into<State>,
    ) -> &mut Self {
        let source = source.into();
        let destination = destination.into();
        self.states.insert(source.clone());
        self.states.insert(destination.clone());
        self.transitions
            .entry((source, label.into()))
            .or_default()
            .insert(destination);
        self
    }

    /// Add an epsilon transition from `source` to `destination`.
    pub fn add_epsilon_transition(
        &mut self,
        source: impl Into<State>,
        destination: impl Into<State>,
    ) -> &mut Self {
        self.add_transition(source, Label::Epsilon, destination)
    }

    /// Set the initial state, replacing any previous one.
    pub fn set_initial_state(&mut self, state: impl Into<State>) -> &mut Self {
        let state = state.into();
        self.states.insert(state.clone());
        self.initial = Some(state);
        self
    }

    /// Mark a state as final.
    pub fn add_final_state(&mut self, state: impl Into<State>) -> &mut Self {
        let state = state.into();
        self.states.insert(state.clone());
        self.finals.insert(state);
        self
    }

    /// Assemble the automaton.
    ///
    /// Fails if no initial state was set or a transition uses a symbol
    /// missing from the alphabet.
    pub fn build(&self) -> Result<Automaton> {
        let initial = self
            .initial
            .as_ref()
            .ok_or(FormlangError::MissingInitialState)?;
        for (_, label) in self.transitions.keys() {
            if let Label::Symbol(symbol) = label {
                if !self.alphabet.contains(symbol) {
                    return Err(FormlangError::UnknownSymbol(symbol.clone()));
                }
            }
        }
        Ok(Automaton::from_parts(
            &self.states,
            &self.alphabet,
            &self.transitions,
            initial,
            &self.finals,
        ))
    }
}

/// An immutable finite automaton, possibly nondeterministic and possibly
/// with epsilon transitions.
#[derive(Debug, Clone)]
pub struct Automaton {
    /// State table, sorted; a state's id is its index
    states: IndexSet<State>,
    /// Alphabet, sorted; a symbol's id is its index
    alphabet: IndexSet<Symbol>,
    /// (source, symbol) -> destinations, sorted by key. Epsilon edges use
    /// `EPSILON` and therefore come last for each source.
    transitions: IndexMap<(StateId, SymbolId), StateSet>,
    initial: StateId,
    final_states: StateSet,
    /// Epsilon closure of every single state, indexed by state id
    epsilon_closures: Vec<StateSet>,
}

impl Automaton {
    /// Build an automaton from already assembled parts.
    ///
    /// Every transition endpoint, the initial state and every final state
    /// must appear in `states`, and every non-epsilon label in `alphabet`.
    pub fn new<T, D>(
        states: impl IntoIterator<Item = State>,
        alphabet: impl IntoIterator<Item = Symbol>,
        transitions: T,
        initial_state: State,
        final_states: impl IntoIterator<Item = State>,
    ) -> Result<Self>
    where
        T: IntoIterator<Item = ((State, Label), D)>,
        D: IntoIterator<Item = State>,
    {
        let states: BTreeSet<State> = states.into_iter().collect();
        let alphabet: BTreeSet<Symbol> = alphabet.into_iter().collect();
        let declared = |state: &State| -> Result<()> {
            if states.contains(state) {
                Ok(())
            } else {
                Err(FormlangError::UnknownState(state.clone()))
            }
        };

        declared(&initial_state)?;
        let mut finals = BTreeSet::new();
        for state in final_states {
            declared(&state)?;
            finals.insert(state);
        }

        let mut table = TransitionSpec::new();
        for ((source, label), destinations) in transitions {
            declared(&source)?;
            if let Label::Symbol(symbol) = &label {
                if !alphabet.contains(symbol) {
                    return Err(FormlangError::UnknownSymbol(symbol.clone()));
                }
            }
            let entry = table.entry((source, label)).or_default();
            for destination in destinations {
                declared(&destination)?;
                entry.insert(destination);
            }
        }

        Ok(Self::from_parts(&states, &alphabet, &table, &initial_state, &finals))
    }

    /// Assign dense ids to already validated parts.
    pub(crate) fn from_parts(
        states: &BTreeSet<State>,
        alphabet: &BTreeSet<Symbol>,
        transitions: &TransitionSpec,
        initial: &State,
        finals: &BTreeSet<State>,
    ) -> Self {
        let states: IndexSet<State> = states.iter().cloned().collect();
        let alphabet: IndexSet<Symbol> = alphabet.iter().cloned().collect();
        let num_states = states.len();
        let id_of = |state: &State| states.get_index_of(state).unwrap_or_default() as StateId;

        let mut table: IndexMap<(StateId, SymbolId), StateSet> = IndexMap::new();
        for ((source, label), destinations) in transitions {
            if destinations.is_empty() {
                continue;
            }
            let symbol = match label {
                Label::Epsilon => EPSILON,
                Label::Symbol(symbol) => {
                    alphabet.get_index_of(symbol).unwrap_or_default() as SymbolId
                }
            };
            let entry = table
                .entry((id_of(source), symbol))
                .or_insert_with(|| StateSet::with_capacity(num_states));
            for destination in destinations {
                entry.insert(id_of(destination));
            }
        }
        table.sort_keys();

        let initial = id_of(initial);
        let final_states = finals.iter().map(id_of).collect();
        let mut automaton = Self {
            initial,
            states,
            alphabet,
            transitions: table,
            final_states,
            epsilon_closures: Vec::new(),
        };
        automaton.epsilon_closures = (0..num_states as StateId)
            .map(|state| automaton.epsilon_closure_single(state))
            .collect();
        automaton
    }

    /// Compute the epsilon closure of a single state with an explicit stack.
    fn epsilon_closure_single(&self, state: StateId) -> StateSet {
        let mut closure = StateSet::with_capacity(self.states.len());
        let mut stack = vec![state];

        while let Some(s) = stack.pop() {
            if !closure.insert(s) {
                continue;
            }
            if let Some(destinations) = self.transitions.get(&(s, EPSILON)) {
                stack.extend(destinations.iter().filter(|&d| !closure.contains(d)));
            }
        }

        closure
    }

    // -- accessors --

    /// All states in sorted order.
    pub fn states(&self) -> impl ExactSizeIterator<Item = &State> + '_ {
        self.states.iter()
    }

    /// The alphabet in sorted order.
    pub fn alphabet(&self) -> impl ExactSizeIterator<Item = &Symbol> + '_ {
        self.alphabet.iter()
    }

    /// Get the initial state.
    pub fn initial_state(&self) -> &State {
        self.state(self.initial)
    }

    /// Final states in sorted order.
    pub fn final_states(&self) -> impl Iterator<Item = &State> + '_ {
        self.final_states.iter().map(|id| self.state(id))
    }

    /// Check if `state` is a final state. Undeclared states are not.
    pub fn is_final(&self, state: &State) -> bool {
        self.state_id(state)
            .is_some_and(|id| self.final_states.contains(id))
    }

    /// Get the number of states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Number of individual edges.
    pub fn num_transitions(&self) -> usize {
        self.transitions.values().map(StateSet::len).sum()
    }

    /// Every edge as `(source, label, destination)`, ordered by source, then
    /// symbol with epsilon last, then destination. A `None` label is an
    /// epsilon edge.
    pub fn transitions(&self) -> impl Iterator<Item = (&State, Option<&Symbol>, &State)> + '_ {
        self.edges()
            .map(|(src, sym, dst)| (self.state(src), self.symbol(sym), self.state(dst)))
    }

    /// Destinations of `source` on `label`, in sorted order.
    pub fn successors(&self, source: &State, label: &Label) -> Vec<&State> {
        let (Some(source), Some(symbol)) = (self.state_id(source), self.label_id(label)) else {
            return Vec::new();
        };
        self.transitions
            .get(&(source, symbol))
            .map(|destinations| destinations.iter().map(|id| self.state(id)).collect())
            .unwrap_or_default()
    }

    // -- id plumbing shared with the algorithms in sibling modules --

    pub(crate) fn state(&self, id: StateId) -> &State {
        &self.states[id as usize]
    }

    pub(crate) fn state_id(&self, state: &State) -> Option<StateId> {
        self.states.get_index_of(state).map(|i| i as StateId)
    }

    /// The symbol for `id`, or `None` for epsilon.
    pub(crate) fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        if is_epsilon(id) {
            None
        } else {
            self.alphabet.get_index(id as usize)
        }
    }

    pub(crate) fn symbol_ids(&self) -> impl Iterator<Item = SymbolId> + '_ {
        (0..self.alphabet.len()).map(|i| i as SymbolId)
    }

    fn label_id(&self, label: &Label) -> Option<SymbolId> {
        match label {
            Label::Epsilon => Some(EPSILON),
            Label::Symbol(symbol) => self.alphabet.get_index_of(symbol).map(|i| i as SymbolId),
        }
    }

    pub(crate) fn initial_id(&self) -> StateId {
        self.initial
    }

    pub(crate) fn final_set(&self) -> &StateSet {
        &self.final_states
    }

    /// Every edge as `(source, symbol, destination)` ids, in table order.
    pub(crate) fn edges(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |dst| (src, sym, dst)))
    }

    /// Edges leaving `source`, in table order.
    pub(crate) fn outgoing(&self, source: StateId) -> impl Iterator<Item = (SymbolId, StateId)> + '_ {
        self.edges()
            .filter(move |&(src, _, _)| src == source)
            .map(|(_, sym, dst)| (sym, dst))
    }

    /// Epsilon closure of a set of state ids.
    pub(crate) fn closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.states.len());
        for state in states.iter() {
            if let Some(single) = self.epsilon_closures.get(state as usize) {
                closure.union_with(single);
            }
        }
        closure
    }

    pub(crate) fn closure_of(&self, state: StateId) -> &StateSet {
        &self.epsilon_closures[state as usize]
    }

    /// The epsilon closure of the states reachable from `states` on `symbol`.
    pub(crate) fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        debug_assert!(!is_epsilon(symbol), "use closure for epsilon moves");

        let mut reached = StateSet::with_capacity(self.states.len());
        for state in states.iter() {
            if let Some(destinations) = self.transitions.get(&(state, symbol)) {
                reached.union_with(destinations);
            }
        }
        self.closure(&reached)
    }

    // -- queries --

    /// Epsilon closure of the given states, sorted. Undeclared states are
    /// ignored.
    pub fn epsilon_closure<'a>(&self, states: impl IntoIterator<Item = &'a State>) -> Vec<&State> {
        let seed: StateSet = states
            .into_iter()
            .filter_map(|state| self.state_id(state))
            .collect();
        self.closure(&seed).iter().map(|id| self.state(id)).collect()
    }

    /// Test whether the automaton accepts `input`, reading one symbol per
    /// `char`.
    ///
    /// The simulation tracks every active state at once and follows epsilon
    /// edges. A character outside the alphabet, or a step that leaves no
    /// active state, rejects immediately.
    pub fn accepts(&self, input: &str) -> bool {
        let mut buf = [0u8; 4];
        self.run(
            input
                .chars()
                .map(|c| self.alphabet.get_index_of(&*c.encode_utf8(&mut buf))),
        )
    }

    /// Like [`accepts`](Self::accepts), for input made of whole symbols.
    pub fn accepts_symbols(&self, input: &[Symbol]) -> bool {
        self.run(input.iter().map(|symbol| self.alphabet.get_index_of(symbol)))
    }

    fn run(&self, input: impl IntoIterator<Item = Option<usize>>) -> bool {
        let mut current = self.closure_of(self.initial).clone();
        for symbol in input {
            let Some(symbol) = symbol else {
                return false;
            };
            current = self.move_on_symbol(&current, symbol as SymbolId);
            if current.is_empty() {
                return false;
            }
        }
        current.intersects(&self.final_states)
    }

    /// True iff no (source, label) pair maps to more than one state.
    pub fn is_deterministic(&self) -> bool {
        self.transitions.values().all(|destinations| destinations.len() <= 1)
    }

    /// Check if any transition is labelled epsilon.
    pub fn has_epsilon_transitions(&self) -> bool {
        self.transitions.keys().any(|&(_, symbol)| is_epsilon(symbol))
    }

    /// Check if the automaton accepts no string at all, i.e. no final state
    /// is reachable from the initial state.
    pub fn is_empty(&self) -> bool {
        let mut visited = StateSet::with_capacity(self.states.len());
        let mut queue = VecDeque::from([self.initial]);

        while let Some(state) = queue.pop_front() {
            if !visited.insert(state) {
                continue;
            }
            if self.final_states.contains(state) {
                return false;
            }
            queue.extend(
                self.outgoing(state)
                    .map(|(_, dst)| dst)
                    .filter(|&dst| !visited.contains(dst)),
            );
        }

        true
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "States: {{ ")?;
        for state in self.states() {
            write!(f, "{state} ")?;
        }
        writeln!(f, "}}")?;

        write!(f, "Alphabet: {{ ")?;
        for symbol in self.alphabet() {
            write!(f, "{symbol} ")?;
        }
        writeln!(f, "}}")?;

        writeln!(f, "Initial state: {}", self.initial_state())?;

        write!(f, "Final states: {{ ")?;
        for state in self.final_states() {
            write!(f, "{state} ")?;
        }
        writeln!(f, "}}")?;

        writeln!(f, "Transitions:")?;
        for (source, symbol, destination) in self.transitions() {
            let label = symbol.map_or(Label::Epsilon, |s| Label::Symbol(s.clone()));
            writeln!(f, "  {source} --{label}--> {destination}")?;
        }
        Ok(())
    }
}
