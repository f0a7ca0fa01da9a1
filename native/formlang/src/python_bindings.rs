//! PyO3 bindings for the automaton and grammar types.
//!
//! States and symbols cross the boundary as plain strings; an epsilon label
//! is `None`.

use crate::automaton::{Automaton, Label, State, Symbol};
use crate::error::FormlangError;
use crate::grammar::{Grammar, Production};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

type PyTransition = (String, Option<String>, String);

impl From<FormlangError> for PyErr {
    fn from(err: FormlangError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// A finite automaton.
#[pyclass(name = "Automaton", module = "formlang", frozen)]
pub struct PyAutomaton {
    inner: Automaton,
}

#[pymethods]
impl PyAutomaton {
    #[new]
    fn new(
        states: Vec<String>,
        alphabet: Vec<String>,
        transitions: Vec<PyTransition>,
        initial_state: String,
        final_states: Vec<String>,
    ) -> PyResult<Self> {
        let transitions = transitions.into_iter().map(|(source, label, destination)| {
            let label = label.map_or(Label::Epsilon, Label::symbol);
            ((State::named(source), label), [State::named(destination)])
        });
        let inner = Automaton::new(
            states.into_iter().map(State::named),
            alphabet.into_iter().map(Symbol::new),
            transitions,
            State::named(initial_state),
            final_states.into_iter().map(State::named),
        )?;
        Ok(Self { inner })
    }

    #[getter]
    fn states(&self) -> Vec<String> {
        self.inner.states().map(ToString::to_string).collect()
    }

    #[getter]
    fn alphabet(&self) -> Vec<String> {
        self.inner.alphabet().map(ToString::to_string).collect()
    }

    #[getter]
    fn initial_state(&self) -> String {
        self.inner.initial_state().to_string()
    }

    #[getter]
    fn final_states(&self) -> Vec<String> {
        self.inner.final_states().map(ToString::to_string).collect()
    }

    #[getter]
    fn transitions(&self) -> Vec<PyTransition> {
        self.inner
            .transitions()
            .map(|(source, label, destination)| {
                (
                    source.to_string(),
                    label.map(ToString::to_string),
                    destination.to_string(),
                )
            })
            .collect()
    }

    fn accepts(&self, input: &str) -> bool {
        self.inner.accepts(input)
    }

    fn is_deterministic(&self) -> bool {
        self.inner.is_deterministic()
    }

    /// Check if the automaton's language is empty.
    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn to_dfa(&self) -> Self {
        Self {
            inner: self.inner.to_dfa(),
        }
    }

    fn minimize(&self) -> Self {
        Self {
            inner: self.inner.minimize(),
        }
    }

    fn to_grammar(&self) -> PyResult<PyGrammar> {
        Ok(PyGrammar {
            inner: self.inner.to_grammar()?,
        })
    }

    #[pyo3(signature = (seed=None))]
    fn sample_word(&self, seed: Option<u64>) -> String {
        self.inner.sample_word(&mut rng_from(seed))
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "Automaton(states={}, transitions={})",
            self.inner.num_states(),
            self.inner.num_transitions()
        )
    }
}

/// A formal grammar.
#[pyclass(name = "Grammar", module = "formlang", frozen)]
pub struct PyGrammar {
    inner: Grammar,
}

#[pymethods]
impl PyGrammar {
    #[new]
    fn new(
        terminals: Vec<String>,
        nonterminals: Vec<String>,
        start: String,
        productions: Vec<(Vec<String>, Vec<String>)>,
    ) -> PyResult<Self> {
        let productions = productions
            .into_iter()
            .map(|(lhs, rhs)| Production::new(lhs, rhs));
        Ok(Self {
            inner: Grammar::new(terminals, nonterminals, start, productions)?,
        })
    }

    /// The Chomsky tier, e.g. `"Type 3 (regular)"`.
    fn classify(&self) -> String {
        self.inner.classify().to_string()
    }

    fn to_automaton(&self) -> PyResult<PyAutomaton> {
        Ok(PyAutomaton {
            inner: self.inner.to_automaton()?.clone(),
        })
    }

    #[pyo3(signature = (seed=None))]
    fn generate_word(&self, seed: Option<u64>) -> PyResult<String> {
        Ok(self.inner.generate_word(&mut rng_from(seed))?)
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "Grammar(start={:?}, productions={})",
            self.inner.start().as_str(),
            self.inner.productions().len()
        )
    }
}

#[pymodule]
pub fn formlang(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAutomaton>()?;
    m.add_class::<PyGrammar>()?;
    Ok(())
}
