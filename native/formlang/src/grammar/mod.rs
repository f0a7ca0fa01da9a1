//! Grammars, their translation to automata, and Chomsky classification.

mod classify;
mod translate;

pub use classify::{ChomskyClass, classify};
pub use translate::{automaton_to_grammar, grammar_to_automaton};

use crate::automaton::{Automaton, EPSILON_GLYPH, Symbol};
use crate::error::{FormlangError, Result};
use rand::Rng;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

/// A rewriting rule `lhs → rhs`. An empty `rhs` is an epsilon production.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    pub lhs: Vec<Symbol>,
    pub rhs: Vec<Symbol>,
}

impl Production {
    /// Create a production from its left- and right-hand symbols.
    pub fn new<L, R>(lhs: L, rhs: R) -> Self
    where
        L: IntoIterator,
        L::Item: Into<Symbol>,
        R: IntoIterator,
        R::Item: Into<Symbol>,
    {
        Self {
            lhs: lhs.into_iter().map(Into::into).collect(),
            rhs: rhs.into_iter().map(Into::into).collect(),
        }
    }

    /// `lhs → ε`
    pub fn epsilon(lhs: impl Into<Symbol>) -> Self {
        Self {
            lhs: vec![lhs.into()],
            rhs: Vec::new(),
        }
    }

    /// Check if the right-hand side is empty.
    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.lhs {
            write!(f, "{symbol}")?;
        }
        write!(f, " → ")?;
        if self.rhs.is_empty() {
            return f.write_str(EPSILON_GLYPH);
        }
        for symbol in &self.rhs {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

/// A formal grammar.
///
/// The equivalent automaton is derived on first use and cached for the
/// lifetime of the grammar; concurrent first uses derive it only once.
#[derive(Debug, Clone)]
pub struct Grammar {
    terminals: BTreeSet<Symbol>,
    nonterminals: BTreeSet<Symbol>,
    start: Symbol,
    productions: Vec<Production>,
    automaton: OnceLock<Result<Automaton>>,
}

impl Grammar {
    /// Create a grammar, checking that terminals and nonterminals are
    /// disjoint, that `start` is a nonterminal, and that every production
    /// has a non-empty left-hand side made of declared symbols.
    pub fn new(
        terminals: impl IntoIterator<Item = impl Into<Symbol>>,
        nonterminals: impl IntoIterator<Item = impl Into<Symbol>>,
        start: impl Into<Symbol>,
        productions: impl IntoIterator<Item = Production>,
    ) -> Result<Self> {
        let terminals: BTreeSet<Symbol> = terminals.into_iter().map(Into::into).collect();
        let nonterminals: BTreeSet<Symbol> = nonterminals.into_iter().map(Into::into).collect();
        let start = start.into();
        let productions: Vec<Production> = productions.into_iter().collect();

        if let Some(shared) = terminals.intersection(&nonterminals).next() {
            return Err(FormlangError::InvalidGrammar(format!(
                "`{shared}` is both a terminal and a nonterminal"
            )));
        }
        if !nonterminals.contains(&start) {
            return Err(FormlangError::InvalidGrammar(format!(
                "start symbol `{start}` is not a nonterminal"
            )));
        }
        for (index, production) in productions.iter().enumerate() {
            if production.lhs.is_empty() {
                return Err(FormlangError::InvalidGrammar(format!(
                    "production #{index} has an empty left-hand side"
                )));
            }
            let undeclared = production
                .lhs
                .iter()
                .chain(&production.rhs)
                .find(|symbol| !terminals.contains(*symbol) && !nonterminals.contains(*symbol));
            if let Some(symbol) = undeclared {
                return Err(FormlangError::UnknownSymbol(symbol.clone()));
            }
        }

        Ok(Self {
            terminals,
            nonterminals,
            start,
            productions,
            automaton: OnceLock::new(),
        })
    }

    /// Get the terminal symbols.
    pub fn terminals(&self) -> &BTreeSet<Symbol> {
        &self.terminals
    }

    /// Get the nonterminal symbols.
    pub fn nonterminals(&self) -> &BTreeSet<Symbol> {
        &self.nonterminals
    }

    /// Get the start symbol.
    pub fn start(&self) -> &Symbol {
        &self.start
    }

    /// Get the productions in declaration order.
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Check if `symbol` is a terminal.
    pub fn is_terminal(&self, symbol: &Symbol) -> bool {
        self.terminals.contains(symbol)
    }

    /// Check if `symbol` is a nonterminal.
    pub fn is_nonterminal(&self, symbol: &Symbol) -> bool {
        self.nonterminals.contains(symbol)
    }

    /// The automaton recognizing this grammar's language.
    ///
    /// Derived once by [`grammar_to_automaton`]; later calls, including the
    /// ones that failed, return the cached result.
    pub fn to_automaton(&self) -> Result<&Automaton> {
        self.automaton
            .get_or_init(|| grammar_to_automaton(self))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Generate a word of the language by a random walk over the cached
    /// automaton. See [`Automaton::sample_word`].
    pub fn generate_word<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        Ok(self.to_automaton()?.sample_word(rng))
    }

    /// Place the grammar in the Chomsky hierarchy. See [`classify`].
    pub fn classify(&self) -> ChomskyClass {
        classify(
            &self.productions,
            &self.terminals,
            &self.nonterminals,
            &self.start,
        )
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Terminals: {{ ")?;
        for terminal in &self.terminals {
            write!(f, "{terminal} ")?;
        }
        writeln!(f, "}}")?;

        write!(f, "Nonterminals: {{ ")?;
        for nonterminal in &self.nonterminals {
            write!(f, "{nonterminal} ")?;
        }
        writeln!(f, "}}")?;

        writeln!(f, "Start symbol: {}", self.start)?;

        writeln!(f, "Productions:")?;
        for production in &self.productions {
            writeln!(f, "  {production}")?;
        }
        Ok(())
    }
}
