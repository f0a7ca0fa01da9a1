//! Syntactic placement of a grammar in the Chomsky hierarchy.

use crate::automaton::Symbol;
use crate::grammar::Production;
use std::collections::BTreeSet;
use std::fmt;

/// A tier of the Chomsky hierarchy, ordered by generative power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChomskyClass {
    Regular,
    ContextFree,
    ContextSensitive,
    RecursivelyEnumerable,
}

impl ChomskyClass {
    /// The conventional type number: 3 for regular down to 0 for
    /// recursively enumerable.
    pub fn chomsky_type(self) -> u8 {
        match self {
            ChomskyClass::Regular => 3,
            ChomskyClass::ContextFree => 2,
            ChomskyClass::ContextSensitive => 1,
            ChomskyClass::RecursivelyEnumerable => 0,
        }
    }
}

impl fmt::Display for ChomskyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChomskyClass::Regular => "regular",
            ChomskyClass::ContextFree => "context-free",
            ChomskyClass::ContextSensitive => "context-sensitive",
            ChomskyClass::RecursivelyEnumerable => "recursively enumerable",
        };
        write!(f, "Type {} ({name})", self.chomsky_type())
    }
}

struct Classifier<'a> {
    productions: &'a [Production],
    terminals: &'a BTreeSet<Symbol>,
    nonterminals: &'a BTreeSet<Symbol>,
    start: &'a Symbol,
}

impl Classifier<'_> {
    fn is_terminal(&self, symbol: &Symbol) -> bool {
        self.terminals.contains(symbol)
    }

    fn is_nonterminal(&self, symbol: &Symbol) -> bool {
        self.nonterminals.contains(symbol)
    }

    fn single_nonterminal_lhs(&self, production: &Production) -> bool {
        matches!(production.lhs.as_slice(), [lhs] if self.is_nonterminal(lhs))
    }

    /// `A → a`, `A → aB` and `A → Ba`, without mixing the two linear forms.
    fn is_regular(&self) -> bool {
        let mut right_linear = false;
        let mut left_linear = false;

        for production in self.productions {
            if !self.single_nonterminal_lhs(production) {
                return false;
            }
            match production.rhs.as_slice() {
                [t] if self.is_terminal(t) => {}
                [t, n] if self.is_terminal(t) && self.is_nonterminal(n) => right_linear = true,
                [n, t] if self.is_nonterminal(n) && self.is_terminal(t) => left_linear = true,
                _ => return false,
            }
        }

        !(right_linear && left_linear)
    }

    fn is_context_free(&self) -> bool {
        self.productions
            .iter()
            .all(|production| self.single_nonterminal_lhs(production))
    }

    /// Non-contracting, except `start → ε` when `start` never appears on a
    /// right-hand side.
    fn is_context_sensitive(&self) -> bool {
        let start_on_rhs = self
            .productions
            .iter()
            .any(|production| production.rhs.contains(self.start));

        self.productions.iter().all(|production| {
            let has_nonterminal = production.lhs.iter().any(|s| self.is_nonterminal(s));
            let start_epsilon = matches!(production.lhs.as_slice(), [lhs] if lhs == self.start)
                && production.rhs.is_empty()
                && !start_on_rhs;
            has_nonterminal && (production.rhs.len() >= production.lhs.len() || start_epsilon)
        })
    }
}

/// Report the most restrictive Chomsky tier whose syntactic shape every
/// production satisfies.
///
/// Tiers are tried from regular to context-sensitive; recursively enumerable
/// is the fallback.
pub fn classify(
    productions: &[Production],
    terminals: &BTreeSet<Symbol>,
    nonterminals: &BTreeSet<Symbol>,
    start: &Symbol,
) -> ChomskyClass {
    let classifier = Classifier {
        productions,
        terminals,
        nonterminals,
        start,
    };

    if classifier.is_regular() {
        ChomskyClass::Regular
    } else if classifier.is_context_free() {
        ChomskyClass::ContextFree
    } else if classifier.is_context_sensitive() {
        ChomskyClass::ContextSensitive
    } else {
        ChomskyClass::RecursivelyEnumerable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;

    fn class_of(productions: Vec<Production>) -> ChomskyClass {
        Grammar::new(["a", "b"], ["S", "A", "B"], "S", productions)
            .unwrap()
            .classify()
    }

    #[test]
    fn test_right_linear_is_regular() {
        let class = class_of(vec![
            Production::new(["S"], ["a", "A"]),
            Production::new(["A"], ["b", "A"]),
            Production::new(["A"], ["a"]),
        ]);
        assert_eq!(class, ChomskyClass::Regular);
    }

    #[test]
    fn test_left_linear_is_regular() {
        let class = class_of(vec![
            Production::new(["S"], ["A", "a"]),
            Production::new(["A"], ["b"]),
        ]);
        assert_eq!(class, ChomskyClass::Regular);
    }

    #[test]
    fn test_mixed_linear_forms_are_context_free() {
        let class = class_of(vec![
            Production::new(["S"], ["a", "A"]),
            Production::new(["A"], ["B", "b"]),
            Production::new(["B"], ["a"]),
        ]);
        assert_eq!(class, ChomskyClass::ContextFree);
    }

    #[test]
    fn test_epsilon_rhs_is_not_regular() {
        let class = class_of(vec![
            Production::new(["S"], ["a", "S"]),
            Production::epsilon("S"),
        ]);
        assert_eq!(class, ChomskyClass::ContextFree);
    }

    #[test]
    fn test_context_sensitive() {
        let class = class_of(vec![
            Production::new(["S"], ["a", "A", "b"]),
            Production::new(["a", "A"], ["a", "a", "A"]),
            Production::new(["A", "b"], ["b", "b"]),
        ]);
        assert_eq!(class, ChomskyClass::ContextSensitive);
    }

    #[test]
    fn test_start_epsilon_allowed_when_start_not_on_rhs() {
        let class = class_of(vec![
            Production::epsilon("S"),
            Production::new(["S"], ["a", "A"]),
            Production::new(["a", "A"], ["a", "b"]),
        ]);
        assert_eq!(class, ChomskyClass::ContextSensitive);
    }

    #[test]
    fn test_contracting_rule_is_recursively_enumerable() {
        let class = class_of(vec![
            Production::new(["S"], ["a", "A"]),
            Production::new(["a", "A"], ["b"]),
        ]);
        assert_eq!(class, ChomskyClass::RecursivelyEnumerable);

        // start → ε with start on a right-hand side
        let class = class_of(vec![
            Production::epsilon("S"),
            Production::new(["a", "A"], ["a", "S"]),
        ]);
        assert_eq!(class, ChomskyClass::RecursivelyEnumerable);
    }

    #[test]
    fn test_lhs_without_nonterminal() {
        let class = class_of(vec![Production::new(["a"], ["a", "b"])]);
        assert_eq!(class, ChomskyClass::RecursivelyEnumerable);
    }

    #[test]
    fn test_display_and_order() {
        assert_eq!(ChomskyClass::Regular.to_string(), "Type 3 (regular)");
        assert_eq!(
            ChomskyClass::RecursivelyEnumerable.to_string(),
            "Type 0 (recursively enumerable)"
        );
        assert!(ChomskyClass::Regular < ChomskyClass::ContextFree);
        assert!(ChomskyClass::ContextSensitive < ChomskyClass::RecursivelyEnumerable);
    }
}
