mod common;

use common::{all_words, example_grammar, init_tracing};
use formlang::automaton::subset_construction;
use formlang::{Automaton, AutomatonBuilder, State};

const ALPHABET: [char; 6] = ['a', 'b', 'c', 'd', 'e', 'f'];

/// `(a|b)* a b` with an epsilon detour through `E`.
fn epsilon_nfa() -> Automaton {
    AutomatonBuilder::new()
        .add_symbol("a")
        .add_symbol("b")
        .add_transition("S", "a", "S")
        .add_transition("S", "b", "S")
        .add_transition("S", "a", "A")
        .add_epsilon_transition("A", "E")
        .add_transition("E", "b", "F")
        .set_initial_state("S")
        .add_final_state("F")
        .build()
        .unwrap()
}

fn assert_same_language(left: &Automaton, right: &Automaton, alphabet: &[char], max_len: usize) {
    for word in all_words(alphabet, max_len) {
        assert_eq!(
            left.accepts(&word),
            right.accepts(&word),
            "automata disagree on {word:?}"
        );
    }
}

#[test]
fn test_determinization_is_sound() {
    init_tracing();
    let grammar = example_grammar();
    let nfa = grammar.to_automaton().unwrap();
    let dfa = nfa.to_dfa();

    assert!(dfa.is_deterministic());
    assert!(!dfa.has_epsilon_transitions());
    assert_same_language(nfa, &dfa, &ALPHABET, 5);
}

#[test]
fn test_determinization_of_epsilon_nfa() {
    let nfa = epsilon_nfa();
    assert!(!nfa.is_deterministic());

    let dfa = nfa.to_dfa();
    assert!(dfa.is_deterministic());
    assert!(!dfa.has_epsilon_transitions());
    assert_same_language(&nfa, &dfa, &['a', 'b'], 8);
    assert!(dfa.accepts("abab"));
    assert!(!dfa.accepts("aba"));
}

#[test]
fn test_determinization_is_idempotent() {
    let dfa = epsilon_nfa().to_dfa();
    let again = dfa.to_dfa();

    assert!(again.is_deterministic());
    assert_eq!(again.num_states(), dfa.num_states());
    assert_same_language(&dfa, &again, &['a', 'b'], 8);
}

#[test]
fn test_subsets_name_discovery_order() {
    let result = subset_construction(&epsilon_nfa());

    assert_eq!(result.dfa.initial_state(), &State::Subset(0));
    assert_eq!(result.subsets.len(), result.dfa.num_states());
    assert_eq!(result.subsets[0], vec![State::named("S")]);
    // Q1 is reached from Q0 on `a`, the first symbol tried
    assert_eq!(
        result.subsets[1],
        vec![State::named("A"), State::named("E"), State::named("S")]
    );
}

#[test]
fn test_minimization_preserves_language() {
    let grammar = example_grammar();
    let nfa = grammar.to_automaton().unwrap();
    let dfa = nfa.to_dfa();
    let minimal = dfa.minimize();

    assert!(minimal.is_deterministic());
    assert!(minimal.num_states() <= dfa.num_states());
    assert_same_language(&dfa, &minimal, &ALPHABET, 5);

    let minimal = epsilon_nfa().minimize();
    assert_eq!(minimal.num_states(), 3);
    assert_same_language(&epsilon_nfa(), &minimal, &['a', 'b'], 8);
}

#[test]
fn test_empty_language() {
    let automaton = AutomatonBuilder::new()
        .add_symbol("a")
        .add_transition("S", "a", "S")
        .add_state("F")
        .set_initial_state("S")
        .add_final_state("F")
        .build()
        .unwrap();

    assert!(automaton.is_empty());
    assert!(automaton.to_dfa().is_empty());
    let minimal = automaton.minimize();
    assert!(minimal.is_empty());
    assert!(!minimal.accepts("aaa"));
}
