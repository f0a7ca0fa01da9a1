mod common;

use common::{all_words, example_grammar, init_tracing, prod};
use formlang::automaton::MAX_SAMPLE_STEPS;
use formlang::{AutomatonBuilder, Grammar};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_grammar_roundtrip_preserves_language() {
    init_tracing();
    let grammar = example_grammar();
    let automaton = grammar.to_automaton().unwrap();
    let regenerated = automaton.to_grammar().unwrap();
    let again = regenerated.to_automaton().unwrap();

    assert_eq!(regenerated.start(), grammar.start());
    assert_eq!(regenerated.terminals(), grammar.terminals());
    assert_eq!(regenerated.nonterminals(), grammar.nonterminals());
    for word in all_words(&['a', 'b', 'c', 'd', 'e', 'f'], 5) {
        assert_eq!(automaton.accepts(&word), again.accepts(&word), "{word:?}");
    }
}

#[test]
fn test_roundtrip_with_epsilon_production() {
    let grammar = Grammar::new(
        ["a", "b"],
        ["S", "A"],
        "S",
        [prod("S", "aA"), prod("S", ""), prod("A", "bS"), prod("A", "b")],
    )
    .unwrap();
    let automaton = grammar.to_automaton().unwrap();
    let again = automaton.to_grammar().unwrap();
    let back = again.to_automaton().unwrap();

    for word in all_words(&['a', 'b'], 8) {
        assert_eq!(automaton.accepts(&word), back.accepts(&word), "{word:?}");
    }
    assert!(back.accepts(""));
    assert!(back.accepts("abab"));
}

#[test]
fn test_dfa_reads_back_as_grammar() {
    let grammar = example_grammar();
    let dfa = grammar.to_automaton().unwrap().to_dfa();
    let back = dfa.to_grammar().unwrap();
    let automaton = back.to_automaton().unwrap();

    for word in all_words(&['a', 'b', 'c', 'd', 'e', 'f'], 4) {
        assert_eq!(dfa.accepts(&word), automaton.accepts(&word), "{word:?}");
    }
}

#[test]
fn test_generated_words_are_accepted() {
    let grammar = example_grammar();
    let automaton = grammar.to_automaton().unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..100 {
        let word = grammar.generate_word(&mut rng).unwrap();
        // every edge carries a symbol, so a walk cut short has full length
        assert!(word.len() <= MAX_SAMPLE_STEPS);
        if word.len() < MAX_SAMPLE_STEPS {
            assert!(automaton.accepts(&word), "{word:?}");
        }
    }
}

#[test]
fn test_sampling_terminates_without_final_state() {
    let automaton = AutomatonBuilder::new()
        .add_symbol("a")
        .add_transition("S", "a", "S")
        .add_state("F")
        .set_initial_state("S")
        .add_final_state("F")
        .build()
        .unwrap();

    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(automaton.sample_word(&mut rng), "a".repeat(MAX_SAMPLE_STEPS));
}

#[test]
fn test_seeded_sampling_is_reproducible() {
    let grammar = example_grammar();
    let words = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..10)
            .map(|_| grammar.generate_word(&mut rng).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(words(9), words(9));
}
