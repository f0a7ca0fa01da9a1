#![allow(dead_code)]

use formlang::{Grammar, Production};
use std::sync::Once;

static INIT: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Helper: shorthand for a production with single-character symbols,
/// e.g. `prod("S", "aP")`. An empty `rhs` is an epsilon production.
pub fn prod(lhs: &str, rhs: &str) -> Production {
    let symbols = |s: &str| s.chars().map(String::from).collect::<Vec<_>>();
    Production::new(symbols(lhs), symbols(rhs))
}

/// The grammar over {a..f} with nonterminals {S, P, Q}.
pub fn example_grammar() -> Grammar {
    Grammar::new(
        ["a", "b", "c", "d", "e", "f"],
        ["S", "P", "Q"],
        "S",
        [
            prod("S", "aP"),
            prod("S", "bQ"),
            prod("P", "bP"),
            prod("P", "cP"),
            prod("P", "dQ"),
            prod("P", "e"),
            prod("Q", "eQ"),
            prod("Q", "fQ"),
            prod("Q", "a"),
        ],
    )
    .unwrap()
}

/// Every word over `alphabet` of length at most `max_len`, shortest first.
pub fn all_words(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut words = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        frontier = frontier
            .iter()
            .flat_map(|prefix| {
                alphabet.iter().map(move |c| {
                    let mut word = prefix.clone();
                    word.push(*c);
                    word
                })
            })
            .collect();
        words.extend(frontier.iter().cloned());
    }
    words
}
