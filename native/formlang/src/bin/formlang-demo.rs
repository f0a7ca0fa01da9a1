//! Walks the example grammar through every stage of the library.
//!
//! Set `RUST_LOG=debug` to see the construction diagnostics.

use formlang::{FormlangError, Grammar, Production};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const SAMPLES: usize = 5;

fn example_grammar() -> Result<Grammar, FormlangError> {
    Grammar::new(
        ["a", "b", "c", "d", "e", "f"],
        ["S", "P", "Q"],
        "S",
        [
            Production::new(["S"], ["a", "P"]),
            Production::new(["S"], ["b", "Q"]),
            Production::new(["P"], ["b", "P"]),
            Production::new(["P"], ["c", "P"]),
            Production::new(["P"], ["d", "Q"]),
            Production::new(["P"], ["e"]),
            Production::new(["Q"], ["e", "Q"]),
            Production::new(["Q"], ["f", "Q"]),
            Production::new(["Q"], ["a"]),
        ],
    )
}

fn accepted_examples() -> Vec<String> {
    let mut words: Vec<String> = [
        "ae", "abcdea", "adeffea", "ada", "befea", "ba", "bffffa", "beeeffa",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    words.push(format!("a{}ccce", "b".repeat(40)));
    words
}

const REJECTED_EXAMPLES: [&str; 9] = [
    "",
    "zzzz",
    "test",
    "aaa",
    "abcd",
    "eeeeeeeeeeeeeee",
    "helpmeiamtired",
    "bfee",
    "befx",
];

fn run() -> Result<usize, FormlangError> {
    let grammar = example_grammar()?;
    println!("{grammar}");

    let automaton = grammar.to_automaton()?;
    println!("{automaton}");

    let dfa = automaton.to_dfa();
    println!("Deterministic: {}", dfa.is_deterministic());
    println!("{dfa}");

    let minimal = dfa.minimize();
    println!("Minimized ({} states):", minimal.num_states());
    println!("{minimal}");

    println!("Classification: {}", grammar.classify());
    println!();

    let seed = std::env::var("FORMLANG_SEED")
        .ok()
        .and_then(|seed| seed.parse().ok())
        .unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);
    println!("Sampled words:");
    for _ in 0..SAMPLES {
        println!("  {:?}", grammar.generate_word(&mut rng)?);
    }
    println!();

    let mut failures = 0;
    for word in accepted_examples() {
        let accepted = automaton.accepts(&word);
        println!("{word:?}: {}", if accepted { "accepted" } else { "rejected" });
        if !accepted {
            error!(word = %word, "expected the word to be accepted");
            failures += 1;
        }
    }
    for word in REJECTED_EXAMPLES {
        let accepted = automaton.accepts(word);
        println!("{word:?}: {}", if accepted { "accepted" } else { "rejected" });
        if accepted {
            error!(word = %word, "expected the word to be rejected");
            failures += 1;
        }
    }
    Ok(failures)
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    match run() {
        Ok(0) => {
            info!("all membership examples behaved as expected");
            ExitCode::SUCCESS
        }
        Ok(failures) => {
            error!(failures, "membership examples failed");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(%err, "demo aborted");
            ExitCode::FAILURE
        }
    }
}
