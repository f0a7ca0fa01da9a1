mod common;

use common::example_grammar;
use formlang::{Automaton, Grammar};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_types_are_send_and_sync() {
    assert_send_sync::<Automaton>();
    assert_send_sync::<Grammar>();
}

#[test]
fn test_concurrent_first_use_shares_one_automaton() {
    let grammar = Arc::new(example_grammar());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let grammar = Arc::clone(&grammar);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let automaton = grammar.to_automaton().unwrap();
                assert!(automaton.accepts("ae"));
                std::ptr::from_ref(automaton) as usize
            })
        })
        .collect();

    let addresses: Vec<usize> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    let cached = std::ptr::from_ref(grammar.to_automaton().unwrap()) as usize;
    assert!(addresses.iter().all(|&address| address == cached));
}
