//! Random walks over an automaton.

use crate::automaton::finite::Automaton;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::trace;

/// Upper bound on the number of edges a single walk follows.
pub const MAX_SAMPLE_STEPS: usize = 20;

impl Automaton {
    /// Produce a word by walking the automaton at random.
    ///
    /// Starting from the initial state, an outgoing edge is picked uniformly
    /// among all edges of the current state and its label (if any) is
    /// appended. The walk stops on a final state, on a state without outgoing
    /// edges, or after [`MAX_SAMPLE_STEPS`] edges. The word is therefore only
    /// guaranteed to be in the language when the walk ended on a final state.
    pub fn sample_word<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let mut current = self.initial_id();
        let mut word = String::new();

        for step in 0..MAX_SAMPLE_STEPS {
            if self.final_set().contains(current) {
                break;
            }
            let choices: Vec<_> = self.outgoing(current).collect();
            let Some(&(symbol, next)) = choices.choose(rng) else {
                break;
            };
            if let Some(symbol) = self.symbol(symbol) {
                word.push_str(symbol.as_str());
            }
            trace!(step, from = %self.state(current), to = %self.state(next), "sample step");
            current = next;
        }

        word
    }
}

#[cfg(test)]
mod tests {
    use crate::automaton::{AutomatonBuilder, MAX_SAMPLE_STEPS};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sample_reaches_final_state() {
        let automaton = AutomatonBuilder::new()
            .add_symbol("a")
            .add_symbol("b")
            .add_transition("S", "a", "S")
            .add_transition("S", "b", "F")
            .set_initial_state("S")
            .add_final_state("F")
            .build()
            .unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let word = automaton.sample_word(&mut rng);
            assert!(word.len() <= MAX_SAMPLE_STEPS);
            if word.ends_with('b') {
                assert!(automaton.accepts(&word));
            }
        }
    }

    #[test]
    fn test_sample_terminates_without_final_state() {
        let automaton = AutomatonBuilder::new()
            .add_symbol("a")
            .add_transition("S", "a", "T")
            .add_transition("T", "a", "S")
            .set_initial_state("S")
            .build()
            .unwrap();

        let word = automaton.sample_word(&mut StdRng::seed_from_u64(1));
        assert_eq!(word, "a".repeat(MAX_SAMPLE_STEPS));
    }

    #[test]
    fn test_sample_stops_on_stuck_state() {
        let automaton = AutomatonBuilder::new()
            .add_symbol("a")
            .add_transition("S", "a", "T")
            .set_initial_state("S")
            .add_final_state("F")
            .build()
            .unwrap();

        assert_eq!(automaton.sample_word(&mut StdRng::seed_from_u64(3)), "a");
    }

    #[test]
    fn test_sample_skips_epsilon_labels() {
        let automaton = AutomatonBuilder::new()
            .add_epsilon_transition("S", "F")
            .set_initial_state("S")
            .add_final_state("F")
            .build()
            .unwrap();

        assert_eq!(automaton.sample_word(&mut StdRng::seed_from_u64(0)), "");
    }

    #[test]
    fn test_seeded_samples_are_reproducible() {
        let automaton = AutomatonBuilder::new()
            .add_symbol("a")
            .add_symbol("b")
            .add_transition("S", "a", "S")
            .add_transition("S", "b", "S")
            .add_transition("S", "a", "F")
            .set_initial_state("S")
            .add_final_state("F")
            .build()
            .unwrap();

        let first = automaton.sample_word(&mut StdRng::seed_from_u64(42));
        let second = automaton.sample_word(&mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }
}
