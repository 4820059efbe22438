use itertools::Itertools;
use rand::Rng;

use crate::automaton::{error::Result, Automaton, AutomatonKind, Label, Symbol};

#[derive(Debug, Clone)]
pub struct RandomAutomatonOptions<S: Symbol> {
    alphabet: Vec<S>,
    state_count: usize,
    kind: AutomatonKind,
    transition_probability: f64,
    epsilon_probability: f64,
    accepting_probability: f64,
}

impl<S: Symbol> RandomAutomatonOptions<S> {
    pub fn new(alphabet: Vec<S>, state_count: usize) -> Self {
        RandomAutomatonOptions {
            alphabet,
            state_count,
            kind: AutomatonKind::EpsilonNondeterministic,
            transition_probability: 0.3,
            epsilon_probability: 0.15,
            accepting_probability: 0.3,
        }
    }

    pub fn with_kind(mut self, kind: AutomatonKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_transition_probability(mut self, probability: f64) -> Self {
        self.transition_probability = probability.clamp(0.0, 1.0);
        self
    }

    pub fn with_epsilon_probability(mut self, probability: f64) -> Self {
        self.epsilon_probability = probability.clamp(0.0, 1.0);
        self
    }

    pub fn with_accepting_probability(mut self, probability: f64) -> Self {
        self.accepting_probability = probability.clamp(0.0, 1.0);
        self
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }
}

/// Generates a random automaton. The first state is the start state.
///
/// For [`AutomatonKind::Deterministic`] every state gets at most one target
/// per symbol, and epsilon transitions are only generated for
/// [`AutomatonKind::EpsilonNondeterministic`].
pub fn random_automaton<S: Symbol>(
    options: &RandomAutomatonOptions<S>,
    rng: &mut impl Rng,
) -> Result<Automaton<S>> {
    let mut automaton = Automaton::new(options.kind, options.alphabet.clone());

    let states = (0..options.state_count)
        .map(|_| automaton.add_state(rng.gen_bool(options.accepting_probability)))
        .collect_vec();

    let Some(&start) = states.first() else {
        return Ok(automaton);
    };
    automaton.set_start(start)?;

    for &from in &states {
        for symbol in &options.alphabet {
            if options.kind == AutomatonKind::Deterministic {
                if rng.gen_bool(options.transition_probability) {
                    let to = states[rng.gen_range(0..states.len())];
                    automaton.add_transition(from, Label::Symbol(symbol.clone()), to)?;
                }
                continue;
            }

            for &to in &states {
                if rng.gen_bool(options.transition_probability) {
                    automaton.add_transition(from, Label::Symbol(symbol.clone()), to)?;
                }
            }
        }

        if !options.kind.allows_epsilon() {
            continue;
        }

        for &to in &states {
            if rng.gen_bool(options.epsilon_probability) {
                automaton.add_epsilon_transition(from, to)?;
            }
        }
    }

    Ok(automaton)
}

/// A random word over `alphabet` with a length in `0..=max_length`.
pub fn random_word<S: Symbol>(alphabet: &[S], max_length: usize, rng: &mut impl Rng) -> Vec<S> {
    if alphabet.is_empty() {
        return vec![];
    }

    let length = rng.gen_range(0..=max_length);

    (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn deterministic_kind_generates_dfas() {
        let mut rng = StdRng::seed_from_u64(7);
        let options = RandomAutomatonOptions::new(vec!['a', 'b'], 6)
            .with_kind(AutomatonKind::Deterministic)
            .with_transition_probability(0.8);

        for _ in 0..20 {
            let dfa = random_automaton(&options, &mut rng).unwrap();

            assert!(dfa.is_deterministic());
            assert_eq!(dfa.state_count(), 6);
        }
    }

    #[test]
    fn nfa_kind_has_no_epsilons() {
        let mut rng = StdRng::seed_from_u64(11);
        let options = RandomAutomatonOptions::new(vec![0u8, 1], 5)
            .with_kind(AutomatonKind::Nondeterministic)
            .with_epsilon_probability(1.0);

        let nfa = random_automaton(&options, &mut rng).unwrap();

        assert!(nfa.is_epsilon_free());
    }
}
