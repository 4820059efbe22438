use itertools::Itertools;

use crate::automaton::{error::Result, Automaton, Symbol};

fn same_alphabet<S: Symbol>(a: &Automaton<S>, b: &Automaton<S>) -> bool {
    a.alphabet().iter().sorted().eq(b.alphabet().iter().sorted())
}

/// Finds the shortest word of length at most `max_word_length` on which the
/// two automata disagree.
pub fn find_difference<S: Symbol>(
    a: &Automaton<S>,
    b: &Automaton<S>,
    max_word_length: usize,
) -> Result<Option<Vec<S>>> {
    for word in a.words(max_word_length) {
        if a.accepts(&word)? != b.accepts(&word)? {
            return Ok(Some(word));
        }
    }

    Ok(None)
}

/// Checks if two automata accept the same language.
/// This is done by checking if the alphabets are the same and then checking if
/// the automata accept the same words up to a certain length.
pub fn same_language<S: Symbol>(
    a: &Automaton<S>,
    b: &Automaton<S>,
    max_word_length: usize,
) -> Result<bool> {
    if !same_alphabet(a, b) {
        return Ok(false);
    }

    Ok(find_difference(a, b, max_word_length)?.is_none())
}

pub fn assert_same_language<S: Symbol>(a: &Automaton<S>, b: &Automaton<S>, max_word_length: usize) {
    if !same_alphabet(a, b) {
        panic!("Alphabets are not the same");
    }

    for word in a.words(max_word_length) {
        let in_a = a.accepts(&word).expect("automaton `a` must have a start state");
        let in_b = b.accepts(&word).expect("automaton `b` must have a start state");

        match (in_a, in_b) {
            (true, false) => {
                panic!(
                    "{:?} is accepted by automaton `a` but not by automaton `b`. Thus their languages are not equal.",
                    word
                );
            }
            (false, true) => {
                panic!(
                    "{:?} is accepted by automaton `b` but not by automaton `a`. Thus their languages are not equal.",
                    word
                );
            }
            _ => {}
        }
    }
}
