use itertools::Itertools;

use crate::automaton::{
    error::Result, index_set::IndexSet, state_set::StateSet, Automaton, State, Symbol,
};

/// Calculates the epsilon closure of a set of states.
/// Meaning all states reachable from `states` only by epsilon transitions,
/// including `states` themselves.
pub fn epsilon_closure<S: Symbol>(automaton: &Automaton<S>, states: &StateSet) -> Result<StateSet> {
    for state in states {
        automaton.check_state(state)?;
    }

    Ok(closure_of(automaton, states.iter()))
}

/// Calculates the epsilon closure of a single state.
pub fn state_closure<S: Symbol>(automaton: &Automaton<S>, state: State) -> Result<StateSet> {
    epsilon_closure(automaton, &StateSet::singleton(state))
}

/// The epsilon closure of every state, indexed by state index.
pub fn all_closures<S: Symbol>(automaton: &Automaton<S>) -> Vec<StateSet> {
    automaton
        .states()
        .map(|state| closure_of(automaton, [state]))
        .collect_vec()
}

pub(crate) fn closure_of<S: Symbol>(
    automaton: &Automaton<S>,
    states: impl IntoIterator<Item = State>,
) -> StateSet {
    let mut closure = states.into_iter().collect_vec();
    extend_to_closure(automaton, &mut closure);
    StateSet::from_unsorted(closure)
}

/// Extends `states` in place to its epsilon closure.
/// Duplicates are removed, every state is visited at most once, so epsilon
/// cycles terminate. States not belonging to `automaton` are dropped.
pub(crate) fn extend_to_closure<S: Symbol>(automaton: &Automaton<S>, states: &mut Vec<State>) {
    let mut visited = IndexSet::<State>::new(automaton.state_count());
    states.retain(|&state| visited.insert(state));

    let mut stack = states.clone();

    while let Some(state) = stack.pop() {
        for target in automaton.epsilon_targets(state) {
            if visited.insert(target) {
                states.push(target);
                stack.push(target);
            }
        }
    }
}
