use std::fmt::Display;

use itertools::Itertools;

use crate::automaton::State;

/// A set of states of one source automaton, kept sorted and duplicate free.
///
/// Equality and hashing compare contents, which makes a `StateSet` usable as
/// the deduplication key of the subset construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateSet(Vec<State>);

impl StateSet {
    pub fn new() -> Self {
        StateSet(Vec::new())
    }

    pub fn singleton(state: State) -> Self {
        StateSet(vec![state])
    }

    /// Builds a set from arbitrary states, sorting and removing duplicates.
    pub fn from_unsorted(mut states: Vec<State>) -> Self {
        states.sort_unstable();
        states.dedup();
        StateSet(states)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, state: State) -> bool {
        self.0.binary_search(&state).is_ok()
    }

    /// Inserts `state`, returning `true` if it was not present before.
    pub fn insert(&mut self, state: State) -> bool {
        match self.0.binary_search(&state) {
            Ok(_) => false,
            Err(position) => {
                self.0.insert(position, state);
                true
            }
        }
    }

    pub fn union(&self, other: &StateSet) -> StateSet {
        StateSet(self.0.iter().merge(other.0.iter()).dedup().copied().collect())
    }

    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.0.iter().all(|&state| other.contains(state))
    }

    pub fn iter(&self) -> impl Iterator<Item = State> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[State] {
        &self.0
    }
}

impl FromIterator<State> for StateSet {
    fn from_iter<T: IntoIterator<Item = State>>(iter: T) -> Self {
        StateSet::from_unsorted(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = State;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, State>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl IntoIterator for StateSet {
    type Item = State;
    type IntoIter = std::vec::IntoIter<State>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "∅");
        }

        write!(f, "{{{}}}", self.0.iter().join(", "))
    }
}
