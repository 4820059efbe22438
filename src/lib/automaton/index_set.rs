use crate::automaton::State;

pub trait IndexSetKey: Copy {
    fn new(index: usize) -> Self;
    fn index(self) -> usize;
}

impl IndexSetKey for State {
    fn new(index: usize) -> Self {
        State::new(index)
    }

    fn index(self) -> usize {
        State::index(self)
    }
}

impl IndexSetKey for usize {
    fn new(index: usize) -> Self {
        index
    }

    fn index(self) -> usize {
        self
    }
}

/// A dense set over a compact index space `0..max_index`.
///
/// Used as the visited marker of worklist algorithms, so that every state is
/// pushed at most once.
#[derive(Debug, Clone)]
pub struct IndexSet<K: IndexSetKey> {
    data: Vec<bool>,
    len: usize,
    _marker: std::marker::PhantomData<K>,
}

impl<K: IndexSetKey> IndexSet<K> {
    pub fn new(max_index: usize) -> Self {
        IndexSet {
            data: vec![false; max_index],
            len: 0,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn contains(&self, key: K) -> bool {
        let index = key.index();

        index < self.data.len() && self.data[index]
    }

    /// Inserts `key`, returning `true` if it was not present before.
    /// Keys outside the index space are ignored.
    pub fn insert(&mut self, key: K) -> bool {
        let index = key.index();

        if index >= self.data.len() || self.data[index] {
            return false;
        }

        self.data[index] = true;
        self.len += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.data.fill(false);
        self.len = 0;
    }

    /// Iterates the contained keys in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, present)| **present)
            .map(|(index, _)| K::new(index))
    }

    pub fn to_vec(&self) -> Vec<K> {
        self.iter().collect()
    }
}
