use crate::model::MoleculeId;
use std::fmt::{Debug, Formatter};

const WORD: usize = u64::BITS as usize;

/// A set of molecules stored as a bitset over [`MoleculeId`] indices.
///
/// The set grows on insertion, so sets created with different capacities can be freely
/// combined. Equality ignores trailing empty words.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoleculeSet {
    words: Vec<u64>,
}

impl MoleculeSet {
    pub fn new() -> MoleculeSet {
        MoleculeSet::default()
    }

    /// An empty set that can hold `molecules` ids without reallocating.
    pub fn with_capacity(molecules: usize) -> MoleculeSet {
        MoleculeSet {
            words: vec![0; molecules.div_ceil(WORD)],
        }
    }

    pub fn contains(&self, id: MoleculeId) -> bool {
        let (word, bit) = (id.index() / WORD, id.index() % WORD);
        self.words.get(word).is_some_and(|w| w & (1u64 << bit) != 0)
    }

    /// Insert `id`, returning `true` if it was not present before.
    pub fn insert(&mut self, id: MoleculeId) -> bool {
        let (word, bit) = (id.index() / WORD, id.index() % WORD);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        let fresh = self.words[word] & (1u64 << bit) == 0;
        self.words[word] |= 1u64 << bit;
        fresh
    }

    /// Remove `id`, returning `true` if it was present.
    pub fn remove(&mut self, id: MoleculeId) -> bool {
        let (word, bit) = (id.index() / WORD, id.index() % WORD);
        match self.words.get_mut(word) {
            Some(w) if *w & (1u64 << bit) != 0 => {
                *w &= !(1u64 << bit);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    pub fn contains_all(&self, ids: &[MoleculeId]) -> bool {
        ids.iter().all(|id| self.contains(*id))
    }

    pub fn contains_any(&self, ids: &[MoleculeId]) -> bool {
        ids.iter().any(|id| self.contains(*id))
    }

    pub fn union_with(&mut self, other: &MoleculeSet) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (w, o) in self.words.iter_mut().zip(&other.words) {
            *w |= *o;
        }
    }

    pub fn union(&self, other: &MoleculeSet) -> MoleculeSet {
        let mut result = self.clone();
        result.union_with(other);
        result
    }

    pub fn intersect(&self, other: &MoleculeSet) -> MoleculeSet {
        MoleculeSet {
            words: self
                .words
                .iter()
                .zip(&other.words)
                .map(|(w, o)| w & o)
                .collect(),
        }
    }

    pub fn minus(&self, other: &MoleculeSet) -> MoleculeSet {
        let mut words = self.words.clone();
        for (w, o) in words.iter_mut().zip(&other.words) {
            *w &= !*o;
        }
        MoleculeSet { words }
    }

    pub fn is_subset(&self, other: &MoleculeSet) -> bool {
        self.words.iter().enumerate().all(|(i, w)| {
            let o = other.words.get(i).copied().unwrap_or(0);
            w & !o == 0
        })
    }

    /// Iterate the members in increasing id order.
    pub fn iter(&self) -> impl Iterator<Item = MoleculeId> + '_ {
        self.words.iter().enumerate().flat_map(|(i, word)| {
            let mut rest = *word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    None
                } else {
                    let bit = rest.trailing_zeros() as usize;
                    rest &= rest - 1;
                    Some(MoleculeId::from_index(i * WORD + bit))
                }
            })
        })
    }
}

impl PartialEq for MoleculeSet {
    fn eq(&self, other: &Self) -> bool {
        let len = self.words.len().max(other.words.len());
        (0..len).all(|i| {
            self.words.get(i).copied().unwrap_or(0) == other.words.get(i).copied().unwrap_or(0)
        })
    }
}

impl Eq for MoleculeSet {}

impl Debug for MoleculeSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<MoleculeId> for MoleculeSet {
    fn from_iter<T: IntoIterator<Item = MoleculeId>>(iter: T) -> Self {
        let mut set = MoleculeSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<MoleculeId> for MoleculeSet {
    fn extend<T: IntoIterator<Item = MoleculeId>>(&mut self, iter: T) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl<'a> IntoIterator for &'a MoleculeSet {
    type Item = MoleculeId;
    type IntoIter = Box<dyn Iterator<Item = MoleculeId> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
