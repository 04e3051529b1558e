use rustc_hash::FxHashMap;
use std::fmt::{Display, Formatter};

/// A handle of one molecule type in a [`MoleculeTable`].
///
/// Two handles obtained from the same table are equal exactly when they refer to the
/// same molecule name. Handles from different tables must not be mixed.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoleculeId(u32);

impl MoleculeId {
    pub const fn from_index(index: usize) -> MoleculeId {
        MoleculeId(index as u32)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for MoleculeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// An arena of interned molecule names.
///
/// The table is filled while a reaction system is read or generated and then frozen
/// behind an `Arc` shared by every [`ReactionSystem`](crate::model::ReactionSystem)
/// derived from it.
#[derive(Clone, Debug, Default)]
pub struct MoleculeTable {
    names: Vec<String>,
    index: FxHashMap<String, MoleculeId>,
}

impl MoleculeTable {
    pub fn new() -> MoleculeTable {
        MoleculeTable::default()
    }

    /// Return the handle of `name`, creating a new one on first reference.
    pub fn intern(&mut self, name: &str) -> MoleculeId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }
        let id = MoleculeId::from_index(self.names.len());
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        id
    }

    pub fn get(&self, name: &str) -> Option<MoleculeId> {
        self.index.get(name).copied()
    }

    /// # Panics
    ///
    /// The id must come from this table.
    pub fn name(&self, id: MoleculeId) -> &str {
        &self.names[id.index()]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = MoleculeId> + '_ {
        (0..self.names.len()).map(MoleculeId::from_index)
    }

    /// Names of the given molecules in alphabetical order.
    pub fn sorted_names<I: IntoIterator<Item = MoleculeId>>(&self, ids: I) -> Vec<&str> {
        let mut names: Vec<&str> = ids.into_iter().map(|id| self.name(id)).collect();
        names.sort_unstable();
        names
    }
}
