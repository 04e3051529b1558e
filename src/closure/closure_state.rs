use crate::model::MoleculeSet;

#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosureState {
    pub iteration: usize,
    pub molecules: MoleculeSet,
}

impl From<MoleculeSet> for ClosureState {
    fn from(value: MoleculeSet) -> Self {
        ClosureState {
            iteration: 0,
            molecules: value,
        }
    }
}

impl From<&MoleculeSet> for ClosureState {
    fn from(value: &MoleculeSet) -> Self {
        Self::from(value.clone())
    }
}

impl From<ClosureState> for MoleculeSet {
    fn from(value: ClosureState) -> Self {
        value.molecules
    }
}
