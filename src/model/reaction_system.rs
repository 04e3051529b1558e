use crate::model::{MoleculeId, MoleculeSet, MoleculeTable, Reaction};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::sync::Arc;

/// A food set together with an ordered list of uniquely named reactions.
///
/// Systems are plain values: every algorithm returns a new system, and reactions
/// (as well as the molecule table) are shared with the input through `Arc`.
#[derive(Clone, Debug)]
pub struct ReactionSystem {
    name: String,
    molecules: Arc<MoleculeTable>,
    food: MoleculeSet,
    reactions: Vec<Arc<Reaction>>,
    index: FxHashMap<String, usize>,
}

impl ReactionSystem {
    /// # Panics
    ///
    /// Reaction names must be unique.
    pub fn new(
        name: impl Into<String>,
        molecules: Arc<MoleculeTable>,
        food: MoleculeSet,
        reactions: Vec<Arc<Reaction>>,
    ) -> ReactionSystem {
        let mut index = FxHashMap::default();
        for (i, reaction) in reactions.iter().enumerate() {
            let previous = index.insert(reaction.name().to_string(), i);
            assert!(
                previous.is_none(),
                "Duplicate reaction name `{}` in reaction system.",
                reaction.name()
            );
        }
        ReactionSystem {
            name: name.into(),
            molecules,
            food,
            reactions,
            index,
        }
    }

    /// A new system over the same molecule table.
    pub fn derive(
        &self,
        name: impl Into<String>,
        food: MoleculeSet,
        reactions: Vec<Arc<Reaction>>,
    ) -> ReactionSystem {
        ReactionSystem::new(name, self.molecules.clone(), food, reactions)
    }

    /// A new system with the same food and the given reactions.
    pub fn with_reactions(
        &self,
        name: impl Into<String>,
        reactions: Vec<Arc<Reaction>>,
    ) -> ReactionSystem {
        self.derive(name, self.food.clone(), reactions)
    }

    /// A new system with the same reactions and the given food.
    pub fn with_food(&self, food: MoleculeSet) -> ReactionSystem {
        self.derive(self.name.clone(), food, self.reactions.clone())
    }

    /// The same food without any reaction.
    pub fn empty_like(&self, name: impl Into<String>) -> ReactionSystem {
        self.with_reactions(name, Vec::new())
    }

    pub fn without_reaction(&self, reaction: &str) -> ReactionSystem {
        let reactions = self
            .reactions
            .iter()
            .filter(|r| r.name() != reaction)
            .cloned()
            .collect();
        self.with_reactions(self.name.clone(), reactions)
    }

    pub fn without_food(&self, molecule: MoleculeId) -> ReactionSystem {
        let mut food = self.food.clone();
        food.remove(molecule);
        self.with_food(food)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn molecules(&self) -> &Arc<MoleculeTable> {
        &self.molecules
    }

    pub fn food(&self) -> &MoleculeSet {
        &self.food
    }

    pub fn reactions(&self) -> &[Arc<Reaction>] {
        &self.reactions
    }

    /// The number of reactions.
    pub fn size(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    pub fn count_two_way(&self) -> usize {
        self.reactions
            .iter()
            .filter(|r| r.direction().is_two_way())
            .count()
    }

    pub fn count_one_way(&self) -> usize {
        self.size() - self.count_two_way()
    }

    pub fn has_inhibitors(&self) -> bool {
        self.reactions.iter().any(|r| r.has_inhibitors())
    }

    pub fn reaction(&self, name: &str) -> Option<&Arc<Reaction>> {
        self.index.get(name).map(|i| &self.reactions[*i])
    }

    pub fn contains_reaction(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Molecules mentioned by at least one reaction, in any role.
    pub fn molecules_mentioned(&self) -> MoleculeSet {
        self.reactions.iter().flat_map(|r| r.molecules()).collect()
    }

    /// Food molecules mentioned by at least one reaction.
    pub fn food_used(&self) -> MoleculeSet {
        self.food.intersect(&self.molecules_mentioned())
    }

    pub fn reaction_names(&self) -> BTreeSet<&str> {
        self.reactions.iter().map(|r| r.name()).collect()
    }

    /// Compare food and reaction names as sets, ignoring order and system names.
    pub fn same_content(&self, other: &ReactionSystem) -> bool {
        self.food == other.food && self.reaction_names() == other.reaction_names()
    }

    /// Look up a molecule by name in the shared table.
    pub fn molecule(&self, name: &str) -> Option<MoleculeId> {
        self.molecules.get(name)
    }

    /// Molecule names in alphabetical order.
    pub fn names_of(&self, set: &MoleculeSet) -> Vec<&str> {
        self.molecules.sorted_names(set.iter())
    }
}
