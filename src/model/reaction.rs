use crate::closure::{Catalysis, ClosureRules, Inhibition};
use crate::model::{CatalystExpression, MoleculeId, MoleculeSet};
use std::collections::BTreeMap;

/// Which of `reactants -> products` and `products -> reactants` a reaction performs.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
    Both,
}

impl Direction {
    pub fn is_two_way(self) -> bool {
        self == Direction::Both
    }
}

/// Stoichiometric coefficients of a reaction. They are kept for output only and never
/// take part in any closure decision.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Coefficients {
    pub reactants: BTreeMap<MoleculeId, u32>,
    pub products: BTreeMap<MoleculeId, u32>,
}

/// A single (possibly two-way) catalyzed reaction.
///
/// Reactions are immutable once created and are shared between reaction systems
/// through `Arc<Reaction>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reaction {
    name: String,
    reactants: Vec<MoleculeId>,
    products: Vec<MoleculeId>,
    catalysts: CatalystExpression,
    inhibitors: Vec<MoleculeId>,
    direction: Direction,
    coefficients: Option<Coefficients>,
}

fn normalized(mut ids: Vec<MoleculeId>) -> Vec<MoleculeId> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

impl Reaction {
    /// # Panics
    ///
    /// Both `reactants` and `products` must be non-empty.
    pub fn new(
        name: impl Into<String>,
        reactants: Vec<MoleculeId>,
        products: Vec<MoleculeId>,
        catalysts: CatalystExpression,
        inhibitors: Vec<MoleculeId>,
        direction: Direction,
    ) -> Reaction {
        let name = name.into();
        assert!(!reactants.is_empty(), "Reaction `{name}` has no reactants.");
        assert!(!products.is_empty(), "Reaction `{name}` has no products.");
        Reaction {
            name,
            reactants: normalized(reactants),
            products: normalized(products),
            catalysts,
            inhibitors: normalized(inhibitors),
            direction,
            coefficients: None,
        }
    }

    pub fn with_coefficients(mut self, coefficients: Coefficients) -> Reaction {
        self.coefficients = Some(coefficients);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reactants(&self) -> &[MoleculeId] {
        &self.reactants
    }

    pub fn products(&self) -> &[MoleculeId] {
        &self.products
    }

    pub fn catalysts(&self) -> &CatalystExpression {
        &self.catalysts
    }

    pub fn inhibitors(&self) -> &[MoleculeId] {
        &self.inhibitors
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn coefficients(&self) -> Option<&Coefficients> {
        self.coefficients.as_ref()
    }

    /// The active `(input, output)` sides: one for one-way reactions, two for `Both`.
    pub fn sides(&self) -> impl Iterator<Item = (&[MoleculeId], &[MoleculeId])> {
        let forward = (self.reactants.as_slice(), self.products.as_slice());
        let reverse = (self.products.as_slice(), self.reactants.as_slice());
        let sides = match self.direction {
            Direction::Forward => [Some(forward), None],
            Direction::Reverse => [Some(reverse), None],
            Direction::Both => [Some(forward), Some(reverse)],
        };
        sides.into_iter().flatten()
    }

    pub fn is_catalyzed(&self, available: &MoleculeSet) -> bool {
        self.catalysts.is_satisfied_by(available)
    }

    pub fn is_inhibited(&self, available: &MoleculeSet) -> bool {
        available.contains_any(&self.inhibitors)
    }

    pub fn has_inhibitors(&self) -> bool {
        !self.inhibitors.is_empty()
    }

    /// Check the catalyst and inhibitor part of the enabling predicate.
    pub fn is_supported(&self, available: &MoleculeSet, rules: ClosureRules) -> bool {
        let catalyzed = match rules.catalysis {
            Catalysis::Required => self.is_catalyzed(available),
            Catalysis::Ignored => true,
        };
        let uninhibited = match rules.inhibition {
            Inhibition::Checked => !self.is_inhibited(available),
            Inhibition::Ignored => true,
        };
        catalyzed && uninhibited
    }

    /// Output sides of the directions that are enabled under `available`.
    pub fn enabled_outputs<'a>(
        &'a self,
        available: &'a MoleculeSet,
        rules: ClosureRules,
    ) -> impl Iterator<Item = &'a [MoleculeId]> + 'a {
        let supported = self.is_supported(available, rules);
        self.sides()
            .filter(move |(input, _)| supported && available.contains_all(input))
            .map(|(_, output)| output)
    }

    pub fn is_enabled(&self, available: &MoleculeSet, rules: ClosureRules) -> bool {
        self.enabled_outputs(available, rules).next().is_some()
    }

    /// Molecules on the input side of any active direction.
    pub fn inputs(&self) -> MoleculeSet {
        self.sides().flat_map(|(input, _)| input.iter().copied()).collect()
    }

    /// Molecules on the output side of any active direction.
    pub fn outputs(&self) -> MoleculeSet {
        self.sides().flat_map(|(_, output)| output.iter().copied()).collect()
    }

    /// Every molecule mentioned by this reaction in any role.
    pub fn molecules(&self) -> impl Iterator<Item = MoleculeId> + '_ {
        self.reactants
            .iter()
            .chain(&self.products)
            .chain(&self.inhibitors)
            .copied()
            .chain(self.catalysts.molecules())
    }
}
