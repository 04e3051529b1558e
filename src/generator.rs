//! Random catalytic reaction systems following the binary polymer model.
//!
//! Molecules are all strings over an alphabet of `alphabet_size` letters with length at
//! most `max_length`; the food set holds those of length at most `food_max_length`. For
//! every polymer and every split point there is one two-way ligation/cleavage reaction
//! `prefix + suffix <-> polymer`. Every molecule catalyzes every reaction independently
//! with probability `mean_catalyzation / |reactions|`, so that a molecule catalyzes
//! `mean_catalyzation` reactions on average. Reactions without any catalyst are dropped.

use crate::model::{
    CatalystExpression, Coefficients, Direction, MoleculeId, MoleculeSet, MoleculeTable,
    Reaction, ReactionSystem,
};
use crate::{DEFAULT_SEED, log_reactions};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Binomial;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// The largest number of molecules a model may describe.
pub const MAX_MOLECULES: usize = 1_000_000;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("alphabet size must be between 1 and 26 (got {0})")]
    AlphabetSize(usize),

    #[error("food polymer length {food} must be between 1 and the maximal length {max}")]
    Lengths { food: usize, max: usize },

    #[error("the model describes more than {MAX_MOLECULES} molecules")]
    TooManyMolecules,

    #[error("invalid mean catalyzation {0} (must be between 0 and the number of reactions)")]
    Catalyzation(f64),
}

/// Parameters of the binary polymer model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolymerModel {
    pub alphabet_size: usize,
    pub food_max_length: usize,
    pub max_length: usize,
    pub mean_catalyzation: f64,
    pub seed: u64,
}

impl Default for PolymerModel {
    fn default() -> Self {
        PolymerModel {
            alphabet_size: 2,
            food_max_length: 2,
            max_length: 4,
            mean_catalyzation: 2.0,
            seed: DEFAULT_SEED,
        }
    }
}

/// All polymers up to `max_length`, shorter ones first, each length in lexicographic order.
fn polymers(alphabet: &[char], max_length: usize) -> Vec<String> {
    let mut result: Vec<String> = alphabet.iter().map(|c| c.to_string()).collect();
    let mut previous = result.clone();
    for _ in 1..max_length {
        let next: Vec<String> = previous
            .iter()
            .flat_map(|p| alphabet.iter().map(move |c| format!("{p}{c}")))
            .collect();
        result.extend(next.iter().cloned());
        previous = next;
    }
    result
}

impl PolymerModel {
    fn validate(&self) -> Result<(), GeneratorError> {
        if self.alphabet_size == 0 || self.alphabet_size > 26 {
            return Err(GeneratorError::AlphabetSize(self.alphabet_size));
        }
        if self.food_max_length == 0 || self.food_max_length > self.max_length {
            return Err(GeneratorError::Lengths {
                food: self.food_max_length,
                max: self.max_length,
            });
        }
        let mut count: usize = 0;
        let mut level: usize = 1;
        for _ in 0..self.max_length {
            level = level
                .checked_mul(self.alphabet_size)
                .ok_or(GeneratorError::TooManyMolecules)?;
            count = count.saturating_add(level);
            if count > MAX_MOLECULES {
                return Err(GeneratorError::TooManyMolecules);
            }
        }
        Ok(())
    }

    /// Name of the generated system, listing the parameters.
    pub fn system_name(&self) -> String {
        format!(
            "Polymer model (k={}, n={}, m={}, μ={})",
            self.alphabet_size, self.food_max_length, self.max_length, self.mean_catalyzation
        )
    }

    pub fn generate(&self) -> Result<ReactionSystem, GeneratorError> {
        self.validate()?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let alphabet: Vec<char> = ('a'..='z').take(self.alphabet_size).collect();

        let mut table = MoleculeTable::new();
        let mut food = MoleculeSet::new();
        let molecules: Vec<(String, MoleculeId)> = polymers(&alphabet, self.max_length)
            .into_iter()
            .map(|p| {
                let id = table.intern(&p);
                if p.len() <= self.food_max_length {
                    food.insert(id);
                }
                (p, id)
            })
            .collect();

        let mut ligations = Vec::new();
        for (polymer, id) in &molecules {
            for split in 1..polymer.len() {
                let (prefix, suffix) = polymer.split_at(split);
                ligations.push((table.intern(prefix), table.intern(suffix), *id));
            }
        }

        let probability = if ligations.is_empty() {
            0.0
        } else {
            self.mean_catalyzation / ligations.len() as f64
        };
        if !(0.0..=1.0).contains(&probability) || self.mean_catalyzation.is_nan() {
            return Err(GeneratorError::Catalyzation(self.mean_catalyzation));
        }
        let distribution = Binomial::new(molecules.len() as u64, probability)
            .map_err(|_| GeneratorError::Catalyzation(self.mean_catalyzation))?;

        let mut reactions = Vec::new();
        for (prefix, suffix, product) in ligations {
            let count = rng.sample(&distribution) as usize;
            if count == 0 {
                continue;
            }
            let catalysts = rand::seq::index::sample(&mut rng, molecules.len(), count)
                .into_iter()
                .map(|i| vec![molecules[i].1])
                .collect();

            let mut reactants = BTreeMap::new();
            *reactants.entry(prefix).or_insert(0) += 1;
            *reactants.entry(suffix).or_insert(0) += 1;
            let reaction = Reaction::new(
                format!("r{}", reactions.len() + 1),
                reactants.keys().copied().collect(),
                vec![product],
                CatalystExpression::new(catalysts),
                Vec::new(),
                Direction::Both,
            );
            let reaction = if prefix == suffix {
                reaction.with_coefficients(Coefficients {
                    reactants,
                    products: BTreeMap::from([(product, 1)]),
                })
            } else {
                reaction
            };
            reactions.push(Arc::new(reaction));
        }

        info!(
            "Generated polymer model ({} molecules; {}).",
            table.len(),
            log_reactions(&reactions)
        );
        Ok(ReactionSystem::new(
            self.system_name(),
            Arc::new(table),
            food,
            reactions,
        ))
    }
}
