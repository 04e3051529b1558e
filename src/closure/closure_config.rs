use crate::model::{Reaction, ReactionSystem};
use std::sync::Arc;

/// Whether a reaction needs its catalyst expression to be satisfied to fire.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Catalysis {
    Required,
    Ignored,
}

/// Whether an available inhibitor prevents a reaction from firing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Inhibition {
    Checked,
    Ignored,
}

/// The enabling predicate used by closure computations.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosureRules {
    pub catalysis: Catalysis,
    pub inhibition: Inhibition,
}

impl ClosureRules {
    /// Catalysis required and inhibition checked (default).
    pub const STRICT: ClosureRules = ClosureRules {
        catalysis: Catalysis::Required,
        inhibition: Inhibition::Checked,
    };

    /// Catalysis required, inhibitors ignored.
    pub const CATALYZED: ClosureRules = ClosureRules {
        catalysis: Catalysis::Required,
        inhibition: Inhibition::Ignored,
    };

    /// Only reactants matter.
    pub const REACTANTS_ONLY: ClosureRules = ClosureRules {
        catalysis: Catalysis::Ignored,
        inhibition: Inhibition::Ignored,
    };
}

impl Default for ClosureRules {
    fn default() -> Self {
        ClosureRules::STRICT
    }
}

/// A "flat" configuration object for closure computations.
#[derive(Clone, Debug)]
pub struct ClosureConfig {
    /// The reaction pool that can fire during the closure.
    pub reactions: Vec<Arc<Reaction>>,
    /// The enabling predicate (default: [`ClosureRules::STRICT`]).
    pub rules: ClosureRules,
    /// Cancel the procedure if it exceeds the specified number of rounds (default:
    /// `usize::MAX`).
    pub max_iterations: usize,
}

impl ClosureConfig {
    pub fn new(reactions: Vec<Arc<Reaction>>, rules: ClosureRules) -> ClosureConfig {
        ClosureConfig {
            reactions,
            rules,
            max_iterations: usize::MAX,
        }
    }
}

impl From<&ReactionSystem> for ClosureConfig {
    fn from(value: &ReactionSystem) -> Self {
        ClosureConfig::new(value.reactions().to_vec(), ClosureRules::default())
    }
}

impl From<Vec<Arc<Reaction>>> for ClosureConfig {
    fn from(value: Vec<Arc<Reaction>>) -> Self {
        ClosureConfig::new(value, ClosureRules::default())
    }
}
