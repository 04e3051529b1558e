//! The data model of catalytic reaction systems.
//!
//! Molecules are interned in a [`MoleculeTable`] and referenced by [`MoleculeId`] handles,
//! so that sets of molecules are plain bitsets ([`MoleculeSet`]). A [`Reaction`] owns its
//! reactant, product and inhibitor lists together with a [`CatalystExpression`], and a
//! [`ReactionSystem`] combines a food set with a list of shared reactions.

mod catalysts;
mod molecule;
mod molecule_set;
mod reaction;
mod reaction_system;


pub use catalysts::{CatalystExpression, FORMAL_FOOD};
pub use molecule::{MoleculeId, MoleculeTable};
pub use molecule_set::MoleculeSet;
pub use reaction::{Coefficients, Direction, Reaction};
pub use reaction_system::ReactionSystem;
