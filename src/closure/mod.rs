//! The closure engine shared by all network algorithms.
//!
//! Starting from a seed set (usually the food set), the closure repeatedly fires every
//! reaction that is *enabled* and adds its outputs, until no new molecule appears. A reaction
//! is enabled in one of its directions if the input side is available, its catalyst
//! expression is satisfied and none of its inhibitors is available; the last two conditions
//! can be relaxed through [`ClosureRules`].
//!
//! The closure is a monotone fixpoint over subsets of the molecule universe, hence it
//! terminates after at most `|molecules|` rounds.
//!
//! # Example
//!
//! ```
//! use catnet_algo::closure::{ClosureRules, compute_closure};
//! use catnet_algo::io::parse_system;
//!
//! let system = parse_system("Food: a b\nr1 : a + b -> c\nr2 : c [c] -> d").unwrap();
//! let closure = compute_closure(system.food(), system.reactions(), ClosureRules::STRICT).unwrap();
//! assert_eq!(system.names_of(&closure), vec!["a", "b", "c", "d"]);
//! ```

use crate::model::{MoleculeSet, Reaction};
use cancel_this::Cancellable;
use computation_process::{Algorithm, Computation};
use std::sync::Arc;


mod closure_config;
mod closure_state;
mod iterative_closure;
mod step_operators;

pub use closure_config::{Catalysis, ClosureConfig, ClosureRules, Inhibition};
pub use closure_state::ClosureState;
pub use iterative_closure::IterativeClosure;
pub use step_operators::{FireEnabled, FireFirstEnabled};

/// A helper alias which allows us to use [`ClosureComputation`] as shorthand for
/// `Computation<Context = ClosureConfig, State = ClosureState, Output = MoleculeSet>`.
pub type ClosureComputation<STEP> = Computation<ClosureConfig, ClosureState, MoleculeSet, STEP>;

/// The recommended closure: every round fires all enabled reactions.
pub type MoleculeClosure = ClosureComputation<IterativeClosure<FireEnabled>>;

/// A closure that adds the outputs of one reaction per round. Reaches the same fixpoint
/// as [`MoleculeClosure`] unless inhibitors are checked.
pub type MoleculeClosureSaturation = ClosureComputation<IterativeClosure<FireFirstEnabled>>;

/// Used to reduce code repetition in closure-like algorithms.
///
/// Implementors define a single round of a closure procedure, which is then
/// iterated by [`IterativeClosure`].
pub trait ClosureStep {
    /// Perform a single round of the closure.
    ///
    /// Returns the set of newly available molecules (not already in `state`),
    /// or an empty set if the fixpoint is reached.
    fn step(context: &ClosureConfig, state: &MoleculeSet) -> Cancellable<MoleculeSet>;
}

/// Compute the closure of `food` over `reactions` under the given rules.
pub fn compute_closure(
    food: &MoleculeSet,
    reactions: &[Arc<Reaction>],
    rules: ClosureRules,
) -> Cancellable<MoleculeSet> {
    MoleculeClosure::run(ClosureConfig::new(reactions.to_vec(), rules), food.clone())
}

/// The reactions of `reactions` that are enabled under `available`.
pub fn filter_reactions(
    available: &MoleculeSet,
    reactions: &[Arc<Reaction>],
    rules: ClosureRules,
) -> Vec<Arc<Reaction>> {
    reactions
        .iter()
        .filter(|r| r.is_enabled(available, rules))
        .cloned()
        .collect()
}
