//! Decreasing fixpoints over reaction pools ("reduce and recheck").
//!
//! Each round computes the catalyzed closure of the food set over the current reaction
//! pool, removes every reaction whose catalysts, reactants or inhibitors are not
//! satisfied by that closure, and repeats until nothing is removed. The pool shrinks
//! monotonically, so at most `|reactions|` rounds are needed. The fixpoint of
//! [`RafReduction`] is the unique maximal RAF.

use crate::closure::ClosureRules;
use crate::model::{MoleculeSet, Reaction, ReactionSystem};
use crate::progress::ProgressSink;
use cancel_this::Cancellable;
use computation_process::{
    Algorithm, Computable, Computation, ComputationStep, Incomplete, Stateful,
};
use std::sync::Arc;

#[cfg(test)]
mod tests;

mod iterative_subtraction;
mod step_operators;

pub use iterative_subtraction::IterativeSubtraction;
pub use step_operators::UnsupportedInClosure;

/// A "flat" configuration object for reaction pool reductions.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReductionConfig {
    /// The food set the supporting molecules are derived from.
    pub food: MoleculeSet,
    /// The predicate a reaction must satisfy under the supporting molecules to be kept
    /// (default: [`ClosureRules::STRICT`]).
    pub rules: ClosureRules,
    /// Cancel the procedure if it exceeds the specified number of rounds (default:
    /// `usize::MAX`).
    pub max_iterations: usize,
}

impl ReductionConfig {
    pub fn new(food: MoleculeSet) -> ReductionConfig {
        ReductionConfig {
            food,
            rules: ClosureRules::default(),
            max_iterations: usize::MAX,
        }
    }

    pub fn with_rules(food: MoleculeSet, rules: ClosureRules) -> ReductionConfig {
        ReductionConfig {
            rules,
            ..ReductionConfig::new(food)
        }
    }
}

impl From<&ReactionSystem> for ReductionConfig {
    fn from(value: &ReactionSystem) -> Self {
        ReductionConfig::new(value.food().clone())
    }
}

#[derive(Clone, Debug)]
pub struct ReductionState {
    pub iteration: usize,
    pub reactions: Vec<Arc<Reaction>>,
}

impl From<Vec<Arc<Reaction>>> for ReductionState {
    fn from(value: Vec<Arc<Reaction>>) -> Self {
        ReductionState {
            iteration: 0,
            reactions: value,
        }
    }
}

impl From<&ReactionSystem> for ReductionState {
    fn from(value: &ReactionSystem) -> Self {
        Self::from(value.reactions().to_vec())
    }
}

impl From<ReductionState> for Vec<Arc<Reaction>> {
    fn from(value: ReductionState) -> Self {
        value.reactions
    }
}

/// A helper alias which allows us to use [`ReductionComputation`] as shorthand for
/// `Computation<Context = ReductionConfig, State = ReductionState>`.
pub type ReductionComputation<STEP> =
    Computation<ReductionConfig, ReductionState, Vec<Arc<Reaction>>, STEP>;

/// Computes the maximal RAF of a reaction pool.
pub type RafReduction = ReductionComputation<IterativeSubtraction<UnsupportedInClosure>>;

/// Used to reduce code repetition in reduction-like algorithms.
pub trait ReductionStep {
    /// Return the positions (in `state`) of the reactions that are not supported
    /// in this round. An empty result means the pool is stable.
    fn step(context: &ReductionConfig, state: &[Arc<Reaction>]) -> Cancellable<Vec<usize>>;
}

/// The reactions of the maximal RAF contained in `reactions`, in their original order.
pub fn max_raf_reactions(
    food: &MoleculeSet,
    reactions: &[Arc<Reaction>],
) -> Cancellable<Vec<Arc<Reaction>>> {
    RafReduction::run(ReductionConfig::new(food.clone()), reactions.to_vec())
}

/// Check that `reactions` is a non-empty RAF on its own.
pub fn is_raf(food: &MoleculeSet, reactions: &[Arc<Reaction>]) -> Cancellable<bool> {
    if reactions.is_empty() {
        return Ok(false);
    }
    Ok(max_raf_reactions(food, reactions)?.len() == reactions.len())
}

/// Run a reduction step by step, reporting every removal round to `progress` and
/// checking it for cancellation in between.
pub fn reduce_with_progress<STEP>(
    config: ReductionConfig,
    reactions: Vec<Arc<Reaction>>,
    progress: &dyn ProgressSink,
) -> Cancellable<Vec<Arc<Reaction>>>
where
    STEP: ComputationStep<ReductionConfig, ReductionState, Vec<Arc<Reaction>>> + 'static,
{
    progress.set_maximum(reactions.len() as u64);
    let mut computation = <ReductionComputation<STEP> as Stateful<
        ReductionConfig,
        ReductionState,
    >>::configure(config, reactions);
    loop {
        progress.checkpoint()?;
        match computation.try_compute() {
            Ok(result) => return Ok(result.to_vec()),
            Err(Incomplete::Cancelled(cancelled)) => return Err(cancelled),
            Err(_) => progress.increment_progress(),
        }
    }
}
