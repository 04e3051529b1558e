use crate::algorithms::NetworkAlgorithm;
use crate::closure::{ClosureRules, filter_reactions};
use crate::log_reactions;
use crate::model::{MoleculeSet, Reaction, ReactionSystem};
use crate::progress::ProgressSink;
use crate::reduction::is_raf;
use cancel_this::Cancellable;
use log::{info, trace};
use std::sync::Arc;

/// Reactions whose reactants (for some active direction) are all food. Catalysts and
/// inhibitors are not considered.
#[derive(Copy, Clone, Debug, Default)]
pub struct TrivialCafs;

/// Reactions that form a RAF on their own: the inputs and a catalyst are food, and no
/// inhibitor is among the food or the reaction's own outputs.
#[derive(Copy, Clone, Debug, Default)]
pub struct TrivialRafs;

impl TrivialCafs {
    pub const NAME: &'static str = "Trivial CAFs";
}

impl TrivialRafs {
    pub const NAME: &'static str = "Trivial RAFs";
}

/// Check that the singleton `{reaction}` is a RAF.
pub(crate) fn is_trivial_raf(food: &MoleculeSet, reaction: &Arc<Reaction>) -> Cancellable<bool> {
    is_raf(food, std::slice::from_ref(reaction))
}

/// The reactions of `reactions` that are trivial RAFs, in their original order.
pub(crate) fn trivial_rafs(
    food: &MoleculeSet,
    reactions: &[Arc<Reaction>],
    progress: &dyn ProgressSink,
) -> Cancellable<Vec<Arc<Reaction>>> {
    let mut result = Vec::new();
    for reaction in reactions {
        progress.checkpoint()?;
        if is_trivial_raf(food, reaction)? {
            trace!("Reaction `{}` is a trivial RAF.", reaction.name());
            result.push(reaction.clone());
        }
    }
    Ok(result)
}

impl NetworkAlgorithm for TrivialCafs {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "computes all reactions whose reactants are all in the food set"
    }

    fn apply(
        &self,
        input: &ReactionSystem,
        progress: &dyn ProgressSink,
    ) -> Cancellable<ReactionSystem> {
        progress.set_tasks(Self::NAME, "filter");
        progress.checkpoint()?;
        let reactions =
            filter_reactions(input.food(), input.reactions(), ClosureRules::REACTANTS_ONLY);
        info!("{} finished ({}).", Self::NAME, log_reactions(&reactions));
        Ok(input.with_reactions(Self::NAME, reactions))
    }
}

impl NetworkAlgorithm for TrivialRafs {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "computes all reactions that are a RAF on their own"
    }

    fn apply(
        &self,
        input: &ReactionSystem,
        progress: &dyn ProgressSink,
    ) -> Cancellable<ReactionSystem> {
        progress.set_tasks(Self::NAME, "filter");
        progress.set_maximum(input.size() as u64);
        let reactions = trivial_rafs(input.food(), input.reactions(), progress)?;
        info!("{} finished ({}).", Self::NAME, log_reactions(&reactions));
        Ok(input.with_reactions(Self::NAME, reactions))
    }
}
