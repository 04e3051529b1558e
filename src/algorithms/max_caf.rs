use crate::algorithms::NetworkAlgorithm;
use crate::closure::{ClosureRules, compute_closure, filter_reactions};
use crate::log_reactions;
use crate::model::ReactionSystem;
use crate::progress::ProgressSink;
use cancel_this::Cancellable;
use log::info;

/// The maximal CAF: the reactions enabled at the closure of the food set, where
/// catalysts must be available and inhibitors are ignored.
#[derive(Copy, Clone, Debug, Default)]
pub struct MaxCaf;

impl MaxCaf {
    pub const NAME: &'static str = "Max CAF";
}

impl NetworkAlgorithm for MaxCaf {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "computes the maximal CAF (constructively autocatalytic food-generated subset)"
    }

    fn apply(
        &self,
        input: &ReactionSystem,
        progress: &dyn ProgressSink,
    ) -> Cancellable<ReactionSystem> {
        progress.set_tasks(Self::NAME, "closure");
        progress.checkpoint()?;
        let molecules = compute_closure(input.food(), input.reactions(), ClosureRules::CATALYZED)?;
        let reactions = filter_reactions(&molecules, input.reactions(), ClosureRules::CATALYZED);
        info!("{} finished ({}).", Self::NAME, log_reactions(&reactions));
        Ok(input.with_reactions(Self::NAME, reactions))
    }
}
