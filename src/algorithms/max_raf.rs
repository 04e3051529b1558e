use crate::algorithms::NetworkAlgorithm;
use crate::log_reactions;
use crate::model::ReactionSystem;
use crate::progress::ProgressSink;
use crate::reduction::{
    IterativeSubtraction, ReductionConfig, UnsupportedInClosure, reduce_with_progress,
};
use cancel_this::Cancellable;
use log::info;

/// The maximal RAF, obtained by the reduce-and-recheck fixpoint of
/// [`crate::reduction::RafReduction`].
#[derive(Copy, Clone, Debug, Default)]
pub struct MaxRaf;

impl MaxRaf {
    pub const NAME: &'static str = "Max RAF";
}

impl NetworkAlgorithm for MaxRaf {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "computes the maximal RAF (reflexively autocatalytic food-generated subset)"
    }

    fn apply(
        &self,
        input: &ReactionSystem,
        progress: &dyn ProgressSink,
    ) -> Cancellable<ReactionSystem> {
        progress.set_tasks(Self::NAME, "reduction");
        let reactions = reduce_with_progress::<IterativeSubtraction<UnsupportedInClosure>>(
            ReductionConfig::from(input),
            input.reactions().to_vec(),
            progress,
        )?;
        info!("{} finished ({}).", Self::NAME, log_reactions(&reactions));
        Ok(input.with_reactions(Self::NAME, reactions))
    }
}
