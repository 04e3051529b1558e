use crate::algorithms::NetworkAlgorithm;
use crate::algorithms::trivial::trivial_rafs;
use crate::log_reactions;
use crate::model::ReactionSystem;
use crate::progress::ProgressSink;
use crate::reduction::max_raf_reactions;
use cancel_this::Cancellable;
use log::{debug, info};
use rustc_hash::FxHashSet;

/// The maximal RAF without its trivial RAF reactions.
///
/// What remains are the reactions that depend on a chain of other reactions. The
/// remainder is not reduced again: without the reactions that start from food it would
/// never be a RAF on its own.
#[derive(Copy, Clone, Debug, Default)]
pub struct RemoveTrivialRafs;

impl RemoveTrivialRafs {
    pub const NAME: &'static str = "Remove Trivial RAFs";
}

impl NetworkAlgorithm for RemoveTrivialRafs {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "computes the maximal RAF and removes all reactions that are RAFs on their own"
    }

    fn apply(
        &self,
        input: &ReactionSystem,
        progress: &dyn ProgressSink,
    ) -> Cancellable<ReactionSystem> {
        progress.set_tasks(Self::NAME, "max RAF");
        progress.checkpoint()?;
        let raf = max_raf_reactions(input.food(), input.reactions())?;

        progress.set_tasks(Self::NAME, "trivial RAFs");
        let trivial: FxHashSet<String> = trivial_rafs(input.food(), &raf, progress)?
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        debug!("Removing {} trivial RAF reactions.", trivial.len());

        let reactions: Vec<_> = raf
            .into_iter()
            .filter(|r| !trivial.contains(r.name()))
            .collect();
        info!("{} finished ({}).", Self::NAME, log_reactions(&reactions));
        Ok(input.with_reactions(Self::NAME, reactions))
    }
}
