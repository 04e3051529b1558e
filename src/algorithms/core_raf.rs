use crate::algorithms::NetworkAlgorithm;
use crate::log_reactions;
use crate::model::ReactionSystem;
use crate::progress::ProgressSink;
use crate::reduction::max_raf_reactions;
use cancel_this::Cancellable;
use log::{info, trace};

/// The reactions contained in every RAF.
///
/// A reaction of the maximal RAF is in every RAF exactly when the maximal RAF without it
/// is empty. The result is the maximal RAF of these reactions, which is the unique
/// irreducible RAF if one exists and empty otherwise.
#[derive(Copy, Clone, Debug, Default)]
pub struct CoreRaf;

impl CoreRaf {
    pub const NAME: &'static str = "Core RAF";
}

impl NetworkAlgorithm for CoreRaf {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "computes the set of reactions contained in every RAF"
    }

    fn apply(
        &self,
        input: &ReactionSystem,
        progress: &dyn ProgressSink,
    ) -> Cancellable<ReactionSystem> {
        progress.set_tasks(Self::NAME, "max RAF");
        progress.checkpoint()?;
        let raf = max_raf_reactions(input.food(), input.reactions())?;

        progress.set_tasks(Self::NAME, "essential reactions");
        progress.set_maximum(raf.len() as u64);
        let mut core = Vec::new();
        for (i, reaction) in raf.iter().enumerate() {
            progress.checkpoint()?;
            let rest: Vec<_> = raf
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, r)| r.clone())
                .collect();
            if max_raf_reactions(input.food(), &rest)?.is_empty() {
                trace!("Reaction `{}` is essential.", reaction.name());
                core.push(reaction.clone());
            }
            progress.increment_progress();
        }

        let reactions = max_raf_reactions(input.food(), &core)?;
        info!("{} finished ({}).", Self::NAME, log_reactions(&reactions));
        Ok(input.with_reactions(Self::NAME, reactions))
    }
}
