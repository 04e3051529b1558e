use crate::algorithms::NetworkAlgorithm;
use crate::closure::{
    ClosureConfig, ClosureRules, ClosureState, MoleculeClosure, filter_reactions,
};
use crate::log_reactions;
use crate::model::ReactionSystem;
use crate::progress::ProgressSink;
use cancel_this::Cancellable;
use computation_process::{Computable, Incomplete, Stateful};
use log::info;

/// The maximal pseudo-RAF: the reactions enabled at the catalyzed closure of the food set,
/// without the reduce-and-recheck loop of [`super::MaxRaf`].
///
/// Only food reachability is required. Reactions blocked by an inhibitor of the closure
/// are kept, so the result contains the maximal RAF.
#[derive(Copy, Clone, Debug, Default)]
pub struct MaxPseudoRaf;

impl MaxPseudoRaf {
    pub const NAME: &'static str = "Max Pseudo RAF";
}

impl NetworkAlgorithm for MaxPseudoRaf {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "computes the maximal pseudo RAF (food-reachable without the RAF recheck)"
    }

    fn apply(
        &self,
        input: &ReactionSystem,
        progress: &dyn ProgressSink,
    ) -> Cancellable<ReactionSystem> {
        progress.set_tasks(Self::NAME, "closure");
        progress.set_maximum(input.molecules_mentioned().len() as u64);

        let config = ClosureConfig::new(input.reactions().to_vec(), ClosureRules::CATALYZED);
        let mut closure = <MoleculeClosure as Stateful<ClosureConfig, ClosureState>>::configure(
            config,
            input.food().clone(),
        );
        let molecules = loop {
            progress.checkpoint()?;
            match closure.try_compute() {
                Ok(molecules) => break molecules.clone(),
                Err(Incomplete::Cancelled(cancelled)) => return Err(cancelled),
                Err(_) => progress.increment_progress(),
            }
        };

        let reactions = filter_reactions(&molecules, input.reactions(), ClosureRules::CATALYZED);
        info!("{} finished ({}).", Self::NAME, log_reactions(&reactions));
        Ok(input.with_reactions(Self::NAME, reactions))
    }
}
