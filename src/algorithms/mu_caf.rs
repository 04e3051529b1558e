use crate::DEFAULT_SEED;
use crate::algorithms::{NetworkAlgorithm, RandomizedAlgorithm};
use crate::closure::ClosureRules;
use crate::log_reactions;
use crate::model::{MoleculeSet, Reaction, ReactionSystem};
use crate::progress::ProgressSink;
use cancel_this::Cancellable;
use log::{debug, info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// An inhibition-aware CAF grown in a random reaction order.
///
/// Starting from the food set, the first reaction (in the random order) that is enabled
/// with inhibitors checked, and whose outputs do not inhibit any reaction added so far,
/// is added together with its outputs. The search stops once no reaction can be added.
/// Different orders may yield different results, so the algorithm is usually sampled
/// through [`super::MultiRun`]. Systems without inhibitors yield an empty result.
#[derive(Copy, Clone, Debug, Default)]
pub struct MuCaf;

impl MuCaf {
    pub const NAME: &'static str = "MU CAF";
}

fn produced_by(reaction: &Reaction, molecules: &MoleculeSet) -> MoleculeSet {
    reaction
        .enabled_outputs(molecules, ClosureRules::STRICT)
        .flatten()
        .copied()
        .collect()
}

fn can_add(reaction: &Arc<Reaction>, molecules: &MoleculeSet, added: &[Arc<Reaction>]) -> bool {
    if !reaction.is_enabled(molecules, ClosureRules::STRICT) {
        return false;
    }
    let produced = produced_by(reaction, molecules);
    !added
        .iter()
        .chain(std::iter::once(reaction))
        .any(|r| produced.contains_any(r.inhibitors()))
}

impl RandomizedAlgorithm for MuCaf {
    fn apply_with_rng(
        &self,
        input: &ReactionSystem,
        rng: &mut StdRng,
        progress: &dyn ProgressSink,
    ) -> Cancellable<ReactionSystem> {
        if !input.has_inhibitors() {
            info!("{} skipped (no inhibitors).", Self::NAME);
            return Ok(input.empty_like(Self::NAME));
        }

        let mut pending = input.reactions().to_vec();
        pending.shuffle(rng);

        let mut molecules = input.food().clone();
        let mut added: Vec<Arc<Reaction>> = Vec::new();
        loop {
            progress.checkpoint()?;
            let next = pending
                .iter()
                .position(|r| can_add(r, &molecules, &added));
            let Some(position) = next else {
                break;
            };

            let reaction = pending.remove(position);
            let produced = produced_by(&reaction, &molecules);
            molecules.union_with(&produced);
            trace!("Reaction `{}` added.", reaction.name());
            added.push(reaction);
            debug!(
                "[iteration:{}] {} grew ({}).",
                added.len(),
                Self::NAME,
                log_reactions(&added)
            );
        }

        info!("{} finished ({}).", Self::NAME, log_reactions(&added));
        Ok(input.with_reactions(Self::NAME, added))
    }
}

impl NetworkAlgorithm for MuCaf {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "computes an inhibition-aware CAF for one random order of reactions"
    }

    fn apply(
        &self,
        input: &ReactionSystem,
        progress: &dyn ProgressSink,
    ) -> Cancellable<ReactionSystem> {
        self.apply_with_rng(input, &mut StdRng::seed_from_u64(DEFAULT_SEED), progress)
    }
}
