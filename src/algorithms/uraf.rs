use crate::DEFAULT_SEED;
use crate::algorithms::{NetworkAlgorithm, RandomizedAlgorithm};
use crate::closure::{ClosureRules, compute_closure};
use crate::log_reactions;
use crate::model::{MoleculeSet, ReactionSystem};
use crate::progress::ProgressSink;
use crate::reduction::{RafReduction, ReductionConfig};
use cancel_this::Cancellable;
use computation_process::Algorithm;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// An uninhibited RAF obtained by resolving inhibition conflicts in a random order.
///
/// The pool starts as the maximal RAF with inhibitors ignored. While some reaction of the
/// pool is inhibited by a molecule of the pool's catalyzed closure, the first (in the
/// random order) reaction that is either inhibited or produces such an inhibitor is
/// removed and the pool is reduced again. The result is a RAF in which no reaction is
/// inhibited. Systems without inhibitors yield an empty result.
#[derive(Copy, Clone, Debug, Default)]
pub struct URaf;

impl URaf {
    pub const NAME: &'static str = "U RAF";
}

impl RandomizedAlgorithm for URaf {
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

        let food = input.food();
        let config = ReductionConfig::with_rules(food.clone(), ClosureRules::CATALYZED);
        let mut order = input.reactions().to_vec();
        order.shuffle(rng);
        let mut pool = RafReduction::run(config.clone(), order)?;

        let mut iteration = 0;
        loop {
            progress.checkpoint()?;
            iteration += 1;

            let closure = compute_closure(food, &pool, ClosureRules::CATALYZED)?;
            let active: MoleculeSet = pool
                .iter()
                .flat_map(|r| r.inhibitors().iter().copied())
                .filter(|m| closure.contains(*m))
                .collect();
            if active.is_empty() {
                break;
            }

            let produced = active.minus(food);
            let conflict = pool.iter().position(|r| {
                r.is_inhibited(&closure) || !r.outputs().intersect(&produced).is_empty()
            });
            let Some(position) = conflict else {
                break;
            };

            let removed = pool.remove(position);
            pool = RafReduction::run(config.clone(), pool)?;
            debug!(
                "[iteration:{}] {} removed `{}` ({}).",
                iteration,
                Self::NAME,
                removed.name(),
                log_reactions(&pool)
            );
        }

        info!("{} finished ({}).", Self::NAME, log_reactions(&pool));
        Ok(input.with_reactions(Self::NAME, pool))
    }
}

impl NetworkAlgorithm for URaf {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "computes an uninhibited RAF for one random order of reactions"
    }

    fn apply(
        &self,
        input: &ReactionSystem,
        progress: &dyn ProgressSink,
    ) -> Cancellable<ReactionSystem> {
        self.apply_with_rng(input, &mut StdRng::seed_from_u64(DEFAULT_SEED), progress)
    }
}
