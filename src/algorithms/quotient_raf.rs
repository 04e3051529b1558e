use crate::algorithms::NetworkAlgorithm;
use crate::algorithms::trivial::trivial_rafs;
use crate::closure::{ClosureRules, compute_closure};
use crate::model::ReactionSystem;
use crate::progress::ProgressSink;
use crate::reduction::max_raf_reactions;
use crate::{log_molecules, log_reactions};
use cancel_this::Cancellable;
use log::{debug, info};
use rustc_hash::FxHashSet;

/// Repeatedly contracts the trivial RAFs of the maximal RAF into the food set.
///
/// Each round computes the maximal RAF, adds everything its trivial RAF reactions generate to
/// the food set and removes those reactions from the pool. The result holds the final
/// (extended) food set and the maximal RAF of the remaining pool.
#[derive(Copy, Clone, Debug, Default)]
pub struct QuotientRaf;

impl QuotientRaf {
    pub const NAME: &'static str = "Quotient RAF";
}

impl NetworkAlgorithm for QuotientRaf {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "contracts trivial RAFs into the food set until the maximal RAF has none"
    }

    fn apply(
        &self,
        input: &ReactionSystem,
        progress: &dyn ProgressSink,
    ) -> Cancellable<ReactionSystem> {
        progress.set_tasks(Self::NAME, "contraction");
        progress.set_maximum(input.size() as u64);

        let mut food = input.food().clone();
        let mut pool = input.reactions().to_vec();
        let mut iteration = 0;
        loop {
            progress.checkpoint()?;
            iteration += 1;

            let raf = max_raf_reactions(&food, &pool)?;
            let trivial = trivial_rafs(&food, &raf, progress)?;
            if trivial.is_empty() {
                info!(
                    "{} finished ({}; {}).",
                    Self::NAME,
                    log_molecules(&food),
                    log_reactions(&raf)
                );
                return Ok(input.derive(Self::NAME, food, raf));
            }

            food = compute_closure(&food, &trivial, ClosureRules::CATALYZED)?;
            let removed: FxHashSet<&str> = trivial.iter().map(|r| r.name()).collect();
            pool.retain(|r| !removed.contains(r.name()));
            progress.set_progress((input.size() - pool.len()) as u64);
            debug!(
                "[iteration:{}] {} contracted {} trivial RAFs ({}; {}).",
                iteration,
                Self::NAME,
                trivial.len(),
                log_molecules(&food),
                log_reactions(&pool)
            );
        }
    }
}
