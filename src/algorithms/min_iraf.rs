use crate::algorithms::heuristic::{into_systems, minimal_accepted_raf, smallest_of_trials};
use crate::algorithms::{HeuristicConfig, NetworkAlgorithm};
use crate::log_reactions;
use crate::model::ReactionSystem;
use crate::progress::ProgressSink;
use crate::reduction::max_raf_reactions;
use cancel_this::Cancellable;
use log::info;

/// Searches for a smallest irreducible RAF by randomized insertion orders.
///
/// Finding a smallest irreducible RAF is NP-hard; every trial returns an irreducible RAF
/// and the smallest one observed over [`HeuristicConfig::runs`] trials is kept.
#[derive(Clone, Debug, Default)]
pub struct MinIRafHeuristic {
    pub config: HeuristicConfig,
}

impl MinIRafHeuristic {
    pub const NAME: &'static str = "Min iRAF heuristic";

    pub fn new(config: HeuristicConfig) -> MinIRafHeuristic {
        MinIRafHeuristic { config }
    }

    /// The smallest irreducible RAFs found, or just the first of them unless
    /// [`HeuristicConfig::all_smallest`] is set. Empty if the system has no RAF.
    pub fn apply_all(
        &self,
        input: &ReactionSystem,
        progress: &dyn ProgressSink,
    ) -> Cancellable<Vec<ReactionSystem>> {
        progress.set_tasks(Self::NAME, "max RAF");
        progress.checkpoint()?;
        let pool = max_raf_reactions(input.food(), input.reactions())?;
        if pool.is_empty() {
            info!("{} finished (no RAF).", Self::NAME);
            return Ok(Vec::new());
        }

        let mut best = smallest_of_trials(Self::NAME, &self.config, progress, |rng| {
            minimal_accepted_raf(input.food(), &pool, rng, |_| Ok(true))
        })?;
        if !self.config.all_smallest {
            best.truncate(1);
        }

        let systems = into_systems(input, Self::NAME, best);
        if let Some(first) = systems.first() {
            info!(
                "{} finished with {} result(s) ({}).",
                Self::NAME,
                systems.len(),
                log_reactions(first.reactions())
            );
        }
        Ok(systems)
    }
}

impl NetworkAlgorithm for MinIRafHeuristic {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "searches for a smallest irreducible RAF using randomized insertion orders"
    }

    fn apply(
        &self,
        input: &ReactionSystem,
        progress: &dyn ProgressSink,
    ) -> Cancellable<ReactionSystem> {
        let results = self.apply_all(input, progress)?;
        Ok(results
            .into_iter()
            .next()
            .unwrap_or_else(|| input.empty_like(Self::NAME)))
    }
}
