use crate::algorithms::heuristic::{into_systems, minimal_accepted_raf, smallest_of_trials};
use crate::algorithms::{HeuristicConfig, NetworkAlgorithm};
use crate::closure::{ClosureRules, compute_closure};
use crate::log_reactions;
use crate::model::{MoleculeId, MoleculeSet, Reaction, ReactionSystem};
use crate::progress::ProgressSink;
use crate::reduction::max_raf_reactions;
use cancel_this::Cancellable;
use log::{info, warn};
use std::sync::Arc;

/// Searches for a smallest RAF that generates all target molecules
/// ([`HeuristicConfig::targets`]).
///
/// A RAF generates a molecule if the molecule is in the catalyzed closure of the food set
/// over the RAF's reactions. The search follows [`super::MinIRafHeuristic`] with
/// generation of the targets as an additional acceptance condition.
#[derive(Clone, Debug, Default)]
pub struct MinRafGeneratingElement {
    pub config: HeuristicConfig,
}

fn generates(
    food: &MoleculeSet,
    reactions: &[Arc<Reaction>],
    targets: &[MoleculeId],
) -> Cancellable<bool> {
    let closure = compute_closure(food, reactions, ClosureRules::CATALYZED)?;
    Ok(closure.contains_all(targets))
}

impl MinRafGeneratingElement {
    pub const NAME: &'static str = "Min RAF Generating Element";

    pub fn new(config: HeuristicConfig) -> MinRafGeneratingElement {
        MinRafGeneratingElement { config }
    }

    /// Resolve the target names, or `None` if some target is unknown.
    fn targets(&self, input: &ReactionSystem) -> Option<Vec<MoleculeId>> {
        self.config
            .targets
            .iter()
            .map(|name| {
                let id = input.molecule(name);
                if id.is_none() {
                    warn!("Unknown target molecule `{name}`.");
                }
                id
            })
            .collect()
    }

    /// The smallest generating RAFs found, or just the first of them unless
    /// [`HeuristicConfig::all_smallest`] is set. Empty if no RAF generates the targets,
    /// if there are no targets, or if all targets are food.
    pub fn apply_all(
        &self,
        input: &ReactionSystem,
        progress: &dyn ProgressSink,
    ) -> Cancellable<Vec<ReactionSystem>> {
        let Some(targets) = self.targets(input) else {
            return Ok(Vec::new());
        };
        if targets.is_empty() || input.food().contains_all(&targets) {
            info!("{} finished (nothing to generate).", Self::NAME);
            return Ok(Vec::new());
        }

        progress.set_tasks(Self::NAME, "max RAF");
        progress.checkpoint()?;
        let pool = max_raf_reactions(input.food(), input.reactions())?;
        if pool.is_empty() || !generates(input.food(), &pool, &targets)? {
            info!("{} finished (targets not generated by max RAF).", Self::NAME);
            return Ok(Vec::new());
        }

        let mut best = smallest_of_trials(Self::NAME, &self.config, progress, |rng| {
            minimal_accepted_raf(input.food(), &pool, rng, |raf| {
                generates(input.food(), raf, &targets)
            })
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

impl NetworkAlgorithm for MinRafGeneratingElement {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "searches for a smallest RAF that generates the given target molecules"
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
