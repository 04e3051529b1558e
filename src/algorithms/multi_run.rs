use crate::algorithms::{NetworkAlgorithm, RandomizedAlgorithm};
use crate::model::ReactionSystem;
use crate::progress::{ProgressSink, with_triggers};
use crate::trial_seed;
use cancel_this::Cancellable;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// One distinct result of a [`MultiRun`] and the number of runs that produced it.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub system: ReactionSystem,
    pub count: usize,
}

/// Runs an order-sensitive algorithm for `runs` seeded random orders and reports the
/// distinct outcomes.
///
/// Outcomes are compared by their sets of reaction names.
#[derive(Clone, Debug)]
pub struct MultiRun<A: RandomizedAlgorithm> {
    pub algorithm: A,
    pub runs: usize,
    pub seed: u64,
}

impl<A: RandomizedAlgorithm> MultiRun<A> {
    pub fn new(algorithm: A, runs: usize, seed: u64) -> MultiRun<A> {
        MultiRun {
            algorithm,
            runs,
            seed,
        }
    }

    /// All distinct outcomes, the most frequent first (ties: the larger outcome first,
    /// then in order of the first run that produced it).
    pub fn outcomes(
        &self,
        input: &ReactionSystem,
        progress: &dyn ProgressSink,
    ) -> Cancellable<Vec<RunOutcome>> {
        let name = self.algorithm.name();
        progress.set_tasks(name, "random runs");
        progress.set_maximum(self.runs as u64);

        let triggers = cancel_this::active_triggers();
        let results = (0..self.runs)
            .into_par_iter()
            .map(|run| {
                with_triggers(&triggers, || {
                    progress.checkpoint()?;
                    let mut rng = StdRng::seed_from_u64(trial_seed(self.seed, run));
                    let result = self.algorithm.apply_with_rng(input, &mut rng, progress)?;
                    debug!("[run:{}] {} found {} reactions.", run, name, result.size());
                    progress.increment_progress();
                    Ok(result)
                })
            })
            .collect::<Cancellable<Vec<_>>>()?;

        let mut index: FxHashMap<Vec<String>, usize> = FxHashMap::default();
        let mut outcomes: Vec<RunOutcome> = Vec::new();
        for system in results {
            let key: Vec<String> = system
                .reaction_names()
                .into_iter()
                .map(str::to_string)
                .collect();
            match index.get(&key) {
                Some(i) => outcomes[*i].count += 1,
                None => {
                    index.insert(key, outcomes.len());
                    outcomes.push(RunOutcome { system, count: 1 });
                }
            }
        }
        outcomes.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| b.system.size().cmp(&a.system.size()))
        });

        info!(
            "{} finished with {} distinct outcome(s) in {} runs.",
            name,
            outcomes.len(),
            self.runs
        );
        Ok(outcomes)
    }
}

impl<A: RandomizedAlgorithm> NetworkAlgorithm for MultiRun<A> {
    fn name(&self) -> &'static str {
        self.algorithm.name()
    }

    fn description(&self) -> &'static str {
        self.algorithm.description()
    }

    /// The most frequent outcome.
    fn apply(
        &self,
        input: &ReactionSystem,
        progress: &dyn ProgressSink,
    ) -> Cancellable<ReactionSystem> {
        let outcomes = self.outcomes(input, progress)?;
        Ok(outcomes
            .into_iter()
            .next()
            .map(|o| o.system)
            .unwrap_or_else(|| input.empty_like(self.algorithm.name())))
    }
}
