//! The randomized insertion-and-pruning search shared by the minimization heuristics.

use crate::algorithms::HeuristicConfig;
use crate::model::{MoleculeSet, Reaction, ReactionSystem};
use crate::progress::{ProgressSink, with_triggers};
use crate::reduction::max_raf_reactions;
use crate::{log_reactions, trial_seed};
use cancel_this::{Cancellable, is_cancelled};
use itertools::Itertools;
use log::{debug, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Find a minimal RAF satisfying `accept` in one random order of `pool`.
///
/// Reactions of the shuffled pool are inserted one by one until the maximal RAF of the
/// inserted reactions is non-empty and accepted. That RAF is then pruned in insertion
/// order: a reaction is dropped whenever the maximal RAF of the remainder is still
/// non-empty and accepted, and the search continues from that smaller RAF.
///
/// `accept` must be monotone (a superset of an accepted RAF is accepted). Under this
/// condition, no proper subset of the result is an accepted RAF. Returns an empty
/// vector if no accepted RAF exists in `pool`.
pub(crate) fn minimal_accepted_raf<A>(
    food: &MoleculeSet,
    pool: &[Arc<Reaction>],
    rng: &mut StdRng,
    accept: A,
) -> Cancellable<Vec<Arc<Reaction>>>
where
    A: Fn(&[Arc<Reaction>]) -> Cancellable<bool>,
{
    let mut order = pool.to_vec();
    order.shuffle(rng);

    let mut inserted = Vec::with_capacity(order.len());
    let mut found = None;
    for reaction in order {
        inserted.push(reaction);
        let raf = max_raf_reactions(food, &inserted)?;
        if !raf.is_empty() && accept(&raf)? {
            found = Some(raf);
            break;
        }
    }

    let Some(mut current) = found else {
        return Ok(Vec::new());
    };
    trace!(
        "Insertion phase found a RAF ({}) after {} insertions.",
        log_reactions(&current),
        inserted.len()
    );

    let candidates = current.clone();
    for reaction in &candidates {
        is_cancelled!()?;
        let Some(position) = current.iter().position(|r| Arc::ptr_eq(r, reaction)) else {
            continue;
        };
        let mut rest = current.clone();
        rest.remove(position);
        let raf = max_raf_reactions(food, &rest)?;
        if !raf.is_empty() && accept(&raf)? {
            trace!("Reaction `{}` is redundant.", reaction.name());
            current = raf;
        }
    }

    Ok(current)
}

/// Run `config.runs` independent trials in parallel and keep the distinct non-empty
/// results of the smallest size, in trial order.
///
/// Every trial gets its own generator seeded by [`trial_seed`], so the outcome does not
/// depend on the number of worker threads.
pub(crate) fn smallest_of_trials<F>(
    name: &str,
    config: &HeuristicConfig,
    progress: &dyn ProgressSink,
    trial: F,
) -> Cancellable<Vec<Vec<Arc<Reaction>>>>
where
    F: Fn(&mut StdRng) -> Cancellable<Vec<Arc<Reaction>>> + Sync,
{
    progress.set_tasks(name, "random trials");
    progress.set_maximum(config.runs as u64);

    let triggers = cancel_this::active_triggers();
    let results = (0..config.runs)
        .into_par_iter()
        .map(|index| {
            with_triggers(&triggers, || {
                progress.checkpoint()?;
                let mut rng = StdRng::seed_from_u64(trial_seed(config.seed, index));
                let result = trial(&mut rng)?;
                debug!(
                    "[trial:{}] {} found ({}).",
                    index,
                    name,
                    log_reactions(&result)
                );
                progress.increment_progress();
                Ok(result)
            })
        })
        .collect::<Cancellable<Vec<_>>>()?;

    let Some(smallest) = results
        .iter()
        .filter(|r| !r.is_empty())
        .map(|r| r.len())
        .min()
    else {
        return Ok(Vec::new());
    };

    let mut seen: FxHashSet<Vec<String>> = FxHashSet::default();
    let mut best = Vec::new();
    for result in results {
        if result.len() != smallest {
            continue;
        }
        let key = result
            .iter()
            .map(|r| r.name().to_string())
            .sorted()
            .collect::<Vec<_>>();
        if seen.insert(key) {
            best.push(result);
        }
    }
    Ok(best)
}

/// Wrap heuristic results into systems over the food of `input`. Several results are
/// numbered in order.
pub(crate) fn into_systems(
    input: &ReactionSystem,
    name: &str,
    results: Vec<Vec<Arc<Reaction>>>,
) -> Vec<ReactionSystem> {
    let count = results.len();
    results
        .into_iter()
        .enumerate()
        .map(|(i, reactions)| {
            if count == 1 {
                input.with_reactions(name, reactions)
            } else {
                input.with_reactions(format!("{} {}", name, i + 1), reactions)
            }
        })
        .collect()
}
