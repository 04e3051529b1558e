use crate::closure::{ClosureConfig, ClosureStep};
use crate::log_molecules;
use crate::model::MoleculeSet;
use cancel_this::{Cancellable, is_cancelled};
use log::trace;

/// Fires every reaction enabled under the current set at once and returns the molecules
/// this makes newly available. Iterating it yields the closure round by round.
pub struct FireEnabled;

/// Returns the new outputs of the first enabled reaction that produces anything new
/// (or an empty set otherwise). Without inhibition, it reaches the same fixpoint as
/// [`FireEnabled`], usually in more but cheaper rounds. With inhibition, the result depends
/// on the order of the reaction pool.
pub struct FireFirstEnabled;

impl ClosureStep for FireEnabled {
    fn step(context: &ClosureConfig, state: &MoleculeSet) -> Cancellable<MoleculeSet> {
        let mut fresh = MoleculeSet::new();
        for reaction in &context.reactions {
            is_cancelled!()?;
            for output in reaction.enabled_outputs(state, context.rules) {
                for molecule in output {
                    if !state.contains(*molecule) && fresh.insert(*molecule) {
                        trace!("Molecule `{molecule}` produced by `{}`.", reaction.name());
                    }
                }
            }
        }
        trace!("Round produced ({}).", log_molecules(&fresh));
        Ok(fresh)
    }
}

impl ClosureStep for FireFirstEnabled {
    fn step(context: &ClosureConfig, state: &MoleculeSet) -> Cancellable<MoleculeSet> {
        for reaction in &context.reactions {
            is_cancelled!()?;
            let fresh: MoleculeSet = reaction
                .enabled_outputs(state, context.rules)
                .flatten()
                .copied()
                .filter(|m| !state.contains(*m))
                .collect();
            if !fresh.is_empty() {
                trace!(
                    "Found new molecules using `{}` ({}).",
                    reaction.name(),
                    log_molecules(&fresh)
                );
                return Ok(fresh);
            }
        }

        Ok(MoleculeSet::new())
    }
}
